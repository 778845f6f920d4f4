use std::path::Path;

use crate::error::ConfigError;

use super::model::DatasetFile;

/// Extensions accepted by the dataset picker.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "json", "parquet", "zip"];

/// Returns true if `path` carries one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Checks the extension filter and reads the file size from metadata.
///
/// # Errors
/// Returns [`ConfigError::UnsupportedDataset`] for a filtered-out extension and
/// [`ConfigError::DatasetUnreadable`] when the metadata cannot be read.
pub fn inspect(path: &str) -> Result<DatasetFile, ConfigError> {
    let path = path.trim();
    let p = Path::new(path);

    let name = p
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    if !is_supported(p) {
        return Err(ConfigError::UnsupportedDataset(name));
    }

    let meta = std::fs::metadata(p).map_err(|source| ConfigError::DatasetUnreadable {
        path: path.to_string(),
        source,
    })?;

    if !meta.is_file() {
        return Err(ConfigError::DatasetUnreadable {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    Ok(DatasetFile {
        name,
        size_bytes: meta.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_supported(Path::new("data/train.csv")));
        assert!(is_supported(Path::new("TRAIN.PARQUET")));
        assert!(is_supported(Path::new("bundle.Zip")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("csv")));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_touching_disk() {
        let err = inspect("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDataset(name) if name == "exist.txt"));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = inspect("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, ConfigError::DatasetUnreadable { .. }));
    }

    #[test]
    fn reports_name_and_size() {
        let dir = std::env::temp_dir().join(format!("dashboard-dataset-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("train.json");
        std::fs::write(&path, vec![b'x'; 2048]).unwrap();

        let file = inspect(path.to_str().unwrap()).unwrap();
        assert_eq!(file.name, "train.json");
        assert_eq!(file.size_bytes, 2048);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
