use std::fmt;

/// Errors raised while turning the training form into a runnable config.
#[derive(Debug)]
pub enum ConfigError {
    /// A numeric field could not be parsed.
    NotANumber { field: &'static str, value: String },
    /// A numeric field parsed but falls outside its accepted bounds.
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// The learning rate is not a finite, positive decimal.
    InvalidLearningRate(String),
    /// The dataset file extension is not one of the accepted formats.
    UnsupportedDataset(String),
    /// The dataset path could not be inspected.
    DatasetUnreadable {
        path: String,
        source: std::io::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { field, value } => {
                write!(f, "{field} must be a whole number, got '{value}'")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be between {min} and {max}, got {value}"),
            Self::InvalidLearningRate(value) => {
                write!(f, "learning rate must be a positive decimal, got '{value}'")
            }
            Self::UnsupportedDataset(name) => write!(
                f,
                "unsupported dataset '{name}' (expected .csv, .json, .parquet or .zip)"
            ),
            Self::DatasetUnreadable { path, source } => {
                write!(f, "cannot read '{path}': {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors raised by the run simulator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunError {
    /// `start` was called while a run is still ticking.
    AlreadyRunning,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "a training run is already in progress"),
        }
    }
}

impl std::error::Error for RunError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ConfigError::OutOfRange {
            field: "epochs",
            value: 0,
            min: 1,
            max: 1000,
        };
        assert_eq!(err.to_string(), "epochs must be between 1 and 1000, got 0");

        let err = ConfigError::NotANumber {
            field: "batch size",
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "batch size must be a whole number, got 'abc'");
    }

    #[test]
    fn unreadable_dataset_exposes_source() {
        use std::error::Error;

        let err = ConfigError::DatasetUnreadable {
            path: "missing.csv".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.source().is_some());
        assert!(ConfigError::UnsupportedDataset("a.txt".into()).source().is_none());
    }
}
