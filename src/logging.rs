use std::fs::OpenOptions;

use anyhow::{Context, Result};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "DASHBOARD_LOG";

/// Initializes `env_logger`.
///
/// The alternate screen owns the terminal, so records go to the file named by
/// `$DASHBOARD_LOG`; without it they are discarded. `RUST_LOG` filters as
/// usual and defaults to `info`.
///
/// # Errors
/// Returns an error if the log file cannot be opened.
pub fn init() -> Result<()> {
    let target: Box<dyn std::io::Write + Send> = match std::env::var_os(LOG_ENV) {
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open log file {path:?}"))?,
        ),
        None => Box::new(std::io::sink()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .try_init()
        .context("logger already initialized")?;

    Ok(())
}
