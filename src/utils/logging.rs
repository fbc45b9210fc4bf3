use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// Install a global `tracing` subscriber according to `config`.
///
/// Console and file output are independent layers, so both sinks receive
/// every event when both are enabled. Fails if `config` does not validate,
/// the log file cannot be opened, or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    build_subscriber(config)?
        .try_init()
        .map_err(|e| ProtocolError::ConfigError(format!("Failed to install logger: {e}")))
}

fn build_subscriber(config: &LoggingConfig) -> Result<impl Subscriber + Send + Sync + 'static> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ProtocolError::ConfigError(format!(
            "Invalid logging configuration: {}",
            errors.join("; ")
        )));
    }

    let console = config
        .log_to_console
        .then(|| tracing_subscriber::fmt::layer().with_target(true));

    let file = match (config.log_to_file, config.log_file_path.as_deref()) {
        (true, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    ProtocolError::ConfigError(format!("Failed to open log file '{path}': {e}"))
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        _ => None,
    };

    Ok(tracing_subscriber::registry()
        .with(LevelFilter::from_level(config.log_level))
        .with(console)
        .with(file))
}
