use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_thread_ids(true)
        .with_writer(log_writer(config)?);

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format.as_str() {
        "json" => registry.with(fmt_layer.json()).init(),
        _ => registry
            .with(fmt_layer.pretty().with_ansi(config.file_path.is_none()))
            .init(),
    }

    tracing::info!(
        level = %config.level,
        format = %config.format,
        file = config.file_path.as_deref().unwrap_or("stdout"),
        "Logging initialized"
    );
    Ok(())
}

/// Stdout, or the configured file opened for appending.
fn log_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    let writer = match &config.file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    Ok(writer)
}

/// Log a lookup failure with its error code and any extra fields.
#[macro_export]
macro_rules! log_error {
    ($err:expr, $msg:literal) => {
        tracing::error!(error = %$err, code = $err.error_code(), $msg);
    };
    ($err:expr, $msg:literal, $($field:tt)*) => {
        tracing::error!(error = %$err, code = $err.error_code(), $($field)*, $msg);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_writer_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("consulta.log");
        let config = LoggingConfig {
            file_path: Some(path.display().to_string()),
            ..LoggingConfig::default()
        };

        assert!(log_writer(&config).is_ok());
        assert!(path.is_file());
    }

    #[test]
    fn test_log_writer_rejects_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            file_path: Some(dir.path().join("missing/consulta.log").display().to_string()),
            ..LoggingConfig::default()
        };

        assert!(log_writer(&config).is_err());
    }
}
