//! Structured logging system
//!
//! Sets up the global tracing subscriber from configuration: JSON or text
//! format, stdout or daily-rolling file output, level via EnvFilter.

use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Logger instance that keeps the non-blocking writer alive
pub struct Logger {
    _guard: WorkerGuard,
}

impl Logger {
    /// Initialize the logging system based on configuration
    ///
    /// The returned guard must be held for the lifetime of the process;
    /// dropping it flushes and stops the background writer.
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

        let (writer, guard) = match config.output.as_str() {
            "stdout" => tracing_appender::non_blocking(std::io::stdout()),
            "file" => {
                let log_file = config
                    .log_file
                    .as_ref()
                    .context("log_file must be specified when output is 'file'")?;

                let directory = log_file
                    .parent()
                    .context("log file must have a parent directory")?;
                let filename = log_file
                    .file_name()
                    .context("log file must have a filename")?;

                std::fs::create_dir_all(directory)
                    .context("Failed to create log directory")?;

                let appender = tracing_appender::rolling::daily(directory, filename);
                tracing_appender::non_blocking(appender)
            }
            other => anyhow::bail!("Invalid output configuration: {}", other),
        };

        let fmt_layer = match config.format.as_str() {
            "json" => fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .boxed(),
            "text" => fmt::layer().with_writer(writer).with_target(true).boxed(),
            other => anyhow::bail!("Invalid format configuration: {}", other),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize tracing subscriber")?;

        tracing::info!(
            level = %config.level,
            format = %config.format,
            output = %config.output,
            "Logging system initialized"
        );

        Ok(Logger { _guard: guard })
    }
}
