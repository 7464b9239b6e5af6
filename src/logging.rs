// src/logging.rs
//! Tracing setup: human-readable logs on stderr, optional JSON log file

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;

/// Default filter when RUST_LOG is unset; debug output only in development
pub fn default_directives(config: &AppConfig) -> String {
    let level = if config.is_development() { "debug" } else { "info" };
    format!("warn,job_hunter={}", level)
}

/// Install the process-wide subscriber. Call once, before any component logs.
pub fn init(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(config)))
        .context("Invalid log filter")?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = match config.log_file.as_ref() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(true)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_only_in_development() {
        let mut config = AppConfig::default();
        assert_eq!(default_directives(&config), "warn,job_hunter=info");

        config.environment = "development".to_string();
        assert_eq!(default_directives(&config), "warn,job_hunter=debug");
    }
}
