//! Tracing setup. Builds a [`Dispatch`] that the binary hands to every
//! component instead of installing a global subscriber.

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dynadvisor_core::AdvisorConfig;

/// Dispatch plus the guard that flushes the log file on drop.
pub struct Logging {
    pub dispatch: Dispatch,
    _file_guard: Option<WorkerGuard>,
}

/// Console logs go to stderr so command output on stdout stays clean.
/// `RUST_LOG` overrides `LOG_LEVEL`.
pub fn init(config: &AdvisorConfig) -> Result<Logging> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(&config.log_level)));

    let (file_layer, file_guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(file_layer);

    Ok(Logging {
        dispatch: Dispatch::new(subscriber),
        _file_guard: file_guard,
    })
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("LOG_FILE has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Map a `LOG_LEVEL` name to an `EnvFilter` directive. Unknown names fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        "off" => "off",
        _ => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("INFO"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("critical"), "error");
        assert_eq!(level_directive(" Debug "), "debug");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn test_log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = AdvisorConfig {
            log_file: Some(dir.path().join("logs/advisor.log")),
            ..Default::default()
        };
        let logging = init(&config).unwrap();
        tracing::dispatcher::with_default(&logging.dispatch, || {
            tracing::warn!("written to file");
        });
        drop(logging);

        let content = std::fs::read_to_string(dir.path().join("logs/advisor.log")).unwrap();
        assert!(content.contains("written to file"));
    }
}
