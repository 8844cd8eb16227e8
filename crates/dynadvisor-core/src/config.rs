//! Configuration loaded from the process environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_GRAPH_REPO: &str = "./graphs";
const DEFAULT_DOCS_PATH: &str = "./docs";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Top-level dyn-advisor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Root of the `.dyn` graph repository (`GRAPH_REPO_PATH`).
    pub graph_repo_path: PathBuf,
    /// Documentation tree indexed alongside graphs (`DOCS_PATH`).
    pub docs_path: PathBuf,
    /// Master switch for running graphs (`ALLOW_EXECUTION`).
    pub allow_execution: bool,
    /// Dynamo CLI executable (`DYNAMO_CLI_PATH`). `None` when unset or empty.
    pub dynamo_cli_path: Option<PathBuf>,
    /// Log level name (`LOG_LEVEL`).
    pub log_level: String,
    /// Optional log file (`LOG_FILE`).
    pub log_file: Option<PathBuf>,
    /// Wall-clock bound on one graph execution (`EXECUTION_TIMEOUT_SECS`).
    pub execution_timeout: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            graph_repo_path: PathBuf::from(DEFAULT_GRAPH_REPO),
            docs_path: PathBuf::from(DEFAULT_DOCS_PATH),
            allow_execution: false,
            dynamo_cli_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
            execution_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AdvisorConfig {
    /// Create configuration from the process environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let execution_timeout = match non_empty("EXECUTION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("EXECUTION_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                if secs == 0 {
                    return Err(Error::Config(
                        "EXECUTION_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            graph_repo_path: non_empty("GRAPH_REPO_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAPH_REPO)),
            docs_path: non_empty("DOCS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_PATH)),
            allow_execution: lookup("ALLOW_EXECUTION")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            dynamo_cli_path: non_empty("DYNAMO_CLI_PATH").map(PathBuf::from),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_file: non_empty("LOG_FILE").map(PathBuf::from),
            execution_timeout,
        })
    }
}
