//! Executor: consent-gated graph execution through the Dynamo CLI.
//!
//! A graph only runs when execution is enabled in configuration, the caller
//! passed explicit consent, and the CLI executable exists. The subprocess is
//! bounded by a timeout and killed when the wait is abandoned.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::instrument::WithSubscriber;
use tracing::{debug, error, info, warn, Dispatch};

use crate::types::ExecutionResult;
use dynadvisor_core::AdvisorConfig;
use dynadvisor_store::GraphRecord;

/// Runs graphs with the external Dynamo CLI.
pub struct Executor {
    cli_path: Option<PathBuf>,
    allow_execution: bool,
    timeout: Duration,
    dispatch: Dispatch,
}

impl Executor {
    pub fn new(
        cli_path: Option<PathBuf>,
        allow_execution: bool,
        timeout: Duration,
        dispatch: Dispatch,
    ) -> Self {
        Self {
            cli_path,
            allow_execution,
            timeout,
            dispatch,
        }
    }

    /// Create an executor from loaded configuration.
    pub fn from_config(config: &AdvisorConfig, dispatch: Dispatch) -> Self {
        Self::new(
            config.dynamo_cli_path.clone(),
            config.allow_execution,
            config.execution_timeout,
            dispatch,
        )
    }

    pub fn cli_path(&self) -> Option<&Path> {
        self.cli_path.as_deref()
    }

    /// Whether execution is enabled and the CLI is configured and present.
    pub fn can_execute(&self) -> bool {
        tracing::dispatcher::with_default(&self.dispatch, || {
            if !self.allow_execution {
                return false;
            }
            let Some(cli) = &self.cli_path else {
                return false;
            };
            if !cli.exists() {
                warn!("Dynamo CLI not found at: {}", cli.display());
                return false;
            }
            true
        })
    }

    /// Execute `graph` if every safety check passes.
    ///
    /// `run_flag` is the caller's explicit consent (the `--run` flag).
    pub async fn execute_graph(&self, graph: &GraphRecord, run_flag: bool) -> ExecutionResult {
        self.execute_checked(graph, run_flag)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    async fn execute_checked(&self, graph: &GraphRecord, run_flag: bool) -> ExecutionResult {
        if !self.allow_execution {
            warn!("Execution attempt blocked: ALLOW_EXECUTION=false");
            return ExecutionResult::refused(
                "Execution is disabled. Set ALLOW_EXECUTION=true in .env to enable.",
            );
        }

        if !run_flag {
            info!("Execution skipped: --run flag not provided");
            return ExecutionResult::refused(
                "Execution requires explicit consent. Use --run flag to execute.",
            );
        }

        let cli = match &self.cli_path {
            Some(cli) if self.can_execute() => cli,
            _ => {
                error!("Execution failed: CLI not configured");
                return ExecutionResult::refused(
                    "Execution not configured. Check DYNAMO_CLI_PATH in .env",
                );
            }
        };

        let graph_path = Path::new(&graph.filepath);
        if !graph_path.exists() {
            let result =
                ExecutionResult::refused(format!("Graph file not found: {}", graph_path.display()));
            error!("Execution failed: {}", result.message);
            return result;
        }

        info!("EXECUTING GRAPH: {}", graph.name);
        info!("  Path: {}", graph_path.display());
        info!("  CLI: {}", cli.display());
        self.run_process(cli, graph_path, &graph.name).await
    }

    async fn run_process(&self, cli: &Path, graph_path: &Path, name: &str) -> ExecutionResult {
        debug!("Running command: {} {}", cli.display(), graph_path.display());

        let mut cmd = Command::new(cli);
        cmd.arg(graph_path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!("EXECUTION ERROR: {} - {}", name, e);
                return ExecutionResult::not_run(format!(
                    "Graph '{}' execution error: {}",
                    name, e
                ));
            }
            Err(_) => {
                error!("EXECUTION TIMEOUT: {} after {:?}", name, self.timeout);
                return ExecutionResult::not_run(format!("Graph '{}' execution timed out", name));
            }
        };

        let mut result = ExecutionResult {
            success: output.status.success(),
            executed: true,
            message: String::new(),
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
            error: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if result.success {
            result.message = format!("Graph '{}' executed successfully", name);
            info!("EXECUTION SUCCESSFUL: {}", name);
        } else {
            result.message = match exit_code(&output.status) {
                Some(code) => format!("Graph '{}' execution failed with code {}", name, code),
                None => format!("Graph '{}' execution failed", name),
            };
            error!("EXECUTION FAILED: {} ({})", name, output.status);
        }

        if !result.output.is_empty() {
            debug!("Output: {}", result.output);
        }
        if !result.error.is_empty() {
            debug!("Error: {}", result.error);
        }

        result
    }
}

/// Exit code of a finished process. A unix process killed by signal `N`
/// reports `-N`.
fn exit_code(status: &ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Some(-signal);
        }
    }
    status.code()
}
