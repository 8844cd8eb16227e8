//! Runtime types.

use serde::Serialize;

/// Outcome of one execution request.
///
/// `executed` is true once the external process actually ran, whatever its
/// exit status; `success` additionally requires a zero exit code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub executed: bool,
    pub message: String,
    pub output: String,
    pub error: String,
}

impl ExecutionResult {
    /// A request refused before anything ran.
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// An attempted execution that never finished: the process could not be
    /// spawned or its wait timed out.
    pub fn not_run(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}
