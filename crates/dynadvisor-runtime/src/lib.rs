//! Runtime: runs a recommended graph with the external Dynamo CLI.
//!
//! Execution is off unless enabled in configuration and explicitly
//! requested per call.

pub mod executor;
pub mod types;

pub use executor::Executor;
pub use types::*;
