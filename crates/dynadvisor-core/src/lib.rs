//! dyn-advisor Core: configuration and error types shared by every crate.

pub mod config;
pub mod error;

pub use config::AdvisorConfig;
pub use error::{Error, Result};
