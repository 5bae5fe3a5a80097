//! Core abstractions for the align toolkit.
//!
//! This crate provides the pieces shared by the adjust providers and the
//! CLI: the error taxonomy, the caller-owned adjustment result record, and
//! the process-execution provider that runs external alignment tools.

pub mod error;
pub mod executor;
pub mod types;

pub use error::{AdjustError, COMMAND_VALIDATION_EXIT, Result};
pub use executor::{CommandExecutor, ExecutionOutcome, ProcessExecutor};
pub use types::AdjustResult;
