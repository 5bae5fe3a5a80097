//! Errors shared across the align crates.

use thiserror::Error;

/// Exit status reported for adjustment commands rejected before execution.
pub const COMMAND_VALIDATION_EXIT: i32 = 10;

#[derive(Error, Debug)]
pub enum AdjustError {
    /// An adjustment command rejected before any process was spawned.
    ///
    /// Carries the command list that was being assembled (empty for
    /// parameter-validation failures) and duplicates the description as
    /// standard-error text, matching what a failed tool run would report.
    #[error("{desc}")]
    Command {
        desc: String,
        cmd: Vec<String>,
        exit_code: i32,
        stderr: String,
    },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("failed to parse removed-repository backup: {message}")]
    Xml { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AdjustError {
    /// Command-validation failure with the fixed pre-execution exit status.
    pub fn command(desc: impl Into<String>) -> Self {
        let desc = desc.into();
        Self::Command {
            stderr: desc.clone(),
            desc,
            cmd: Vec::new(),
            exit_code: COMMAND_VALIDATION_EXIT,
        }
    }

    /// Exit status to report for this error, if it carries one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Command { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdjustError>;
