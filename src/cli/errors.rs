//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints them and exits non-zero.

use thiserror::Error;

use crate::persistence::StoreError;

/// Errors surfaced by the command-line entry points.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file unreadable or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP listener could not be set up or fell over.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// A storage operation failed while running a command.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
