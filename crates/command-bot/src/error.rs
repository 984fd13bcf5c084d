//! Application error types.

use crate::platform::PlatformError;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Unknown command in configuration: {0}")]
    UnknownCommand(String),

    #[error("Invalid banned-term pattern: {0}")]
    Moderation(#[from] regex::Error),

    #[error("Signal error: {0}")]
    Signal(#[from] signal_client::SignalError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] lookup_client::LookupError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;

/// Failure of a command handler.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("{0}")]
    Failed(String),
}
