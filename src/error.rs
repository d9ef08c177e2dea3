//! Error types for hashlist
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, malformed fragment, bad config)
//! - 4: Operation failed (terminal I/O, serialization)

use thiserror::Error;

/// Exit codes for the hashlist CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for hashlist operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Malformed fragment: {0}")]
    Parse(String),

    #[error("Invalid gesture state: {0}")]
    InvalidGestureState(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Parse(_)
            | Error::InvalidGestureState(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output, when the variant has any.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Parse(reason) => Some(serde_json::json!({ "reason": reason })),
            _ => None,
        }
    }
}

/// Result type alias for hashlist operations
pub type Result<T> = std::result::Result<T, Error>;
