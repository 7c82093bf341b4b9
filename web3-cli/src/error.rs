//! Error type for the CLI.

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Request did not fit in the configured buffer.
    Build(common::Error),
    /// Bad command-line value.
    InvalidArgument(String),
    /// Transaction file could not be read.
    Io(std::io::Error),
    /// Transaction file is not valid JSON for a transaction.
    Json(serde_json::Error),
}

impl From<common::Error> for CliError {
    fn from(e: common::Error) -> Self {
        Self::Build(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<String> for CliError {
    fn from(e: String) -> Self {
        Self::InvalidArgument(e)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Build(e) => write!(f, "Build error: {} (try a larger --buffer-size)", e),
            CliError::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Json(e) => write!(f, "Invalid transaction file: {}", e),
        }
    }
}

impl std::error::Error for CliError {}
