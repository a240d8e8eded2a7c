//! CLI-specific error types and mappings.
//!
//! This module provides the CLI error type and maps core errors to exit
//! codes and user-facing messages.

use hapi_locate_core::{LocateError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Target platform has no SDK build.
    #[error("{0}")]
    UnsupportedPlatform(String),

    /// Argument or input value error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Settings file or environment override error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK not installed for the requested version.
    #[error("{0}")]
    NotFound(String),

    /// SDK found but its HAPI headers are not.
    #[error("HAPI headers not found under {0}")]
    HeadersMissing(String),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: SDK not found
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 1,
            Self::Arguments(_) => 2,       // EX_USAGE
            Self::HeadersMissing(_) => 66, // EX_NOINPUT
            Self::Io(_) => 74,             // EX_IOERR
            Self::UnsupportedPlatform(_) | Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<LocateError> for CliError {
    fn from(err: LocateError) -> Self {
        match err {
            LocateError::UnsupportedPlatform(_) => Self::UnsupportedPlatform(err.to_string()),
            LocateError::EmptyVersion => Self::Arguments(err.to_string()),
            LocateError::VersionNotFound { .. } => Self::NotFound(err.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
