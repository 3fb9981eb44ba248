//! Unified error types for resmond
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No valid resources were selected on the command line
    #[error("No resources selected. Pass at least one of: cpu, ram, disc")]
    EmptySelection,

    /// Failed to install the shutdown signal handler
    #[error("Failed to install signal handler: {0}")]
    SignalHandler(String),

    /// IO error (output streams, file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// Usage errors exit with 2 so scripts can tell them apart from
    /// runtime failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptySelection => 2,
            _ => 1,
        }
    }
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
