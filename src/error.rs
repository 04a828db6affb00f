//! Application error type.
//!
//! Every failure carries a process exit code so the non-interactive
//! subcommands can map it straight to `ExitCode`. The interactive shell never
//! exits on these; it prints them and keeps looping.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("NBU request for {date} failed: {source}")]
    Network {
        date: NaiveDate,
        #[source]
        source: reqwest::Error,
    },

    #[error("NBU request for {date} failed with status {status}.")]
    Http {
        date: NaiveDate,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse NBU response for {date}: {message}")]
    Decode { date: NaiveDate, message: String },

    #[error("Invalid currency '{0}'. Only USD and EUR are supported.")]
    Validation(String),

    #[error("Invalid file name '{0}'. Enter a plain file name without directories.")]
    InvalidFileName(String),

    #[error("Failed to write '{}': {message}", .path.display())]
    FileWrite { path: PathBuf, message: String },

    #[error("Failed to read '{}': {message}", .path.display())]
    FileRead { path: PathBuf, message: String },

    #[error("{0}")]
    EmptyResult(String),

    #[error("{0}")]
    Config(String),

    #[error("Terminal I/O failed: {0}")]
    Input(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Validation(_)
            | AppError::InvalidFileName(_)
            | AppError::FileWrite { .. }
            | AppError::FileRead { .. }
            | AppError::Config(_)
            | AppError::Input(_) => 2,
            AppError::EmptyResult(_) => 3,
            AppError::Network { .. } | AppError::Http { .. } | AppError::Decode { .. } => 4,
        }
    }

    pub(crate) fn file_write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        AppError::FileWrite {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn file_read(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        AppError::FileRead {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
