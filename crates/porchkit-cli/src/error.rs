//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use porchkit_core::CoreError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Package structure or edit error
    #[error("Package error: {message}")]
    #[diagnostic(code(porchkit::cli::package))]
    Package {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A YAML document could not be decoded
    #[error("Document error: {message}")]
    #[diagnostic(code(porchkit::cli::document))]
    Document {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(porchkit::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(porchkit::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Package { .. } => exit_codes::PACKAGE_ERROR,
            CliError::Document { .. } => exit_codes::DOCUMENT_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a package error
    pub fn package(message: impl Into<String>) -> Self {
        Self::Package {
            message: message.into(),
            help: None,
        }
    }

    /// Create a package error with help text
    pub fn package_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Package {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::MalformedDocument { filename, .. } => CliError::Document {
                message: err.to_string(),
                help: Some(format!(
                    "Each document in '{filename}' must be valid YAML with a non-empty `kind`"
                )),
            },
            CoreError::ManifestNotFound { filename } => CliError::package_with_help(
                err.to_string(),
                format!("Every package needs a '{filename}' at its root"),
            ),
            CoreError::ResourceNotFound { .. } => CliError::package_with_help(
                err.to_string(),
                "Run `porchkit resources` to list the current resource ids",
            ),
            CoreError::Io(_) => CliError::Io {
                message: err.to_string(),
            },
            _ => CliError::package(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other {
            message: format!("failed to encode JSON: {err}"),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
