//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// A document could not be decoded into a resource
    #[error("malformed document in '{filename}'{}: {message}", fmt_index(.index))]
    MalformedDocument {
        filename: String,
        index: Option<usize>,
        message: String,
    },

    /// The package has no root manifest file
    #[error("package manifest '{filename}' not found")]
    ManifestNotFound { filename: String },

    /// A diff was requested with neither side present
    #[error("invalid resource comparison: both the original and current resource are missing")]
    InvalidComparison,

    /// The same resource id appears more than once in one resource list
    #[error("duplicate resource id '{id}'")]
    DuplicateResourceId { id: String },

    /// The targeted document does not exist in the map
    #[error("resource #{index} not found in '{filename}'")]
    ResourceNotFound { filename: String, index: usize },

    #[error("invalid package layout: {message}")]
    InvalidLayout { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

fn fmt_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" (document #{i})")).unwrap_or_default()
}

impl CoreError {
    pub(crate) fn malformed(
        filename: impl Into<String>,
        index: Option<usize>,
        message: impl std::fmt::Display,
    ) -> Self {
        CoreError::MalformedDocument {
            filename: filename.into(),
            index,
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
