//! Error types for OpenAPI document flattening.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading, transforming or writing a document.
#[derive(Debug, Error)]
pub enum TransformError {
    // IO errors (exit code 3)
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize document: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    // Transformation errors (exit code 2)
    #[error(
        "schema name collision: '{name}' generated from union '{union}' already exists with different content"
    )]
    NameCollision { name: String, union: String },
}

impl TransformError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TransformError::FileNotFound { .. }
            | TransformError::ReadError { .. }
            | TransformError::WriteError { .. } => 3,
            _ => 2,
        }
    }
}
