//! Document loading and writing.
//!
//! The only file system boundary of the crate: one read at the start of a run,
//! one write at the end.

use std::path::Path;

use serde_json::Value;

use crate::error::TransformError;

/// Load a document from a file path.
///
/// # Errors
///
/// Returns `TransformError::FileNotFound` if the file doesn't exist,
/// or `TransformError::InvalidJson` if the file isn't valid JSON.
pub fn load_document(path: &Path) -> Result<Value, TransformError> {
    if !path.exists() {
        return Err(TransformError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| TransformError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_document_str(&content)
}

/// Load a document from a JSON string.
///
/// # Errors
///
/// Returns `TransformError::InvalidJson` if the string isn't valid JSON.
pub fn load_document_str(content: &str) -> Result<Value, TransformError> {
    serde_json::from_str(content).map_err(|source| TransformError::InvalidJson { source })
}

/// Render a document as pretty JSON (2-space indentation) with a trailing newline.
pub fn to_pretty_string(document: &Value) -> Result<String, TransformError> {
    let mut rendered = serde_json::to_string_pretty(document)
        .map_err(|source| TransformError::Serialize { source })?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write a document to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns `TransformError::WriteError` if the directory or file can't be written.
pub fn write_document(path: &Path, document: &Value) -> Result<(), TransformError> {
    let rendered = to_pretty_string(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| TransformError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, rendered).map_err(|source| TransformError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}
