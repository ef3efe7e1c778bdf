//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Read the document from disk
//!   2. Call `ankicc-core` to decode / validate / encode
//!   3. Format output for the terminal
//!
//! Handlers should NOT re-implement decoding or validation rules.

pub mod fmt;
pub mod show;
pub mod validate;

use std::path::Path;

use ankicc_core::{CoreError, PresetDocument, decode_document};

use crate::error::CliError;

/// Read and decode a preset document from disk.
pub async fn load_document(path: &Path) -> Result<PresetDocument, CliError> {
    let text = read_document(path).await?;
    decode_at(path, &text)
}

/// Read a document's text, reporting failures as IO errors.
pub async fn read_document(path: &Path) -> Result<String, CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Read preset document");
    Ok(text)
}

/// Decode text read from `path`, naming the file in decode errors.
pub fn decode_at(path: &Path, text: &str) -> Result<PresetDocument, CliError> {
    decode_document(text).map_err(|e| match CliError::from(CoreError::from(e)) {
        CliError::InvalidDocument(msg) => {
            CliError::InvalidDocument(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}
