//! Validate command handler.
//!
//! Decodes each document and runs every preset invariant check, printing
//! all problems rather than stopping at the first one.

use std::path::PathBuf;

use ankicc_core::{decode_document, preset_issues};
use anyhow::Result;

use crate::error::CliError;

/// Outcome of checking a single document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Number of presets decoded.
    pub presets: usize,
    /// Human-readable problems, empty when the document is valid.
    pub problems: Vec<String>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check one document's text.
///
/// A decode failure yields a single problem; otherwise every validation
/// issue of every preset is listed, prefixed with the preset's position
/// and name.
pub fn check_document(text: &str) -> FileReport {
    let document = match decode_document(text) {
        Ok(doc) => doc,
        Err(e) => {
            return FileReport {
                presets: 0,
                problems: vec![e.to_string()],
            };
        }
    };

    let presets = document.presets();
    let problems = presets
        .iter()
        .enumerate()
        .flat_map(|(index, preset)| {
            preset_issues(preset)
                .into_iter()
                .map(move |issue| format!("preset {index} ({:?}): {issue}", preset.name))
        })
        .collect();

    FileReport {
        presets: presets.len(),
        problems,
    }
}

/// Execute the validate command.
///
/// # Errors
///
/// Returns `CliError::Io` when any file is unreadable, otherwise
/// `CliError::InvalidDocument` when any file is undecodable or breaks a
/// preset invariant.
pub async fn execute(files: &[PathBuf]) -> Result<()> {
    let mut failed = 0usize;
    let mut unreadable = 0usize;

    for path in files {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => {
                unreadable += 1;
                tracing::warn!(path = %path.display(), error = %e, "Cannot read document");
                println!("ERROR {}", path.display());
                println!("      - cannot read file: {e}");
                continue;
            }
        };

        let report = check_document(&text);
        if report.is_valid() {
            println!("ok    {} ({} preset(s))", path.display(), report.presets);
        } else {
            failed += 1;
            tracing::warn!(
                path = %path.display(),
                problems = report.problems.len(),
                "Document failed validation"
            );
            println!("FAIL  {}", path.display());
            for problem in &report.problems {
                println!("      - {problem}");
            }
        }
    }

    println!();
    println!("{} file(s) checked, {failed} failed, {unreadable} unreadable", files.len());

    if unreadable > 0 {
        return Err(CliError::Io(format!("{unreadable} file(s) could not be read")).into());
    }
    if failed > 0 {
        return Err(CliError::InvalidDocument(format!("{failed} file(s) failed validation")).into());
    }
    Ok(())
}
