//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
///
/// Every command takes preset documents: a JSON file holding either one
/// preset object or an array of presets.
#[derive(Subcommand)]
pub enum Commands {
    /// Decode and validate preset documents, reporting every problem found
    Validate {
        /// Preset documents to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Summarize the presets in a document
    Show {
        /// Preset document to display
        file: PathBuf,
        /// Also list each preset's fields
        #[arg(short, long)]
        fields: bool,
    },

    /// Re-encode a preset document in canonical pretty JSON
    Fmt {
        /// Preset document to format
        file: PathBuf,
        /// Rewrite the file in place instead of printing to stdout
        #[arg(short, long)]
        write: bool,
    },
}
