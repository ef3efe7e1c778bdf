//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Check, inspect and format preset documents.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "ankicc")]
#[command(about = "Check, inspect and format ankicc preset documents")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Indentation for JSON output: a number of spaces (1-8) or "tab"
    #[arg(long = "indent", global = true)]
    pub indent: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
