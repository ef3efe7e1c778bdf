//! Command-line adapter for ankicc preset documents.
//!
//! `main.rs` is the composition root: it loads `.env`, builds a
//! [`CliConfig`], initialises logging and dispatches to a handler.
//! Handlers read documents from disk and delegate all decoding and
//! validation to `ankicc-core`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use dotenvy as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, ConfigError, Indent, init_logging, validate_config};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
