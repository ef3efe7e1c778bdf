//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod tables;

// Re-export commonly used items
pub use tables::{format_optional, format_timestamp, print_separator, truncate_string};
