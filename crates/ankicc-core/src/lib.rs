//! Core domain types for ankicc presets.
//!
//! A [`Preset`] is a named, ordered collection of [`Field`] definitions with a
//! synchronization status and an edit timestamp. This crate owns the shape of
//! that data, its JSON encoding, and the structural checks a consumer runs
//! before trusting a decoded document. Persistence, sync and editor behavior
//! live elsewhere.
//!
//! # Modules
//!
//! - `domain` - `Field`, `FieldType`, `Preset`, `SyncStatus`, `PersistenceId`
//! - `codec` - JSON decode/encode with tag-aware error reporting
//! - `validation` - cross-field invariants (unique ids, resolvable bindings)
//! - `error` - crate-level `CoreError`

#![deny(unused_crate_dependencies)]

pub mod codec;
pub mod domain;
pub mod error;
pub mod validation;

// Re-export commonly used types for convenience
pub use codec::{
    CodecError, PresetDocument, decode_document, decode_preset, decode_presets, encode_preset,
    encode_preset_pretty, encode_presets_pretty, encode_pretty_with_indent, unknown_keys,
};
pub use domain::{Field, FieldType, PersistenceId, Preset, SyncStatus};
pub use error::CoreError;
pub use validation::{ValidationError, preset_issues, validate_preset, validate_presets};
