//! Core domain types.
//!
//! These types represent the pure preset model, independent of any
//! infrastructure concerns (storage backend, sync transport, editor UI).
//!
//! # Structure
//!
//! - `field` - Field definitions (`Field`, `FieldType`)
//! - `preset` - Presets and their sync state (`Preset`, `SyncStatus`, `PersistenceId`)

mod field;
mod preset;

pub use field::{Field, FieldType};
pub use preset::{PersistenceId, Preset, SyncStatus};
