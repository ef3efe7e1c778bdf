//! Preset domain types.
//!
//! These types are shared between the Rust side and the editor front-end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::field::Field;

/// Synchronization state of a preset against the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Matches the backend copy.
    Synced,
    /// Never uploaded.
    Unsynced,
    /// Uploaded before, edited locally since.
    ToUpdate,
}

impl SyncStatus {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 3] = [Self::Synced, Self::Unsynced, Self::ToUpdate];

    /// Parse a status from its wire tag.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "synced" => Some(Self::Synced),
            "unsynced" => Some(Self::Unsynced),
            "to_update" => Some(Self::ToUpdate),
            _ => None,
        }
    }

    /// Convert status to its wire tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::Unsynced => "unsynced",
            Self::ToUpdate => "to_update",
        }
    }

    #[must_use]
    pub const fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque identifier assigned by the storage backend.
///
/// Backends disagree on the shape (plain strings, numbers, `{"$oid": ...}`
/// objects), so the raw JSON value is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistenceId(serde_json::Value);

impl PersistenceId {
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the raw backend value.
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl std::fmt::Display for PersistenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}

/// A named, timestamped collection of fields.
///
/// The preset exclusively owns its `fields`; their order is display order.
/// Bound fields reference siblings by id only, resolved through
/// [`Preset::binding_target`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Backend identifier, absent until the preset has been persisted.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersistenceId>,

    /// Last modification time in epoch milliseconds, kept as written.
    ///
    /// Any JSON number is accepted, fractional ones included.
    pub last_edited: Number,

    /// Display name (not unique).
    pub name: String,

    pub fields: Vec<Field>,

    pub status: SyncStatus,

    /// Colour used when rendering the preset.
    pub hue: String,
}

impl Preset {
    /// Create an empty, never-persisted preset stamped with the current time.
    pub fn new(name: impl Into<String>, hue: impl Into<String>) -> Self {
        Self {
            id: None,
            last_edited: Number::from(Utc::now().timestamp_millis()),
            name: name.into(),
            fields: Vec::new(),
            status: SyncStatus::Unsynced,
            hue: hue.into(),
        }
    }

    /// Whether the storage backend has assigned an identifier.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Find a field by id.
    #[must_use]
    pub fn field(&self, id: i64) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Find a field by id for in-place edits.
    pub fn field_mut(&mut self, id: i64) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Resolve the field that `field.bound_to` points at.
    ///
    /// Returns `None` when the field carries no binding or the id does not
    /// exist in this preset.
    #[must_use]
    pub fn binding_target(&self, field: &Field) -> Option<&Field> {
        field.bound_to.and_then(|target| self.field(target))
    }

    /// All fields whose `bound_to` names `id`, in display order.
    pub fn fields_bound_to(&self, id: i64) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(move |f| f.bound_to == Some(id))
    }

    /// `last_edited` in whole milliseconds, fractions truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn last_edited_millis(&self) -> Option<i64> {
        self.last_edited
            .as_i64()
            .or_else(|| self.last_edited.as_f64().map(|ms| ms.trunc() as i64))
    }

    /// `last_edited` as a UTC timestamp, `None` when out of range.
    #[must_use]
    pub fn last_edited_at(&self) -> Option<DateTime<Utc>> {
        self.last_edited_millis().and_then(DateTime::from_timestamp_millis)
    }
}
