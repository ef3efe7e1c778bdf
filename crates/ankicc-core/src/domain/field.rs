//! Field domain types.
//!
//! A field is one editable, typed input definition within a preset. These
//! types are shared with the editor front-end, so the serialized key names
//! (`type`, `default`, `current_inputs`, ...) are part of the contract.

use serde::{Deserialize, Serialize};

/// How a field's `options` and `current_inputs` are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Free text entry.
    Text,
    /// Exactly one choice from `options`.
    SelectOne,
    /// Any number of choices from `options`.
    SelectMany,
    /// Value linked to another field through `bound_to`.
    Bound,
}

impl FieldType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 4] = [Self::Text, Self::SelectOne, Self::SelectMany, Self::Bound];

    /// Parse a field type from its wire tag.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "selectOne" => Some(Self::SelectOne),
            "selectMany" => Some(Self::SelectMany),
            "bound" => Some(Self::Bound),
            _ => None,
        }
    }

    /// Convert field type to its wire tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::SelectOne => "selectOne",
            Self::SelectMany => "selectMany",
            Self::Bound => "bound",
        }
    }

    /// Whether `options` carries meaningful choices for this type.
    #[must_use]
    pub const fn uses_options(&self) -> bool {
        matches!(self, Self::SelectOne | Self::SelectMany)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One editable field definition within a preset.
///
/// Optional attributes stay `None` when absent from the source document and
/// are omitted again on encode, so "absent" never collapses into `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Identifier, unique within the owning preset's `fields`.
    pub id: i64,

    /// Display label.
    pub name: String,

    /// Variant tag controlling how the value sequences are read.
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Selectable choices (meaningful for select types).
    pub options: Vec<String>,

    /// Default entered or selected value(s).
    #[serde(rename = "default")]
    pub defaults: Vec<String>,

    /// Live value(s) entered or selected by the user.
    pub current_inputs: Vec<String>,

    /// Whether the field is shown without explicit user action.
    pub visible_by_default: bool,

    /// Transient UI flag: edit controls expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_in_editor: Option<bool>,

    /// Transient runtime visibility, may diverge from `visible_by_default`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currently_visible: Option<bool>,

    /// Whether edits are currently disallowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currently_frozen: Option<bool>,

    /// Id of another field in the same preset (for `bound` fields).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_to: Option<i64>,

    /// Opaque binding metadata, one string sequence per entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Vec<Vec<String>>>,
}

impl Field {
    /// Create a field with the required attributes and nothing else.
    ///
    /// Value sequences start empty, the field is visible by default and every
    /// optional attribute is absent.
    pub fn new(id: i64, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id,
            name: name.into(),
            field_type,
            options: Vec::new(),
            defaults: Vec::new(),
            current_inputs: Vec::new(),
            visible_by_default: true,
            expanded_in_editor: None,
            currently_visible: None,
            currently_frozen: None,
            bound_to: None,
            bindings: None,
        }
    }

    /// Effective visibility: the runtime state when known, else the default.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.currently_visible.unwrap_or(self.visible_by_default)
    }

    /// Whether edits to this field are currently disallowed.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.currently_frozen == Some(true)
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.field_type == FieldType::Bound
    }
}
