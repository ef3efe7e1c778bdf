//! JSON encoding for presets.
//!
//! Documents are decoded in two passes: the text is parsed into a
//! `serde_json::Value`, the `type`/`status` tags are checked so an unknown
//! tag is reported with its location, and only then is the value mapped onto
//! the domain types. Anything else serde rejects (missing attributes, wrong
//! value kinds) surfaces as [`CodecError::Malformed`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::domain::{FieldType, Preset, SyncStatus};

/// Default indentation for pretty output.
pub const DEFAULT_INDENT: &[u8] = b"  ";

const PRESET_KEYS: &[&str] = &["_id", "last_edited", "name", "fields", "status", "hue"];

const FIELD_KEYS: &[&str] = &[
    "id",
    "name",
    "type",
    "options",
    "default",
    "current_inputs",
    "visible_by_default",
    "expanded_in_editor",
    "currently_visible",
    "currently_frozen",
    "bound_to",
    "bindings",
];

/// Errors produced while decoding or encoding preset documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid JSON: {0}")]
    Syntax(String),

    #[error("Unknown field type {value:?} at {path}")]
    UnknownFieldType { path: String, value: String },

    #[error("Unknown sync status {value:?} at {path}")]
    UnknownSyncStatus { path: String, value: String },

    #[error("Malformed preset: {0}")]
    Malformed(String),

    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// A decoded document: either one preset object or an array of them.
///
/// The shape is remembered so a document can be re-encoded as it was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetDocument {
    Single(Preset),
    Many(Vec<Preset>),
}

impl PresetDocument {
    pub fn presets(&self) -> &[Preset] {
        match self {
            Self::Single(preset) => std::slice::from_ref(preset),
            Self::Many(presets) => presets,
        }
    }

    pub fn into_presets(self) -> Vec<Preset> {
        match self {
            Self::Single(preset) => vec![preset],
            Self::Many(presets) => presets,
        }
    }
}

/// Decode a single preset object.
pub fn decode_preset(input: &str) -> Result<Preset, CodecError> {
    let value = parse(input)?;
    preset_from_value(value, None)
}

/// Decode a JSON array of presets, preserving order.
pub fn decode_presets(input: &str) -> Result<Vec<Preset>, CodecError> {
    match parse(input)? {
        Value::Array(items) => presets_from_values(items),
        other => Err(CodecError::Malformed(format!(
            "expected an array of presets, found {}",
            kind(&other)
        ))),
    }
}

/// Decode a document holding either one preset or an array of presets.
pub fn decode_document(input: &str) -> Result<PresetDocument, CodecError> {
    match parse(input)? {
        Value::Array(items) => presets_from_values(items).map(PresetDocument::Many),
        value @ Value::Object(_) => preset_from_value(value, None).map(PresetDocument::Single),
        other => Err(CodecError::Malformed(format!(
            "expected a preset object or an array of presets, found {}",
            kind(&other)
        ))),
    }
}

/// Locate object keys that are not part of the preset shape.
///
/// Decoding ignores such keys, so they do not survive a re-encode. Paths use
/// the same notation as tag errors (`owner`, `[1].fields[0].colour`).
pub fn unknown_keys(input: &str) -> Result<Vec<String>, CodecError> {
    let mut found = Vec::new();
    match parse(input)? {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                collect_unknown_keys(item, &format!("[{i}]."), &mut found);
            }
        }
        value => collect_unknown_keys(&value, "", &mut found),
    }
    Ok(found)
}

/// Encode a preset as compact JSON.
pub fn encode_preset(preset: &Preset) -> Result<String, CodecError> {
    serde_json::to_string(preset).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Encode a preset as pretty JSON with the default indentation.
pub fn encode_preset_pretty(preset: &Preset) -> Result<String, CodecError> {
    encode_pretty_with_indent(preset, DEFAULT_INDENT)
}

/// Encode a list of presets as a pretty JSON array with the default indentation.
pub fn encode_presets_pretty(presets: &[Preset]) -> Result<String, CodecError> {
    encode_pretty_with_indent(presets, DEFAULT_INDENT)
}

/// Encode any preset-shaped value as pretty JSON using `indent` per level.
pub fn encode_pretty_with_indent<T>(value: &T, indent: &[u8]) -> Result<String, CodecError>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| CodecError::Encode(e.to_string()))
}

fn parse(input: &str) -> Result<Value, CodecError> {
    serde_json::from_str(input).map_err(|e| CodecError::Syntax(e.to_string()))
}

fn presets_from_values(items: Vec<Value>) -> Result<Vec<Preset>, CodecError> {
    let presets = items
        .into_iter()
        .enumerate()
        .map(|(index, value)| preset_from_value(value, Some(index)))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = presets.len(), "Decoded preset list");
    Ok(presets)
}

fn preset_from_value(value: Value, index: Option<usize>) -> Result<Preset, CodecError> {
    let prefix = index.map_or_else(String::new, |i| format!("[{i}]."));
    check_tags(&value, &prefix)?;

    let mut ignored = Vec::new();
    collect_unknown_keys(&value, &prefix, &mut ignored);
    if !ignored.is_empty() {
        tracing::debug!(keys = ?ignored, "Ignoring unknown keys");
    }

    let preset: Preset = serde_json::from_value(value).map_err(|e| match index {
        Some(i) => CodecError::Malformed(format!("preset {i}: {e}")),
        None => CodecError::Malformed(e.to_string()),
    })?;

    tracing::debug!(
        name = %preset.name,
        fields = preset.fields.len(),
        status = %preset.status,
        "Decoded preset"
    );
    Ok(preset)
}

// Only string tags are checked here; a non-string tag is a shape error and is
// left for serde to report.
fn check_tags(value: &Value, prefix: &str) -> Result<(), CodecError> {
    if let Some(Value::String(status)) = value.get("status") {
        if SyncStatus::parse(status).is_none() {
            return Err(CodecError::UnknownSyncStatus {
                path: format!("{prefix}status"),
                value: status.clone(),
            });
        }
    }

    if let Some(Value::Array(fields)) = value.get("fields") {
        for (i, field) in fields.iter().enumerate() {
            if let Some(Value::String(ty)) = field.get("type") {
                if FieldType::parse(ty).is_none() {
                    return Err(CodecError::UnknownFieldType {
                        path: format!("{prefix}fields[{i}].type"),
                        value: ty.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

fn collect_unknown_keys(value: &Value, prefix: &str, found: &mut Vec<String>) {
    let Some(object) = value.as_object() else {
        return;
    };
    found.extend(
        object
            .keys()
            .filter(|key| !PRESET_KEYS.contains(&key.as_str()))
            .map(|key| format!("{prefix}{key}")),
    );

    let Some(Value::Array(fields)) = object.get("fields") else {
        return;
    };
    for (i, field) in fields.iter().enumerate() {
        if let Some(field) = field.as_object() {
            found.extend(
                field
                    .keys()
                    .filter(|key| !FIELD_KEYS.contains(&key.as_str()))
                    .map(|key| format!("{prefix}fields[{i}].{key}")),
            );
        }
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
