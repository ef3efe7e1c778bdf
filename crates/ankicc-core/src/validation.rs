//! Cross-field preset validation.
//!
//! Decoding only checks shape. The invariants that span several fields
//! (unique ids, resolvable bindings) are checked here, explicitly, by the
//! consumer that needs them.

use std::collections::HashSet;

use crate::domain::Preset;

/// A preset invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field id {id} is used by more than one field")]
    DuplicateFieldId { id: i64 },

    #[error("Bound field {field} has no bound_to target")]
    MissingBinding { field: i64 },

    #[error("Field {field} is bound to {bound_to}, which does not exist in this preset")]
    DanglingBinding { field: i64, bound_to: i64 },
}

impl ValidationError {
    /// Id of the field the violation was found on.
    #[must_use]
    pub const fn field_id(&self) -> i64 {
        match self {
            Self::DuplicateFieldId { id } => *id,
            Self::MissingBinding { field } | Self::DanglingBinding { field, .. } => *field,
        }
    }
}

/// Collect every invariant violation in `preset`, in field order.
///
/// A duplicated id is reported once, at its second occurrence.
pub fn preset_issues(preset: &Preset) -> Vec<ValidationError> {
    let mut issues = Vec::new();
    let mut seen = HashSet::with_capacity(preset.fields.len());
    let mut reported = HashSet::new();

    for field in &preset.fields {
        if !seen.insert(field.id) && reported.insert(field.id) {
            issues.push(ValidationError::DuplicateFieldId { id: field.id });
        }

        match field.bound_to {
            Some(target) if preset.field(target).is_none() => {
                issues.push(ValidationError::DanglingBinding {
                    field: field.id,
                    bound_to: target,
                });
            }
            Some(target) if !field.is_bound() => {
                tracing::debug!(
                    preset = %preset.name,
                    field = field.id,
                    bound_to = target,
                    field_type = %field.field_type,
                    "bound_to set on a field that is not bound; ignoring"
                );
            }
            None if field.is_bound() => {
                issues.push(ValidationError::MissingBinding { field: field.id });
            }
            _ => {}
        }
    }

    issues
}

/// Validate a preset, returning the first violation found.
pub fn validate_preset(preset: &Preset) -> Result<(), ValidationError> {
    match preset_issues(preset).into_iter().next() {
        Some(err) => {
            tracing::warn!(preset = %preset.name, error = %err, "Preset failed validation");
            Err(err)
        }
        None => Ok(()),
    }
}

/// Validate a list of presets, returning the index of the first invalid one.
pub fn validate_presets(presets: &[Preset]) -> Result<(), (usize, ValidationError)> {
    for (index, preset) in presets.iter().enumerate() {
        validate_preset(preset).map_err(|err| (index, err))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, FieldType};

    fn preset(fields: Vec<Field>) -> Preset {
        let mut preset = Preset::new("Test", "#000000");
        preset.fields = fields;
        preset
    }

    fn bound(id: i64, to: Option<i64>) -> Field {
        let mut field = Field::new(id, format!("bound {id}"), FieldType::Bound);
        field.bound_to = to;
        field
    }

    #[test]
    fn test_valid_preset() {
        let p = preset(vec![
            Field::new(1, "Front", FieldType::Text),
            bound(2, Some(1)),
        ]);
        assert!(preset_issues(&p).is_empty());
        assert!(validate_preset(&p).is_ok());
    }

    #[test]
    fn test_empty_preset_is_valid() {
        assert!(validate_preset(&preset(Vec::new())).is_ok());
    }

    #[test]
    fn test_duplicate_id_reported_once() {
        let p = preset(vec![
            Field::new(1, "a", FieldType::Text),
            Field::new(1, "b", FieldType::Text),
            Field::new(1, "c", FieldType::Text),
        ]);
        assert_eq!(
            preset_issues(&p),
            vec![ValidationError::DuplicateFieldId { id: 1 }]
        );
    }

    #[test]
    fn test_bound_without_target() {
        let p = preset(vec![bound(5, None)]);
        assert!(matches!(
            validate_preset(&p),
            Err(ValidationError::MissingBinding { field: 5 })
        ));
    }

    #[test]
    fn test_dangling_binding() {
        let p = preset(vec![Field::new(1, "Front", FieldType::Text), bound(2, Some(9))]);
        assert!(matches!(
            validate_preset(&p),
            Err(ValidationError::DanglingBinding {
                field: 2,
                bound_to: 9
            })
        ));
    }

    #[test]
    fn test_dangling_binding_on_unbound_field_is_still_reported() {
        let mut text = Field::new(1, "Front", FieldType::Text);
        text.bound_to = Some(7);
        let p = preset(vec![text]);
        assert_eq!(
            preset_issues(&p),
            vec![ValidationError::DanglingBinding {
                field: 1,
                bound_to: 7
            }]
        );
    }

    #[test]
    fn test_resolvable_binding_on_unbound_field_is_tolerated() {
        let mut text = Field::new(2, "Back", FieldType::Text);
        text.bound_to = Some(1);
        let p = preset(vec![Field::new(1, "Front", FieldType::Text), text]);
        assert!(validate_preset(&p).is_ok());
    }

    #[test]
    fn test_issues_are_collected_in_field_order() {
        let p = preset(vec![
            bound(1, None),
            Field::new(2, "x", FieldType::Text),
            bound(3, Some(99)),
            Field::new(2, "y", FieldType::Text),
        ]);
        let issues = preset_issues(&p);
        assert_eq!(
            issues,
            vec![
                ValidationError::MissingBinding { field: 1 },
                ValidationError::DanglingBinding {
                    field: 3,
                    bound_to: 99
                },
                ValidationError::DuplicateFieldId { id: 2 },
            ]
        );
        assert_eq!(
            issues.iter().map(ValidationError::field_id).collect::<Vec<_>>(),
            vec![1, 3, 2]
        );
    }

    #[test]
    fn test_validate_presets_reports_index() {
        let good = preset(vec![Field::new(1, "a", FieldType::Text)]);
        let bad = preset(vec![bound(1, None)]);
        let result = validate_presets(&[good.clone(), bad, good]);
        assert!(matches!(
            result,
            Err((1, ValidationError::MissingBinding { field: 1 }))
        ));
    }
}
