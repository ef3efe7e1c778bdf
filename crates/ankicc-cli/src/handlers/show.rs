//! Show command handler.
//!
//! Displays the presets in a document in a formatted table, optionally
//! followed by each preset's fields.

use std::path::Path;

use ankicc_core::{Field, Preset};
use anyhow::Result;

use crate::handlers::load_document;
use crate::presentation::{format_optional, format_timestamp, print_separator, truncate_string};

/// Execute the show command.
pub async fn execute(file: &Path, fields: bool) -> Result<()> {
    let document = load_document(file).await?;
    let presets = document.presets();

    if presets.is_empty() {
        println!("No presets found in {}.", file.display());
        return Ok(());
    }

    println!("Found {} preset(s) in {}:\n", presets.len(), file.display());
    println!(
        "{:<3} {:<25} {:<10} {:<7} {:<20} {:<12} ID",
        "#", "Name", "Status", "Fields", "Last edited", "Hue"
    );
    print_separator(100);

    for (index, preset) in presets.iter().enumerate() {
        println!(
            "{:<3} {:<25} {:<10} {:<7} {:<20} {:<12} {}",
            index,
            truncate_string(&preset.name, 24),
            preset.status.as_str(),
            preset.fields.len(),
            format_last_edited(preset),
            truncate_string(&preset.hue, 11),
            format_optional(preset.id.as_ref(), "--"),
        );
    }

    if fields {
        for preset in presets {
            println!();
            print_fields(preset);
        }
    }

    Ok(())
}

fn print_fields(preset: &Preset) {
    println!("{} ({} field(s))", preset.name, preset.fields.len());
    if preset.fields.is_empty() {
        return;
    }

    println!(
        "  {:<5} {:<20} {:<11} {:<8} {:<7} {:<25} Binding",
        "ID", "Name", "Type", "Visible", "Frozen", "Options"
    );
    print_separator(100);

    for field in &preset.fields {
        println!(
            "  {:<5} {:<20} {:<11} {:<8} {:<7} {:<25} {}",
            field.id,
            truncate_string(&field.name, 19),
            field.field_type.as_str(),
            if field.is_visible() { "yes" } else { "no" },
            if field.is_frozen() { "yes" } else { "no" },
            truncate_string(&format_options(field), 24),
            describe_binding(preset, field),
        );
    }
}

fn format_options(field: &Field) -> String {
    if !field.field_type.uses_options() || field.options.is_empty() {
        return "--".to_string();
    }
    field.options.join(", ")
}

/// `last_edited` as a timestamp, or the number as written when out of range.
pub fn format_last_edited(preset: &Preset) -> String {
    format_timestamp(preset.last_edited_at(), &preset.last_edited.to_string())
}

/// Describe where a field's binding points, resolving the id within the preset.
pub fn describe_binding(preset: &Preset, field: &Field) -> String {
    match (field.bound_to, preset.binding_target(field)) {
        (None, _) => "--".to_string(),
        (Some(_), Some(target)) => format!("-> {} (#{})", target.name, target.id),
        (Some(id), None) => format!("-> #{id} (missing)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ankicc_core::FieldType;

    fn preset() -> Preset {
        let mut preset = Preset::new("Vocab", "#123456");
        preset.fields.push(Field::new(1, "Word", FieldType::Text));
        let mut reading = Field::new(2, "Reading", FieldType::Bound);
        reading.bound_to = Some(1);
        preset.fields.push(reading);
        let mut orphan = Field::new(3, "Orphan", FieldType::Bound);
        orphan.bound_to = Some(8);
        preset.fields.push(orphan);
        preset
    }

    #[test]
    fn test_describe_binding() {
        let p = preset();
        assert_eq!(describe_binding(&p, &p.fields[0]), "--");
        assert_eq!(describe_binding(&p, &p.fields[1]), "-> Word (#1)");
        assert_eq!(describe_binding(&p, &p.fields[2]), "-> #8 (missing)");
    }

    #[test]
    fn test_format_options_only_for_select_fields() {
        let mut select = Field::new(1, "Level", FieldType::SelectOne);
        select.options = vec!["easy".into(), "hard".into()];
        assert_eq!(format_options(&select), "easy, hard");

        let mut text = Field::new(2, "Note", FieldType::Text);
        text.options = vec!["ignored".into()];
        assert_eq!(format_options(&text), "--");
    }

    #[test]
    fn test_format_last_edited_accepts_fractions() {
        let fractional = ankicc_core::decode_preset(
            r##"{"last_edited": 1695300000000.5, "name": "Demo", "fields": [],
                 "status": "unsynced", "hue": "#ff0000"}"##,
        )
        .unwrap();
        assert_eq!(format_last_edited(&fractional), "2023-09-21 12:40:00");

        let far = ankicc_core::decode_preset(
            r##"{"last_edited": 1e300, "name": "Far", "fields": [],
                 "status": "synced", "hue": "#000000"}"##,
        )
        .unwrap();
        assert_eq!(format_last_edited(&far), "1e300");
    }

    #[tokio::test]
    async fn test_execute_on_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(&dir.path().join("absent.json"), true).await.unwrap_err();
        let cli_err = err.downcast_ref::<crate::error::CliError>().unwrap();
        assert_eq!(cli_err.exit_code(), 74);
    }
}
