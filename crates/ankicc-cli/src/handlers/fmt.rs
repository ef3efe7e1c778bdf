//! Fmt command handler.
//!
//! Re-encodes a document in canonical pretty JSON: wire key names, field
//! declaration order, absent optionals omitted. The document's shape (single
//! preset or array) is kept.

use std::io::Write;
use std::path::Path;

use ankicc_core::{PresetDocument, encode_pretty_with_indent, unknown_keys};
use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::{decode_at, read_document};

/// Render a decoded document with the configured indentation.
pub fn render(ctx: &CliContext, document: &PresetDocument) -> Result<String, CliError> {
    let mut out = encode_pretty_with_indent(document, &ctx.config().indent.unit())
        .map_err(|e| CliError::Core(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Execute the fmt command.
///
/// Prints the formatted document, or rewrites the file when `write` is set.
/// A document that fails to decode is never touched. Keys outside the preset
/// shape do not survive formatting and are reported with a warning.
pub async fn execute(ctx: &CliContext, file: &Path, write: bool) -> Result<()> {
    let text = read_document(file).await?;
    let document = decode_at(file, &text)?;
    let formatted = render(ctx, &document)?;

    let dropped = unknown_keys(&text).map_err(|e| CliError::Core(e.to_string()))?;
    if !dropped.is_empty() {
        tracing::warn!(
            path = %file.display(),
            keys = ?dropped,
            "Dropping keys that are not part of the preset shape"
        );
    }

    if !write {
        print!("{formatted}");
        return Ok(());
    }

    if text == formatted {
        println!("{} already formatted", file.display());
        return Ok(());
    }

    replace_file(file, formatted).await?;
    tracing::info!(
        path = %file.display(),
        presets = document.presets().len(),
        "Rewrote preset document"
    );
    println!("Formatted {}", file.display());
    Ok(())
}

/// Replace `path` with `contents` through a sibling temporary file.
///
/// The original is either left intact or fully replaced; its permissions are
/// carried over to the new file.
async fn replace_file(path: &Path, contents: String) -> Result<(), CliError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_and_persist(&path, contents.as_bytes()))
        .await
        .map_err(|e| CliError::Io(e.to_string()))?
}

fn write_and_persist(path: &Path, contents: &[u8]) -> Result<(), CliError> {
    let io_err = |e: std::io::Error| CliError::Io(format!("{}: {e}", path.display()));
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".ankicc-fmt-")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(contents).map_err(io_err)?;
    let permissions = std::fs::metadata(path).map_err(io_err)?.permissions();
    tmp.as_file().set_permissions(permissions).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, Indent};
    use ankicc_core::decode_document;

    const MESSY: &str = r##"{"hue":"#abcdef","status":"to_update","fields":[{"visible_by_default":false,"current_inputs":["b"],"default":["a"],"options":["a","b"],"type":"selectMany","name":"Tags","id":7,"currently_frozen":null}],"name":"Messy","last_edited":5}"##;

    fn ctx(indent: Indent) -> CliContext {
        CliContext::new(CliConfig {
            indent,
            ..CliConfig::default()
        })
    }

    #[test]
    fn test_render_uses_field_order_and_drops_null_optionals() {
        let doc = decode_document(MESSY).unwrap();
        let out = render(&ctx(Indent::Spaces(2)), &doc).unwrap();

        assert!(out.starts_with("{\n  \"last_edited\": 5,\n  \"name\": \"Messy\""));
        assert!(!out.contains("currently_frozen"));
        assert!(out.ends_with("}\n"));
        assert_eq!(decode_document(&out).unwrap(), doc);
    }

    #[test]
    fn test_render_keeps_array_shape() {
        let doc = decode_document(&format!("[{MESSY}]")).unwrap();
        let out = render(&ctx(Indent::Tab), &doc).unwrap();
        assert!(out.starts_with("[\n\t{"));
    }

    #[tokio::test]
    async fn test_write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, MESSY).unwrap();
        let ctx = ctx(Indent::Spaces(4));

        execute(&ctx, &path, true).await.unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("\n    \"last_edited\": 5"));

        execute(&ctx, &path, true).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[tokio::test]
    async fn test_write_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, MESSY).unwrap();

        execute(&ctx(Indent::Spaces(2)), &path, true).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("preset.json")]);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("{\n  \"last_edited\""));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        std::fs::write(&path, MESSY).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        execute(&ctx(Indent::Spaces(2)), &path, true).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[tokio::test]
    async fn test_write_drops_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.json");
        let with_owner = MESSY.replace("\"name\":\"Messy\"", "\"name\":\"Messy\",\"owner\":\"u1\"");
        assert!(with_owner.contains("owner"));
        std::fs::write(&path, &with_owner).unwrap();

        execute(&ctx(Indent::Spaces(2)), &path, true).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("owner"));
        assert_eq!(decode_document(&written).unwrap(), decode_document(MESSY).unwrap());
    }

    #[tokio::test]
    async fn test_invalid_document_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let broken = MESSY.replace("to_update", "stale");
        std::fs::write(&path, &broken).unwrap();

        let err = execute(&ctx(Indent::Spaces(2)), &path, true).await.unwrap_err();
        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 65);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
    }
}
