//! Document reading, rendering, and atomic persistence.
//!
//! The filename `-` stands for standard input on the read side and standard
//! output on the write side.

use std::fs;
use std::io::{Read, Write};
#[cfg(unix)]
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Reads the raw document bytes from a file, or from stdin for `-`.
///
/// With `create_if_missing`, a missing file yields an empty object document
/// instead of an error.
pub fn read_document(path: &str, create_if_missing: bool) -> Result<Vec<u8>> {
    if path == "-" {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("failed to read from stdin")?;
        return Ok(data);
    }

    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && create_if_missing => {
            Ok(b"{}".to_vec())
        }
        Err(err) => Err(err).with_context(|| format!("failed to read {path}")),
    }
}

/// Renders the document, pretty-printed unless compact output is requested,
/// with a trailing newline.
pub fn render_document(doc: &Value, compact: bool) -> Result<Vec<u8>> {
    let mut data = if compact {
        serde_json::to_vec(doc)?
    } else {
        serde_json::to_vec_pretty(doc)?
    };
    data.push(b'\n');
    Ok(data)
}

/// Writes the document to `target`, or to stdout for `-`.
///
/// File writes go to a temporary file first and are renamed into place, so
/// the target is never left partially written. The permission bits of
/// `source` are carried over when available.
pub fn write_document(target: &str, data: &[u8], source: &str) -> Result<()> {
    if target == "-" {
        std::io::stdout()
            .write_all(data)
            .context("failed to write to stdout")?;
        return Ok(());
    }

    let temp = format!("{target}.tmp");
    fs::write(&temp, data).with_context(|| format!("failed to write {temp}"))?;
    #[cfg(unix)]
    copy_permissions(source, temp.as_ref());
    fs::rename(&temp, target).with_context(|| format!("failed to rename {temp} to {target}"))?;

    Ok(())
}

#[cfg(unix)]
fn copy_permissions(source: &str, target: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(source) {
        let mode = metadata.permissions().mode();
        let _ = fs::set_permissions(target, fs::Permissions::from_mode(mode));
    }
}
