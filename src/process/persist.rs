//! Atomic file replacement
//!
//! New content goes to a temporary sibling of the target first and is renamed
//! over it only once fully written and synced. Readers see either the old or
//! the new file, never a partial one.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::Result;

/// Temporary path next to `target`, on the same filesystem so rename is atomic
fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map_or_else(|| "output".into(), |n| n.to_string_lossy().into_owned());
    let temp_name = format!(".{file_name}.reindent.{}.tmp", std::process::id());
    match target.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    }
}

fn write_temp_file(temp_path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path)
        .with_context(|| format!("Failed to create temporary file {}", temp_path.display()))?;
    file.write_all(data)
        .with_context(|| format!("Failed to write temporary file {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync temporary file {}", temp_path.display()))?;
    Ok(())
}

/// Replace the content of `target` with `data`
///
/// Keeps the target's permissions. On failure the temporary file is removed
/// and the target is left untouched.
pub fn write_atomically(target: &Path, data: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(target);

    let result = write_temp_file(&temp_path, data)
        .and_then(|()| {
            if let Ok(metadata) = fs::metadata(target) {
                fs::set_permissions(&temp_path, metadata.permissions()).with_context(|| {
                    format!("Failed to copy permissions to {}", temp_path.display())
                })?;
            }
            Ok(())
        })
        .and_then(|()| {
            fs::rename(&temp_path, target).with_context(|| {
                format!(
                    "Failed to rename {} -> {}",
                    temp_path.display(),
                    target.display()
                )
            })
        });

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            log::warn!(
                "failed to remove temporary file {}: {e}",
                temp_path.display()
            );
        }
    }
    result
}
