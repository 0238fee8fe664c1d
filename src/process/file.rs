//! Single-file processing
//!
//! Reads one file fully into memory, reindents it and then, depending on the
//! [`OutputMode`], writes it back, hands the bytes to the caller or only
//! reports what would change. Content is never decoded, so files in any
//! ASCII-compatible encoding are processed.

use std::path::Path;

use anyhow::Context;

use crate::format::{reindent, Diagnostic, IndentParams};
use crate::process::persist::write_atomically;
use crate::Result;

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// What to do with the reindented content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Replace the file when its content changed
    InPlace,
    /// Return the content to the caller for printing
    Stdout,
    /// Never write; only report
    Check,
}

/// Result of processing one file that was not skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub diagnostics: Vec<Diagnostic>,
    /// Reindented content differs from the original
    pub changed: bool,
    /// The file on disk was replaced
    pub written: bool,
    /// Reindented content, only in [`OutputMode::Stdout`]
    pub output: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Larger than the size limit; left untouched
    TooLarge { size: u64 },
    Processed(ProcessedFile),
}

/// Reindent the file at `path`
///
/// Read and write failures are returned as errors; the file is then left
/// exactly as it was.
pub fn process_file(
    path: &Path,
    params: &IndentParams,
    mode: OutputMode,
    max_size: u64,
) -> Result<FileOutcome> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    if size > max_size {
        return Ok(FileOutcome::TooLarge { size });
    }

    let contents =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let reindented = reindent(&contents, params);
    let changed = reindented.changed(&contents);
    log::debug!(
        "{}: {} diagnostics, changed: {changed}",
        path.display(),
        reindented.diagnostics.len()
    );

    let mut written = false;
    let mut output = None;
    match mode {
        OutputMode::InPlace if changed => {
            write_atomically(path, &reindented.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written = true;
        }
        OutputMode::Stdout => output = Some(reindented.text),
        OutputMode::InPlace | OutputMode::Check => {}
    }

    Ok(FileOutcome::Processed(ProcessedFile {
        diagnostics: reindented.diagnostics,
        changed,
        written,
        output,
    }))
}
