//! Diagnostic reporting and run totals

use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::format::Diagnostic;

/// Render the diagnostics of one input under a single `In file` header
///
/// Returns `None` when there is nothing to report, so inputs without
/// diagnostics print no header at all.
#[must_use]
pub fn format_report(source_name: &str, diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }

    let mut report = format!("In file {source_name}\n");
    for diagnostic in diagnostics {
        let _ = writeln!(report, "{diagnostic}");
    }
    Some(report)
}

/// Per-run counters, safe to update from parallel workers
#[derive(Debug, Default)]
pub struct RunSummary {
    processed: AtomicUsize,
    changed: AtomicUsize,
    with_diagnostics: AtomicUsize,
    skipped: AtomicUsize,
    errors: AtomicUsize,
}

impl RunSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&self, changed: bool, diagnostics: usize) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        if changed {
            self.changed.fetch_add(1, Ordering::Relaxed);
        }
        if diagnostics > 0 {
            self.with_diagnostics.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn changed(&self) -> usize {
        self.changed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn with_diagnostics(&self) -> usize {
        self.with_diagnostics.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }

    /// One-line summary printed at the end of a run
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Reindented {} files, {} with diagnostics, {} errors.",
            self.processed.load(Ordering::Relaxed),
            self.with_diagnostics(),
            self.errors()
        )
    }

    /// Extra summary lines for changed (or, in check mode, changeable) and
    /// oversized files; empty when there is nothing to add
    #[must_use]
    pub fn detail_lines(&self, check: bool) -> Vec<String> {
        let mut lines = Vec::new();
        let changed = self.changed();
        if check && changed > 0 {
            lines.push(format!("{changed} files would change."));
        }
        let skipped = self.skipped.load(Ordering::Relaxed);
        if skipped > 0 {
            lines.push(format!("Skipped {skipped} oversized files."));
        }
        lines
    }
}
