//! Leading-whitespace measurement
//!
//! Converts a line's leading tabs and spaces into a visual column. Lines are
//! raw bytes; only ASCII space and tab are inspected, so any ASCII-compatible
//! encoding works.

use std::num::NonZeroUsize;

/// Visual column and raw length of a line's leading whitespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentPrefix {
    /// Visual column after tab-stop expansion
    pub column: usize,
    /// Number of leading whitespace bytes consumed
    pub prefix_len: usize,
}

/// Advance `column` past one tab.
///
/// The tab always moves forward: a tab at a tab stop lands on the next one.
#[must_use]
pub fn next_tab_stop(column: usize, tab_width: NonZeroUsize) -> usize {
    let width = tab_width.get();
    (column + width) / width * width
}

/// Measure the leading whitespace of `line`
///
/// Scanning stops at the first byte that is neither a space nor a tab.
#[must_use]
pub fn column_and_prefix_length(line: &[u8], tab_width: NonZeroUsize) -> IndentPrefix {
    let mut column = 0;
    let mut prefix_len = 0;

    for &byte in line {
        match byte {
            b'\t' => column = next_tab_stop(column, tab_width),
            b' ' => column += 1,
            _ => break,
        }
        prefix_len += 1;
    }

    IndentPrefix { column, prefix_len }
}
