//! Label detection for hanging continuation lines
//!
//! A labeled line (`NOTE:`, a `- ` bullet or a `word:` prefix) announces that
//! the following line may hang under the label's text rather than under the
//! label itself. The returned delta is the distance from the label's column to
//! where that hanging text starts.

/// Prefix of a note block
const NOTE_LABEL: &[u8] = b"NOTE:";

/// Prefix of a bulleted list item
const BULLET_LABEL: &[u8] = b"- ";

/// Columns between a `NOTE:` label and its text
const NOTE_DELTA: usize = NOTE_LABEL.len() + 1;

/// Columns between a bullet and its text
const BULLET_DELTA: usize = BULLET_LABEL.len();

/// Continuation offset announced by `segment`, or 0 when it carries no label
///
/// `segment` is the line's bytes after its leading whitespace. A colon only
/// counts as a label when something precedes it; the delta then covers the
/// label bytes, the colon and the single space after it.
#[must_use]
pub fn label_delta(segment: &[u8]) -> usize {
    if segment.starts_with(NOTE_LABEL) {
        return NOTE_DELTA;
    }
    if segment.starts_with(BULLET_LABEL) {
        return BULLET_DELTA;
    }
    match segment.iter().position(|&b| b == b':') {
        Some(idx) if idx > 0 => idx + 2,
        _ => 0,
    }
}
