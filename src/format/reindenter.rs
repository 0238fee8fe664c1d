//! `LineReindenter` - per-line indentation rewriting
//!
//! Each non-blank line has its leading whitespace measured on the tab-stop
//! grid, is checked against the indentation unit, and is re-emitted with the
//! output indentation. Runs of blank lines are buffered and only written once
//! another non-blank line follows, so trailing blank lines disappear.
//!
//! Lines that hang under a label of the previous line (see [`label_delta`])
//! are pulled back to the label's own column before conversion.
//!
//! Lines are handled as raw bytes. Only the leading whitespace and the label
//! prefix are inspected, so sources in Latin-1 or any other ASCII-compatible
//! encoding pass through with their remaining bytes untouched.

use std::fmt;
use std::num::NonZeroUsize;

use anyhow::anyhow;

use crate::error::Result;
use crate::format::column::column_and_prefix_length;
use crate::format::label::label_delta;

const fn non_zero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("width must be non-zero"),
    }
}

const DEFAULT_TAB_WIDTH: NonZeroUsize = non_zero(4);
const DEFAULT_INDENT_UNIT: NonZeroUsize = non_zero(4);
const DEFAULT_OUTPUT_INDENT: NonZeroUsize = non_zero(2);

/// Geometry of the input and output indentation
///
/// All three widths are at least 1; [`IndentParams::new`] rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentParams {
    tab_width: NonZeroUsize,
    indent_unit: NonZeroUsize,
    output_indent: NonZeroUsize,
}

impl IndentParams {
    /// Build a geometry from plain widths, rejecting any zero width
    pub fn new(tab_width: usize, indent_unit: usize, output_indent: usize) -> Result<Self> {
        let checked = |value: usize, name: &str| {
            NonZeroUsize::new(value).ok_or_else(|| anyhow!("{name} must be at least 1"))
        };
        Ok(Self {
            tab_width: checked(tab_width, "tab_width")?,
            indent_unit: checked(indent_unit, "indent_unit")?,
            output_indent: checked(output_indent, "output_indent")?,
        })
    }

    /// Distance between tab stops in the input
    #[must_use]
    pub fn tab_width(&self) -> usize {
        self.tab_width.get()
    }

    /// Column granularity that valid input indentation is a multiple of
    #[must_use]
    pub fn indent_unit(&self) -> usize {
        self.indent_unit.get()
    }

    /// Output spaces emitted per indentation unit
    #[must_use]
    pub fn output_indent(&self) -> usize {
        self.output_indent.get()
    }
}

impl Default for IndentParams {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            indent_unit: DEFAULT_INDENT_UNIT,
            output_indent: DEFAULT_OUTPUT_INDENT,
        }
    }
}

/// Scan state carried from one line to the next within a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentState {
    /// Blank lines seen but not yet written
    pub pending_blank_lines: usize,
    /// Column a hanging continuation must start at (0 = none expected)
    pub expected_continuation_column: usize,
    /// Columns removed from a matching continuation line
    pub continuation_delta: usize,
}

/// Non-fatal report about a line whose indentation could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number
    pub line_number: usize,
    pub message: String,
}

impl Diagnostic {
    fn misaligned(line_number: usize, indent_unit: usize) -> Self {
        Self {
            line_number,
            message: format!("Indentation not a multiple of {indent_unit}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>5}: {}", self.line_number, self.message)
    }
}

/// What a single input line produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutput {
    /// Blank line, held back until the next non-blank line
    Buffered,
    /// A content line, preceded by the blank lines buffered before it
    Emit {
        blank_lines: usize,
        text: Vec<u8>,
        diagnostic: Option<Diagnostic>,
    },
}

impl LineOutput {
    /// Append the emitted lines, each terminated by `\n`
    pub fn render_into(&self, buf: &mut Vec<u8>) {
        if let LineOutput::Emit {
            blank_lines, text, ..
        } = self
        {
            buf.resize(buf.len() + blank_lines, b'\n');
            buf.extend_from_slice(text);
            buf.push(b'\n');
        }
    }
}

/// Remove the line terminator and any trailing spaces or tabs
fn strip_line(raw: &[u8]) -> &[u8] {
    let mut line = raw.strip_suffix(b"\n").unwrap_or(raw);
    line = line.strip_suffix(b"\r").unwrap_or(line);
    while let [rest @ .., b' ' | b'\t'] = line {
        line = rest;
    }
    line
}

/// Process one raw line
///
/// Takes the state left by the previous line and returns the state for the
/// next one together with what this line emits.
#[must_use]
pub fn reindent_line(
    mut state: IndentState,
    params: &IndentParams,
    line_number: usize,
    raw: &[u8],
) -> (IndentState, LineOutput) {
    let line = strip_line(raw);
    if line.is_empty() {
        state.pending_blank_lines += 1;
        return (state, LineOutput::Buffered);
    }

    let blank_lines = std::mem::take(&mut state.pending_blank_lines);

    let prefix = column_and_prefix_length(line, params.tab_width);
    let mut column = prefix.column;
    let segment = &line[prefix.prefix_len..];

    if state.expected_continuation_column != 0 {
        if column == state.expected_continuation_column {
            column -= state.continuation_delta;
        } else {
            state.expected_continuation_column = 0;
        }
    }

    if state.expected_continuation_column == 0 {
        let delta = label_delta(segment);
        if delta > 0 {
            state.continuation_delta = delta;
            state.expected_continuation_column = column + delta;
        }
    }

    let unit = params.indent_unit();
    let (text, diagnostic) = if column % unit == 0 {
        let indent = column / unit * params.output_indent();
        let mut text = Vec::with_capacity(indent + segment.len());
        text.resize(indent, b' ');
        text.extend_from_slice(segment);
        (text, None)
    } else {
        (line.to_vec(), Some(Diagnostic::misaligned(line_number, unit)))
    };

    (
        state,
        LineOutput::Emit {
            blank_lines,
            text,
            diagnostic,
        },
    )
}

/// Stateful driver feeding the lines of one file through [`reindent_line`]
#[derive(Debug)]
pub struct LineReindenter {
    params: IndentParams,
    state: IndentState,
    line_number: usize,
}

impl LineReindenter {
    #[must_use]
    pub fn new(params: IndentParams) -> Self {
        Self {
            params,
            state: IndentState::default(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Feed the next raw line, with or without its terminator
    pub fn push_line(&mut self, raw: &[u8]) -> LineOutput {
        self.line_number += 1;
        let (state, output) = reindent_line(self.state, &self.params, self.line_number, raw);
        self.state = state;
        output
    }

    /// End of input; returns the number of trailing blank lines dropped
    #[must_use]
    pub fn finish(self) -> usize {
        self.state.pending_blank_lines
    }
}

/// Rewritten content of one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reindented {
    pub text: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reindented {
    /// Whether the rewrite differs from `original`
    #[must_use]
    pub fn changed(&self, original: &[u8]) -> bool {
        self.text != original
    }
}

/// Reindent a whole file held in memory
#[must_use]
pub fn reindent(content: &[u8], params: &IndentParams) -> Reindented {
    let mut reindenter = LineReindenter::new(*params);
    let mut result = Reindented {
        text: Vec::with_capacity(content.len()),
        diagnostics: Vec::new(),
    };

    for raw in content.split_inclusive(|&b| b == b'\n') {
        let output = reindenter.push_line(raw);
        output.render_into(&mut result.text);
        if let LineOutput::Emit {
            diagnostic: Some(diagnostic),
            ..
        } = output
        {
            result.diagnostics.push(diagnostic);
        }
    }

    result
}
