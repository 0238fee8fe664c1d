//! Streaming reindentation
//!
//! Feeds a reader line by line through a [`LineReindenter`] and writes the
//! result as it is produced. Diagnostics are collected and returned; they never
//! interrupt the stream.

use std::io::{BufRead, Write};

use anyhow::Context;

use crate::format::{Diagnostic, IndentParams, LineOutput, LineReindenter};
use crate::Result;

/// Write one line's output, blank lines first
fn write_output<W: Write>(output: &mut W, line: &LineOutput) -> std::io::Result<()> {
    if let LineOutput::Emit {
        blank_lines, text, ..
    } = line
    {
        for _ in 0..*blank_lines {
            output.write_all(b"\n")?;
        }
        output.write_all(text)?;
        output.write_all(b"\n")?;
    }
    Ok(())
}

/// Reindent everything readable from `input` into `output`
///
/// Lines are read as raw bytes, so any ASCII-compatible encoding is accepted.
/// A read or write failure aborts the stream. Blank lines still pending at end
/// of input are not written.
pub fn reindent_stream<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    params: &IndentParams,
) -> Result<Vec<Diagnostic>> {
    let mut reindenter = LineReindenter::new(*params);
    let mut diagnostics = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .with_context(|| format!("Failed to read line {}", reindenter.line_number() + 1))?;
        if read == 0 {
            break;
        }

        let result = reindenter.push_line(&line);
        write_output(output, &result).context("Failed to write output")?;
        if let LineOutput::Emit {
            diagnostic: Some(diagnostic),
            ..
        } = result
        {
            diagnostics.push(diagnostic);
        }
    }

    let lines = reindenter.line_number();
    let dropped = reindenter.finish();
    if dropped > 0 {
        log::debug!("Dropped {dropped} trailing blank lines after line {lines}");
    }

    output.flush().context("Failed to flush output")?;
    Ok(diagnostics)
}
