//! Indentation rewriting.
//!
//! This module contains the core reindentation logic organized into submodules:
//! - [`column`]: Measures leading whitespace on the tab-stop grid
//! - [`label`]: Detects labels that hanging continuation lines align under
//! - [`reindenter`]: Rewrites lines, collapses blank runs and reports misaligned indentation

pub mod column;
pub mod label;
pub mod reindenter;

pub use column::{column_and_prefix_length, next_tab_stop, IndentPrefix};
pub use label::label_delta;
pub use reindenter::{
    reindent, reindent_line, Diagnostic, IndentParams, IndentState, LineOutput, LineReindenter,
    Reindented,
};
