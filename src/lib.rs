//! reindent - Batch indentation normalizer
//!
//! Rewrites leading whitespace on a tab-stop grid, collapses blank-line runs,
//! realigns hanging continuation lines and reports indentation that is not a
//! multiple of the indentation unit.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod process;
pub mod walk;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use format::{reindent, Diagnostic, IndentParams, Reindented};
pub use walk::FileSelector;
