//! File processing pipeline.
//!
//! This module drives one input at a time through the reindenter:
//! - [`pipeline`]: streams lines from a reader through the reindenter into a writer
//! - [`file`]: reads a file, reindents it and writes, prints or only checks the result
//! - [`persist`]: replaces a file's content atomically (temporary file, then rename)
//! - [`report`]: renders per-file diagnostics under a one-time header
//!
//! The main entry point is [`process_file`], which never leaves a file
//! half-rewritten: the new content is only swapped in once it is complete.

pub mod file;
pub mod persist;
pub mod pipeline;
pub mod report;

pub use file::{process_file, FileOutcome, OutputMode, DEFAULT_MAX_FILE_SIZE};
pub use persist::write_atomically;
pub use pipeline::reindent_stream;
pub use report::{format_report, RunSummary};
