//! Error types and result aliases for reindent.
//!
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used for I/O and
//!   configuration failures. Misaligned indentation is not an error; it is
//!   reported as a [`Diagnostic`](crate::format::Diagnostic) value.

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
