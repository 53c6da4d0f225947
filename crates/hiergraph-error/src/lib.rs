//! # hiergraph-error
//!
//! Error type shared by every hiergraph crate.
//!
//! - **ErrorKind** says what went wrong (sink unavailable, snapshot invalid, ...)
//! - **operation** names the call that failed, the previous one moves to context
//! - **context** carries key/value pairs that locate the cause
//! - **source** wraps the underlying error without exposing its type
//!
//! ```rust
//! use hiergraph_error::{Error, ErrorKind};
//!
//! fn open() -> hiergraph_error::Result<()> {
//!     Err(Error::new(ErrorKind::SinkUnavailable, "permission denied")
//!         .with_operation("render::dump_structure")
//!         .with_context("path", "/tmp/top.json"))
//! }
//! ```
//!
//! Unknown object kinds and malformed adapter data are not errors: the
//! collector logs and skips them. Only conditions the caller has to act on
//! surface as [`Error`].

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the hiergraph [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
