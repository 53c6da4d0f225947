//! Error kinds for hiergraph operations.

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Catch-all for conditions nobody planned for
    Unexpected,

    /// The destination of a dump could not be opened or written
    SinkUnavailable,

    /// Reading an input file failed
    IoFailed,

    /// A structure snapshot could not be decoded
    SnapshotInvalid,

    /// Kind tables or dump options are not usable
    ConfigInvalid,

    /// Output format name is not one of the supported documents
    UnknownFormat,

    /// Serializing an output document failed
    SerializationFailed,

    /// Invalid argument passed to a function
    InvalidArgument,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
