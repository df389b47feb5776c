//! Contains the Error and Result type used by the parser, encoder and
//! compression adapter.
use std::fmt::Display;

use crate::Tag;

/// Various errors that can occur while reading or writing NBT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// The broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input ended before a value it declared.
    Truncated,
    /// Input is structurally invalid: an unknown tag, a negative length, a
    /// string that is not modified UTF-8, or a list whose elements disagree
    /// with its declared tag.
    Malformed,
    /// Compounds and lists were nested deeper than the configured maximum.
    DepthExceeded,
    /// The inflate or deflate primitive reported an error.
    CompressionFailure,
    /// A value exists but does not have the tag or length a reader expects,
    /// or a required key is absent.
    SchemaMismatch,
    /// A value lies outside the range its container allows.
    OutOfRange,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::new(ErrorKind::Truncated, e.to_string()),
            _ => Error::new(ErrorKind::Malformed, format!("io error: {}", e)),
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Error {
        Error {
            msg: msg.into(),
            kind,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// A required key was absent from a compound.
    pub fn missing_key(key: &str) -> Error {
        Error::new(
            ErrorKind::SchemaMismatch,
            format!("missing field `{}`", key),
        )
    }

    /// A key existed but held a value of the wrong tag.
    pub fn wrong_tag(key: &str, expected: Tag, found: Tag) -> Error {
        Error::new(
            ErrorKind::SchemaMismatch,
            format!("field `{}`: expected {:?}, found {:?}", key, expected, found),
        )
    }

    /// An array or list held a different number of elements than required.
    pub fn wrong_length(key: &str, expected: usize, found: usize) -> Error {
        Error::new(
            ErrorKind::SchemaMismatch,
            format!(
                "field `{}`: expected {} elements, found {}",
                key, expected, found
            ),
        )
    }

    pub fn out_of_range(msg: impl Into<String>) -> Error {
        Error::new(ErrorKind::OutOfRange, msg)
    }

    pub(crate) fn truncated(needed: usize, remaining: usize) -> Error {
        Error::new(
            ErrorKind::Truncated,
            format!(
                "eof: needed {} bytes but only {} remain",
                needed, remaining
            ),
        )
    }

    pub(crate) fn invalid_tag(tag: u8) -> Error {
        Error::new(
            ErrorKind::Malformed,
            format!("invalid nbt tag value: {}", tag),
        )
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Error {
        Error::new(
            ErrorKind::Malformed,
            format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
        )
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Error {
        Error::new(ErrorKind::Malformed, msg)
    }

    pub(crate) fn depth_exceeded(max: usize) -> Error {
        Error::new(
            ErrorKind::DepthExceeded,
            format!("nesting deeper than {} compounds and lists", max),
        )
    }

    pub(crate) fn compression(msg: impl Display) -> Error {
        Error::new(
            ErrorKind::CompressionFailure,
            format!("compression: {}", msg),
        )
    }
}
