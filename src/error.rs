//! The error and result types used throughout the crate.

use std::io;

use crate::Tag;

/// Error produced while parsing or navigating NBT data.
///
/// Carries a classification ([`ErrorKind`]) and a short message naming the
/// point that detected the fault.
#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input ended while a declared field still had bytes to read.
    TruncatedInput,

    /// A tag byte outside `0x00..=0x0C` where a tag was expected.
    UnknownTag,

    /// An end tag (`0x00`) where a tag in `0x01..=0x0C` was required.
    UnexpectedEnd,

    /// The decompressor reported a framing or checksum failure, or string
    /// data could not be decoded.
    CorruptInput,

    /// A typed accessor or typed list view was asked for a tag that does
    /// not match the node's actual tag.
    TypeMismatch,

    /// Indexed access beyond a list's length, or keyed access to an absent
    /// compound entry through the failing accessor.
    OutOfRange,

    /// The underlying byte source reported any other OS-level error.
    Io,
}

impl Error {
    /// The classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn unknown_tag(byte: u8, context: &str) -> Self {
        Self {
            msg: format!("unknown tag byte 0x{byte:02X}: {context}"),
            kind: ErrorKind::UnknownTag,
        }
    }

    pub(crate) fn unexpected_end(context: &str) -> Self {
        Self {
            msg: format!("unexpected end tag: {context}"),
            kind: ErrorKind::UnexpectedEnd,
        }
    }

    pub(crate) fn corrupt(context: &str) -> Self {
        Self {
            msg: format!("corrupt input: {context}"),
            kind: ErrorKind::CorruptInput,
        }
    }

    pub(crate) fn mismatch(expected: Tag, actual: Tag) -> Self {
        Self {
            msg: format!("expected {expected:?}, found {actual:?}"),
            kind: ErrorKind::TypeMismatch,
        }
    }

    pub(crate) fn out_of_range(context: &str) -> Self {
        Self {
            msg: format!("out of range: {context}"),
            kind: ErrorKind::OutOfRange,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        let kind = match e.kind() {
            io::ErrorKind::UnexpectedEof => ErrorKind::TruncatedInput,
            // flate2 reports bad deflate streams and checksum mismatches
            // through these.
            io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => ErrorKind::CorruptInput,
            _ => ErrorKind::Io,
        };
        Self {
            msg: e.to_string(),
            kind,
        }
    }
}
