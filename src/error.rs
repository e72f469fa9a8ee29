use crate::tag::TypeTag;
use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error code reported when no minimum sentinel exists for a type.
pub const MIN_FOR_TYPE_CODE: u32 = 10061;
/// Error code reported when no maximum sentinel exists for a type.
pub const MAX_FOR_TYPE_CODE: u32 = 14853;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A type bound was requested for a tag that has no place in the canonical order. Bounds are
    /// only defined over a closed set of tags, so this is a caller bug.
    UnsupportedType {
        op: &'static str,
        code: u32,
        tag: TypeTag,
    },
    /// Rekeying was asked to zip a key pattern and a value document of different lengths.
    KeyCountMismatch { pattern: usize, values: usize },
    /// A field name contained a NUL byte, which would terminate it early on the wire.
    BadFieldName(String),
    /// Document was greater than maximum allowed size
    LengthTooLong { max: usize, actual: usize },
    /// Document or element ended too early.
    LengthTooShort {
        step: &'static str,
        actual: usize,
        expected: usize,
    },
    /// Basic encoding failure
    BadEncode(String),
}

impl Error {
    /// True for errors that signal misuse of the builder rather than bad input data. These are
    /// never expected in a correct program.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedType { .. } | Error::KeyCountMismatch { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnsupportedType { op, code, tag } => write!(
                f,
                "type not supported for {} ({}): {}",
                op,
                code,
                tag.name()
            ),
            Error::KeyCountMismatch { pattern, values } => write!(
                f,
                "Key pattern has {} fields, but values document has {}",
                pattern, values
            ),
            Error::BadFieldName(ref name) => {
                write!(f, "Field name contains a NUL byte: {:?}", name)
            }
            Error::LengthTooLong { max, actual } => write!(
                f,
                "Data too long: was {} bytes, maximum allowed is {}",
                actual, max
            ),
            Error::LengthTooShort {
                step,
                actual,
                expected,
            } => write!(
                f,
                "Expected data length {}, but got {} on step [{}]",
                expected, actual, step
            ),
            Error::BadEncode(ref err) => write!(f, "Basic data encoding failure: {}", err),
        }
    }
}

impl std::error::Error for Error {}
