use std::fmt;

use serde::{de, ser};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Occurs when a query is built with an empty field name or a null value.
    InvalidArgument(String),
    /// Occurs when serde serialization or deserialization fails, including when rendering a query
    /// to JSON.
    SerdeFail(String),
    /// A value payload was greater than the maximum allowed size
    LengthTooLong { max: usize, actual: usize },
    /// Encoded data ended too early.
    LengthTooShort {
        step: &'static str,
        actual: usize,
        expected: usize,
    },
    /// Basic encoding failure: reserved markers, non-canonical lengths, invalid UTF-8, or a value
    /// of the wrong kind where a specific kind was required.
    BadEncode(String),
    /// A named query was read, but no reader was registered for its type name.
    UnknownQuery(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidArgument(ref err) => write!(f, "Invalid argument: {}", err),
            Error::SerdeFail(ref msg) => f.write_str(msg),
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
            Error::UnknownQuery(ref name) => write!(f, "No reader registered for query [{}]", name),
        }
    }
}

impl std::error::Error for Error {}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::SerdeFail(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::SerdeFail(msg.to_string())
    }
}

impl std::convert::From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::SerdeFail(e.to_string())
    }
}
