//! Error handling for the arithmetic layer

use core::fmt;

/// The error type for field, scalar and curve operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value fell outside its required range
    OutOfRange {
        /// What was being validated
        context: &'static str,
    },

    /// The element has no multiplicative inverse
    NotInvertible,

    /// The value is not a quadratic residue modulo p
    NoSquareRoot,

    /// The operation would produce the point at infinity, which this
    /// library does not represent
    UnsupportedInfinity,

    /// A byte encoding is structurally invalid
    MalformedEncoding {
        /// What was being decoded
        context: &'static str,
        /// Why the encoding was rejected
        reason: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },
}

/// Result type for arithmetic operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { context } => {
                write!(f, "Value out of range for {}", context)
            }
            Error::NotInvertible => write!(f, "Element is not invertible"),
            Error::NoSquareRoot => write!(f, "Value has no square root modulo p"),
            Error::UnsupportedInfinity => {
                write!(f, "Operation would produce the point at infinity")
            }
            Error::MalformedEncoding { context, reason } => {
                write!(f, "Malformed encoding for {}: {}", context, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

pub mod validate;
