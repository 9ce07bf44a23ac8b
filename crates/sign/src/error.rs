//! Error handling for the signing layer

use core::fmt;
use koblitz_algorithms::Error as CurveError;

/// The error type for key management and ECDSA operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The secret key holds no usable private scalar
    NoPrivateKey,

    /// The random source failed to produce entropy
    WeakRandomSource,

    /// A signature encoding is structurally invalid
    MalformedSignature {
        /// Why the encoding was rejected
        reason: &'static str,
    },

    /// The recovery flag is outside the supported range [27, 34]
    InvalidRecoveryFlag {
        /// The rejected flag byte
        flag: u8,
    },

    /// A caller-supplied nonce produced a zero signature component
    InvalidNonce,

    /// No recovery flag reproduces the signing key
    RecoveryFailed,

    /// An error from the underlying curve arithmetic
    Curve(CurveError),
}

/// Result type for signing operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoPrivateKey => write!(f, "No private key available"),
            Error::WeakRandomSource => write!(f, "Random source failed to produce entropy"),
            Error::MalformedSignature { reason } => {
                write!(f, "Malformed signature: {}", reason)
            }
            Error::InvalidRecoveryFlag { flag } => {
                write!(f, "Invalid recovery flag {} (expected 27..=34)", flag)
            }
            Error::InvalidNonce => write!(f, "Nonce produced a zero signature component"),
            Error::RecoveryFailed => write!(f, "No recovery flag matches the signing key"),
            Error::Curve(e) => write!(f, "Curve arithmetic error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Curve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CurveError> for Error {
    fn from(err: CurveError) -> Self {
        Error::Curve(err)
    }
}
