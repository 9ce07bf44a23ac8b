//! Domain parameters for the secp256k1 (Koblitz) curve
//!
//! This crate holds the numeric constants every other koblitz crate reads:
//! the prime modulus, curve coefficients, group order and generator point.
//! The parameter set is constructed once as a process-wide constant and is
//! never rebuilt per call; it is plain data and safe to share across any
//! number of concurrent readers.

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod secp256k1;

pub use secp256k1::{
    CurveParams, K256_FIELD_ELEMENT_SIZE, K256_POINT_COMPRESSED_SIZE,
    K256_POINT_UNCOMPRESSED_SIZE, K256_SCALAR_SIZE, SECP256K1,
};
