//! Arithmetic primitives for the secp256k1 curve
//!
//! Field arithmetic modulo p, scalar arithmetic modulo the group order n,
//! affine point operations and the compressed/uncompressed point codec.
//! Higher-level ECDSA functionality lives in `koblitz-sign`; this crate
//! knows nothing about keys, digests or signatures.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub use error::{Error, Result};

pub mod ec;
pub use ec::{base_point_g, scalar_mult, scalar_mult_base_g, FieldElement, Point, Scalar};
