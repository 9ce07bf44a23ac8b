//! # koblitz
//!
//! secp256k1 elliptic curve cryptography for Bitcoin-family blockchains.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! koblitz = "0.1"
//! ```
//!
//! Sign a caller-supplied 32-byte digest and verify it:
//!
//! ```
//! use koblitz::prelude::*;
//! use rand::rngs::OsRng;
//!
//! # fn main() -> Result<(), koblitz::sign::Error> {
//! let (public_key, secret_key) = generate_keypair(&mut OsRng)?;
//! let digest = [0x42u8; 32];
//! let signature = sign_digest(&digest, &secret_key, None)?;
//! assert!(verify_digest(&public_key, &signature, &digest)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several
//! sub-crates:
//!
//! - `koblitz-params`: secp256k1 domain parameters
//! - `koblitz-algorithms`: field, point and scalar arithmetic, point codec
//! - `koblitz-sign`: keys, ECDSA sign/verify, public-key recovery, DER
//!
//! Message framing, hashing and address encoding are deliberately out of
//! scope: every signing operation takes a 32-byte digest produced by the
//! caller.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use koblitz_algorithms as algorithms;
pub use koblitz_params as params;
pub use koblitz_sign as sign;

/// Common imports for koblitz users
pub mod prelude {
    pub use koblitz_algorithms::ec::{base_point_g, FieldElement, Point, Scalar};
    pub use koblitz_params::SECP256K1;
    pub use koblitz_sign::{
        generate_keypair, recover_public_key, sign_digest, sign_recoverable, verify_digest,
        EcdsaK256PublicKey, EcdsaK256SecretKey, RecoverableSignature, Signature,
    };
}
