//! ECDSA signing, verification and public-key recovery over secp256k1
//!
//! Every operation works on caller-supplied 32-byte digests; hashing,
//! message framing and address encoding are outside this crate. Curve
//! and scalar arithmetic come from `koblitz-algorithms`.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub use error::{Error, Result};

pub mod ecdsa;
pub use ecdsa::{
    generate_keypair, recover_public_key, sign_digest, sign_recoverable, verify_digest,
    EcdsaK256PublicKey, EcdsaK256SecretKey, RecoverableSignature, Signature,
    RECOVERY_FLAG_MAX, RECOVERY_FLAG_MIN,
};
