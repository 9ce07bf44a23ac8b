//! Public-key recovery from ECDSA signatures
//!
//! A recovery flag in [27, 34] pins down which of the candidate curve
//! points the ephemeral R was, letting a verifier reconstruct the signing
//! public key from (flag, r, s, digest) alone. Flags 27-30 announce an
//! uncompressed key, 31-34 a compressed one; the low two bits select the
//! candidate R.

use crate::ecdsa::{verify_digest, EcdsaK256PublicKey, EcdsaK256SecretKey, Signature};
use crate::error::{Error, Result};
use koblitz_algorithms::ec::{self, Point, Scalar};
use koblitz_params::{K256_SCALAR_SIZE, SECP256K1};

/// Lowest valid recovery flag (uncompressed key, recovery id 0)
pub const RECOVERY_FLAG_MIN: u8 = 27;

/// Highest valid recovery flag (compressed key, recovery id 3)
pub const RECOVERY_FLAG_MAX: u8 = 34;

/// Size of the compact recoverable encoding: flag || r || s
const COMPACT_SIZE: usize = 1 + 2 * K256_SCALAR_SIZE;

/// A signature bundled with its recovery flag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Recovery flag in [27, 34]
    pub flag: u8,
    /// The underlying (r, s) signature
    pub signature: Signature,
}

impl RecoverableSignature {
    /// Serialize to the 65-byte compact form: flag || r || s
    pub fn serialize_compact(&self) -> [u8; COMPACT_SIZE] {
        let mut out = [0u8; COMPACT_SIZE];
        out[0] = self.flag;
        out[1..33].copy_from_slice(&self.signature.r);
        out[33..].copy_from_slice(&self.signature.s);
        out
    }

    /// Parse the 65-byte compact form
    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPACT_SIZE {
            return Err(Error::MalformedSignature {
                reason: "compact recoverable signature must be 65 bytes",
            });
        }
        let flag = bytes[0];
        if !(RECOVERY_FLAG_MIN..=RECOVERY_FLAG_MAX).contains(&flag) {
            return Err(Error::InvalidRecoveryFlag { flag });
        }
        let mut r = [0u8; K256_SCALAR_SIZE];
        let mut s = [0u8; K256_SCALAR_SIZE];
        r.copy_from_slice(&bytes[1..33]);
        s.copy_from_slice(&bytes[33..]);
        Ok(RecoverableSignature {
            flag,
            signature: Signature { r, s },
        })
    }

    /// Whether the flag announces a compressed public key
    pub fn is_compressed(&self) -> bool {
        self.flag >= 31
    }
}

/// Recover the signing public key from a signature and its recovery flag
///
/// Computes Q = r⁻¹·(s·R − z·G) for the candidate R selected by the
/// flag. The flag is not self-certifying: the candidate is returned only
/// if it actually verifies the signature, otherwise `Ok(None)`. A flag
/// outside [27, 34] is an error.
pub fn recover_public_key(
    flag: u8,
    signature: &Signature,
    digest: &[u8; 32],
) -> Result<Option<Point>> {
    if !(RECOVERY_FLAG_MIN..=RECOVERY_FLAG_MAX).contains(&flag) {
        return Err(Error::InvalidRecoveryFlag { flag });
    }
    let recid = if flag >= 31 { flag - 31 } else { flag - 27 };

    let r = match Scalar::new(signature.r) {
        Ok(r) => r,
        Err(_) => return Ok(None),
    };
    let s = match Scalar::new(signature.s) {
        Ok(s) => s,
        Err(_) => return Ok(None),
    };

    // The ephemeral x was reduced mod n; recid's high bit says whether it
    // wrapped, i.e. x = r + (recid div 2)·n
    let x_bytes = match ephemeral_x(&signature.r, recid) {
        Some(x) => x,
        None => return Ok(None),
    };

    // Lift x back onto the curve; recid's low bit picks the y parity
    let mut encoded = [0u8; 1 + K256_SCALAR_SIZE];
    encoded[0] = if recid & 1 == 1 { 0x03 } else { 0x02 };
    encoded[1..].copy_from_slice(&x_bytes);
    let big_r = match Point::deserialize_compressed(&encoded) {
        Ok(p) => p,
        Err(_) => return Ok(None),
    };

    // Q = r⁻¹·(s·R − z·G); the z·G term drops out when z ≡ 0 (mod n)
    let z = Scalar::from_bytes_reduced(digest);
    let r_inv = r.inv_mod_n()?;
    let sr = match ec::scalar_mult(&s, &big_r) {
        Ok(p) => p,
        Err(_) => return Ok(None),
    };
    let term = if z.is_zero() {
        sr
    } else {
        let zg = match ec::scalar_mult_base_g(&z) {
            Ok(p) => p,
            Err(_) => return Ok(None),
        };
        match sr.add(&zg.negate()) {
            Ok(p) => p,
            Err(_) => return Ok(None),
        }
    };
    let q = match ec::scalar_mult(&r_inv, &term) {
        Ok(p) => p,
        Err(_) => return Ok(None),
    };

    let candidate = EcdsaK256PublicKey::from_point(&q);
    if verify_digest(&candidate, signature, digest)? {
        Ok(Some(q))
    } else {
        Ok(None)
    }
}

/// Sign a digest and find the recovery flag for the resulting signature
///
/// Runs the recovery procedure over all four recovery ids and keeps the
/// flag whose recovered key matches the signing key. `compressed` only
/// selects the flag range (31-34 instead of 27-30).
pub fn sign_recoverable(
    digest: &[u8; 32],
    secret_key: &EcdsaK256SecretKey,
    compressed: bool,
    nonce: Option<&Scalar>,
) -> Result<RecoverableSignature> {
    let signature = super::sign_digest(digest, secret_key, nonce)?;
    let expected = ec::scalar_mult_base_g(secret_key.scalar())?;

    let base = if compressed { 31 } else { 27 };
    for recid in 0..4u8 {
        let flag = base + recid;
        if let Some(recovered) = recover_public_key(flag, &signature, digest)? {
            if recovered == expected {
                return Ok(RecoverableSignature { flag, signature });
            }
        }
    }

    Err(Error::RecoveryFailed)
}

/// x-coordinate of the candidate R: r + (recid div 2)·n, or `None` when
/// the sum leaves the field
fn ephemeral_x(r_bytes: &[u8; K256_SCALAR_SIZE], recid: u8) -> Option<[u8; K256_SCALAR_SIZE]> {
    let mut x = *r_bytes;
    if recid >= 2 {
        let mut carry = 0u16;
        for i in (0..K256_SCALAR_SIZE).rev() {
            let sum = x[i] as u16 + SECP256K1.n[i] as u16 + carry;
            x[i] = sum as u8;
            carry = sum >> 8;
        }
        if carry != 0 {
            return None;
        }
    }
    // x must be a canonical field element
    for i in 0..K256_SCALAR_SIZE {
        if x[i] < SECP256K1.p[i] {
            return Some(x);
        }
        if x[i] > SECP256K1.p[i] {
            return None;
        }
    }
    None // x == p
}
