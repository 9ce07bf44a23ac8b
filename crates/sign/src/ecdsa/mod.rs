//! ECDSA over secp256k1
//!
//! Key generation, signing, verification and public-key recovery, all
//! working on caller-supplied 32-byte digests. Message hashing and
//! address derivation belong to the caller.

use crate::error::{Error, Result};
use koblitz_algorithms::ec::{self, Point, Scalar};
use koblitz_params::{
    K256_POINT_COMPRESSED_SIZE, K256_POINT_UNCOMPRESSED_SIZE, K256_SCALAR_SIZE,
};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

#[cfg(feature = "alloc")]
mod der;
mod nonce;
mod recovery;

pub use recovery::{
    recover_public_key, sign_recoverable, RecoverableSignature, RECOVERY_FLAG_MAX,
    RECOVERY_FLAG_MIN,
};

/// secp256k1 public key held in uncompressed format (0x04 || X || Y)
///
/// Curve membership is validated on every import path.
#[derive(Clone, Zeroize)]
pub struct EcdsaK256PublicKey([u8; K256_POINT_UNCOMPRESSED_SIZE]);

impl EcdsaK256PublicKey {
    /// Wrap a curve point as a public key
    pub fn from_point(point: &Point) -> Self {
        EcdsaK256PublicKey(point.serialize_uncompressed())
    }

    /// Import a public key from its uncompressed or compressed encoding
    ///
    /// Accepts 65-byte uncompressed (0x04-prefixed) or 33-byte compressed
    /// (0x02/0x03-prefixed) encodings and validates that the coordinates
    /// lie on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = if bytes.len() == K256_POINT_COMPRESSED_SIZE {
            Point::deserialize_compressed(bytes)?
        } else {
            Point::deserialize_uncompressed(bytes)?
        };
        Ok(Self::from_point(&point))
    }

    /// Decode the stored bytes back into a curve point
    pub fn to_point(&self) -> Result<Point> {
        Ok(Point::deserialize_uncompressed(&self.0)?)
    }

    /// Export in uncompressed format: 0x04 || X || Y
    pub fn serialize_uncompressed(&self) -> [u8; K256_POINT_UNCOMPRESSED_SIZE] {
        self.0
    }

    /// Export in compressed format: 0x02/0x03 || X
    pub fn serialize_compressed(&self) -> Result<[u8; K256_POINT_COMPRESSED_SIZE]> {
        Ok(self.to_point()?.serialize_compressed())
    }
}

impl AsRef<[u8]> for EcdsaK256PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// secp256k1 secret key
///
/// Contains both the raw scalar value and its byte representation
/// for efficient operations. The scalar d must satisfy 1 ≤ d ≤ n-1
/// where n is the order of the base point G.
#[derive(Clone)]
pub struct EcdsaK256SecretKey {
    raw: Scalar,
    bytes: [u8; K256_SCALAR_SIZE],
}

impl Zeroize for EcdsaK256SecretKey {
    fn zeroize(&mut self) {
        // The raw Scalar zeroizes itself on drop
        self.bytes.zeroize();
    }
}

impl Drop for EcdsaK256SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl AsRef<[u8]> for EcdsaK256SecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl EcdsaK256SecretKey {
    /// Import a secret key from its 32 big-endian bytes
    ///
    /// The value must lie in [1, n-1]; anything else is rejected.
    pub fn from_bytes(bytes: [u8; K256_SCALAR_SIZE]) -> Result<Self> {
        let raw = Scalar::new(bytes)?;
        Ok(EcdsaK256SecretKey { raw, bytes })
    }

    /// Derive the public key Q = d·G
    pub fn public_key(&self) -> Result<EcdsaK256PublicKey> {
        let point = ec::scalar_mult_base_g(&self.raw)?;
        Ok(EcdsaK256PublicKey::from_point(&point))
    }

    /// Export the key bytes (big-endian)
    pub fn serialize(&self) -> [u8; K256_SCALAR_SIZE] {
        self.bytes
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.raw
    }

    fn is_cleared(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

/// An ECDSA signature as its raw (r, s) components
///
/// Both components are 32 big-endian bytes, left-zero-padded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The r component: (k·G).x mod n
    pub r: [u8; K256_SCALAR_SIZE],
    /// The s component: k⁻¹(z + r·d) mod n
    pub s: [u8; K256_SCALAR_SIZE],
}

/// Generate an ECDSA keypair from the supplied RNG
///
/// Entropy is drawn from the RNG, hashed with SHA-256 into a candidate
/// scalar and rejected until the candidate lands in [1, n-1]. A failing
/// RNG surfaces as `WeakRandomSource`.
pub fn generate_keypair<R: CryptoRng + RngCore>(
    rng: &mut R,
) -> Result<(EcdsaK256PublicKey, EcdsaK256SecretKey)> {
    let mut entropy = [0u8; K256_SCALAR_SIZE];
    loop {
        rng.try_fill_bytes(&mut entropy)
            .map_err(|_| Error::WeakRandomSource)?;

        let mut candidate = [0u8; K256_SCALAR_SIZE];
        candidate.copy_from_slice(&Sha256::digest(entropy));
        entropy.zeroize();

        match EcdsaK256SecretKey::from_bytes(candidate) {
            Ok(secret_key) => {
                candidate.zeroize();
                let public_key = secret_key.public_key()?;
                return Ok((public_key, secret_key));
            }
            Err(_) => {
                candidate.zeroize();
                continue;
            }
        }
    }
}

/// Sign a 32-byte digest with ECDSA
///
/// The nonce defaults to RFC 6979 deterministic derivation from the key
/// and digest, retrying internally if a candidate yields a zero r or s.
/// An explicit nonce is honored verbatim; if it yields a zero component
/// the call fails with `InvalidNonce` instead of substituting another.
pub fn sign_digest(
    digest: &[u8; 32],
    secret_key: &EcdsaK256SecretKey,
    nonce: Option<&Scalar>,
) -> Result<Signature> {
    if secret_key.is_cleared() {
        return Err(Error::NoPrivateKey);
    }

    let z = Scalar::from_bytes_reduced(digest);
    let d = secret_key.scalar();

    match nonce {
        Some(k) => sign_with_nonce(&z, d, k)?.ok_or(Error::InvalidNonce),
        None => {
            let mut drbg = nonce::Rfc6979::new(d, &z);
            loop {
                let k = drbg.next_nonce();
                if let Some(sig) = sign_with_nonce(&z, d, &k)? {
                    return Ok(sig);
                }
            }
        }
    }
}

/// One signing attempt with a fixed nonce
///
/// Returns `Ok(None)` when r or s comes out zero, which callers treat as
/// a retry (deterministic path) or a hard failure (explicit nonce).
fn sign_with_nonce(z: &Scalar, d: &Scalar, k: &Scalar) -> Result<Option<Signature>> {
    // (x₁, y₁) = k·G, r = x₁ mod n
    let kg = ec::scalar_mult_base_g(k)?;
    let r = Scalar::from_bytes_reduced(&kg.x_coordinate_bytes());
    if r.is_zero() {
        return Ok(None);
    }

    // s = k⁻¹(z + r·d) mod n
    let k_inv = k.inv_mod_n()?;
    let s = k_inv.mul_mod_n(&z.add_mod_n(&r.mul_mod_n(d)));
    if s.is_zero() {
        return Ok(None);
    }

    Ok(Some(Signature {
        r: r.serialize(),
        s: s.serialize(),
    }))
}

/// Verify an ECDSA signature over a 32-byte digest
///
/// Computes u₁ = z·s⁻¹, u₂ = r·s⁻¹ and accepts iff (u₁·G + u₂·Q).x ≡ r
/// (mod n). Any cryptographic mismatch, including out-of-range components
/// and a would-be-infinity verification point, yields `Ok(false)`; errors
/// are reserved for a malformed public key.
pub fn verify_digest(
    public_key: &EcdsaK256PublicKey,
    signature: &Signature,
    digest: &[u8; 32],
) -> Result<bool> {
    let q = public_key.to_point()?;

    // r and s must be in [1, n-1]
    let r = match Scalar::new(signature.r) {
        Ok(r) => r,
        Err(_) => return Ok(false),
    };
    let s = match Scalar::new(signature.s) {
        Ok(s) => s,
        Err(_) => return Ok(false),
    };

    let z = Scalar::from_bytes_reduced(digest);

    let s_inv = match s.inv_mod_n() {
        Ok(inv) => inv,
        Err(_) => return Ok(false),
    };
    let u1 = z.mul_mod_n(&s_inv);
    let u2 = r.mul_mod_n(&s_inv);

    // u₂ is nonzero since r and s⁻¹ are; u₁ is zero iff z ≡ 0 (mod n),
    // in which case the u₁·G term drops out
    let u2q = match ec::scalar_mult(&u2, &q) {
        Ok(p) => p,
        Err(_) => return Ok(false),
    };
    let sum = if u1.is_zero() {
        u2q
    } else {
        let u1g = match ec::scalar_mult_base_g(&u1) {
            Ok(p) => p,
            Err(_) => return Ok(false),
        };
        match u1g.add(&u2q) {
            Ok(p) => p,
            Err(_) => return Ok(false),
        }
    };

    let v = Scalar::from_bytes_reduced(&sum.x_coordinate_bytes());
    Ok(v.serialize() == r.serialize())
}
