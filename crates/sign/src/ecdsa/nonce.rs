//! RFC 6979 deterministic nonce derivation
//!
//! HMAC-SHA256 DRBG seeded with the private key and the digest reduced
//! modulo n (RFC 6979 §3.2, without the optional extra entropy). The
//! caller drives the candidate stream and may ask for further nonces
//! when a candidate produces a degenerate signature.

use hmac::{Hmac, Mac};
use koblitz_algorithms::ec::Scalar;
use sha2::Sha256;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-DRBG state for one (key, digest) pair
pub(crate) struct Rfc6979 {
    k: [u8; 32],
    v: [u8; 32],
    primed: bool,
}

impl Rfc6979 {
    /// Seed the DRBG: steps B through F of RFC 6979 §3.2
    pub(crate) fn new(d: &Scalar, z: &Scalar) -> Self {
        let mut v = [0x01u8; 32];
        let mut k = [0x00u8; 32];

        // K = HMAC_K(V || 0x00 || int2octets(x) || bits2octets(h1))
        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        mac.update(&[0x00]);
        mac.update(&d.serialize());
        mac.update(&z.serialize());
        k.copy_from_slice(&mac.finalize().into_bytes());

        // V = HMAC_K(V)
        v = Self::prf(&k, &v);

        // K = HMAC_K(V || 0x01 || int2octets(x) || bits2octets(h1))
        let mut mac = HmacSha256::new_from_slice(&k).expect("HMAC accepts any key length");
        mac.update(&v);
        mac.update(&[0x01]);
        mac.update(&d.serialize());
        mac.update(&z.serialize());
        k.copy_from_slice(&mac.finalize().into_bytes());

        // V = HMAC_K(V)
        v = Self::prf(&k, &v);

        Rfc6979 {
            k,
            v,
            primed: false,
        }
    }

    /// Produce the next candidate nonce in [1, n-1] (steps G and H)
    pub(crate) fn next_nonce(&mut self) -> Scalar {
        loop {
            if self.primed {
                // The previous candidate was rejected: update K and V
                let mut mac =
                    HmacSha256::new_from_slice(&self.k).expect("HMAC accepts any key length");
                mac.update(&self.v);
                mac.update(&[0x00]);
                self.k.copy_from_slice(&mac.finalize().into_bytes());
                self.v = Self::prf(&self.k, &self.v);
            }
            self.primed = true;

            self.v = Self::prf(&self.k, &self.v);
            if let Ok(candidate) = Scalar::new(self.v) {
                return candidate;
            }
        }
    }

    fn prf(k: &[u8; 32], v: &[u8; 32]) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(k).expect("HMAC accepts any key length");
        mac.update(v);
        let mut out = [0u8; 32];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }
}

impl Drop for Rfc6979 {
    fn drop(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
    }
}
