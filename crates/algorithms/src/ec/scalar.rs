//! secp256k1 scalar arithmetic modulo the curve order n

use crate::error::{validate, Error, Result};
use koblitz_params::{K256_SCALAR_SIZE, SECP256K1};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// secp256k1 scalar value for use in elliptic curve operations
///
/// Represents integers modulo the curve order n, stored as 32 big-endian
/// bytes. Used for private keys, nonces and signature components.
/// Automatically zeroized on drop.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct Scalar([u8; K256_SCALAR_SIZE]);

impl Scalar {
    /// Create a scalar with strict range validation
    ///
    /// Accepts only values in [1, n-1]; zero and anything ≥ n are
    /// rejected. This is the constructor for private keys and nonces,
    /// which must never be reduced silently.
    pub fn new(bytes: [u8; K256_SCALAR_SIZE]) -> Result<Self> {
        if bytes.iter().all(|&b| b == 0) {
            return Err(Error::OutOfRange {
                context: "K256 Scalar",
            });
        }
        if Self::geq_order(&bytes) {
            return Err(Error::OutOfRange {
                context: "K256 Scalar",
            });
        }
        Ok(Scalar(bytes))
    }

    /// Create a scalar by reducing the input modulo n
    ///
    /// Zero is a permitted result. Used for digest conversion and
    /// intermediate arithmetic, never for key material.
    pub fn from_bytes_reduced(bytes: &[u8; K256_SCALAR_SIZE]) -> Self {
        let mut out = *bytes;
        if Self::geq_order(&out) {
            // n < 2²⁵⁶ < 2n, so a single subtraction reduces fully
            let mut borrow = 0i16;
            for i in (0..K256_SCALAR_SIZE).rev() {
                let v = out[i] as i16 - SECP256K1.n[i] as i16 - borrow;
                if v < 0 {
                    out[i] = (v + 256) as u8;
                    borrow = 1;
                } else {
                    out[i] = v as u8;
                    borrow = 0;
                }
            }
        }
        Scalar(out)
    }

    /// Internal constructor for intermediate arithmetic results,
    /// which are already reduced and may be zero.
    fn from_bytes_unchecked(bytes: [u8; K256_SCALAR_SIZE]) -> Self {
        Scalar(bytes)
    }

    /// Serialize the scalar to big-endian bytes
    pub fn serialize(&self) -> [u8; K256_SCALAR_SIZE] {
        self.0
    }

    /// Deserialize a scalar from a byte slice with strict validation
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        validate::length("K256 Scalar", bytes.len(), K256_SCALAR_SIZE)?;

        let mut scalar_bytes = [0u8; K256_SCALAR_SIZE];
        scalar_bytes.copy_from_slice(bytes);

        Self::new(scalar_bytes)
    }

    /// Check if the scalar represents zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Add two scalars modulo the curve order n
    pub fn add_mod_n(&self, other: &Self) -> Self {
        let self_limbs = Self::to_le_limbs(&self.0);
        let other_limbs = Self::to_le_limbs(&other.0);

        let mut r = [0u32; 8];
        let mut carry = 0u64;

        // Plain 256-bit add
        #[allow(clippy::needless_range_loop)] // Index used for multiple arrays
        for i in 0..8 {
            let tmp = self_limbs[i] as u64 + other_limbs[i] as u64 + carry;
            r[i] = tmp as u32;
            carry = tmp >> 32;
        }

        // If we overflowed OR r >= n, subtract n once
        if carry == 1 || Self::geq(&r, &Self::N_LIMBS) {
            Self::sub_in_place(&mut r, &Self::N_LIMBS);
        }

        Self::from_bytes_unchecked(Self::limbs_to_be(&r))
    }

    /// Multiply two scalars modulo the curve order n
    ///
    /// Uses a double-and-add accumulator, processing bits MSB first.
    pub fn mul_mod_n(&self, other: &Self) -> Self {
        let mut acc = Self::from_bytes_unchecked([0u8; K256_SCALAR_SIZE]);

        for byte in other.0 {
            for i in (0..8).rev() {
                acc = acc.add_mod_n(&acc);
                if (byte >> i) & 1 == 1 {
                    acc = acc.add_mod_n(self);
                }
            }
        }

        acc
    }

    /// Compute multiplicative inverse modulo n using Fermat's little theorem
    /// a^(-1) ≡ a^(n-2) (mod n).  Left-to-right binary exponentiation.
    pub fn inv_mod_n(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::NotInvertible);
        }

        // exponent = n - 2
        let mut exp = SECP256K1.n;
        let mut borrow = 2i16;
        for i in (0..K256_SCALAR_SIZE).rev() {
            let v = exp[i] as i16 - borrow;
            if v < 0 {
                exp[i] = (v + 256) as u8;
                borrow = 1;
            } else {
                exp[i] = v as u8;
                borrow = 0;
            }
        }

        let mut result = {
            let mut one = [0u8; K256_SCALAR_SIZE];
            one[K256_SCALAR_SIZE - 1] = 1;
            Self::from_bytes_unchecked(one)
        };
        let base = self.clone();

        for byte in exp {
            for bit in (0..8).rev() {
                result = result.mul_mod_n(&result);
                if (byte >> bit) & 1 == 1 {
                    result = result.mul_mod_n(&base);
                }
            }
        }

        Ok(result)
    }

    /// Compute the additive inverse (negation) modulo n
    ///
    /// Returns n - self when self != 0, and 0 when self is 0.
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return Self::from_bytes_unchecked([0u8; K256_SCALAR_SIZE]);
        }

        let n_limbs = Self::N_LIMBS;
        let self_limbs = Self::to_le_limbs(&self.0);
        let mut res = [0u32; 8];

        let mut borrow = 0i64;
        #[allow(clippy::needless_range_loop)] // Index used for multiple arrays
        for i in 0..8 {
            let tmp = n_limbs[i] as i64 - self_limbs[i] as i64 - borrow;
            if tmp < 0 {
                res[i] = (tmp + (1i64 << 32)) as u32;
                borrow = 1;
            } else {
                res[i] = tmp as u32;
                borrow = 0;
            }
        }

        // No borrow can occur since self < n
        debug_assert_eq!(borrow, 0);

        Self::from_bytes_unchecked(Self::limbs_to_be(&res))
    }

    // Private helpers

    /// The curve order n in little-endian limb order:
    /// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
    const N_LIMBS: [u32; 8] = [
        0xD036_4141,
        0xBFD2_5E8C,
        0xAF48_A03B,
        0xBAAE_DCE6,
        0xFFFF_FFFE,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
    ];

    /// Big-endian byte comparison against the curve order: bytes >= n ?
    fn geq_order(bytes: &[u8; K256_SCALAR_SIZE]) -> bool {
        for i in 0..K256_SCALAR_SIZE {
            if bytes[i] > SECP256K1.n[i] {
                return true;
            }
            if bytes[i] < SECP256K1.n[i] {
                return false;
            }
        }
        true // equal
    }

    /// Convert big-endian bytes to little-endian limbs
    #[inline(always)]
    fn to_le_limbs(bytes_be: &[u8; 32]) -> [u32; 8] {
        let mut limbs = [0u32; 8];

        // limb-0 must hold the 4 least-significant bytes, limb-7 the 4 most-significant
        #[allow(clippy::needless_range_loop)] // Index used for offset calculation
        for i in 0..8 {
            let start = 28 - i * 4; // index of the MS-byte of this limb
            limbs[i] = u32::from_le_bytes([
                bytes_be[start + 3],
                bytes_be[start + 2],
                bytes_be[start + 1],
                bytes_be[start],
            ]);
        }
        limbs
    }

    /// Convert little-endian limbs to big-endian bytes
    /// The inverse of to_le_limbs
    #[inline(always)]
    fn limbs_to_be(limbs: &[u32; 8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, &w) in limbs.iter().enumerate() {
            let be = w.to_le_bytes(); // limb itself is little-endian
            let start = 28 - i * 4;
            out[start] = be[3];
            out[start + 1] = be[2];
            out[start + 2] = be[1];
            out[start + 3] = be[0];
        }
        out
    }

    /// Compare two limb arrays for greater-than-or-equal
    #[inline(always)]
    fn geq(a: &[u32; 8], b: &[u32; 8]) -> bool {
        for i in (0..8).rev() {
            if a[i] > b[i] {
                return true;
            }
            if a[i] < b[i] {
                return false;
            }
        }
        true // equal
    }

    /// Subtract b from a in-place
    #[inline(always)]
    fn sub_in_place(a: &mut [u32; 8], b: &[u32; 8]) {
        let mut borrow = 0u64;
        #[allow(clippy::needless_range_loop)] // Index used for multiple arrays
        for i in 0..8 {
            let tmp = (a[i] as u64).wrapping_sub(b[i] as u64).wrapping_sub(borrow);
            a[i] = tmp as u32;
            borrow = (tmp >> 63) & 1; // 1 if we wrapped
        }
    }
}
