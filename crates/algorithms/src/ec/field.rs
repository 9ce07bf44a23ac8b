//! secp256k1 field arithmetic implementation

use crate::error::{Error, Result};
use koblitz_params::K256_FIELD_ELEMENT_SIZE;
use subtle::{Choice, ConditionallySelectable};

/// Number of 32-bit limbs for a secp256k1 field element (8 × 32 = 256 bits)
const NLIMBS: usize = 8;

/// secp256k1 field element representing values in 𝔽ₚ, where
/// p = 2²⁵⁶ − 2³² − 977.
/// Internally stored as 8 little-endian 32-bit limbs, always canonical
/// (reduced below p).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) [u32; NLIMBS]);

impl FieldElement {
    /// p = 0xFFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F
    /// which equals 2²⁵⁶ − 2³² − 977.
    /// Stored as eight 32-bit words, little-endian.
    pub(crate) const MOD_LIMBS: [u32; NLIMBS] = [
        0xFFFFFC2F, // least significant
        0xFFFFFFFE, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFF, // most significant
    ];

    /// Build a field element from a small literal (`0 ≤ n < 2³²`)
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = n;
        FieldElement(limbs)
    }

    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement([0u32; NLIMBS])
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = 1;
        FieldElement(limbs)
    }

    /// Create a field element from big-endian bytes.
    /// Validates that the value < p. Returns Err if ≥ p.
    pub fn from_bytes(bytes: &[u8; K256_FIELD_ELEMENT_SIZE]) -> Result<Self> {
        // Convert big-endian → little-endian limbs
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }
        let (_, borrow) = Self::sbb8(limbs, Self::MOD_LIMBS);
        if borrow == 0 {
            // limbs ≥ p
            return Err(Error::OutOfRange {
                context: "K256 FieldElement",
            });
        }
        Ok(FieldElement(limbs))
    }

    /// Convert this field element into big-endian bytes.
    pub fn to_bytes(&self) -> [u8; K256_FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; K256_FIELD_ELEMENT_SIZE];
        for (i, &limb) in self.0.iter().enumerate() {
            let limb_bytes = limb.to_be_bytes();
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb_bytes);
        }
        out
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Return true if the element is odd (least-significant bit = 1).
    pub fn is_odd(&self) -> bool {
        (self.0[0] & 1) == 1
    }

    /// Constant-time addition: (self + other) mod p
    pub fn add(&self, other: &Self) -> Self {
        let (sum, carry) = Self::adc8(self.0, other.0);

        // If carry = 1 or sum >= p, subtract p
        let (reduced, borrow) = Self::sbb8(sum, Self::MOD_LIMBS);
        let need_reduce = (carry | (borrow ^ 1)) & 1;

        Self::conditional_select(&sum, &reduced, Choice::from(need_reduce as u8))
    }

    /// Constant-time subtraction: (self - other) mod p
    pub fn sub(&self, other: &Self) -> Self {
        let (diff, borrow) = Self::sbb8(self.0, other.0);
        // If borrow == 1, we add p back
        let (diff_plus_p, _) = Self::adc8(diff, Self::MOD_LIMBS);
        Self::conditional_select(&diff, &diff_plus_p, Choice::from(borrow as u8))
    }

    /// Doubling: (2·self) mod p
    #[inline(always)]
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Field multiplication: (self * other) mod p
    /// Implements schoolbook 8×8 → 16-limb product, then reduction
    pub fn mul(&self, other: &Self) -> Self {
        // Phase 1: 8×8 → 16 128-bit partial accumulators
        let mut t = [0u128; NLIMBS * 2];
        for i in 0..NLIMBS {
            for j in 0..NLIMBS {
                t[i + j] += (self.0[i] as u128) * (other.0[j] as u128);
            }
        }

        // Phase 2: Carry-propagate into 16 × u32 limbs
        let mut wide = [0u32; NLIMBS * 2];
        let mut carry: u128 = 0;
        for i in 0..(NLIMBS * 2) {
            let v = t[i] + carry;
            wide[i] = (v & 0xFFFF_FFFF) as u32;
            carry = v >> 32;
        }

        // Phase 3: Reduce 16 limbs → 8 limbs mod p
        Self::reduce_wide(wide)
    }

    /// Field squaring: (self²) mod p
    #[inline(always)]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Modular exponentiation: self^exp mod p, with a big-endian exponent.
    /// Left-to-right binary square-and-multiply.
    pub fn pow(&self, exp: &[u8; K256_FIELD_ELEMENT_SIZE]) -> Self {
        let mut result = FieldElement::one();
        let base = self.clone();

        for &byte in exp.iter() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
            }
        }

        result
    }

    /// Compute multiplicative inverse via Fermat: a^(p-2) mod p
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::NotInvertible);
        }

        // p - 2 = FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2D
        const P_MINUS_2: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
            0xFF, 0xFF, 0xFC, 0x2D,
        ];

        Ok(self.pow(&P_MINUS_2))
    }

    /// Negate this field element: returns p - self if non-zero, else zero
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            self.clone()
        } else {
            FieldElement::zero().sub(self)
        }
    }

    /// Compute square root using the fact that p ≡ 3 (mod 4).
    /// For such primes, sqrt(x) = x^((p+1)/4). Returns `None` when the
    /// element is a non-residue.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(FieldElement::zero());
        }

        // (p + 1) / 4 = 3FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFBFFFFF0C
        const EXP: [u8; 32] = [
            0x3F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xBF, 0xFF, 0xFF, 0x0C,
        ];

        let result = self.pow(&EXP);

        // Verify that result^2 == self
        if result.square() == *self {
            Some(result)
        } else {
            None
        }
    }

    /// 8-limb addition with carry
    #[inline(always)]
    fn adc8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut carry = 0u64;
        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let tmp = (a_limb as u64) + (b_limb as u64) + carry;
            *r_limb = (tmp & 0xFFFF_FFFF) as u32;
            carry = tmp >> 32;
        }
        (r, carry as u32)
    }

    /// 8-limb subtraction with borrow (constant-time)
    #[inline(always)]
    fn sbb8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut borrow = 0u32;

        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let ai = a_limb as u64;
            let bi = b_limb as u64;
            let tmp = ai.wrapping_sub(bi + borrow as u64);

            *r_limb = tmp as u32;

            // New borrow = 1  iff  ai < bi + old_borrow
            borrow = (ai < bi + borrow as u64) as u32;
        }

        (r, borrow)
    }

    /// Constant-time select: if flag == 0 return a else return b
    fn conditional_select(a: &[u32; NLIMBS], b: &[u32; NLIMBS], flag: Choice) -> Self {
        let mut out = [0u32; NLIMBS];
        for ((a_limb, b_limb), out_limb) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
            *out_limb = u32::conditional_select(a_limb, b_limb, flag);
        }
        FieldElement(out)
    }

    /// Reduce a 16-word (512-bit) value modulo p = 2²⁵⁶ − 2³² − 977.
    ///
    /// Uses the congruence 2²⁵⁶ ≡ 2³² + 977 (mod p): the high half folds
    /// into the low half as high·(2³² + 977), followed by conditional
    /// subtractions of p.
    fn reduce_wide(t: [u32; 16]) -> FieldElement {
        // r = low + high·977 + high·2³²  (nine limbs to hold the spill)
        let mut r = [0u64; NLIMBS + 1];
        for (i, r_limb) in r.iter_mut().take(NLIMBS).enumerate() {
            *r_limb = t[i] as u64;
        }
        for j in 0..NLIMBS {
            let hi = t[j + NLIMBS] as u64;
            r[j] += hi * 977;
            r[j + 1] += hi;
        }

        // Propagate carries once over the nine limbs
        let mut carry = 0u64;
        for limb in &mut r {
            let tmp = *limb + carry;
            *limb = tmp & 0xFFFF_FFFF;
            carry = tmp >> 32;
        }

        // Fold the overflow back in with the same congruence; the final
        // carry sits one limb above r[8]
        let mut extra = r[NLIMBS] + (carry << 32);
        while extra != 0 {
            r[NLIMBS] = 0;
            r[0] += extra * 977;
            r[1] += extra;
            let mut c = 0u64;
            for limb in r.iter_mut().take(NLIMBS) {
                let tmp = *limb + c;
                *limb = tmp & 0xFFFF_FFFF;
                c = tmp >> 32;
            }
            extra = c;
        }

        // At most two conditional subtractions of p
        let mut out = [0u32; NLIMBS];
        for (i, out_limb) in out.iter_mut().enumerate() {
            *out_limb = r[i] as u32;
        }

        for _ in 0..2 {
            let (sub, borrow) = Self::sbb8(out, Self::MOD_LIMBS);
            // if borrow == 0 → out ≥ p → use the subtracted value
            let selected = Self::conditional_select(&out, &sub, Choice::from((borrow ^ 1) as u8));
            out = selected.0;
        }

        FieldElement(out)
    }
}
