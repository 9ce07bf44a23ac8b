//! secp256k1 affine point operations
//!
//! Points are always finite affine coordinates on y² = x³ + 7. The point
//! at infinity has no representation here; any group operation that would
//! produce it fails with `UnsupportedInfinity` instead.

use crate::ec::{field::FieldElement, scalar::Scalar};
use crate::error::{validate, Error, Result};
use koblitz_params::{
    K256_FIELD_ELEMENT_SIZE, K256_POINT_COMPRESSED_SIZE, K256_POINT_UNCOMPRESSED_SIZE,
};

/// A finite point on the secp256k1 curve in affine coordinates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Point {
    /// Create a new point from uncompressed coordinates.
    ///
    /// Returns an error if the coordinates don't satisfy the curve equation.
    pub fn new_uncompressed(
        x: &[u8; K256_FIELD_ELEMENT_SIZE],
        y: &[u8; K256_FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x_fe = FieldElement::from_bytes(x)?;
        let y_fe = FieldElement::from_bytes(y)?;
        if !Self::is_on_curve(&x_fe, &y_fe) {
            return Err(Error::MalformedEncoding {
                context: "K256 Point",
                reason: "coordinates do not satisfy the curve equation",
            });
        }
        Ok(Point { x: x_fe, y: y_fe })
    }

    /// Check that this point satisfies the curve equation.
    pub fn is_valid(&self) -> bool {
        Self::is_on_curve(&self.x, &self.y)
    }

    /// Get the x-coordinate of this point as big-endian bytes.
    pub fn x_coordinate_bytes(&self) -> [u8; K256_FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// Get the y-coordinate of this point as big-endian bytes.
    pub fn y_coordinate_bytes(&self) -> [u8; K256_FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Serialize this point in uncompressed format: 0x04 || x || y.
    pub fn serialize_uncompressed(&self) -> [u8; K256_POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; K256_POINT_UNCOMPRESSED_SIZE];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x.to_bytes());
        out[33..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Deserialize a point from uncompressed format.
    ///
    /// Returns an error if the bytes don't represent a valid point.
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length(
            "K256 Uncompressed Point",
            bytes.len(),
            K256_POINT_UNCOMPRESSED_SIZE,
        )?;
        validate::encoding(
            bytes[0] == 0x04,
            "K256 Point",
            "invalid uncompressed point prefix (expected 0x04)",
        )?;

        let mut x_bytes = [0u8; K256_FIELD_ELEMENT_SIZE];
        let mut y_bytes = [0u8; K256_FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(&bytes[1..33]);
        y_bytes.copy_from_slice(&bytes[33..65]);

        Self::new_uncompressed(&x_bytes, &y_bytes)
    }

    /// Serialize this point in compressed format: 0x02/0x03 || x.
    ///
    /// The prefix byte records the parity of y.
    pub fn serialize_compressed(&self) -> [u8; K256_POINT_COMPRESSED_SIZE] {
        let mut out = [0u8; K256_POINT_COMPRESSED_SIZE];
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    /// Deserialize a point from compressed format.
    ///
    /// Recovers y from x via a modular square root and picks the root
    /// whose parity matches the prefix byte.
    pub fn deserialize_compressed(bytes: &[u8]) -> Result<Self> {
        validate::length(
            "K256 Compressed Point",
            bytes.len(),
            K256_POINT_COMPRESSED_SIZE,
        )?;
        let tag = bytes[0];
        validate::encoding(
            tag == 0x02 || tag == 0x03,
            "K256 Point",
            "invalid compressed point prefix (expected 0x02 or 0x03)",
        )?;

        let mut x_bytes = [0u8; K256_FIELD_ELEMENT_SIZE];
        x_bytes.copy_from_slice(&bytes[1..]);
        let x_fe = FieldElement::from_bytes(&x_bytes)?;

        // y² = x³ + 7
        let rhs = x_fe.square().mul(&x_fe).add(&FieldElement::from_u32(7));
        let y_fe = rhs.sqrt().ok_or(Error::NoSquareRoot)?;

        let want_odd = tag == 0x03;
        let y_final = if y_fe.is_odd() == want_odd {
            y_fe
        } else {
            y_fe.negate()
        };
        Ok(Point {
            x: x_fe,
            y: y_final,
        })
    }

    /// Reflect this point across the x-axis: (x, p − y).
    pub fn negate(&self) -> Self {
        Point {
            x: self.x.clone(),
            y: self.y.negate(),
        }
    }

    /// Double a point (add it to itself).
    ///
    /// Fails with `UnsupportedInfinity` when y = 0, where the tangent is
    /// vertical.
    pub fn double(&self) -> Result<Self> {
        if self.y.is_zero() {
            return Err(Error::UnsupportedInfinity);
        }

        // λ = (3·x²) / (2·y)   (curve coefficient a is zero)
        let x_sq = self.x.square();
        let three_x_sq = x_sq.add(&x_sq).add(&x_sq);
        let lambda = three_x_sq.mul(&self.y.double().invert()?);

        // x₂ = λ² − 2·x₁
        let x3 = lambda.square().sub(&self.x.double());

        // y₂ = λ·(x₁ − x₂) − y₁
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);

        Ok(Point { x: x3, y: y3 })
    }

    /// Add two points using the affine group law.
    ///
    /// Fails with `UnsupportedInfinity` when the points are inverses of
    /// each other (equal x, opposite y).
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            }
            // Opposite y: the chord is vertical
            return Err(Error::UnsupportedInfinity);
        }

        // λ = (y₂ − y₁) / (x₂ − x₁)
        let lambda = other
            .y
            .sub(&self.y)
            .mul(&other.x.sub(&self.x).invert()?);

        // x₃ = λ² − x₁ − x₂
        let x3 = lambda.square().sub(&self.x).sub(&other.x);

        // y₃ = λ·(x₁ − x₃) − y₁
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);

        Ok(Point { x: x3, y: y3 })
    }

    /// Scalar multiplication: compute scalar * self.
    ///
    /// Binary double-and-add, MSB first. The scalar must be nonzero;
    /// multiplying by zero would yield the point at infinity.
    pub fn mul(&self, scalar: &Scalar) -> Result<Self> {
        if scalar.is_zero() {
            return Err(Error::UnsupportedInfinity);
        }

        let scalar_bytes = scalar.serialize();
        let mut acc: Option<Point> = None;
        for byte in scalar_bytes.iter() {
            for bit_pos in (0..8).rev() {
                let bit = (byte >> bit_pos) & 1 == 1;
                acc = match acc {
                    None => {
                        if bit {
                            Some(self.clone())
                        } else {
                            None
                        }
                    }
                    Some(p) => {
                        let doubled = p.double()?;
                        if bit {
                            Some(doubled.add(self)?)
                        } else {
                            Some(doubled)
                        }
                    }
                };
            }
        }

        // The scalar is nonzero, so at least one bit seeded the accumulator
        acc.ok_or(Error::UnsupportedInfinity)
    }

    /// Curve membership test: y² == x³ + 7 in 𝔽ₚ
    fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        let y_sq = y.square();
        let rhs = x.square().mul(x).add(&FieldElement::from_u32(7));
        y_sq == rhs
    }
}
