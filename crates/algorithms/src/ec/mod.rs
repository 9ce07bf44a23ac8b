//! secp256k1 (Koblitz) elliptic curve primitives
//!
//! This module implements the secp256k1 group operations over affine
//! coordinates. The curve equation is y² = x³ + 7 over the prime field
//! 𝔽ₚ where:
//! - p = 2²⁵⁶ − 2³² − 977
//! - the curve order n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
//!
//! The point at infinity is not a representable value: operations that
//! would produce it return `Error::UnsupportedInfinity`.

mod field;
mod point;
mod scalar;

pub use field::FieldElement;
pub use point::Point;
pub use scalar::Scalar;

use crate::error::Result;
use koblitz_params::SECP256K1;

/// Get the standard base point G of the secp256k1 curve
pub fn base_point_g() -> Point {
    Point::new_uncompressed(&SECP256K1.g_x, &SECP256K1.g_y)
        .expect("Standard base point must be valid")
}

/// Scalar multiplication with the base point: scalar * G
pub fn scalar_mult_base_g(scalar: &Scalar) -> Result<Point> {
    let g = base_point_g();
    g.mul(scalar)
}

/// General scalar multiplication: compute scalar * point
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Result<Point> {
    point.mul(scalar)
}

#[cfg(test)]
mod tests;
