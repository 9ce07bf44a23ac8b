//! Constants for the secp256k1 curve
//!
//! Curve equation: y² = x³ + a·x + b over 𝔽ₚ with a = 0, b = 7.
//! All values are fixed-width 32-byte big-endian, left-zero-padded.

/// Size of a secp256k1 scalar in bytes (32 bytes = 256 bits)
pub const K256_SCALAR_SIZE: usize = 32;

/// Size of a secp256k1 field element in bytes (32 bytes = 256 bits)
pub const K256_FIELD_ELEMENT_SIZE: usize = 32;

/// Size of an uncompressed secp256k1 point in bytes: prefix byte (0x04) + x + y
pub const K256_POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * K256_FIELD_ELEMENT_SIZE; // 65 bytes

/// Size of a compressed secp256k1 point in bytes: prefix byte (0x02/0x03) + x
pub const K256_POINT_COMPRESSED_SIZE: usize = 1 + K256_FIELD_ELEMENT_SIZE; // 33 bytes

/// The secp256k1 domain parameter set
///
/// Coordinates and moduli are big-endian byte arrays; the arithmetic crates
/// convert them into their own limb representations on demand.
pub struct CurveParams {
    /// Curve coefficient a (zero for secp256k1)
    pub a: [u8; K256_FIELD_ELEMENT_SIZE],
    /// Curve coefficient b (seven for secp256k1)
    pub b: [u8; K256_FIELD_ELEMENT_SIZE],
    /// Prime field modulus p = 2²⁵⁶ − 2³² − 977
    pub p: [u8; K256_FIELD_ELEMENT_SIZE],
    /// Order n of the base point G (a 256-bit prime)
    pub n: [u8; K256_SCALAR_SIZE],
    /// x-coordinate of the generator point G
    pub g_x: [u8; K256_FIELD_ELEMENT_SIZE],
    /// y-coordinate of the generator point G
    pub g_y: [u8; K256_FIELD_ELEMENT_SIZE],
}

/// The secp256k1 curve parameters (SEC 2, version 2.0)
pub const SECP256K1: CurveParams = CurveParams {
    a: [0u8; K256_FIELD_ELEMENT_SIZE],
    b: [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x07,
    ],
    p: [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
        0xFC, 0x2F,
    ],
    n: [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ],
    g_x: [
        0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B,
        0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8,
        0x17, 0x98,
    ],
    g_y: [
        0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08,
        0xA8, 0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10,
        0xD4, 0xB8,
    ],
};
