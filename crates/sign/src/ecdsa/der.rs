//! ASN.1 DER codec for ECDSA signatures
//!
//! SEQUENCE { INTEGER r, INTEGER s } with single-byte lengths, which is
//! all a pair of 256-bit integers can need. Parsing is bounds-checked
//! throughout; trailing bytes after the declared sequence are tolerated.

use crate::ecdsa::Signature;
use crate::error::{Error, Result};
use alloc::vec::Vec;
use koblitz_params::K256_SCALAR_SIZE;

impl Signature {
    /// Encode as DER: SEQUENCE { INTEGER r, INTEGER s }
    ///
    /// Each component is encoded minimally, with a leading zero byte when
    /// the high bit is set so the INTEGER stays non-negative.
    pub fn to_der(&self) -> Vec<u8> {
        let r = encode_integer(&self.r);
        let s = encode_integer(&self.s);

        let mut der = Vec::with_capacity(6 + r.len() + s.len());
        der.push(0x30);
        der.push((4 + r.len() + s.len()) as u8);
        der.push(0x02);
        der.push(r.len() as u8);
        der.extend_from_slice(&r);
        der.push(0x02);
        der.push(s.len() as u8);
        der.extend_from_slice(&s);
        der
    }

    /// Parse a DER-encoded signature
    ///
    /// Structural mismatch is `MalformedSignature`; the components are
    /// returned left-zero-padded to 32 bytes without range validation,
    /// which belongs to verification.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let tag = der.first().ok_or(Error::MalformedSignature {
            reason: "empty input",
        })?;
        if *tag != 0x30 {
            return Err(Error::MalformedSignature {
                reason: "expected SEQUENCE tag",
            });
        }
        // Sequence length byte must exist; its value is not trusted for
        // slicing, the integer fields are walked directly
        if der.len() < 2 {
            return Err(Error::MalformedSignature {
                reason: "truncated sequence header",
            });
        }

        let (r, pos) = parse_integer(der, 2)?;
        let (s, _) = parse_integer(der, pos)?;

        Ok(Signature { r, s })
    }
}

/// Strip leading zeros to a minimal magnitude, then pad the high bit
fn encode_integer(bytes: &[u8; K256_SCALAR_SIZE]) -> Vec<u8> {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(K256_SCALAR_SIZE - 1);
    let minimal = &bytes[start..];

    let mut out = Vec::with_capacity(minimal.len() + 1);
    if minimal[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(minimal);
    out
}

/// Parse one INTEGER field at `pos`, returning the 32-byte left-padded
/// value and the position past it
fn parse_integer(der: &[u8], pos: usize) -> Result<([u8; K256_SCALAR_SIZE], usize)> {
    let tag = der.get(pos).ok_or(Error::MalformedSignature {
        reason: "truncated integer",
    })?;
    if *tag != 0x02 {
        return Err(Error::MalformedSignature {
            reason: "expected INTEGER tag",
        });
    }
    let len = *der.get(pos + 1).ok_or(Error::MalformedSignature {
        reason: "truncated integer length",
    })? as usize;
    if len == 0 {
        return Err(Error::MalformedSignature {
            reason: "empty integer",
        });
    }
    let body = der
        .get(pos + 2..pos + 2 + len)
        .ok_or(Error::MalformedSignature {
            reason: "integer length exceeds input",
        })?;

    // Drop sign-padding zeros, then the magnitude must fit in 32 bytes
    let mut magnitude = body;
    while magnitude.len() > 1 && magnitude[0] == 0x00 {
        magnitude = &magnitude[1..];
    }
    if magnitude.len() > K256_SCALAR_SIZE {
        return Err(Error::MalformedSignature {
            reason: "integer wider than 256 bits",
        });
    }

    let mut out = [0u8; K256_SCALAR_SIZE];
    out[K256_SCALAR_SIZE - magnitude.len()..].copy_from_slice(magnitude);
    Ok((out, pos + 2 + len))
}
