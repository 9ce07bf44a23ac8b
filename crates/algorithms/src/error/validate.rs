//! Validation utilities for the arithmetic layer

use super::{Error, Result};

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a range condition
#[inline(always)]
pub fn in_range(condition: bool, context: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::OutOfRange { context });
    }
    Ok(())
}

/// Validate an encoding condition
#[inline(always)]
pub fn encoding(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::MalformedEncoding { context, reason });
    }
    Ok(())
}
