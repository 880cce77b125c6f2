//! Rice parameter selection.
//!
//! For `n` keys spread roughly uniformly over `[0, max_key]` the gaps are
//! close to geometric with mean `max_key / n`. The best Rice divisor for such
//! a distribution is the largest power of two not exceeding that mean, so the
//! parameter is the index of its highest set bit.

use tracing::trace;

use crate::error::{CodecError, Result};

/// Widest parameter header the codec accepts, in bits.
///
/// Six bits address parameters `0..=63`, enough for any 64-bit key.
pub const MAX_HEADER_BITS: u32 = 6;

/// Largest parameter a `header_bits`-wide header can carry. Widths past
/// [`MAX_HEADER_BITS`] are treated as `MAX_HEADER_BITS`.
#[must_use]
#[inline]
pub fn max_parameter(header_bits: u32) -> u32 {
    (1u32 << header_bits.min(MAX_HEADER_BITS)) - 1
}

/// Estimate the Rice parameter for `count` keys whose largest value is
/// `max_key`.
///
/// The result is clamped to [`max_parameter`]`(header_bits)`, so with no
/// header at all it is always zero.
#[must_use]
pub fn estimate(max_key: u64, count: usize, header_bits: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    let mean_gap = max_key / count as u64;
    if mean_gap < 1 {
        return 0;
    }
    let parameter = (u64::BITS - 1 - mean_gap.leading_zeros()).min(max_parameter(header_bits));
    trace!(max_key, count, mean_gap, parameter, "estimated rice parameter");
    parameter
}

/// Check a header width and a fixed parameter against each other.
pub(crate) fn validate(header_bits: u32, parameter: u32) -> Result<()> {
    if header_bits > MAX_HEADER_BITS {
        return Err(CodecError::InvalidConfig(format!(
            "header width {header_bits} exceeds {MAX_HEADER_BITS} bits"
        )));
    }
    if parameter >= u64::BITS {
        return Err(CodecError::InvalidConfig(format!(
            "parameter {parameter} exceeds {}",
            u64::BITS - 1
        )));
    }
    if header_bits > 0 && parameter > max_parameter(header_bits) {
        return Err(CodecError::InvalidConfig(format!(
            "parameter {parameter} does not fit a {header_bits}-bit header"
        )));
    }
    Ok(())
}
