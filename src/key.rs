//! Key widths supported by the codec.

use std::fmt::{Debug, Display};

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned key type the set codec can encode.
///
/// The bit engine works on `u64` internally; a key type only has to widen
/// into it and narrow back out. Implemented for `u32` and `u64`.
pub trait Key: Copy + Ord + Debug + Display + sealed::Sealed {
    /// Width of the key in bits.
    const BITS: u32;

    /// Widen to the engine's working type.
    fn to_u64(self) -> u64;

    /// Narrow from the engine's working type, or `None` if `value` does not
    /// fit.
    fn from_u64(value: u64) -> Option<Self>;
}

impl Key for u32 {
    const BITS: u32 = u32::BITS;

    #[inline]
    fn to_u64(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn from_u64(value: u64) -> Option<Self> {
        u32::try_from(value).ok()
    }
}

impl Key for u64 {
    const BITS: u32 = u64::BITS;

    #[inline]
    fn to_u64(self) -> u64 {
        self
    }

    #[inline]
    fn from_u64(value: u64) -> Option<Self> {
        Some(value)
    }
}
