//! Golomb-Rice coded sets.
//!
//! `gcs` packs a strictly ascending set of integer keys (hashes, document
//! ids, row indices) into a bitstream far smaller than a fixed-width array:
//!
//! 1. **Delta transform**: each key is replaced by its gap to the previous
//!    key, minus one.
//! 2. **Rice coding**: each gap is split by a power-of-two divisor `2^p` into
//!    a unary quotient and a `p`-bit remainder.
//! 3. **Parameter header**: `p` is estimated from the set's density and
//!    optionally stored in a few leading bits.
//!
//! The stream has no random access and no length field. Decoding is one
//! linear pass that ends when the reader runs off the end of the input, so
//! the input must be exactly the bytes the encoder produced.
//!
//! # Layers
//!
//! - [`BitWriter`] / [`BitReader`]: MSB-first bit I/O over bounded buffers
//! - [`rice`]: single-value Rice codes
//! - [`param`]: parameter estimation
//! - [`Encoder`] / [`Decoder`]: one set per call over caller-owned buffers
//! - [`GolombSet`]: configured codec, also usable through [`KeySetCodec`]
//!
//! # Example
//!
//! ```rust
//! use gcs::{GolombSet, KeySetCodec};
//!
//! let codec = GolombSet::new();
//! let keys = vec![151u64, 192, 208, 269, 461, 512, 526];
//!
//! let compressed = codec.compress_set(&keys).unwrap();
//! let decompressed: Vec<u64> = codec.decompress_set(&compressed).unwrap();
//! assert_eq!(keys, decompressed);
//! ```
//!
//! # References
//!
//! - Golomb, S. (1966). "Run-length encodings"
//! - Rice, R. F. (1979). "Some practical universal noiseless coding techniques"
//! - Putze, F., Sanders, P., Singler, J. (2007). "Cache-, Hash- and
//!   Space-Efficient Bloom Filters" (Golomb-coded sets)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bits;
mod context;
mod error;
mod golomb;
mod key;
pub mod param;
pub mod rice;
mod traits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use bits::{BitReader, BitWriter};
pub use context::{Decoded, Decoder, Encoded, Encoder};
pub use error::{CodecError, Result};
pub use golomb::{GolombSet, GolombSetConfig, DEFAULT_HEADER_BITS, DEFAULT_SIZE_LIMIT};
pub use key::Key;
pub use traits::KeySetCodec;

/// How the encoder chooses its Rice parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParameterMode {
    /// Estimate from the largest key and the key count, clamped to what the
    /// header can hold.
    #[default]
    Auto,
    /// Use the parameter configured on the encoder.
    Fixed,
}
