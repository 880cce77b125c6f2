//! Golomb-Rice coded sets.
//!
//! A sorted set of `n` keys drawn from `[0, N]` has gaps averaging `N / n`.
//! Rice coding each gap with parameter `p = floor(log2(N / n))` costs about
//! `p + 2` bits per key, within a fraction of a bit of the
//! `log2(C(N, n)) / n` lower bound for uniformly random sets.
//!
//! The price is access: there is no index, so a set is decoded in one
//! linear pass, and the stream carries no length, so it must be stored or
//! sent with its exact byte length.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::context::{validate_keys, Decoded, Decoder, Encoded, Encoder};
use crate::error::{CodecError, Result};
use crate::key::Key;
use crate::param;
use crate::rice::value_len;
use crate::traits::KeySetCodec;
use crate::ParameterMode;

/// Header width used by [`GolombSet::new`]: parameters up to 31.
pub const DEFAULT_HEADER_BITS: u32 = 5;

/// Largest stream, in bytes, the allocating helpers will size a buffer for.
///
/// A single large key with a small parameter can need a unary run of
/// billions of bits, so sizing is bounded before anything is allocated.
pub const DEFAULT_SIZE_LIMIT: usize = 1 << 24; // 16 MiB

/// Codec settings. Encoder and decoder must agree on them out of band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GolombSetConfig {
    /// Width of the parameter header in bits, `0..=6`. Zero omits the header.
    pub header_bits: u32,
    /// Parameter for [`ParameterMode::Fixed`]; with no header, also the
    /// parameter the decoder assumes.
    pub parameter: u32,
    /// How the encoder picks its parameter.
    pub mode: ParameterMode,
    /// Upper bound on [`GolombSet::encoded_len`] and the buffers
    /// [`GolombSet::encode_to_vec`] allocates.
    pub size_limit: usize,
}

impl Default for GolombSetConfig {
    fn default() -> Self {
        Self {
            header_bits: DEFAULT_HEADER_BITS,
            parameter: 0,
            mode: ParameterMode::Auto,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

/// Golomb-Rice coded set codec.
///
/// # Example
///
/// ```rust
/// use gcs::GolombSet;
///
/// let codec = GolombSet::new();
/// let keys = [151u32, 192, 208, 269, 461];
///
/// let mut buf = [0u8; 64];
/// let encoded = codec.encode(&keys, &mut buf).unwrap();
///
/// let mut out = [0u32; 5];
/// let decoded = codec.decode(&buf[..encoded.len], &mut out).unwrap();
/// assert_eq!(decoded.count, 5);
/// assert_eq!(out, keys);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GolombSet {
    config: GolombSetConfig,
}

impl GolombSet {
    /// Codec with a 5-bit header and estimated parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec from explicit settings.
    pub fn from_config(config: GolombSetConfig) -> Result<Self> {
        param::validate(config.header_bits, config.parameter)?;
        Ok(Self { config })
    }

    /// Codec with estimated parameters and a `header_bits`-wide header.
    pub fn with_header_bits(header_bits: u32) -> Result<Self> {
        Self::from_config(GolombSetConfig {
            header_bits,
            ..GolombSetConfig::default()
        })
    }

    /// Codec that always uses `parameter`.
    ///
    /// With `header_bits == 0` the parameter is not stored, and the decoding
    /// side must be built with the same value.
    pub fn with_fixed_parameter(header_bits: u32, parameter: u32) -> Result<Self> {
        Self::from_config(GolombSetConfig {
            header_bits,
            parameter,
            mode: ParameterMode::Fixed,
            ..GolombSetConfig::default()
        })
    }

    /// Replace the size bound of the allocating helpers.
    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.config.size_limit = size_limit;
        self
    }

    /// Current settings.
    pub fn config(&self) -> &GolombSetConfig {
        &self.config
    }

    /// Parameter the encoder will pick for `keys`.
    pub fn parameter_for<K: Key>(&self, keys: &[K]) -> u32 {
        match self.config.mode {
            ParameterMode::Auto => param::estimate(
                keys.last().map_or(0, |key| key.to_u64()),
                keys.len(),
                self.config.header_bits,
            ),
            ParameterMode::Fixed => self.config.parameter,
        }
    }

    /// Exact number of bytes [`encode`](Self::encode) produces for `keys`.
    ///
    /// Fails with [`CodecError::SizeLimitExceeded`] if that is more than the
    /// configured size limit.
    pub fn encoded_len<K: Key>(&self, keys: &[K]) -> Result<usize> {
        validate_keys(keys)?;
        self.sized_len(keys)
    }

    /// [`encoded_len`](Self::encoded_len) for keys already known to be
    /// strictly ascending.
    fn sized_len<K: Key>(&self, keys: &[K]) -> Result<usize> {
        let parameter = self.parameter_for(keys);

        let mut bits = u64::from(self.config.header_bits);
        let mut next_min = 0u64;
        for key in keys {
            let key = key.to_u64();
            bits = bits.saturating_add(value_len(key - next_min, parameter));
            next_min = key.wrapping_add(1);
        }

        // A stream always occupies at least the byte the writer starts on.
        let bytes = bits.div_ceil(8).max(1);
        let limit = self.config.size_limit;
        usize::try_from(bytes)
            .ok()
            .filter(|&bytes| bytes <= limit)
            .ok_or(CodecError::SizeLimitExceeded {
                needed: bytes,
                limit,
            })
    }

    /// Encode `keys` (strictly ascending) into `dst`.
    ///
    /// Only `dst[..len]` of the returned [`Encoded`] is meaningful; pass
    /// exactly that range to [`decode`](Self::decode).
    pub fn encode<K: Key>(&self, keys: &[K], dst: &mut [u8]) -> Result<Encoded> {
        Encoder::new(dst, self.config.header_bits)?
            .with_parameter(self.config.parameter)?
            .encode(keys, self.config.mode)
    }

    /// Decode `src` into the front of `out`.
    ///
    /// `src` must be exactly the range an encoder reported. Decoding stops
    /// at the end of `src`, so trailing bytes or a truncated stream change
    /// the result without an error.
    pub fn decode<K: Key>(&self, src: &[u8], out: &mut [K]) -> Result<Decoded> {
        Decoder::new(src, self.config.header_bits)?
            .with_parameter(self.config.parameter)?
            .decode(out)
    }

    /// Encode `keys` into a buffer sized by [`encoded_len`](Self::encoded_len).
    pub fn encode_to_vec<K: Key>(&self, keys: &[K]) -> Result<Vec<u8>> {
        validate_keys(keys)?;
        let mut buf = vec![0u8; self.sized_len(keys)?];
        let encoded = Encoder::new(&mut buf, self.config.header_bits)?
            .with_parameter(self.config.parameter)?
            .encode_ascending(keys, self.config.mode)?;
        debug_assert_eq!(encoded.len, buf.len());
        buf.truncate(encoded.len);
        Ok(buf)
    }

    /// Decode `src` into a new vector.
    pub fn decode_to_vec<K: Key>(&self, src: &[u8]) -> Result<Vec<K>> {
        let mut keys = Vec::new();
        Decoder::new(src, self.config.header_bits)?
            .with_parameter(self.config.parameter)?
            .decode_to_vec(&mut keys)?;
        Ok(keys)
    }

    /// Expected encoded bits for `num_keys` keys spread over `[0, max_key]`.
    ///
    /// Each key costs its terminator and `p` remainder bits. The stored gaps
    /// sum to `max_key - (num_keys - 1)`, so the unary parts add up to about
    /// that, shifted right by `p`.
    fn expected_bits(&self, num_keys: usize, max_key: u64) -> u64 {
        if num_keys == 0 {
            return u64::from(self.config.header_bits);
        }
        let parameter = match self.config.mode {
            ParameterMode::Auto => param::estimate(max_key, num_keys, self.config.header_bits),
            ParameterMode::Fixed => self.config.parameter,
        };
        let per_key = u64::from(parameter) + 1;
        u64::from(self.config.header_bits)
            .saturating_add((num_keys as u64).saturating_mul(per_key))
            .saturating_add(max_key.saturating_sub(num_keys as u64 - 1) >> parameter)
    }
}

impl<K: Key> KeySetCodec<K> for GolombSet {
    fn compress_set(&self, keys: &[K]) -> Result<Vec<u8>, CodecError> {
        self.encode_to_vec(keys)
    }

    fn decompress_set(&self, compressed: &[u8]) -> Result<Vec<K>, CodecError> {
        self.decode_to_vec(compressed)
    }

    fn estimate_size(&self, num_keys: usize, max_key: K) -> usize {
        let bits = self.expected_bits(num_keys, max_key.to_u64());
        usize::try_from(bits.div_ceil(8).max(1)).unwrap_or(usize::MAX)
    }

    fn bits_per_key(&self, num_keys: usize, max_key: K) -> f64 {
        if num_keys == 0 {
            return 0.0;
        }
        self.expected_bits(num_keys, max_key.to_u64()) as f64 / num_keys as f64
    }
}
