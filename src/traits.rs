//! Codec trait shared by key set encoders.

use crate::error::CodecError;
use crate::key::Key;

/// Compresses sorted, unique key sets into self-contained byte strings.
pub trait KeySetCodec<K: Key> {
    /// Encode `keys` (strictly ascending) into a freshly allocated buffer
    /// holding exactly the encoded stream.
    fn compress_set(&self, keys: &[K]) -> Result<Vec<u8>, CodecError>;

    /// Decode a buffer produced by [`compress_set`](Self::compress_set).
    ///
    /// `compressed` must be the complete output, with nothing appended.
    fn decompress_set(&self, compressed: &[u8]) -> Result<Vec<K>, CodecError>;

    /// Approximate encoded size in bytes for `num_keys` keys spread over
    /// `[0, max_key]`.
    fn estimate_size(&self, num_keys: usize, max_key: K) -> usize;

    /// Approximate bits spent per key for `num_keys` keys spread over
    /// `[0, max_key]`.
    fn bits_per_key(&self, num_keys: usize, max_key: K) -> f64;
}
