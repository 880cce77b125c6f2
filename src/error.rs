//! Error types for set encoding and decoding.

/// Errors produced by the bit-level and set-level codecs.
///
/// Every error is fatal to the operation that produced it. After a failed
/// encode the destination buffer holds unspecified bytes; after a failed
/// decode the output slice does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    /// A write would pass the end of the destination buffer.
    #[error("destination buffer exhausted")]
    BufferExhausted,

    /// A read would pass the end of the source buffer.
    ///
    /// While decoding a set this is how the end of the encoded keys is
    /// detected, so it only surfaces when the parameter header itself is cut
    /// short or when driving [`BitReader`](crate::BitReader) directly.
    #[error("unexpected end of stream")]
    EndOfStream,

    /// The decoded set holds more keys than the output slice can take.
    #[error("output exhausted: more than {capacity} keys in stream")]
    OutputExhausted {
        /// Length of the output slice handed to the decoder.
        capacity: usize,
    },

    /// Keys handed to the encoder are not strictly ascending.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An allocating helper would need a buffer larger than the configured
    /// size limit.
    #[error("encoded size of {needed} bytes exceeds limit of {limit} bytes")]
    SizeLimitExceeded {
        /// Bytes the stream would occupy, saturated at `u64::MAX`.
        needed: u64,
        /// Configured limit.
        limit: usize,
    },

    /// Header width or fixed parameter out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The stream decodes to a value the key type cannot hold.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = CodecError> = std::result::Result<T, E>;
