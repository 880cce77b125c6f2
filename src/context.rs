//! Single-pass set encoder and decoder.
//!
//! A context borrows one buffer for the duration of one call and is consumed
//! by it. The stream it reads or writes is, in bit order:
//!
//! ```text
//! [ parameter: header_bits ] [ rice(k0 - 0) ] [ rice(k1 - k0 - 1) ] ... [ 1-padding ]
//! ```
//!
//! Consecutive keys are at least one apart, so each gap is stored minus one.

use tracing::debug;

use crate::bits::{BitReader, BitWriter};
use crate::error::{CodecError, Result};
use crate::key::Key;
use crate::param;
use crate::rice;
use crate::ParameterMode;

/// Outcome of a successful encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// Bytes of the destination that hold the stream.
    pub len: usize,
    /// Rice parameter the keys were coded with.
    pub parameter: u32,
}

/// Outcome of a successful decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Number of keys written to the front of the output.
    pub count: usize,
    /// Rice parameter the keys were decoded with.
    pub parameter: u32,
}

/// Reject anything that is not strictly ascending.
pub(crate) fn validate_keys<K: Key>(keys: &[K]) -> Result<()> {
    for (i, pair) in keys.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CodecError::InvalidInput(format!(
                "keys must be strictly ascending, found {} <= {} at index {}",
                pair[1],
                pair[0],
                i + 1
            )));
        }
    }
    Ok(())
}

/// Narrow a decoded key to the output's key type.
fn narrow<K: Key>(value: u64) -> Result<K> {
    K::from_u64(value).ok_or_else(|| {
        CodecError::CorruptStream(format!("key {value} does not fit in {} bits", K::BITS))
    })
}

/// Encodes one key set into a caller-owned buffer.
pub struct Encoder<'a> {
    writer: BitWriter<'a>,
    header_bits: u32,
    parameter: u32,
}

impl<'a> Encoder<'a> {
    /// Create an encoder writing to `dst` with a `header_bits`-wide
    /// parameter header (0 for none).
    ///
    /// Fails with [`CodecError::BufferExhausted`] if `dst` is empty.
    pub fn new(dst: &'a mut [u8], header_bits: u32) -> Result<Self> {
        param::validate(header_bits, 0)?;
        Ok(Self {
            writer: BitWriter::new(dst)?,
            header_bits,
            parameter: 0,
        })
    }

    /// Set the parameter used by [`ParameterMode::Fixed`].
    pub fn with_parameter(mut self, parameter: u32) -> Result<Self> {
        param::validate(self.header_bits, parameter)?;
        self.parameter = parameter;
        Ok(self)
    }

    /// Encode `keys`, which must be strictly ascending.
    pub fn encode<K: Key>(self, keys: &[K], mode: ParameterMode) -> Result<Encoded> {
        validate_keys(keys)?;
        self.encode_ascending(keys, mode)
    }

    /// [`encode`](Self::encode) for keys already checked by `validate_keys`.
    pub(crate) fn encode_ascending<K: Key>(
        mut self,
        keys: &[K],
        mode: ParameterMode,
    ) -> Result<Encoded> {
        let parameter = match mode {
            ParameterMode::Auto => param::estimate(
                keys.last().map_or(0, |key| key.to_u64()),
                keys.len(),
                self.header_bits,
            ),
            ParameterMode::Fixed => self.parameter,
        };

        if self.header_bits > 0 {
            self.writer.write_bits(u64::from(parameter), self.header_bits)?;
        }

        let mut next_min = 0u64;
        for key in keys {
            let key = key.to_u64();
            rice::encode_value(&mut self.writer, key - next_min, parameter)?;
            // Only the last key can be the maximum, so wrapping is never read.
            next_min = key.wrapping_add(1);
        }

        let len = self.writer.bytes_written();
        debug!(
            keys = keys.len(),
            parameter,
            header_bits = self.header_bits,
            bits = self.writer.bits_written(),
            len,
            ?mode,
            "encoded key set"
        );
        Ok(Encoded { len, parameter })
    }
}

/// Decodes one key set from a caller-owned buffer.
///
/// There is no length field in the stream: decoding stops when the reader
/// runs off the end of `src`. `src` must therefore be exactly the bytes the
/// encoder reported. Extra trailing bytes decode as extra keys or are
/// silently absorbed as padding; a truncated stream loses its last keys
/// without an error.
pub struct Decoder<'a> {
    reader: BitReader<'a>,
    header_bits: u32,
    parameter: u32,
}

impl<'a> Decoder<'a> {
    /// Create a decoder over `src` expecting a `header_bits`-wide parameter
    /// header (0 for none).
    pub fn new(src: &'a [u8], header_bits: u32) -> Result<Self> {
        param::validate(header_bits, 0)?;
        Ok(Self {
            reader: BitReader::new(src),
            header_bits,
            parameter: 0,
        })
    }

    /// Set the parameter to use when the stream carries no header.
    pub fn with_parameter(mut self, parameter: u32) -> Result<Self> {
        param::validate(self.header_bits, parameter)?;
        self.parameter = parameter;
        Ok(self)
    }

    /// Decode into `out`, failing with [`CodecError::OutputExhausted`] if the
    /// stream holds more keys than `out` can take.
    pub fn decode<K: Key>(self, out: &mut [K]) -> Result<Decoded> {
        let capacity = out.len();
        self.drive(|index, value| {
            let slot = out
                .get_mut(index)
                .ok_or(CodecError::OutputExhausted { capacity })?;
            *slot = narrow(value)?;
            Ok(())
        })
    }

    /// Decode, appending every key to `out`.
    pub fn decode_to_vec<K: Key>(self, out: &mut Vec<K>) -> Result<Decoded> {
        self.drive(|_, value| {
            out.push(narrow(value)?);
            Ok(())
        })
    }

    fn drive(mut self, mut emit: impl FnMut(usize, u64) -> Result<()>) -> Result<Decoded> {
        let parameter = if self.header_bits > 0 {
            // Fits: header_bits never exceeds MAX_HEADER_BITS.
            self.reader.read_bits(self.header_bits)? as u32
        } else {
            self.parameter
        };

        // `None` once a key at u64::MAX has been seen.
        let mut next_min = Some(0u64);
        let mut count = 0usize;
        loop {
            let delta = match rice::decode_value(&mut self.reader, parameter) {
                Ok(delta) => delta,
                Err(CodecError::EndOfStream) => break,
                Err(err) => return Err(err),
            };
            let value = next_min
                .and_then(|min| min.checked_add(delta))
                .ok_or_else(|| {
                    CodecError::CorruptStream(format!("key {count} overflows 64 bits"))
                })?;
            emit(count, value)?;
            count += 1;
            next_min = value.checked_add(1);
        }

        debug!(
            keys = count,
            parameter,
            header_bits = self.header_bits,
            bits = self.reader.bits_read(),
            "decoded key set"
        );
        Ok(Decoded { count, parameter })
    }
}
