//! Bit-granular I/O over caller-owned byte buffers.
//!
//! Bits are packed most-significant first within each byte. Both sides track
//! their position with a private [`BitCursor`]; the buffer length is the end
//! bound and neither side ever touches a byte past it.

use crate::error::{CodecError, Result};

/// Position inside a byte buffer at bit granularity.
///
/// `bit` counts the bits already consumed from `byte`, so it ranges over
/// `0..=8`. A cursor at `bit == 8` has finished its byte and moves on lazily,
/// on the next access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BitCursor {
    byte: usize,
    bit: u8,
}

impl BitCursor {
    /// Step onto the next byte. Returns `false` (and stays put) if that byte
    /// lies at or past `len`.
    #[inline]
    fn advance(&mut self, len: usize) -> bool {
        if self.byte + 1 >= len {
            return false;
        }
        self.byte += 1;
        self.bit = 0;
        true
    }

    #[inline]
    fn position(&self) -> usize {
        self.byte * 8 + self.bit as usize
    }
}

/// MSB-first bit sink over a bounded, caller-owned buffer.
///
/// # Trailing-bit guard
///
/// Every byte the writer steps onto is set to `0xff` before its first bit is
/// written, and writing a bit only ever clears a `1` into a `0`. Bits that
/// were never written therefore read back as `1`. A reader that runs into
/// padding sees an unterminated unary run, which ends in
/// [`CodecError::EndOfStream`] instead of a spurious short value.
pub struct BitWriter<'a> {
    dst: &'a mut [u8],
    cursor: BitCursor,
}

impl<'a> BitWriter<'a> {
    /// Start writing at the first byte of `dst`.
    ///
    /// Fails with [`CodecError::BufferExhausted`] if `dst` is empty.
    pub fn new(dst: &'a mut [u8]) -> Result<Self> {
        let first = dst.first_mut().ok_or(CodecError::BufferExhausted)?;
        *first = 0xff;
        Ok(Self {
            dst,
            cursor: BitCursor::default(),
        })
    }

    /// Append a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.cursor.bit == 8 {
            if !self.cursor.advance(self.dst.len()) {
                return Err(CodecError::BufferExhausted);
            }
            self.dst[self.cursor.byte] = 0xff;
        }
        if !bit {
            self.dst[self.cursor.byte] &= !(0x80 >> self.cursor.bit);
        }
        self.cursor.bit += 1;
        Ok(())
    }

    /// Append the low `n` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, n: u32) -> Result<()> {
        debug_assert!(n <= u64::BITS, "cannot write {n} bits from a u64");
        for shift in (0..n).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Number of bits written so far.
    pub fn bits_written(&self) -> usize {
        self.cursor.position()
    }

    /// Number of bytes touched, counting a partially filled final byte.
    pub fn bytes_written(&self) -> usize {
        self.cursor.byte + 1
    }
}

/// MSB-first bit source over a bounded, caller-owned buffer.
pub struct BitReader<'a> {
    src: &'a [u8],
    cursor: BitCursor,
}

impl<'a> BitReader<'a> {
    /// Start reading at the first byte of `src`.
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            cursor: BitCursor::default(),
        }
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.cursor.bit == 8 && !self.cursor.advance(self.src.len()) {
            return Err(CodecError::EndOfStream);
        }
        let byte = *self
            .src
            .get(self.cursor.byte)
            .ok_or(CodecError::EndOfStream)?;
        self.cursor.bit += 1;
        Ok(((byte >> (8 - self.cursor.bit)) & 1) == 1)
    }

    /// Read `n` bits, most significant first, into one value.
    ///
    /// A failed read is not rewound: the cursor stays behind the last bit
    /// that was read successfully.
    pub fn read_bits(&mut self, n: u32) -> Result<u64> {
        debug_assert!(n <= u64::BITS, "cannot read {n} bits into a u64");
        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Number of bits consumed so far.
    pub fn bits_read(&self) -> usize {
        self.cursor.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first() {
        let mut buf = [0u8; 2];
        let mut writer = BitWriter::new(&mut buf).unwrap();
        writer.write_bits(0b1010_0110, 8).unwrap();
        writer.write_bits(0b01, 2).unwrap();
        assert_eq!(writer.bytes_written(), 2);
        assert_eq!(writer.bits_written(), 10);
        assert_eq!(buf, [0b1010_0110, 0b0111_1111]);
    }

    #[test]
    fn test_unwritten_bits_are_ones() {
        let mut buf = [0u8; 4];
        let mut writer = BitWriter::new(&mut buf).unwrap();
        writer.write_bit(false).unwrap();
        assert_eq!(writer.bytes_written(), 1);
        // Untouched bytes keep their contents; the touched one is padded.
        assert_eq!(buf, [0x7f, 0, 0, 0]);
    }

    #[test]
    fn test_empty_destination() {
        let mut buf = [0u8; 0];
        assert!(matches!(
            BitWriter::new(&mut buf),
            Err(CodecError::BufferExhausted)
        ));
    }

    #[test]
    fn test_writer_stops_at_bound() {
        let mut buf = [0xAAu8; 3];
        {
            let mut writer = BitWriter::new(&mut buf[..2]).unwrap();
            writer.write_bits(0, 16).unwrap();
            assert_eq!(writer.write_bit(false), Err(CodecError::BufferExhausted));
            assert_eq!(writer.bits_written(), 16);
        }
        assert_eq!(buf, [0, 0, 0xAA]);
    }

    #[test]
    fn test_reader_round_trip() {
        let mut buf = [0u8; 8];
        let mut writer = BitWriter::new(&mut buf).unwrap();
        writer.write_bits(0x1234_5678, 32).unwrap();
        writer.write_bits(5, 3).unwrap();
        let len = writer.bytes_written();

        let mut reader = BitReader::new(&buf[..len]);
        assert_eq!(reader.read_bits(32).unwrap(), 0x1234_5678);
        assert_eq!(reader.read_bits(3).unwrap(), 5);
        assert_eq!(reader.read_bits(5).unwrap(), 0b11111);
        assert_eq!(reader.read_bit(), Err(CodecError::EndOfStream));
    }

    #[test]
    fn test_empty_source() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_bit(), Err(CodecError::EndOfStream));
        assert_eq!(reader.bits_read(), 0);
    }

    #[test]
    fn test_failed_read_keeps_position() {
        let mut reader = BitReader::new(&[0xF0]);
        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(6), Err(CodecError::EndOfStream));
        assert_eq!(reader.bits_read(), 8);
        assert_eq!(reader.read_bit(), Err(CodecError::EndOfStream));
    }
}
