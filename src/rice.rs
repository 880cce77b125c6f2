//! Rice coding of single values.
//!
//! A Rice code is a Golomb code whose divisor is a power of two, `2^p`. The
//! value `v` is written as the quotient `v >> p` in unary (that many `1`
//! bits, then a `0`) followed by the low `p` bits of `v` in plain binary.
//!
//! ```text
//! p = 2, v = 11 (0b1011):  quotient 2 -> 110, remainder 0b11 -> 11
//!                          code: 11011
//! ```
//!
//! Rice codes are optimal among prefix codes for geometrically distributed
//! values when `2^p` is close to the mean, which is what gaps between
//! uniformly scattered set members look like.

use crate::bits::{BitReader, BitWriter};
use crate::error::{CodecError, Result};

/// Returns the number of bits [`encode_value`] emits for `value`.
#[must_use]
#[inline]
pub fn value_len(value: u64, parameter: u32) -> u64 {
    (value >> parameter).saturating_add(1 + u64::from(parameter))
}

/// Write the Rice code of `value` with parameter `parameter`.
pub fn encode_value(writer: &mut BitWriter<'_>, value: u64, parameter: u32) -> Result<()> {
    let quotient = value >> parameter;
    for _ in 0..quotient {
        writer.write_bit(true)?;
    }
    writer.write_bit(false)?;
    writer.write_bits(value, parameter)
}

/// Read one Rice-coded value with parameter `parameter`.
///
/// Fails with [`CodecError::EndOfStream`] if the input runs out anywhere
/// inside the code, including inside the unary run. Trailing padding is all
/// ones, so running off the end of a well-formed stream lands here too.
pub fn decode_value(reader: &mut BitReader<'_>, parameter: u32) -> Result<u64> {
    let mut quotient = 0u64;
    while reader.read_bit()? {
        quotient += 1;
    }
    let remainder = reader.read_bits(parameter)?;

    // Checked only once the code is complete, so that a padding run still
    // ends in EndOfStream.
    if quotient > u64::MAX >> parameter {
        return Err(CodecError::CorruptStream(format!(
            "quotient {quotient} overflows with parameter {parameter}"
        )));
    }
    Ok((quotient << parameter) | remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_all(values: &[u64], parameter: u32, buf: &mut [u8]) -> usize {
        let mut writer = BitWriter::new(buf).unwrap();
        for &value in values {
            encode_value(&mut writer, value, parameter).unwrap();
        }
        writer.bytes_written()
    }

    #[test]
    fn test_known_codes() {
        let mut buf = [0u8; 1];
        // 11011 + padding 111
        assert_eq!(encode_all(&[11], 2, &mut buf), 1);
        assert_eq!(buf[0], 0b1101_1111);

        // p = 0 is pure unary: 3 -> 1110
        assert_eq!(encode_all(&[3], 0, &mut buf), 1);
        assert_eq!(buf[0], 0b1110_1111);

        // zero quotient: 0 -> 0 then p zero bits
        assert_eq!(encode_all(&[0], 3, &mut buf), 1);
        assert_eq!(buf[0], 0b0000_1111);
    }

    #[test]
    fn test_decode_sequence() {
        let values = [0u64, 1, 7, 8, 9, 100, 1 << 20];
        for parameter in [0u32, 1, 3, 8, 17] {
            let mut buf = vec![0u8; 1 << 18];
            let len = encode_all(&values, parameter, &mut buf);

            let mut reader = BitReader::new(&buf[..len]);
            for &expected in &values {
                assert_eq!(decode_value(&mut reader, parameter).unwrap(), expected);
            }
            // Only padding left.
            assert_eq!(
                decode_value(&mut reader, parameter),
                Err(CodecError::EndOfStream)
            );
        }
    }

    #[test]
    fn test_value_len_matches_writer() {
        for (value, parameter) in [(0u64, 0u32), (5, 0), (5, 2), (1000, 5), (u64::MAX, 63)] {
            let mut buf = [0u8; 16];
            let mut writer = BitWriter::new(&mut buf).unwrap();
            encode_value(&mut writer, value, parameter).unwrap();
            assert_eq!(writer.bits_written() as u64, value_len(value, parameter));
        }
    }

    #[test]
    fn test_truncated_remainder() {
        // 0 terminator then only 3 of 12 remainder bits before the bound.
        let mut reader = BitReader::new(&[0b0101_0000]);
        assert_eq!(reader.read_bits(4).unwrap(), 0b0101);
        assert_eq!(decode_value(&mut reader, 12), Err(CodecError::EndOfStream));
    }

    #[test]
    fn test_quotient_overflow() {
        // Two unary ones with p = 63 would need 65 bits.
        let mut buf = [0u8; 16];
        let mut writer = BitWriter::new(&mut buf).unwrap();
        writer.write_bits(0b110, 3).unwrap();
        writer.write_bits(0, 63).unwrap();
        let len = writer.bytes_written();

        let mut reader = BitReader::new(&buf[..len]);
        assert!(matches!(
            decode_value(&mut reader, 63),
            Err(CodecError::CorruptStream(_))
        ));
    }

    #[test]
    fn test_buffer_exhausted() {
        let mut buf = [0u8; 1];
        let mut writer = BitWriter::new(&mut buf).unwrap();
        assert_eq!(
            encode_value(&mut writer, 9, 0),
            Err(CodecError::BufferExhausted)
        );
    }
}
