//! Bit-sequence plumbing shared by every kernel.
//!
//! All codecs in this crate speak the same wire representation: an ordered,
//! MSB-first sequence of bits held in a `bitvec::BitVec<u8, Msb0>`. This module
//! provides the aliases for that type, a bounds-checked `BitReader` cursor that
//! every decoder scans with, and conversion to and from the textual `'0'`/`'1'`
//! form exchanged with the presentation layer.

use bitvec::prelude::*;
use num_traits::{PrimInt, Unsigned};

use crate::error::CodecError;

/// An owned, MSB-first bit sequence. Importantly, field packing *relies* on `Msb0`.
pub type BitSeq = BitVec<u8, Msb0>;
/// The borrowed form of [`BitSeq`].
pub type Bits = BitSlice<u8, Msb0>;

//==================================================================================
// 1. Writing
//==================================================================================

/// Appends the low `width` bits of `value` to `out`, most significant bit first.
pub fn push_uint(out: &mut BitSeq, value: u64, width: usize) {
    debug_assert!(width <= 64);
    if width == 0 {
        return;
    }
    out.extend_from_bitslice(&value.view_bits::<Msb0>()[64 - width..]);
}

/// Appends `count` copies of `bit`.
pub fn push_run(out: &mut BitSeq, bit: bool, count: usize) {
    out.resize(out.len() + count, bit);
}

/// Number of bits in the binary representation of `n` without leading zeros.
/// `significant_bits(0)` is 0.
pub fn significant_bits(n: u64) -> usize {
    (u64::BITS - n.leading_zeros()) as usize
}

/// Widens any primitive unsigned integer to the `u64` the kernels operate on.
pub(crate) fn widen<T>(value: T) -> Result<u64, CodecError>
where
    T: PrimInt + Unsigned,
{
    value
        .to_u64()
        .ok_or_else(|| CodecError::InvalidInput("value does not fit in 64 bits".to_string()))
}

//==================================================================================
// 2. Reading
//==================================================================================

/// A forward-only cursor over a bit slice. Every read checks for end-of-stream and
/// reports it as `MalformedStream`, so no scan loop can run past the input.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a Bits,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bits: &'a Bits) -> Self {
        Self { bits, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.bits.len()
    }

    /// Reads one bit. `what` names the field being decoded for the error message.
    pub fn read_bit(&mut self, what: &str) -> Result<bool, CodecError> {
        let bit = *self
            .bits
            .get(self.pos)
            .ok_or_else(|| CodecError::truncated(what, self.pos))?;
        self.pos += 1;
        Ok(bit)
    }

    /// Counts zero bits up to the next one bit, consuming that one bit as well.
    pub fn read_unary_zeros(&mut self, what: &str) -> Result<usize, CodecError> {
        let rest = &self.bits[self.pos..];
        match rest.first_one() {
            Some(zeros) => {
                self.pos += zeros + 1;
                Ok(zeros)
            }
            None => {
                self.pos = self.bits.len();
                Err(CodecError::truncated(what, self.pos))
            }
        }
    }

    /// Reads a `width`-bit, MSB-first unsigned field.
    pub fn read_uint(&mut self, width: usize, what: &str) -> Result<u64, CodecError> {
        if width > 64 {
            return Err(CodecError::MalformedStream(format!(
                "{} of {} bits does not fit in 64 bits",
                what, width
            )));
        }
        if self.remaining() < width {
            self.pos = self.bits.len();
            return Err(CodecError::truncated(what, self.pos));
        }
        let field = &self.bits[self.pos..self.pos + width];
        self.pos += width;
        Ok(field
            .iter()
            .by_vals()
            .fold(0u64, |acc, bit| (acc << 1) | bit as u64))
    }
}

//==================================================================================
// 3. Text Form
//==================================================================================

/// Parses a string of `'0'`/`'1'` characters into a bit sequence. ASCII
/// whitespace is skipped so pasted, line-wrapped output decodes unchanged.
pub fn parse_bit_string(text: &str) -> Result<BitSeq, CodecError> {
    let mut bits = BitSeq::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        match c {
            '0' => bits.push(false),
            '1' => bits.push(true),
            c if c.is_ascii_whitespace() => {}
            found => return Err(CodecError::InvalidBitString { position, found }),
        }
    }
    Ok(bits)
}

/// Renders a bit sequence as `'0'`/`'1'` characters.
pub fn to_bit_string(bits: &Bits) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Converts a decoded code point back into a character.
pub(crate) fn symbol_to_char(value: u64) -> Result<char, CodecError> {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| {
            CodecError::MalformedStream(format!("decoded value {} is not a character", value))
        })
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_uint_is_msb_first() {
        let mut bits = BitSeq::new();
        push_uint(&mut bits, 0b101, 3);
        push_uint(&mut bits, 1, 4);
        assert_eq!(to_bit_string(&bits), "1010001");
    }

    #[test]
    fn test_push_uint_zero_width_is_noop() {
        let mut bits = BitSeq::new();
        push_uint(&mut bits, 7, 0);
        assert!(bits.is_empty());
    }

    #[test]
    fn test_push_uint_full_width() {
        let mut bits = BitSeq::new();
        push_uint(&mut bits, u64::MAX, 64);
        assert_eq!(bits.count_ones(), 64);
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_uint(64, "field").unwrap(), u64::MAX);
    }

    #[test]
    fn test_significant_bits() {
        assert_eq!(significant_bits(0), 0);
        assert_eq!(significant_bits(1), 1);
        assert_eq!(significant_bits(5), 3);
        assert_eq!(significant_bits(8), 4);
        assert_eq!(significant_bits(u64::MAX), 64);
    }

    #[test]
    fn test_reader_unary_and_fields() {
        let bits = parse_bit_string("0001101").unwrap();
        let mut reader = BitReader::new(&bits);
        assert_eq!(reader.read_unary_zeros("quotient").unwrap(), 3);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.read_uint(3, "remainder").unwrap(), 0b101);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_reader_reports_truncation() {
        let bits = parse_bit_string("000").unwrap();
        let mut reader = BitReader::new(&bits);
        let err = reader.read_unary_zeros("quotient").unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream(_)));
        assert!(reader.is_at_end());

        let bits = parse_bit_string("10").unwrap();
        let mut reader = BitReader::new(&bits);
        assert!(reader.read_uint(3, "remainder").is_err());
        assert!(reader.read_bit("anything").is_err());
    }

    #[test]
    fn test_parse_bit_string_rejects_other_characters() {
        let err = parse_bit_string("01x1").unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidBitString { position: 2, found: 'x' }
        ));
    }

    #[test]
    fn test_parse_bit_string_skips_whitespace() {
        let bits = parse_bit_string("10 01\n1").unwrap();
        assert_eq!(to_bit_string(&bits), "10011");
    }

    #[test]
    fn test_symbol_to_char() {
        assert_eq!(symbol_to_char(65).unwrap(), 'A');
        assert!(symbol_to_char(0xD800).is_err());
        assert!(symbol_to_char(u64::MAX).is_err());
    }
}
