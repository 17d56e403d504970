//! This module contains the pure, stateless kernels for Golomb-Rice coding of
//! non-negative integers.
//!
//! A Rice code is a Golomb code whose divisor `m` is a power of two. Each value is
//! split into a quotient, written in unary (`q` zero bits and a one bit as the
//! stop marker), and a remainder, written as a fixed-width binary field of
//! `log2(m)` bits. The divisor is never transmitted; encoder and decoder must be
//! built with the same one.

use num_traits::{PrimInt, Unsigned};

use crate::bits::{push_run, push_uint, symbol_to_char, widen, BitReader, BitSeq, Bits};
use crate::error::CodecError;

/// Divisor used for text when nothing else is configured.
pub const DEFAULT_DIVISOR: u64 = 8;

/// Longest unary run the encoder will emit. Anything larger would allocate
/// megabytes for a single codeword.
pub const MAX_QUOTIENT: u64 = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GolombRice {
    divisor: u64,
    remainder_bits: usize,
}

impl Default for GolombRice {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
            remainder_bits: DEFAULT_DIVISOR.trailing_zeros() as usize,
        }
    }
}

impl GolombRice {
    /// Builds a codec for divisor `m`, which must be a power of two (1 is allowed
    /// and degenerates to pure unary).
    pub fn new(divisor: u64) -> Result<Self, CodecError> {
        if !divisor.is_power_of_two() {
            return Err(CodecError::InvalidInput(format!(
                "Golomb-Rice divisor must be a power of two, got {}",
                divisor
            )));
        }
        Ok(Self {
            divisor,
            remainder_bits: divisor.trailing_zeros() as usize,
        })
    }

    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    /// Width of the remainder field, `ceil(log2(m))`.
    pub fn remainder_bits(&self) -> usize {
        self.remainder_bits
    }

    //==============================================================================
    // 1. Single-Value Operations
    //==============================================================================

    /// Appends the codeword for `n` to `out`.
    pub fn encode_into(&self, n: u64, out: &mut BitSeq) -> Result<(), CodecError> {
        let quotient = n / self.divisor;
        if quotient > MAX_QUOTIENT {
            return Err(CodecError::InvalidInput(format!(
                "{} needs a unary quotient of {} bits with divisor {}",
                n, quotient, self.divisor
            )));
        }
        let remainder = n % self.divisor;

        push_run(out, false, quotient as usize);
        out.push(true);
        push_uint(out, remainder, self.remainder_bits);
        log::trace!("golomb-rice: {} -> q={} r={}", n, quotient, remainder);
        Ok(())
    }

    pub fn encode(&self, n: u64) -> Result<BitSeq, CodecError> {
        let mut out = BitSeq::new();
        self.encode_into(n, &mut out)?;
        Ok(out)
    }

    /// Reads one codeword from the reader.
    pub fn decode_one(&self, reader: &mut BitReader<'_>) -> Result<u64, CodecError> {
        let quotient = reader.read_unary_zeros("Golomb-Rice quotient")? as u64;
        let remainder = reader.read_uint(self.remainder_bits, "Golomb-Rice remainder")?;

        quotient
            .checked_mul(self.divisor)
            .and_then(|v| v.checked_add(remainder))
            .ok_or_else(|| {
                CodecError::MalformedStream(format!(
                    "Golomb-Rice quotient {} overflows a 64-bit value",
                    quotient
                ))
            })
    }

    /// Decodes exactly one codeword. Bits left over after it are an error.
    pub fn decode(&self, bits: &Bits) -> Result<u64, CodecError> {
        let mut reader = BitReader::new(bits);
        let value = self.decode_one(&mut reader)?;
        if !reader.is_at_end() {
            return Err(CodecError::MalformedStream(format!(
                "{} trailing bits after Golomb-Rice codeword",
                reader.remaining()
            )));
        }
        Ok(value)
    }

    //==============================================================================
    // 2. Slice Operations
    //==============================================================================

    pub fn encode_all<T>(&self, values: &[T]) -> Result<BitSeq, CodecError>
    where
        T: PrimInt + Unsigned,
    {
        let mut out = BitSeq::new();
        for &value in values {
            self.encode_into(widen(value)?, &mut out)?;
        }
        Ok(out)
    }

    /// Splits a concatenated stream back into its values.
    pub fn decode_all(&self, bits: &Bits) -> Result<Vec<u64>, CodecError> {
        let mut reader = BitReader::new(bits);
        let mut values = Vec::new();
        while !reader.is_at_end() {
            values.push(self.decode_one(&mut reader)?);
        }
        Ok(values)
    }

    //==============================================================================
    // 3. Text Operations
    //==============================================================================

    /// Encodes each character's code point independently and concatenates them.
    pub fn encode_text(&self, text: &str) -> Result<BitSeq, CodecError> {
        let mut out = BitSeq::new();
        for c in text.chars() {
            self.encode_into(c as u64, &mut out)?;
        }
        Ok(out)
    }

    pub fn decode_text(&self, bits: &Bits) -> Result<String, CodecError> {
        self.decode_all(bits)?
            .into_iter()
            .map(symbol_to_char)
            .collect()
    }
}
