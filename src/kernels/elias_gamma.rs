//! This module contains the pure, stateless kernels for Elias-Gamma coding, a
//! universal code for strictly positive integers.
//!
//! A value `n` with an `L`-bit binary representation is written as `L - 1` zero
//! bits followed by those `L` bits. The leading one of the binary form doubles as
//! the stop marker for the zero run, so codewords are self-delimiting and grow as
//! `2 * floor(log2 n) + 1` bits with no upper bound on magnitude.

use num_traits::{PrimInt, Unsigned};

use crate::bits::{
    push_run, push_uint, significant_bits, symbol_to_char, widen, BitReader, BitSeq, Bits,
};
use crate::error::CodecError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EliasGamma;

impl EliasGamma {
    pub fn new() -> Self {
        EliasGamma
    }

    //==============================================================================
    // 1. Single-Value Operations
    //==============================================================================

    pub fn encode_into(&self, n: u64, out: &mut BitSeq) -> Result<(), CodecError> {
        if n == 0 {
            return Err(CodecError::InvalidInput(
                "Elias-Gamma can only encode integers greater than zero".to_string(),
            ));
        }
        let len = significant_bits(n);
        push_run(out, false, len - 1);
        push_uint(out, n, len);
        log::trace!("elias-gamma: {} -> {} bits", n, 2 * len - 1);
        Ok(())
    }

    pub fn encode(&self, n: u64) -> Result<BitSeq, CodecError> {
        let mut out = BitSeq::new();
        self.encode_into(n, &mut out)?;
        Ok(out)
    }

    /// Reads one codeword from the reader.
    pub fn decode_one(&self, reader: &mut BitReader<'_>) -> Result<u64, CodecError> {
        let zeros = reader.read_unary_zeros("Elias-Gamma length prefix")?;
        if zeros >= 64 {
            return Err(CodecError::MalformedStream(format!(
                "Elias-Gamma prefix of {} zeros overflows a 64-bit value",
                zeros
            )));
        }
        // The one bit just consumed is the leading bit of the value.
        let tail = reader.read_uint(zeros, "Elias-Gamma value")?;
        Ok((1u64 << zeros) | tail)
    }

    /// Decodes exactly one codeword. Bits left over after it are an error.
    pub fn decode(&self, bits: &Bits) -> Result<u64, CodecError> {
        let mut reader = BitReader::new(bits);
        let value = self.decode_one(&mut reader)?;
        if !reader.is_at_end() {
            return Err(CodecError::MalformedStream(format!(
                "{} trailing bits after Elias-Gamma codeword",
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

    /// Encodes each character's code point. A NUL character has code 0 and is
    /// rejected with `InvalidInput`.
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
