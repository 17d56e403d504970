//! This module contains the kernels for Fibonacci coding, the self-delimiting
//! code built on the Zeckendorf representation of positive integers.
//!
//! Every positive integer is a unique sum of non-adjacent terms of `1, 2, 3, 5,
//! 8, ...`. A codeword carries one bit per term, lowest term first, up to the
//! largest term used, followed by an extra `1`. Because the greedy selection never
//! uses two adjacent terms, `11` can only appear at the very end of a codeword and
//! serves as the separator in a concatenated stream.

use num_traits::{PrimInt, Unsigned};

use crate::bits::{push_run, symbol_to_char, widen, BitReader, BitSeq, Bits};
use crate::error::CodecError;

/// Ceiling used when nothing else is configured: the largest Unicode scalar value.
pub const DEFAULT_CEILING: u64 = char::MAX as u64;

/// Returns the Fibonacci terms `1, 2, 3, 5, ...` up to and including the largest
/// term not exceeding `max`. `generate(0)` is empty.
pub fn generate(max: u64) -> Vec<u64> {
    let mut seq = Vec::new();
    let (mut current, mut next) = (1u64, 2u64);
    while current <= max {
        seq.push(current);
        match current.checked_add(next) {
            Some(after) => {
                current = next;
                next = after;
            }
            None => {
                if next <= max {
                    seq.push(next);
                }
                break;
            }
        }
    }
    seq
}

/// A Fibonacci codec with its term table generated once up to a fixed ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fibonacci {
    table: Vec<u64>,
    ceiling: u64,
}

impl Default for Fibonacci {
    fn default() -> Self {
        Self {
            table: generate(DEFAULT_CEILING),
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl Fibonacci {
    /// Builds a codec able to encode every value in `1..=ceiling`.
    pub fn new(ceiling: u64) -> Result<Self, CodecError> {
        if ceiling == 0 {
            return Err(CodecError::InvalidInput(
                "Fibonacci ceiling must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            table: generate(ceiling),
            ceiling,
        })
    }

    pub fn table(&self) -> &[u64] {
        &self.table
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    //==============================================================================
    // 1. Single-Value Operations
    //==============================================================================

    pub fn encode_into(&self, n: u64, out: &mut BitSeq) -> Result<(), CodecError> {
        if n == 0 {
            return Err(CodecError::InvalidInput(
                "Fibonacci coding can only encode integers greater than zero".to_string(),
            ));
        }
        if n > self.ceiling {
            return Err(CodecError::InvalidInput(format!(
                "{} exceeds the Fibonacci table ceiling of {}",
                n, self.ceiling
            )));
        }

        // Terms usable for `n`; the last of them is always selected.
        let terms = self.table.partition_point(|&f| f <= n);
        let start = out.len();
        push_run(out, false, terms);

        let mut rest = n;
        for i in (0..terms).rev() {
            if self.table[i] <= rest {
                rest -= self.table[i];
                out.set(start + i, true);
            }
        }
        debug_assert_eq!(rest, 0);

        out.push(true);
        log::trace!("fibonacci: {} -> {} bits", n, terms + 1);
        Ok(())
    }

    pub fn encode(&self, n: u64) -> Result<BitSeq, CodecError> {
        let mut out = BitSeq::new();
        self.encode_into(n, &mut out)?;
        Ok(out)
    }

    /// Reads bits up to and including the next `11` and sums the selected terms.
    pub fn decode_one(&self, reader: &mut BitReader<'_>) -> Result<u64, CodecError> {
        let mut sum = 0u64;
        let mut previous = false;
        let mut index = 0usize;
        loop {
            let bit = reader.read_bit("Fibonacci codeword")?;
            if bit && previous {
                return Ok(sum);
            }
            if bit {
                let term = self.table.get(index).ok_or_else(|| {
                    CodecError::MalformedStream(format!(
                        "Fibonacci codeword uses term {} but the table has {}",
                        index,
                        self.table.len()
                    ))
                })?;
                sum = sum.checked_add(*term).ok_or_else(|| {
                    CodecError::MalformedStream("Fibonacci codeword overflows".to_string())
                })?;
            }
            previous = bit;
            index += 1;
        }
    }

    /// Decodes exactly one codeword, which must end in `11` and contain no
    /// earlier `11`.
    pub fn decode(&self, bits: &Bits) -> Result<u64, CodecError> {
        let mut reader = BitReader::new(bits);
        let value = self.decode_one(&mut reader)?;
        if !reader.is_at_end() {
            return Err(CodecError::MalformedStream(format!(
                "{} trailing bits after Fibonacci terminator",
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

    /// Splits a stream at every `11` terminator. A trailing partial codeword is
    /// reported as `MalformedStream`.
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
