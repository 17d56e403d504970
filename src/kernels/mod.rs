//! This module serves as the public API and dispatcher for the four coding
//! kernels.
//!
//! It declares all kernel sub-modules and provides a unified `dispatch_encode` /
//! `dispatch_decode` pair keyed by `Method`. The dispatchers build the selected
//! kernel from a `CodecConfig` and run its text-level operation; they are the sole
//! entry point used by the `bridge` facade.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bits::{BitSeq, Bits};
use crate::config::CodecConfig;
use crate::error::CodecError;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Parametric codes
pub mod golomb_rice;

/// Universal codes
pub mod elias_gamma;
pub mod fibonacci;

/// Table-driven entropy coding
pub mod huffman;

use elias_gamma::EliasGamma;
use fibonacci::Fibonacci;
use golomb_rice::GolombRice;
use huffman::{CodeTable, Huffman};

//==================================================================================
// 2. Method Selection
//==================================================================================

/// The coding schemes selectable by name.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Golomb,
    Elias,
    Fibonacci,
    Huffman,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::Golomb,
        Method::Elias,
        Method::Fibonacci,
        Method::Huffman,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Method::Golomb => "golomb",
            Method::Elias => "elias",
            Method::Fibonacci => "fibonacci",
            Method::Huffman => "huffman",
        }
    }

    /// Only Huffman needs state from the encode to decode.
    pub fn needs_code_table(&self) -> bool {
        matches!(self, Method::Huffman)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "golomb" | "golomb_rice" | "rice" => Ok(Method::Golomb),
            "elias" | "elias_gamma" | "gamma" => Ok(Method::Elias),
            "fibonacci" | "fib" => Ok(Method::Fibonacci),
            "huffman" => Ok(Method::Huffman),
            _ => Err(CodecError::UnknownMethod(s.to_string())),
        }
    }
}

//==================================================================================
// 3. Public API (Unified Dispatchers)
//==================================================================================

/// Output of `dispatch_encode`. `table` is set only for `Method::Huffman`.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub bits: BitSeq,
    pub table: Option<CodeTable>,
}

/// The single, unified dispatcher for all ENCODE operations.
pub fn dispatch_encode(
    method: Method,
    text: &str,
    config: &CodecConfig,
) -> Result<Encoded, CodecError> {
    log::debug!("encode: method={} symbols={}", method, text.chars().count());

    let (bits, table) = match method {
        Method::Golomb => (GolombRice::new(config.golomb_divisor)?.encode_text(text)?, None),
        Method::Elias => (EliasGamma::new().encode_text(text)?, None),
        Method::Fibonacci => (Fibonacci::new(config.fibonacci_ceiling)?.encode_text(text)?, None),
        Method::Huffman => {
            let (bits, table) = Huffman::new().encode(text)?;
            (bits, Some(table))
        }
    };

    log::debug!("encode: method={} produced {} bits", method, bits.len());
    Ok(Encoded { bits, table })
}

/// The single, unified dispatcher for all DECODE operations. `table` is required
/// for `Method::Huffman` and ignored otherwise.
pub fn dispatch_decode(
    method: Method,
    bits: &Bits,
    config: &CodecConfig,
    table: Option<&CodeTable>,
) -> Result<String, CodecError> {
    log::debug!("decode: method={} bits={}", method, bits.len());

    match method {
        Method::Golomb => GolombRice::new(config.golomb_divisor)?.decode_text(bits),
        Method::Elias => EliasGamma::new().decode_text(bits),
        Method::Fibonacci => Fibonacci::new(config.fibonacci_ceiling)?.decode_text(bits),
        Method::Huffman => {
            let table = table.ok_or_else(|| {
                CodecError::StatePrecondition(
                    "Huffman decode requires the code table from a previous encode".to_string(),
                )
            })?;
            Huffman::new().decode(bits, table)
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
