// In: src/bridge/format.rs

//! Defines the structures handed back to the presentation layer. These are the
//! only shapes that leave the crate: the bit string (or decoded text) plus, for
//! Huffman, the rendered tree.

use serde::Serialize;

use crate::error::CodecError;
use crate::kernels::Method;

/// The result of encoding a text with one method.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    pub method: Method,
    /// The encoded stream as `'0'`/`'1'` characters.
    pub bits: String,
    pub bit_len: usize,
    /// Number of characters in the input text.
    pub symbol_count: usize,
    /// Indented dump of the Huffman tree. `None` for the other methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
}

impl EncodeReport {
    /// Average codeword length in bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbol_count == 0 {
            0.0
        } else {
            self.bit_len as f64 / self.symbol_count as f64
        }
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The result of decoding a bit string with one method.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub method: Method,
    pub text: String,
    pub symbol_count: usize,
}

impl DecodeReport {
    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
