// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API for a presentation layer (a form, a CLI, a
// web page). It speaks only strings: a method name, a plain text or a '0'/'1'
// string in; a bit string, decoded text and (for Huffman) a rendered tree out. The
// typed kernels underneath stay usable directly.
//
// Data Flow (Encode):
//
//   1. [Stateful Facade (Session)]         -> Receives method name + text
//         |
//         `-> 2. [Stateless API (encode_text)] -> parses `Method`
//                   |
//                   `-> 3. [kernels::dispatch_encode] -> Returns `Encoded { bits, table }`
//         |
//         `-> Session keeps `table` when the method is Huffman
//
// Data Flow (Decode):
//
//   1. [Stateful Facade (Session)]         -> Receives method name + bit string
//         |
//         `-> 2. [Stateless API (decode_text)] -> parses `Method` and the bit string
//                   |
//                   `-> 3. [kernels::dispatch_decode] (with the stored table for Huffman)
//
// ====================================================================================
pub(crate) mod format;
pub mod session;
pub mod stateless_api;

// --- High-Level Stateful API ---
pub use session::Session;

// --- Low-Level Stateless API ---
pub use stateless_api::{decode_text, encode_text};

// --- Report Structs ---
pub use format::{DecodeReport, EncodeReport};

#[cfg(test)]
mod tests;
