//! This file is the root of the `codeword` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`kernels`, `bridge`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the types most callers need.
//!
//! # Example
//! ```
//! use codeword::kernels::huffman::Huffman;
//! use codeword::kernels::golomb_rice::GolombRice;
//! use codeword::bits::to_bit_string;
//!
//! let rice = GolombRice::default();
//! assert_eq!(to_bit_string(&rice.encode(9)?), "01001");
//!
//! let (bits, table) = Huffman::new().encode("abracadabra")?;
//! assert_eq!(Huffman::new().decode(&bits, &table)?, "abracadabra");
//! # Ok::<(), codeword::CodecError>(())
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bits;
pub mod bridge;
pub mod config;
pub mod error;
pub mod kernels;
pub mod logging;

//==================================================================================
// 2. Re-exports
//==================================================================================
pub use bits::{BitSeq, Bits};
pub use bridge::{DecodeReport, EncodeReport, Session};
pub use config::CodecConfig;
pub use error::CodecError;
pub use kernels::huffman::CodeTable;
pub use kernels::{dispatch_decode, dispatch_encode, Method};
pub use logging::enable_verbose_logging;
