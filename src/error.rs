// In: src/error.rs

//! This module defines the single, unified error type for the entire codeword library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A value the selected code cannot represent (e.g. zero for Elias-Gamma).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The bit layout could not be split into well-formed codewords.
    #[error("Malformed bit stream: {0}")]
    MalformedStream(String),

    /// A decode was attempted without the state produced by a matching encode.
    #[error("Decoder state precondition violated: {0}")]
    StatePrecondition(String),

    #[error("Unknown coding method: '{0}'")]
    UnknownMethod(String),

    #[error("Invalid bit string: expected '0' or '1' at position {position}, found {found:?}")]
    InvalidBitString { position: usize, found: char },

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., config file not found).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config or
    /// rendering a report.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl CodecError {
    /// Shorthand used by every bit-scan loop when the reader runs dry.
    pub(crate) fn truncated(what: &str, position: usize) -> Self {
        CodecError::MalformedStream(format!(
            "stream ended inside {} at bit {}",
            what, position
        ))
    }
}
