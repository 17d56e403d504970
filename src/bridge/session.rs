// In: src/bridge/session.rs

//! A stateful facade for the encode-then-decode workflow of an interactive front
//! end: the user encodes some text, then decodes the displayed bits.
//!
//! The Huffman table from the most recent Huffman encode is kept here, and only
//! here. Every other method is stateless, so encoding with them leaves the stored
//! table alone.

use std::sync::Arc;

use crate::bridge::format::{DecodeReport, EncodeReport};
use crate::bridge::stateless_api;
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::kernels::huffman::CodeTable;
use crate::kernels::Method;

#[derive(Debug, Clone)]
pub struct Session {
    config: Arc<CodecConfig>,
    last_table: Option<CodeTable>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Arc::new(CodecConfig::default()))
    }
}

impl Session {
    pub fn new(config: Arc<CodecConfig>) -> Self {
        Self {
            config,
            last_table: None,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes `text`. A Huffman encode replaces the stored table.
    pub fn encode(&mut self, method_name: &str, text: &str) -> Result<EncodeReport, CodecError> {
        let (report, table) = stateless_api::encode_text(method_name, text, &self.config)?;
        if report.method == Method::Huffman {
            self.last_table = table;
        }
        Ok(report)
    }

    /// Decodes `bit_string`. Huffman uses the table of the last Huffman encode in
    /// this session and fails with `StatePrecondition` if there was none.
    pub fn decode(&self, method_name: &str, bit_string: &str) -> Result<DecodeReport, CodecError> {
        let method: Method = method_name.parse()?;
        if method.needs_code_table() && self.last_table.is_none() {
            return Err(CodecError::StatePrecondition(
                "encode a text with Huffman before decoding Huffman bits".to_string(),
            ));
        }
        stateless_api::decode_text(method_name, bit_string, &self.config, self.last_table.as_ref())
    }

    pub fn code_table(&self) -> Option<&CodeTable> {
        self.last_table.as_ref()
    }

    /// Rendered tree of the last Huffman encode, if any.
    pub fn last_tree(&self) -> Option<String> {
        self.last_table.as_ref().map(CodeTable::display_tree)
    }

    pub fn clear(&mut self) {
        self.last_table = None;
    }
}
