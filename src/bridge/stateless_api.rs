// In: src/bridge/stateless_api.rs

use crate::bits::{parse_bit_string, to_bit_string};
use crate::bridge::format::{DecodeReport, EncodeReport};
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::kernels::huffman::CodeTable;
use crate::kernels::{self, Method};

/// Encodes `text` with the method named `method_name`.
/// Returns the report plus, for Huffman, the table needed to decode it again.
pub fn encode_text(
    method_name: &str,
    text: &str,
    config: &CodecConfig,
) -> Result<(EncodeReport, Option<CodeTable>), CodecError> {
    let method: Method = method_name.parse()?;
    let encoded = kernels::dispatch_encode(method, text, config).map_err(|e| {
        log::warn!("encode with {} rejected: {}", method, e);
        e
    })?;

    let report = EncodeReport {
        method,
        bits: to_bit_string(&encoded.bits),
        bit_len: encoded.bits.len(),
        symbol_count: text.chars().count(),
        tree: encoded.table.as_ref().map(CodeTable::display_tree),
    };
    Ok((report, encoded.table))
}

/// Decodes a `'0'`/`'1'` string with the method named `method_name`.
/// `table` must be the one returned by the Huffman encode that produced the bits.
pub fn decode_text(
    method_name: &str,
    bit_string: &str,
    config: &CodecConfig,
    table: Option<&CodeTable>,
) -> Result<DecodeReport, CodecError> {
    let method: Method = method_name.parse()?;
    let bits = parse_bit_string(bit_string)?;
    let text = kernels::dispatch_decode(method, &bits, config, table).map_err(|e| {
        log::warn!("decode with {} rejected: {}", method, e);
        e
    })?;

    Ok(DecodeReport {
        method,
        symbol_count: text.chars().count(),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_decode_by_name() {
        let config = CodecConfig::default();
        let (report, table) = encode_text("elias", "hi", &config).unwrap();
        assert!(table.is_none());
        assert!(report.tree.is_none());
        assert_eq!(report.bit_len, report.bits.len());
        assert_eq!(report.symbol_count, 2);

        let decoded = decode_text("elias", &report.bits, &config, None).unwrap();
        assert_eq!(decoded.text, "hi");
    }

    #[test]
    fn test_huffman_report_carries_tree() {
        let config = CodecConfig::default();
        let (report, table) = encode_text("huffman", "aab", &config).unwrap();
        assert_eq!(report.tree.as_deref(), Some("* (3)\n  'b' (1)\n  'a' (2)\n"));
        assert_eq!(report.bits, "110");

        let decoded = decode_text("huffman", &report.bits, &config, table.as_ref()).unwrap();
        assert_eq!(decoded.text, "aab");
    }

    #[test]
    fn test_unknown_method_and_bad_bits() {
        let config = CodecConfig::default();
        assert!(matches!(
            encode_text("lzw", "x", &config),
            Err(CodecError::UnknownMethod(_))
        ));
        assert!(matches!(
            decode_text("golomb", "10a0", &config, None),
            Err(CodecError::InvalidBitString { position: 2, found: 'a' })
        ));
    }
}
