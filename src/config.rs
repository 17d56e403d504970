// In: src/config.rs

//! The single source of truth for codec parameters.
//!
//! `CodecConfig` is created once at the application boundary (from defaults or a
//! JSON document) and then shared read-only, typically as an `Arc<CodecConfig>`.
//! None of these values are written into the encoded bits, so the encoder and
//! the decoder must be given the same config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::kernels::fibonacci::DEFAULT_CEILING;
use crate::kernels::golomb_rice::DEFAULT_DIVISOR;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Golomb-Rice divisor `m`. Must be a power of two.
    #[serde(default = "default_golomb_divisor")]
    pub golomb_divisor: u64,

    /// Largest value the Fibonacci table is generated for.
    #[serde(default = "default_fibonacci_ceiling")]
    pub fibonacci_ceiling: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            golomb_divisor: default_golomb_divisor(),
            fibonacci_ceiling: default_fibonacci_ceiling(),
        }
    }
}

impl CodecConfig {
    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CodecError> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if !self.golomb_divisor.is_power_of_two() {
            return Err(CodecError::InvalidInput(format!(
                "golomb_divisor must be a power of two, got {}",
                self.golomb_divisor
            )));
        }
        if self.fibonacci_ceiling == 0 {
            return Err(CodecError::InvalidInput(
                "fibonacci_ceiling must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Helper for `serde` to provide a default for `golomb_divisor`.
fn default_golomb_divisor() -> u64 {
    DEFAULT_DIVISOR
}

/// Helper for `serde` to provide a default for `fibonacci_ceiling`.
fn default_fibonacci_ceiling() -> u64 {
    DEFAULT_CEILING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.golomb_divisor, 8);
        assert_eq!(config.fibonacci_ceiling, 0x10FFFF);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = CodecConfig::from_json_str(r#"{ "golomb_divisor": 16 }"#).unwrap();
        assert_eq!(config.golomb_divisor, 16);
        assert_eq!(config.fibonacci_ceiling, DEFAULT_CEILING);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            CodecConfig::from_json_str(r#"{ "golomb_divisor": 12 }"#),
            Err(CodecError::InvalidInput(_))
        ));
        assert!(matches!(
            CodecConfig::from_json_str(r#"{ "fibonacci_ceiling": 0 }"#),
            Err(CodecError::InvalidInput(_))
        ));
        assert!(matches!(
            CodecConfig::from_json_str("not json"),
            Err(CodecError::SerdeJson(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CodecConfig::from_json_file("/nonexistent/codeword/config.json");
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = CodecConfig {
            golomb_divisor: 4,
            fibonacci_ceiling: 1000,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CodecConfig::from_json_str(&json).unwrap(), config);
    }
}
