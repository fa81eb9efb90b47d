//! Codec configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for one codec session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Growth step of a bit stream, in bits (default: 4096).
    pub block_bits: usize,

    /// Indentation used when rendering declarations and media bodies.
    pub indent: String,

    /// Keep blocks decoded before a failure instead of failing the call.
    pub lenient: bool,

    /// Drop raw blocks whose minified text is empty.
    pub skip_empty_raw: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            block_bits: default_block_bits(),
            indent: default_indent(),
            lenient: false,
            skip_empty_raw: true,
        }
    }
}

fn default_block_bits() -> usize {
    4096
}

fn default_indent() -> String {
    "  ".to_string()
}

impl CodecConfig {
    /// Parse a configuration from a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CodecConfig =
            toml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Builder-style setter for lenient decoding.
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Builder-style setter for the render indent.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Builder-style setter for the bit stream growth step.
    pub fn with_block_bits(mut self, block_bits: usize) -> Self {
        self.block_bits = block_bits;
        self.normalized()
    }

    /// Growth step rounded up to a whole, non-zero number of octets.
    pub fn normalized(mut self) -> Self {
        self.block_bits = self.block_bits.max(8).div_ceil(8) * 8;
        self
    }
}
