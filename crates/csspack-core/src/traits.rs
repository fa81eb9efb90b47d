//! Core traits for packing and unpacking stylesheets.
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Minifier  (external printer for opaque nodes)
//!
//! StylesheetCompressor / StylesheetDecompressor
//!       ↓
//! StylesheetCodecExt  (round-trip helpers)
//! ```

use crate::error::Result;
use crate::stats::CompressionStats;
use crate::stylesheet::{Block, Stylesheet};
use crate::types::CompressionRatio;

/// Turns an opaque top-level node into minified text.
///
/// Implemented by the stylesheet printer the caller already uses.
pub trait Minifier {
    /// Minify the source text of one node. An empty result drops the node.
    fn minify(&self, source: &str) -> Result<String>;
}

impl<F> Minifier for F
where
    F: Fn(&str) -> Result<String>,
{
    fn minify(&self, source: &str) -> Result<String> {
        self(source)
    }
}

/// Stylesheet tree to packed bytes.
pub trait StylesheetCompressor {
    /// The block sequence a stylesheet packs into.
    fn group(&self, sheet: &Stylesheet) -> Result<Vec<Block>>;

    /// Pack a stylesheet.
    fn compress(&self, sheet: &Stylesheet) -> Result<Vec<u8>>;

    /// Pack a stylesheet and report what went into the output.
    fn compress_with_stats(&self, sheet: &Stylesheet) -> Result<(Vec<u8>, CompressionStats)>;
}

/// Packed bytes to decoded blocks.
pub trait StylesheetDecompressor {
    /// Decode every block of a packed stream.
    fn decompress(&self, input: &[u8]) -> Result<Vec<Block>>;

    /// Decode a packed stream and render it as stylesheet text.
    fn decompress_text(&self, input: &[u8]) -> Result<String>;
}

/// Helpers for types that both pack and unpack.
pub trait StylesheetCodecExt: StylesheetCompressor + StylesheetDecompressor {
    /// Pack then unpack, comparing against the grouped form of the input.
    ///
    /// Top-level rules come back grouped and opaque nodes come back minified,
    /// so the comparison runs on blocks rather than on the raw tree.
    fn verify_roundtrip(&self, sheet: &Stylesheet) -> Result<bool> {
        let expected = self.group(sheet)?;
        let packed = self.compress(sheet)?;
        let decoded = self.decompress(&packed)?;
        Ok(decoded == expected)
    }

    /// Compression ratio for the given stylesheet.
    fn measure_ratio(&self, sheet: &Stylesheet) -> Result<CompressionRatio> {
        let (_, stats) = self.compress_with_stats(sheet)?;
        Ok(stats.ratio())
    }
}

impl<T> StylesheetCodecExt for T where T: StylesheetCompressor + StylesheetDecompressor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_minifier() {
        let upper = |s: &str| -> Result<String> { Ok(s.to_uppercase()) };
        assert_eq!(upper.minify("abc").unwrap(), "ABC");
    }
}
