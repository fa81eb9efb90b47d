//! Stylesheet codec tying grouping, encoding, decoding and rendering together.

use std::fmt;
use std::time::Instant;

use csspack_core::{
    Block, CodecConfig, CompressionStats, Minifier, Result, Stylesheet, StylesheetCompressor,
    StylesheetDecompressor,
};
use tracing::{debug, warn};

use crate::decode::{decode_blocks, PartialDecode};
use crate::encode::encode_blocks;
use crate::group::group_blocks;
use crate::minify::WhitespaceMinifier;
use crate::render::render_blocks;

/// Packs stylesheets into the csspack format and back.
///
/// Each call is an independent session with its own bit stream and coder,
/// so one codec can be shared across threads.
pub struct StylesheetCodec {
    config: CodecConfig,
    minifier: Box<dyn Minifier + Send + Sync>,
}

impl StylesheetCodec {
    /// Create a codec with default settings and the built-in minifier.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Create a codec with the given configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            config: config.normalized(),
            minifier: Box::new(WhitespaceMinifier),
        }
    }

    /// Replace the minifier used for opaque nodes.
    pub fn with_minifier<M>(mut self, minifier: M) -> Self
    where
        M: Minifier + Send + Sync + 'static,
    {
        self.minifier = Box::new(minifier);
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode as many complete blocks as the input allows.
    pub fn decompress_partial(&self, input: &[u8]) -> PartialDecode {
        decode_blocks(input)
    }

    /// Decode and rebuild a stylesheet tree.
    pub fn decompress_stylesheet(&self, input: &[u8]) -> Result<Stylesheet> {
        self.decompress(input).map(Stylesheet::from)
    }

    /// Render blocks with this codec's indent.
    pub fn render(&self, blocks: &[Block]) -> String {
        render_blocks(blocks, &self.config.indent)
    }
}

impl Default for StylesheetCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StylesheetCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StylesheetCodec")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StylesheetCompressor for StylesheetCodec {
    fn group(&self, sheet: &Stylesheet) -> Result<Vec<Block>> {
        group_blocks(sheet, self.minifier.as_ref(), &self.config)
    }

    fn compress(&self, sheet: &Stylesheet) -> Result<Vec<u8>> {
        let blocks = self.group(sheet)?;
        Ok(encode_blocks(&blocks, &self.config)?.stream.into_bytes())
    }

    fn compress_with_stats(&self, sheet: &Stylesheet) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();
        let blocks = self.group(sheet)?;
        let encoded = encode_blocks(&blocks, &self.config)?;
        let total_bits = encoded.stream.len();
        let output = encoded.stream.into_bytes();

        let mut stats = CompressionStats {
            distinct_tokens: encoded.distinct_tokens,
            preamble_bits: encoded.preamble_bits,
            total_bits,
            original_size: self.render(&blocks).len(),
            compressed_size: output.len(),
            time_us: start.elapsed().as_micros() as u64,
            ..CompressionStats::default()
        };
        for block in &blocks {
            match block {
                Block::Media(_) => stats.media_blocks += 1,
                Block::Raw(_) => stats.raw_blocks += 1,
            }
            stats.rules += block.rule_count();
            stats.declarations += block.declaration_count();
        }

        debug!("{}", stats.summary());
        Ok((output, stats))
    }
}

impl StylesheetDecompressor for StylesheetCodec {
    fn decompress(&self, input: &[u8]) -> Result<Vec<Block>> {
        decode_blocks(input).into_result()
    }

    fn decompress_text(&self, input: &[u8]) -> Result<String> {
        let partial = decode_blocks(input);
        let blocks = match partial.error {
            None => partial.blocks,
            Some(err) if self.config.lenient => {
                warn!(
                    kept = partial.blocks.len(),
                    error = %err,
                    "discarding undecodable tail"
                );
                partial.blocks
            }
            Some(err) => return Err(err),
        };
        Ok(self.render(&blocks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csspack_core::{MediaRule, Rule, StylesheetCodecExt};

    fn sample() -> Stylesheet {
        Stylesheet::new()
            .other("@charset   \"utf-8\" ;")
            .rule(Rule::new(["body"]).declaration("margin", "0").declaration("color", "#333"))
            .rule(Rule::new(["a", "a:visited"]).declaration("color", "teal"))
            .media(
                MediaRule::new("(max-width: 600px)")
                    .rule(Rule::new(["body"]).declaration("margin", "4px")),
            )
    }

    #[test]
    fn test_compress_decompress() {
        let codec = StylesheetCodec::new();
        let packed = codec.compress(&sample()).unwrap();
        let blocks = codec.decompress(&packed).unwrap();
        assert_eq!(blocks, codec.group(&sample()).unwrap());
        assert_eq!(blocks[0], Block::Raw("@charset \"utf-8\";".into()));
    }

    #[test]
    fn test_verify_roundtrip() {
        assert!(StylesheetCodec::new().verify_roundtrip(&sample()).unwrap());
    }

    #[test]
    fn test_stats() {
        let codec = StylesheetCodec::new();
        let (packed, stats) = codec.compress_with_stats(&sample()).unwrap();

        assert_eq!(stats.media_blocks, 2);
        assert_eq!(stats.raw_blocks, 1);
        assert_eq!(stats.rules, 3);
        assert_eq!(stats.declarations, 4);
        // margin, color, escape
        assert_eq!(stats.distinct_tokens, 3);
        assert_eq!(stats.compressed_size, packed.len());
        assert_eq!(stats.compressed_size, stats.total_bits.div_ceil(8));
        assert!(stats.preamble_bits > 0);
        assert_eq!(stats.original_size, codec.render(&codec.group(&sample()).unwrap()).len());
    }

    #[test]
    fn test_lenient_text() {
        let sheet = Stylesheet::new()
            .other("@import url(a.css);")
            .other("@import url(b.css);");
        let packed = StylesheetCodec::new().compress(&sheet).unwrap();
        let truncated = &packed[..packed.len() - 4];

        let strict = StylesheetCodec::new();
        assert!(strict.decompress_text(truncated).is_err());

        let lenient = StylesheetCodec::with_config(CodecConfig::default().with_lenient(true));
        assert_eq!(lenient.decompress_text(truncated).unwrap(), "@import url(a.css);");
    }

    #[test]
    fn test_custom_minifier_and_indent() {
        let codec = StylesheetCodec::with_config(CodecConfig::default().with_indent("    "))
            .with_minifier(|s: &str| -> Result<String> { Ok(s.to_uppercase()) });
        let sheet = Stylesheet::new()
            .other("@page{}")
            .rule(Rule::new(["a"]).declaration("top", "0"));

        let packed = codec.compress(&sheet).unwrap();
        assert_eq!(
            codec.decompress_text(&packed).unwrap(),
            "@PAGE{}\n\na {\n    top: 0;\n}"
        );
    }

    #[test]
    fn test_decompress_stylesheet() {
        let codec = StylesheetCodec::new();
        let sheet = Stylesheet::new()
            .rule(Rule::new(["a"]))
            .media(MediaRule::new("print"));
        let packed = codec.compress(&sheet).unwrap();
        assert_eq!(codec.decompress_stylesheet(&packed).unwrap(), sheet);
    }

    #[test]
    fn test_codec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StylesheetCodec>();
    }
}
