//! Statistics for packing operations.

use crate::types::CompressionRatio;

/// Statistics from one compression call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionStats {
    /// Media blocks emitted, synthetic empty-query blocks included.
    pub media_blocks: usize,

    /// Raw blocks emitted.
    pub raw_blocks: usize,

    /// Rules across all media blocks.
    pub rules: usize,

    /// Declarations across all rules.
    pub declarations: usize,

    /// Distinct Huffman tokens, escape included.
    pub distinct_tokens: usize,

    /// Bits spent on the serialized Huffman tree.
    pub preamble_bits: usize,

    /// Total logical bits, end marker included.
    pub total_bits: usize,

    /// Size of the rendered input text in bytes.
    pub original_size: usize,

    /// Packed size in bytes.
    pub compressed_size: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Total blocks emitted.
    pub fn blocks(&self) -> usize {
        self.media_blocks + self.raw_blocks
    }

    /// Size accounting of the packed output.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.preamble_bits, self.total_bits)
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        let ratio = self.ratio();
        format!(
            "Blocks: {} ({} media, {} raw), Rules: {}, Declarations: {}, Bits: {} tree + {} payload + {} pad, Bytes: {} -> {} (ratio: {:.2}x) in {}us",
            self.blocks(),
            self.media_blocks,
            self.raw_blocks,
            self.rules,
            self.declarations,
            ratio.preamble_bits,
            ratio.payload_bits(),
            ratio.padding_bits(),
            self.original_size,
            self.compressed_size,
            ratio.ratio(),
            self.time_us,
        )
    }
}
