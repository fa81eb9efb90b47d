//! Size accounting for packed streams.

/// Packed size of a stylesheet against its rendered text.
///
/// A packed stream is measured in bits: the serialized tree, then the
/// blocks and end marker, then up to 7 padding bits to fill the last octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionRatio {
    /// Size of the rendered stylesheet text in bytes.
    pub original_size: usize,
    /// Bits spent on the serialized Huffman tree.
    pub preamble_bits: usize,
    /// Logical bits written, preamble and end marker included.
    pub total_bits: usize,
}

impl CompressionRatio {
    pub fn new(original_size: usize, preamble_bits: usize, total_bits: usize) -> Self {
        CompressionRatio {
            original_size,
            preamble_bits,
            total_bits,
        }
    }

    /// Output length in bytes.
    pub fn compressed_size(&self) -> usize {
        self.total_bits.div_ceil(8)
    }

    /// Bits after the preamble.
    pub fn payload_bits(&self) -> usize {
        self.total_bits.saturating_sub(self.preamble_bits)
    }

    /// Zero bits filling the last octet.
    pub fn padding_bits(&self) -> usize {
        self.compressed_size() * 8 - self.total_bits
    }

    /// Rendered bits per logical packed bit. Higher is better.
    pub fn ratio(&self) -> f64 {
        if self.total_bits == 0 {
            return 0.0;
        }
        (self.original_size * 8) as f64 / self.total_bits as f64
    }

    /// Packed bits spent per byte of rendered text.
    pub fn bits_per_byte(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.total_bits as f64 / self.original_size as f64
    }

    /// Fraction of the logical bits taken by the tree.
    pub fn preamble_share(&self) -> f64 {
        if self.total_bits == 0 {
            return 0.0;
        }
        self.preamble_bits as f64 / self.total_bits as f64
    }

    /// Check if the output is smaller than the rendered text.
    pub fn is_effective(&self) -> bool {
        self.compressed_size() < self.original_size
    }
}
