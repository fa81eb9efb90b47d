//! # csspack
//!
//! Packs a parsed stylesheet into a compact bit stream and restores it.
//!
//! ## Format
//!
//! ```text
//! stream      := PREAMBLE block* END
//! PREAMBLE    := serialized Huffman tree over property tokens
//! block       := 01 mediaBlock | 00 rawBlock
//! END         := 1x
//! mediaBlock  := string(query) rule* ESCAPE_SELECTOR
//! rule        := string(selector)+ ESCAPE_SELECTOR (code(property) string(value))* code(ESCAPE)
//! rawBlock    := string(contents)
//! ```
//!
//! Strings are NUL-terminated and uncompressed. Only property names go
//! through the Huffman coder. Bits are packed least-significant first, and
//! there is no magic number, version or length prefix.
//!
//! ## Example
//!
//! ```
//! use csspack::StylesheetCodec;
//! use csspack_core::{Rule, Stylesheet, StylesheetCompressor, StylesheetDecompressor};
//!
//! let sheet = Stylesheet::new().rule(Rule::new(["a"]).declaration("color", "red"));
//! let codec = StylesheetCodec::new();
//!
//! let packed = codec.compress(&sheet).unwrap();
//! let text = codec.decompress_text(&packed).unwrap();
//! assert_eq!(text, "a {\n  color: red;\n}");
//! ```

pub mod codec;
pub mod decode;
pub mod encode;
pub mod grammar;
pub mod group;
pub mod minify;
pub mod render;

pub use codec::StylesheetCodec;
pub use decode::{decode_blocks, PartialDecode};
pub use encode::{encode_blocks, scan_blocks, Encoded};
pub use group::group_blocks;
pub use minify::WhitespaceMinifier;
pub use render::render_blocks;

pub use csspack_core::{
    Block, CodecConfig, CompressionStats, Declaration, Error, MediaRule, Minifier, Node, Result,
    Rule, Stylesheet,
};
