//! # csspack Core
//!
//! Core traits, types, and errors for the csspack stylesheet codec.
//!
//! csspack packs a parsed stylesheet into a compact bit stream: property
//! names are Huffman-coded, everything else travels as raw NUL-terminated
//! strings inside a small block grammar.
//!
//! ## Core Traits
//!
//! - [`Minifier`] - Renders opaque top-level nodes to minified text
//! - [`StylesheetCompressor`] - Stylesheet tree to bytes
//! - [`StylesheetDecompressor`] - Bytes back to decoded blocks
//! - [`StylesheetCodecExt`] - Round-trip helpers for codecs that do both
//!
//! ## Example
//!
//! ```ignore
//! use csspack::StylesheetCodec;
//! use csspack_core::{Rule, Stylesheet, StylesheetCompressor};
//!
//! let sheet = Stylesheet::new().rule(Rule::new(["a"]).declaration("color", "red"));
//! let codec = StylesheetCodec::new();
//! let packed = codec.compress(&sheet)?;
//! ```

pub mod config;
pub mod error;
pub mod stats;
pub mod stylesheet;
pub mod traits;
pub mod types;

pub use config::CodecConfig;
pub use error::{Error, Result};
pub use stats::CompressionStats;
pub use stylesheet::{Block, Declaration, MediaRule, Node, Rule, Stylesheet};
pub use traits::{Minifier, StylesheetCodecExt, StylesheetCompressor, StylesheetDecompressor};
pub use types::CompressionRatio;
