//! # csspack Huffman
//!
//! Bit-level primitives and a token Huffman coder for the csspack format.
//!
//! ## Components
//!
//! - [`BitStream`] / [`BitReader`]: append-only bit storage, octets packed
//!   least-significant bit first, with a separate read cursor
//! - [`FrequencyTable`]: insertion-ordered token counts
//! - [`HuffmanTree`]: arena-backed prefix-code tree, built from frequencies
//!   or read back from its serialized form
//! - [`PrefixCodeMap`]: token to bit-string lookup derived from a tree
//! - [`HuffmanCoder`]: tree and code map bundled for one session
//!
//! ## Example
//!
//! ```
//! use csspack_huffman::{BitStream, FrequencyTable, HuffmanCoder, Token};
//!
//! let mut freq = FrequencyTable::new();
//! freq.observe(Token::property("color").unwrap());
//! freq.observe(Token::Escape);
//!
//! let coder = HuffmanCoder::from_frequencies(&freq);
//! let mut stream = BitStream::new();
//! coder.write(&Token::Escape, &mut stream).unwrap();
//!
//! let mut reader = stream.reader();
//! assert_eq!(coder.decode(&mut reader).unwrap(), &Token::Escape);
//! ```

pub mod bitstream;
pub mod huffman;
pub mod token;

pub use bitstream::{BitReader, BitStream, DEFAULT_BLOCK_BITS};
pub use huffman::{
    Code, FrequencyTable, HuffmanCoder, HuffmanNode, HuffmanTree, NodeId, PrefixCodeMap,
};
pub use token::{Token, ESCAPE};
