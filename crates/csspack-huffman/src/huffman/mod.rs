//! Huffman coding for property tokens.
//!
//! ## Overview
//!
//! Unlike byte-oriented coders, the alphabet here is whole tokens (property
//! names plus the escape marker), so the tree is kept explicitly instead of
//! being reduced to canonical code lengths. The decoder reads the encoder's
//! exact tree from the stream preamble and never rebuilds it.
//!
//! ## Tree serialization
//!
//! Pre-order, one field per node, each field terminated by [`FIELD_END`]:
//!
//! ```text
//! absent child   [ABSENT]   FIELD_END
//! internal node  [INTERNAL] FIELD_END  <left subtree> <right subtree>
//! leaf           token bytes FIELD_END  [ABSENT] FIELD_END [ABSENT] FIELD_END
//! ```
//!
//! Token bytes must not contain any of [`RESERVED_BYTES`].

mod frequency;
mod serialize;
mod tree;

pub use frequency::FrequencyTable;
pub use tree::{Code, HuffmanNode, HuffmanTree, NodeId, PrefixCodeMap};

use csspack_core::Result;

use crate::bitstream::{BitReader, BitStream};
use crate::token::Token;

/// Field content marking a missing child.
pub const ABSENT: u8 = 0x00;

/// Field content marking an internal node.
pub const INTERNAL: u8 = 0x01;

/// Field terminator.
pub const FIELD_END: u8 = 0x03;

/// Bytes a token may not contain.
pub const RESERVED_BYTES: [u8; 3] = [ABSENT, INTERNAL, FIELD_END];

/// Tree and code map for one encode or decode session.
#[derive(Debug, Clone)]
pub struct HuffmanCoder {
    tree: HuffmanTree,
    codes: PrefixCodeMap,
}

impl HuffmanCoder {
    /// Build from observed frequencies.
    pub fn from_frequencies(freq: &FrequencyTable) -> Self {
        Self::from_tree(HuffmanTree::build(freq))
    }

    /// Wrap an existing tree, deriving its code map.
    pub fn from_tree(tree: HuffmanTree) -> Self {
        let codes = tree.code_map();
        Self { tree, codes }
    }

    /// Read a serialized tree.
    pub fn deserialize(input: &mut BitReader<'_>) -> Result<Self> {
        HuffmanTree::deserialize(input).map(Self::from_tree)
    }

    /// Write the tree in its serialized form.
    pub fn serialize(&self, out: &mut BitStream) {
        self.tree.serialize(out);
    }

    /// Code for a token.
    pub fn encode(&self, token: &Token) -> Result<&Code> {
        self.codes.encode(token)
    }

    /// Append the code for `token` to `out`.
    pub fn write(&self, token: &Token, out: &mut BitStream) -> Result<()> {
        let code = self.codes.encode(token)?;
        out.write_bits(code.bits());
        Ok(())
    }

    /// Decode one token.
    pub fn decode(&self, input: &mut BitReader<'_>) -> Result<&Token> {
        self.tree.decode(input)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &PrefixCodeMap {
        &self.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str) -> Token {
        Token::property(name).unwrap()
    }

    #[test]
    fn test_reserved_bytes_distinct() {
        assert_ne!(ABSENT, INTERNAL);
        assert_ne!(INTERNAL, FIELD_END);
        assert_ne!(ABSENT, FIELD_END);
    }

    #[test]
    fn test_coder_roundtrip() {
        let mut freq = FrequencyTable::new();
        for name in ["color", "color", "margin", "color", "padding", "display"] {
            freq.observe(prop(name));
        }
        freq.observe(Token::Escape);

        let coder = HuffmanCoder::from_frequencies(&freq);
        let message = [
            prop("display"),
            prop("color"),
            Token::Escape,
            prop("padding"),
            prop("margin"),
            Token::Escape,
        ];

        let mut stream = BitStream::new();
        for token in &message {
            coder.write(token, &mut stream).unwrap();
        }

        let mut reader = stream.reader();
        for token in &message {
            assert_eq!(coder.decode(&mut reader).unwrap(), token);
        }
        assert!(!reader.has_more());
    }

    #[test]
    fn test_coder_through_preamble() {
        let mut freq = FrequencyTable::new();
        for name in ["top", "left", "top", "z-index"] {
            freq.observe(prop(name));
        }
        freq.observe(Token::Escape);
        let encoder = HuffmanCoder::from_frequencies(&freq);

        let mut stream = BitStream::new();
        encoder.serialize(&mut stream);
        encoder.write(&prop("z-index"), &mut stream).unwrap();
        encoder.write(&Token::Escape, &mut stream).unwrap();

        let mut reader = stream.reader();
        let decoder = HuffmanCoder::deserialize(&mut reader).unwrap();
        assert_eq!(decoder.codes(), encoder.codes());
        assert_eq!(decoder.decode(&mut reader).unwrap(), &prop("z-index"));
        assert_eq!(decoder.decode(&mut reader).unwrap(), &Token::Escape);
    }

    #[test]
    fn test_coder_unknown_token() {
        let mut freq = FrequencyTable::new();
        freq.observe(prop("color"));
        let coder = HuffmanCoder::from_frequencies(&freq);

        let mut stream = BitStream::new();
        let err = coder.write(&prop("width"), &mut stream).unwrap_err();
        assert_eq!(err.category(), "unknown_token");
        assert!(stream.is_empty());
    }
}
