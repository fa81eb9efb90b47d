//! Preamble form of a Huffman tree.

use csspack_core::{Error, Result};

use crate::bitstream::{BitReader, BitStream};
use crate::token::Token;

use super::tree::{HuffmanNode, HuffmanTree, NodeId};
use super::{ABSENT, FIELD_END, INTERNAL};

fn write_field(out: &mut BitStream, bytes: &[u8]) {
    out.write_bytes(bytes);
    out.write_octet(FIELD_END);
}

fn read_field(input: &mut BitReader<'_>) -> Result<Vec<u8>> {
    input.read_until(FIELD_END).map_err(|e| match e {
        Error::OutOfRange { position, length } => Error::malformed_tree(format!(
            "stream ended mid-tree at bit {} of {}",
            position, length
        )),
        other => other,
    })
}

impl HuffmanTree {
    /// Write the tree in pre-order: node, left subtree, right subtree.
    ///
    /// An empty tree is a single absent field.
    pub fn serialize(&self, out: &mut BitStream) {
        let mut stack: Vec<Option<NodeId>> = vec![self.root];
        while let Some(next) = stack.pop() {
            match next.map(|id| &self.nodes[id]) {
                None => write_field(out, &[ABSENT]),
                Some(HuffmanNode::Leaf(token)) => {
                    write_field(out, token.as_bytes());
                    stack.push(None);
                    stack.push(None);
                }
                Some(HuffmanNode::Internal { left, right }) => {
                    write_field(out, &[INTERNAL]);
                    stack.push(Some(*right));
                    stack.push(Some(*left));
                }
            }
        }
    }

    /// Read a tree written by [`serialize`](Self::serialize).
    pub fn deserialize(input: &mut BitReader<'_>) -> Result<Self> {
        let mut tree = HuffmanTree::default();
        tree.root = tree.read_node(input)?;
        Ok(tree)
    }

    fn read_node(&mut self, input: &mut BitReader<'_>) -> Result<Option<NodeId>> {
        let field = read_field(input)?;
        let node = match field.as_slice() {
            [ABSENT] => return Ok(None),
            [INTERNAL] => {
                let (Some(left), Some(right)) = (self.read_node(input)?, self.read_node(input)?)
                else {
                    return Err(Error::malformed_tree("internal node is missing a child"));
                };
                HuffmanNode::Internal { left, right }
            }
            _ => {
                let token = Token::from_bytes(field)?;
                if self.read_node(input)?.is_some() || self.read_node(input)?.is_some() {
                    return Err(Error::malformed_tree(format!("leaf {:?} has children", token)));
                }
                HuffmanNode::Leaf(token)
            }
        };
        self.nodes.push(node);
        Ok(Some(self.nodes.len() - 1))
    }
}
