//! Arena-backed Huffman tree and its derived code map.

use core::cmp::Reverse;
use core::fmt;
use std::collections::BinaryHeap;

use csspack_core::{Error, Result};
use indexmap::IndexMap;
use tracing::trace;

use crate::bitstream::BitReader;
use crate::token::Token;

use super::frequency::FrequencyTable;

/// Index of a node in a [`HuffmanTree`] arena.
pub type NodeId = usize;

/// Tree node. Internal nodes always have two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf(Token),
    Internal { left: NodeId, right: NodeId },
}

/// Binary prefix-code tree over tokens.
///
/// Immutable once built. Weights are only used during construction and are
/// not kept.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    pub(super) nodes: Vec<HuffmanNode>,
    pub(super) root: Option<NodeId>,
}

impl HuffmanTree {
    /// Build a tree by repeatedly merging the two lightest entries.
    ///
    /// Ties go to the entry that entered the working set first: leaves in
    /// observation order, then merged nodes in creation order. The first
    /// entry taken becomes the left child.
    pub fn build(freq: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(freq.len() * 2);
        let mut heap = BinaryHeap::with_capacity(freq.len());

        // Node ids are handed out in working-set order, so the id doubles
        // as the tie-break sequence.
        for (token, count) in freq.iter() {
            heap.push(Reverse((count, nodes.len())));
            nodes.push(HuffmanNode::Leaf(token.clone()));
        }

        let root = loop {
            let Some(Reverse((left_weight, left))) = heap.pop() else {
                break None;
            };
            let Some(Reverse((right_weight, right))) = heap.pop() else {
                break Some(left);
            };
            heap.push(Reverse((left_weight + right_weight, nodes.len())));
            nodes.push(HuffmanNode::Internal { left, right });
        };

        let tree = Self { nodes, root };
        trace!(leaves = tree.leaf_count(), depth = tree.depth(), "built huffman tree");
        tree
    }

    /// Root node, `None` for an empty alphabet.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, HuffmanNode::Leaf(_)))
            .count()
    }

    /// Longest root-to-leaf path in edges.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                HuffmanNode::Leaf(_) => max = max.max(depth),
                HuffmanNode::Internal { left, right } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        max
    }

    /// Walk the tree, `0` for left and `1` for right, recording each leaf's path.
    ///
    /// A tree that is a single leaf gives that token the empty code.
    pub fn code_map(&self) -> PrefixCodeMap {
        let mut codes = IndexMap::with_capacity(self.leaf_count());
        let Some(root) = self.root else {
            return PrefixCodeMap { codes };
        };

        let mut stack = vec![(root, Code::default())];
        while let Some((id, code)) = stack.pop() {
            match &self.nodes[id] {
                HuffmanNode::Leaf(token) => {
                    codes.insert(token.clone(), code);
                }
                HuffmanNode::Internal { left, right } => {
                    stack.push((*right, code.with(true)));
                    stack.push((*left, code.with(false)));
                }
            }
        }
        PrefixCodeMap { codes }
    }

    /// Descend from the root pulling one bit per internal node.
    pub fn decode_with<F>(&self, mut next_bit: F) -> Result<&Token>
    where
        F: FnMut() -> Result<bool>,
    {
        let mut id = self
            .root
            .ok_or_else(|| Error::malformed_tree("cannot decode with an empty tree"))?;
        loop {
            match &self.nodes[id] {
                HuffmanNode::Leaf(token) => return Ok(token),
                HuffmanNode::Internal { left, right } => {
                    id = if next_bit()? { *right } else { *left };
                }
            }
        }
    }

    /// Decode one token from a bit reader.
    pub fn decode(&self, input: &mut BitReader<'_>) -> Result<&Token> {
        self.decode_with(|| input.read_bit())
    }
}

/// Bit string assigned to one token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    fn with(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Check if `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Token to code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixCodeMap {
    codes: IndexMap<Token, Code>,
}

impl PrefixCodeMap {
    /// Code for `token`, failing if it was never observed.
    pub fn encode(&self, token: &Token) -> Result<&Code> {
        self.codes
            .get(token)
            .ok_or_else(|| Error::UnknownToken(token.to_string()))
    }

    pub fn get(&self, token: &Token) -> Option<&Code> {
        self.codes.get(token)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in left-to-right leaf order.
    pub fn iter(&self) -> impl Iterator<Item = (&Token, &Code)> {
        self.codes.iter()
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}
