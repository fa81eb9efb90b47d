//! Token frequency collection.

use indexmap::IndexMap;

use crate::token::Token;

use super::tree::HuffmanTree;

/// Token occurrence counts in first-observation order.
///
/// The order is the tie-break when two weights are equal, which keeps tree
/// construction deterministic for a given observation sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<Token, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `token`.
    pub fn observe(&mut self, token: Token) {
        *self.counts.entry(token).or_insert(0) += 1;
    }

    /// Occurrences of `token` so far.
    pub fn count(&self, token: &Token) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Distinct tokens observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tokens and counts in first-observation order.
    pub fn iter(&self) -> impl Iterator<Item = (&Token, u64)> {
        self.counts.iter().map(|(token, &count)| (token, count))
    }

    /// Build the prefix-code tree for these counts.
    pub fn build_tree(&self) -> HuffmanTree {
        HuffmanTree::build(self)
    }
}
