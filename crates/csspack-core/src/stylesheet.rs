//! Stylesheet tree consumed by the encoder and produced by the decoder.
//!
//! Parsing stylesheet text into this shape is left to an external parser.
//! The codec only walks it.

use serde::{Deserialize, Serialize};

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A plain rule: selectors plus declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Create a rule with the given selectors and no declarations.
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            declarations: Vec::new(),
        }
    }

    /// Append a declaration.
    pub fn declaration(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration::new(property, value));
        self
    }
}

/// A `@media` construct wrapping rules.
///
/// An empty query stands for top-level rules with no wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaRule {
    pub query: String,
    pub rules: Vec<Rule>,
}

impl MediaRule {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Top-level stylesheet entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Rule(Rule),
    Media(MediaRule),
    /// Any other construct, carried as source text for the external minifier.
    Other(String),
}

/// Ordered list of top-level entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.nodes.push(Node::Rule(rule));
        self
    }

    /// Append a media rule.
    pub fn media(mut self, media: MediaRule) -> Self {
        self.nodes.push(Node::Media(media));
        self
    }

    /// Append an opaque node.
    pub fn other(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Other(text.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Unit of the packed stream.
///
/// Consecutive top-level rules are grouped into a media block with an empty
/// query; other nodes become raw blocks holding their minified text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Media(MediaRule),
    Raw(String),
}

impl Block {
    /// Number of rules carried by this block.
    pub fn rule_count(&self) -> usize {
        match self {
            Block::Media(media) => media.rules.len(),
            Block::Raw(_) => 0,
        }
    }

    /// Number of declarations carried by this block.
    pub fn declaration_count(&self) -> usize {
        match self {
            Block::Media(media) => media.rules.iter().map(|r| r.declarations.len()).sum(),
            Block::Raw(_) => 0,
        }
    }
}

impl From<Vec<Block>> for Stylesheet {
    /// Rebuild a tree from decoded blocks. Empty-query media blocks unwrap
    /// into top-level rules; raw blocks become opaque nodes.
    fn from(blocks: Vec<Block>) -> Self {
        let mut nodes = Vec::with_capacity(blocks.len());
        for block in blocks {
            match block {
                Block::Media(media) if media.query.is_empty() => {
                    nodes.extend(media.rules.into_iter().map(Node::Rule));
                }
                Block::Media(media) => nodes.push(Node::Media(media)),
                Block::Raw(text) => nodes.push(Node::Other(text)),
            }
        }
        Stylesheet { nodes }
    }
}
