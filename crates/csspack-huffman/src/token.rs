//! Huffman alphabet for property names.

use core::fmt;

use csspack_core::{Error, Result};

use crate::huffman::RESERVED_BYTES;

/// Wire form of the escape token.
pub const ESCAPE: &str = "\\e";

/// Symbol of the property alphabet.
///
/// The escape marker terminates declaration and selector lists. Keeping it a
/// separate variant means the grammar matches on it instead of comparing
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Escape,
    Property(String),
}

impl Token {
    /// Create a property token.
    ///
    /// Rejects the escape spelling and names containing tree framing bytes,
    /// either of which would read back as something else.
    pub fn property(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name == ESCAPE {
            return Err(Error::reserved("property", name));
        }
        if name.bytes().any(|b| RESERVED_BYTES.contains(&b)) {
            return Err(Error::reserved("property", name));
        }
        Ok(Token::Property(name))
    }

    /// Decode a token from its serialized bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes == ESCAPE.as_bytes() {
            return Ok(Token::Escape);
        }
        Ok(Token::Property(String::from_utf8(bytes)?))
    }

    /// Serialized bytes of this token.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Token::Escape => ESCAPE.as_bytes(),
            Token::Property(name) => name.as_bytes(),
        }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, Token::Escape)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Escape => f.write_str(ESCAPE),
            Token::Property(name) => f.write_str(name),
        }
    }
}
