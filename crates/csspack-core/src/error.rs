//! Error types for stylesheet packing operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
///
/// The packed format carries no framing beyond its own grammar, so every
/// failure aborts the current operation. Nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Read past the written length of a bit stream.
    #[error("read out of range: bit position {position} of {length}")]
    OutOfRange { position: usize, length: usize },

    /// Encoding a token that has no code in the current prefix map.
    #[error("unknown token: {0:?}")]
    UnknownToken(String),

    /// Serialized Huffman tree does not resolve to a 2-ary tree.
    #[error("malformed huffman tree: {0}")]
    MalformedTree(String),

    /// Data collides with a grammar sentinel or framing byte.
    #[error("reserved token in {context}: {value:?}")]
    ReservedToken {
        context: &'static str,
        value: String,
    },

    /// A rule with no selectors reads back as the end of its media block.
    #[error("rule has an empty selector list")]
    EmptySelectorList,

    /// A decoded string field is not valid UTF-8.
    #[error("invalid utf-8 in string field: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The external minifier rejected a node.
    #[error("minifier error: {0}")]
    Minifier(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Create an out-of-range read error.
    pub fn out_of_range(position: usize, length: usize) -> Self {
        Error::OutOfRange { position, length }
    }

    /// Create a malformed tree error.
    pub fn malformed_tree(message: impl Into<String>) -> Self {
        Error::MalformedTree(message.into())
    }

    /// Create a reserved token error.
    pub fn reserved(context: &'static str, value: impl Into<String>) -> Self {
        Error::ReservedToken {
            context,
            value: value.into(),
        }
    }

    /// Create a minifier error.
    pub fn minifier(message: impl Into<String>) -> Self {
        Error::Minifier(message.into())
    }

    /// Whether retrying with different parameters could succeed.
    ///
    /// The format assumes self-produced input, so no error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::OutOfRange { .. } => "out_of_range",
            Error::UnknownToken(_) => "unknown_token",
            Error::MalformedTree(_) => "malformed_tree",
            Error::ReservedToken { .. } => "reserved_token",
            Error::EmptySelectorList => "empty_selector_list",
            Error::InvalidUtf8(_) => "invalid_utf8",
            Error::Minifier(_) => "minifier",
            Error::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = Error::out_of_range(16, 16);
        let msg = err.to_string();
        assert!(msg.contains("out of range"));
        assert!(msg.contains("16 of 16"));
    }

    #[test]
    fn test_reserved_display() {
        let err = Error::reserved("selector", "\\e");
        assert!(err.to_string().contains("selector"));
        assert_eq!(err.category(), "reserved_token");
    }

    #[test]
    fn test_utf8_conversion() {
        let bad = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: Error = bad.into();
        assert_eq!(err.category(), "invalid_utf8");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
