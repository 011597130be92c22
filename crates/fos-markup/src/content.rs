//! Tag Content
//!
//! What may be attached to a tag. Plain strings are escaped (or embedded
//! verbatim by raw-content tags), raw strings are always embedded verbatim,
//! and nodes are attached as they are. Anything else is rejected by the type
//! system.

use crate::{MarkupError, Node, Result};

/// Content accepted by tags and by [`crate::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// String converted to text according to the tag's content mode
    Text(String),
    /// Pre-escaped string, embedded verbatim
    Raw(String),
    /// Existing node
    Node(Node),
}

impl Content {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    /// Raw content from UTF-8 bytes
    pub fn from_utf8(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        String::from_utf8(bytes.into())
            .map(Self::Raw)
            .map_err(|e| MarkupError::InvalidUtf8(e.utf8_error().to_string()))
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Content {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&Node> for Content {
    fn from(node: &Node) -> Self {
        Self::Node(node.clone())
    }
}

impl TryFrom<&[u8]> for Content {
    type Error = MarkupError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_utf8(bytes)
    }
}

impl TryFrom<Vec<u8>> for Content {
    type Error = MarkupError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_utf8(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_text() {
        assert_eq!(Content::from("a"), Content::Text("a".into()));
        assert_eq!(Content::from(String::from("a")), Content::text("a"));
    }

    #[test]
    fn test_bytes_are_raw() {
        let content = Content::try_from(&b"<b>"[..]).unwrap();
        assert_eq!(content, Content::raw("<b>"));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = Content::try_from(vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, MarkupError::InvalidUtf8(_)));
    }
}
