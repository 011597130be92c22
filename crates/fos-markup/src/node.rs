//! Markup Nodes
//!
//! Immutable node values. Every node renders its markup once, at
//! construction, and keeps the text together with its hash. Two nodes of the
//! same kind are equal exactly when their rendered text is equal.
//!
//! Nodes are cheap handles (`Arc` inside); cloning never copies markup.
//! There is no way to change a node once built:
//!
//! ```compile_fail
//! use fos_markup::Text;
//!
//! let text = Text::new("frozen");
//! text.0.value = "thawed".into();
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::attributes::Attributes;
use crate::tag::{CompositeTag, LeafTag, SingleChildTag};
use crate::{Content, Markup, MarkupError, Result};

/// Hash of rendered markup
pub fn rendered_hash(html: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    html.hash(&mut hasher);
    hasher.finish()
}

/// Frozen rendering of a node
#[derive(Debug)]
pub(crate) struct Rendered {
    html: Box<str>,
    hash: u64,
}

impl Rendered {
    pub(crate) fn new(html: String) -> Self {
        let hash = rendered_hash(&html);
        Self {
            html: html.into_boxed_str(),
            hash,
        }
    }

    pub(crate) fn html(&self) -> &str {
        &self.html
    }

    pub(crate) fn hash(&self) -> u64 {
        self.hash
    }
}

/// Shared behaviour of every node handle: rendering accessors, identity,
/// equality on rendered text, and conversions into [`Node`] and [`Content`].
macro_rules! impl_rendered {
    ($($ty:ident => $variant:ident),+ $(,)?) => {$(
        impl $ty {
            /// Rendered markup
            pub fn html(&self) -> &str {
                self.0.rendered.html()
            }

            /// Hash of the rendered markup
            pub fn rendered_hash(&self) -> u64 {
                self.0.rendered.hash()
            }

            /// Whether both handles refer to the same instance
            pub fn ptr_eq(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.rendered_hash() == other.rendered_hash() && self.html() == other.html()
            }
        }

        impl Eq for $ty {}

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.rendered_hash());
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.html())
            }
        }

        impl ::std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.repr())
            }
        }

        impl From<$ty> for $crate::Node {
            fn from(node: $ty) -> Self {
                $crate::Node::$variant(node)
            }
        }

        impl From<$ty> for $crate::Content {
            fn from(node: $ty) -> Self {
                $crate::Content::Node(node.into())
            }
        }
    )+};
}

pub(crate) use impl_rendered;

/// Kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    RawText,
    Text,
    Comment,
    DocType,
    LeafTag,
    SingleChildTag,
    CompositeTag,
}

impl NodeKind {
    /// Whether nodes of this kind accept content
    pub fn is_container(&self) -> bool {
        matches!(self, Self::SingleChildTag | Self::CompositeTag)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RawText => "raw text",
            Self::Text => "text",
            Self::Comment => "comment",
            Self::DocType => "doctype",
            Self::LeafTag => "leaf tag",
            Self::SingleChildTag => "single-child tag",
            Self::CompositeTag => "composite tag",
        };
        f.write_str(name)
    }
}

/// Pre-escaped literal text, embedded verbatim
#[derive(Clone)]
pub struct RawText(pub(crate) Arc<TextData>);

/// Text that is entity-escaped when rendered
#[derive(Clone)]
pub struct Text(pub(crate) Arc<TextData>);

/// Markup comment
#[derive(Clone)]
pub struct Comment(pub(crate) Arc<TextData>);

pub(crate) struct TextData {
    value: Box<str>,
    rendered: Rendered,
}

impl TextData {
    fn new(value: &str, html: String) -> Arc<Self> {
        Arc::new(Self {
            value: value.into(),
            rendered: Rendered::new(html),
        })
    }
}

impl RawText {
    /// Raw text from the process-wide caches
    pub fn new(value: &str) -> Self {
        Markup::global().raw_text(value)
    }

    pub(crate) fn build(value: &str) -> Self {
        Self(TextData::new(value, value.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0.value
    }
}

impl Text {
    /// Escaped text from the process-wide caches
    pub fn new(value: &str) -> Self {
        Markup::global().text(value)
    }

    pub(crate) fn build(value: &str) -> Self {
        Self(TextData::new(value, crate::escape::escape_text(value)))
    }

    pub fn value(&self) -> &str {
        &self.0.value
    }
}

impl Comment {
    /// Comment from the process-wide caches
    pub fn new(value: &str) -> Self {
        Markup::global().comment(value)
    }

    pub(crate) fn build(value: &str) -> Self {
        let html = format!("<!-- {} -->", crate::escape::escape_text(value));
        Self(TextData::new(value, html))
    }

    pub fn value(&self) -> &str {
        &self.0.value
    }
}

/// Document type declaration
///
/// Tokens are formatted as flag attributes: `<!DOCTYPE html>`.
#[derive(Clone)]
pub struct DocType(pub(crate) Arc<DocTypeData>);

pub(crate) struct DocTypeData {
    tokens: Attributes,
    rendered: Rendered,
}

impl DocType {
    /// Declaration built with the process-wide caches
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Markup::global().doctype(tokens)
    }

    pub(crate) fn build(tokens: Attributes, attr_suffix: &str) -> Self {
        let html = format!("<!DOCTYPE{}>", attr_suffix);
        Self(Arc::new(DocTypeData {
            tokens,
            rendered: Rendered::new(html),
        }))
    }

    /// Declaration tokens in order, duplicates removed
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.tokens.iter().map(|attr| attr.name())
    }

    /// Tokens as flag attributes
    pub fn attributes(&self) -> &Attributes {
        &self.0.tokens
    }
}

impl_rendered! {
    RawText => RawText,
    Text => Text,
    Comment => Comment,
    DocType => DocType,
}

/// Any markup node
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Node {
    RawText(RawText),
    Text(Text),
    Comment(Comment),
    DocType(DocType),
    Leaf(LeafTag),
    SingleChild(SingleChildTag),
    Composite(CompositeTag),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::RawText(_) => NodeKind::RawText,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::DocType(_) => NodeKind::DocType,
            Self::Leaf(_) => NodeKind::LeafTag,
            Self::SingleChild(_) => NodeKind::SingleChildTag,
            Self::Composite(_) => NodeKind::CompositeTag,
        }
    }

    /// Rendered markup
    pub fn html(&self) -> &str {
        match self {
            Self::RawText(n) => n.html(),
            Self::Text(n) => n.html(),
            Self::Comment(n) => n.html(),
            Self::DocType(n) => n.html(),
            Self::Leaf(n) => n.html(),
            Self::SingleChild(n) => n.html(),
            Self::Composite(n) => n.html(),
        }
    }

    /// Hash of the rendered markup
    pub fn rendered_hash(&self) -> u64 {
        match self {
            Self::RawText(n) => n.rendered_hash(),
            Self::Text(n) => n.rendered_hash(),
            Self::Comment(n) => n.rendered_hash(),
            Self::DocType(n) => n.rendered_hash(),
            Self::Leaf(n) => n.rendered_hash(),
            Self::SingleChild(n) => n.rendered_hash(),
            Self::Composite(n) => n.rendered_hash(),
        }
    }

    /// Whether both nodes are the same cached instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::RawText(a), Self::RawText(b)) => a.ptr_eq(b),
            (Self::Text(a), Self::Text(b)) => a.ptr_eq(b),
            (Self::Comment(a), Self::Comment(b)) => a.ptr_eq(b),
            (Self::DocType(a), Self::DocType(b)) => a.ptr_eq(b),
            (Self::Leaf(a), Self::Leaf(b)) => a.ptr_eq(b),
            (Self::SingleChild(a), Self::SingleChild(b)) => a.ptr_eq(b),
            (Self::Composite(a), Self::Composite(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Produce a new node with the given content.
    ///
    /// A single-child tag takes exactly one item; a composite tag takes any
    /// number. The receiver is left untouched.
    pub fn with_children<I, C>(&self, contents: I) -> Result<Node>
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        Markup::global().call(self, contents)
    }

    /// Produce a new node with a single content item
    pub fn with_child(&self, content: impl Into<Content>) -> Result<Node> {
        self.with_children([content.into()])
    }

    pub fn as_leaf(&self) -> Option<&LeafTag> {
        match self {
            Self::Leaf(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn as_single_child(&self) -> Option<&SingleChildTag> {
        match self {
            Self::SingleChild(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeTag> {
        match self {
            Self::Composite(tag) => Some(tag),
            _ => None,
        }
    }

    /// Tag name, for tag nodes
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Leaf(tag) => Some(tag.name()),
            Self::SingleChild(tag) => Some(tag.name()),
            Self::Composite(tag) => Some(tag.name()),
            _ => None,
        }
    }

    /// Tag attributes, for tag and doctype nodes
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::DocType(doctype) => Some(doctype.attributes()),
            Self::Leaf(tag) => Some(tag.attributes()),
            Self::SingleChild(tag) => Some(tag.attributes()),
            Self::Composite(tag) => Some(tag.attributes()),
            _ => None,
        }
    }

    pub(crate) fn not_a_container(&self) -> MarkupError {
        MarkupError::NotAContainer { kind: self.kind() }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.html())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl AsRef<str> for Node {
    fn as_ref(&self) -> &str {
        self.html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_verbatim() {
        let raw = RawText::build("<b>&nbsp;</b>");
        assert_eq!(raw.html(), "<b>&nbsp;</b>");
    }

    #[test]
    fn test_text_escaped() {
        let text = Text::build("foo &nbsp;<p>");
        assert_eq!(text.html(), "foo &amp;nbsp;&lt;p&gt;");
        assert_eq!(text.value(), "foo &nbsp;<p>");
    }

    #[test]
    fn test_comment() {
        assert_eq!(Comment::build("a-->b").html(), "<!-- a--&gt;b -->");
    }

    #[test]
    fn test_hash_matches_text() {
        let text = Text::build("x < y");
        assert_eq!(text.rendered_hash(), rendered_hash("x &lt; y"));
    }

    #[test]
    fn test_equality_is_per_kind() {
        let raw: Node = RawText::build("plain").into();
        let text: Node = Text::build("plain").into();
        assert_eq!(raw.html(), text.html());
        assert_ne!(raw, text);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::LeafTag.to_string(), "leaf tag");
        assert!(NodeKind::CompositeTag.is_container());
        assert!(!NodeKind::Comment.is_container());
    }
}
