//! Debug Representation
//!
//! Every node can describe itself as a Rust expression that rebuilds it with
//! this crate's API. This is what `{:?}` prints; it plays no part in
//! rendering.
//!
//! Attribute lists use the compact `attrs![name = "v"]` form when every name
//! is a plain identifier. A single name that is not (a keyword, or anything
//! outside ASCII letters and underscore) switches the whole list to the
//! expanded `attrs!["name" => "v"]` form.

use std::fmt::Write;

use crate::attributes::{is_bare_name, Attributes};
use crate::node::{Comment, DocType, Node, RawText, Text};
use crate::tag::{CompositeTag, LeafTag, SingleChildTag};
use crate::tags::{self, ContentMode, TagKind};

/// Strict and reserved Rust keywords
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Whether a name can appear as an identifier in the compact form
fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name != "_" && is_bare_name(name) && !RESERVED.contains(&name)
}

/// `attrs![...]` expression for an attribute list
pub fn attrs_repr(attrs: &Attributes) -> String {
    let compact = attrs.iter().all(|attr| is_identifier(attr.name()));

    let items: Vec<String> = attrs
        .iter()
        .map(|attr| match (compact, attr.get_value()) {
            (true, None) => attr.name().to_string(),
            (true, Some(value)) => format!("{} = {:?}", attr.name(), value),
            (false, None) => format!("{:?}", attr.name()),
            (false, Some(value)) => format!("{:?} => {:?}", attr.name(), value),
        })
        .collect();

    format!("attrs![{}]", items.join(", "))
}

/// Constructor expression for a tag: a catalog constant when one matches
fn tag_ctor(name: &str, kind: TagKind, mode: ContentMode, attrs: &Attributes) -> String {
    let mut out = match tags::exported_name(name, kind, mode) {
        Some(exported) => format!("tags::{exported}"),
        None => {
            let ctor = match (kind, mode) {
                (TagKind::Leaf, _) => "leaf",
                (TagKind::SingleChild, ContentMode::Escaped) => "single",
                (TagKind::SingleChild, ContentMode::Raw) => "raw",
                (TagKind::Composite, _) => "composite",
            };
            format!("TagSpec::{ctor}({name:?})")
        }
    };

    if attrs.is_empty() {
        out.push_str(".empty()");
    } else {
        let _ = write!(out, ".with({})", attrs_repr(attrs));
    }
    out
}

/// Argument for `with_child`, as the shortest form that normalizes back
fn child_repr(node: &Node, mode: ContentMode) -> String {
    match (node, mode) {
        (Node::Text(text), ContentMode::Escaped) => format!("{:?}", text.value()),
        (Node::RawText(raw), ContentMode::Raw) => format!("{:?}", raw.value()),
        (Node::RawText(raw), ContentMode::Escaped) => format!("Content::raw({:?})", raw.value()),
        (other, _) => other.repr(),
    }
}

/// Element of a `with_children` vector
fn item_repr(node: &Node) -> String {
    match node {
        Node::Text(text) => format!("Content::text({:?})", text.value()),
        Node::RawText(raw) => format!("Content::raw({:?})", raw.value()),
        other => format!("Content::from({})", other.repr()),
    }
}

impl RawText {
    pub fn repr(&self) -> String {
        format!("RawText::new({:?})", self.value())
    }
}

impl Text {
    pub fn repr(&self) -> String {
        format!("Text::new({:?})", self.value())
    }
}

impl Comment {
    pub fn repr(&self) -> String {
        format!("Comment::new({:?})", self.value())
    }
}

impl DocType {
    pub fn repr(&self) -> String {
        let tokens: Vec<String> = self.tokens().map(|t| format!("{t:?}")).collect();
        format!("DocType::new([{}])", tokens.join(", "))
    }
}

impl LeafTag {
    pub fn repr(&self) -> String {
        tag_ctor(self.name(), TagKind::Leaf, ContentMode::Escaped, self.attributes())
    }
}

impl SingleChildTag {
    pub fn repr(&self) -> String {
        let mode = self.content_mode();
        let mut out = tag_ctor(self.name(), TagKind::SingleChild, mode, self.attributes());
        if !self.is_empty() {
            let _ = write!(out, ".with_child({})?", child_repr(self.child(), mode));
        }
        out
    }
}

impl CompositeTag {
    pub fn repr(&self) -> String {
        let mut out = tag_ctor(
            self.name(),
            TagKind::Composite,
            ContentMode::Escaped,
            self.attributes(),
        );
        if !self.children().is_empty() {
            let items: Vec<String> = self.children().iter().map(item_repr).collect();
            let _ = write!(out, ".with_children(vec![{}])?", items.join(", "));
        }
        out
    }
}

impl Node {
    /// Rust expression that rebuilds this node
    pub fn repr(&self) -> String {
        match self {
            Self::RawText(n) => n.repr(),
            Self::Text(n) => n.repr(),
            Self::Comment(n) => n.repr(),
            Self::DocType(n) => n.repr(),
            Self::Leaf(n) => n.repr(),
            Self::SingleChild(n) => n.repr(),
            Self::Composite(n) => n.repr(),
        }
    }
}
