//! Tag Nodes
//!
//! Leaf, single-child and composite tags. Tags are frozen at construction;
//! attaching content produces a new tag with the same name and attributes.

use std::sync::Arc;

use crate::attributes::Attributes;
use crate::node::{impl_rendered, Node, Rendered};
use crate::tags::{ContentMode, TagKind};
use crate::{Content, Markup};

/// Tag that cannot hold content: `<br />`
#[derive(Clone)]
pub struct LeafTag(pub(crate) Arc<LeafData>);

pub(crate) struct LeafData {
    name: Arc<str>,
    attrs: Attributes,
    rendered: Rendered,
}

impl LeafTag {
    pub(crate) fn build(name: Arc<str>, attrs: Attributes, attr_suffix: &str) -> Self {
        let html = format!("<{}{} />", name, attr_suffix);
        Self(Arc::new(LeafData {
            name,
            attrs,
            rendered: Rendered::new(html),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.0.attrs
    }
}

/// Tag holding at most one content node
///
/// A fresh tag holds an empty text child and renders as `<name></name>`.
#[derive(Clone)]
pub struct SingleChildTag(pub(crate) Arc<SingleChildData>);

pub(crate) struct SingleChildData {
    name: Arc<str>,
    attrs: Attributes,
    mode: ContentMode,
    child: Node,
    rendered: Rendered,
}

impl SingleChildTag {
    pub(crate) fn build(
        name: Arc<str>,
        attrs: Attributes,
        mode: ContentMode,
        child: Node,
        attr_suffix: &str,
    ) -> Self {
        let html = format!("<{name}{attr_suffix}>{}</{name}>", child.html());
        Self(Arc::new(SingleChildData {
            name,
            attrs,
            mode,
            child,
            rendered: Rendered::new(html),
        }))
    }

    /// Same tag, different child
    pub(crate) fn replace_child(&self, child: Node, attr_suffix: &str) -> Self {
        Self::build(
            self.0.name.clone(),
            self.0.attrs.clone(),
            self.0.mode,
            child,
            attr_suffix,
        )
    }

    /// New tag with `content` as its child, using the process-wide caches
    pub fn with_child(&self, content: impl Into<Content>) -> SingleChildTag {
        Markup::global().with_child(self, content)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.0.attrs
    }

    /// How string content is embedded
    pub fn content_mode(&self) -> ContentMode {
        self.0.mode
    }

    pub fn child(&self) -> &Node {
        &self.0.child
    }

    /// Whether the child is still the implicit empty text
    pub fn is_empty(&self) -> bool {
        matches!(&self.0.child, Node::Text(text) if text.value().is_empty())
    }
}

/// Tag holding an ordered sequence of content nodes
#[derive(Clone)]
pub struct CompositeTag(pub(crate) Arc<CompositeData>);

pub(crate) struct CompositeData {
    name: Arc<str>,
    attrs: Attributes,
    children: Arc<[Node]>,
    rendered: Rendered,
}

impl CompositeTag {
    pub(crate) fn build(
        name: Arc<str>,
        attrs: Attributes,
        children: Arc<[Node]>,
        attr_suffix: &str,
    ) -> Self {
        let body_len: usize = children.iter().map(|c| c.html().len()).sum();
        let mut html = String::with_capacity(2 * name.len() + attr_suffix.len() + body_len + 5);
        html.push('<');
        html.push_str(&name);
        html.push_str(attr_suffix);
        html.push('>');
        for child in children.iter() {
            html.push_str(child.html());
        }
        html.push_str("</");
        html.push_str(&name);
        html.push('>');

        Self(Arc::new(CompositeData {
            name,
            attrs,
            children,
            rendered: Rendered::new(html),
        }))
    }

    /// Same tag, different children
    pub(crate) fn replace_children(&self, children: Arc<[Node]>, attr_suffix: &str) -> Self {
        Self::build(self.0.name.clone(), self.0.attrs.clone(), children, attr_suffix)
    }

    /// New tag with `contents` as its children, using the process-wide caches
    pub fn with_children<I, C>(&self, contents: I) -> CompositeTag
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        Markup::global().with_children(self, contents)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.0.attrs
    }

    pub fn children(&self) -> &[Node] {
        &self.0.children
    }
}

impl_rendered! {
    LeafTag => Leaf,
    SingleChildTag => SingleChild,
    CompositeTag => Composite,
}

/// Kind of a tag node, for callers holding a [`Node`]
pub fn tag_kind(node: &Node) -> Option<TagKind> {
    match node {
        Node::Leaf(_) => Some(TagKind::Leaf),
        Node::SingleChild(_) => Some(TagKind::SingleChild),
        Node::Composite(_) => Some(TagKind::Composite),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Text;

    fn suffix(attrs: &Attributes) -> String {
        crate::attributes::format_attrs(attrs)
    }

    #[test]
    fn test_leaf_render() {
        let attrs = Attributes::new().with("type", "checkbox").flag("disabled");
        let tag = LeafTag::build("input".into(), attrs.clone(), &suffix(&attrs));
        assert_eq!(tag.html(), "<input type=\"checkbox\" disabled />");
        assert_eq!(tag.name(), "input");
    }

    #[test]
    fn test_single_child_replace() {
        let attrs = Attributes::new();
        let empty = SingleChildTag::build(
            "title".into(),
            attrs.clone(),
            ContentMode::Escaped,
            Text::build("").into(),
            "",
        );
        assert!(empty.is_empty());
        assert_eq!(empty.html(), "<title></title>");

        let filled = empty.replace_child(Text::build("a & b").into(), "");
        assert_eq!(filled.html(), "<title>a &amp; b</title>");
        assert_eq!(empty.html(), "<title></title>");
        assert!(!filled.is_empty());
    }

    #[test]
    fn test_composite_children_in_order() {
        let children: Arc<[Node]> = vec![
            Node::from(Text::build("a")),
            Text::build("b").into(),
            Text::build("c").into(),
        ]
        .into();
        let tag = CompositeTag::build("ul".into(), Attributes::new(), children, "");
        assert_eq!(tag.html(), "<ul>abc</ul>");
        assert_eq!(tag.children().len(), 3);
    }

    #[test]
    fn test_tag_kind() {
        let leaf: Node = LeafTag::build("br".into(), Attributes::new(), "").into();
        assert_eq!(tag_kind(&leaf), Some(TagKind::Leaf));
        assert_eq!(tag_kind(&Text::build("x").into()), None);
    }
}
