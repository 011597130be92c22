//! Component Loaders
//!
//! Builds node trees from YAML component descriptions, and reads markup
//! files as template content.
//!
//! A YAML document is either one component or a (nested) mapping of named
//! components addressed with a dotted path such as `"cards.alert"`. A
//! component is a single tag, a text scalar, or a sequence of those.
//!
//! Tags are one-entry mappings from the tag name to an optional body with
//! `attrs` and `children`. Catalog tags keep their catalog kind; any other
//! name becomes a composite tag when it has `children` and a leaf tag
//! otherwise.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::attributes::{Attr, Attributes};
use crate::tags::{self, ContentMode, TagKind};
use crate::{Content, Markup, MarkupError, Node, Result};

/// Accepted component layout, included in every format error
pub const EXAMPLE_FORMAT: &str = "\
Expected component format:

    tagname:
      attrs:
        name: value
        flag: null
      children:
        - some text
        - othertag:
            attrs:
              class: row
";

/// Load components from YAML text using the process-wide caches
pub fn load_yaml(source: &str, component: Option<&str>) -> Result<Vec<Node>> {
    Markup::global().load_yaml(source, component)
}

/// Load components from a YAML file using the process-wide caches
pub fn load_yaml_file(path: impl AsRef<Path>, component: Option<&str>) -> Result<Vec<Node>> {
    let source = read_file(path.as_ref())?;
    load_yaml(&source, component)
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| MarkupError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn invalid(reason: impl Into<String>) -> MarkupError {
    MarkupError::InvalidComponent {
        reason: reason.into(),
    }
}

impl Markup {
    /// Build the nodes described by a YAML component.
    ///
    /// Without a component path the whole document is the component.
    pub fn load_yaml(&self, source: &str, component: Option<&str>) -> Result<Vec<Node>> {
        let document: Value =
            serde_yaml::from_str(source).map_err(|e| MarkupError::Yaml(e.to_string()))?;

        let value = match component {
            Some(path) => find_component(&document, path)?,
            None => &document,
        };

        let nodes = match value {
            Value::Sequence(items) => items
                .iter()
                .map(|item| self.build_node(item))
                .collect::<Result<Vec<_>>>()?,
            other => vec![self.build_node(other)?],
        };

        tracing::debug!(
            "Loaded {} nodes from component {}",
            nodes.len(),
            component.unwrap_or("<root>")
        );
        Ok(nodes)
    }

    fn build_node(&self, value: &Value) -> Result<Node> {
        let content = self.build_content(value)?;
        Ok(self.normalize(content, ContentMode::Escaped))
    }

    /// Text scalars stay strings so the parent tag decides how to embed them
    fn build_content(&self, value: &Value) -> Result<Content> {
        if let Some(text) = scalar_text(value) {
            return Ok(Content::Text(text));
        }

        let Value::Mapping(mapping) = value else {
            return Err(invalid("expected a tag or text"));
        };
        if mapping.len() != 1 {
            return Err(invalid(format!(
                "a tag is a mapping with exactly one entry, found {}",
                mapping.len()
            )));
        }

        let Some((key, body)) = mapping.iter().next() else {
            return Err(invalid("expected a tag or text"));
        };
        let Some(name) = key.as_str() else {
            return Err(invalid("tag names must be strings"));
        };
        self.build_tag(name, body).map(Content::Node)
    }

    fn build_tag(&self, name: &str, body: &Value) -> Result<Node> {
        let (attrs, children) = match body {
            Value::Null => (Attributes::new(), None),
            Value::Mapping(body) => parse_body(name, body)?,
            _ => return Err(invalid(format!("<{name}> body must be a mapping or null"))),
        };

        let children = match children {
            Some(items) => Some(
                items
                    .iter()
                    .map(|item| self.build_content(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        let Some(spec) = tags::by_tag_name(name) else {
            return Ok(match children {
                Some(children) => {
                    let tag = self.composite_tag(name, attrs);
                    self.with_children(&tag, children).into()
                }
                None => self.leaf_tag(name, attrs).into(),
            });
        };

        let base = self.tag(&spec, attrs);
        match (spec.kind(), children) {
            (_, None) => Ok(base),
            (TagKind::Leaf, Some(_)) => Err(invalid(format!("<{name}> cannot hold children"))),
            (TagKind::SingleChild, Some(children)) if children.len() > 1 => {
                Err(invalid(format!(
                    "<{name}> takes at most one child, found {}",
                    children.len()
                )))
            }
            (_, Some(children)) if children.is_empty() => Ok(base),
            (_, Some(children)) => self.call(&base, children),
        }
    }

    /// Markup file as escaped text content
    pub fn load_text(&self, path: impl AsRef<Path>) -> Result<Content> {
        read_file(path.as_ref()).map(Content::Text)
    }

    /// Markup file as raw content
    pub fn load_raw(&self, path: impl AsRef<Path>) -> Result<Content> {
        read_file(path.as_ref()).map(Content::Raw)
    }
}

fn find_component<'a>(document: &'a Value, path: &str) -> Result<&'a Value> {
    path.split('.').try_fold(document, |value, segment| {
        value
            .as_mapping()
            .and_then(|mapping| mapping.get(segment))
            .ok_or_else(|| MarkupError::ComponentNotFound(path.to_string()))
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_body<'a>(name: &str, body: &'a Mapping) -> Result<(Attributes, Option<&'a [Value]>)> {
    let mut attrs = Attributes::new();
    let mut children = None;

    for (key, value) in body {
        match key.as_str() {
            Some("attrs") => attrs = parse_attrs(name, value)?,
            Some("children") => {
                children = match value {
                    Value::Sequence(items) => Some(items.as_slice()),
                    Value::Null => Some(&[][..]),
                    _ => {
                        return Err(invalid(format!("<{name}> children must be a sequence")));
                    }
                }
            }
            _ => {
                return Err(invalid(format!(
                    "<{name}> body accepts only `attrs` and `children`"
                )));
            }
        }
    }
    Ok((attrs, children))
}

fn parse_attrs(name: &str, value: &Value) -> Result<Attributes> {
    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Attributes::new()),
        _ => return Err(invalid(format!("<{name}> attrs must be a mapping"))),
    };

    mapping
        .iter()
        .map(|(key, value)| {
            let key = key
                .as_str()
                .ok_or_else(|| invalid(format!("<{name}> attribute names must be strings")))?;
            match value {
                Value::Null => Ok(Attr::flag(key)),
                other => scalar_text(other).map(|v| Attr::value(key, v)).ok_or_else(|| {
                    invalid(format!("<{name}> attribute {key} must be a scalar or null"))
                }),
            }
        })
        .collect()
}

impl Content {
    /// Read a file as escaped text, using the process-wide caches
    pub fn load_text(path: impl AsRef<Path>) -> Result<Self> {
        Markup::global().load_text(path)
    }

    /// Read a file as raw content, using the process-wide caches
    pub fn load_raw(path: impl AsRef<Path>) -> Result<Self> {
        Markup::global().load_raw(path)
    }

    /// Double every brace so a template renders it literally
    pub fn with_literal_braces(self) -> Self {
        let double = |s: String| s.replace('{', "{{").replace('}', "}}");
        match self {
            Self::Text(s) => Self::Text(double(s)),
            Self::Raw(s) => Self::Raw(double(s)),
            node @ Self::Node(_) => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheConfig;

    fn markup() -> Markup {
        Markup::new(CacheConfig::with_capacity(64))
    }

    fn html(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(Node::html).collect()
    }

    #[test]
    fn test_leaf_without_body() {
        let nodes = markup().load_yaml("sometag: null", None).unwrap();
        assert_eq!(html(&nodes), ["<sometag />"]);
    }

    #[test]
    fn test_catalog_kind_wins() {
        let nodes = markup().load_yaml("p: null", None).unwrap();
        assert_eq!(html(&nodes), ["<p></p>"]);

        let nodes = markup().load_yaml("br: {attrs: {class: x}}", None).unwrap();
        assert_eq!(html(&nodes), ["<br class=\"x\" />"]);
    }

    #[test]
    fn test_attrs_keep_order() {
        let source = "span:\n  attrs:\n    boolattr: null\n    style: 'color: red'\n    tabindex: 1\n";
        let nodes = markup().load_yaml(source, None).unwrap();
        assert_eq!(
            html(&nodes),
            ["<span boolattr style=\"color: red\" tabindex=\"1\"></span>"]
        );
    }

    #[test]
    fn test_single_child_tag() {
        let nodes = markup().load_yaml("title: {children: [Home]}", None).unwrap();
        assert_eq!(html(&nodes), ["<title>Home</title>"]);

        let nodes = markup().load_yaml("script: {children: ['a < b']}", None).unwrap();
        assert_eq!(html(&nodes), ["<script>a < b</script>"]);
    }

    #[test]
    fn test_dotted_component_path() {
        let source = "cards:\n  alert:\n    b: {children: [Alert!]}\n";
        let nodes = markup().load_yaml(source, Some("cards.alert")).unwrap();
        assert_eq!(html(&nodes), ["<b>Alert!</b>"]);

        assert_eq!(
            markup().load_yaml(source, Some("cards.missing")),
            Err(MarkupError::ComponentNotFound("cards.missing".into()))
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = markup().load_yaml("a: [", None).unwrap_err();
        assert!(matches!(err, MarkupError::Yaml(_)));
    }

    #[test]
    fn test_format_error_shows_example() {
        let err = markup().load_yaml("div: hello", None).unwrap_err();
        assert!(err.to_string().contains(EXAMPLE_FORMAT));
    }

    #[test]
    fn test_literal_braces() {
        let content = Content::text("<p>{foo}</p>").with_literal_braces();
        assert_eq!(content, Content::text("<p>{{foo}}</p>"));
    }

    #[test]
    fn test_missing_file() {
        let err = markup().load_text("/nonexistent/component.html").unwrap_err();
        assert!(matches!(err, MarkupError::Io { .. }));
    }
}
