//! fOS Markup - Immutable Markup Trees
//!
//! Builds HTML/SVG/XML markup out of immutable nodes. Each node renders its
//! text once, at construction, and every constructor is memoized in bounded
//! LRU caches, so repeated construction with equal inputs is a cache hit.
//! Attaching content to a tag never changes it; it produces a new tag.
//!
//! ```
//! use fos_markup::{attrs, render, tags};
//!
//! let para = tags::P.with(attrs![style = "color:red"]).with_child("Hello")?;
//! assert_eq!(render([para]), "<p style=\"color:red\">Hello</p>");
//! # Ok::<(), fos_markup::MarkupError>(())
//! ```

pub mod attributes;
pub mod cache;
pub mod escape;
pub mod loader;
pub mod tags;

mod content;
mod layout;
mod markup;
mod node;
mod repr;
mod tag;
mod template;

pub use attributes::{Attr, Attributes};
pub use cache::{CacheConfig, CacheStats, LruCache, SharedCache, MAX_CACHE_SIZE};
pub use content::Content;
pub use layout::{BaseLayout, Layout};
pub use loader::{load_yaml, load_yaml_file};
pub use markup::Markup;
pub use node::{rendered_hash, Comment, DocType, Node, NodeKind, RawText, Text};
pub use repr::attrs_repr;
pub use tag::{tag_kind, CompositeTag, LeafTag, SingleChildTag};
pub use tags::{ContentMode, TagKind, TagSpec};
pub use template::Template;

/// Markup error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("A {kind} node cannot hold content")]
    NotAContainer { kind: NodeKind },

    #[error("<{tag}> takes {expected} child, got {got}")]
    ChildCount {
        tag: String,
        expected: usize,
        got: usize,
    },

    #[error("Raw content is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("No value for placeholder {{{0}}}")]
    MissingPlaceholder(String),

    #[error("Unbalanced brace at byte {position}")]
    UnbalancedBrace { position: usize },

    #[error("Process-wide markup caches are already initialized")]
    AlreadyInitialized,

    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid YAML: {0}")]
    Yaml(String),

    #[error("Invalid component: {reason}\n{}", loader::EXAMPLE_FORMAT)]
    InvalidComponent { reason: String },

    #[error("No component at {0}")]
    ComponentNotFound(String),
}

pub type Result<T> = std::result::Result<T, MarkupError>;

/// Concatenate rendered content using the process-wide caches.
///
/// Strings are escaped, raw content is embedded verbatim and nodes
/// contribute their rendered text.
pub fn render<I, C>(contents: I) -> String
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Markup::global().render(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MarkupError::NotAContainer { kind: NodeKind::LeafTag };
        assert_eq!(err.to_string(), "A leaf tag node cannot hold content");

        let err = MarkupError::MissingPlaceholder("x".into());
        assert_eq!(err.to_string(), "No value for placeholder {x}");
    }

    #[test]
    fn test_render_strings() {
        assert_eq!(render(["&nbsp;"]), "&amp;nbsp;");
        assert_eq!(render([Content::raw("&nbsp;")]), "&nbsp;");
    }
}
