//! Markup Factory
//!
//! Owns one bounded cache per memoized function and builds every node
//! through them. Equal construction calls return the same instance for as
//! long as it stays resident; after eviction an equal, fresh instance is
//! built instead.

use std::sync::{Arc, OnceLock};

use crate::attributes::{self, Attr, Attributes};
use crate::cache::{CacheConfig, CacheStats, SharedCache};
use crate::escape;
use crate::node::{Comment, DocType, Node, RawText, Text};
use crate::tag::{CompositeTag, LeafTag, SingleChildTag};
use crate::tags::{ContentMode, TagKind, TagSpec};
use crate::{Content, MarkupError, Result};

static GLOBAL: OnceLock<Markup> = OnceLock::new();

/// Cache key for tag constructors
#[derive(Clone, PartialEq, Eq, Hash)]
struct TagKey {
    name: Arc<str>,
    mode: ContentMode,
    attrs: Attributes,
}

/// Node factory with its memoization caches
pub struct Markup {
    config: CacheConfig,
    quotes: SharedCache<String, Arc<str>>,
    fragments: SharedCache<Attr, Arc<str>>,
    attr_lists: SharedCache<Attributes, Arc<str>>,
    raw_texts: SharedCache<String, RawText>,
    texts: SharedCache<String, Text>,
    comments: SharedCache<String, Comment>,
    leaf_tags: SharedCache<TagKey, LeafTag>,
    single_tags: SharedCache<TagKey, SingleChildTag>,
    composite_tags: SharedCache<TagKey, CompositeTag>,
    single_calls: SharedCache<(ContentMode, SingleChildTag, Node), SingleChildTag>,
    composite_calls: SharedCache<(CompositeTag, Vec<Node>), CompositeTag>,
}

impl Markup {
    /// Create a factory with its own caches
    pub fn new(config: CacheConfig) -> Self {
        let capacity = config.capacity;
        tracing::debug!("Creating markup caches with capacity {}", capacity);

        Self {
            config,
            quotes: SharedCache::new("quote", capacity),
            fragments: SharedCache::new("attr", capacity),
            attr_lists: SharedCache::new("attrs", capacity),
            raw_texts: SharedCache::new("raw_text", capacity),
            texts: SharedCache::new("text", capacity),
            comments: SharedCache::new("comment", capacity),
            leaf_tags: SharedCache::new("leaf_tag", capacity),
            single_tags: SharedCache::new("single_child_tag", capacity),
            composite_tags: SharedCache::new("composite_tag", capacity),
            single_calls: SharedCache::new("with_child", capacity),
            composite_calls: SharedCache::new("with_children", capacity),
        }
    }

    /// Process-wide factory, created with the default config on first use
    pub fn global() -> &'static Markup {
        GLOBAL.get_or_init(|| {
            tracing::debug!("Initializing process-wide markup caches");
            Markup::new(CacheConfig::default())
        })
    }

    /// Configure the process-wide factory. Must run before its first use.
    pub fn init_global(config: CacheConfig) -> Result<&'static Markup> {
        let mut initialized = false;
        let markup = GLOBAL.get_or_init(|| {
            initialized = true;
            tracing::debug!("Initializing process-wide markup caches");
            Markup::new(config)
        });

        if initialized {
            Ok(markup)
        } else {
            Err(MarkupError::AlreadyInitialized)
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Memoized [`escape::double_quote`]
    pub fn quote(&self, s: &str) -> Arc<str> {
        self.quotes
            .get_or_insert_with(s, || escape::double_quote(s).into())
    }

    /// Memoized attribute fragment (`name="value"`, `flag` or `"token"`)
    pub fn format_attr(&self, attr: &Attr) -> Arc<str> {
        self.fragments.get_or_insert_with(attr, || {
            attributes::format_attr_with(attr, |s| self.quote(s)).into()
        })
    }

    /// Memoized opening-tag attribute suffix
    pub fn format_attrs(&self, attrs: &Attributes) -> Arc<str> {
        self.attr_lists.get_or_insert_with(attrs, || {
            attributes::format_attrs_with(attrs, |attr| self.format_attr(attr)).into()
        })
    }

    pub fn raw_text(&self, value: &str) -> RawText {
        self.raw_texts
            .get_or_insert_with(value, || RawText::build(value))
    }

    pub fn text(&self, value: &str) -> Text {
        self.texts.get_or_insert_with(value, || Text::build(value))
    }

    pub fn comment(&self, value: &str) -> Comment {
        self.comments
            .get_or_insert_with(value, || Comment::build(value))
    }

    /// Document type declaration; duplicate tokens are dropped
    pub fn doctype<I, S>(&self, tokens: I) -> DocType
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let attrs: Attributes = tokens
            .into_iter()
            .map(|token| Attr::flag(token.as_ref()))
            .collect();
        let suffix = self.format_attrs(&attrs);
        DocType::build(attrs, &suffix)
    }

    pub fn leaf_tag(&self, name: &str, attrs: Attributes) -> LeafTag {
        let key = TagKey {
            name: name.into(),
            mode: ContentMode::Escaped,
            attrs,
        };
        self.leaf_tags.get_or_insert_with(&key, || {
            let suffix = self.format_attrs(&key.attrs);
            LeafTag::build(key.name.clone(), key.attrs.clone(), &suffix)
        })
    }

    /// Single-child tag with an implicit empty text child
    pub fn single_child_tag(&self, name: &str, attrs: Attributes) -> SingleChildTag {
        self.single_child_tag_with_mode(name, attrs, ContentMode::Escaped)
    }

    /// Single-child tag that embeds string content verbatim
    pub fn raw_child_tag(&self, name: &str, attrs: Attributes) -> SingleChildTag {
        self.single_child_tag_with_mode(name, attrs, ContentMode::Raw)
    }

    fn single_child_tag_with_mode(
        &self,
        name: &str,
        attrs: Attributes,
        mode: ContentMode,
    ) -> SingleChildTag {
        let key = TagKey {
            name: name.into(),
            mode,
            attrs,
        };
        self.single_tags.get_or_insert_with(&key, || {
            let suffix = self.format_attrs(&key.attrs);
            let child = self.text("").into();
            SingleChildTag::build(key.name.clone(), key.attrs.clone(), mode, child, &suffix)
        })
    }

    pub fn composite_tag(&self, name: &str, attrs: Attributes) -> CompositeTag {
        let key = TagKey {
            name: name.into(),
            mode: ContentMode::Escaped,
            attrs,
        };
        self.composite_tags.get_or_insert_with(&key, || {
            let suffix = self.format_attrs(&key.attrs);
            CompositeTag::build(key.name.clone(), key.attrs.clone(), Vec::new().into(), &suffix)
        })
    }

    /// Build any tag from its catalog entry
    pub fn tag(&self, spec: &TagSpec, attrs: Attributes) -> Node {
        match spec.kind() {
            TagKind::Leaf => self.leaf_tag(spec.name(), attrs).into(),
            TagKind::SingleChild => self
                .single_child_tag_with_mode(spec.name(), attrs, spec.mode())
                .into(),
            TagKind::Composite => self.composite_tag(spec.name(), attrs).into(),
        }
    }

    /// Turn content into a node according to a tag's content mode
    pub fn normalize(&self, content: Content, mode: ContentMode) -> Node {
        match (content, mode) {
            (Content::Node(node), _) => node,
            (Content::Text(s), ContentMode::Escaped) => self.text(&s).into(),
            (Content::Text(s), ContentMode::Raw) | (Content::Raw(s), _) => self.raw_text(&s).into(),
        }
    }

    /// New single-child tag with `content` replacing the child
    pub fn with_child(&self, tag: &SingleChildTag, content: impl Into<Content>) -> SingleChildTag {
        let mode = tag.content_mode();
        let child = self.normalize(content.into(), mode);
        let key = (mode, tag.clone(), child);

        self.single_calls.get_or_insert_with(&key, || {
            let suffix = self.format_attrs(tag.attributes());
            tag.replace_child(key.2.clone(), &suffix)
        })
    }

    /// New composite tag with `contents` as its children, in order
    pub fn with_children<I, C>(&self, tag: &CompositeTag, contents: I) -> CompositeTag
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        let children: Vec<Node> = contents
            .into_iter()
            .map(|c| self.normalize(c.into(), ContentMode::Escaped))
            .collect();
        let key = (tag.clone(), children);

        self.composite_calls.get_or_insert_with(&key, || {
            let suffix = self.format_attrs(tag.attributes());
            tag.replace_children(key.1.as_slice().into(), &suffix)
        })
    }

    /// Attach content to any node, failing for nodes that hold none
    pub fn call<I, C>(&self, node: &Node, contents: I) -> Result<Node>
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        match node {
            Node::SingleChild(tag) => {
                let mut contents: Vec<Content> = contents.into_iter().map(Into::into).collect();
                if contents.len() != 1 {
                    return Err(MarkupError::ChildCount {
                        tag: tag.name().to_string(),
                        expected: 1,
                        got: contents.len(),
                    });
                }
                let content = contents.remove(0);
                Ok(self.with_child(tag, content).into())
            }
            Node::Composite(tag) => Ok(self.with_children(tag, contents).into()),
            other => Err(other.not_a_container()),
        }
    }

    /// Concatenate rendered content
    pub fn render<I, C>(&self, contents: I) -> String
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        contents
            .into_iter()
            .map(|c| self.normalize(c.into(), ContentMode::Escaped))
            .fold(String::new(), |mut out, node| {
                out.push_str(node.html());
                out
            })
    }

    /// Statistics for every cache
    pub fn stats(&self) -> Vec<CacheStats> {
        vec![
            self.quotes.stats(),
            self.fragments.stats(),
            self.attr_lists.stats(),
            self.raw_texts.stats(),
            self.texts.stats(),
            self.comments.stats(),
            self.leaf_tags.stats(),
            self.single_tags.stats(),
            self.composite_tags.stats(),
            self.single_calls.stats(),
            self.composite_calls.stats(),
        ]
    }

    /// Statistics for one cache by name
    pub fn cache_stats(&self, name: &str) -> Option<CacheStats> {
        self.stats().into_iter().find(|s| s.name == name)
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        tracing::debug!("Clearing markup caches");
        self.quotes.clear();
        self.fragments.clear();
        self.attr_lists.clear();
        self.raw_texts.clear();
        self.texts.clear();
        self.comments.clear();
        self.leaf_tags.clear();
        self.single_tags.clear();
        self.composite_tags.clear();
        self.single_calls.clear();
        self.composite_calls.clear();
    }
}

impl Default for Markup {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
