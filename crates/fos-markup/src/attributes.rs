//! Tag Attributes
//!
//! Ordered attribute lists and their opening-tag formatting.
//!
//! An attribute either carries a value (`name="value"`) or is a flag. Flags
//! whose name is made only of ASCII letters and underscores render bare
//! (`disabled`); any other flag renders as a double-quoted literal token,
//! which is how stray tokens such as DOCTYPE identifiers are emitted.

use std::sync::Arc;

use crate::escape::double_quote;

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attr {
    name: Arc<str>,
    value: Option<Arc<str>>,
}

impl Attr {
    pub fn new(name: impl Into<Arc<str>>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(Arc::from),
        }
    }

    /// Attribute with a value
    pub fn value(name: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Attribute without a value
    pub fn flag(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }
}

/// Ordered attribute list
///
/// Insertion order is preserved verbatim in the rendered output. Setting a
/// name that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    attrs: Vec<Attr>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a valued attribute
    pub fn with(self, name: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.set(Attr::value(name, value))
    }

    /// Add (or replace) a flag attribute
    pub fn flag(self, name: impl Into<Arc<str>>) -> Self {
        self.set(Attr::flag(name))
    }

    /// Add an attribute, replacing any existing one with the same name
    pub fn set(mut self, attr: Attr) -> Self {
        match self.attrs.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => existing.value = attr.value,
            None => self.attrs.push(attr),
        }
        self
    }

    /// Value of an attribute: `Some(None)` for a flag, `None` if absent
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.attrs
            .iter()
            .find(|a| a.name() == name)
            .map(Attr::get_value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl FromIterator<Attr> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attr>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::set)
    }
}

impl<'a> FromIterator<(&'a str, Option<&'a str>)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<&'a str>)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, value)| Attr::new(name, value))
            .collect()
    }
}

impl From<Vec<Attr>> for Attributes {
    fn from(attrs: Vec<Attr>) -> Self {
        attrs.into_iter().collect()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Attributes {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(name, value)| Attr::value(name, value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attr;
    type IntoIter = std::slice::Iter<'a, Attr>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}

/// Whether a flag name renders bare rather than quoted
#[inline]
pub fn is_bare_name(name: &str) -> bool {
    name.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
}

/// Format a single attribute fragment (no leading space)
pub fn format_attr(attr: &Attr) -> String {
    format_attr_with(attr, double_quote)
}

/// Format a full attribute list as an opening-tag suffix.
///
/// Fragments are joined with single spaces behind one leading space; an
/// empty list yields an empty string.
pub fn format_attrs(attrs: &Attributes) -> String {
    format_attrs_with(attrs, |attr| format_attr(attr).into())
}

pub(crate) fn format_attr_with<Q, S>(attr: &Attr, quote: Q) -> String
where
    Q: Fn(&str) -> S,
    S: AsRef<str>,
{
    match attr.get_value() {
        None if is_bare_name(attr.name()) => attr.name().to_string(),
        None => quote(attr.name()).as_ref().to_string(),
        Some(value) => format!("{}={}", attr.name(), quote(value).as_ref()),
    }
}

pub(crate) fn format_attrs_with<F>(attrs: &Attributes, fragment: F) -> String
where
    F: Fn(&Attr) -> Arc<str>,
{
    let mut out = String::new();
    for attr in attrs {
        out.push(' ');
        out.push_str(&fragment(attr));
    }
    out
}

/// Build an [`Attributes`] list.
///
/// Compact form for identifier names, expanded form for anything else:
///
/// ```
/// use fos_markup::attrs;
///
/// let compact = attrs![disabled, class = "btn"];
/// let expanded = attrs!["data-id" => "7", "hidden"];
///
/// assert_eq!(compact.get("class"), Some(Some("btn")));
/// assert_eq!(expanded.get("hidden"), Some(None));
/// ```
#[macro_export]
macro_rules! attrs {
    (@push $attrs:expr, $name:expr) => {
        $attrs.flag($name)
    };
    (@push $attrs:expr, $name:expr, $value:expr) => {
        $attrs.with($name, $value)
    };
    () => {
        $crate::Attributes::new()
    };
    ($($name:literal $(=> $value:expr)?),+ $(,)?) => {{
        let attrs = $crate::Attributes::new();
        $(let attrs = $crate::attrs!(@push attrs, $name $(, $value)?);)+
        attrs
    }};
    ($($name:ident $(= $value:expr)?),+ $(,)?) => {{
        let attrs = $crate::Attributes::new();
        $(let attrs = $crate::attrs!(@push attrs, stringify!($name) $(, $value)?);)+
        attrs
    }};
}
