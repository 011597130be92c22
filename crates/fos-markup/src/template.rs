//! Pre-rendered Templates
//!
//! Static parts of a page are rendered once; only `{name}` placeholders are
//! filled per call. Literal braces in the pre-rendered markup must be
//! doubled (`{{`, `}}`).

use std::collections::HashMap;

use crate::{Content, MarkupError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// Pre-rendered markup with named placeholders
///
/// ```
/// use fos_markup::{tags, Template};
///
/// let paras = Template::new([
///     tags::P.empty().with_child("{x}")?,
///     tags::P.empty().with_child("another {x}")?,
/// ])?;
///
/// assert_eq!(
///     paras.render([("x", "paragraph")])?,
///     "<p>paragraph</p><p>another paragraph</p>"
/// );
/// # Ok::<(), fos_markup::MarkupError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Render `contents` once and split the result into segments
    pub fn new<I, C>(contents: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        Self::parse(&crate::render(contents))
    }

    /// Template from markup that is already rendered
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, '{')) | None => {
                                return Err(MarkupError::UnbalancedBrace { position: pos });
                            }
                            Some((_, c)) => name.push(c),
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(name));
                }
                '}' => return Err(MarkupError::UnbalancedBrace { position: pos }),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Placeholder names in order of appearance
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder. Values are inserted verbatim.
    pub fn render<I, K, V>(&self, values: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let values: HashMap<String, V> = values
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v))
            .collect();

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = values
                        .get(name)
                        .ok_or_else(|| MarkupError::MissingPlaceholder(name.clone()))?;
                    out.push_str(value.as_ref());
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_in_order() {
        let template = Template::parse("<p>{a}</p><p>{b} {a}</p>").unwrap();
        let fields: Vec<_> = template.fields().collect();
        assert_eq!(fields, ["a", "b", "a"]);
    }

    #[test]
    fn test_render_from_map() {
        let template = Template::parse("<b>{name}</b>").unwrap();
        let mut values = HashMap::new();
        values.insert("name".to_string(), "fOS".to_string());
        assert_eq!(template.render(&values).unwrap(), "<b>fOS</b>");
    }

    #[test]
    fn test_doubled_braces() {
        let template = Template::parse("{{{x}}}").unwrap();
        assert_eq!(template.render([("x", "1")]).unwrap(), "{1}");
    }

    #[test]
    fn test_missing_placeholder() {
        let template = Template::parse("{x}").unwrap();
        let empty: [(&str, &str); 0] = [];
        assert_eq!(
            template.render(empty),
            Err(MarkupError::MissingPlaceholder("x".into()))
        );
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            Template::parse("a}b"),
            Err(MarkupError::UnbalancedBrace { position: 1 })
        );
        assert_eq!(
            Template::parse("ab{c"),
            Err(MarkupError::UnbalancedBrace { position: 2 })
        );
    }

    #[test]
    fn test_no_placeholders() {
        let template = Template::parse("<br />").unwrap();
        let empty: [(&str, &str); 0] = [];
        assert_eq!(template.render(empty).unwrap(), "<br />");
        assert_eq!(template.fields().count(), 0);
    }
}
