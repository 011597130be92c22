//! Page Layouts
//!
//! A layout assembles a full document from overridable parts. Implementors
//! override only the parts they need; everything else falls back to an empty
//! page.

use crate::node::DocType;
use crate::{tags, Node, Result};

/// Full-document skeleton
///
/// ```
/// use fos_markup::{tags, Layout, Node, Result};
///
/// struct Welcome<'a> {
///     user: &'a str,
/// }
///
/// impl Layout for Welcome<'_> {
///     fn body(&self) -> Result<Node> {
///         tags::BODY.empty().with_child(format!("Welcome {}", self.user))
///     }
/// }
///
/// let html = Welcome { user: "bar" }.render()?;
/// assert!(html.ends_with("<body>Welcome bar</body></html>"));
/// # Ok::<(), fos_markup::MarkupError>(())
/// ```
pub trait Layout {
    fn doctype(&self) -> DocType {
        DocType::new(["html"])
    }

    fn title(&self) -> Result<Node> {
        Ok(tags::TITLE.empty())
    }

    fn head(&self) -> Result<Node> {
        tags::HEAD.empty().with_child(self.title()?)
    }

    fn body(&self) -> Result<Node> {
        Ok(tags::BODY.empty())
    }

    /// The `<html>` element
    fn document(&self) -> Result<Node> {
        tags::HTML.empty().with_children([self.head()?, self.body()?])
    }

    /// Doctype and document, separated by a newline
    fn render(&self) -> Result<String> {
        Ok(format!("{}\n{}", self.doctype(), self.document()?))
    }
}

/// Layout with every part left at its default
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseLayout;

impl Layout for BaseLayout {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_layout() {
        assert_eq!(
            BaseLayout.render().unwrap(),
            "<!DOCTYPE html>\n<html><head><title></title></head><body></body></html>"
        );
    }

    #[test]
    fn test_override_title() {
        struct Titled;

        impl Layout for Titled {
            fn title(&self) -> Result<Node> {
                tags::TITLE.empty().with_child("foo")
            }
        }

        let html = Titled.render().unwrap();
        assert!(html.contains("<head><title>foo</title></head>"));
    }
}
