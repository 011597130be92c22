//! Text Escaping
//!
//! Entity escaping for text content and quoting for attribute literals.
//! Both functions are pure; the memoized variants live on [`crate::Markup`].

/// Escape the five HTML-significant characters.
///
/// `&`, `<`, `>`, `"` and `'` become `&amp;`, `&lt;`, `&gt;`, `&quot;` and
/// `&#x27;`. Every other character passes through untouched.
pub fn escape_text(s: &str) -> String {
    // Fast path: nothing to escape
    if !s.bytes().any(needs_escape) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + s.len() / 4);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[inline]
fn needs_escape(b: u8) -> bool {
    matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'')
}

/// Wrap a value in double quotes, backslash-escaping embedded quotes.
///
/// ```
/// use fos_markup::escape::double_quote;
///
/// assert_eq!(double_quote(r#"abc"xyz"#), r#""abc\"xyz""#);
/// ```
pub fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_significant_chars() {
        assert_eq!(
            escape_text(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_leaves_everything_else() {
        let s = "plain text; with = signs, slashes / and unicode ✓";
        assert_eq!(escape_text(s), s);
    }

    #[test]
    fn test_escape_existing_entity() {
        // Entities are escaped again, never passed through
        assert_eq!(escape_text("&nbsp;"), "&amp;nbsp;");
    }

    #[test]
    fn test_double_quote() {
        assert_eq!(double_quote(""), "\"\"");
        assert_eq!(double_quote("color:red"), "\"color:red\"");
        assert_eq!(double_quote("a\"b\"c"), "\"a\\\"b\\\"c\"");
    }

    #[test]
    fn test_double_quote_keeps_entities() {
        // Only the quote character is touched
        assert_eq!(double_quote("a&b<c>'d'"), "\"a&b<c>'d'\"");
    }
}
