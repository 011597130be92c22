//! Comprehensive tests for fos-markup
//!
//! Rendering scenarios, clone-on-call semantics and cache identity through
//! the public API.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use fos_markup::{
    attrs, load_yaml_file, render, tags, Attributes, BaseLayout, CacheConfig, Comment, Content,
    DocType, Layout, Markup, MarkupError, Node, RawText, TagSpec, Template, Text,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_leaf() {
    assert_eq!(render([tags::BR.empty()]), "<br />");
}

#[test]
fn test_render_paragraph_with_style() {
    let p = tags::P.with(attrs![style = "color:red"]).with_child("Hello").unwrap();
    assert_eq!(render([p]), "<p style=\"color:red\">Hello</p>");
}

#[test]
fn test_render_mixed_children() {
    let div = tags::DIV
        .empty()
        .with_children([Content::from("a &"), RawText::new("<b>").into()])
        .unwrap();
    assert_eq!(render([div]), "<div>a &amp;<b></div>");
}

#[test]
fn test_render_comment() {
    assert_eq!(render([Comment::new("a-->b")]), "<!-- a--&gt;b -->");
}

#[test]
fn test_render_doctype() {
    assert_eq!(render([DocType::new(["html"])]), "<!DOCTYPE html>");
}

#[test]
fn test_render_input_flags() {
    let input = tags::INPUT.with(attrs!["type" => "checkbox", "disabled"]);
    assert_eq!(render([input]), "<input type=\"checkbox\" disabled />");
}

#[test]
fn test_render_nested_tree() {
    let img = tags::IMG.with(attrs![src = "badge.svg", alt = "PyPI version"]);
    let link = tags::A.with(attrs![href = "https://example.org"]).with_child(img).unwrap();
    let badge = tags::SPAN.empty().with_child(link).unwrap();

    assert_eq!(
        badge.html(),
        "<span><a href=\"https://example.org\"><img src=\"badge.svg\" alt=\"PyPI version\" /></a></span>"
    );
}

#[test]
fn test_render_textarea_attrs() {
    let area = tags::TEXT_AREA
        .with(attrs![required, class = "input"])
        .with_child("text")
        .unwrap();
    assert_eq!(area.html(), "<textarea required class=\"input\">text</textarea>");
}

#[test]
fn test_render_custom_tag() {
    let copy = TagSpec::composite("clipboard-copy").with(attrs![value = "foo"]);
    assert_eq!(
        copy.with_child("Copy Me").unwrap().html(),
        "<clipboard-copy value=\"foo\">Copy Me</clipboard-copy>"
    );
}

#[test]
fn test_render_script_is_raw() {
    let script = tags::SCRIPT.empty().with_child("if (a < b) { go(); }").unwrap();
    assert_eq!(script.html(), "<script>if (a < b) { go(); }</script>");

    let style = tags::STYLE.empty().with_child("p > a { color: red }").unwrap();
    assert_eq!(style.html(), "<style>p > a { color: red }</style>");
}

#[test]
fn test_render_bytes_are_raw() {
    let nbsp = Content::try_from(&b"&nbsp;"[..]).unwrap();
    assert_eq!(render([nbsp]), "&nbsp;");
    assert_eq!(render(["&nbsp;"]), "&amp;nbsp;");
    assert_eq!(render([Text::new("&nbsp;")]), "&amp;nbsp;");
}

#[test]
fn test_render_concatenates() {
    let p = tags::P.empty();
    assert_eq!(render([p.clone(), p]), "<p></p><p></p>");
}

#[test]
fn test_attribute_quote_escaping() {
    let a = tags::A.with(attrs![title = "say \"hi\""]);
    assert_eq!(a.html(), "<a title=\"say \\\"hi\\\"\"></a>");
}

// ============================================================================
// Clone-on-call
// ============================================================================

#[test]
fn test_call_leaves_original_untouched() {
    let base = tags::DIV.empty();
    let with_child = base.with_child("x").unwrap();

    assert_ne!(render([&base]), render([&with_child]));
    assert_eq!(render([&base]), "<div></div>");
    assert_eq!(with_child.html(), "<div>x</div>");
}

#[test]
fn test_call_keeps_name_and_attributes() {
    let base = tags::UL.with(attrs![class = "list"]);
    let filled = base
        .with_children([tags::LI.empty().with_child("one").unwrap()])
        .unwrap();

    assert_eq!(filled.tag_name(), Some("ul"));
    assert_eq!(filled.attributes(), base.attributes());
    assert_eq!(filled.as_composite().map(|t| t.children().len()), Some(1));
}

#[test]
fn test_single_child_replaces() {
    let title = tags::TITLE.empty();
    let first = title.with_child("one").unwrap();
    let second = first.with_child("two").unwrap();

    assert_eq!(first.html(), "<title>one</title>");
    assert_eq!(second.html(), "<title>two</title>");
}

#[test]
fn test_call_on_leaf_fails() {
    let err = tags::BR.empty().with_child("x").unwrap_err();
    assert!(matches!(err, MarkupError::NotAContainer { .. }));

    let err = Node::from(Comment::new("c")).with_child("x").unwrap_err();
    assert!(matches!(err, MarkupError::NotAContainer { .. }));
}

#[test]
fn test_single_child_count() {
    let err = tags::TITLE.empty().with_children(["a", "b"]).unwrap_err();
    assert_eq!(
        err,
        MarkupError::ChildCount {
            tag: "title".into(),
            expected: 1,
            got: 2
        }
    );
}

// ============================================================================
// Equality, hashing and identity
// ============================================================================

#[test]
fn test_equal_construction_is_equal() {
    let a = tags::P.with(attrs![id = "x"]).with_child("hi").unwrap();
    let b = tags::P.with(attrs![id = "x"]).with_child("hi").unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a.rendered_hash(), b.rendered_hash());
}

#[test]
fn test_equality_is_on_rendered_text() {
    // Different inputs, identical output
    let a = tags::P.empty().with_child("<").unwrap();
    let b = tags::P.empty().with_child(Content::raw("&lt;")).unwrap();

    assert_eq!(a.html(), b.html());
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_cache_identity() {
    let markup = Markup::new(CacheConfig::default());
    let a = markup.leaf_tag("a", Attributes::new().with("x", "y"));
    let b = markup.leaf_tag("a", Attributes::new().with("x", "y"));
    assert!(a.ptr_eq(&b));

    let a = tags::HR.with(attrs![class = "sep"]);
    let b = tags::HR.with(attrs![class = "sep"]);
    assert!(a.ptr_eq(&b));
}

#[test]
fn test_with_children_identity() {
    let markup = Markup::new(CacheConfig::default());
    let div = markup.composite_tag("div", Attributes::new());

    let a = markup.with_children(&div, ["x", "y"]);
    let b = markup.with_children(&div, ["x", "y"]);
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&markup.with_children(&div, ["y", "x"])));

    let a = tags::UL.empty().with_children(["one", "two"]).unwrap();
    let b = tags::UL.empty().with_children(["one", "two"]).unwrap();
    assert!(a.ptr_eq(&b));
}

#[test]
fn test_nodes_as_map_keys() {
    let mut seen = HashMap::new();
    seen.insert(tags::B.empty().with_child("x").unwrap(), 1);
    seen.insert(tags::B.empty().with_child("x").unwrap(), 2);
    assert_eq!(seen.len(), 1);
}

// ============================================================================
// Templates and layouts
// ============================================================================

#[test]
fn test_template_paragraphs() {
    let paras = Template::new([
        tags::P.empty().with_child("{x}").unwrap(),
        tags::P.empty().with_child("{x} again").unwrap(),
    ])
    .unwrap();

    assert_eq!(
        paras.render([("x", "y")]).unwrap(),
        "<p>y</p><p>y again</p>"
    );
}

#[test]
fn test_base_layout() {
    assert_eq!(
        BaseLayout.render().unwrap(),
        "<!DOCTYPE html>\n<html><head><title></title></head><body></body></html>"
    );
}

#[test]
fn test_custom_layout() {
    struct Page {
        title: String,
        user: String,
    }

    impl Layout for Page {
        fn title(&self) -> fos_markup::Result<Node> {
            tags::TITLE.empty().with_child(&self.title)
        }

        fn body(&self) -> fos_markup::Result<Node> {
            tags::BODY.empty().with_child(format!("Welcome {}", self.user))
        }
    }

    let page = Page {
        title: "foo".into(),
        user: "bar".into(),
    };
    assert_eq!(
        page.render().unwrap(),
        "<!DOCTYPE html>\n<html><head><title>foo</title></head><body>Welcome bar</body></html>"
    );
}

// ============================================================================
// Debug representation
// ============================================================================

#[test]
fn test_debug_repr() {
    let p = tags::P.with(attrs![style = "color:red"]).with_child("Hello").unwrap();
    assert_eq!(
        format!("{p:?}"),
        "tags::P.with(attrs![style = \"color:red\"]).with_children(vec![Content::text(\"Hello\")])?"
    );

    let br = tags::BR.empty();
    assert_eq!(format!("{br:?}"), "tags::BR.empty()");
}

#[test]
fn test_debug_repr_expanded() {
    let input = tags::INPUT.with(attrs!["type" => "checkbox", "disabled"]);
    assert_eq!(
        input.repr(),
        "tags::INPUT.with(attrs![\"type\" => \"checkbox\", \"disabled\"])"
    );
}

#[test]
fn test_debug_repr_nested() {
    let title = tags::TITLE.empty().with_child("Home").unwrap();
    let head = tags::HEAD.empty().with_child(title).unwrap();
    assert_eq!(
        head.repr(),
        "tags::HEAD.empty().with_children(vec![Content::from(tags::TITLE.empty().with_child(\"Home\")?)])?"
    );
}

// ============================================================================
// Loaders
// ============================================================================

const YAML_COMPONENTS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/assets/yaml_components/correct.yml"
);

const HTML_COMPONENT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/assets/html_components/component.html"
);

fn component(name: &str) -> Vec<Node> {
    load_yaml_file(YAML_COMPONENTS, Some(name)).unwrap()
}

fn joined(nodes: &[Node]) -> String {
    nodes.iter().map(Node::html).collect::<Vec<_>>().join("\n")
}

#[test]
fn test_load_yaml_red_alert() {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/assets/yaml_components/red_alert.yml"
    );
    let loaded = load_yaml_file(path, None).unwrap();

    let expected = tags::DIV
        .empty()
        .with_children([
            tags::SPAN
                .with(attrs!["boolattr", "style" => "background-color: red", "class" => "alert"])
                .with_child("This is an Alert!")
                .unwrap(),
            tags::I.with(attrs![class = "horror"]),
        ])
        .unwrap();
    assert_eq!(loaded, [expected]);
}

#[test]
fn test_load_yaml_leaf_tags() {
    let sometag = TagSpec::leaf("sometag");

    assert_eq!(component("leaf_tag.empty"), [sometag.empty()]);
    assert_eq!(
        component("leaf_tag.with_attrs"),
        [sometag.with(attrs![class = "row"])]
    );
    assert_eq!(
        joined(&component("leaf_tag.with_multiple_tags")),
        render([Content::from(sometag.empty()), "\n".into(), sometag.empty().into()])
    );
}

#[test]
fn test_load_yaml_composite_tags() {
    let sometag = TagSpec::composite("sometag");
    let row = || sometag.with(attrs![class = "row"]);

    assert_eq!(component("composite_tag.empty"), [sometag.empty()]);
    assert_eq!(component("composite_tag.with_attrs"), [row()]);
    assert_eq!(
        component("composite_tag.with_vals"),
        [sometag.empty().with_children(["val1", "val2"]).unwrap()]
    );
    assert_eq!(
        component("composite_tag.with_attrs_and_vals"),
        [row().with_children(["val1", "val2"]).unwrap()]
    );
    assert_eq!(
        component("composite_tag.with_nested_tag"),
        [row().with_child(tags::I.empty().with_child("val").unwrap()).unwrap()]
    );
    assert_eq!(
        joined(&component("composite_tag.with_multiple_tags")),
        "<sometag>1</sometag>\n<sometag>2</sometag>"
    );
}

#[test]
fn test_load_text_dynamic() {
    let template = Template::new([Content::load_text(HTML_COMPONENT).unwrap()]).unwrap();
    let out = template.render([("foo", "bar")]).unwrap();
    assert_eq!(out.trim(), render(["<p>bar</p>"]));
}

#[test]
fn test_load_text_static() {
    let content = Content::load_text(HTML_COMPONENT).unwrap().with_literal_braces();
    let template = Template::new([content]).unwrap();
    let out = template.render([("foo", "bar")]).unwrap();
    assert_eq!(out.trim(), render(["<p>{foo}</p>"]));
}

#[test]
fn test_load_raw_dynamic() {
    let template = Template::new([Content::load_raw(HTML_COMPONENT).unwrap()]).unwrap();
    let out = template.render([("foo", "bar")]).unwrap();
    assert_eq!(out.trim(), "<p>bar</p>");
}

#[test]
fn test_load_raw_static() {
    let content = Content::load_raw(HTML_COMPONENT).unwrap().with_literal_braces();
    let template = Template::new([content]).unwrap();
    let out = template.render([("foo", "bar")]).unwrap();
    assert_eq!(out.trim(), "<p>{foo}</p>");
}
