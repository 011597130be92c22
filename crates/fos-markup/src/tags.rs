//! Tag Catalog
//!
//! Tag specifications: a tag name plus what the tag may contain. The catalog
//! is a flat table; custom tags are plain [`TagSpec`] values.
//!
//! ```
//! use fos_markup::{attrs, tags, TagSpec};
//!
//! let link = tags::A.with(attrs![href = "#"]).with_child("top").unwrap();
//! assert_eq!(link.html(), "<a href=\"#\">top</a>");
//!
//! let copy = TagSpec::composite("clipboard-copy").with(attrs![value = "foo"]);
//! assert_eq!(copy.with_child("Copy Me").unwrap().html(),
//!            "<clipboard-copy value=\"foo\">Copy Me</clipboard-copy>");
//! ```

use crate::attributes::Attributes;
use crate::{Markup, Node};

/// What a tag may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// No content, self-closing
    Leaf,
    /// At most one content node
    SingleChild,
    /// Any number of content nodes
    Composite,
}

/// How string content is embedded in a tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentMode {
    /// Strings become escaped text
    #[default]
    Escaped,
    /// Strings are embedded verbatim (script and style bodies)
    Raw,
}

/// Tag specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagSpec {
    name: &'static str,
    kind: TagKind,
    mode: ContentMode,
}

impl TagSpec {
    pub const fn leaf(name: &'static str) -> Self {
        Self { name, kind: TagKind::Leaf, mode: ContentMode::Escaped }
    }

    pub const fn single(name: &'static str) -> Self {
        Self { name, kind: TagKind::SingleChild, mode: ContentMode::Escaped }
    }

    /// Single-child tag whose string content is never escaped
    pub const fn raw(name: &'static str) -> Self {
        Self { name, kind: TagKind::SingleChild, mode: ContentMode::Raw }
    }

    pub const fn composite(name: &'static str) -> Self {
        Self { name, kind: TagKind::Composite, mode: ContentMode::Escaped }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn mode(&self) -> ContentMode {
        self.mode
    }

    /// Build the tag with attributes, using the process-wide caches
    pub fn with(&self, attrs: impl Into<Attributes>) -> Node {
        Markup::global().tag(self, attrs.into())
    }

    /// Build the tag without attributes
    pub fn empty(&self) -> Node {
        self.with(Attributes::new())
    }
}

macro_rules! catalog {
    ($($ident:ident => $ctor:ident($name:literal);)+) => {
        $(pub const $ident: TagSpec = TagSpec::$ctor($name);)+

        /// Every catalog entry as (exported name, spec)
        pub static CATALOG: &[(&str, TagSpec)] = &[$((stringify!($ident), $ident),)+];
    };
}

catalog! {
    A => composite("a");
    ABBR => composite("abbr");
    ADDRESS => composite("address");
    ANIMATE => composite("animate");
    ANIMATE_MOTION => composite("animateMotion");
    ANIMATE_TRANSFORM => composite("animateTransform");
    AREA => leaf("area");
    ARTICLE => composite("article");
    ASIDE => composite("aside");
    AUDIO => composite("audio");
    B => composite("b");
    BASE => leaf("base");
    BDI => composite("bdi");
    BDO => composite("bdo");
    BLOCK_QUOTE => composite("blockquote");
    BODY => composite("body");
    BR => leaf("br");
    BUTTON => composite("button");
    CANVAS => composite("canvas");
    CAPTION => composite("caption");
    CENTER => composite("center");
    CIRCLE => composite("circle");
    CIRCLE_PATH => composite("circlePath");
    CITE => composite("cite");
    CODE => composite("code");
    COL => leaf("col");
    COL_GROUP => composite("colgroup");
    COLOR_PROFILE => composite("color-profile");
    DATA => composite("data");
    DATA_LIST => composite("datalist");
    DD => composite("dd");
    DEFS => composite("defs");
    DEL => composite("del");
    DESC => composite("desc");
    DETAILS => composite("details");
    DFN => composite("dfn");
    DIALOG => composite("dialog");
    DISCARD => composite("discard");
    DIV => composite("div");
    DL => composite("dl");
    DT => composite("dt");
    ELLIPSE => composite("ellipse");
    EM => composite("em");
    EMBED => composite("embed");
    FE_BLEND => composite("feBlend");
    FE_COLOR_MATRIX => composite("feColorMatrix");
    FE_COMPONENT_TRANSFER => composite("feComponentTransfer");
    FE_COMPOSITE => composite("feComposite");
    FE_CONVOLVE_MATRIX => composite("feConvolveMatrix");
    FE_DIFFUSE_LIGHTING => composite("feDiffuseLighting");
    FE_DISPLACEMENT_MAP => composite("feDisplacementMap");
    FE_DISTANT_LIGHT => composite("feDistantLight");
    FE_DROP_SHADOW => composite("feDropShadow");
    FE_FLOOD => composite("feFlood");
    FE_FUNC_A => composite("feFuncA");
    FE_FUNC_B => composite("feFuncB");
    FE_FUNC_G => composite("feFuncG");
    FE_FUNC_R => composite("feFuncR");
    FE_GAUSSIAN_BLUR => composite("feGaussianBlur");
    FE_IMAGE => composite("feImage");
    FE_MERGE => composite("feMerge");
    FE_MERGE_NODE => composite("feMergeNode");
    FE_MORPHOLOGY => composite("feMorphology");
    FE_OFFSET => composite("feOffset");
    FE_POINT_LIGHT => composite("fePointLight");
    FE_SPECULAR_LIGHTING => composite("feSpecularLighting");
    FE_SPOT_LIGHT => composite("feSpotLight");
    FE_TILE => composite("feTile");
    FE_TURBULENCE => composite("feTurbulence");
    FIELD_SET => composite("fieldset");
    FIG_CAPTION => composite("figcaption");
    FIGURE => composite("figure");
    FILTER => composite("filter");
    FOOTER => composite("footer");
    FOREIGN_OBJECT => leaf("foreignObject");
    FORM => composite("form");
    G => composite("g");
    H1 => composite("h1");
    H2 => composite("h2");
    H3 => composite("h3");
    H4 => composite("h4");
    H5 => composite("h5");
    H6 => composite("h6");
    HATCH => composite("hatch");
    HATCHPATH => composite("hatchpath");
    HEAD => composite("head");
    HEADER => composite("header");
    HR => leaf("hr");
    HTML => composite("html");
    I => composite("i");
    IFRAME => composite("iframe");
    IMAGE => composite("image");
    IMG => leaf("img");
    INPUT => leaf("input");
    INS => composite("ins");
    KBD => composite("kbd");
    LABEL => composite("label");
    LEGEND => composite("legend");
    LI => composite("li");
    LINE => composite("line");
    LINEAR_GRADIENT => composite("linearGradient");
    LINK => leaf("link");
    MAIN => composite("main");
    MAP => composite("map");
    MARK => composite("mark");
    MARKER => composite("marker");
    MASK => composite("mask");
    META => leaf("meta");
    METADATA => composite("metadata");
    METER => leaf("meter");
    MPATH => composite("mpath");
    NAV => composite("nav");
    NO_BR => composite("nobr");
    NO_SCRIPT => composite("noscript");
    OBJECT => composite("object");
    OL => composite("ol");
    OPT_GROUP => composite("optgroup");
    OPTION => composite("option");
    OUTPUT => composite("output");
    P => composite("p");
    PARAM => leaf("param");
    PATH => composite("path");
    PATTERN => composite("pattern");
    PICTURE => composite("picture");
    POLYGON => composite("polygon");
    POLYLINE => composite("polyline");
    PRE => composite("pre");
    PROGRESS => composite("progress");
    Q => composite("q");
    RADIAL_GRADIENT => composite("radialGradient");
    RECT => composite("rect");
    RP => composite("rp");
    RT => composite("rt");
    RUBY => composite("ruby");
    S => composite("s");
    SAMP => composite("samp");
    SCRIPT => raw("script");
    SECTION => composite("section");
    SELECT => composite("select");
    SET => composite("set");
    SMALL => composite("small");
    SOLIDCOLOR => composite("solidcolor");
    SOURCE => leaf("source");
    SPAN => composite("span");
    STOP => composite("stop");
    STRONG => composite("strong");
    STYLE => raw("style");
    SUB => composite("sub");
    SUMMARY => composite("summary");
    SUP => composite("sup");
    SVG => composite("svg");
    SWITCH => composite("switch");
    SYMBOL => composite("symbol");
    TABLE => composite("table");
    TBODY => composite("tbody");
    TD => composite("td");
    TEMPLATE => composite("template");
    TEXT => composite("text");
    TEXT_AREA => single("textarea");
    TEXT_PATH => composite("textPath");
    TFOOT => composite("tfoot");
    TH => composite("th");
    THEAD => composite("thead");
    TIME => composite("time");
    TITLE => single("title");
    TR => composite("tr");
    TRACK => leaf("track");
    TSPAN => composite("tspan");
    U => composite("u");
    UL => composite("ul");
    USE => composite("use");
    VAR => composite("var");
    VIDEO => composite("video");
    VIEW => composite("view");
    WBR => leaf("wbr");
}

/// Look up a catalog entry by exported name (`"DIV"`)
pub fn lookup(exported: &str) -> Option<TagSpec> {
    CATALOG
        .iter()
        .find(|(name, _)| *name == exported)
        .map(|(_, spec)| *spec)
}

/// Look up a catalog entry by tag name (`"div"`)
pub fn by_tag_name(name: &str) -> Option<TagSpec> {
    CATALOG
        .iter()
        .find(|(_, spec)| spec.name == name)
        .map(|(_, spec)| *spec)
}

/// Exported name of the catalog entry matching a tag exactly
pub(crate) fn exported_name(name: &str, kind: TagKind, mode: ContentMode) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(_, spec)| spec.name == name && spec.kind == kind && spec.mode == mode)
        .map(|(exported, _)| *exported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_unique() {
        let exported: HashSet<_> = CATALOG.iter().map(|(name, _)| *name).collect();
        let tags: HashSet<_> = CATALOG.iter().map(|(_, spec)| spec.name()).collect();
        assert_eq!(exported.len(), CATALOG.len());
        assert_eq!(tags.len(), CATALOG.len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("DIV"), Some(DIV));
        assert_eq!(lookup("BLOCK_QUOTE").map(|s| s.name()), Some("blockquote"));
        assert_eq!(lookup("MARQUEE"), None);
    }

    #[test]
    fn test_by_tag_name() {
        assert_eq!(by_tag_name("br").map(|s| s.kind()), Some(TagKind::Leaf));
        assert_eq!(by_tag_name("feGaussianBlur"), Some(FE_GAUSSIAN_BLUR));
        assert_eq!(by_tag_name("nope"), None);
    }

    #[test]
    fn test_raw_content_tags() {
        assert_eq!(SCRIPT.mode(), ContentMode::Raw);
        assert_eq!(STYLE.mode(), ContentMode::Raw);
        assert_eq!(TEXT_AREA.mode(), ContentMode::Escaped);
        assert_eq!(TITLE.kind(), TagKind::SingleChild);
    }

    #[test]
    fn test_exported_name() {
        assert_eq!(exported_name("p", TagKind::Composite, ContentMode::Escaped), Some("P"));
        assert_eq!(exported_name("p", TagKind::Leaf, ContentMode::Escaped), None);
        assert_eq!(exported_name("script", TagKind::SingleChild, ContentMode::Escaped), None);
    }
}
