//! Example: Generate a README page with fOS Markup

use fos_markup::{attrs, render, tags, Content, Markup, Node, Template};

fn badge(href: &str, src: &str, alt: &str) -> fos_markup::Result<Node> {
    let img = tags::IMG.with(attrs![src = src, alt = alt]);
    let link = tags::A.with(attrs![href = href]).with_child(img)?;
    tags::SPAN.empty().with_child(link)
}

fn plugin(title: &str, href: &str, description: &str) -> fos_markup::Result<Node> {
    let name = tags::B.empty().with_child(title)?;
    let link = tags::A.with(attrs![href = href]).with_child(name)?;
    let item = tags::LI
        .empty()
        .with_children([link, tags::SPAN.empty().with_child(format!(": {description}"))?])?;
    tags::UL.empty().with_child(item)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let centered = attrs![align = "center"];
    let nbsp = || Content::raw("&nbsp;");

    let readme = vec![
        tags::H1.with(centered.clone()).with_child("fOS Markup")?,
        tags::P
            .with(centered.clone())
            .with_child("Immutable, memoized markup trees")?,
        tags::P.with(centered).with_children([
            Content::from(badge(
                "https://crates.io/crates/fos-markup",
                "https://img.shields.io/crates/v/fos-markup.svg",
                "crates.io",
            )?),
            nbsp(),
            Content::from(badge(
                "https://docs.rs/fos-markup",
                "https://docs.rs/fos-markup/badge.svg",
                "docs.rs",
            )?),
        ])?,
        tags::H2.empty().with_child("Usage")?,
        tags::PRE.empty().with_child(
            "tags::TEXT_AREA.with(attrs![required, class = \"input\"]).with_child(\"text\")?",
        )?,
        tags::H2.empty().with_child("Plugins")?,
        tags::P.empty().with_children([
            plugin("fos-dom", "https://example.org/fos-dom", "DOM integration")?,
            plugin("fos-html", "https://example.org/fos-html", "HTML parsing")?,
        ])?,
    ];

    println!("{}", render(&readme));

    let paras = Template::new([
        tags::P.empty().with_child("{x}")?,
        tags::P.empty().with_child("another {x}")?,
    ])?;
    println!("{}", paras.render([("x", "awesome paragraph")])?);

    for stats in Markup::global().stats() {
        println!(
            "{:>18}: {} entries, {:.0}% hits",
            stats.name,
            stats.entries,
            stats.hit_rate() * 100.0
        );
    }

    Ok(())
}
