#![cfg(test)]

mod support;

use core::error::Error;
use css_cascade::{DeclaredProperty, DeclaredValue, PropertyId, Rgba, RuleSet};
use css_selectors::{PseudoClass, QuirksMode, SimpleSelector};
use std::sync::Arc;
use style_engine::{
    ComputedValue, Display, Float, StyleResolver, StyleValue, TextDecorationLine,
    placeholder_style,
};
use support::{TestDocument, compound, tag};

const RED: Rgba = Rgba::opaque(255, 0, 0);
const LINK_BLUE: Rgba = Rgba::opaque(0, 0, 238);

fn red_rule(selector: css_selectors::Selector) -> RuleSet {
    RuleSet::new().with_rule(
        vec![selector],
        vec![DeclaredProperty::new(PropertyId::Color, DeclaredValue::Color(RED))],
    )
}

/// Resolve every node through the resolver, parents first.
fn resolve_all(resolver: &StyleResolver, document: &TestDocument) -> Vec<Arc<StyleValue>> {
    let mut styles: Vec<Arc<StyleValue>> = Vec::with_capacity(document.nodes.len());
    for (element, node) in document.nodes.iter().enumerate() {
        let parent = node
            .parent
            .and_then(|parent_index| styles.get(parent_index))
            .map(|style| &**style);
        let style = resolver.resolve_style(document, element, parent);
        styles.push(style);
    }
    styles
}

#[test]
fn pending_sheets_yield_the_placeholder() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let document = TestDocument::new("html");
    let mut resolver = StyleResolver::new(QuirksMode::NoQuirks);
    resolver.sheet_load_started();
    let pending = resolver.resolve_style(&document, 0, None);
    if !Arc::ptr_eq(&pending, &placeholder_style()) || pending.display() != Display::None {
        return Err("pending sheets should give the shared placeholder".into());
    }
    resolver.sheet_load_finished();
    let loaded = resolver.resolve_style(&document, 0, None);
    if loaded.display() != Display::Block {
        return Err("html should be a block once sheets are loaded".into());
    }
    Ok(())
}

#[test]
fn sheet_changes_rebuild_the_index() -> Result<(), Box<dyn Error>> {
    let mut resolver = StyleResolver::new(QuirksMode::NoQuirks);
    let first = resolver.index();
    if !Arc::ptr_eq(&first, &resolver.index()) {
        return Err("index should be reused until the sheets change".into());
    }
    let epoch = resolver.current_rules_epoch();
    resolver.add_author_sheet(red_rule(tag("p")));
    if resolver.current_rules_epoch() == epoch {
        return Err("adding a sheet should bump the epoch".into());
    }
    let second = resolver.index();
    if Arc::ptr_eq(&first, &second) || second.property_count() <= first.property_count() {
        return Err("index should be rebuilt with the new rule".into());
    }
    let rebuilt = resolver.rebuild_index();
    if Arc::ptr_eq(&second, &rebuilt) || rebuilt.property_count() != second.property_count() {
        return Err("explicit rebuild should produce an equivalent fresh index".into());
    }
    Ok(())
}

#[test]
fn default_sheet_styles_html() -> Result<(), Box<dyn Error>> {
    let mut document = TestDocument::new("html");
    let body = document.add(0, "body", &[]);
    let heading = document.add(body, "h1", &[]);
    let paragraph = document.add(body, "p", &[]);
    let link = document.add(paragraph, "a", &[("href", "https://example.com/")]);
    let anchor = document.add(paragraph, "a", &[("name", "top")]);
    let resolver = StyleResolver::new(QuirksMode::NoQuirks);
    let styles = resolve_all(&resolver, &document);
    let style = |element: usize| styles.get(element).ok_or("missing style");

    if *style(body)?.get(PropertyId::MarginTop) != ComputedValue::Length(8.0) {
        return Err("body should have an 8px margin".into());
    }
    let heading_style = style(heading)?;
    if (heading_style.font_size() - 32.0).abs() > 1e-3 || heading_style.font_weight() != 700 {
        return Err("h1 should be 2em and bold".into());
    }
    let link_style = style(link)?;
    if link_style.color() != LINK_BLUE
        || !link_style
            .decorations_in_effect()
            .contains(TextDecorationLine::UNDERLINE)
    {
        return Err("links should be blue and underlined".into());
    }
    if style(anchor)?.color() == LINK_BLUE {
        return Err("anchors without href are not links".into());
    }
    if style(link)?.display() != Display::Inline {
        return Err("links are inline".into());
    }
    Ok(())
}

#[test]
fn quirks_sheet_resets_table_fonts() -> Result<(), Box<dyn Error>> {
    let mut document = TestDocument::new("html");
    let bold = document.add(0, "b", &[]);
    let table = document.add(bold, "table", &[]);

    let strict = resolve_all(&StyleResolver::new(QuirksMode::NoQuirks), &document);
    if strict.get(table).ok_or("missing style")?.font_weight() != 700 {
        return Err("tables inherit weight in strict mode".into());
    }

    document.quirks = QuirksMode::Quirks;
    let mut resolver = StyleResolver::new(QuirksMode::NoQuirks);
    resolver.set_quirks_mode(QuirksMode::Quirks);
    let quirky = resolve_all(&resolver, &document);
    if quirky.get(table).ok_or("missing style")?.font_weight() != 400 {
        return Err("quirks mode resets table font weight".into());
    }
    Ok(())
}

#[test]
fn document_mode_selects_the_quirks_sheet() -> Result<(), Box<dyn Error>> {
    let mut document = TestDocument::new("html");
    let bold = document.add(0, "b", &[]);
    let table = document.add(bold, "table", &[]);
    let row = document.add(table, "tr", &[]);
    let cell = document.add(row, "td", &[]);
    document.quirks = QuirksMode::Quirks;

    let mut resolver = StyleResolver::new(QuirksMode::NoQuirks);
    resolver.add_author_sheet(RuleSet::new().with_rule(
        vec![tag("td")],
        vec![DeclaredProperty::new(PropertyId::Float, DeclaredValue::keyword("left"))],
    ));
    let styles = resolve_all(&resolver, &document);
    let style = |element: usize| styles.get(element).ok_or("missing style");

    if style(table)?.font_weight() != 400 {
        return Err("a quirks document gets the quirks sheet".into());
    }
    let cell_style = style(cell)?;
    if cell_style.display() != Display::TableCell || cell_style.float() != Float::None {
        return Err("quirks cells stay unfloated table cells".into());
    }
    let strict_index = resolver.index();
    let quirks_index = resolver.index_for(QuirksMode::Quirks);
    if strict_index.property_count() >= quirks_index.property_count() {
        return Err("the resolver's own index leaves out the quirks sheet".into());
    }
    Ok(())
}

#[test]
fn universal_hover_only_applies_to_links() -> Result<(), Box<dyn Error>> {
    let mut document = TestDocument::new("html");
    let body = document.add(0, "body", &[]);
    let hovered_div = document.add(body, "div", &[]);
    let hovered_link = document.add(body, "a", &[("href", "https://example.com/")]);
    let idle_link = document.add(body, "a", &[("href", "https://example.com/other")]);
    document.hovered = vec![0, body, hovered_div, hovered_link];

    let mut resolver = StyleResolver::new(QuirksMode::NoQuirks);
    resolver.add_author_sheet(red_rule(compound(vec![SimpleSelector::PseudoClass(
        PseudoClass::Hover,
    )])));
    let styles = resolve_all(&resolver, &document);
    let style = |element: usize| styles.get(element).ok_or("missing style");

    if style(hovered_div)?.color() == RED {
        return Err("bare :hover must not match a plain div".into());
    }
    let hovered = style(hovered_link)?;
    if hovered.color() != RED || !hovered.affected_by_hover() {
        return Err("hovered link should match and record the dependency".into());
    }
    let idle = style(idle_link)?;
    if idle.color() != LINK_BLUE || !idle.affected_by_hover() {
        return Err("idle link still depends on hover".into());
    }

    resolver.add_author_sheet(red_rule(compound(vec![
        SimpleSelector::Type("div".to_owned()),
        SimpleSelector::PseudoClass(PseudoClass::Hover),
    ])));
    let refreshed = resolve_all(&resolver, &document);
    if refreshed.get(hovered_div).ok_or("missing style")?.color() != RED {
        return Err("div:hover should match a hovered div".into());
    }
    Ok(())
}

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_types_cross_threads() {
    assert_send_sync::<StyleResolver>();
    assert_send_sync::<StyleValue>();
    assert_send_sync::<css_cascade::CascadeIndex>();
}
