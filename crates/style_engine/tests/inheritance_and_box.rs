#![cfg(test)]

mod support;

use core::error::Error;
use css_cascade::{DeclaredProperty, DeclaredValue, LengthUnit, PropertyId, Rgba, RuleSet};
use style_engine::{ComputedValue, Display, StyleValue};
use support::{TestDocument, author_index, resolve_all, tag};

const RED: Rgba = Rgba::opaque(255, 0, 0);

fn declare(id: PropertyId, value: DeclaredValue) -> DeclaredProperty {
    DeclaredProperty::new(id, value)
}

/// `<html><body><p/></body></html>`; returns body and p.
fn body_and_paragraph() -> (TestDocument, usize, usize) {
    let mut document = TestDocument::new("html");
    let body = document.add(0, "body", &[]);
    let paragraph = document.add(body, "p", &[]);
    (document, body, paragraph)
}

fn style_at(styles: &[StyleValue], element: usize) -> Result<&StyleValue, Box<dyn Error>> {
    Ok(styles.get(element).ok_or("missing style")?)
}

#[test]
fn inherited_properties_flow_to_children() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let (document, body, paragraph) = body_and_paragraph();
    let sheet = RuleSet::new().with_rule(
        vec![tag("body")],
        vec![
            declare(PropertyId::Color, DeclaredValue::Color(RED)),
            declare(PropertyId::FontSize, DeclaredValue::px(20.0)),
            declare(PropertyId::MarginTop, DeclaredValue::px(10.0)),
        ],
    );
    let styles = resolve_all(&document, &author_index(&[sheet]));
    let body_style = style_at(&styles, body)?;
    let paragraph_style = style_at(&styles, paragraph)?;

    if paragraph_style.color() != RED || (paragraph_style.font_size() - 20.0).abs() > 1e-4 {
        return Err("colour and font size should be inherited".into());
    }
    if *paragraph_style.get(PropertyId::MarginTop) != ComputedValue::Length(0.0) {
        return Err("margin is not inherited".into());
    }
    if !paragraph_style.shares_inherited_with(body_style) {
        return Err("untouched inherited group should stay shared".into());
    }
    Ok(())
}

#[test]
fn explicit_inherit_copies_non_inherited_values() -> Result<(), Box<dyn Error>> {
    let (document, body, paragraph) = body_and_paragraph();
    let sheet = RuleSet::new()
        .with_rule(
            vec![tag("body")],
            vec![declare(PropertyId::PaddingTop, DeclaredValue::px(7.0))],
        )
        .with_rule(
            vec![tag("p")],
            vec![declare(PropertyId::PaddingTop, DeclaredValue::keyword("inherit"))],
        )
        .with_rule(
            vec![tag("html")],
            vec![declare(PropertyId::PaddingTop, DeclaredValue::Inherit)],
        );
    let styles = resolve_all(&document, &author_index(&[sheet]));
    if *style_at(&styles, paragraph)?.get(PropertyId::PaddingTop) != ComputedValue::Length(7.0) {
        return Err("padding-top: inherit should copy the parent value".into());
    }
    if *style_at(&styles, 0)?.get(PropertyId::PaddingTop) != ComputedValue::Length(0.0) {
        return Err("inherit at the root should give the initial value".into());
    }
    if !style_at(&styles, body)?.is_specified(PropertyId::PaddingTop) {
        return Err("body padding should be recorded".into());
    }
    Ok(())
}

#[test]
fn initial_resets_inherited_value() -> Result<(), Box<dyn Error>> {
    let (document, _, paragraph) = body_and_paragraph();
    let sheet = RuleSet::new()
        .with_rule(
            vec![tag("body")],
            vec![declare(PropertyId::Color, DeclaredValue::Color(RED))],
        )
        .with_rule(
            vec![tag("p")],
            vec![declare(PropertyId::Color, DeclaredValue::Initial)],
        );
    let styles = resolve_all(&document, &author_index(&[sheet]));
    if style_at(&styles, paragraph)?.color() != Rgba::BLACK {
        return Err("color: initial should be black".into());
    }
    Ok(())
}

#[test]
fn font_size_applies_before_relative_lengths() -> Result<(), Box<dyn Error>> {
    let (document, _, paragraph) = body_and_paragraph();
    let sheet = RuleSet::new()
        .with_rule(
            vec![tag("body")],
            vec![declare(PropertyId::FontSize, DeclaredValue::px(10.0))],
        )
        .with_rule(
            vec![tag("p")],
            vec![
                declare(PropertyId::LineHeight, DeclaredValue::Percentage(100.0)),
                declare(PropertyId::MarginTop, DeclaredValue::Length(1.5, LengthUnit::Em)),
                declare(PropertyId::FontSize, DeclaredValue::Length(2.0, LengthUnit::Em)),
            ],
        );
    let styles = resolve_all(&document, &author_index(&[sheet]));
    let paragraph_style = style_at(&styles, paragraph)?;
    if (paragraph_style.font_size() - 20.0).abs() > 1e-4 {
        return Err("2em of a 10px parent should be 20px".into());
    }
    if *paragraph_style.get(PropertyId::LineHeight) != ComputedValue::Length(20.0) {
        return Err("line-height: 100% should use the element's new font size".into());
    }
    if *paragraph_style.get(PropertyId::MarginTop) != ComputedValue::Length(30.0) {
        return Err("em margins should use the element's new font size".into());
    }
    Ok(())
}

#[test]
fn invalid_values_are_skipped() -> Result<(), Box<dyn Error>> {
    let (document, _, paragraph) = body_and_paragraph();
    let sheet = RuleSet::new()
        .with_rule(
            vec![tag("p")],
            vec![
                declare(PropertyId::Display, DeclaredValue::keyword("block")),
                declare(PropertyId::Width, DeclaredValue::px(10.0)),
            ],
        )
        .with_rule(
            vec![tag("p")],
            vec![
                declare(PropertyId::Display, DeclaredValue::keyword("flex")),
                declare(PropertyId::Width, DeclaredValue::px(-5.0)),
                declare(PropertyId::FontWeight, DeclaredValue::Integer(450)),
            ],
        );
    let styles = resolve_all(&document, &author_index(&[sheet]));
    let paragraph_style = style_at(&styles, paragraph)?;
    if paragraph_style.display() != Display::Block {
        return Err("unknown display keyword should leave the earlier value".into());
    }
    if *paragraph_style.get(PropertyId::Width) != ComputedValue::Length(10.0) {
        return Err("negative width should be rejected".into());
    }
    if paragraph_style.font_weight() != 400 {
        return Err("font-weight 450 should be rejected".into());
    }
    Ok(())
}

#[test]
fn bolder_tracks_the_parent_weight() -> Result<(), Box<dyn Error>> {
    let (document, _, paragraph) = body_and_paragraph();
    let sheet = RuleSet::new()
        .with_rule(
            vec![tag("body")],
            vec![declare(PropertyId::FontWeight, DeclaredValue::keyword("bold"))],
        )
        .with_rule(
            vec![tag("p")],
            vec![declare(PropertyId::FontWeight, DeclaredValue::keyword("bolder"))],
        );
    let styles = resolve_all(&document, &author_index(&[sheet]));
    if style_at(&styles, paragraph)?.font_weight() != 900 {
        return Err("bolder than bold should clamp at 900".into());
    }
    Ok(())
}
