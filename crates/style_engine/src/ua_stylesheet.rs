//! Built-in HTML 4 default sheet, the quirks-mode additions, and the placeholder style.
//!
//! All three are process-wide and created on first use. The `set_*`/`reset_*` hooks
//! replace them; styles resolved earlier keep the `Arc` they were handed.

use crate::computed_style::Display;
use crate::style_value::StyleValue;
use css_cascade::{DeclaredProperty, DeclaredValue, LengthUnit, PropertyId, Rgba, RuleSet};
use css_selectors::{
    ComplexSelector, CompoundSelector, PseudoClass, PseudoId, Selector, SimpleSelector,
};
use log::debug;
use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};

/// The user-agent sheets.
#[derive(Clone, Debug, Default)]
pub struct DefaultSheets {
    /// Always applied, lowest origin.
    pub default: RuleSet,
    /// Applied after `default` when the document is in quirks mode.
    pub quirks: RuleSet,
}

impl DefaultSheets {
    /// The built-in HTML 4 sheets.
    pub fn html4() -> Self {
        Self {
            default: html4_default_sheet(),
            quirks: html4_quirks_sheet(),
        }
    }
}

static DEFAULT_SHEETS: Lazy<RwLock<Option<Arc<DefaultSheets>>>> = Lazy::new(|| RwLock::new(None));
static PLACEHOLDER_STYLE: Lazy<RwLock<Option<Arc<StyleValue>>>> = Lazy::new(|| RwLock::new(None));

/// Current default sheets, building the HTML 4 ones on first use.
pub fn default_sheets() -> Arc<DefaultSheets> {
    if let Some(existing) = DEFAULT_SHEETS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Arc::clone(existing);
    }
    let mut slot = DEFAULT_SHEETS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let sheets = slot.get_or_insert_with(|| {
        debug!("building built-in default sheets");
        Arc::new(DefaultSheets::html4())
    });
    Arc::clone(sheets)
}

/// Replace the default sheets used by indexes built from now on.
pub fn set_default_sheets(sheets: DefaultSheets) {
    *DEFAULT_SHEETS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(sheets));
}

/// Drop the current default sheets; the next use rebuilds the built-in ones.
pub fn reset_default_sheets() {
    *DEFAULT_SHEETS
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

/// Style handed out while sheets are still loading: `display: none`.
pub fn placeholder_style() -> Arc<StyleValue> {
    if let Some(existing) = PLACEHOLDER_STYLE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Arc::clone(existing);
    }
    let mut slot = PLACEHOLDER_STYLE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let style = slot.get_or_insert_with(|| {
        let mut style = StyleValue::root();
        style.set_display(Display::None);
        Arc::new(style)
    });
    Arc::clone(style)
}

pub fn reset_placeholder_style() {
    *PLACEHOLDER_STYLE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = None;
}

fn tag_selectors(names: &[&str]) -> Vec<Selector> {
    names
        .iter()
        .map(|name| ComplexSelector::compound(CompoundSelector::tag(name)).compile())
        .collect()
}

fn tag_with(name: &str, extra: SimpleSelector) -> Selector {
    ComplexSelector::compound(CompoundSelector::new(vec![
        SimpleSelector::Type(name.to_owned()),
        extra,
    ]))
    .compile()
}

fn keyword(id: PropertyId, ident: &str) -> DeclaredProperty {
    DeclaredProperty::new(id, DeclaredValue::keyword(ident))
}

fn em(id: PropertyId, value: f32) -> DeclaredProperty {
    DeclaredProperty::new(id, DeclaredValue::Length(value, LengthUnit::Em))
}

fn px(id: PropertyId, value: f32) -> DeclaredProperty {
    DeclaredProperty::new(id, DeclaredValue::px(value))
}

fn vertical_margins(value: f32) -> [DeclaredProperty; 2] {
    [em(PropertyId::MarginTop, value), em(PropertyId::MarginBottom, value)]
}

fn heading(sheet: &mut RuleSet, name: &str, size: f32, margin: f32) {
    let mut declarations = vec![
        keyword(PropertyId::Display, "block"),
        em(PropertyId::FontSize, size),
        keyword(PropertyId::FontWeight, "bold"),
    ];
    declarations.extend(vertical_margins(margin));
    sheet.add_rule(tag_selectors(&[name]), declarations);
}

fn html4_default_sheet() -> RuleSet {
    let mut sheet = RuleSet::new();
    sheet.add_rule(
        tag_selectors(&[
            "html", "address", "blockquote", "body", "center", "dd", "dir", "div", "dl", "dt",
            "fieldset", "form", "frame", "frameset", "hr", "menu", "noframes", "ol", "p", "pre",
            "ul",
        ]),
        vec![keyword(PropertyId::Display, "block")],
    );
    sheet.add_rule(
        tag_selectors(&["head", "link", "meta", "noscript", "script", "style", "title"]),
        vec![keyword(PropertyId::Display, "none")],
    );
    sheet.add_rule(
        tag_selectors(&["li"]),
        vec![keyword(PropertyId::Display, "list-item")],
    );
    sheet.add_rule(
        tag_selectors(&["body"]),
        vec![
            px(PropertyId::MarginTop, 8.0),
            px(PropertyId::MarginRight, 8.0),
            px(PropertyId::MarginBottom, 8.0),
            px(PropertyId::MarginLeft, 8.0),
        ],
    );

    heading(&mut sheet, "h1", 2.0, 0.67);
    heading(&mut sheet, "h2", 1.5, 0.75);
    heading(&mut sheet, "h3", 1.17, 0.83);
    heading(&mut sheet, "h4", 1.0, 1.12);
    heading(&mut sheet, "h5", 0.83, 1.5);
    heading(&mut sheet, "h6", 0.75, 1.67);

    sheet.add_rule(
        tag_selectors(&["p", "blockquote", "ul", "ol", "dl", "fieldset", "pre"]),
        vertical_margins(1.12).to_vec(),
    );
    sheet.add_rule(
        tag_selectors(&["blockquote"]),
        vec![px(PropertyId::MarginLeft, 40.0), px(PropertyId::MarginRight, 40.0)],
    );
    sheet.add_rule(
        tag_selectors(&["ol", "ul", "dir", "menu", "dd"]),
        vec![px(PropertyId::MarginLeft, 40.0)],
    );
    sheet.add_rule(
        tag_selectors(&["ol"]),
        vec![keyword(PropertyId::ListStyleType, "decimal")],
    );

    sheet.add_rule(
        tag_selectors(&["b", "strong", "th"]),
        vec![keyword(PropertyId::FontWeight, "bolder")],
    );
    sheet.add_rule(
        tag_selectors(&["i", "cite", "em", "var", "address"]),
        vec![keyword(PropertyId::FontStyle, "italic")],
    );
    sheet.add_rule(
        tag_selectors(&["pre", "tt", "code", "kbd", "samp"]),
        vec![keyword(PropertyId::FontFamily, "monospace")],
    );
    sheet.add_rule(
        tag_selectors(&["pre"]),
        vec![keyword(PropertyId::WhiteSpace, "pre")],
    );
    sheet.add_rule(
        tag_selectors(&["big"]),
        vec![keyword(PropertyId::FontSize, "larger")],
    );
    sheet.add_rule(
        tag_selectors(&["small", "sub", "sup"]),
        vec![keyword(PropertyId::FontSize, "smaller")],
    );
    sheet.add_rule(
        tag_selectors(&["sub"]),
        vec![keyword(PropertyId::VerticalAlign, "sub")],
    );
    sheet.add_rule(
        tag_selectors(&["sup"]),
        vec![keyword(PropertyId::VerticalAlign, "super")],
    );
    sheet.add_rule(
        tag_selectors(&["u", "ins"]),
        vec![keyword(PropertyId::TextDecoration, "underline")],
    );
    sheet.add_rule(
        tag_selectors(&["s", "strike", "del"]),
        vec![keyword(PropertyId::TextDecoration, "line-through")],
    );
    sheet.add_rule(
        tag_selectors(&["center"]),
        vec![keyword(PropertyId::TextAlign, "center")],
    );

    sheet.add_rule(
        tag_selectors(&["table"]),
        vec![
            keyword(PropertyId::Display, "table"),
            px(PropertyId::BorderSpacing, 2.0),
        ],
    );
    for (tag, display) in [
        ("tr", "table-row"),
        ("thead", "table-header-group"),
        ("tbody", "table-row-group"),
        ("tfoot", "table-footer-group"),
        ("col", "table-column"),
        ("colgroup", "table-column-group"),
        ("caption", "table-caption"),
    ] {
        sheet.add_rule(
            tag_selectors(&[tag]),
            vec![keyword(PropertyId::Display, display)],
        );
    }
    sheet.add_rule(
        tag_selectors(&["td", "th"]),
        vec![
            keyword(PropertyId::Display, "table-cell"),
            keyword(PropertyId::VerticalAlign, "middle"),
        ],
    );
    sheet.add_rule(
        tag_selectors(&["th", "caption"]),
        vec![keyword(PropertyId::TextAlign, "center")],
    );

    sheet.add_rule(
        vec![tag_with("a", SimpleSelector::PseudoClass(PseudoClass::Link))],
        vec![
            DeclaredProperty::new(
                PropertyId::Color,
                DeclaredValue::Color(Rgba::opaque(0, 0, 238)),
            ),
            keyword(PropertyId::TextDecoration, "underline"),
        ],
    );
    sheet.add_rule(
        vec![tag_with("a", SimpleSelector::PseudoClass(PseudoClass::Visited))],
        vec![
            DeclaredProperty::new(
                PropertyId::Color,
                DeclaredValue::Color(Rgba::opaque(85, 26, 139)),
            ),
            keyword(PropertyId::TextDecoration, "underline"),
        ],
    );
    sheet.add_rule(
        vec![tag_with("q", SimpleSelector::PseudoElement(PseudoId::Before))],
        vec![keyword(PropertyId::Content, "open-quote")],
    );
    sheet.add_rule(
        vec![tag_with("q", SimpleSelector::PseudoElement(PseudoId::After))],
        vec![keyword(PropertyId::Content, "close-quote")],
    );
    sheet
}

/// Quirks mode: tables do not inherit text styling from their ancestors.
fn html4_quirks_sheet() -> RuleSet {
    RuleSet::new().with_rule(
        tag_selectors(&["table"]),
        vec![
            keyword(PropertyId::WhiteSpace, "normal"),
            keyword(PropertyId::LineHeight, "normal"),
            keyword(PropertyId::FontWeight, "normal"),
            keyword(PropertyId::FontSize, "medium"),
            keyword(PropertyId::FontVariant, "normal"),
            keyword(PropertyId::FontStyle, "normal"),
            keyword(PropertyId::TextAlign, "left"),
        ],
    )
}
