//! Property table: value kind and initial value per property, and the compute step
//! that turns a declared value into a computed one.

use crate::computed_style::{ComputedValue, Display, Float, Position, TextDecorationLine};
use crate::style_value::{DEFAULT_FONT_SIZE, StyleValue};
use anyhow::{Context as _, Result, anyhow, bail};
use css_cascade::{DeclaredProperty, DeclaredValue, LengthUnit, PropertyId, Rgba};
use css_selectors::QuirksMode;
use csscolorparser::Color as CssColor;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Absolute font sizes for `xx-small` through `xx-large`, in px.
const FONT_SIZE_TABLE: [(&str, f32); 7] = [
    ("xx-small", 9.0),
    ("x-small", 10.0),
    ("small", 13.0),
    ("medium", 16.0),
    ("large", 18.0),
    ("x-large", 24.0),
    ("xx-large", 32.0),
];
const FONT_SCALE: f32 = 1.2;
const PX_PER_IN: f32 = 96.0;

const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const AUTO: &[&str] = &["auto"];
const NONE: &[&str] = &["none"];
const NORMAL: &[&str] = &["normal"];
const VERTICAL_ALIGN: &[&str] = &[
    "baseline",
    "sub",
    "super",
    "top",
    "text-top",
    "middle",
    "bottom",
    "text-bottom",
];
const LIST_STYLE_TYPES: &[&str] = &[
    "disc",
    "circle",
    "square",
    "decimal",
    "decimal-leading-zero",
    "lower-roman",
    "upper-roman",
    "lower-greek",
    "lower-alpha",
    "lower-latin",
    "upper-alpha",
    "upper-latin",
    "none",
];
const CURSORS: &[&str] = &[
    "auto",
    "crosshair",
    "default",
    "pointer",
    "move",
    "e-resize",
    "ne-resize",
    "nw-resize",
    "n-resize",
    "se-resize",
    "sw-resize",
    "s-resize",
    "w-resize",
    "text",
    "wait",
    "help",
];
const POSITION_KEYWORDS: &[&str] = &["left", "center", "right", "top", "bottom"];
const CONTENT_KEYWORDS: &[&str] = &["open-quote", "close-quote", "no-open-quote", "no-close-quote"];

/// How a property's declared value is computed.
#[derive(Clone, Copy, Debug)]
pub enum ValueKind {
    /// One keyword out of a fixed set.
    Keywords(&'static [&'static str]),
    Color,
    /// Length with optional keywords, percentages and negative values.
    Length {
        keywords: &'static [&'static str],
        percent: bool,
        negative: bool,
    },
    /// `thin` / `medium` / `thick` or a non-negative length.
    BorderWidth,
    FontSize,
    FontWeight,
    LineHeight,
    FontFamily,
    /// `none` or a URL.
    Image,
    TextDecoration,
    /// Integer, or `auto`.
    Integer,
    /// One or two lengths, percentages or position keywords.
    BackgroundPosition,
    /// Generated content list, or `normal` / `none`.
    Content,
}

/// Table entry for one property.
#[derive(Debug)]
pub struct PropertyEntry {
    pub kind: ValueKind,
    pub initial: ComputedValue,
}

/// Values the compute step may read from the style being built.
#[derive(Clone, Copy, Debug)]
pub struct ComputeContext {
    /// Element's font size (already final for late properties).
    pub font_size: f32,
    pub parent_font_size: f32,
    pub parent_font_weight: i32,
    /// Colour `currentcolor` resolves to when computing `color` itself.
    pub parent_color: Rgba,
    pub quirks: QuirksMode,
}

impl ComputeContext {
    pub fn new(style: &StyleValue, parent: Option<&StyleValue>, quirks: QuirksMode) -> Self {
        Self {
            font_size: style.font_size(),
            parent_font_size: parent.map_or(DEFAULT_FONT_SIZE, StyleValue::font_size),
            parent_font_weight: parent.map_or(400, StyleValue::font_weight),
            parent_color: parent.map_or(Rgba::BLACK, StyleValue::color),
            quirks,
        }
    }
}

static PROPERTY_TABLE: Lazy<Vec<PropertyEntry>> =
    Lazy::new(|| PropertyId::ALL.iter().map(|&id| entry_for(id)).collect());

static FALLBACK_INITIAL: ComputedValue = ComputedValue::Keyword("initial");

/// Table entry of a property.
pub fn property_entry(id: PropertyId) -> Option<&'static PropertyEntry> {
    PROPERTY_TABLE.get(id as usize)
}

/// Initial computed value of a property.
pub fn initial_value(id: PropertyId) -> &'static ComputedValue {
    property_entry(id).map_or(&FALLBACK_INITIAL, |entry| &entry.initial)
}

fn keyword(value: &'static str) -> ComputedValue {
    ComputedValue::Keyword(value)
}

fn length(keywords: &'static [&'static str], percent: bool, negative: bool) -> ValueKind {
    ValueKind::Length {
        keywords,
        percent,
        negative,
    }
}

fn entry_for(id: PropertyId) -> PropertyEntry {
    use PropertyId as Id;
    let zero = ComputedValue::Length(0.0);
    let (kind, initial) = match id {
        Id::Color => (ValueKind::Color, ComputedValue::Color(Rgba::BLACK)),
        Id::FontFamily => (
            ValueKind::FontFamily,
            ComputedValue::List(Arc::from([ComputedValue::String(Arc::from("serif"))])),
        ),
        Id::FontSize => (ValueKind::FontSize, ComputedValue::Length(DEFAULT_FONT_SIZE)),
        Id::FontStyle => (
            ValueKind::Keywords(&["normal", "italic", "oblique"]),
            keyword("normal"),
        ),
        Id::FontVariant => (
            ValueKind::Keywords(&["normal", "small-caps"]),
            keyword("normal"),
        ),
        Id::FontWeight => (ValueKind::FontWeight, ComputedValue::Integer(400)),

        Id::BackgroundAttachment => (
            ValueKind::Keywords(&["scroll", "fixed"]),
            keyword("scroll"),
        ),
        Id::BackgroundColor => (ValueKind::Color, ComputedValue::Color(Rgba::TRANSPARENT)),
        Id::BackgroundImage | Id::ListStyleImage => (ValueKind::Image, keyword("none")),
        Id::BackgroundPosition => (
            ValueKind::BackgroundPosition,
            ComputedValue::List(Arc::from([
                ComputedValue::Percentage(0.0),
                ComputedValue::Percentage(0.0),
            ])),
        ),
        Id::BackgroundRepeat => (
            ValueKind::Keywords(&["repeat", "repeat-x", "repeat-y", "no-repeat"]),
            keyword("repeat"),
        ),

        Id::BorderCollapse => (
            ValueKind::Keywords(&["collapse", "separate"]),
            keyword("separate"),
        ),
        Id::BorderSpacing => (length(&[], false, false), zero),
        Id::BorderTopColor
        | Id::BorderRightColor
        | Id::BorderBottomColor
        | Id::BorderLeftColor
        | Id::OutlineColor => (ValueKind::Color, ComputedValue::CurrentColor),
        Id::BorderTopStyle
        | Id::BorderRightStyle
        | Id::BorderBottomStyle
        | Id::BorderLeftStyle
        | Id::OutlineStyle => (ValueKind::Keywords(BORDER_STYLES), keyword("none")),
        Id::BorderTopWidth
        | Id::BorderRightWidth
        | Id::BorderBottomWidth
        | Id::BorderLeftWidth
        | Id::OutlineWidth => (ValueKind::BorderWidth, ComputedValue::Length(3.0)),

        Id::Display => (ValueKind::Keywords(Display::KEYWORDS), keyword("inline")),
        Id::Position => (ValueKind::Keywords(Position::KEYWORDS), keyword("static")),
        Id::Float => (ValueKind::Keywords(Float::KEYWORDS), keyword("none")),
        Id::Clear => (
            ValueKind::Keywords(&["none", "left", "right", "both"]),
            keyword("none"),
        ),
        Id::Top | Id::Right | Id::Bottom | Id::Left => (length(AUTO, true, true), keyword("auto")),
        Id::ZIndex => (ValueKind::Integer, keyword("auto")),
        Id::Width | Id::Height => (length(AUTO, true, false), keyword("auto")),
        Id::MinWidth
        | Id::MinHeight
        | Id::PaddingTop
        | Id::PaddingRight
        | Id::PaddingBottom
        | Id::PaddingLeft => (length(&[], true, false), zero),
        Id::MaxWidth | Id::MaxHeight => (length(NONE, true, false), keyword("none")),
        Id::MarginTop | Id::MarginRight | Id::MarginBottom | Id::MarginLeft => {
            (length(AUTO, true, true), zero)
        }
        Id::Overflow => (
            ValueKind::Keywords(&["visible", "hidden", "scroll", "auto"]),
            keyword("visible"),
        ),
        Id::Visibility => (
            ValueKind::Keywords(&["visible", "hidden", "collapse"]),
            keyword("visible"),
        ),
        Id::VerticalAlign => (length(VERTICAL_ALIGN, true, true), keyword("baseline")),

        Id::Direction => (ValueKind::Keywords(&["ltr", "rtl"]), keyword("ltr")),
        Id::UnicodeBidi => (
            ValueKind::Keywords(&["normal", "embed", "bidi-override"]),
            keyword("normal"),
        ),
        Id::LetterSpacing | Id::WordSpacing => (length(NORMAL, false, true), keyword("normal")),
        Id::LineHeight => (ValueKind::LineHeight, keyword("normal")),
        Id::TextAlign => (
            ValueKind::Keywords(&["left", "right", "center", "justify"]),
            keyword("left"),
        ),
        Id::TextDecoration => (
            ValueKind::TextDecoration,
            ComputedValue::TextDecoration(TextDecorationLine::empty()),
        ),
        Id::TextIndent => (length(&[], true, true), zero),
        Id::TextTransform => (
            ValueKind::Keywords(&["capitalize", "uppercase", "lowercase", "none"]),
            keyword("none"),
        ),
        Id::WhiteSpace => (
            ValueKind::Keywords(&["normal", "pre", "nowrap", "pre-wrap", "pre-line"]),
            keyword("normal"),
        ),

        Id::ListStylePosition => (
            ValueKind::Keywords(&["inside", "outside"]),
            keyword("outside"),
        ),
        Id::ListStyleType => (ValueKind::Keywords(LIST_STYLE_TYPES), keyword("disc")),
        Id::CaptionSide => (
            ValueKind::Keywords(&["top", "bottom"]),
            keyword("top"),
        ),
        Id::EmptyCells => (ValueKind::Keywords(&["show", "hide"]), keyword("show")),
        Id::TableLayout => (ValueKind::Keywords(&["auto", "fixed"]), keyword("auto")),

        Id::Content => (ValueKind::Content, keyword("normal")),
        Id::Cursor => (ValueKind::Keywords(CURSORS), keyword("auto")),
    };
    PropertyEntry { kind, initial }
}

/// Apply one declaration to `style`.
///
/// `inherit` copies the parent's value (initial at the root), `initial` resets, and
/// anything else goes through the property's compute step.
///
/// # Errors
/// Returns an error when the value does not fit the property; `style` is unchanged.
pub fn apply_declaration(
    style: &mut StyleValue,
    parent: Option<&StyleValue>,
    declaration: &DeclaredProperty,
    quirks: QuirksMode,
) -> Result<()> {
    let id = declaration.id;
    let value = match &declaration.value {
        DeclaredValue::Inherit => parent.map_or_else(
            || initial_value(id).clone(),
            |parent_style| parent_style.get(id).clone(),
        ),
        DeclaredValue::Initial => initial_value(id).clone(),
        declared => {
            let entry = property_entry(id).ok_or_else(|| anyhow!("no table entry"))?;
            let context = ComputeContext::new(style, parent, quirks);
            entry
                .kind
                .compute(id, declared, &context)
                .with_context(|| format!("{}: {declared:?}", id.name()))?
        }
    };
    style.set(id, value);
    Ok(())
}

impl ValueKind {
    /// Compute a declared value (never `inherit` / `initial`).
    ///
    /// # Errors
    /// Returns an error when the value is not valid for this kind.
    pub fn compute(
        self,
        id: PropertyId,
        declared: &DeclaredValue,
        context: &ComputeContext,
    ) -> Result<ComputedValue> {
        match self {
            Self::Keywords(allowed) => match_keyword(declared, allowed)
                .map(ComputedValue::Keyword)
                .ok_or_else(|| anyhow!("keyword not allowed")),
            Self::Color => compute_color(id, declared, context),
            Self::Length {
                keywords,
                percent,
                negative,
            } => {
                if let Some(matched) = match_keyword(declared, keywords) {
                    return Ok(ComputedValue::Keyword(matched));
                }
                if let DeclaredValue::Percentage(pct) = *declared {
                    if !percent {
                        bail!("percentages not allowed");
                    }
                    if !negative && pct < 0.0 {
                        bail!("negative percentage");
                    }
                    return Ok(ComputedValue::Percentage(pct));
                }
                let px = to_px(declared, context.font_size, context.quirks)?;
                if !negative && px < 0.0 {
                    bail!("negative length");
                }
                Ok(ComputedValue::Length(px))
            }
            Self::BorderWidth => {
                let px = match declared.as_keyword() {
                    Some("thin") => 1.0,
                    Some("medium") => 3.0,
                    Some("thick") => 5.0,
                    Some(other) => bail!("unknown border width {other}"),
                    None => to_px(declared, context.font_size, context.quirks)?,
                };
                if px < 0.0 {
                    bail!("negative border width");
                }
                Ok(ComputedValue::Length(px))
            }
            Self::FontSize => compute_font_size(declared, context).map(ComputedValue::Length),
            Self::FontWeight => compute_font_weight(declared, context).map(ComputedValue::Integer),
            Self::LineHeight => match *declared {
                DeclaredValue::Keyword(ref ident) if &**ident == "normal" => {
                    Ok(ComputedValue::Keyword("normal"))
                }
                DeclaredValue::Number(factor) if factor >= 0.0 => {
                    Ok(ComputedValue::Number(factor))
                }
                DeclaredValue::Integer(factor) if factor >= 0 => {
                    Ok(ComputedValue::Number(factor as f32))
                }
                DeclaredValue::Percentage(pct) if pct >= 0.0 => {
                    Ok(ComputedValue::Length(context.font_size * pct / 100.0))
                }
                DeclaredValue::Length(..) => {
                    let px = to_px(declared, context.font_size, context.quirks)?;
                    if px < 0.0 {
                        bail!("negative line height");
                    }
                    Ok(ComputedValue::Length(px))
                }
                _ => bail!("invalid line height"),
            },
            Self::FontFamily => compute_font_family(declared),
            Self::Image => match declared {
                DeclaredValue::Url(url) => Ok(ComputedValue::Url(Arc::from(&**url))),
                _ if declared.as_keyword() == Some("none") => Ok(ComputedValue::Keyword("none")),
                _ => bail!("expected url or none"),
            },
            Self::TextDecoration => compute_text_decoration(declared),
            Self::Integer => match *declared {
                DeclaredValue::Integer(value) => Ok(ComputedValue::Integer(value)),
                DeclaredValue::Number(value) if value.fract() == 0.0 => {
                    Ok(ComputedValue::Integer(value as i32))
                }
                _ if declared.as_keyword() == Some("auto") => Ok(ComputedValue::Keyword("auto")),
                _ => bail!("expected integer or auto"),
            },
            Self::BackgroundPosition => compute_background_position(declared, context),
            Self::Content => compute_content(declared),
        }
    }
}

/// The static keyword matching a declared keyword, if allowed.
fn match_keyword(declared: &DeclaredValue, allowed: &[&'static str]) -> Option<&'static str> {
    let ident = declared.as_keyword()?;
    allowed.iter().copied().find(|candidate| *candidate == ident)
}

/// Convert a length (or a number where allowed) to px.
fn to_px(declared: &DeclaredValue, font_size: f32, quirks: QuirksMode) -> Result<f32> {
    match *declared {
        DeclaredValue::Length(value, unit) => Ok(match unit {
            LengthUnit::Px => value,
            LengthUnit::Em => value * font_size,
            LengthUnit::Ex => value * font_size * 0.5,
            LengthUnit::Pt => value * PX_PER_IN / 72.0,
            LengthUnit::Pc => value * PX_PER_IN / 6.0,
            LengthUnit::In => value * PX_PER_IN,
            LengthUnit::Cm => value * PX_PER_IN / 2.54,
            LengthUnit::Mm => value * PX_PER_IN / 25.4,
        }),
        DeclaredValue::Number(value) if value == 0.0 || quirks.is_quirks() => Ok(value),
        DeclaredValue::Integer(value) if value == 0 || quirks.is_quirks() => Ok(value as f32),
        _ => bail!("expected a length"),
    }
}

fn compute_color(
    id: PropertyId,
    declared: &DeclaredValue,
    context: &ComputeContext,
) -> Result<ComputedValue> {
    match declared {
        DeclaredValue::Color(rgba) => Ok(ComputedValue::Color(*rgba)),
        DeclaredValue::Keyword(ident) => match &**ident {
            "currentcolor" if id == PropertyId::Color => {
                Ok(ComputedValue::Color(context.parent_color))
            }
            "currentcolor" => Ok(ComputedValue::CurrentColor),
            "transparent" => Ok(ComputedValue::Color(Rgba::TRANSPARENT)),
            name => named_color(name).map(ComputedValue::Color),
        },
        DeclaredValue::String(text) => named_color(text).map(ComputedValue::Color),
        _ => bail!("expected a colour"),
    }
}

/// Resolve a colour keyword or hex string.
fn named_color(name: &str) -> Result<Rgba> {
    let parsed: CssColor = name
        .parse()
        .map_err(|err| anyhow!("unknown colour {name}: {err}"))?;
    let [red, green, blue, alpha] = parsed.to_rgba8();
    Ok(Rgba {
        red,
        green,
        blue,
        alpha,
    })
}

fn compute_font_size(declared: &DeclaredValue, context: &ComputeContext) -> Result<f32> {
    let parent = context.parent_font_size;
    let size = match *declared {
        DeclaredValue::Keyword(ref ident) => match &**ident {
            "larger" => parent * FONT_SCALE,
            "smaller" => parent / FONT_SCALE,
            absolute => FONT_SIZE_TABLE
                .iter()
                .find(|(name, _)| *name == absolute)
                .map(|&(_, px)| px)
                .ok_or_else(|| anyhow!("unknown font size keyword"))?,
        },
        DeclaredValue::Percentage(pct) => parent * pct / 100.0,
        DeclaredValue::Length(..) | DeclaredValue::Number(_) | DeclaredValue::Integer(_) => {
            // em and ex refer to the parent's font size here.
            to_px(declared, parent, context.quirks)?
        }
        _ => bail!("invalid font size"),
    };
    if size < 0.0 {
        bail!("negative font size");
    }
    Ok(size)
}

fn compute_font_weight(declared: &DeclaredValue, context: &ComputeContext) -> Result<i32> {
    let weight = match *declared {
        DeclaredValue::Integer(value) => value,
        DeclaredValue::Number(value) if value.fract() == 0.0 => value as i32,
        DeclaredValue::Keyword(ref ident) => match &**ident {
            "normal" => 400,
            "bold" => 700,
            "bolder" => context.parent_font_weight.saturating_add(300).min(900),
            "lighter" => context.parent_font_weight.saturating_sub(300).max(100),
            _ => bail!("unknown font weight keyword"),
        },
        _ => bail!("invalid font weight"),
    };
    if !(100..=900).contains(&weight) || weight % 100 != 0 {
        bail!("font weight out of range");
    }
    Ok(weight)
}

fn compute_font_family(declared: &DeclaredValue) -> Result<ComputedValue> {
    let family = |value: &DeclaredValue| match value {
        DeclaredValue::String(name) | DeclaredValue::Keyword(name) => {
            Ok(ComputedValue::String(Arc::from(&**name)))
        }
        _ => Err(anyhow!("invalid font family")),
    };
    let families = match declared {
        DeclaredValue::List(items) => items.iter().map(family).collect::<Result<Vec<_>>>()?,
        single => vec![family(single)?],
    };
    if families.is_empty() {
        bail!("empty font family list");
    }
    Ok(ComputedValue::List(Arc::from(families)))
}

fn compute_text_decoration(declared: &DeclaredValue) -> Result<ComputedValue> {
    let line = |value: &DeclaredValue| {
        value
            .as_keyword()
            .and_then(TextDecorationLine::from_keyword)
            .ok_or_else(|| anyhow!("invalid text decoration"))
    };
    let lines = match declared {
        DeclaredValue::List(items) => {
            let mut lines = TextDecorationLine::empty();
            for item in items {
                let flag = line(item)?;
                if flag.is_empty() {
                    bail!("none cannot be combined");
                }
                lines |= flag;
            }
            lines
        }
        single => line(single)?,
    };
    Ok(ComputedValue::TextDecoration(lines))
}

fn compute_background_position(
    declared: &DeclaredValue,
    context: &ComputeContext,
) -> Result<ComputedValue> {
    let component = |value: &DeclaredValue| -> Result<ComputedValue> {
        if let Some(matched) = match_keyword(value, POSITION_KEYWORDS) {
            return Ok(ComputedValue::Keyword(matched));
        }
        if let DeclaredValue::Percentage(pct) = *value {
            return Ok(ComputedValue::Percentage(pct));
        }
        to_px(value, context.font_size, context.quirks).map(ComputedValue::Length)
    };
    let components = match declared {
        DeclaredValue::List(items) if (1..=2).contains(&items.len()) => {
            items.iter().map(component).collect::<Result<Vec<_>>>()?
        }
        DeclaredValue::List(_) => bail!("expected one or two positions"),
        single => vec![component(single)?],
    };
    Ok(ComputedValue::List(Arc::from(components)))
}

fn compute_content(declared: &DeclaredValue) -> Result<ComputedValue> {
    if let Some(matched) = match_keyword(declared, &["normal", "none"]) {
        return Ok(ComputedValue::Keyword(matched));
    }
    let item = |value: &DeclaredValue| match value {
        DeclaredValue::String(text) => Ok(ComputedValue::String(Arc::from(&**text))),
        DeclaredValue::Url(url) => Ok(ComputedValue::Url(Arc::from(&**url))),
        _ => match_keyword(value, CONTENT_KEYWORDS)
            .map(ComputedValue::Keyword)
            .ok_or_else(|| anyhow!("invalid content item")),
    };
    let items = match declared {
        DeclaredValue::List(values) => values.iter().map(item).collect::<Result<Vec<_>>>()?,
        single => vec![item(single)?],
    };
    Ok(ComputedValue::List(Arc::from(items)))
}
