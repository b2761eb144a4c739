//! Computed property values and the typed views layout reads.

use bitflags::bitflags;
use css_cascade::Rgba;
use std::sync::Arc;

/// A property value after the cascade and the compute step.
#[derive(Clone, Debug, PartialEq)]
pub enum ComputedValue {
    /// Keyword from the property's allowed set.
    Keyword(&'static str),
    /// Absolute length in CSS pixels.
    Length(f32),
    Percentage(f32),
    Number(f32),
    Integer(i32),
    Color(Rgba),
    /// Use the element's `color`.
    CurrentColor,
    Url(Arc<str>),
    String(Arc<str>),
    TextDecoration(TextDecorationLine),
    List(Arc<[ComputedValue]>),
}

impl ComputedValue {
    pub const fn as_keyword(&self) -> Option<&'static str> {
        match *self {
            Self::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub const fn as_length(&self) -> Option<f32> {
        match *self {
            Self::Length(px) => Some(px),
            _ => None,
        }
    }
}

bitflags! {
    /// Lines drawn by `text-decoration`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TextDecorationLine: u8 {
        const UNDERLINE = 1;
        const OVERLINE = 1 << 1;
        const LINE_THROUGH = 1 << 2;
        const BLINK = 1 << 3;
    }
}

impl TextDecorationLine {
    /// Flag for one `text-decoration` keyword; `none` maps to the empty set.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(Self::empty()),
            "underline" => Some(Self::UNDERLINE),
            "overline" => Some(Self::OVERLINE),
            "line-through" => Some(Self::LINE_THROUGH),
            "blink" => Some(Self::BLINK),
            _ => None,
        }
    }
}

/// Computed `display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Display {
    #[default]
    Inline,
    Block,
    ListItem,
    RunIn,
    InlineBlock,
    Table,
    InlineTable,
    TableRowGroup,
    TableHeaderGroup,
    TableFooterGroup,
    TableRow,
    TableColumnGroup,
    TableColumn,
    TableCell,
    TableCaption,
    None,
}

impl Display {
    pub(crate) const KEYWORDS: &'static [&'static str] = &[
        "inline",
        "block",
        "list-item",
        "run-in",
        "inline-block",
        "table",
        "inline-table",
        "table-row-group",
        "table-header-group",
        "table-footer-group",
        "table-row",
        "table-column-group",
        "table-column",
        "table-cell",
        "table-caption",
        "none",
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Block => "block",
            Self::ListItem => "list-item",
            Self::RunIn => "run-in",
            Self::InlineBlock => "inline-block",
            Self::Table => "table",
            Self::InlineTable => "inline-table",
            Self::TableRowGroup => "table-row-group",
            Self::TableHeaderGroup => "table-header-group",
            Self::TableFooterGroup => "table-footer-group",
            Self::TableRow => "table-row",
            Self::TableColumnGroup => "table-column-group",
            Self::TableColumn => "table-column",
            Self::TableCell => "table-cell",
            Self::TableCaption => "table-caption",
            Self::None => "none",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "inline" => Self::Inline,
            "block" => Self::Block,
            "list-item" => Self::ListItem,
            "run-in" => Self::RunIn,
            "inline-block" => Self::InlineBlock,
            "table" => Self::Table,
            "inline-table" => Self::InlineTable,
            "table-row-group" => Self::TableRowGroup,
            "table-header-group" => Self::TableHeaderGroup,
            "table-footer-group" => Self::TableFooterGroup,
            "table-row" => Self::TableRow,
            "table-column-group" => Self::TableColumnGroup,
            "table-column" => Self::TableColumn,
            "table-cell" => Self::TableCell,
            "table-caption" => Self::TableCaption,
            "none" => Self::None,
            _ => return None,
        })
    }
}

/// Computed `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

impl Position {
    pub(crate) const KEYWORDS: &'static [&'static str] =
        &["static", "relative", "absolute", "fixed"];

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "static" => Some(Self::Static),
            "relative" => Some(Self::Relative),
            "absolute" => Some(Self::Absolute),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }

    /// Out of flow positioning.
    pub const fn is_absolutely_positioned(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// Computed `float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Float {
    #[default]
    None,
    Left,
    Right,
}

impl Float {
    pub(crate) const KEYWORDS: &'static [&'static str] = &["none", "left", "right"];

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(Self::None),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}
