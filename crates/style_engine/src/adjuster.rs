//! Fixed normalizations applied to a style after its declarations.
//!
//! Every rule reads only the style itself, its parent and the element, so running the
//! adjuster twice gives the same result as running it once.

use crate::computed_style::{Display, Float, Position};
use crate::style_value::StyleValue;
use css_selectors::QuirksMode;

/// The element being styled, as far as the adjuster cares.
#[derive(Clone, Copy, Debug)]
pub struct AdjustTarget<'element> {
    /// Lowercase tag name.
    pub tag: &'element str,
}

/// Post-cascade fixups for one document mode.
#[derive(Clone, Copy, Debug)]
pub struct StyleAdjuster {
    quirks: QuirksMode,
}

impl StyleAdjuster {
    pub const fn new(quirks: QuirksMode) -> Self {
        Self { quirks }
    }

    /// Run every rule in order. `element` is `None` for pseudo-styles, which skips
    /// the rules keyed on the element's tag.
    pub fn adjust(
        &self,
        style: &mut StyleValue,
        parent: Option<&StyleValue>,
        element: Option<AdjustTarget<'_>>,
    ) {
        if let Some(target) = element {
            self.adjust_quirky_table_cells(style, target);
        }
        self.blockify_if_necessary(style);
        if let Some(target) = element {
            Self::adjust_frames(style, target);
        }
        Self::adjust_relative_table_rows(style);
        Self::adjust_decorations_in_effect(style, parent);
    }

    /// Quirks mode keeps `td`/`th` as unfloated table cells.
    fn adjust_quirky_table_cells(&self, style: &mut StyleValue, target: AdjustTarget<'_>) {
        if self.quirks.is_quirks() && matches!(target.tag, "td" | "th") {
            style.set_display(Display::TableCell);
            style.set_float(Float::None);
        }
    }

    /// Absolutely positioned and floated boxes are block-level.
    fn blockify_if_necessary(&self, style: &mut StyleValue) {
        let floated = style.float() != Float::None;
        if !floated && !style.position().is_absolutely_positioned() {
            return;
        }
        let blockified = match style.display() {
            Display::Inline
            | Display::InlineBlock
            | Display::RunIn
            | Display::TableRowGroup
            | Display::TableHeaderGroup
            | Display::TableFooterGroup
            | Display::TableRow
            | Display::TableColumnGroup
            | Display::TableColumn
            | Display::TableCell
            | Display::TableCaption => Display::Block,
            Display::InlineTable => Display::Table,
            Display::ListItem if floated && !self.quirks.is_strict() => Display::Block,
            other @ (Display::ListItem | Display::Block | Display::Table | Display::None) => {
                other
            }
        };
        style.set_display(blockified);
    }

    /// Frames are always static, unfloated blocks.
    fn adjust_frames(style: &mut StyleValue, target: AdjustTarget<'_>) {
        if matches!(target.tag, "frame" | "frameset") {
            style.set_position(Position::Static);
            style.set_display(Display::Block);
            style.set_float(Float::None);
        }
    }

    /// Relative positioning does not apply to table rows.
    fn adjust_relative_table_rows(style: &mut StyleValue) {
        if style.display() == Display::TableRow && style.position() == Position::Relative {
            style.set_position(Position::Static);
        }
    }

    /// Tables, inline blocks and run-ins start a fresh decoration set; everything else
    /// adds its own lines to the inherited ones.
    fn adjust_decorations_in_effect(style: &mut StyleValue, parent: Option<&StyleValue>) {
        let own = style.text_decoration();
        let lines = match style.display() {
            Display::Table | Display::InlineTable | Display::InlineBlock | Display::RunIn => {
                own
            }
            _ => parent.map_or(own, |parent_style| {
                parent_style.decorations_in_effect() | own
            }),
        };
        style.set_decorations_in_effect(lines);
    }
}
