//! Computed style resolution.
//!
//! [`StyleResolver`] owns a document's sheet set and the [`CascadeIndex`] built from
//! it; [`resolve_style`] runs the cascade for one element against an index.

mod adjuster;
mod computed_style;
mod properties;
mod resolve;
mod style_value;
mod ua_stylesheet;

pub use adjuster::{AdjustTarget, StyleAdjuster};
pub use computed_style::{ComputedValue, Display, Float, Position, TextDecorationLine};
pub use properties::{
    ComputeContext, PropertyEntry, ValueKind, apply_declaration, initial_value, property_entry,
};
pub use resolve::{StyledDocument, resolve_style};
pub use style_value::{DEFAULT_FONT_SIZE, PropertyMap, StyleValue};
pub use ua_stylesheet::{
    DefaultSheets, default_sheets, placeholder_style, reset_default_sheets,
    reset_placeholder_style, set_default_sheets,
};

use css_cascade::{CascadeIndex, Origin, RuleSet};
use css_selectors::QuirksMode;
use log::{debug, info};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Sheet set of one document plus its lazily built cascade indexes.
///
/// There is one index without and one with the quirks default sheet. Resolution picks
/// the one matching the document's own mode. Any change to the sheet set drops both;
/// the next resolution rebuilds from scratch and swaps in the new `Arc`.
#[derive(Debug, Default)]
pub struct StyleResolver {
    quirks_mode: QuirksMode,
    user_sheet: Option<Arc<RuleSet>>,
    author_sheets: Vec<Arc<RuleSet>>,
    index: OnceCell<Arc<CascadeIndex>>,
    quirks_index: OnceCell<Arc<CascadeIndex>>,
    /// Sheets the document is still waiting for.
    pending_sheets: usize,
    /// Increments whenever the active sheet set changes.
    rules_epoch: u64,
}

impl StyleResolver {
    pub fn new(quirks_mode: QuirksMode) -> Self {
        Self {
            quirks_mode,
            ..Self::default()
        }
    }

    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// Switch the mode used by [`Self::index`]. Quirks mode adds the quirks default
    /// sheet.
    pub fn set_quirks_mode(&mut self, quirks_mode: QuirksMode) {
        if self.quirks_mode != quirks_mode {
            self.quirks_mode = quirks_mode;
            self.invalidate("quirks mode changed");
        }
    }

    pub fn set_user_sheet(&mut self, sheet: Option<RuleSet>) {
        self.user_sheet = sheet.map(Arc::new);
        self.invalidate("user sheet replaced");
    }

    /// Append an author sheet; later sheets win ties.
    pub fn add_author_sheet(&mut self, sheet: RuleSet) {
        self.author_sheets.push(Arc::new(sheet));
        self.invalidate("author sheet added");
    }

    /// Replace all author sheets.
    pub fn set_author_sheets(&mut self, sheets: Vec<RuleSet>) {
        self.author_sheets = sheets.into_iter().map(Arc::new).collect();
        self.invalidate("author sheets replaced");
    }

    pub fn author_sheet_count(&self) -> usize {
        self.author_sheets.len()
    }

    /// A sheet started loading; styles are placeholders until it finishes.
    pub const fn sheet_load_started(&mut self) {
        self.pending_sheets = self.pending_sheets.saturating_add(1);
    }

    pub const fn sheet_load_finished(&mut self) {
        self.pending_sheets = self.pending_sheets.saturating_sub(1);
    }

    pub const fn has_pending_sheets(&self) -> bool {
        self.pending_sheets > 0
    }

    pub const fn current_rules_epoch(&self) -> u64 {
        self.rules_epoch
    }

    /// The current index for the resolver's mode, building it on first use after a
    /// change.
    pub fn index(&self) -> Arc<CascadeIndex> {
        self.index_for(self.quirks_mode)
    }

    /// The index for a document in `quirks_mode`.
    pub fn index_for(&self, quirks_mode: QuirksMode) -> Arc<CascadeIndex> {
        let quirks = quirks_mode.is_quirks();
        let cell = if quirks {
            &self.quirks_index
        } else {
            &self.index
        };
        Arc::clone(cell.get_or_init(|| Arc::new(self.build_index(quirks))))
    }

    /// Drop the current index and build a new one right away.
    pub fn rebuild_index(&mut self) -> Arc<CascadeIndex> {
        self.invalidate("rebuild requested");
        self.index()
    }

    /// Resolve `element`'s style; while sheets are pending every element gets the
    /// shared placeholder style.
    ///
    /// The document's mode decides whether the quirks default sheet takes part, so it
    /// always agrees with the quirks matching rules and adjustments.
    pub fn resolve_style<D: StyledDocument>(
        &self,
        document: &D,
        element: D::Handle,
        parent: Option<&StyleValue>,
    ) -> Arc<StyleValue> {
        if self.has_pending_sheets() {
            return placeholder_style();
        }
        let document_mode = document.quirks_mode();
        if document_mode != self.quirks_mode {
            debug!(
                "document mode {document_mode:?} overrides resolver mode {:?}",
                self.quirks_mode
            );
        }
        let index = self.index_for(document_mode);
        Arc::new(resolve_style(document, element, parent, &index))
    }

    fn build_index(&self, quirks: bool) -> CascadeIndex {
        let defaults = default_sheets();
        let quirks = quirks.then_some((&defaults.quirks, Origin::UserAgent));
        let user = self
            .user_sheet
            .as_deref()
            .map(|sheet| (sheet, Origin::User));
        let authors = self
            .author_sheets
            .iter()
            .map(|sheet| (&**sheet, Origin::Author));
        CascadeIndex::build(
            [(&defaults.default, Origin::UserAgent)]
                .into_iter()
                .chain(quirks)
                .chain(user)
                .chain(authors),
        )
    }

    fn invalidate(&mut self, reason: &str) {
        self.index = OnceCell::new();
        self.quirks_index = OnceCell::new();
        self.rules_epoch = self.rules_epoch.wrapping_add(1);
        info!("style rules changed ({reason}); epoch {}", self.rules_epoch);
    }
}
