//! Rule sets handed to the index builder.

use crate::{DeclaredValue, PropertyId};
use css_selectors::Selector;

/// One `property: value [!important]` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredProperty {
    pub id: PropertyId,
    pub value: DeclaredValue,
    pub important: bool,
    /// Presentational hint from HTML attributes rather than CSS.
    pub non_css_hint: bool,
}

impl DeclaredProperty {
    /// Normal, non-important declaration.
    pub fn new(id: PropertyId, value: DeclaredValue) -> Self {
        Self {
            id,
            value,
            important: false,
            non_css_hint: false,
        }
    }

    #[must_use]
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// Mark as a presentational hint.
    #[must_use]
    pub fn hint(mut self) -> Self {
        self.non_css_hint = true;
        self
    }
}

/// Selector list plus declaration block.
#[derive(Clone, Debug, Default)]
pub struct StyleRule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<DeclaredProperty>,
}

/// An ordered collection of style rules, e.g. one style sheet.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    pub rules: Vec<StyleRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the end of the sheet.
    pub fn add_rule(&mut self, selectors: Vec<Selector>, declarations: Vec<DeclaredProperty>) {
        self.rules.push(StyleRule {
            selectors,
            declarations,
        });
    }

    /// Builder form of [`RuleSet::add_rule`].
    #[must_use]
    pub fn with_rule(
        mut self,
        selectors: Vec<Selector>,
        declarations: Vec<DeclaredProperty>,
    ) -> Self {
        self.add_rule(selectors, declarations);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
