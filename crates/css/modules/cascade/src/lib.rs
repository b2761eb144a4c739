//! CSS Cascading and Inheritance: origins, priority keys and the rule index.
//! See <https://www.w3.org/TR/CSS2/cascade.html>

#![forbid(unsafe_code)]

mod index;
mod property;
mod rule_set;
mod value;

pub use index::{CascadeIndex, OrderedProperty, SelectorProperties};
pub use property::PropertyId;
pub use rule_set::{DeclaredProperty, RuleSet, StyleRule};
pub use value::{DeclaredValue, LengthUnit, Rgba};

use css_selectors::Specificity;

/// Where a style sheet comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    UserAgent,
    User,
    Author,
}

/// Cascade rank of a declaration, lowest first. Later sources win.
///
/// Non-CSS presentational hints sit between user and author declarations and are
/// never promoted by importance. User important declarations beat everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Default,
    DefaultImportant,
    User,
    NonCssHint,
    Author,
    Inline,
    AuthorImportant,
    InlineImportant,
    UserImportant,
}

impl Source {
    /// Rank a sheet declaration.
    #[inline]
    pub const fn from_origin(origin: Origin, important: bool, non_css_hint: bool) -> Self {
        if non_css_hint {
            return Self::NonCssHint;
        }
        match (origin, important) {
            (Origin::UserAgent, false) => Self::Default,
            (Origin::UserAgent, true) => Self::DefaultImportant,
            (Origin::User, false) => Self::User,
            (Origin::User, true) => Self::UserImportant,
            (Origin::Author, false) => Self::Author,
            (Origin::Author, true) => Self::AuthorImportant,
        }
    }

    /// Rank a declaration from the element's own style attribute.
    #[inline]
    pub const fn inline(important: bool, non_css_hint: bool) -> Self {
        match (non_css_hint, important) {
            (true, _) => Self::NonCssHint,
            (false, false) => Self::Inline,
            (false, true) => Self::InlineImportant,
        }
    }
}

/// Sort key of one declaration in the cascade. Compared field by field, so early
/// properties come first, then source, specificity and position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityKey {
    /// Property is applied after the early group (font and colour).
    pub late: bool,
    pub source: Source,
    pub specificity: Specificity,
    /// Declaration position, increasing with appearance across all sheets.
    pub position: u32,
}

impl PriorityKey {
    #[inline]
    pub const fn new(
        property: PropertyId,
        source: Source,
        specificity: Specificity,
        position: u32,
    ) -> Self {
        Self {
            late: !property.is_early(),
            source,
            specificity,
            position,
        }
    }
}
