//! Copy-on-write computed style.
//!
//! Properties live in two shared groups: inherited and reset. A child starts out
//! sharing its parent's inherited group and an empty reset group; the first write to a
//! group clones it. Reading a property that was never written yields its initial value.

use crate::computed_style::{ComputedValue, Display, Float, Position, TextDecorationLine};
use crate::properties::initial_value;
use css_cascade::{PropertyId, Rgba};
use css_selectors::{PseudoId, StateDependency};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One property group.
pub type PropertyMap = BTreeMap<PropertyId, ComputedValue>;

static EMPTY_GROUP: Lazy<Arc<PropertyMap>> = Lazy::new(|| Arc::new(PropertyMap::new()));

/// Font size used when nothing else applies (`medium`).
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Computed style of one element or pseudo-element.
#[derive(Clone, Debug)]
pub struct StyleValue {
    inherited: Arc<PropertyMap>,
    reset: Arc<PropertyMap>,
    decorations_in_effect: TextDecorationLine,
    state_dependencies: StateDependency,
    pseudo_styles: BTreeMap<PseudoId, Arc<StyleValue>>,
}

impl Default for StyleValue {
    fn default() -> Self {
        Self::root()
    }
}

impl PartialEq for StyleValue {
    /// Compares property values and flags; shared groups compare by pointer first.
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.inherited, &other.inherited) || self.inherited == other.inherited)
            && (Arc::ptr_eq(&self.reset, &other.reset) || self.reset == other.reset)
            && self.decorations_in_effect == other.decorations_in_effect
            && self.state_dependencies == other.state_dependencies
            && self.pseudo_styles == other.pseudo_styles
    }
}

impl StyleValue {
    /// Style with every property at its initial value.
    pub fn root() -> Self {
        Self {
            inherited: Arc::clone(&EMPTY_GROUP),
            reset: Arc::clone(&EMPTY_GROUP),
            decorations_in_effect: TextDecorationLine::empty(),
            state_dependencies: StateDependency::empty(),
            pseudo_styles: BTreeMap::new(),
        }
    }

    /// Fresh style sharing `parent`'s inherited group.
    pub fn inherit_from(parent: &Self) -> Self {
        Self {
            inherited: Arc::clone(&parent.inherited),
            ..Self::root()
        }
    }

    /// Value of a property; initial when never set.
    pub fn get(&self, id: PropertyId) -> &ComputedValue {
        let group = if id.is_inherited() {
            &self.inherited
        } else {
            &self.reset
        };
        group.get(&id).unwrap_or_else(|| initial_value(id))
    }

    /// True when the property was written on this style or an ancestor it inherits from.
    pub fn is_specified(&self, id: PropertyId) -> bool {
        if id.is_inherited() {
            self.inherited.contains_key(&id)
        } else {
            self.reset.contains_key(&id)
        }
    }

    /// Write a property, unsharing its group if needed.
    pub fn set(&mut self, id: PropertyId, value: ComputedValue) {
        let group = if id.is_inherited() {
            &mut self.inherited
        } else {
            &mut self.reset
        };
        if group.get(&id) == Some(&value) {
            return;
        }
        Arc::make_mut(group).insert(id, value);
    }

    /// Whether both styles still share the same inherited group.
    pub fn shares_inherited_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inherited, &other.inherited)
    }

    pub fn display(&self) -> Display {
        self.keyword_of(PropertyId::Display)
            .and_then(Display::from_keyword)
            .unwrap_or_default()
    }

    pub fn set_display(&mut self, display: Display) {
        self.set(PropertyId::Display, ComputedValue::Keyword(display.keyword()));
    }

    pub fn position(&self) -> Position {
        self.keyword_of(PropertyId::Position)
            .and_then(Position::from_keyword)
            .unwrap_or_default()
    }

    pub fn set_position(&mut self, position: Position) {
        self.set(
            PropertyId::Position,
            ComputedValue::Keyword(position.keyword()),
        );
    }

    pub fn float(&self) -> Float {
        self.keyword_of(PropertyId::Float)
            .and_then(Float::from_keyword)
            .unwrap_or_default()
    }

    pub fn set_float(&mut self, float: Float) {
        self.set(PropertyId::Float, ComputedValue::Keyword(float.keyword()));
    }

    /// Computed font size in px.
    pub fn font_size(&self) -> f32 {
        self.get(PropertyId::FontSize)
            .as_length()
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Numeric font weight (100..=900).
    pub fn font_weight(&self) -> i32 {
        match *self.get(PropertyId::FontWeight) {
            ComputedValue::Integer(weight) => weight,
            _ => 400,
        }
    }

    pub fn color(&self) -> Rgba {
        match *self.get(PropertyId::Color) {
            ComputedValue::Color(color) => color,
            _ => Rgba::BLACK,
        }
    }

    /// Colour-valued property with `currentcolor` resolved.
    pub fn resolved_color(&self, id: PropertyId) -> Option<Rgba> {
        match *self.get(id) {
            ComputedValue::Color(color) => Some(color),
            ComputedValue::CurrentColor => Some(self.color()),
            _ => None,
        }
    }

    /// The element's own `text-decoration`.
    pub fn text_decoration(&self) -> TextDecorationLine {
        match *self.get(PropertyId::TextDecoration) {
            ComputedValue::TextDecoration(lines) => lines,
            _ => TextDecorationLine::empty(),
        }
    }

    /// Decorations drawn on this element's text, including propagated ones.
    pub const fn decorations_in_effect(&self) -> TextDecorationLine {
        self.decorations_in_effect
    }

    pub const fn set_decorations_in_effect(&mut self, lines: TextDecorationLine) {
        self.decorations_in_effect = lines;
    }

    /// Dynamic states the style was resolved against.
    pub const fn state_dependencies(&self) -> StateDependency {
        self.state_dependencies
    }

    pub const fn affected_by_hover(&self) -> bool {
        self.state_dependencies.contains(StateDependency::HOVER)
    }

    pub const fn affected_by_active(&self) -> bool {
        self.state_dependencies.contains(StateDependency::ACTIVE)
    }

    pub const fn affected_by_focus(&self) -> bool {
        self.state_dependencies.contains(StateDependency::FOCUS)
    }

    pub fn add_state_dependencies(&mut self, dependencies: StateDependency) {
        self.state_dependencies.insert(dependencies);
    }

    pub fn pseudo_style(&self, pseudo: PseudoId) -> Option<&Arc<Self>> {
        self.pseudo_styles.get(&pseudo)
    }

    pub fn set_pseudo_style(&mut self, pseudo: PseudoId, style: Self) {
        self.pseudo_styles.insert(pseudo, Arc::new(style));
    }

    /// Pseudo-styles in `PseudoId` order.
    pub fn pseudo_styles(&self) -> impl Iterator<Item = (PseudoId, &Arc<Self>)> {
        self.pseudo_styles
            .iter()
            .map(|(pseudo, style)| (*pseudo, style))
    }

    fn keyword_of(&self, id: PropertyId) -> Option<&'static str> {
        self.get(id).as_keyword()
    }
}
