//! The rule/property index built once per sheet set.
//!
//! Selectors are deduplicated into one array. Every declaration becomes an
//! [`OrderedProperty`] in a single array sorted by [`PriorityKey`], and each selector
//! keeps a linked list (ascending indices) into that array. Selectors are bucketed by
//! the tag of their subject node.

use crate::{DeclaredProperty, Origin, PriorityKey, RuleSet, Source};
use css_selectors::Selector;
use log::{info, warn};
use std::collections::HashMap;
use tracing::info_span;

/// A declaration placed in the global cascade order.
#[derive(Clone, Debug)]
pub struct OrderedProperty {
    pub declaration: DeclaredProperty,
    /// Index of the owning selector.
    pub selector: u32,
    pub key: PriorityKey,
}

/// Immutable index over all rules of a document's sheets.
#[derive(Debug, Default)]
pub struct CascadeIndex {
    selectors: Vec<Selector>,
    /// Head of each selector's property list.
    first_property: Vec<Option<u32>>,
    /// Next entry of the same selector's list.
    next_property: Vec<Option<u32>>,
    properties: Vec<OrderedProperty>,
    tag_buckets: HashMap<Box<str>, Vec<u32>>,
    universal_bucket: Vec<u32>,
}

impl CascadeIndex {
    /// Build the index from sheets in cascade order (defaults, quirks defaults, user,
    /// authors). Positions grow across sheets, so later sheets win ties.
    pub fn build<'sheets, I>(sheets: I) -> Self
    where
        I: IntoIterator<Item = (&'sheets RuleSet, Origin)>,
    {
        let _span = info_span!("cascade_index_build").entered();
        let mut index = Self::default();
        let mut selector_ids: HashMap<Selector, u32> = HashMap::new();
        let mut position: u32 = 0;

        for (sheet, origin) in sheets {
            for rule in &sheet.rules {
                if rule.selectors.is_empty() {
                    warn!(
                        "skipping rule without selectors ({} declarations)",
                        rule.declarations.len()
                    );
                    continue;
                }
                for selector in &rule.selectors {
                    if !selector.is_valid() {
                        warn!("skipping invalid selector {selector:?}");
                        continue;
                    }
                    let selector_id = index.intern(&mut selector_ids, selector);
                    for declaration in &rule.declarations {
                        let source = Source::from_origin(
                            origin,
                            declaration.important,
                            declaration.non_css_hint,
                        );
                        index.properties.push(OrderedProperty {
                            declaration: declaration.clone(),
                            selector: selector_id,
                            key: PriorityKey::new(
                                declaration.id,
                                source,
                                selector.specificity(),
                                position,
                            ),
                        });
                        position = position.saturating_add(1);
                    }
                }
            }
        }

        index.properties.sort_by(|left, right| left.key.cmp(&right.key));
        index.link_properties();
        info!(
            "cascade index built: {} selectors, {} properties, {} tag buckets",
            index.selectors.len(),
            index.properties.len(),
            index.tag_buckets.len()
        );
        index
    }

    /// Id of a structurally equal selector, inserting and bucketing it if new.
    fn intern(&mut self, selector_ids: &mut HashMap<Selector, u32>, selector: &Selector) -> u32 {
        if let Some(&existing) = selector_ids.get(selector) {
            return existing;
        }
        let selector_id = self.selectors.len() as u32;
        self.selectors.push(selector.clone());
        selector_ids.insert(selector.clone(), selector_id);
        match selector.rightmost_tag() {
            Some(tag) => self
                .tag_buckets
                .entry(tag.to_ascii_lowercase().into_boxed_str())
                .or_default()
                .push(selector_id),
            None => self.universal_bucket.push(selector_id),
        }
        selector_id
    }

    /// Thread each selector's properties into an ascending linked list.
    fn link_properties(&mut self) {
        self.first_property = vec![None; self.selectors.len()];
        self.next_property = vec![None; self.properties.len()];
        for (property_index, property) in self.properties.iter().enumerate().rev() {
            let Some(head) = self.first_property.get_mut(property.selector as usize) else {
                continue;
            };
            if let Some(next) = self.next_property.get_mut(property_index) {
                *next = *head;
            }
            *head = Some(property_index as u32);
        }
    }

    pub fn selector_count(&self) -> usize {
        self.selectors.len()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn selector(&self, selector_id: u32) -> Option<&Selector> {
        self.selectors.get(selector_id as usize)
    }

    pub fn property(&self, property_index: u32) -> Option<&OrderedProperty> {
        self.properties.get(property_index as usize)
    }

    /// All properties in cascade order.
    pub fn properties(&self) -> &[OrderedProperty] {
        &self.properties
    }

    /// Selector ids that may match an element with the given lowercase tag: its tag
    /// bucket followed by the wildcard bucket.
    pub fn candidates<'index>(&'index self, tag: &str) -> impl Iterator<Item = u32> + 'index {
        let tagged = self
            .tag_buckets
            .get(tag)
            .map_or(&[][..], Vec::as_slice);
        tagged
            .iter()
            .chain(self.universal_bucket.iter())
            .copied()
    }

    /// The properties declared for one selector, in cascade order.
    pub fn properties_for(&self, selector_id: u32) -> SelectorProperties<'_> {
        SelectorProperties {
            index: self,
            next: self
                .first_property
                .get(selector_id as usize)
                .copied()
                .flatten(),
        }
    }
}

/// Iterator over one selector's property list.
pub struct SelectorProperties<'index> {
    index: &'index CascadeIndex,
    next: Option<u32>,
}

impl<'index> Iterator for SelectorProperties<'index> {
    type Item = (u32, &'index OrderedProperty);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self
            .index
            .next_property
            .get(current as usize)
            .copied()
            .flatten();
        self.index
            .property(current)
            .map(|property| (current, property))
    }
}
