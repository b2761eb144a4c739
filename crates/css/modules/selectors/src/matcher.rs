//! CSS selector matching.
//! See <https://www.w3.org/TR/selectors-3/>
//!
//! Chains are matched compound by compound from the subject outwards. When a
//! compound further left fails, the result tells the caller how far back it has to
//! restart, so descendant and sibling combinators do not re-walk subtrees that can
//! never match.

use crate::link::resolve_link;
use crate::selector::{Constraint, Relation, Selector, SelectorNode};
use crate::{AttrOperator, ElementAdapter, PseudoClass, PseudoId, QuirksMode};
use bitflags::bitflags;
use log::trace;

/// Outcome of matching one selector against one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// The selector does not apply, or can never apply.
    Invalid,
    /// The selector applies to the element itself.
    Applies,
    /// The selector applies to the given pseudo-element of the element.
    AppliesPseudo(PseudoId),
}

bitflags! {
    /// User-interaction states a resolved style depends on.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StateDependency: u8 {
        const HOVER = 1;
        const ACTIVE = 1 << 1;
        const FOCUS = 1 << 2;
    }
}

/// Caller-owned state accumulated while matching selectors for one element.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchingContext {
    /// Dynamic pseudo-classes evaluated against the subject element.
    pub dependencies: StateDependency,
}

impl MatchingContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Match a compiled selector against an element.
pub fn match_selector<A: ElementAdapter>(
    adapter: &A,
    element: A::Handle,
    selector: &Selector,
    context: &mut MatchingContext,
) -> MatchResult {
    if !selector.is_valid() {
        trace!("rejecting invalid selector {selector:?}");
        return MatchResult::Invalid;
    }
    if selector.is_universal_dynamic() && adapter.attr(element, "href").is_none() {
        return MatchResult::Invalid;
    }
    let mut matcher = Matcher {
        adapter,
        nodes: selector.nodes(),
        quirks: adapter.quirks_mode(),
        context,
        pseudo: None,
    };
    match matcher.match_chain(0, element, true) {
        ChainResult::Matched => matcher
            .pseudo
            .map_or(MatchResult::Applies, MatchResult::AppliesPseudo),
        ChainResult::RestartFromClosestLaterSibling
        | ChainResult::RestartFromClosestDescendant
        | ChainResult::NotMatchedGlobally
        | ChainResult::Invalid => MatchResult::Invalid,
    }
}

/// Result of matching the chain suffix starting at a compound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChainResult {
    Matched,
    /// Try again from a later sibling of the closest ancestor candidate.
    RestartFromClosestLaterSibling,
    /// Try again from the closest descendant-combinator ancestor.
    RestartFromClosestDescendant,
    /// No element anywhere can satisfy the rest of the chain.
    NotMatchedGlobally,
    /// The selector is malformed at this position.
    Invalid,
}

/// Result of matching one compound against one element.
enum CompoundResult {
    /// Compound matched; `next` starts the compound to the left, reached through
    /// `relation` (`None` when this was the leftmost compound).
    Matched {
        next: usize,
        relation: Option<Relation>,
    },
    NoMatch,
    Invalid,
}

/// Result of one node test.
enum NodeResult {
    Yes,
    No,
    Pseudo(PseudoId),
    Invalid,
}

impl From<bool> for NodeResult {
    #[inline]
    fn from(matched: bool) -> Self {
        if matched { Self::Yes } else { Self::No }
    }
}

struct Matcher<'matching, A: ElementAdapter> {
    adapter: &'matching A,
    nodes: &'matching [SelectorNode],
    quirks: QuirksMode,
    context: &'matching mut MatchingContext,
    /// Pseudo-element found in the subject compound.
    pseudo: Option<PseudoId>,
}

impl<A: ElementAdapter> Matcher<'_, A> {
    fn match_chain(&mut self, start: usize, element: A::Handle, is_subject: bool) -> ChainResult {
        let (next, relation) = match self.match_compound(start, element, is_subject) {
            CompoundResult::Invalid => return ChainResult::Invalid,
            CompoundResult::NoMatch => return ChainResult::RestartFromClosestLaterSibling,
            CompoundResult::Matched { next, relation } => (next, relation),
        };
        let Some(relation) = relation else {
            return ChainResult::Matched;
        };
        let candidate_not_found = match relation {
            Relation::DirectAdjacent | Relation::IndirectAdjacent => {
                ChainResult::RestartFromClosestDescendant
            }
            Relation::Descendant | Relation::Child | Relation::SubSelector => {
                ChainResult::NotMatchedGlobally
            }
        };
        let mut candidate = self.step(element, relation);
        loop {
            let Some(current) = candidate else {
                return candidate_not_found;
            };
            let result = self.match_chain(next, current, false);
            match (result, relation) {
                (
                    ChainResult::Matched | ChainResult::NotMatchedGlobally | ChainResult::Invalid,
                    _,
                )
                | (_, Relation::DirectAdjacent) => return result,
                (_, Relation::Child) => return ChainResult::RestartFromClosestDescendant,
                (ChainResult::RestartFromClosestDescendant, Relation::IndirectAdjacent) => {
                    return result;
                }
                _ => {}
            }
            candidate = self.step(current, relation);
        }
    }

    /// Element reached by following `relation` once.
    fn step(&self, element: A::Handle, relation: Relation) -> Option<A::Handle> {
        match relation {
            Relation::Descendant | Relation::Child => self.adapter.parent(element),
            Relation::DirectAdjacent | Relation::IndirectAdjacent => {
                self.adapter.previous_sibling_element(element)
            }
            Relation::SubSelector => None,
        }
    }

    fn match_compound(
        &mut self,
        start: usize,
        element: A::Handle,
        is_subject: bool,
    ) -> CompoundResult {
        let nodes = self.nodes;
        let mut index = start;
        let mut seen_pseudo = false;
        loop {
            let Some(node) = nodes.get(index) else {
                return CompoundResult::Invalid;
            };
            if seen_pseudo {
                return CompoundResult::Invalid;
            }
            match self.match_node(node, element, is_subject) {
                NodeResult::Yes => {}
                NodeResult::No => return CompoundResult::NoMatch,
                NodeResult::Invalid => return CompoundResult::Invalid,
                NodeResult::Pseudo(pseudo) => {
                    self.pseudo = Some(pseudo);
                    seen_pseudo = true;
                }
            }
            let next = index.saturating_add(1);
            match node.relation {
                Some(Relation::SubSelector) => index = next,
                relation => return CompoundResult::Matched { next, relation },
            }
        }
    }

    /// Tag first, then the constraint.
    fn match_node(
        &mut self,
        node: &SelectorNode,
        element: A::Handle,
        is_subject: bool,
    ) -> NodeResult {
        if let Some(local_name) = node.tag.local_name.as_deref()
            && !self
                .adapter
                .tag_name(element)
                .eq_ignore_ascii_case(local_name)
        {
            return NodeResult::No;
        }
        if let Some(namespace) = node.tag.namespace.as_deref()
            && self.adapter.namespace(element) != Some(namespace)
        {
            return NodeResult::No;
        }
        match &node.constraint {
            Constraint::None => NodeResult::Yes,
            Constraint::Id(id) => self
                .adapter
                .element_id(element)
                .is_some_and(|actual| text_eq(self.quirks, actual, id))
                .into(),
            Constraint::Class(class) => self.adapter.has_class(element, class).into(),
            Constraint::Attribute {
                name,
                operator,
                value,
            } => self
                .adapter
                .attr(element, name)
                .is_some_and(|actual| match_attribute(self.quirks, actual, *operator, value))
                .into(),
            Constraint::PseudoClass(pseudo_class) => {
                self.match_pseudo_class(*pseudo_class, element, is_subject)
            }
            Constraint::Negation(inner) => {
                if matches!(
                    inner.constraint,
                    Constraint::Negation(_)
                        | Constraint::PseudoElement(_)
                        | Constraint::Unsupported(_)
                ) {
                    return NodeResult::Invalid;
                }
                match self.match_node(inner, element, is_subject) {
                    NodeResult::Yes => NodeResult::No,
                    NodeResult::No => NodeResult::Yes,
                    NodeResult::Pseudo(_) | NodeResult::Invalid => NodeResult::Invalid,
                }
            }
            Constraint::PseudoElement(pseudo) => {
                if is_subject {
                    NodeResult::Pseudo(*pseudo)
                } else {
                    NodeResult::Invalid
                }
            }
            Constraint::Unsupported(_) => NodeResult::Invalid,
        }
    }

    fn match_pseudo_class(
        &mut self,
        pseudo_class: PseudoClass,
        element: A::Handle,
        is_subject: bool,
    ) -> NodeResult {
        let adapter = self.adapter;
        let matched = match pseudo_class {
            PseudoClass::Empty => !adapter.has_child_nodes(element),
            PseudoClass::FirstChild => {
                adapter.parent(element).is_some()
                    && adapter.previous_sibling_element(element).is_none()
            }
            PseudoClass::LastChild => {
                adapter.parent(element).is_some()
                    && adapter.next_sibling_element(element).is_none()
            }
            PseudoClass::OnlyChild => {
                adapter.parent(element).is_some()
                    && adapter.previous_sibling_element(element).is_none()
                    && adapter.next_sibling_element(element).is_none()
            }
            PseudoClass::Root => adapter.is_root(element),
            PseudoClass::Link => self.link_visited(element).is_some_and(|visited| !visited),
            PseudoClass::Visited => self.link_visited(element).unwrap_or(false),
            PseudoClass::Hover | PseudoClass::Active | PseudoClass::Focus => {
                let (flag, state) = match pseudo_class {
                    PseudoClass::Hover => (StateDependency::HOVER, adapter.is_hovered(element)),
                    PseudoClass::Active => (StateDependency::ACTIVE, adapter.is_active(element)),
                    _ => (StateDependency::FOCUS, adapter.is_focused(element)),
                };
                if is_subject {
                    self.context.dependencies.insert(flag);
                }
                state
            }
        };
        matched.into()
    }

    /// `None` for non-links, otherwise whether the completed URL was visited.
    fn link_visited(&self, element: A::Handle) -> Option<bool> {
        let href = self.adapter.attr(element, "href")?;
        let visited = resolve_link(self.adapter.base_url(), href)
            .is_some_and(|url| self.adapter.is_visited(&url));
        Some(visited)
    }
}

/// String equality, ASCII case-insensitive in quirks mode.
fn text_eq(quirks: QuirksMode, left: &str, right: &str) -> bool {
    if quirks.is_quirks() {
        left.eq_ignore_ascii_case(right)
    } else {
        left == right
    }
}

/// See Selectors 3, §6.3.1 and §6.3.2.
fn match_attribute(
    quirks: QuirksMode,
    actual: &str,
    operator: AttrOperator,
    expected: &str,
) -> bool {
    match operator {
        AttrOperator::Set => true,
        AttrOperator::Exact => text_eq(quirks, actual, expected),
        AttrOperator::List => {
            !expected.is_empty()
                && !expected.contains(|ch: char| ch.is_ascii_whitespace())
                && actual
                    .split_ascii_whitespace()
                    .any(|token| text_eq(quirks, token, expected))
        }
        AttrOperator::Hyphen => {
            text_eq(quirks, actual, expected)
                || (actual.as_bytes().get(expected.len()) == Some(&b'-')
                    && actual
                        .get(..expected.len())
                        .is_some_and(|prefix| text_eq(quirks, prefix, expected)))
        }
        AttrOperator::Begin => {
            !expected.is_empty()
                && actual
                    .get(..expected.len())
                    .is_some_and(|prefix| text_eq(quirks, prefix, expected))
        }
        AttrOperator::End => {
            !expected.is_empty()
                && actual
                    .len()
                    .checked_sub(expected.len())
                    .and_then(|start| actual.get(start..))
                    .is_some_and(|suffix| text_eq(quirks, suffix, expected))
        }
        AttrOperator::Contain => {
            if expected.is_empty() {
                false
            } else if quirks.is_quirks() {
                actual
                    .to_ascii_lowercase()
                    .contains(&expected.to_ascii_lowercase())
            } else {
                actual.contains(expected)
            }
        }
    }
}
