//! Compiled selector chains.
//!
//! A [`Selector`] is a flat list of [`SelectorNode`]s read right to left: node 0 is the
//! head of the rightmost compound, and each node's [`Relation`] says how to reach the
//! next one. Nodes of one compound are joined by [`Relation::SubSelector`].

use crate::specificity::specificity_of_nodes;
use crate::{
    AttrOperator, Combinator, ComplexSelector, CompoundSelector, PseudoClass, PseudoId,
    SimpleSelector, Specificity,
};
use core::hash::{Hash, Hasher};
use smallvec::SmallVec;

/// Tag test of a node. `None` parts match anything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QualifiedTag {
    /// Lowercase local name.
    pub local_name: Option<Box<str>>,
    pub namespace: Option<Box<str>>,
}

impl QualifiedTag {
    /// Matches any element in any namespace.
    pub const ANY: Self = Self {
        local_name: None,
        namespace: None,
    };

    /// Tag test for a lowercase local name in any namespace.
    pub fn local(name: &str) -> Self {
        Self {
            local_name: Some(name.to_ascii_lowercase().into_boxed_str()),
            namespace: None,
        }
    }

    #[inline]
    pub const fn is_any(&self) -> bool {
        self.local_name.is_none() && self.namespace.is_none()
    }
}

/// The single non-tag test a node carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Constraint {
    #[default]
    None,
    Id(Box<str>),
    Class(Box<str>),
    Attribute {
        /// Lowercase attribute name.
        name: Box<str>,
        operator: AttrOperator,
        value: Box<str>,
    },
    PseudoClass(PseudoClass),
    /// `:not(...)` holding one node without relation.
    Negation(Box<SelectorNode>),
    PseudoElement(PseudoId),
    Unsupported(Box<str>),
}

/// How a node reaches the next node of the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Some ancestor.
    Descendant,
    /// The parent.
    Child,
    /// The previous element sibling.
    DirectAdjacent,
    /// Some previous element sibling.
    IndirectAdjacent,
    /// The same element.
    SubSelector,
}

impl From<Combinator> for Relation {
    #[inline]
    fn from(combinator: Combinator) -> Self {
        match combinator {
            Combinator::Descendant => Self::Descendant,
            Combinator::Child => Self::Child,
            Combinator::AdjacentSibling => Self::DirectAdjacent,
            Combinator::GeneralSibling => Self::IndirectAdjacent,
        }
    }
}

/// One simple-selector step of a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorNode {
    pub tag: QualifiedTag,
    pub constraint: Constraint,
    /// Relation to the next node; `None` on the last node.
    pub relation: Option<Relation>,
}

impl SelectorNode {
    /// Node with no tag test and a single constraint.
    pub const fn any(constraint: Constraint) -> Self {
        Self {
            tag: QualifiedTag::ANY,
            constraint,
            relation: None,
        }
    }
}

/// Immutable compiled selector.
#[derive(Clone, Debug)]
pub struct Selector {
    nodes: SmallVec<SelectorNode, 4>,
    specificity: Specificity,
    universal_dynamic: bool,
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.as_slice() == other.nodes.as_slice()
    }
}

impl Eq for Selector {}

impl Hash for Selector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.as_slice().hash(state);
    }
}

impl Selector {
    /// Build a selector from already linked nodes, head first.
    pub fn from_nodes<I: IntoIterator<Item = SelectorNode>>(nodes: I) -> Self {
        let nodes: SmallVec<SelectorNode, 4> = nodes.into_iter().collect();
        let specificity = specificity_of_nodes(&nodes);
        let universal_dynamic = is_universal_dynamic(&nodes);
        Self {
            nodes,
            specificity,
            universal_dynamic,
        }
    }

    /// Compile an authored complex selector.
    pub fn from_complex(complex: &ComplexSelector) -> Self {
        let mut compounds: Vec<(&CompoundSelector, Option<Relation>)> =
            Vec::with_capacity(complex.rest.len().saturating_add(1));
        let mut left_relation: Option<Relation> = None;
        let mut left = &complex.first;
        for (combinator, right) in &complex.rest {
            compounds.push((left, left_relation));
            left_relation = Some(Relation::from(*combinator));
            left = right;
        }
        compounds.push((left, left_relation));

        let mut nodes: SmallVec<SelectorNode, 4> = SmallVec::new();
        for (compound, relation) in compounds.into_iter().rev() {
            compile_compound(compound, relation, &mut nodes);
        }
        Self::from_nodes(nodes)
    }

    #[inline]
    pub fn nodes(&self) -> &[SelectorNode] {
        &self.nodes
    }

    #[inline]
    pub const fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Local name of the subject node, used for tag bucketing.
    pub fn rightmost_tag(&self) -> Option<&str> {
        self.nodes
            .first()
            .and_then(|node| node.tag.local_name.as_deref())
    }

    /// Pseudo-element of the subject compound, if any.
    pub fn pseudo_element(&self) -> Option<PseudoId> {
        for node in &self.nodes {
            if let Constraint::PseudoElement(pseudo) = node.constraint {
                return Some(pseudo);
            }
            if node.relation != Some(Relation::SubSelector) {
                break;
            }
        }
        None
    }

    /// A chain made only of any-tag nodes whose constraints are `:hover`/`:active`.
    /// Such selectors are restricted to link elements.
    #[inline]
    pub const fn is_universal_dynamic(&self) -> bool {
        self.universal_dynamic
    }

    /// Whether the chain can ever match.
    ///
    /// Rejects empty chains, unsupported components, nested or pseudo-element
    /// negations, and pseudo-elements that are not the last node of the subject
    /// compound.
    pub fn is_valid(&self) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let mut in_subject = true;
        for node in &self.nodes {
            match &node.constraint {
                Constraint::Unsupported(_) => return false,
                Constraint::Negation(inner) => {
                    if matches!(
                        inner.constraint,
                        Constraint::Negation(_)
                            | Constraint::PseudoElement(_)
                            | Constraint::Unsupported(_)
                    ) {
                        return false;
                    }
                }
                Constraint::PseudoElement(_) => {
                    if !in_subject || node.relation == Some(Relation::SubSelector) {
                        return false;
                    }
                }
                Constraint::None
                | Constraint::Id(_)
                | Constraint::Class(_)
                | Constraint::Attribute { .. }
                | Constraint::PseudoClass(_) => {}
            }
            if node
                .relation
                .is_some_and(|relation| relation != Relation::SubSelector)
            {
                in_subject = false;
            }
        }
        true
    }
}

impl From<&ComplexSelector> for Selector {
    fn from(complex: &ComplexSelector) -> Self {
        Self::from_complex(complex)
    }
}

/// Append the nodes for one compound. `relation` links its last node to the compound
/// on its left.
fn compile_compound(
    compound: &CompoundSelector,
    relation: Option<Relation>,
    out: &mut SmallVec<SelectorNode, 4>,
) {
    let namespace = compound
        .namespace
        .as_deref()
        .map(|uri| uri.to_owned().into_boxed_str());
    let mut head = SelectorNode {
        tag: QualifiedTag {
            local_name: None,
            namespace,
        },
        ..SelectorNode::default()
    };
    let mut tail: Vec<SelectorNode> = Vec::new();
    let mut tag_taken = false;
    for simple in &compound.simples {
        match simple {
            SimpleSelector::Universal => {}
            SimpleSelector::Type(name) if !tag_taken => {
                tag_taken = true;
                head.tag.local_name = Some(name.to_ascii_lowercase().into_boxed_str());
            }
            SimpleSelector::Type(name) => tail.push(SelectorNode {
                tag: QualifiedTag::local(name),
                ..SelectorNode::default()
            }),
            other => {
                let constraint = constraint_of(other);
                if tail.is_empty() && head.constraint == Constraint::None {
                    head.constraint = constraint;
                } else {
                    tail.push(SelectorNode::any(constraint));
                }
            }
        }
    }
    let mut compound_nodes: Vec<SelectorNode> = Vec::with_capacity(tail.len().saturating_add(1));
    compound_nodes.push(head);
    compound_nodes.extend(tail);
    let last = compound_nodes.len().saturating_sub(1);
    for (index, mut node) in compound_nodes.into_iter().enumerate() {
        node.relation = if index == last {
            relation
        } else {
            Some(Relation::SubSelector)
        };
        out.push(node);
    }
}

fn constraint_of(simple: &SimpleSelector) -> Constraint {
    match simple {
        SimpleSelector::Class(name) => Constraint::Class(name.as_str().into()),
        SimpleSelector::IdSelector(id) => Constraint::Id(id.as_str().into()),
        SimpleSelector::Attribute {
            name,
            operator,
            value,
        } => Constraint::Attribute {
            name: name.to_ascii_lowercase().into_boxed_str(),
            operator: *operator,
            value: value.as_str().into(),
        },
        SimpleSelector::PseudoClass(pseudo) => Constraint::PseudoClass(*pseudo),
        SimpleSelector::Negation(inner) => Constraint::Negation(Box::new(negated_node(inner))),
        SimpleSelector::PseudoElement(pseudo) => Constraint::PseudoElement(*pseudo),
        SimpleSelector::Unsupported(text) => Constraint::Unsupported(text.as_str().into()),
        SimpleSelector::Type(_) | SimpleSelector::Universal => Constraint::None,
    }
}

fn negated_node(inner: &SimpleSelector) -> SelectorNode {
    match inner {
        SimpleSelector::Type(name) => SelectorNode {
            tag: QualifiedTag::local(name),
            ..SelectorNode::default()
        },
        SimpleSelector::Universal => SelectorNode::default(),
        other => SelectorNode::any(constraint_of(other)),
    }
}

fn is_universal_dynamic(nodes: &[SelectorNode]) -> bool {
    let mut saw_dynamic = false;
    for node in nodes {
        if !node.tag.is_any() {
            return false;
        }
        match node.constraint {
            Constraint::PseudoClass(PseudoClass::Hover | PseudoClass::Active) => {
                saw_dynamic = true;
            }
            Constraint::None => {}
            _ => return false,
        }
    }
    saw_dynamic
}
