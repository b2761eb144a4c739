//! CSS selector specificity calculation.
//! See <https://www.w3.org/TR/selectors-3/#specificity>

use crate::selector::{Constraint, SelectorNode};

/// Specificity triple (a, b, c): ids, then classes/attributes/pseudo-classes, then
/// type selectors and pseudo-elements. Compared lexicographically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Component-wise saturating sum.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(
            self.0.saturating_add(other.0),
            self.1.saturating_add(other.1),
            self.2.saturating_add(other.2),
        )
    }
}

/// Specificity of a single node. `:not(x)` counts as its argument.
fn specificity_of_node(node: &SelectorNode) -> Specificity {
    let tag = u32::from(node.tag.local_name.is_some());
    let constraint = match &node.constraint {
        Constraint::Id(_) => Specificity(1, 0, 0),
        Constraint::Class(_) | Constraint::Attribute { .. } | Constraint::PseudoClass(_) => {
            Specificity(0, 1, 0)
        }
        Constraint::PseudoElement(_) => Specificity(0, 0, 1),
        Constraint::Negation(inner) => specificity_of_node(inner),
        Constraint::None | Constraint::Unsupported(_) => Specificity::default(),
    };
    Specificity(0, 0, tag).saturating_add(constraint)
}

/// Specificity of a whole chain (sum of its nodes).
pub(crate) fn specificity_of_nodes(nodes: &[SelectorNode]) -> Specificity {
    nodes
        .iter()
        .fold(Specificity::default(), |total, node| {
            total.saturating_add(specificity_of_node(node))
        })
}
