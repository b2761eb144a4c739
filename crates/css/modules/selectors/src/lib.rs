//! Selectors Level 3: compiled selector chains, element matching and specificity.
//! See <https://www.w3.org/TR/selectors-3/>
//!
//! Selectors are authored with [`ComplexSelector`] / [`CompoundSelector`] /
//! [`SimpleSelector`] and compiled into a [`Selector`]: a flat chain of nodes whose
//! head is the subject of the rightmost compound. Matching walks that chain from the
//! subject outwards through the DOM exposed by an [`ElementAdapter`].

mod cache;
mod link;
mod matcher;
mod selector;
mod specificity;

use url::Url;

pub use cache::{MatchState, MatchStateCache};
pub use link::resolve_link;
pub use matcher::{MatchResult, MatchingContext, StateDependency, match_selector};
pub use selector::{Constraint, QualifiedTag, Relation, Selector, SelectorNode};
pub use specificity::Specificity;

/// Document parsing mode, as far as selector matching cares about it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QuirksMode {
    /// Attribute and class values compare ASCII case-insensitively.
    Quirks,
    LimitedQuirks,
    #[default]
    NoQuirks,
}

impl QuirksMode {
    /// True when the document is in full quirks mode.
    #[inline]
    pub const fn is_quirks(self) -> bool {
        matches!(self, Self::Quirks)
    }

    /// True for the strict (no-quirks) mode.
    #[inline]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::NoQuirks)
    }
}

/// An adapter that abstracts DOM access for selector matching.
/// Implement this for your DOM layer.
///
/// Only element nodes are ever handed out; text and comment nodes are visible only
/// through [`ElementAdapter::has_child_nodes`].
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element if any.
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element (skip non-elements if your DOM has mixed nodes).
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Next sibling element (skip non-elements if your DOM has mixed nodes).
    fn next_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Tag name in ASCII lowercase (per HTML parsing conventions).
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// Namespace URI of the element, `None` for the null namespace.
    fn namespace(&self, _element: Self::Handle) -> Option<&str> {
        None
    }

    /// Returns the attribute value if present.
    fn attr(&self, element: Self::Handle, name: &str) -> Option<&str>;

    /// True if the element has any child node, text included.
    fn has_child_nodes(&self, element: Self::Handle) -> bool;

    /// True for the document element.
    fn is_root(&self, element: Self::Handle) -> bool {
        self.parent(element).is_none()
    }

    /// Parsing mode of the owning document.
    fn quirks_mode(&self) -> QuirksMode {
        QuirksMode::NoQuirks
    }

    /// Pointer is over the element or one of its descendants.
    fn is_hovered(&self, _element: Self::Handle) -> bool {
        false
    }

    /// Element is being activated.
    fn is_active(&self, _element: Self::Handle) -> bool {
        false
    }

    /// Element has focus.
    fn is_focused(&self, _element: Self::Handle) -> bool {
        false
    }

    /// Base URL used to complete relative `href` values.
    fn base_url(&self) -> Option<&Url> {
        None
    }

    /// True if the absolute `url` is in the visited set.
    fn is_visited(&self, _url: &str) -> bool {
        false
    }

    /// Returns Some(id) if the element has an id attribute, else None.
    fn element_id(&self, element: Self::Handle) -> Option<&str> {
        self.attr(element, "id")
    }

    /// True if the element has the given class token.
    fn has_class(&self, element: Self::Handle, class: &str) -> bool {
        let quirks = self.quirks_mode().is_quirks();
        self.attr(element, "class").is_some_and(|list| {
            list.split_ascii_whitespace().any(|token| {
                if quirks {
                    token.eq_ignore_ascii_case(class)
                } else {
                    token == class
                }
            })
        })
    }
}

/// Attribute selector operators.
/// See Selectors 3, §6.3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttrOperator {
    /// `[attr]`
    Set,
    /// `[attr=value]`
    Exact,
    /// `[attr~=value]`
    List,
    /// `[attr|=value]`
    Hyphen,
    /// `[attr^=value]`
    Begin,
    /// `[attr$=value]`
    End,
    /// `[attr*=value]`
    Contain,
}

/// Pseudo-classes understood by the matcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    Root,
    Link,
    Visited,
    Hover,
    Active,
    Focus,
}

impl PseudoClass {
    /// Pseudo-classes whose result depends on user interaction state.
    #[inline]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Hover | Self::Active | Self::Focus)
    }
}

/// Pseudo-elements, each selecting a separate pseudo-style of the subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PseudoId {
    Before,
    After,
    FirstLine,
    FirstLetter,
    Selection,
}

/// Simple selectors.
/// See Selectors 3, §6.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Type selector, compared against the lowercase tag name.
    Type(String),
    Class(String),
    IdSelector(String),
    Attribute {
        name: String,
        operator: AttrOperator,
        value: String,
    },
    /// Universal selector '*'; matches every element.
    Universal,
    PseudoClass(PseudoClass),
    /// `:not(simple)`. Only a single non-negated simple selector is allowed inside.
    Negation(Box<SimpleSelector>),
    PseudoElement(PseudoId),
    /// Anything the producer could not map. Makes the whole selector invalid.
    Unsupported(String),
}

/// A compound selector is a sequence of simple selectors (no combinators).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    /// Namespace constraint; `None` matches any namespace.
    pub namespace: Option<String>,
    pub simples: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Compound made of the given simple selectors.
    pub fn new(simples: Vec<SimpleSelector>) -> Self {
        Self {
            namespace: None,
            simples,
        }
    }

    /// Shorthand for a compound holding a single type selector.
    pub fn tag(name: &str) -> Self {
        Self::new(vec![SimpleSelector::Type(name.to_owned())])
    }

    /// Restrict the compound to a namespace URI.
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_owned());
        self
    }
}

/// Combinators between compounds.
/// See Selectors 3, §8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// A complex selector is one or more compounds separated by combinators.
/// `first` is the leftmost compound; `rest` continues to the right.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
    /// Selector made of one compound.
    pub fn compound(first: CompoundSelector) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    /// Append a compound to the right of the selector.
    #[must_use]
    pub fn then(mut self, combinator: Combinator, compound: CompoundSelector) -> Self {
        self.rest.push((combinator, compound));
        self
    }

    /// Compile into a matchable chain.
    pub fn compile(&self) -> Selector {
        Selector::from_complex(self)
    }
}

/// A selector list separated by commas.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Compile every member of the list.
    pub fn compile(&self) -> Vec<Selector> {
        self.selectors.iter().map(ComplexSelector::compile).collect()
    }
}
