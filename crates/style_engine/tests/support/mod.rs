#![cfg(test)]
#![allow(dead_code, reason = "each test binary uses a different subset")]

use css_cascade::{CascadeIndex, DeclaredProperty, Origin, RuleSet};
use css_selectors::{
    ComplexSelector, CompoundSelector, ElementAdapter, QuirksMode, Selector, SimpleSelector,
};
use style_engine::{StyleValue, StyledDocument, resolve_style};

#[derive(Default)]
pub struct TestNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub inline: Vec<DeclaredProperty>,
    pub additional: Vec<DeclaredProperty>,
}

/// Arena document; node 0 is the root element and parents precede their children.
pub struct TestDocument {
    pub nodes: Vec<TestNode>,
    pub quirks: QuirksMode,
    pub hovered: Vec<usize>,
}

impl TestDocument {
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![TestNode {
                tag: root_tag.to_owned(),
                ..TestNode::default()
            }],
            quirks: QuirksMode::NoQuirks,
            hovered: Vec::new(),
        }
    }

    pub fn add(&mut self, parent: usize, tag: &str, attrs: &[(&str, &str)]) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TestNode {
            tag: tag.to_owned(),
            attrs: attrs
                .iter()
                .map(|&(name, value)| (name.to_owned(), value.to_owned()))
                .collect(),
            parent: Some(parent),
            ..TestNode::default()
        });
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(index);
        }
        index
    }

    pub fn set_inline(&mut self, element: usize, declarations: Vec<DeclaredProperty>) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.inline = declarations;
        }
    }

    pub fn set_additional(&mut self, element: usize, declarations: Vec<DeclaredProperty>) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.additional = declarations;
        }
    }

    fn sibling(&self, element: usize, offset: isize) -> Option<usize> {
        let parent = self.nodes.get(element)?.parent?;
        let siblings = &self.nodes.get(parent)?.children;
        let position = siblings.iter().position(|&child| child == element)?;
        let target = position.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }
}

impl ElementAdapter for TestDocument {
    type Handle = usize;

    fn parent(&self, element: usize) -> Option<usize> {
        self.nodes.get(element).and_then(|node| node.parent)
    }

    fn previous_sibling_element(&self, element: usize) -> Option<usize> {
        self.sibling(element, -1)
    }

    fn next_sibling_element(&self, element: usize) -> Option<usize> {
        self.sibling(element, 1)
    }

    fn tag_name(&self, element: usize) -> &str {
        self.nodes.get(element).map_or("", |node| node.tag.as_str())
    }

    fn attr(&self, element: usize, name: &str) -> Option<&str> {
        self.nodes.get(element).and_then(|node| {
            node.attrs
                .iter()
                .find(|(attr_name, _)| attr_name == name)
                .map(|(_, value)| value.as_str())
        })
    }

    fn has_child_nodes(&self, element: usize) -> bool {
        self.nodes
            .get(element)
            .is_some_and(|node| !node.children.is_empty())
    }

    fn quirks_mode(&self) -> QuirksMode {
        self.quirks
    }

    fn is_hovered(&self, element: usize) -> bool {
        self.hovered.contains(&element)
    }
}

impl StyledDocument for TestDocument {
    fn inline_declarations(&self, element: usize) -> &[DeclaredProperty] {
        self.nodes
            .get(element)
            .map_or(&[], |node| node.inline.as_slice())
    }

    fn additional_declarations(&self, element: usize) -> &[DeclaredProperty] {
        self.nodes
            .get(element)
            .map_or(&[], |node| node.additional.as_slice())
    }
}

/// Resolve every node in document order, each against its parent's style.
pub fn resolve_all(document: &TestDocument, index: &CascadeIndex) -> Vec<StyleValue> {
    let mut styles: Vec<StyleValue> = Vec::with_capacity(document.nodes.len());
    for (element, node) in document.nodes.iter().enumerate() {
        let parent = node.parent.and_then(|parent_index| styles.get(parent_index));
        let style = resolve_style(document, element, parent, index);
        styles.push(style);
    }
    styles
}

/// Index over author sheets only.
pub fn author_index(sheets: &[RuleSet]) -> CascadeIndex {
    CascadeIndex::build(sheets.iter().map(|sheet| (sheet, Origin::Author)))
}

pub fn tag(name: &str) -> Selector {
    ComplexSelector::compound(CompoundSelector::tag(name)).compile()
}

pub fn class(name: &str) -> Selector {
    ComplexSelector::compound(CompoundSelector::new(vec![SimpleSelector::Class(
        name.to_owned(),
    )]))
    .compile()
}

pub fn id(name: &str) -> Selector {
    ComplexSelector::compound(CompoundSelector::new(vec![SimpleSelector::IdSelector(
        name.to_owned(),
    )]))
    .compile()
}

pub fn compound(simples: Vec<SimpleSelector>) -> Selector {
    ComplexSelector::compound(CompoundSelector::new(simples)).compile()
}
