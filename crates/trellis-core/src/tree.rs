//! Markup tree model.
//!
//! A document is a single root [`Node`]. Every node has a tag name, an
//! ordered attribute map and an ordered list of [`Child`]ren, each of which
//! is either a nested element or a run of text.
//!
//! Text is stored decoded: character references are resolved by the parser
//! and escaping is the serializer's job.
//!
//! # Example
//!
//! ```
//! # use trellis_core::tree::{Child, Node};
//! let card = Node::new("div")
//!     .with_attribute("class", "card")
//!     .with_child(Node::new("yield"))
//!     .with_text("footer");
//!
//! assert_eq!(card.attribute("class"), Some("card"));
//! assert_eq!(card.count_descendants("yield"), 1);
//! assert!(matches!(card.children()[1], Child::Text(_)));
//! ```

use indexmap::IndexMap;

/// Ordered attribute map. Keys are unique and keep insertion order.
pub type Attributes = IndexMap<String, String>;

/// A child of an element: either a nested element or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(Node),
    Text(String),
}

impl Child {
    /// Returns the element if this child is one.
    pub fn as_element(&self) -> Option<&Node> {
        match self {
            Child::Element(node) => Some(node),
            Child::Text(_) => None,
        }
    }

    /// Returns the text if this child is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Element(_) => None,
            Child::Text(text) => Some(text),
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Element(node)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

/// A markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    attributes: Attributes,
    children: Vec<Child>,
}

impl Node {
    /// Create an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Create an element from its parts.
    pub fn from_parts(name: impl Into<String>, attributes: Attributes, children: Vec<Child>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children,
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder-style text append.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Child::Text(text.into()))
    }

    /// Tag name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    /// Look up an attribute value by exact name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set an attribute. An existing key keeps its position.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, preserving the order of the remaining ones.
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Child> {
        &mut self.children
    }

    pub fn set_children(&mut self, children: Vec<Child>) {
        self.children = children;
    }

    /// Take the children out, leaving the node empty.
    pub fn take_children(&mut self) -> Vec<Child> {
        std::mem::take(&mut self.children)
    }

    /// Split the node into name, attributes and children.
    pub fn into_parts(self) -> (String, Attributes, Vec<Child>) {
        (self.name, self.attributes, self.children)
    }

    /// Iterate over direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_element)
    }

    /// Whether any direct child is an element.
    pub fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Whether any direct text child carries non-whitespace content.
    pub fn has_text_content(&self) -> bool {
        self.children
            .iter()
            .filter_map(Child::as_text)
            .any(|text| !text.trim().is_empty())
    }

    /// A node with neither element children nor visible text.
    pub fn is_empty(&self) -> bool {
        !self.has_element_children() && !self.has_text_content()
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(node) => node.collect_text(out),
            }
        }
    }

    /// Count descendant elements named `name` (ASCII case-insensitive).
    ///
    /// The node itself is not counted.
    pub fn count_descendants(&self, name: &str) -> usize {
        self.elements()
            .map(|node| {
                usize::from(node.name.eq_ignore_ascii_case(name)) + node.count_descendants(name)
            })
            .sum()
    }

    /// Replace the first descendant element named `name` with `replacement`.
    ///
    /// The replacement children take the element's position among its
    /// siblings. Returns `false` if no such descendant exists, in which case
    /// `replacement` is dropped.
    pub fn splice_descendant(&mut self, name: &str, replacement: Vec<Child>) -> bool {
        let mut replacement = Some(replacement);
        self.splice_inner(name, &mut replacement)
    }

    fn splice_inner(&mut self, name: &str, replacement: &mut Option<Vec<Child>>) -> bool {
        let position = self.children.iter().position(|child| {
            child
                .as_element()
                .is_some_and(|node| node.name.eq_ignore_ascii_case(name))
        });

        if let Some(index) = position {
            let spliced = replacement.take().unwrap_or_default();
            self.children.splice(index..=index, spliced);
            return true;
        }

        self.children.iter_mut().any(|child| match child {
            Child::Element(node) => node.splice_inner(name, replacement),
            Child::Text(_) => false,
        })
    }
}
