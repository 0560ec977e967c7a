//! Values handed to a view template.
//!
//! [`build`] collects everything a template may reference for one component:
//! its attributes, its position in the document, the raw markup of its
//! children and the generated class names.

use indexmap::IndexMap;

use trellis_core::{Node, naming::camel_case};

use crate::classes::ClassSet;

/// Key holding the component's tag name.
pub const NODE_NAME: &str = "nodeName";
/// Key holding the tag names of the component's ancestors.
pub const NODE_PARENTS: &str = "nodeParents";
/// Key holding the raw markup of the component's children.
pub const YIELD: &str = "yield";
/// Key holding the default class.
pub const CLASS: &str = "class";
/// Key holding a copy of the original attributes.
pub const PROTO: &str = "__proto__";

/// A bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    List(Vec<String>),
    Map(IndexMap<String, String>),
}

impl Value {
    /// The value as placeholder text.
    ///
    /// Lists are joined with a space. Maps have no text form.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(text.clone()),
            Value::List(items) => Some(items.join(" ")),
            Value::Map(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Template bindings in insertion order.
pub type Bindings = IndexMap<String, Value>;

/// Build the bindings for `node`.
///
/// `parents` lists the ancestor tag names from the root down, excluding
/// `node` itself. Reserved keys are inserted last and replace attributes of
/// the same name.
///
/// # Example
///
/// ```
/// # use trellis::{bindings::{build, Value}, classes::ClassSet};
/// # use trellis_core::Node;
/// let node = Node::new("Button").with_attribute("data-id", "7");
/// let bindings = build(&node, &["Card".to_string()], &ClassSet::default(), "");
///
/// assert_eq!(bindings["dataId"], Value::from("7"));
/// assert_eq!(bindings["nodeName"], Value::from("Button"));
/// assert_eq!(bindings["nodeParents"], Value::List(vec!["Card".to_string()]));
/// ```
pub fn build(node: &Node, parents: &[String], classes: &ClassSet, raw_inner: &str) -> Bindings {
    let mut bindings = Bindings::new();

    for (name, value) in node.attributes() {
        bindings.insert(name.clone(), Value::from(value.as_str()));
        let camel = camel_case(name);
        if !camel.is_empty() && camel != *name {
            bindings.insert(camel, Value::from(value.as_str()));
        }
    }

    bindings.insert(NODE_NAME.to_string(), Value::from(node.name()));
    bindings.insert(NODE_PARENTS.to_string(), Value::List(parents.to_vec()));
    bindings.insert(YIELD.to_string(), Value::from(raw_inner));
    bindings.insert(CLASS.to_string(), Value::from(classes.class()));
    for (level, class) in classes.levels() {
        bindings.insert(format!("{CLASS}{level}"), Value::from(class));
    }
    bindings.insert(PROTO.to_string(), Value::Map(node.attributes().clone()));

    bindings
}

#[cfg(test)]
mod tests {
    use crate::{classes::ClassGenerator, config::ClassConfig};

    use super::*;

    fn classes_for(node: &Node, stack: &[&str]) -> ClassSet {
        let stack: Vec<String> = stack.iter().map(|token| token.to_string()).collect();
        ClassGenerator::new(&ClassConfig::default()).compute(node, &stack, None)
    }

    #[test]
    fn test_attributes_and_camel_case_keys() {
        let node = Node::new("card")
            .with_attribute("title", "Hello")
            .with_attribute("aria-label", "Greeting");
        let bindings = build(&node, &[], &ClassSet::default(), "");

        assert_eq!(bindings["title"], Value::from("Hello"));
        assert_eq!(bindings["aria-label"], Value::from("Greeting"));
        assert_eq!(bindings["ariaLabel"], Value::from("Greeting"));
    }

    #[test]
    fn test_reserved_keys_override_attributes() {
        let node = Node::new("card")
            .with_attribute("class", "mine")
            .with_attribute("yield", "attr");
        let classes = classes_for(&node, &["page", "card"]);
        let bindings = build(&node, &["page".to_string()], &classes, "<b>hi</b>");

        assert_eq!(bindings["class"], Value::from("page__card"));
        assert_eq!(bindings["yield"], Value::from("<b>hi</b>"));
        assert_eq!(bindings["class1"], Value::from("card"));
        assert_eq!(bindings["class5"], Value::from("page__card"));

        let Value::Map(proto) = &bindings[PROTO] else {
            panic!("expected a map");
        };
        assert_eq!(proto.get("class").map(String::as_str), Some("mine"));
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(Value::from("a").render().as_deref(), Some("a"));
        assert_eq!(
            Value::List(vec!["a".to_string(), "b".to_string()])
                .render()
                .as_deref(),
            Some("a b")
        );
        assert_eq!(Value::Map(IndexMap::new()).render(), None);
    }

    #[test]
    fn test_reserved_keys_come_last() {
        let node = Node::new("card").with_attribute("id", "main");
        let bindings = build(&node, &[], &ClassSet::default(), "");

        let keys: Vec<_> = bindings.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "id", "nodeName", "nodeParents", "yield", "class", "class1", "class2", "class3",
                "class4", "class5", "__proto__"
            ]
        );
    }
}
