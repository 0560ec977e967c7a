//! BEM class name generation.
//!
//! Every component that resolves to a template contributes one token to the
//! class stack. A node's classes are built from the trailing tokens of that
//! stack joined with the class joiner: `class1` is the node's own token,
//! `class2` adds its parent component, and so on up to `class5`. The default
//! `class` uses the configured class length.

use indexmap::IndexSet;
use log::trace;

use trellis_core::{Node, naming::slugify};

use crate::config::ClassConfig;

/// Number of `classN` levels exposed to templates.
pub const CLASS_LEVELS: usize = 5;

/// Attribute overriding the class length for one node.
const INHERIT_ATTR: &str = "inherit";

/// Attribute whose value replaces the tag name as the class token.
const NAME_ATTR: &str = "name";

/// The class strings computed for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    class: String,
    levels: [String; CLASS_LEVELS],
}

impl ClassSet {
    /// The default class, built from the configured number of tokens.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// `classN` for `n` in `1..=5`.
    pub fn level(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|index| self.levels.get(index))
            .map(String::as_str)
    }

    /// `(n, classN)` pairs from `class1` to `class5`.
    pub fn levels(&self) -> impl Iterator<Item = (usize, &str)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, value)| (index + 1, value.as_str()))
    }
}

/// Computes class tokens and class strings from a [`ClassConfig`].
#[derive(Debug, Clone)]
pub struct ClassGenerator {
    config: ClassConfig,
    skip_all: bool,
    skip_tags: IndexSet<String>,
}

impl ClassGenerator {
    pub fn new(config: &ClassConfig) -> Self {
        config.warn_corrections();

        let skip_all = config.skip_tags().iter().any(|tag| tag == "*");
        let skip_tags = config
            .skip_tags()
            .iter()
            .map(|tag| tag.to_lowercase())
            .collect();

        Self {
            config: config.clone(),
            skip_all,
            skip_tags,
        }
    }

    pub fn joiner(&self) -> &str {
        self.config.joiner()
    }

    /// The class token for `node`.
    ///
    /// Uses the `name` attribute when it has any word characters, the tag
    /// name otherwise.
    pub fn token_for(&self, node: &Node) -> String {
        let joiner = self.config.tag_joiner();
        node.attribute(NAME_ATTR)
            .map(|name| slugify(name, joiner))
            .filter(|token| !token.is_empty())
            .unwrap_or_else(|| slugify(node.name(), joiner))
    }

    /// Whether nodes named `tag` push a token on the class stack.
    pub fn participates(&self, tag: &str) -> bool {
        !self.skip_all && !self.skip_tags.contains(&tag.to_lowercase())
    }

    /// Compute the class strings of `node`.
    ///
    /// `stack` already holds the node's own token when it participates.
    /// `scope` is the active scope token, if any.
    pub fn compute(&self, node: &Node, stack: &[String], scope: Option<&str>) -> ClassSet {
        let own = self.token_for(node);
        let length = node
            .attribute(INHERIT_ATTR)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|&length| length > 0)
            .unwrap_or_else(|| self.config.class_length());

        let finish = |count: usize| {
            let mut value = self.trailing(stack, count);
            if let Some(scope) = scope.filter(|scope| !scope.is_empty() && *scope != own) {
                value = self.scoped(&value, scope);
            }
            self.collapse_doubles(value, stack)
        };

        let set = ClassSet {
            class: finish(length),
            levels: std::array::from_fn(|index| finish(index + 1)),
        };
        trace!(token = own, class = set.class(); "Computed classes");
        set
    }

    /// The last `count` tokens of `stack` joined by the class joiner.
    fn trailing(&self, stack: &[String], count: usize) -> String {
        stack[stack.len().saturating_sub(count)..].join(self.joiner())
    }

    /// Prefix `value` with `scope` unless it already carries that prefix.
    ///
    /// The prefix only counts at a token boundary, so `mycard__item` is
    /// still prefixed with `card`.
    ///
    /// ```
    /// # use trellis::{classes::ClassGenerator, config::ClassConfig};
    /// let generator = ClassGenerator::new(&ClassConfig::default());
    /// let once = generator.scoped("item", "panel");
    /// assert_eq!(once, "panel__item");
    /// assert_eq!(generator.scoped(&once, "panel"), once);
    /// assert_eq!(generator.scoped("mypanel__item", "panel"), "panel__mypanel__item");
    /// ```
    pub fn scoped(&self, value: &str, scope: &str) -> String {
        let joiner = self.joiner();
        let prefix = format!("{scope}{joiner}");
        let inner = format!("{joiner}{prefix}");
        if value.is_empty()
            || value == scope
            || value.starts_with(&prefix)
            || value.contains(&inner)
        {
            value.to_string()
        } else {
            format!("{prefix}{value}")
        }
    }

    /// Collapse adjacent equal tokens to one for every stack token but the last.
    fn collapse_doubles(&self, value: String, stack: &[String]) -> String {
        let joiner = self.joiner();
        let earlier = &stack[..stack.len().saturating_sub(1)];

        let mut parts: Vec<&str> = Vec::new();
        for part in value.split(joiner) {
            let doubled = parts.last() == Some(&part)
                && earlier.iter().any(|token| !token.is_empty() && token == part);
            if !doubled {
                parts.push(part);
            }
        }
        parts.join(joiner)
    }
}
