//! Component expansion.
//!
//! The [`Expander`] walks a parsed document depth-first. Every element whose
//! tag resolves to a template is replaced by the template's output:
//!
//! 1. **Resolve** - Look up the most specific template for the tag, then the
//!    plain tag name
//! 2. **Bind** - Push the class token, compute classes and build bindings
//! 3. **Execute** - Render the first template that exists
//! 4. **Splice** - Move the original children into the `<yield>` placeholder
//! 5. **Merge** - Carry pass-through attributes and classes onto the result
//! 6. **Recurse** - Expand the children of the result
//! 7. **Prune** - Drop elements left without content
//!
//! A component whose template is missing or broken is kept as written. No
//! per-node failure aborts the document.

use indexmap::IndexSet;
use log::{debug, trace, warn};
use thiserror::Error;

use trellis_core::{Child, Node};

use crate::{
    bindings::{self, YIELD},
    catalog::TemplateCatalog,
    classes::{ClassGenerator, ClassSet},
    config::{AppConfig, MarkupConfig, OutputConfig},
    export::html::HtmlWriter,
    resolve::resolve,
    view::{ViewError, ViewExecutor},
};

/// Why a component was passed through unchanged.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("No template found for `{0}`")]
    TemplateNotFound(String),

    #[error("Template `{name}` is invalid: {reason}")]
    TemplateInvalid { name: String, reason: String },
}

impl From<ViewError> for ExpandError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::NotFound(name) => Self::TemplateNotFound(name),
            ViewError::Invalid { name, reason } => Self::TemplateInvalid { name, reason },
        }
    }
}

/// Configuration the expander needs, prepared once per document builder.
#[derive(Debug, Clone)]
pub struct ExpandSettings {
    classes: ClassGenerator,
    markup: MarkupConfig,
    output: OutputConfig,
    scope_attr: String,
    max_depth: usize,
}

impl ExpandSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            classes: ClassGenerator::new(config.classes()),
            markup: config.markup().clone(),
            output: config.output().clone(),
            scope_attr: config.classes().scope_attr().to_string(),
            max_depth: config.classes().max_depth(),
        }
    }

    pub fn classes(&self) -> &ClassGenerator {
        &self.classes
    }

    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn is_scope_root(&self, node: &Node) -> bool {
        !self.scope_attr.is_empty() && node.attribute(&self.scope_attr).is_some()
    }
}

/// A template applied to a component, before its children are expanded.
struct Expanded {
    node: Node,
    scope: Option<String>,
}

/// Expands one document.
///
/// Holds the breadcrumb stack of open tag names and the class token stack.
/// Both are balanced when [`Expander::expand`] returns.
pub struct Expander<'a, V: ViewExecutor + ?Sized> {
    settings: &'a ExpandSettings,
    catalog: &'a TemplateCatalog,
    views: &'a V,
    breadcrumbs: Vec<String>,
    class_stack: Vec<String>,
}

impl<'a, V: ViewExecutor + ?Sized> Expander<'a, V> {
    pub fn new(settings: &'a ExpandSettings, catalog: &'a TemplateCatalog, views: &'a V) -> Self {
        Self {
            settings,
            catalog,
            views,
            breadcrumbs: Vec::new(),
            class_stack: Vec::new(),
        }
    }

    /// Expand `root` and everything below it.
    ///
    /// Returns `None` when the root itself is pruned.
    pub fn expand(&mut self, root: Node) -> Option<Node> {
        self.expand_node(root, None, 0)
    }

    /// Tag names of the elements currently being expanded.
    pub fn breadcrumbs(&self) -> &[String] {
        &self.breadcrumbs
    }

    /// Class tokens of the components currently being expanded.
    pub fn class_stack(&self) -> &[String] {
        &self.class_stack
    }

    fn expand_node(&mut self, node: Node, scope: Option<String>, depth: usize) -> Option<Node> {
        if depth >= self.settings.max_depth {
            warn!(
                tag = node.name(),
                max_depth = self.settings.max_depth;
                "Nesting too deep, emitting element without expansion"
            );
            return Some(node);
        }

        self.breadcrumbs.push(node.name().to_string());

        let candidates = self.candidates(node.name());
        let mut pushed = false;
        if !candidates.is_empty() && self.settings.classes.participates(node.name()) {
            self.class_stack.push(self.settings.classes.token_for(&node));
            pushed = true;
        }

        let (mut node, child_scope) = if candidates.is_empty() {
            (node, scope)
        } else {
            match self.apply_template(&node, &candidates, scope.as_deref()) {
                Ok(Expanded { node, scope }) => (node, scope),
                Err(err) => {
                    match &err {
                        ExpandError::TemplateNotFound(_) => {
                            debug!(tag = node.name(), err:% = err; "Passing component through")
                        }
                        ExpandError::TemplateInvalid { .. } => {
                            warn!(tag = node.name(), err:% = err; "Passing component through")
                        }
                    }
                    if pushed {
                        self.class_stack.pop();
                        pushed = false;
                    }
                    (node, scope)
                }
            }
        };

        let children = node.take_children();
        let mut expanded = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Child::Text(text) => expanded.push(Child::Text(text)),
                Child::Element(element) => {
                    if let Some(element) = self.expand_node(element, child_scope.clone(), depth + 1)
                    {
                        expanded.push(Child::Element(element));
                    }
                }
            }
        }
        node.set_children(expanded);

        if pushed {
            self.class_stack.pop();
        }
        self.breadcrumbs.pop();

        if node.is_empty() && !self.settings.markup.keeps_empty(node.name()) {
            trace!(tag = node.name(); "Pruned empty element");
            return None;
        }
        Some(node)
    }

    /// Template names to try for the current tag, most specific first.
    fn candidates(&self, tag: &str) -> Vec<String> {
        let mut names = Vec::with_capacity(2);
        if let Some(entry) = resolve(&self.breadcrumbs, self.catalog) {
            names.push(entry.name().to_string());
        }
        if let Some(plain) = self
            .catalog
            .canonical(tag)
            .filter(|plain| !names.iter().any(|name| name == plain))
        {
            names.push(plain.to_string());
        }
        names
    }

    fn apply_template(
        &self,
        node: &Node,
        candidates: &[String],
        scope: Option<&str>,
    ) -> Result<Expanded, ExpandError> {
        let classes = self
            .settings
            .classes
            .compute(node, &self.class_stack, scope);
        let parents = &self.breadcrumbs[..self.breadcrumbs.len().saturating_sub(1)];
        let raw_inner =
            HtmlWriter::new(&self.settings.output, &self.settings.markup).render_inner(node);
        let bindings = bindings::build(node, parents, &classes, &raw_inner);

        let (name, mut root) = self.execute(node, candidates, &bindings)?;
        debug!(tag = node.name(), template = name; "Applying template");

        let yields =
            usize::from(root.name().eq_ignore_ascii_case(YIELD)) + root.count_descendants(YIELD);
        match yields {
            0 => {}
            1 if !root.name().eq_ignore_ascii_case(YIELD) => {
                root.splice_descendant(YIELD, node.children().to_vec());
            }
            _ => {
                return Err(ExpandError::TemplateInvalid {
                    name: name.to_string(),
                    reason: format!("expected at most one nested <{YIELD}>, found {yields}"),
                });
            }
        }

        self.merge_attributes(node, &mut root, &classes);

        let scope = if self.settings.is_scope_root(node) || self.settings.is_scope_root(&root) {
            classes.level(1).map(str::to_string)
        } else {
            scope.map(str::to_string)
        };
        if !self.settings.scope_attr.is_empty() {
            root.remove_attribute(&self.settings.scope_attr);
        }

        Ok(Expanded { node: root, scope })
    }

    /// Run the first candidate template that exists.
    fn execute<'n>(
        &self,
        node: &Node,
        candidates: &'n [String],
        bindings: &bindings::Bindings,
    ) -> Result<(&'n str, Node), ExpandError> {
        for name in candidates {
            match self.views.execute(name, bindings) {
                Ok(root) => return Ok((name.as_str(), root)),
                Err(ViewError::NotFound(_)) => {
                    debug!(template = name.as_str(); "Template not found, trying next candidate");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(ExpandError::TemplateNotFound(node.name().to_string()))
    }

    fn merge_attributes(&self, node: &Node, root: &mut Node, classes: &ClassSet) {
        for attr in self.settings.markup.pass_attrs() {
            if attr.eq_ignore_ascii_case("class") || root.attribute(attr).is_some() {
                continue;
            }
            if let Some(value) = node.attribute(attr) {
                root.set_attribute(attr.clone(), value);
            }
        }

        let merged: IndexSet<&str> = [
            Some(classes.class()),
            root.attribute("class"),
            node.attribute("class"),
        ]
        .into_iter()
        .flatten()
        .flat_map(str::split_whitespace)
        .collect();

        if merged.is_empty() {
            root.remove_attribute("class");
        } else {
            let class = merged.into_iter().collect::<Vec<_>>().join(" ");
            root.set_attribute("class", class);
        }
    }
}
