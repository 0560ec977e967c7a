//! View executors.
//!
//! A [`ViewExecutor`] turns a template name and its [`Bindings`] into a
//! markup tree. [`FileViews`] reads templates from a directory;
//! [`InMemoryViews`] keeps them in a map.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use trellis_core::{Child, Node};
use trellis_parser::{ParseOptions, template::Template};

use crate::bindings::{Bindings, Value};

/// Why a template could not produce a tree.
#[derive(Debug, Error)]
pub enum ViewError {
    /// No template has this name.
    #[error("Template `{0}` not found")]
    NotFound(String),

    /// The template exists but its output is unusable.
    #[error("Template `{name}` is invalid: {reason}")]
    Invalid { name: String, reason: String },
}

impl ViewError {
    fn invalid(name: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Executes view templates by name.
pub trait ViewExecutor: Send + Sync {
    /// Render template `name` with `bindings` into a tree with one root.
    ///
    /// # Errors
    ///
    /// [`ViewError::NotFound`] when there is no such template,
    /// [`ViewError::Invalid`] when it does not render to a single element.
    fn execute(&self, name: &str, bindings: &Bindings) -> Result<Node, ViewError>;
}

/// Render template `source` and parse the output.
fn render_source(
    name: &str,
    source: &str,
    bindings: &Bindings,
    options: &ParseOptions,
) -> Result<Node, ViewError> {
    let template = Template::parse(source).map_err(|err| ViewError::invalid(name, err))?;
    let markup = template.render(|key| bindings.get(key).and_then(Value::render));
    trace!(template = name, markup = markup.as_str(); "Rendered template");

    let root = trellis_parser::parse(&markup, options).map_err(|err| ViewError::invalid(name, err))?;
    Ok(unwrap_document(root))
}

/// A template written as a full document yields its `body`.
fn unwrap_document(root: Node) -> Node {
    if !root.name().eq_ignore_ascii_case("html") {
        return root;
    }

    let (name, attributes, children) = root.into_parts();
    let mut body = None;
    let mut rest = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Child::Element(node)
                if body.is_none() && node.name().eq_ignore_ascii_case("body") =>
            {
                body = Some(node)
            }
            other => rest.push(other),
        }
    }

    body.unwrap_or_else(|| Node::from_parts(name, attributes, rest))
}

/// Templates stored as files in one directory.
#[derive(Debug, Clone)]
pub struct FileViews {
    dir: PathBuf,
    extension: String,
    options: ParseOptions,
}

impl FileViews {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            options,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{}", self.extension))
    }
}

impl ViewExecutor for FileViews {
    fn execute(&self, name: &str, bindings: &Bindings) -> Result<Node, ViewError> {
        let path = self.path_for(name);
        let source = fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ViewError::NotFound(name.to_string()),
            _ => ViewError::invalid(name, err),
        })?;
        render_source(name, &source, bindings, &self.options)
    }
}

/// Templates kept in memory, keyed by name.
///
/// # Example
///
/// ```
/// # use trellis::{bindings::{Bindings, Value}, view::{InMemoryViews, ViewExecutor}};
/// let views = InMemoryViews::default().with_view("badge", "<span>{{ label }}</span>");
///
/// let mut bindings = Bindings::new();
/// bindings.insert("label".to_string(), Value::from("new"));
///
/// let node = views.execute("badge", &bindings).unwrap();
/// assert_eq!(node.text_content(), "new");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryViews {
    views: IndexMap<String, String>,
    options: ParseOptions,
}

impl InMemoryViews {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            views: IndexMap::new(),
            options,
        }
    }

    pub fn with_view(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.views.insert(name.into(), source.into());
    }

    /// Names of all stored templates.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }
}

impl ViewExecutor for InMemoryViews {
    fn execute(&self, name: &str, bindings: &Bindings) -> Result<Node, ViewError> {
        let source = self
            .views
            .get(name)
            .ok_or_else(|| ViewError::NotFound(name.to_string()))?;
        render_source(name, source, bindings, &self.options)
    }
}
