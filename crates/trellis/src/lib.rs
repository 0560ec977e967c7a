//! Trellis - Expand component markup into plain HTML.
//!
//! Parsing, template resolution, expansion, and HTML rendering for component
//! markup. Each custom tag is replaced by a view template chosen by its name
//! and position in the document, and every generated element receives BEM
//! class names derived from its component ancestry.

pub mod bindings;
pub mod catalog;
pub mod classes;
pub mod config;
pub mod expand;
pub mod export;
pub mod resolve;
pub mod view;

mod error;

pub use trellis_core::{Child, Node};

pub use error::TrellisError;

use log::{debug, info, trace, warn};

use catalog::TemplateCatalog;
use config::AppConfig;
use expand::{ExpandSettings, Expander};
use export::html::HtmlWriter;
use view::{FileViews, ViewExecutor};

/// Builder for parsing, expanding, and rendering Trellis documents.
///
/// This provides an API for processing documents through the parsing,
/// expansion, and rendering stages.
///
/// # Examples
///
/// ```rust
/// use trellis::{DocumentBuilder, catalog::TemplateCatalog, config::AppConfig, view::InMemoryViews};
///
/// let views = InMemoryViews::default()
///     .with_view("card", r#"<div class="card"><yield/></div>"#)
///     .with_view("card-header", "<h1>{{ name }}</h1>");
/// let catalog = TemplateCatalog::from_names(views.names(), "-");
/// let builder = DocumentBuilder::new(AppConfig::default(), catalog, views);
///
/// let html = builder
///     .compile(r#"<Card><Header name="Intro"/></Card>"#)
///     .expect("Failed to compile");
/// assert_eq!(html, r#"<div class="card"><h1 class="card__intro">Intro</h1></div>"#);
/// ```
pub struct DocumentBuilder<V = FileViews> {
    config: AppConfig,
    catalog: TemplateCatalog,
    views: V,
    settings: ExpandSettings,
}

impl DocumentBuilder<FileViews> {
    /// Create a builder reading templates from the configured directory.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including template and class settings
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Catalog`] if the template directory cannot be
    /// listed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use trellis::{DocumentBuilder, config::AppConfig};
    ///
    /// let config = AppConfig::default().with_template_dir("views");
    /// let builder = DocumentBuilder::from_config(config)
    ///     .expect("Failed to read templates");
    /// ```
    pub fn from_config(config: AppConfig) -> Result<Self, TrellisError> {
        let templates = config.templates();
        let catalog =
            TemplateCatalog::discover(templates.dir(), templates.extension(), templates.separator())?;
        let views = FileViews::new(
            templates.dir(),
            templates.extension(),
            config.markup().parse_options(),
        );
        Ok(Self::new(config, catalog, views))
    }
}

impl<V: ViewExecutor> DocumentBuilder<V> {
    /// Create a builder from a catalog and a view executor.
    pub fn new(config: AppConfig, catalog: TemplateCatalog, views: V) -> Self {
        let settings = ExpandSettings::from_config(&config);
        Self {
            config,
            catalog,
            views,
            settings,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Parse source markup into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Parse`] with the source attached when the
    /// markup is malformed or does not have exactly one root element.
    pub fn parse(&self, source: &str) -> Result<Node, TrellisError> {
        info!("Parsing document");

        let root = trellis_parser::parse(source, &self.config.markup().parse_options())
            .map_err(|err| TrellisError::new_parse_error(err, source))?;

        debug!(root = root.name(); "Document parsed successfully");
        trace!(root:?; "Parsed document");

        Ok(root)
    }

    /// Expand every component in `root`.
    ///
    /// Returns `None` when the whole document is pruned.
    pub fn expand(&self, root: Node) -> Option<Node> {
        info!(templates = self.catalog.len(); "Expanding components");
        Expander::new(&self.settings, &self.catalog, &self.views).expand(root)
    }

    /// Serialize a tree to HTML.
    pub fn render_html(&self, root: &Node) -> String {
        HtmlWriter::new(self.config.output(), self.config.markup()).render(root)
    }

    /// Parse, expand, and render `source`.
    ///
    /// A document pruned to nothing renders as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Parse`] for malformed input. Problems with
    /// individual components never fail the document.
    pub fn compile(&self, source: &str) -> Result<String, TrellisError> {
        let root = self.parse(source)?;
        let html = self
            .expand(root)
            .map(|root| self.render_html(&root))
            .unwrap_or_default();

        info!(bytes = html.len(); "Document rendered successfully");
        Ok(html)
    }

    /// Like [`compile`](Self::compile), but a failure produces the error
    /// message as the output.
    pub fn compile_or_message(&self, source: &str) -> String {
        self.compile(source).unwrap_or_else(|err| {
            warn!(err:% = err; "Document failed to compile");
            err.to_string()
        })
    }
}
