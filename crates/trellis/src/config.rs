//! Configuration types for Trellis document expansion.
//!
//! This module provides configuration structures that control where view
//! templates are found, how BEM class names are generated, which elements
//! are void or kept when empty, and how HTML is written. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field is
//! optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`TemplateConfig`] - Template directory, file extension and name separator.
//! - [`ClassConfig`] - Class joiners, class length, skipped tags, scoping.
//! - [`MarkupConfig`] - Void tags, always-emitted tags, pass-through attributes.
//! - [`OutputConfig`] - Serializer flags.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.classes().joiner(), "__");
//! assert_eq!(config.classes().class_length(), 2);
//! ```

use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use trellis_core::naming::TagJoiner;
use trellis_parser::{DEFAULT_VOID_TAGS, ParseOptions};

const DEFAULT_CLASS_JOINER: &str = "__";

/// Tags that stay in the output even when they end up with no content.
const DEFAULT_EMPTY_TAGS: &[&str] = &["script", "textarea", "iframe", "canvas", "td", "th", "i"];

/// Top-level application configuration.
///
/// Groups the template, class, markup and output sections into a single
/// configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Template discovery section.
    #[serde(default)]
    templates: TemplateConfig,

    /// Class name generation section.
    #[serde(default)]
    classes: ClassConfig,

    /// Markup handling section.
    #[serde(default)]
    markup: MarkupConfig,

    /// HTML output section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        templates: TemplateConfig,
        classes: ClassConfig,
        markup: MarkupConfig,
        output: OutputConfig,
    ) -> Self {
        Self {
            templates,
            classes,
            markup,
            output,
        }
    }

    /// Returns the template configuration.
    pub fn templates(&self) -> &TemplateConfig {
        &self.templates
    }

    /// Returns the class configuration.
    pub fn classes(&self) -> &ClassConfig {
        &self.classes
    }

    /// Returns the markup configuration.
    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replace the template directory, keeping everything else.
    ///
    /// Used when the directory is given on the command line.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates.dir = dir.into();
        self
    }
}

/// Where view templates live and how their names are split.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory searched (non-recursively) for templates.
    dir: PathBuf,

    /// File extension of template files, without the dot.
    extension: String,

    /// Separator between the segments of a composite name (`card-header`).
    separator: String,
}

impl TemplateConfig {
    pub fn new(
        dir: impl Into<PathBuf>,
        extension: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            separator: separator.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The extension with any leading dots removed.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self::new("views", "view", "-")
    }
}

/// BEM class name generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    /// Joiner between class tokens (`card__title`).
    joiner: String,

    /// How words inside a single token are joined.
    tag_joiner: TagJoiner,

    /// Number of trailing tokens used for the default `class`.
    length: i64,

    /// Tags that never contribute a class token; `*` matches every tag.
    skip_tags: Vec<String>,

    /// Attribute marking a node or template root as a scope root.
    scope_attr: String,

    /// Nesting depth after which nodes are emitted without expansion.
    max_depth: usize,
}

impl ClassConfig {
    pub fn new(joiner: impl Into<String>, tag_joiner: TagJoiner, length: i64) -> Self {
        Self {
            joiner: joiner.into(),
            tag_joiner,
            length,
            ..Self::default()
        }
    }

    pub fn with_skip_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scope_attr(mut self, attr: impl Into<String>) -> Self {
        self.scope_attr = attr.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The class token joiner. An empty joiner falls back to `__`.
    pub fn joiner(&self) -> &str {
        if self.joiner.is_empty() {
            DEFAULT_CLASS_JOINER
        } else {
            &self.joiner
        }
    }

    pub fn tag_joiner(&self) -> &TagJoiner {
        &self.tag_joiner
    }

    /// The configured class length, at least 1.
    pub fn class_length(&self) -> usize {
        usize::try_from(self.length).unwrap_or(0).max(1)
    }

    pub fn skip_tags(&self) -> &[String] {
        &self.skip_tags
    }

    pub fn scope_attr(&self) -> &str {
        &self.scope_attr
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Log a warning for every setting that is corrected at use.
    pub fn warn_corrections(&self) {
        if self.length < 1 {
            warn!(length = self.length; "Class length must be positive, using 1");
        }
        if self.joiner.is_empty() {
            warn!(joiner = DEFAULT_CLASS_JOINER; "Class joiner must not be empty, using default");
        }
    }
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            joiner: DEFAULT_CLASS_JOINER.to_string(),
            tag_joiner: TagJoiner::default(),
            length: 2,
            skip_tags: Vec::new(),
            scope_attr: "scope".to_string(),
            max_depth: 64,
        }
    }
}

/// How markup elements are treated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Elements that never have content or a closing tag.
    void_tags: Vec<String>,

    /// Elements kept in the output even when empty, besides void elements.
    empty_tags: Vec<String>,

    /// Attributes copied from the component onto the template root when
    /// the root does not set them. `class` is always merged.
    pass_attrs: Vec<String>,
}

impl MarkupConfig {
    pub fn new(void_tags: Vec<String>, empty_tags: Vec<String>, pass_attrs: Vec<String>) -> Self {
        Self {
            void_tags,
            empty_tags,
            pass_attrs,
        }
    }

    pub fn void_tags(&self) -> &[String] {
        &self.void_tags
    }

    pub fn empty_tags(&self) -> &[String] {
        &self.empty_tags
    }

    pub fn pass_attrs(&self) -> &[String] {
        &self.pass_attrs
    }

    /// Whether `name` is a void element (ASCII case-insensitive).
    pub fn is_void(&self, name: &str) -> bool {
        self.void_tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
    }

    /// Whether an empty `name` element is still emitted.
    pub fn keeps_empty(&self, name: &str) -> bool {
        self.is_void(name)
            || self
                .empty_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(name))
    }

    /// Parser options matching these void tags.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::with_void_tags(&self.void_tags)
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            void_tags: DEFAULT_VOID_TAGS.iter().map(|tag| tag.to_string()).collect(),
            empty_tags: DEFAULT_EMPTY_TAGS.iter().map(|tag| tag.to_string()).collect(),
            pass_attrs: vec!["class".to_string()],
        }
    }
}

/// HTML serializer settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent element-only content by two spaces per level.
    format: bool,

    /// Write void elements as `<br>` instead of `<br></br>`.
    strip_void_closing: bool,

    /// Write `script` and `style` bodies without escaping.
    preserve_script_body: bool,
}

impl OutputConfig {
    pub fn new(format: bool, strip_void_closing: bool, preserve_script_body: bool) -> Self {
        Self {
            format,
            strip_void_closing,
            preserve_script_body,
        }
    }

    pub fn format(&self) -> bool {
        self.format
    }

    pub fn strip_void_closing(&self) -> bool {
        self.strip_void_closing
    }

    pub fn preserve_script_body(&self) -> bool {
        self.preserve_script_body
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(false, true, true)
    }
}
