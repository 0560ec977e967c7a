//! Known template names.
//!
//! A [`TemplateCatalog`] holds the names of every template available to the
//! expander. Names containing the separator (`card-header`) are composite:
//! they only apply to a tag nested under the named ancestors and rank by
//! [`TagEntry::specificity`].

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, trace};

use crate::TrellisError;

/// A composite template name split into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    name: String,
    segments: Vec<String>,
}

impl TagEntry {
    fn new(name: &str, separator: &str) -> Self {
        Self {
            name: name.to_string(),
            segments: name
                .to_lowercase()
                .split(separator)
                .map(str::to_string)
                .collect(),
        }
    }

    /// The template name as found on disk.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased name segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of separators in the name.
    pub fn specificity(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

/// The set of templates the expander can resolve tags against.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    separator: String,
    /// Lowercased name to name as written.
    names: IndexMap<String, String>,
    composites: Vec<TagEntry>,
}

impl TemplateCatalog {
    /// Build a catalog from template names.
    ///
    /// # Example
    ///
    /// ```
    /// # use trellis::catalog::TemplateCatalog;
    /// let catalog = TemplateCatalog::from_names(["card", "card-header"], "-");
    /// assert!(catalog.contains("Card"));
    /// assert_eq!(catalog.composites()[0].specificity(), 1);
    /// ```
    pub fn from_names<I, S>(names: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self {
            separator: separator.to_string(),
            ..Self::default()
        };

        for name in names {
            let name = name.as_ref();
            if name.is_empty() {
                continue;
            }
            if catalog
                .names
                .insert(name.to_lowercase(), name.to_string())
                .is_some()
            {
                continue;
            }
            if !separator.is_empty() && name.contains(separator) {
                catalog.composites.push(TagEntry::new(name, separator));
            }
        }

        catalog.composites.sort_by(|a, b| {
            b.specificity()
                .cmp(&a.specificity())
                .then_with(|| a.name.cmp(&b.name))
        });

        catalog
    }

    /// List the `*.extension` files directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Catalog`] if the directory cannot be read.
    pub fn discover(dir: &Path, extension: &str, separator: &str) -> Result<Self, TrellisError> {
        let catalog_error = |source| TrellisError::Catalog {
            dir: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(catalog_error)? {
            let path = entry.map_err(catalog_error)?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != extension) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                trace!(template = stem; "Found template");
                names.push(stem.to_string());
            }
        }
        names.sort();

        let catalog = Self::from_names(&names, separator);
        debug!(
            dir:? = dir,
            templates = catalog.len(),
            composites = catalog.composites.len();
            "Discovered templates"
        );
        Ok(catalog)
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Whether a template named `name` exists (ASCII case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }

    /// The template name as written for a case-insensitive `name`.
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.names.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Composite entries, most specific first.
    pub fn composites(&self) -> &[TagEntry] {
        &self.composites
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
