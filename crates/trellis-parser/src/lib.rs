//! # Trellis Parser
//!
//! Markup parser for Trellis. This crate turns component markup and view
//! templates into the [`trellis_core::Node`] tree the expander works on.
//!
//! ## Usage
//!
//! ```
//! # use trellis_parser::{parse, ParseOptions, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"<Card title="Intro"><Header name="Intro"/><br></Card>"#;
//!
//!     let root = parse(source, &ParseOptions::default())?;
//!     assert_eq!(root.name(), "Card");
//!     assert_eq!(root.elements().count(), 2);
//!     Ok(())
//! }
//! ```

mod entities;
pub mod error;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod span;
pub mod template;
mod tokens;

pub use span::Span;

use indexmap::IndexSet;
use log::debug;
use trellis_core::Node;

/// Elements that never have content or a closing tag.
pub const DEFAULT_VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Options controlling how markup is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    void_tags: IndexSet<String>,
}

impl ParseOptions {
    /// Options with a custom set of void elements.
    pub fn with_void_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            void_tags: tags
                .into_iter()
                .map(|tag| tag.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether `name` is a void element (ASCII case-insensitive).
    pub fn is_void(&self, name: &str) -> bool {
        self.void_tags.contains(name) || self.void_tags.contains(&name.to_ascii_lowercase())
    }

    pub fn void_tags(&self) -> &IndexSet<String> {
        &self.void_tags
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::with_void_tags(DEFAULT_VOID_TAGS)
    }
}

/// Parse markup source text into a tree with exactly one root element.
///
/// The pipeline has two steps:
///
/// 1. **Tokenize** - Split the source into tags, text and skippable constructs
/// 2. **Build** - Nest tokens into elements and check the document structure
///
/// Every problem found by a step is reported together in the returned
/// [`ParseError`](error::ParseError).
pub fn parse(source: &str, options: &ParseOptions) -> Result<Node, error::ParseError> {
    // Step 1: Tokenize
    let tokens = lexer::tokenize(source)?;
    debug!(tokens = tokens.len(); "Tokenized markup");

    // Step 2: Build
    parser::build_tree(tokens, options)
}
