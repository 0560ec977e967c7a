//! HTML serialization.
//!
//! [`HtmlWriter`] turns a [`Node`] tree back into markup. Text escapes
//! `& < >`, attribute values also escape `"`, and non-ASCII characters are
//! written as literal UTF-8.

use trellis_core::{
    Child, Node,
    escape::{escape_attribute, escape_text},
};

use crate::config::{MarkupConfig, OutputConfig};

const INDENT: &str = "  ";

/// Elements whose body is raw text.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Writes trees as HTML according to the output settings.
///
/// # Example
///
/// ```
/// # use trellis::{config::{MarkupConfig, OutputConfig}, export::html::HtmlWriter};
/// # use trellis_core::Node;
/// let output = OutputConfig::default();
/// let markup = MarkupConfig::default();
/// let writer = HtmlWriter::new(&output, &markup);
///
/// let node = Node::new("p").with_text("a & b").with_child(Node::new("br"));
/// assert_eq!(writer.render(&node), "<p>a &amp; b<br></p>");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HtmlWriter<'a> {
    output: &'a OutputConfig,
    markup: &'a MarkupConfig,
}

impl<'a> HtmlWriter<'a> {
    pub fn new(output: &'a OutputConfig, markup: &'a MarkupConfig) -> Self {
        Self { output, markup }
    }

    /// Serialize `node` and its descendants.
    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.write_element(&mut out, node, 0, self.output.format());
        out
    }

    /// Serialize the children of `node` without the node itself.
    ///
    /// Always compact; used for the `yield` binding.
    pub fn render_inner(&self, node: &Node) -> String {
        let mut out = String::new();
        let raw = self.is_raw_text(node.name());
        for child in node.children() {
            self.write_child(&mut out, child, 0, false, raw);
        }
        out
    }

    fn is_raw_text(&self, name: &str) -> bool {
        self.output.preserve_script_body()
            && RAW_TEXT_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
    }

    fn write_open_tag(&self, out: &mut String, node: &Node) {
        out.push('<');
        out.push_str(node.name());
        for (key, value) in node.attributes() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');
    }

    fn write_element(&self, out: &mut String, node: &Node, depth: usize, format: bool) {
        self.write_open_tag(out, node);

        if self.markup.is_void(node.name()) && node.children().is_empty() {
            if !self.output.strip_void_closing() {
                out.push_str("</");
                out.push_str(node.name());
                out.push('>');
            }
            return;
        }

        let raw = self.is_raw_text(node.name());
        let block = format && !raw && node.has_element_children() && !node.has_text_content();

        if block {
            for child in node.children() {
                if matches!(child, Child::Text(_)) {
                    continue;
                }
                out.push('\n');
                out.push_str(&INDENT.repeat(depth + 1));
                self.write_child(out, child, depth + 1, format, raw);
            }
            out.push('\n');
            out.push_str(&INDENT.repeat(depth));
        } else {
            for child in node.children() {
                self.write_child(out, child, depth, false, raw);
            }
        }

        out.push_str("</");
        out.push_str(node.name());
        out.push('>');
    }

    fn write_child(&self, out: &mut String, child: &Child, depth: usize, format: bool, raw: bool) {
        match child {
            Child::Element(node) => self.write_element(out, node, depth, format),
            Child::Text(text) if raw => out.push_str(text),
            Child::Text(text) => out.push_str(&escape_text(text)),
        }
    }
}
