//! Unit tests for markup tree construction.
//!
//! These tests run the full tokenize and build pipeline and check both the
//! produced trees and the diagnostics reported for malformed documents.

use proptest::prelude::*;
use trellis_core::{
    Child, Node,
    escape::{escape_attribute, escape_text},
};

use crate::{
    ParseOptions,
    error::{ErrorCode, Severity},
    parse,
};

fn parse_default(source: &str) -> Node {
    match parse(source, &ParseOptions::default()) {
        Ok(node) => node,
        Err(err) => panic!("Expected parsing to succeed, but got error: {err}"),
    }
}

fn error_codes(source: &str) -> Vec<ErrorCode> {
    let err = parse(source, &ParseOptions::default()).expect_err("Expected parsing to fail");
    err.diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.severity() == Severity::Error)
        .filter_map(|diagnostic| diagnostic.code())
        .collect()
}

fn child_names(node: &Node) -> Vec<&str> {
    node.elements().map(Node::name).collect()
}

#[test]
fn test_nested_elements_and_attributes() {
    let root = parse_default(r#"<Card title="Intro"><Header name="Intro"/><p>Body</p></Card>"#);

    assert_eq!(root.name(), "Card");
    assert_eq!(root.attribute("title"), Some("Intro"));
    assert_eq!(child_names(&root), vec!["Header", "p"]);

    let header = root.elements().next().unwrap();
    assert_eq!(header.attribute("name"), Some("Intro"));
    assert!(header.children().is_empty());
}

#[test]
fn test_void_tags_need_no_closing_tag() {
    let root = parse_default(r#"<div><br><img src="a.png"><p>x</p></div>"#);
    assert_eq!(child_names(&root), vec!["br", "img", "p"]);
}

#[test]
fn test_void_closing_tags_are_ignored() {
    let root = parse_default("<div><br></br><hr/></div>");
    assert_eq!(child_names(&root), vec!["br", "hr"]);
}

#[test]
fn test_custom_void_tags() {
    let options = ParseOptions::with_void_tags(["Slot"]);
    let root = parse("<div><slot><p>x</p></div>", &options).unwrap();

    assert_eq!(child_names(&root), vec!["slot", "p"]);
    assert!(options.is_void("SLOT"));
    assert!(!options.is_void("br"));
}

#[test]
fn test_closing_tags_are_case_insensitive() {
    let root = parse_default("<Card><Title>x</title></CARD>");
    assert_eq!(root.name(), "Card");
    assert_eq!(child_names(&root), vec!["Title"]);
}

#[test]
fn test_text_runs_are_merged() {
    let root = parse_default("<p>a<![CDATA[<b>]]>c &amp; d<!-- gone -->e</p>");

    assert_eq!(root.children(), &[Child::Text("a<b>c & de".to_string())]);
}

#[test]
fn test_document_wrappers_are_skipped() {
    let root = parse_default(
        "<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<!-- page -->\n<html><body>hi</body></html>\n",
    );

    assert_eq!(root.name(), "html");
    assert_eq!(root.text_content(), "hi");
}

#[test]
fn test_numeric_references_decode_to_utf8() {
    let root = parse_default("<p>Gr&#252;&#xDF;e</p>");
    assert_eq!(root.text_content(), "Grüße");
}

#[test]
fn test_script_body_is_kept_verbatim() {
    let root = parse_default("<div><script>if (a < b) { x(\"&amp;\") }</script></div>");
    let script = root.elements().next().unwrap();

    assert_eq!(script.text_content(), "if (a < b) { x(\"&amp;\") }");
}

#[test]
fn test_duplicate_attribute_keeps_first_value() {
    let root = parse_default(r#"<div id="a" id="b" class="x"></div>"#);

    assert_eq!(root.attribute("id"), Some("a"));
    assert_eq!(root.attributes().len(), 2);
}

#[test]
fn test_unclosed_elements() {
    assert_eq!(error_codes("<div><p>"), vec![ErrorCode::E101, ErrorCode::E101]);
}

#[test]
fn test_mismatched_closing_tag() {
    assert_eq!(error_codes("<div><span>x</div>"), vec![ErrorCode::E102]);
    assert_eq!(error_codes("<div></p></div>"), vec![ErrorCode::E102]);
}

#[test]
fn test_mismatched_closing_tag_labels() {
    let err = parse("<div><span>x</div>", &ParseOptions::default()).unwrap_err();
    let diagnostic = &err.diagnostics()[0];

    assert_eq!(diagnostic.labels().len(), 2);
    assert_eq!(diagnostic.labels()[0].span().start(), 12);
    assert_eq!(diagnostic.labels()[1].span().start(), 5);
    assert_eq!(diagnostic.help(), Some("add `</span>` before `</div>`"));
}

#[test]
fn test_stray_closing_tag() {
    assert_eq!(error_codes("<div></div></p>"), vec![ErrorCode::E106]);
}

#[test]
fn test_root_element_count() {
    assert_eq!(error_codes(""), vec![ErrorCode::E103]);
    assert_eq!(error_codes("  <!-- only -->  "), vec![ErrorCode::E103]);
    assert_eq!(error_codes("<a></a><b></b>"), vec![ErrorCode::E104]);
}

#[test]
fn test_text_outside_root() {
    assert_eq!(error_codes("text<div></div>"), vec![ErrorCode::E107]);
}

#[test]
fn test_lexer_errors_stop_before_building() {
    assert_eq!(error_codes("<div><!-- open"), vec![ErrorCode::E001]);
}

fn serialize(node: &Node, out: &mut String) {
    out.push('<');
    out.push_str(node.name());
    for (key, value) in node.attributes() {
        out.push_str(&format!(" {key}=\"{}\"", escape_attribute(value)));
    }
    out.push('>');
    for child in node.children() {
        match child {
            Child::Element(element) => serialize(element, out),
            Child::Text(text) => out.push_str(&escape_text(text)),
        }
    }
    out.push_str(&format!("</{}>", node.name()));
}

fn tree_strategy() -> impl Strategy<Value = Node> {
    let leaf = ("[a-z]{1,6}", "[a-z]{1,8}")
        .prop_map(|(name, text)| Node::new(format!("x-{name}")).with_text(text));

    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            "[a-z]{1,6}",
            prop::collection::vec(inner, 0..4),
            prop::collection::btree_map("[a-z]{1,5}", "[a-z0-9 &<>\"']{0,6}", 0..3),
        )
            .prop_map(|(name, children, attributes)| {
                let mut node = Node::new(format!("x-{name}"));
                for (key, value) in attributes {
                    node.set_attribute(format!("data-{key}"), value);
                }
                for child in children {
                    node = node.with_child(child);
                }
                node
            })
    })
}

proptest! {
    #[test]
    fn prop_serialized_trees_parse_back(tree in tree_strategy()) {
        let mut source = String::new();
        serialize(&tree, &mut source);

        let parsed = parse(&source, &ParseOptions::default()).unwrap();
        prop_assert_eq!(parsed, tree);
    }
}
