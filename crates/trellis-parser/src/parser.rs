//! Tree construction from markup tokens.
//!
//! This module turns the token stream from the [`lexer`](super::lexer) into
//! a single root [`Node`]. The public entry point is [`build_tree`].
//!
//! Construction keeps a stack of open elements. Void elements never open,
//! adjacent text runs are merged and structural problems (unclosed or
//! mismatched tags, missing or repeated roots) are collected as diagnostics
//! rather than aborting at the first one.

use trellis_core::tree::{Child, Node};

use crate::{
    ParseOptions,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{Attribute, PositionedToken, Token},
};

/// An element whose closing tag has not been seen yet.
struct OpenElement {
    node: Node,
    span: Span,
}

struct TreeBuilder<'o> {
    options: &'o ParseOptions,
    open: Vec<OpenElement>,
    roots: Vec<(Node, Span)>,
    diagnostics: DiagnosticCollector,
}

impl<'o> TreeBuilder<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            open: Vec::new(),
            roots: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn process(&mut self, token: PositionedToken<'_>) {
        let span = token.span;
        match token.token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.start_tag(name, attributes, self_closing, span),
            Token::EndTag(name) => self.end_tag(name, span),
            Token::Text(text) => self.append(Child::Text(text.into_owned()), span),
            Token::RawText(text) | Token::CData(text) => {
                self.append(Child::Text(text.to_string()), span)
            }
            Token::Comment(_) | Token::Declaration(_) | Token::ProcessingInstruction(_) => {}
        }
    }

    fn start_tag(
        &mut self,
        name: &str,
        attributes: Vec<Attribute<'_>>,
        self_closing: bool,
        span: Span,
    ) {
        let mut node = Node::new(name);
        for attribute in attributes {
            if node.attribute(attribute.name).is_some() {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("duplicate attribute `{}`", attribute.name))
                        .with_code(ErrorCode::E105)
                        .with_label(attribute.span, "ignored, the first value is kept"),
                );
                continue;
            }
            node.set_attribute(attribute.name, attribute.value);
        }

        if self_closing || self.options.is_void(name) {
            self.append(Child::Element(node), span);
        } else {
            self.open.push(OpenElement { node, span });
        }
    }

    fn end_tag(&mut self, name: &str, span: Span) {
        // `</br>` and friends carry no structure.
        if self.options.is_void(name) {
            return;
        }

        let position = self
            .open
            .iter()
            .rposition(|open| open.node.name().eq_ignore_ascii_case(name));

        let Some(position) = position else {
            let diagnostic = match self.open.last() {
                Some(innermost) => Diagnostic::error(format!(
                    "closing tag `</{name}>` does not match `<{}>`",
                    innermost.node.name()
                ))
                .with_code(ErrorCode::E102)
                .with_label(span, "mismatched closing tag")
                .with_secondary_label(innermost.span, "element opened here"),
                None => Diagnostic::error(format!("closing tag `</{name}>` has no open element"))
                    .with_code(ErrorCode::E106)
                    .with_label(span, "nothing to close"),
            };
            self.diagnostics.emit(diagnostic);
            return;
        };

        while self.open.len() > position + 1 {
            if let Some(unclosed) = self.open.last() {
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "closing tag `</{name}>` does not match `<{}>`",
                        unclosed.node.name()
                    ))
                    .with_code(ErrorCode::E102)
                    .with_label(span, "mismatched closing tag")
                    .with_secondary_label(unclosed.span, "element opened here")
                    .with_help(format!("add `</{}>` before `</{name}>`", unclosed.node.name())),
                );
            }
            self.close_innermost();
        }
        self.close_innermost();
    }

    fn close_innermost(&mut self) {
        if let Some(OpenElement { node, span }) = self.open.pop() {
            self.append(Child::Element(node), span);
        }
    }

    fn append(&mut self, child: Child, span: Span) {
        if let Some(parent) = self.open.last_mut() {
            let children = parent.node.children_mut();
            if let Child::Text(text) = &child {
                if let Some(Child::Text(previous)) = children.last_mut() {
                    previous.push_str(text);
                    return;
                }
            }
            children.push(child);
            return;
        }

        match child {
            Child::Element(node) => self.roots.push((node, span)),
            Child::Text(text) if text.trim().is_empty() => {}
            Child::Text(_) => self.diagnostics.emit(
                Diagnostic::error("text outside the root element")
                    .with_code(ErrorCode::E107)
                    .with_label(span, ErrorCode::E107.description())
                    .with_help("wrap the text in an element"),
            ),
        }
    }

    fn finish(mut self) -> Result<Node, ParseError> {
        while let Some(unclosed) = self.open.last() {
            let name = unclosed.node.name();
            self.diagnostics.emit(
                Diagnostic::error(format!("element `<{name}>` is never closed"))
                    .with_code(ErrorCode::E101)
                    .with_label(unclosed.span, "opened here")
                    .with_help(format!("add `</{name}>`")),
            );
            self.close_innermost();
        }

        let mut roots = self.roots.into_iter();
        let first = roots.next();
        for (_, span) in roots {
            self.diagnostics.emit(
                Diagnostic::error("multiple root elements")
                    .with_code(ErrorCode::E104)
                    .with_label(span, "additional root element")
                    .with_help("wrap the elements in a single parent"),
            );
        }

        let Some((root, _)) = first else {
            self.diagnostics.emit(
                Diagnostic::error("missing root element")
                    .with_code(ErrorCode::E103)
                    .with_label(Span::default(), ErrorCode::E103.description()),
            );
            return Err(self.diagnostics.into_error());
        };

        self.diagnostics.finish().map(|()| root)
    }
}

/// Build a tree from lexed tokens.
pub(crate) fn build_tree(
    tokens: Vec<PositionedToken<'_>>,
    options: &ParseOptions,
) -> Result<Node, ParseError> {
    let mut builder = TreeBuilder::new(options);
    for token in tokens {
        builder.process(token);
    }
    builder.finish()
}
