//! Token definitions for markup lexing.
//!
//! The lexer produces one token per tag, text run, comment or declaration.
//! Text and attribute values are already entity-decoded; raw text inside
//! `script` and `style` is kept exactly as written.

use std::borrow::Cow;

use crate::span::Span;

/// An attribute as written inside a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'src> {
    pub name: &'src str,
    /// Decoded value; valueless attributes carry `""`.
    pub value: Cow<'src, str>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'src> {
    /// `<name attr="value">` or `<name/>`.
    StartTag {
        name: &'src str,
        attributes: Vec<Attribute<'src>>,
        self_closing: bool,
    },
    /// `</name>`.
    EndTag(&'src str),
    /// Character data with references decoded.
    Text(Cow<'src, str>),
    /// Body of a `script` or `style` element.
    RawText(&'src str),
    /// Contents of `<![CDATA[ ... ]]>`.
    CData(&'src str),
    /// Contents of `<!-- ... -->`.
    Comment(&'src str),
    /// `<!DOCTYPE ...>` and other `<! ... >` constructs.
    Declaration(&'src str),
    /// `<? ... ?>`.
    ProcessingInstruction(&'src str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}
