//! Error codes for the Trellis diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexical errors in markup
//! - `E1xx` - Tree structure errors
//! - `E2xx` - View template placeholder errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexical Errors (E0xx)
    // =========================================================================
    /// Unterminated comment.
    ///
    /// A `<!--` comment was opened but no `-->` follows.
    E001,

    /// Malformed tag.
    ///
    /// A tag was opened with `<name` but is not closed with `>` or `/>`.
    E002,

    /// Unterminated attribute value.
    ///
    /// A quoted attribute value is missing its closing quote.
    E003,

    /// Unterminated CDATA section.
    ///
    /// A `<![CDATA[` section has no matching `]]>`.
    E004,

    /// Unterminated declaration or processing instruction.
    ///
    /// A `<!…` or `<?…` construct runs to the end of the input.
    E005,

    // =========================================================================
    // Structure Errors (E1xx)
    // =========================================================================
    /// Unclosed element.
    ///
    /// The input ended while an element was still open.
    E101,

    /// Mismatched closing tag.
    ///
    /// A closing tag names an element other than the innermost open one.
    E102,

    /// Missing root element.
    ///
    /// The document contains no element at all.
    E103,

    /// Multiple root elements.
    ///
    /// A document must have exactly one top-level element.
    E104,

    /// Duplicate attribute.
    ///
    /// The same attribute is given twice on one element; the first wins.
    E105,

    /// Stray closing tag.
    ///
    /// A closing tag appears with no matching open element.
    E106,

    /// Text outside the root element.
    ///
    /// Non-whitespace text appears before or after the root element.
    E107,

    // =========================================================================
    // Template Errors (E2xx)
    // =========================================================================
    /// Unterminated placeholder.
    ///
    /// A `{{` placeholder has no closing `}}`.
    E200,

    /// Invalid placeholder name.
    ///
    /// Placeholder names must be non-empty and contain only letters,
    /// digits, `_`, `-` or `.`.
    E201,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
            ErrorCode::E107 => "E107",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated comment",
            ErrorCode::E002 => "malformed tag",
            ErrorCode::E003 => "unterminated attribute value",
            ErrorCode::E004 => "unterminated CDATA section",
            ErrorCode::E005 => "unterminated declaration",
            ErrorCode::E101 => "unclosed element",
            ErrorCode::E102 => "mismatched closing tag",
            ErrorCode::E103 => "missing root element",
            ErrorCode::E104 => "multiple root elements",
            ErrorCode::E105 => "duplicate attribute",
            ErrorCode::E106 => "stray closing tag",
            ErrorCode::E107 => "text outside root element",
            ErrorCode::E200 => "unterminated placeholder",
            ErrorCode::E201 => "invalid placeholder name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
