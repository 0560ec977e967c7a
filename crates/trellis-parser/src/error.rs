//! Error and diagnostic system for the Trellis parser.
//!
//! Markup and template sources are user-authored, so parse failures are
//! reported as [`Diagnostic`]s carrying:
//! - an error code for documentation and searchability
//! - one or more labeled spans pointing into the source
//! - a severity level
//! - optional help text
//!
//! Multiple diagnostics from one pass are wrapped in a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use trellis_parser::error::{Diagnostic, ErrorCode};
//! # use trellis_parser::Span;
//!
//! let close = Span::new(20..27);
//! let open = Span::new(0..6);
//!
//! let diag = Diagnostic::error("closing tag `</span>` does not match `<div>`")
//!     .with_code(ErrorCode::E102)
//!     .with_label(close, "mismatched closing tag")
//!     .with_secondary_label(open, "element opened here")
//!     .with_help("close `<div>` with `</div>`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
