//! miette rendering for [`TrellisError`].
//!
//! Markup and view diagnostics keep their codes, labels and help text and
//! point into the document source. A parse failure with several
//! diagnostics becomes one report per diagnostic. I/O, configuration and
//! template directory errors are reported without source code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use trellis::TrellisError;
use trellis_parser::error::Diagnostic;

/// Adapter for a single markup diagnostic.
///
/// Wraps a [`Diagnostic`] together with the source it points into.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        if self.diag.severity().is_warning() {
            Some(miette::Severity::Warning)
        } else {
            Some(miette::Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`TrellisError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TrellisError::Io(_) => "trellis::io",
            TrellisError::Parse { .. } => return None,
            TrellisError::Config(_) => "trellis::config",
            TrellisError::Catalog { .. } => "trellis::catalog",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            TrellisError::Catalog { .. } => Some(Box::new(
                "set `templates.dir` in the configuration or pass `--templates`",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: trellis_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`TrellisError`] into a list of reportable errors.
///
/// [`TrellisError::Parse`] yields one [`Reportable`] per diagnostic; every
/// other variant yields a single one.
pub fn to_reportables(err: &TrellisError) -> Vec<Reportable<'_>> {
    match err {
        TrellisError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error, io, path::PathBuf};

    use trellis_parser::{ParseOptions, error::ErrorCode, parse, template::Template};

    use super::*;

    fn parse_failure(source: &str) -> TrellisError {
        let err = parse(source, &ParseOptions::default()).unwrap_err();
        TrellisError::new_parse_error(err, source)
    }

    fn code_of(reportable: &Reportable<'_>) -> Option<String> {
        reportable.code().map(|code| code.to_string())
    }

    fn primary_span(reportable: &Reportable<'_>) -> Option<(usize, usize)> {
        reportable
            .labels()?
            .find(|label| label.primary())
            .map(|label| (label.offset(), label.len()))
    }

    #[test]
    fn unclosed_element_points_at_start_tag() {
        let err = parse_failure("<div>");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let unclosed = &reportables[0];
        assert_eq!(code_of(unclosed).as_deref(), Some(ErrorCode::E101.as_str()));
        assert_eq!(unclosed.to_string(), "element `<div>` is never closed");
        assert_eq!(unclosed.severity(), Some(miette::Severity::Error));
        assert_eq!(primary_span(unclosed), Some((0, 5)));
        assert_eq!(
            unclosed.help().map(|help| help.to_string()).as_deref(),
            Some("add `</div>`")
        );
        assert!(unclosed.source_code().is_some());
    }

    #[test]
    fn every_extra_root_is_reported() {
        let err = parse_failure("<a></a><b></b><i></i>");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert!(
            reportables
                .iter()
                .all(|r| code_of(r).as_deref() == Some(ErrorCode::E104.as_str()))
        );
        assert_eq!(primary_span(&reportables[0]), Some((7, 3)));
        assert_eq!(primary_span(&reportables[1]), Some((14, 3)));
    }

    #[test]
    fn mismatched_close_has_secondary_label() {
        let err = parse_failure("<div><span></div>");

        let reportables = to_reportables(&err);
        let labels: Vec<_> = reportables[0].labels().unwrap().collect();

        assert_eq!(code_of(&reportables[0]).as_deref(), Some(ErrorCode::E102.as_str()));
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("mismatched closing tag"));
        assert!(labels[0].primary());
        assert_eq!(labels[1].label(), Some("element opened here"));
        assert!(!labels[1].primary());
    }

    #[test]
    fn duplicate_attribute_is_reported_as_warning() {
        let err = parse_failure(r#"<div id="a" id="b">"#);

        let reportables = to_reportables(&err);
        let codes: Vec<_> = reportables.iter().map(code_of).collect();
        assert_eq!(
            codes,
            vec![
                Some(ErrorCode::E105.as_str().to_string()),
                Some(ErrorCode::E101.as_str().to_string())
            ]
        );
        assert_eq!(reportables[0].severity(), Some(miette::Severity::Warning));
        assert_eq!(reportables[1].severity(), Some(miette::Severity::Error));
    }

    #[test]
    fn unterminated_placeholder_in_view() {
        let view = "<p>{{ title </p>";
        let err = TrellisError::new_parse_error(Template::parse(view).unwrap_err(), view);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(code_of(&reportables[0]).as_deref(), Some(ErrorCode::E200.as_str()));
        assert_eq!(primary_span(&reportables[0]).map(|(start, _)| start), Some(3));
    }

    #[test]
    fn catalog_error_suggests_template_option() {
        let err = TrellisError::Catalog {
            dir: PathBuf::from("views"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let reportable = &reportables[0];
        assert!(matches!(reportable, Reportable::Error(_)));
        assert_eq!(code_of(reportable).as_deref(), Some("trellis::catalog"));
        assert!(
            reportable
                .help()
                .is_some_and(|help| help.to_string().contains("--templates"))
        );
        assert!(reportable.source().is_some());
        assert!(reportable.labels().is_none());
    }

    #[test]
    fn config_error_has_no_source_code() {
        let err = TrellisError::Config("class length must be a number".to_string());

        let reportables = to_reportables(&err);
        assert_eq!(code_of(&reportables[0]).as_deref(), Some("trellis::config"));
        assert!(reportables[0].source_code().is_none());
        assert_eq!(
            reportables[0].to_string(),
            "Configuration error: class length must be a number"
        );
    }
}
