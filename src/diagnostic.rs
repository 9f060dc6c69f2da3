//! Configuration diagnostics, rendered against the config file text.

use std::fmt;
use std::io;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::span::Span;

/// A problem found while reading `nestloop.toml`.
///
/// Spans are byte offsets into the file text; `Span::dummy()` marks a
/// problem with no location (an unreadable file, a failed pool build).
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl Diagnostic {
    fn new(severity: Severity, message: String, span: Span) -> Self {
        Self {
            severity,
            message,
            span,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn error(message: String, span: Span) -> Self {
        Self::new(Severity::Error, message, span)
    }

    pub fn warning(message: String, span: Span) -> Self {
        Self::new(Severity::Warning, message, span)
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Write an annotated excerpt of `source` to `out`.
    pub fn render_to<W: io::Write>(
        &self,
        filename: &str,
        source: &str,
        color: bool,
        out: W,
    ) -> io::Result<()> {
        let (kind, tint) = match self.severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };

        // Spans may come from an edited file; keep them inside the text.
        let start = (self.span.start as usize).min(source.len());
        let end = (self.span.end as usize).clamp(start, source.len());

        let mut report = Report::build(kind, filename, start)
            .with_config(Config::default().with_color(color))
            .with_message(&self.message);
        if end > start {
            report = report.with_label(
                Label::new((filename, start..end))
                    .with_message(self.severity.label())
                    .with_color(tint),
            );
        }
        for note in &self.notes {
            report = report.with_note(note);
        }
        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report.finish().write((filename, Source::from(source)), out)
    }

    /// Render to stderr with colour.
    pub fn render(&self, filename: &str, source: &str) {
        // Nothing useful can be done when stderr itself fails.
        let _ = self.render_to(filename, source, true, io::stderr());
    }
}

/// One-line form used when there is no source text to annotate.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.label(), self.message)?;
        if let Some(help) = &self.help {
            write!(f, " (help: {})", help)?;
        }
        Ok(())
    }
}

pub fn render_diagnostics(diagnostics: &[Diagnostic], filename: &str, source: &str) {
    for diag in diagnostics {
        diag.render(filename, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(diag: &Diagnostic, source: &str) -> String {
        let mut out = Vec::new();
        diag.render_to("nestloop.toml", source, false, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_builders() {
        let d = Diagnostic::warning("unknown key".to_string(), Span::new(0, 5))
            .with_note("ignored".to_string())
            .with_help("known keys: threads, policy".to_string());
        assert!(!d.is_error());
        assert_eq!(d.notes, vec!["ignored"]);
        assert_eq!(d.help.as_deref(), Some("known keys: threads, policy"));
    }

    #[test]
    fn test_display_is_one_line() {
        let d = Diagnostic::error("cannot start thread pool".to_string(), Span::dummy());
        assert_eq!(d.to_string(), "error: cannot start thread pool");

        let d = d.with_help("lower exec.threads".to_string());
        assert_eq!(
            d.to_string(),
            "error: cannot start thread pool (help: lower exec.threads)"
        );
    }

    #[test]
    fn test_render_mentions_message_and_help() {
        let source = "[exec]\nthreads = x\n";
        let d = Diagnostic::error("invalid exec.threads: 'x'".to_string(), Span::new(17, 18))
            .with_help("expected a positive integer".to_string());
        let text = plain(&d, source);
        assert!(text.contains("invalid exec.threads: 'x'"));
        assert!(text.contains("expected a positive integer"));
        assert!(text.contains("threads = x"));
    }

    #[test]
    fn test_render_clamps_span_past_end() {
        let source = "[exec]\nthreads = x\n";
        let d = Diagnostic::error("invalid exec.threads".to_string(), Span::new(17, 400));
        assert!(plain(&d, source).contains("invalid exec.threads"));
    }

    #[test]
    fn test_render_without_location() {
        let d = Diagnostic::error("cannot read config".to_string(), Span::dummy());
        assert!(plain(&d, "").contains("cannot read config"));
    }
}
