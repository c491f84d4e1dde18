//! Core diagnostic types: [`Diagnostic`], [`Label`], [`Severity`].

use std::fmt::{self, Write as _};

use crate::{ErrorCode, Span};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A labeled span into the signature text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with everything needed to explain a failure.
///
/// Unification failures have no source text, so they carry no labels; the
/// position inside the signature tree travels as a note instead.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Get the primary span (first primary label's span).
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Render against the signature text the spans point into.
    ///
    /// Each label prints the line holding its span with a caret underline.
    /// Labels whose span falls outside `source` are skipped.
    pub fn render(&self, source: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}[{}]: {}", self.severity, self.code, self.message);

        for label in &self.labels {
            let Some((line, column, width)) = locate(source, label.span) else {
                continue;
            };
            let marker = if label.is_primary { '^' } else { '-' };
            let _ = writeln!(out, "  |");
            let _ = writeln!(out, "  | {line}");
            let _ = writeln!(
                out,
                "  | {:column$}{} {}",
                "",
                marker.to_string().repeat(width),
                label.message,
            );
        }

        self.write_trailer(&mut out);
        out
    }

    fn write_trailer(&self, out: &mut String) {
        for note in &self.notes {
            let _ = writeln!(out, "  = note: {note}");
        }
        for suggestion in &self.suggestions {
            let _ = writeln!(out, "  = help: {suggestion}");
        }
    }
}

/// Find the line containing `span.start`, the column of the span within it
/// (in chars), and the underline width (at least one char, clipped to the
/// line).
fn locate(source: &str, span: Span) -> Option<(&str, usize, usize)> {
    let start = span.start as usize;
    let before = source.get(..start)?;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let rest = &source[line_start..];
    let line = rest.split('\n').next().unwrap_or(rest);
    let line_end = line_start + line.len();

    let column = source[line_start..start].chars().count();
    let end = (span.end as usize).clamp(start, line_end);
    let width = source.get(start..end).map_or(0, |s| s.chars().count()).max(1);

    Some((line, column, width))
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for note in &self.notes {
            writeln!(f, "  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            writeln!(f, "  = help: {suggestion}")?;
        }
        Ok(())
    }
}
