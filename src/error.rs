//! Diagnostics: the non-aborting error channel used throughout translation.
//!
//! Every user-level failure during translation is recorded here rather than
//! propagated as a `Result::Err` — translation of sibling nodes continues
//! regardless. Programming faults (the implementation reaching a branch the
//! spec calls unreachable) are a separate channel and may panic.

use std::fmt::{self, Display, Formatter};

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::{Deserialize, Serialize};

/// A byte-offset span into the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}

/// One recorded diagnostic, tagged with the source location of the node that
/// raised it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub span: Option<Span>,
    pub message: String,
}

impl Diagnostic {
    pub fn new<S: Into<String>>(span: Option<Span>, message: S) -> Self {
        Diagnostic {
            span,
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

/// Per-compilation sink that diagnostics are appended to. Never clears
/// itself; a fresh one is created per `compile_expression` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    inner: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log<S: Into<String>>(&mut self, span: Option<Span>, message: S) {
        let message = message.into();
        log::debug!("diagnostic: {message}");
        self.inner.push(Diagnostic::new(span, message));
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.inner.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.inner
    }

    /// Render every diagnostic as a source-annotated report, the way the
    /// teacher's `ErrorMessage::composed` does for `prql-compiler`'s own
    /// errors. `source_id` and `source` are only used for the annotated
    /// rendering; callers without a source string get the plain `Display`
    /// form of each `Diagnostic`.
    pub fn render(&self, source_id: &str, source: &str) -> String {
        let mut out = String::new();
        for diag in &self.inner {
            let Some(span) = diag.span else {
                out.push_str(&diag.to_string());
                out.push('\n');
                continue;
            };

            let mut buf = Vec::new();
            let report = Report::build(ReportKind::Error, source_id, span.start)
                .with_message(&diag.message)
                .with_label(
                    Label::new((source_id, span.into()))
                        .with_message(&diag.message)
                        .with_color(Color::Red),
                )
                .finish();
            if report
                .write((source_id, Source::from(source)), &mut buf)
                .is_ok()
            {
                out.push_str(&String::from_utf8_lossy(&buf));
            } else {
                out.push_str(&diag.to_string());
                out.push('\n');
            }
        }
        out
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for d in &self.inner {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}
