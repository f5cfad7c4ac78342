//! Builder-pattern printer for rendering compile errors against their source.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::error::CompileError;

/// Builder for rendering a compile error with various options.
pub struct DiagnosticsPrinter<'e, 's> {
    error: &'e CompileError,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> DiagnosticsPrinter<'e, 's> {
    pub fn new(error: &'e CompileError) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return write!(w, "{}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let message = self.error.to_string();
        let range = adjust_range(self.error.span.clone(), source.len());

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range).label(&message));
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Widen empty spans to one character so the caret has something to point at.
fn adjust_range(range: Range<usize>, limit: usize) -> Range<usize> {
    let start = range.start.min(limit);
    let end = range.end.min(limit);

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

impl CompileError {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
