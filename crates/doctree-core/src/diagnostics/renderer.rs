//! Diagnostic renderer for terminal and JSON output

use std::env;
use std::fmt::Write;
use std::io::{self, IsTerminal};

use serde_json::json;
use text_size::TextSize;
use unicode_width::UnicodeWidthStr;

use super::{Diagnostic, Severity};
use crate::position::CommentOrigin;

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text with a source excerpt
    Text,
    /// JSON format for programmatic consumption
    Json,
    /// JSON with pretty-printing
    JsonPretty,
}

/// Renders diagnostics against the text they were found in.
///
/// Diagnostic ranges are comment-relative; the origin maps them into
/// `source`, which is the whole input. For a synthetic origin the ranges are
/// used as offsets into `source` directly.
pub struct DiagnosticRenderer {
    color_enabled: bool,
    output_format: OutputFormat,
}

/// 1-based line and column of an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineCol {
    line: usize,
    column: usize,
}

impl DiagnosticRenderer {
    /// Create a renderer with automatic terminal detection (text output)
    pub fn new() -> Self {
        Self {
            color_enabled: io::stdout().is_terminal() && env::var("NO_COLOR").is_err(),
            output_format: OutputFormat::Text,
        }
    }

    /// Create a renderer with colors disabled
    pub fn no_colors() -> Self {
        Self {
            color_enabled: false,
            output_format: OutputFormat::Text,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn render(
        &self,
        diagnostics: &[Diagnostic],
        source: &str,
        origin: &CommentOrigin,
        file_name: Option<&str>,
    ) -> String {
        match self.output_format {
            OutputFormat::Text => diagnostics
                .iter()
                .map(|diag| self.render_text(diag, source, origin, file_name))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let values: Vec<_> = diagnostics
                    .iter()
                    .map(|diag| Self::to_json(diag, source, origin, file_name))
                    .collect();
                let value = serde_json::Value::Array(values);
                let rendered = if self.output_format == OutputFormat::JsonPretty {
                    serde_json::to_string_pretty(&value)
                } else {
                    serde_json::to_string(&value)
                };
                rendered.unwrap_or_else(|_| "[]".to_string())
            }
        }
    }

    fn colorize(&self, text: &str, severity: Severity) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        let code = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Hint => "36",
            Severity::Info => "34",
        };
        format!("\x1b[{code}m{text}\x1b[0m")
    }

    fn render_text(
        &self,
        diag: &Diagnostic,
        source: &str,
        origin: &CommentOrigin,
        file_name: Option<&str>,
    ) -> String {
        let mut out = String::new();
        let header = format!("{}[{}]", diag.severity.as_str(), diag.code);
        let _ = writeln!(out, "{}: {}", self.colorize(&header, diag.severity), diag.message);

        let Some((start, end)) = file_span(diag, source, origin) else {
            return out;
        };
        let at = line_col(source, start);
        let _ = writeln!(
            out,
            "  --> {}:{}:{}",
            file_name.unwrap_or("<input>"),
            at.line,
            at.column
        );

        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[start..].find('\n').map_or(source.len(), |i| start + i);
        let line_text = &source[line_start..line_end];
        let gutter = at.line.to_string().len();
        let lead = UnicodeWidthStr::width(&source[line_start..start]);
        let marked_end = end.clamp(start, line_end);
        let width = UnicodeWidthStr::width(&source[start..marked_end]).max(1);

        let _ = writeln!(out, "{:gutter$} |", "");
        let _ = writeln!(out, "{} | {}", at.line, line_text);
        let _ = writeln!(
            out,
            "{:gutter$} | {:lead$}{}",
            "",
            "",
            self.colorize(&"^".repeat(width), diag.severity)
        );
        out
    }

    fn to_json(
        diag: &Diagnostic,
        source: &str,
        origin: &CommentOrigin,
        file_name: Option<&str>,
    ) -> serde_json::Value {
        let span = file_span(diag, source, origin);
        let at = span.map(|(start, _)| line_col(source, start));
        json!({
            "code": diag.code,
            "severity": diag.severity,
            "message": diag.message,
            "file": file_name,
            "start": span.map(|(start, _)| start),
            "end": span.map(|(_, end)| end),
            "line": at.map(|lc| lc.line),
            "column": at.map(|lc| lc.column),
        })
    }
}

impl Default for DiagnosticRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte span of a diagnostic in `source`, if it can be placed there.
fn file_span(diag: &Diagnostic, source: &str, origin: &CommentOrigin) -> Option<(usize, usize)> {
    let range = diag.range?;
    let map = |offset: TextSize| match origin {
        CommentOrigin::Synthetic => Some(offset),
        CommentOrigin::Source(_) => origin.source_pos(Some(offset)),
    };
    let start = usize::from(map(range.start())?);
    let end = usize::from(map(range.end()).unwrap_or(range.start()));
    if start > source.len() || !source.is_char_boundary(start) {
        return None;
    }
    let end = end.clamp(start, source.len());
    let end = if source.is_char_boundary(end) { end } else { start };
    Some((start, end))
}

fn line_col(source: &str, offset: usize) -> LineCol {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    LineCol {
        line,
        column: before[line_start..].chars().count() + 1,
    }
}
