// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Formatting diagnostics for different output formats

use super::diagnostic::Diagnostic;
#[cfg(feature = "terminal")]
use super::diagnostic::Severity;

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// Compact single-line format
    Compact,
}

/// Formatter for diagnostics
pub struct DiagnosticFormatter {
    format: Format,
    show_code: bool,
    #[cfg(feature = "terminal")]
    use_color: bool,
}

impl DiagnosticFormatter {
    /// Create a new formatter
    pub fn new(format: Format) -> Self {
        Self {
            format,
            show_code: true,
            #[cfg(feature = "terminal")]
            use_color: true,
        }
    }

    /// Set whether to show error codes
    pub fn with_code(mut self, show: bool) -> Self {
        self.show_code = show;
        self
    }

    /// Set whether to use color (terminal feature only)
    #[cfg(feature = "terminal")]
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Format a diagnostic
    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        match self.format {
            Format::Text => self.format_text(diagnostic),
            Format::Json => self.format_json(diagnostic),
            Format::Compact => self.format_compact(diagnostic),
        }
    }

    /// Format multiple diagnostics
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        match self.format {
            Format::Text => diagnostics
                .iter()
                .map(|d| self.format_text(d))
                .collect::<Vec<_>>()
                .join("\n"),
            Format::Json => serde_json::to_string_pretty(diagnostics)
                .unwrap_or_else(|_| format!("{diagnostics:?}")),
            Format::Compact => diagnostics
                .iter()
                .map(|d| self.format_compact(d))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn format_text(&self, diagnostic: &Diagnostic) -> String {
        let mut result = String::new();

        result.push_str(&self.header(diagnostic));
        if self.show_code {
            result.push_str(&format!(" [{}]", diagnostic.code_string()));
        }
        result.push('\n');

        if let Some(source) = &diagnostic.source_text {
            // Columns count characters, spans count bytes
            let column = char_count(source, diagnostic.span.start);
            let width = char_count(source, diagnostic.span.end)
                .saturating_sub(column)
                .max(1);

            result.push_str(&format!("  | {source}\n"));
            result.push_str("  | ");
            result.push_str(&" ".repeat(column));
            result.push_str(&self.underline(diagnostic, width));
            result.push('\n');
        } else {
            result.push_str(&format!(" --> {}\n", diagnostic.span));
        }

        if let Some(help) = &diagnostic.help {
            result.push_str(&format!("help: {help}\n"));
        }

        result
    }

    #[cfg(feature = "terminal")]
    fn header(&self, diagnostic: &Diagnostic) -> String {
        if self.use_color {
            use colored::Colorize;
            let severity_str = match diagnostic.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
                Severity::Info => "info".blue().bold(),
            };
            format!("{}: {}", severity_str, diagnostic.message.bold())
        } else {
            format!("{}: {}", diagnostic.severity, diagnostic.message)
        }
    }

    #[cfg(not(feature = "terminal"))]
    fn header(&self, diagnostic: &Diagnostic) -> String {
        format!("{}: {}", diagnostic.severity, diagnostic.message)
    }

    #[cfg(feature = "terminal")]
    fn underline(&self, diagnostic: &Diagnostic, width: usize) -> String {
        let underline = "^".repeat(width);
        if !self.use_color {
            return underline;
        }
        use colored::Colorize;
        match diagnostic.severity {
            Severity::Error => underline.red().to_string(),
            Severity::Warning => underline.yellow().to_string(),
            Severity::Info => underline.blue().to_string(),
        }
    }

    #[cfg(not(feature = "terminal"))]
    fn underline(&self, _diagnostic: &Diagnostic, width: usize) -> String {
        "^".repeat(width)
    }

    fn format_json(&self, diagnostic: &Diagnostic) -> String {
        serde_json::to_string_pretty(diagnostic).unwrap_or_else(|_| format!("{diagnostic:?}"))
    }

    fn format_compact(&self, diagnostic: &Diagnostic) -> String {
        let code = if self.show_code {
            format!("[{}] ", diagnostic.code_string())
        } else {
            String::new()
        };

        format!(
            "{}: {}: {}{}",
            diagnostic.span, diagnostic.severity, code, diagnostic.message
        )
    }
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::new(Format::Text)
    }
}

fn char_count(text: &str, byte_offset: usize) -> usize {
    let end = byte_offset.min(text.len());
    text.char_indices().take_while(|(i, _)| *i < end).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::diagnostic::{DiagnosticBuilder, DiagnosticCode, Span};

    fn plain(format: Format) -> DiagnosticFormatter {
        let formatter = DiagnosticFormatter::new(format);
        #[cfg(feature = "terminal")]
        let formatter = formatter.with_color(false);
        formatter
    }

    #[test]
    fn test_text_format_underlines_span() {
        let diagnostic = DiagnosticBuilder::error(DiagnosticCode::NothingFound)
            .with_message("Found no elements matching foo.bar")
            .with_span(Span::new(4, 7))
            .with_source_text("foo.bar.baz")
            .build();

        let output = plain(Format::Text).with_code(false).format(&diagnostic);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "error: Found no elements matching foo.bar");
        assert_eq!(lines[1], "  | foo.bar.baz");
        assert_eq!(lines[2], "  |     ^^^");
        assert!(lines[3].starts_with("help: "));
    }

    #[test]
    fn test_zero_width_span_gets_one_caret() {
        let diagnostic = DiagnosticBuilder::error(DiagnosticCode::UnexpectedEnd)
            .with_span(Span::point(4))
            .with_source_text("foo[")
            .build();

        let output = plain(Format::Text).format(&diagnostic);
        assert!(output.contains("  |     ^\n"));
        assert!(output.contains("[E003]"));
    }

    #[test]
    fn test_compact_format() {
        let diagnostic = DiagnosticBuilder::error(DiagnosticCode::InvalidNode)
            .with_span(Span::new(0, 1))
            .build();

        let output = plain(Format::Compact).format(&diagnostic);
        assert_eq!(output, "0..1: error: [E001] invalid path node");
    }

    #[test]
    fn test_json_format() {
        let diagnostic = DiagnosticBuilder::error(DiagnosticCode::TrailingInput)
            .with_span(Span::point(3))
            .build();

        let output = plain(Format::Json).format(&diagnostic);
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["span"]["start"], 3);
    }
}
