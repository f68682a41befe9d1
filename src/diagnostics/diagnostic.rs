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

//! Core diagnostic types

use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Information - provides helpful information
    Info,
    /// Warning - may indicate a problem but doesn't prevent execution
    Warning,
    /// Error - prevents successful execution
    #[default]
    Error,
}

/// Diagnostic error codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    // Parsing errors
    /// Empty or malformed path node
    InvalidNode,
    /// Expected a specific character
    ExpectedToken(char),
    /// Input ended inside a construct
    UnexpectedEnd,
    /// Root filter used after the first node
    MisplacedFilter,
    /// Malformed integer
    InvalidNumber,
    /// Malformed literal
    InvalidLiteral,
    /// Literal nested too deeply
    TooDeep,
    /// Input left after the path
    TrailingInput,

    // Evaluation errors
    /// Traversal step produced no values
    NothingFound,
    /// Insert target is not a list
    ExpectedList,
    /// Insert position outside the list
    IndexOutOfBounds,
}

/// Byte range inside the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Zero-width span at a position
    pub fn point(position: usize) -> Self {
        Self::new(position, position)
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity of the diagnostic
    pub severity: Severity,
    /// Error code
    pub code: DiagnosticCode,
    /// Human-readable message
    pub message: String,
    /// Affected range of the source text
    pub span: Span,
    /// Path text the span refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// Simple contextual help message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(code: DiagnosticCode, severity: Severity, message: String, span: Span) -> Self {
        let help = Self::generate_help(&code);
        Self {
            severity,
            code,
            message,
            span,
            source_text: None,
            help,
        }
    }

    fn generate_help(code: &DiagnosticCode) -> Option<String> {
        match code {
            DiagnosticCode::InvalidNode => {
                Some("Path nodes are keys, \"quoted keys\", [index], [] or [{filter}]".to_string())
            }
            DiagnosticCode::ExpectedToken('.') => {
                Some("Separate keys with '.'".to_string())
            }
            DiagnosticCode::MisplacedFilter => Some(
                "Attach the filter to a key (key{...}) or an element ([{...}])".to_string(),
            ),
            DiagnosticCode::NothingFound => {
                Some("Check that every step of the path exists in the tree".to_string())
            }
            _ => None,
        }
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Get the diagnostic code as a string
    pub fn code_string(&self) -> &'static str {
        match &self.code {
            DiagnosticCode::InvalidNode => "E001",
            DiagnosticCode::ExpectedToken(_) => "E002",
            DiagnosticCode::UnexpectedEnd => "E003",
            DiagnosticCode::MisplacedFilter => "E004",
            DiagnosticCode::InvalidNumber => "E005",
            DiagnosticCode::InvalidLiteral => "E006",
            DiagnosticCode::TooDeep => "E007",
            DiagnosticCode::TrailingInput => "E008",
            DiagnosticCode::NothingFound => "E100",
            DiagnosticCode::ExpectedList => "E101",
            DiagnosticCode::IndexOutOfBounds => "E102",
        }
    }
}

/// Builder for diagnostics
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Start an error diagnostic
    pub fn error(code: DiagnosticCode) -> Self {
        let message = code.to_string();
        Self {
            diagnostic: Diagnostic::new(code, Severity::Error, message, Span::default()),
        }
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.diagnostic.message = message.into();
        self
    }

    /// Set the affected range
    pub fn with_span(mut self, span: Span) -> Self {
        self.diagnostic.span = span;
        self
    }

    /// Attach the source text the span refers to
    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.diagnostic.source_text = Some(text.into());
        self
    }

    /// Finish building
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            match self.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARN",
                Severity::Info => "INFO",
            },
            self.code,
            self.message
        )
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::InvalidNode => write!(f, "invalid path node"),
            DiagnosticCode::ExpectedToken(ch) => write!(f, "expected '{ch}'"),
            DiagnosticCode::UnexpectedEnd => write!(f, "unexpected end of input"),
            DiagnosticCode::MisplacedFilter => write!(f, "misplaced root filter"),
            DiagnosticCode::InvalidNumber => write!(f, "invalid number format"),
            DiagnosticCode::InvalidLiteral => write!(f, "invalid literal"),
            DiagnosticCode::TooDeep => write!(f, "literal nested too deeply"),
            DiagnosticCode::TrailingInput => write!(f, "trailing input"),
            DiagnosticCode::NothingFound => write!(f, "nothing found"),
            DiagnosticCode::ExpectedList => write!(f, "expected a list"),
            DiagnosticCode::IndexOutOfBounds => write!(f, "index out of bounds"),
        }
    }
}
