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

//! Parser error types

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Span};
use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Syntax error with the cursor position where parsing stopped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// Empty key, malformed bracket body or empty path
    #[error("Invalid path node at position {position}: {message}")]
    InvalidNode {
        /// Position where the node starts
        position: usize,
        /// What was wrong with the node
        message: String,
    },

    /// A specific character was required
    #[error("Expected '{expected}' at position {position}{}", found.map(|c| format!(", found '{c}'")).unwrap_or_default())]
    Expected {
        /// The required character
        expected: char,
        /// The character found instead, `None` at end of input
        found: Option<char>,
        /// Position where the character was expected
        position: usize,
    },

    /// Input ended inside a construct
    #[error("Unexpected end of input at position {position} while reading {context}")]
    UnexpectedEnd {
        /// Position of the end of input
        position: usize,
        /// What was being read
        context: &'static str,
    },

    /// `{...}` standalone filter after the first node
    #[error("Root filter at position {position} is only allowed as the first path node")]
    MisplacedRootFilter {
        /// Position of the opening brace
        position: usize,
    },

    /// Index body that is not an integer
    #[error("Invalid integer at position {position}: '{text}'")]
    InvalidInteger {
        /// The text that failed to parse
        text: String,
        /// Position where the integer starts
        position: usize,
    },

    /// Malformed literal value
    #[error("Invalid literal at position {position}: {message}")]
    InvalidLiteral {
        /// What was wrong with the literal
        message: String,
        /// Position where the problem was found
        position: usize,
    },

    /// Literal nested deeper than the configured limit
    #[error("Literal nested deeper than {limit} levels at position {position}")]
    TooDeep {
        /// The configured depth limit
        limit: usize,
        /// Position of the container that exceeded the limit
        position: usize,
    },

    /// Input left over after a complete path
    #[error("Unexpected trailing input at position {position}")]
    TrailingInput {
        /// Position where the path ended
        position: usize,
    },
}

impl SyntaxError {
    /// Cursor position the error refers to
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::InvalidNode { position, .. }
            | SyntaxError::Expected { position, .. }
            | SyntaxError::UnexpectedEnd { position, .. }
            | SyntaxError::MisplacedRootFilter { position }
            | SyntaxError::InvalidInteger { position, .. }
            | SyntaxError::InvalidLiteral { position, .. }
            | SyntaxError::TooDeep { position, .. }
            | SyntaxError::TrailingInput { position } => *position,
        }
    }

    /// Human-readable reason without the position
    pub fn reason(&self) -> String {
        match self {
            SyntaxError::InvalidNode { message, .. } => format!("invalid path node: {message}"),
            SyntaxError::Expected {
                expected,
                found: Some(found),
                ..
            } => format!("expected '{expected}', found '{found}'"),
            SyntaxError::Expected { expected, .. } => {
                format!("expected '{expected}' before end of input")
            }
            SyntaxError::UnexpectedEnd { context, .. } => {
                format!("unexpected end of input while reading {context}")
            }
            SyntaxError::MisplacedRootFilter { .. } => {
                "root filter is only allowed as the first path node".to_string()
            }
            SyntaxError::InvalidInteger { text, .. } => format!("invalid integer '{text}'"),
            SyntaxError::InvalidLiteral { message, .. } => format!("invalid literal: {message}"),
            SyntaxError::TooDeep { limit, .. } => {
                format!("literal nested deeper than {limit} levels")
            }
            SyntaxError::TrailingInput { .. } => "unexpected trailing input".to_string(),
        }
    }

    pub(crate) fn invalid_node(position: usize, message: impl Into<String>) -> Self {
        SyntaxError::InvalidNode {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_literal(position: usize, message: impl Into<String>) -> Self {
        SyntaxError::InvalidLiteral {
            message: message.into(),
            position,
        }
    }

    /// Convert to a diagnostic pointing into `source`
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        let code = match self {
            SyntaxError::InvalidNode { .. } => DiagnosticCode::InvalidNode,
            SyntaxError::Expected { expected, .. } => DiagnosticCode::ExpectedToken(*expected),
            SyntaxError::UnexpectedEnd { .. } => DiagnosticCode::UnexpectedEnd,
            SyntaxError::MisplacedRootFilter { .. } => DiagnosticCode::MisplacedFilter,
            SyntaxError::InvalidInteger { .. } => DiagnosticCode::InvalidNumber,
            SyntaxError::InvalidLiteral { .. } => DiagnosticCode::InvalidLiteral,
            SyntaxError::TooDeep { .. } => DiagnosticCode::TooDeep,
            SyntaxError::TrailingInput { .. } => DiagnosticCode::TrailingInput,
        };
        let start = self.position();
        let end = match self {
            SyntaxError::InvalidInteger { text, .. } => start + text.len(),
            SyntaxError::TrailingInput { .. } => source.len(),
            _ => start,
        };

        DiagnosticBuilder::error(code)
            .with_message(self.reason())
            .with_span(Span::new(start, end))
            .with_source_text(source)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_and_reason() {
        let err = SyntaxError::Expected {
            expected: ']',
            found: None,
            position: 4,
        };
        assert_eq!(err.position(), 4);
        assert_eq!(err.reason(), "expected ']' before end of input");
        assert_eq!(err.to_string(), "Expected ']' at position 4");
    }

    #[test]
    fn test_trailing_input_diagnostic_spans_rest() {
        let diagnostic = SyntaxError::TrailingInput { position: 3 }.to_diagnostic("foo bar");
        assert_eq!(diagnostic.span, Span::new(3, 7));
        assert_eq!(diagnostic.code, DiagnosticCode::TrailingInput);
    }
}
