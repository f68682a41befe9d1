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

// Error types for path evaluation

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Span};
use crate::model::ValueKind;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// A traversal step produced no values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Found no elements matching {prefix}")]
pub struct NotFoundError {
    /// Path text up to and including the failing node
    pub prefix: String,
}

impl NotFoundError {
    /// Convert to a diagnostic underlining the failing prefix in `source`
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        DiagnosticBuilder::error(DiagnosticCode::NothingFound)
            .with_message(self.to_string())
            .with_span(Span::new(0, self.prefix.len()))
            .with_source_text(source)
            .build()
    }
}

/// Errors that can occur while inserting into lists
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// Parents could not be resolved
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Insert target is not a list
    #[error("Expected a list, got {found}")]
    ExpectedList {
        /// Kind of the value found instead
        found: ValueKind,
    },

    /// Insert position outside the list
    #[error("Invalid list index {index}")]
    InvalidIndex {
        /// The resolved position
        index: i64,
    },
}

impl EvaluationError {
    /// Convert to a diagnostic over `source`
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        let code = match self {
            EvaluationError::NotFound(err) => return err.to_diagnostic(source),
            EvaluationError::ExpectedList { .. } => DiagnosticCode::ExpectedList,
            EvaluationError::InvalidIndex { .. } => DiagnosticCode::IndexOutOfBounds,
        };
        DiagnosticBuilder::error(code)
            .with_message(self.to_string())
            .with_span(Span::new(0, source.len()))
            .with_source_text(source)
            .build()
    }
}
