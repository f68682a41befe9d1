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

//! Crate-level error type
//!
//! Wraps the error of every layer so callers mixing parsing, evaluation and
//! JSON conversion can use a single `?`.

use crate::diagnostics::Diagnostic;
use crate::evaluator::{EvaluationError, NotFoundError};
use crate::model::ModelError;
use crate::parser::SyntaxError;
use thiserror::Error;

/// Result type alias for tree path operations
pub type Result<T> = std::result::Result<T, TreePathError>;

/// Any error produced by this crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreePathError {
    /// Path text could not be parsed
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A traversal step matched nothing
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// List insertion failed
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// A JSON document could not be converted
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl TreePathError {
    /// Diagnostic pointing into the path text `source`.
    ///
    /// Model errors concern the document rather than the path, so they have
    /// no diagnostic.
    pub fn to_diagnostic(&self, source: &str) -> Option<Diagnostic> {
        match self {
            TreePathError::Syntax(err) => Some(err.to_diagnostic(source)),
            TreePathError::NotFound(err) => Some(err.to_diagnostic(source)),
            TreePathError::Evaluation(err) => Some(err.to_diagnostic(source)),
            TreePathError::Model(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;

    fn run(text: &str) -> Result<usize> {
        let path = crate::parse(text)?;
        let root = serde_json::json!({"a": [1]});
        let root = crate::Value::from_json(&root)?;
        Ok(path.get(&root)?.len())
    }

    #[test]
    fn test_question_mark_conversions() {
        assert_eq!(run("a[]"), Ok(1));
        assert!(matches!(run("a["), Err(TreePathError::Syntax(_))));
        assert!(matches!(run("b"), Err(TreePathError::NotFound(_))));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = run("b.c").unwrap_err();
        let diagnostic = err.to_diagnostic("b.c").unwrap();
        assert_eq!(diagnostic.code, DiagnosticCode::NothingFound);

        let err = TreePathError::from(ModelError::UnsupportedNull {
            location: "/a".to_string(),
        });
        assert!(err.to_diagnostic("a").is_none());
        assert_eq!(err.to_string(), "Cannot convert null at '/a' to a value");
    }
}
