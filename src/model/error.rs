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

//! Error types for the value model

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised when converting foreign data into the value tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// JSON null has no counterpart in the value tree
    #[error("Cannot convert null at '{location}' to a value")]
    UnsupportedNull {
        /// JSON pointer of the null
        location: String,
    },

    /// Number that fits neither an integer nor a float
    #[error("Cannot convert number {number} at '{location}' to a value")]
    UnsupportedNumber {
        /// Textual form of the number
        number: String,
        /// JSON pointer of the number
        location: String,
    },
}
