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

//! Value tree model
//!
//! The dynamically typed tree that paths address, the subset-match predicate
//! used by filter nodes, and JSON conversion.

#![warn(missing_docs)]

pub mod error;
pub mod json;
pub mod pattern;
pub mod value;

pub use error::{ModelError, Result};
pub use pattern::{compound_matches, subset_matches};
pub use value::{Compound, Scalar, Value, ValueKind};
