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

//! Parser configuration

/// Default nesting limit for literal compounds and lists
pub const DEFAULT_MAX_LITERAL_DEPTH: usize = 512;

/// Configuration for path and literal parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of compounds and lists inside a literal
    pub max_literal_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_literal_depth: DEFAULT_MAX_LITERAL_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Set the literal nesting limit
    pub fn with_max_literal_depth(mut self, depth: usize) -> Self {
        self.max_literal_depth = depth;
        self
    }
}
