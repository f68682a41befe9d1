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

//! Parsed paths and their tree-level operations
//!
//! Evaluation folds each node over the list of values produced by the
//! previous node, starting from `[root]`. A [`Path`] is never modified by
//! evaluation, so one parsed path can be applied to any number of trees.

use super::error::{EvaluationError, EvaluationResult, NotFoundError};
use crate::ast::PathNode;
use crate::model::Value;
use crate::parser::{ParseResult, ParserConfig, PathParser, SyntaxError, TextCursor};
use std::fmt;
use std::str::FromStr;

/// An immutable, reusable sequence of path nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    text: String,
    nodes: Vec<PathNode>,
    /// Offset into `text` right after node `i`
    node_end_offsets: Vec<usize>,
}

impl Path {
    pub(crate) fn from_parts(
        text: String,
        nodes: Vec<PathNode>,
        node_end_offsets: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(nodes.len(), node_end_offsets.len());
        Self {
            text,
            nodes,
            node_end_offsets,
        }
    }

    /// Parse a complete path string
    pub fn parse(text: &str) -> ParseResult<Path> {
        crate::parser::parse(text)
    }

    /// Parse a path embedded in a larger input.
    ///
    /// Parsing stops before the first space, which stays unconsumed.
    pub fn parse_from(cursor: &mut TextCursor<'_>) -> ParseResult<Path> {
        Self::parse_from_with_config(cursor, &ParserConfig::default())
    }

    /// [`Path::parse_from`] with an explicit configuration
    pub fn parse_from_with_config(
        cursor: &mut TextCursor<'_>,
        config: &ParserConfig,
    ) -> ParseResult<Path> {
        PathParser::new(cursor, config).parse()
    }

    /// The source text, verbatim
    pub fn to_text(&self) -> &str {
        &self.text
    }

    /// The parsed nodes in evaluation order
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the path has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Source text up to and including node `ordinal`
    pub fn prefix_of(&self, ordinal: usize) -> &str {
        self.node_end_offsets
            .get(ordinal)
            .and_then(|end| self.text.get(..*end))
            .unwrap_or(&self.text)
    }

    fn not_found(&self, ordinal: usize) -> NotFoundError {
        NotFoundError {
            prefix: self.prefix_of(ordinal).to_string(),
        }
    }

    /// Collect every value the path addresses.
    ///
    /// Fails with the prefix of the first node that matched nothing.
    pub fn get<'v>(&self, root: &'v Value) -> Result<Vec<&'v Value>, NotFoundError> {
        let mut current = vec![root];
        for (ordinal, node) in self.nodes.iter().enumerate() {
            let mut results = Vec::new();
            for value in current {
                node.get(value, &mut results);
            }
            log::trace!("'{}' matched {} values", self.prefix_of(ordinal), results.len());
            if results.is_empty() {
                return Err(self.not_found(ordinal));
            }
            current = results;
        }
        Ok(current)
    }

    /// Number of values the path addresses; `0` where [`Path::get`] fails
    pub fn count_matching(&self, root: &Value) -> usize {
        self.get(root).map_or(0, |values| values.len())
    }

    /// Resolve the parents of the last node, creating missing containers.
    ///
    /// Each missing intermediate value is created in the shape the following
    /// node expects (a compound for keys, a list for indices and elements).
    pub fn get_or_create_parents<'v>(
        &self,
        root: &'v mut Value,
    ) -> Result<Vec<&'v mut Value>, NotFoundError> {
        let mut current = vec![root];
        for (ordinal, pair) in self.nodes.windows(2).enumerate() {
            let (node, next) = (&pair[0], &pair[1]);
            let make_parent = || next.preferred_parent();
            let mut results = Vec::new();
            for value in current {
                node.get_or_create(value, &make_parent, &mut results);
            }
            log::trace!("'{}' resolved {} parents", self.prefix_of(ordinal), results.len());
            if results.is_empty() {
                return Err(self.not_found(ordinal));
            }
            current = results;
        }
        Ok(current)
    }

    /// Resolve every addressed value, creating missing ones with `make_value`
    pub fn get_or_create<'v, F>(
        &self,
        root: &'v mut Value,
        make_value: F,
    ) -> Result<Vec<&'v mut Value>, NotFoundError>
    where
        F: Fn() -> Value,
    {
        let Some(leaf) = self.nodes.last() else {
            return Ok(vec![root]);
        };
        let mut results = Vec::new();
        for parent in self.get_or_create_parents(root)? {
            leaf.get_or_create(parent, &make_value, &mut results);
        }
        Ok(results)
    }

    /// [`Path::get_or_create`] creating copies of `value`
    pub fn get_or_create_value<'v>(
        &self,
        root: &'v mut Value,
        value: &Value,
    ) -> Result<Vec<&'v mut Value>, NotFoundError> {
        self.get_or_create(root, || value.clone())
    }

    /// Write the addressed locations, creating missing parents.
    ///
    /// `make_value` is called for every written location, so no two
    /// locations share a value. Returns how many locations changed.
    pub fn set<F>(&self, root: &mut Value, mut make_value: F) -> Result<usize, NotFoundError>
    where
        F: FnMut() -> Value,
    {
        let Some(leaf) = self.nodes.last() else {
            return Ok(0);
        };
        let changed = self
            .get_or_create_parents(root)?
            .into_iter()
            .map(|parent| leaf.set(parent, &mut make_value))
            .sum();
        log::debug!("set '{}' changed {changed} locations", self.text);
        Ok(changed)
    }

    /// [`Path::set`] writing copies of `value`
    pub fn set_value(&self, root: &mut Value, value: &Value) -> Result<usize, NotFoundError> {
        self.set(root, || value.clone())
    }

    /// Delete the addressed locations.
    ///
    /// Never creates anything and never fails: a path that matches nothing
    /// removes `0` locations.
    pub fn remove(&self, root: &mut Value) -> usize {
        let Some((leaf, parent_nodes)) = self.nodes.split_last() else {
            return 0;
        };
        let mut current = vec![root];
        for node in parent_nodes {
            let mut results = Vec::new();
            for value in current {
                node.get_mut(value, &mut results);
            }
            if results.is_empty() {
                return 0;
            }
            current = results;
        }
        let removed = current.into_iter().map(|parent| leaf.remove(parent)).sum();
        log::debug!("remove '{}' removed {removed} locations", self.text);
        removed
    }

    /// Insert copies of `values` into every list the path addresses.
    ///
    /// Missing targets are created as empty lists. A negative `index` counts
    /// from the end, `-1` meaning after the last element. Returns how many
    /// lists received values.
    pub fn insert(&self, index: i64, root: &mut Value, values: &[Value]) -> EvaluationResult<usize> {
        let mut changed = 0;
        for target in self.get_or_create(root, Value::list)? {
            let found = target.kind();
            let Value::List(items) = target else {
                return Err(EvaluationError::ExpectedList { found });
            };

            let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let mut position = if index < 0 { len + index + 1 } else { index };
            for value in values {
                let slot = usize::try_from(position)
                    .ok()
                    .filter(|slot| *slot <= items.len())
                    .ok_or(EvaluationError::InvalidIndex { index: position })?;
                items.insert(slot, value.clone());
                position += 1;
            }
            if !values.is_empty() {
                changed += 1;
            }
        }
        log::debug!("insert into '{}' changed {changed} lists", self.text);
        Ok(changed)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Path {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}
