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

//! Path nodes and their per-step operations
//!
//! Every node kind supports the same four operations against one parent
//! value: read, read-or-create, write and delete. The evaluator applies a
//! node to each value produced by the previous step and collects the results
//! into a flat list.

use crate::model::{Compound, Value, compound_matches};
use indexmap::map::Entry;

/// One addressing step of a parsed path
#[derive(Debug, Clone, PartialEq)]
pub enum PathNode {
    /// Named child of a compound: `name`
    CompoundChild {
        /// Child key
        name: String,
    },
    /// Named child that must subset-match a pattern: `name{...}`
    MatchObject {
        /// Child key
        name: String,
        /// Filter the child must match
        pattern: Compound,
    },
    /// The current value itself, filtered: `{...}` as first node
    MatchRootObject {
        /// Filter the value must match
        pattern: Compound,
    },
    /// Every element of a list: `[]`
    AllElements,
    /// One list element, negative indices count from the end: `[i]`
    IndexedElement {
        /// Element index
        index: i64,
    },
    /// List elements that subset-match a pattern: `[{...}]`
    MatchElement {
        /// Filter elements must match
        pattern: Compound,
    },
}

impl PathNode {
    /// Container shape this node expects its parent to be.
    ///
    /// Used by the previous step to synthesize missing parents.
    pub fn preferred_parent(&self) -> Value {
        match self {
            PathNode::CompoundChild { .. }
            | PathNode::MatchObject { .. }
            | PathNode::MatchRootObject { .. } => Value::compound(),
            PathNode::AllElements
            | PathNode::IndexedElement { .. }
            | PathNode::MatchElement { .. } => Value::list(),
        }
    }

    /// Append the values this node addresses under `current`
    pub fn get<'v>(&self, current: &'v Value, results: &mut Vec<&'v Value>) {
        match (self, current) {
            (PathNode::CompoundChild { name }, Value::Compound(map)) => {
                results.extend(map.get(name));
            }
            (PathNode::MatchObject { name, pattern }, Value::Compound(map)) => {
                results.extend(
                    map.get(name)
                        .filter(|child| compound_matches(pattern, child)),
                );
            }
            (PathNode::MatchRootObject { pattern }, _) => {
                if compound_matches(pattern, current) {
                    results.push(current);
                }
            }
            (PathNode::AllElements, Value::List(items)) => results.extend(items),
            (PathNode::IndexedElement { index }, Value::List(items)) => {
                results.extend(resolve_index(*index, items.len()).map(|i| &items[i]));
            }
            (PathNode::MatchElement { pattern }, Value::List(items)) => {
                results.extend(items.iter().filter(|item| compound_matches(pattern, item)));
            }
            _ => {}
        }
    }

    /// Mutable counterpart of [`PathNode::get`]; never creates anything
    pub fn get_mut<'v>(&self, current: &'v mut Value, results: &mut Vec<&'v mut Value>) {
        match self {
            PathNode::MatchRootObject { pattern } => {
                if compound_matches(pattern, current) {
                    results.push(current);
                }
            }
            PathNode::CompoundChild { name } => {
                if let Value::Compound(map) = current {
                    results.extend(map.get_mut(name));
                }
            }
            PathNode::MatchObject { name, pattern } => {
                if let Value::Compound(map) = current {
                    results.extend(
                        map.get_mut(name)
                            .filter(|child| compound_matches(pattern, child)),
                    );
                }
            }
            PathNode::AllElements => {
                if let Value::List(items) = current {
                    results.extend(items.iter_mut());
                }
            }
            PathNode::IndexedElement { index } => {
                if let Value::List(items) = current {
                    if let Some(i) = resolve_index(*index, items.len()) {
                        results.extend(items.get_mut(i));
                    }
                }
            }
            PathNode::MatchElement { pattern } => {
                if let Value::List(items) = current {
                    results.extend(
                        items
                            .iter_mut()
                            .filter(|item| compound_matches(pattern, item)),
                    );
                }
            }
        }
    }

    /// Like [`PathNode::get`], but creates a missing child.
    ///
    /// Keyed children are created with `make_default`, filtered children with
    /// a copy of their pattern, and an empty list receives one
    /// `make_default` element for `[]`. Indexed elements and the root filter
    /// never create anything.
    pub fn get_or_create<'v>(
        &self,
        current: &'v mut Value,
        make_default: &dyn Fn() -> Value,
        results: &mut Vec<&'v mut Value>,
    ) {
        match self {
            PathNode::CompoundChild { name } => {
                if let Value::Compound(map) = current {
                    results.push(map.entry(name.clone()).or_insert_with(make_default));
                }
            }
            PathNode::MatchObject { name, pattern } => {
                if let Value::Compound(map) = current {
                    match map.entry(name.clone()) {
                        Entry::Vacant(slot) => {
                            results.push(slot.insert(Value::Compound(pattern.clone())));
                        }
                        Entry::Occupied(slot) => {
                            let child = slot.into_mut();
                            if compound_matches(pattern, child) {
                                results.push(child);
                            }
                        }
                    }
                }
            }
            PathNode::AllElements => {
                if let Value::List(items) = current {
                    if items.is_empty() {
                        items.insert(0, make_default());
                    }
                    results.extend(items.iter_mut());
                }
            }
            PathNode::MatchElement { pattern } => {
                if let Value::List(items) = current {
                    if !items.iter().any(|item| compound_matches(pattern, item)) {
                        items.push(Value::Compound(pattern.clone()));
                    }
                    results.extend(
                        items
                            .iter_mut()
                            .filter(|item| compound_matches(pattern, item)),
                    );
                }
            }
            PathNode::MatchRootObject { .. } | PathNode::IndexedElement { .. } => {
                self.get_mut(current, results);
            }
        }
    }

    /// Overwrite the values this node addresses under `current`.
    ///
    /// `make_value` is called once per written location so every location
    /// owns an independent value. Returns how many locations changed.
    pub fn set(&self, current: &mut Value, make_value: &mut dyn FnMut() -> Value) -> usize {
        match self {
            PathNode::CompoundChild { name } => {
                let Value::Compound(map) = current else {
                    return 0;
                };
                let value = make_value();
                if map.get(name) == Some(&value) {
                    0
                } else {
                    map.insert(name.clone(), value);
                    1
                }
            }
            PathNode::MatchObject { name, pattern } => {
                let Value::Compound(map) = current else {
                    return 0;
                };
                match map.get_mut(name) {
                    Some(child) if compound_matches(pattern, child) => replace(child, make_value()),
                    _ => 0,
                }
            }
            PathNode::MatchRootObject { .. } => 0,
            PathNode::AllElements => {
                let Value::List(items) = current else {
                    return 0;
                };
                if items.is_empty() {
                    items.push(make_value());
                    return 1;
                }
                let first = make_value();
                let unchanged = items.iter().filter(|item| **item == first).count();
                let changed = items.len() - unchanged;
                if changed == 0 {
                    return 0;
                }
                // All-or-nothing: the whole list is rewritten with fresh values
                let len = items.len();
                items.clear();
                items.push(first);
                items.extend((1..len).map(|_| make_value()));
                changed
            }
            PathNode::IndexedElement { index } => {
                let Value::List(items) = current else {
                    return 0;
                };
                match resolve_index(*index, items.len()) {
                    Some(i) => replace(&mut items[i], make_value()),
                    None => 0,
                }
            }
            PathNode::MatchElement { pattern } => {
                let Value::List(items) = current else {
                    return 0;
                };
                items
                    .iter_mut()
                    .filter(|item| compound_matches(pattern, item))
                    .map(|item| replace(item, make_value()))
                    .sum()
            }
        }
    }

    /// Delete the values this node addresses under `current`.
    ///
    /// Returns how many locations were removed.
    pub fn remove(&self, current: &mut Value) -> usize {
        match (self, current) {
            (PathNode::CompoundChild { name }, Value::Compound(map)) => {
                usize::from(map.shift_remove(name).is_some())
            }
            (PathNode::MatchObject { name, pattern }, Value::Compound(map)) => {
                if map
                    .get(name)
                    .is_some_and(|child| compound_matches(pattern, child))
                {
                    map.shift_remove(name);
                    1
                } else {
                    0
                }
            }
            (PathNode::AllElements, Value::List(items)) => {
                let removed = items.len();
                items.clear();
                removed
            }
            (PathNode::IndexedElement { index }, Value::List(items)) => {
                match resolve_index(*index, items.len()) {
                    Some(i) => {
                        items.remove(i);
                        1
                    }
                    None => 0,
                }
            }
            (PathNode::MatchElement { pattern }, Value::List(items)) => {
                let before = items.len();
                items.retain(|item| !compound_matches(pattern, item));
                before - items.len()
            }
            _ => 0,
        }
    }
}

/// Store `value` in `slot` unless it is already equal; returns 1 on change
fn replace(slot: &mut Value, value: Value) -> usize {
    if *slot == value {
        0
    } else {
        *slot = value;
        1
    }
}

/// Map a possibly negative index onto `0..len`
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}
