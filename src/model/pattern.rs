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

//! Subset matching of filter patterns against candidate values

use super::value::{Compound, Value};

/// Check whether `candidate` contains everything `pattern` specifies.
///
/// - compound patterns require every pattern key to be present in the
///   candidate with a recursively matching value; extra keys are ignored
/// - list patterns require each pattern element to match the candidate
///   element at the same position; the candidate may be longer
/// - scalars match by equality
pub fn subset_matches(pattern: &Value, candidate: &Value) -> bool {
    match (pattern, candidate) {
        (Value::Compound(pattern), _) => compound_matches(pattern, candidate),
        (Value::List(pattern), Value::List(candidate)) => {
            pattern.len() <= candidate.len()
                && pattern
                    .iter()
                    .zip(candidate)
                    .all(|(expected, actual)| subset_matches(expected, actual))
        }
        (Value::List(_), _) => false,
        (Value::Scalar(expected), Value::Scalar(actual)) => expected == actual,
        (Value::Scalar(_), _) => false,
    }
}

/// [`subset_matches`] for a compound pattern
pub fn compound_matches(pattern: &Compound, candidate: &Value) -> bool {
    let Value::Compound(candidate) = candidate else {
        return false;
    };
    pattern.iter().all(|(key, expected)| {
        candidate
            .get(key)
            .is_some_and(|actual| subset_matches(expected, actual))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &str) -> Value {
        text.parse().unwrap()
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        assert!(subset_matches(&value("{id:a}"), &value("{id:a,count:3}")));
        assert!(!subset_matches(&value("{id:a}"), &value("{id:b,count:3}")));
        assert!(!subset_matches(&value("{id:a}"), &value("{count:3}")));
    }

    #[test]
    fn test_empty_compound_matches_any_compound() {
        assert!(subset_matches(&value("{}"), &value("{x:1}")));
        assert!(!subset_matches(&value("{}"), &value("[1]")));
        assert!(!subset_matches(&value("{}"), &value("1")));
    }

    #[test]
    fn test_nested_compounds() {
        let candidate = value("{a:{b:{c:1,d:2}},e:3}");
        assert!(subset_matches(&value("{a:{b:{c:1}}}"), &candidate));
        assert!(!subset_matches(&value("{a:{b:{c:2}}}"), &candidate));
    }

    #[test]
    fn test_lists_match_by_position() {
        let candidate = value("{pos:[1,2,3]}");
        assert!(subset_matches(&value("{pos:[1,2]}"), &candidate));
        assert!(subset_matches(&value("{pos:[]}"), &candidate));
        assert!(!subset_matches(&value("{pos:[2]}"), &candidate));
        assert!(!subset_matches(&value("{pos:[1,2,3,4]}"), &candidate));
    }

    #[test]
    fn test_scalars_compare_by_type_and_value() {
        assert!(subset_matches(&value("1"), &value("1")));
        assert!(!subset_matches(&value("1"), &value("1.0")));
        assert!(!subset_matches(&value("\"1\""), &value("1")));
    }
}
