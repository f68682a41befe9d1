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

//! Recursive value tree addressed by paths
//!
//! A [`Value`] is an owned tree: compounds own their children, lists own their
//! elements. Cloning a value is therefore always a deep copy, and structural
//! equality (`==`) is deep equality.

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Named children of a compound, in insertion order
pub type Compound = IndexMap<String, Value>;

/// A node of the value tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Mapping from unique string keys to values
    Compound(Compound),
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Opaque leaf
    Scalar(Scalar),
}

/// Leaf values
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean leaf
    Bool(bool),
    /// Integer leaf
    Int(i64),
    /// Floating point leaf
    Float(f64),
    /// String leaf
    String(String),
}

/// The kind of a value, used in messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A compound
    Compound,
    /// A list
    List,
    /// A boolean scalar
    Bool,
    /// An integer scalar
    Int,
    /// A floating point scalar
    Float,
    /// A string scalar
    String,
}

impl Value {
    /// Create an empty compound
    pub fn compound() -> Self {
        Value::Compound(Compound::new())
    }

    /// Create an empty list
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    /// Create a string scalar
    pub fn string(value: impl Into<String>) -> Self {
        Value::Scalar(Scalar::String(value.into()))
    }

    /// Create an integer scalar
    pub fn int(value: i64) -> Self {
        Value::Scalar(Scalar::Int(value))
    }

    /// Create a float scalar
    pub fn float(value: f64) -> Self {
        Value::Scalar(Scalar::Float(value))
    }

    /// Create a boolean scalar
    pub fn bool(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }

    /// Check if this value is a compound
    pub fn is_compound(&self) -> bool {
        matches!(self, Value::Compound(_))
    }

    /// Check if this value is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Structural equality over the whole subtree
    pub fn deep_equals(&self, other: &Value) -> bool {
        self == other
    }

    /// Independent copy of the whole subtree
    pub fn deep_clone(&self) -> Value {
        self.clone()
    }

    /// Borrow as a compound
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// Borrow as a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a scalar
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Compound(_) => ValueKind::Compound,
            Value::List(_) => ValueKind::List,
            Value::Scalar(Scalar::Bool(_)) => ValueKind::Bool,
            Value::Scalar(Scalar::Int(_)) => ValueKind::Int,
            Value::Scalar(Scalar::Float(_)) => ValueKind::Float,
            Value::Scalar(Scalar::String(_)) => ValueKind::String,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Compound> for Value {
    fn from(compound: Compound) -> Self {
        Value::Compound(compound)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl FromStr for Value {
    type Err = crate::parser::SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_literal_str(s)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Compound => "compound",
            ValueKind::List => "list",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        };
        f.write_str(name)
    }
}

/// Characters a key or string may use without quoting
pub(crate) fn is_bare_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '+')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("\"")
}

fn write_key(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    if !key.is_empty() && key.chars().all(is_bare_char) {
        f.write_str(key)
    } else {
        write_quoted(f, key)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            // Debug keeps a fractional part so the literal reads back as a float
            Scalar::Float(value) => write!(f, "{value:?}"),
            Scalar::String(value) => write_quoted(f, value),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Compound(compound) => {
                f.write_str("{")?;
                for (i, (key, value)) in compound.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_key(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_str("}")
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Scalar(scalar) => write!(f, "{scalar}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_predicates() {
        assert!(Value::compound().is_compound());
        assert!(Value::list().is_list());
        assert!(!Value::int(1).is_list());
        assert_eq!(Value::float(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::string("a").kind().to_string(), "string");
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let mut inner = Compound::new();
        inner.insert("x".to_string(), Value::int(1));
        let original = Value::List(vec![Value::Compound(inner)]);

        let mut copy = original.deep_clone();
        if let Value::List(items) = &mut copy {
            items.push(Value::int(2));
        }

        assert!(!original.deep_equals(&copy));
        assert_eq!(original.as_list().map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_display_literal_syntax() {
        let mut compound = Compound::new();
        compound.insert("id".to_string(), Value::string("a\"b"));
        compound.insert("odd key".to_string(), Value::float(2.0));
        compound.insert(
            "items".to_string(),
            Value::List(vec![Value::int(1), Value::bool(true)]),
        );

        assert_eq!(
            Value::Compound(compound).to_string(),
            r#"{id:"a\"b","odd key":2.0,items:[1,true]}"#
        );
    }

    #[test]
    fn test_display_reads_back() {
        let text = r#"{name:"Steve",pos:[1.5,-2.0],tags:{a:true}}"#;
        let value: Value = text.parse().unwrap();
        assert_eq!(value.to_string().parse::<Value>().unwrap(), value);
    }
}
