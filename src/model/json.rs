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

//! Conversion between value trees and `serde_json` documents

use super::error::{ModelError, Result};
use super::value::{Compound, Scalar, Value};
use serde_json::{Map, Number, Value as JsonValue};

impl Value {
    /// Build a value tree from a JSON document
    pub fn from_json(json: &JsonValue) -> Result<Value> {
        convert_json(json, &mut String::new())
    }

    /// Render this value tree as a JSON document
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Compound(compound) => JsonValue::Object(
                compound
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Scalar(Scalar::Bool(value)) => JsonValue::Bool(*value),
            Value::Scalar(Scalar::Int(value)) => JsonValue::Number((*value).into()),
            Value::Scalar(Scalar::Float(value)) => Number::from_f64(*value)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Scalar(Scalar::String(value)) => JsonValue::String(value.clone()),
        }
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = ModelError;

    fn try_from(json: JsonValue) -> Result<Self> {
        Value::from_json(&json)
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}

fn convert_json(json: &JsonValue, pointer: &mut String) -> Result<Value> {
    match json {
        JsonValue::Null => Err(ModelError::UnsupportedNull {
            location: pointer.clone(),
        }),
        JsonValue::Bool(value) => Ok(Value::bool(*value)),
        JsonValue::Number(number) => {
            if let Some(value) = number.as_i64() {
                Ok(Value::int(value))
            } else if let Some(value) = number.as_f64() {
                Ok(Value::float(value))
            } else {
                Err(ModelError::UnsupportedNumber {
                    number: number.to_string(),
                    location: pointer.clone(),
                })
            }
        }
        JsonValue::String(value) => Ok(Value::string(value.as_str())),
        JsonValue::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let mark = pointer.len();
                pointer.push_str(&format!("/{index}"));
                list.push(convert_json(item, pointer)?);
                pointer.truncate(mark);
            }
            Ok(Value::List(list))
        }
        JsonValue::Object(map) => {
            let mut compound = Compound::with_capacity(map.len());
            for (key, item) in map {
                let mark = pointer.len();
                pointer.push('/');
                pointer.push_str(&key.replace('~', "~0").replace('/', "~1"));
                compound.insert(key.clone(), convert_json(item, pointer)?);
                pointer.truncate(mark);
            }
            Ok(Value::Compound(compound))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let json = json!({"name": "a", "n": 3, "x": 1.5, "ok": true, "items": [{"id": "b"}]});
        let value = Value::from_json(&json).unwrap();

        // serde_json maps iterate in key order
        assert_eq!(value.to_string(), r#"{items:[{id:"b"}],n:3,name:"a",ok:true,x:1.5}"#);
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn test_null_reports_location() {
        let json = json!({"a": [1, null]});
        let err = Value::from_json(&json).unwrap_err();

        assert_eq!(
            err,
            ModelError::UnsupportedNull {
                location: "/a/1".to_string()
            }
        );
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(Value::float(f64::NAN).to_json(), JsonValue::Null);
    }
}
