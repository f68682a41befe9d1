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

//! Literal values: filter bodies and scalar/compound/list literals
//!
//! ```text
//! value    := compound | list | quoted | bare
//! compound := '{' (key (':' | '=') value (',' key (':' | '=') value)*)? '}'
//! list     := '[' (value (',' value)*)? ']'
//! ```
//!
//! Bare words read as `true`/`false`, integers, floats, and otherwise as
//! unquoted strings.

use super::config::ParserConfig;
use super::cursor::TextCursor;
use super::error::{ParseResult, SyntaxError};
use crate::model::value::is_bare_char;
use crate::model::{Compound, Scalar, Value};

/// Recursive-descent reader for literal values over a shared cursor
pub struct LiteralParser<'c, 'input> {
    cursor: &'c mut TextCursor<'input>,
    max_depth: usize,
    depth: usize,
}

impl<'c, 'input> LiteralParser<'c, 'input> {
    /// Create a literal parser reading from `cursor`
    pub fn new(cursor: &'c mut TextCursor<'input>, config: &ParserConfig) -> Self {
        Self {
            cursor,
            max_depth: config.max_literal_depth,
            depth: 0,
        }
    }

    /// Read any value
    pub fn parse_value(&mut self) -> ParseResult<Value> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('{') => self.parse_compound().map(Value::Compound),
            Some('[') => self.parse_list(),
            Some('"' | '\'') => Ok(Value::string(self.cursor.read_quoted_string()?)),
            Some(_) => self.parse_bare(),
            None => Err(SyntaxError::UnexpectedEnd {
                position: self.cursor.position(),
                context: "value",
            }),
        }
    }

    /// Read a `{...}` compound
    pub fn parse_compound(&mut self) -> ParseResult<Compound> {
        self.enter()?;
        self.cursor.expect('{')?;
        self.cursor.skip_whitespace();

        let mut compound = Compound::new();
        if self.cursor.peek() != Some('}') {
            loop {
                let key = self.parse_key()?;
                self.cursor.skip_whitespace();
                match self.cursor.peek() {
                    Some(':' | '=') => self.cursor.skip(),
                    found => {
                        return Err(SyntaxError::Expected {
                            expected: ':',
                            found,
                            position: self.cursor.position(),
                        });
                    }
                }
                let value = self.parse_value()?;
                compound.insert(key, value);

                if !self.separator('}')? {
                    break;
                }
            }
        }

        self.cursor.expect('}')?;
        self.depth -= 1;
        Ok(compound)
    }

    fn parse_list(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.cursor.expect('[')?;
        self.cursor.skip_whitespace();

        let mut items = Vec::new();
        if self.cursor.peek() != Some(']') {
            loop {
                items.push(self.parse_value()?);
                if !self.separator(']')? {
                    break;
                }
            }
        }

        self.cursor.expect(']')?;
        self.depth -= 1;
        Ok(Value::List(items))
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::TooDeep {
                limit: self.max_depth,
                position: self.cursor.position(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Consume a `,` between entries. Returns `false` when the closing
    /// delimiter follows instead; rejects a comma right before it.
    fn separator(&mut self, close: char) -> ParseResult<bool> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some(',') => {
                self.cursor.skip();
                self.cursor.skip_whitespace();
                if self.cursor.peek() == Some(close) {
                    return Err(SyntaxError::invalid_literal(
                        self.cursor.position(),
                        format!("trailing ',' before '{close}'"),
                    ));
                }
                Ok(true)
            }
            Some(ch) if ch == close => Ok(false),
            found => Err(SyntaxError::Expected {
                expected: close,
                found,
                position: self.cursor.position(),
            }),
        }
    }

    fn parse_key(&mut self) -> ParseResult<String> {
        self.cursor.skip_whitespace();
        if matches!(self.cursor.peek(), Some('"' | '\'')) {
            return self.cursor.read_quoted_string();
        }
        let position = self.cursor.position();
        let key = self.cursor.read_while(is_bare_char);
        if key.is_empty() {
            return Err(match self.cursor.peek() {
                Some(_) => SyntaxError::invalid_literal(position, "expected key"),
                None => SyntaxError::UnexpectedEnd {
                    position,
                    context: "compound key",
                },
            });
        }
        Ok(key.to_string())
    }

    fn parse_bare(&mut self) -> ParseResult<Value> {
        let position = self.cursor.position();
        let word = self.cursor.read_while(is_bare_char);
        if word.is_empty() {
            return Err(SyntaxError::invalid_literal(position, "expected value"));
        }
        Ok(Value::Scalar(bare_scalar(word)))
    }
}

fn bare_scalar(word: &str) -> Scalar {
    match word {
        "true" => return Scalar::Bool(true),
        "false" => return Scalar::Bool(false),
        _ => {}
    }
    if let Ok(value) = word.parse::<i64>() {
        return Scalar::Int(value);
    }
    // Guard against words like "inf" or "NaN" that f64 accepts
    let numeric_start = word
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'));
    if numeric_start {
        if let Ok(value) = word.parse::<f64>() {
            return Scalar::Float(value);
        }
    }
    Scalar::String(word.to_string())
}

/// Read one literal value from a shared cursor
pub fn parse_literal(cursor: &mut TextCursor<'_>, config: &ParserConfig) -> ParseResult<Value> {
    LiteralParser::new(cursor, config).parse_value()
}

/// Parse a complete literal; surrounding whitespace is allowed
pub fn parse_literal_str(text: &str) -> ParseResult<Value> {
    let mut cursor = TextCursor::new(text);
    let value = parse_literal(&mut cursor, &ParserConfig::default())?;
    cursor.skip_whitespace();
    if cursor.can_read() {
        return Err(SyntaxError::TrailingInput {
            position: cursor.position(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_words() {
        assert_eq!(parse_literal_str("42").unwrap(), Value::int(42));
        assert_eq!(parse_literal_str("-7").unwrap(), Value::int(-7));
        assert_eq!(parse_literal_str("2.5").unwrap(), Value::float(2.5));
        assert_eq!(parse_literal_str("1e3").unwrap(), Value::float(1000.0));
        assert_eq!(parse_literal_str("true").unwrap(), Value::bool(true));
        assert_eq!(parse_literal_str("stone").unwrap(), Value::string("stone"));
        assert_eq!(parse_literal_str("inf").unwrap(), Value::string("inf"));
    }

    #[test]
    fn test_compound_accepts_both_separators() {
        let colon = parse_literal_str(r#"{id:"a", n:1}"#).unwrap();
        let equals = parse_literal_str(r#"{ id = "a" , n = 1 }"#).unwrap();
        assert_eq!(colon, equals);
        assert_eq!(colon.to_string(), r#"{id:"a",n:1}"#);
    }

    #[test]
    fn test_nested_structures() {
        let value = parse_literal_str(r#"{"odd key":[{x:1},{x:2}],e:{},l:[]}"#).unwrap();
        let compound = value.as_compound().unwrap();
        assert_eq!(compound["odd key"].as_list().map(<[Value]>::len), Some(2));
        assert_eq!(compound["e"], Value::compound());
        assert_eq!(compound["l"], Value::list());
    }

    #[test]
    fn test_cursor_stops_after_literal() {
        let mut cursor = TextCursor::new("{a:1}]rest");
        let value = parse_literal(&mut cursor, &ParserConfig::default()).unwrap();
        assert_eq!(value.to_string(), "{a:1}");
        assert_eq!(cursor.remaining(), "]rest");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_literal_str("{a 1}"),
            Err(SyntaxError::Expected { expected: ':', position: 3, .. })
        ));
        assert!(matches!(
            parse_literal_str("{a:1,}"),
            Err(SyntaxError::InvalidLiteral { position: 5, .. })
        ));
        assert!(matches!(
            parse_literal_str("{a:1"),
            Err(SyntaxError::Expected { expected: '}', found: None, .. })
        ));
        assert!(matches!(
            parse_literal_str("[1 2]"),
            Err(SyntaxError::Expected { expected: ']', found: Some('2'), .. })
        ));
        assert!(matches!(
            parse_literal_str("{:1}"),
            Err(SyntaxError::InvalidLiteral { position: 1, .. })
        ));
        assert!(matches!(
            parse_literal_str("1 2"),
            Err(SyntaxError::TrailingInput { position: 2 })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig::default().with_max_literal_depth(2);
        let mut cursor = TextCursor::new("[[1]]");
        assert!(parse_literal(&mut cursor, &config).is_ok());

        let mut cursor = TextCursor::new("[[[1]]]");
        assert!(matches!(
            parse_literal(&mut cursor, &config),
            Err(SyntaxError::TooDeep { limit: 2, position: 2 })
        ));
    }
}
