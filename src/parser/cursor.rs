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

//! Shared text cursor
//!
//! The path parser and the literal parser read from the same cursor, so a
//! host grammar can hand over a cursor positioned at a path, let the parser
//! consume it, and continue reading after it.

use super::error::{ParseResult, SyntaxError};

/// Byte position over borrowed input
#[derive(Debug, Clone)]
pub struct TextCursor<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> TextCursor<'input> {
    /// Create a cursor at the start of `input`
    pub fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    /// The whole input, including consumed text
    pub fn input(&self) -> &'input str {
        self.input
    }

    /// Current byte position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to a byte position; clamped to the input length
    pub fn set_position(&mut self, position: usize) {
        self.pos = position.min(self.input.len());
    }

    /// Check if any input is left
    #[inline]
    pub fn can_read(&self) -> bool {
        self.pos < self.input.len()
    }

    /// Unconsumed input
    #[inline]
    pub fn remaining(&self) -> &'input str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Text between `start` and the current position
    pub(crate) fn slice_from(&self, start: usize) -> &'input str {
        self.input.get(start..self.pos).unwrap_or_default()
    }

    /// Next character without consuming it
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume one character
    #[inline]
    pub fn skip(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    /// Consume `expected` or fail without moving
    pub fn expect(&mut self, expected: char) -> ParseResult<()> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.skip();
                Ok(())
            }
            found => Err(SyntaxError::Expected {
                expected,
                found,
                position: self.pos,
            }),
        }
    }

    /// Skip whitespace characters
    pub fn skip_whitespace(&mut self) {
        self.read_while(char::is_whitespace);
    }

    /// Consume characters while `accept` holds and return them
    pub fn read_while(&mut self, mut accept: impl FnMut(char) -> bool) -> &'input str {
        let start = self.pos;
        let length = self
            .remaining()
            .char_indices()
            .find(|(_, ch)| !accept(*ch))
            .map_or(self.remaining().len(), |(i, _)| i);
        self.pos += length;
        self.slice_from(start)
    }

    /// Read a string delimited by the quote character under the cursor.
    ///
    /// A backslash escapes the next character. Fails with
    /// [`SyntaxError::UnexpectedEnd`] when the closing quote is missing.
    pub fn read_quoted_string(&mut self) -> ParseResult<String> {
        let start = self.pos;
        let quote = match self.peek() {
            Some(ch @ ('"' | '\'')) => ch,
            found => {
                return Err(SyntaxError::Expected {
                    expected: '"',
                    found,
                    position: start,
                });
            }
        };
        self.skip();

        let mut result = String::new();
        let mut escaped = false;
        while let Some(ch) = self.peek() {
            self.skip();
            if escaped {
                result.push(ch);
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                return Ok(result);
            } else {
                result.push(ch);
            }
        }

        Err(SyntaxError::UnexpectedEnd {
            position: self.pos,
            context: "quoted string",
        })
    }

    /// Read an optionally signed integer.
    ///
    /// On failure the cursor is restored to where the integer started.
    pub fn read_integer(&mut self) -> ParseResult<i64> {
        let start = self.pos;
        let text = self.read_while(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'));
        match text.parse::<i64>() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.pos = start;
                Err(SyntaxError::InvalidInteger {
                    text: text.to_string(),
                    position: start,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_skip_and_remaining() {
        let mut cursor = TextCursor::new("aé.b");
        assert_eq!(cursor.peek(), Some('a'));
        cursor.skip();
        assert_eq!(cursor.peek(), Some('é'));
        cursor.skip();
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), ".b");
    }

    #[test]
    fn test_expect_does_not_move_on_failure() {
        let mut cursor = TextCursor::new("x");
        let err = cursor.expect('.').unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Expected {
                expected: '.',
                found: Some('x'),
                position: 0
            }
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_while_stops_at_rejected_char() {
        let mut cursor = TextCursor::new("abc def");
        assert_eq!(cursor.read_while(|ch| ch != ' '), "abc");
        assert_eq!(cursor.peek(), Some(' '));
    }

    #[test]
    fn test_read_quoted_string_unescapes() {
        let mut cursor = TextCursor::new(r#""a \"b\" \\c" rest"#);
        assert_eq!(cursor.read_quoted_string().unwrap(), r#"a "b" \c"#);
        assert_eq!(cursor.remaining(), " rest");

        let mut cursor = TextCursor::new("'it''s'");
        assert_eq!(cursor.read_quoted_string().unwrap(), "it");
    }

    #[test]
    fn test_unterminated_quote() {
        let mut cursor = TextCursor::new("\"abc");
        assert!(matches!(
            cursor.read_quoted_string(),
            Err(SyntaxError::UnexpectedEnd { position: 4, .. })
        ));
    }

    #[test]
    fn test_read_integer() {
        let mut cursor = TextCursor::new("-12]");
        assert_eq!(cursor.read_integer().unwrap(), -12);
        assert_eq!(cursor.peek(), Some(']'));

        let mut cursor = TextCursor::new("1.5]");
        assert!(matches!(
            cursor.read_integer(),
            Err(SyntaxError::InvalidInteger { position: 0, .. })
        ));
        assert_eq!(cursor.position(), 0);
    }
}
