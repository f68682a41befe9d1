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

//! Path parser
//!
//! Converts path text into an immutable [`Path`]. Filter bodies are read by
//! the literal parser over the same cursor.

#![warn(missing_docs)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod literal;
pub mod path_parser;

pub use config::{DEFAULT_MAX_LITERAL_DEPTH, ParserConfig};
pub use cursor::TextCursor;
pub use error::{ParseResult, SyntaxError};
pub use literal::{LiteralParser, parse_literal, parse_literal_str};
pub use path_parser::PathParser;

use crate::evaluator::Path;

/// Parse a complete path string with the default configuration.
///
/// Unlike [`Path::parse_from`], which stops before a space and leaves it for
/// the caller, the whole text must be one path: `"foo bar"` fails with
/// [`SyntaxError::TrailingInput`] at position 3.
pub fn parse(text: &str) -> ParseResult<Path> {
    parse_with_config(text, &ParserConfig::default())
}

/// Parse a complete path string.
///
/// The whole text must be one path: a space after the path is reported as
/// [`SyntaxError::TrailingInput`].
pub fn parse_with_config(text: &str, config: &ParserConfig) -> ParseResult<Path> {
    let mut cursor = TextCursor::new(text);
    let path = PathParser::new(&mut cursor, config).parse()?;
    if cursor.can_read() {
        return Err(SyntaxError::TrailingInput {
            position: cursor.position(),
        });
    }
    Ok(path)
}
