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

//! Path grammar
//!
//! ```text
//! path      := node (('.')? node)*
//! node      := quotedKey objSuffix? | bareKey objSuffix?
//!            | '[' indexBody ']'
//!            | '{' filterBody '}'          -- first node only
//! objSuffix := '{' filterBody '}'
//! indexBody := '' | signedInt | '{' filterBody '}'
//! ```
//!
//! The `.` separator is required unless the next node starts with `[` or
//! `{`. A path ends at end of input or before a space, which is left
//! unconsumed for the surrounding grammar.

use super::config::ParserConfig;
use super::cursor::TextCursor;
use super::error::{ParseResult, SyntaxError};
use super::literal::LiteralParser;
use crate::ast::PathNode;
use crate::evaluator::Path;
use crate::model::Compound;

/// Characters that may continue a bare key.
///
/// A `'` only opens a quoted key as the first character of a node, so
/// `it's` reads as one bare key.
fn is_allowed_in_bare_key(ch: char) -> bool {
    !matches!(ch, ' ' | '"' | '[' | ']' | '.' | '{' | '}')
}

/// Reads one path from a shared cursor
pub struct PathParser<'c, 'input> {
    cursor: &'c mut TextCursor<'input>,
    config: &'c ParserConfig,
}

impl<'c, 'input> PathParser<'c, 'input> {
    /// Create a parser reading from `cursor`
    pub fn new(cursor: &'c mut TextCursor<'input>, config: &'c ParserConfig) -> Self {
        Self { cursor, config }
    }

    /// Parse nodes until end of input or a space.
    ///
    /// At least one node is required. Node end offsets are recorded relative
    /// to where the path started, so they index into the path's own text.
    pub fn parse(mut self) -> ParseResult<Path> {
        let start = self.cursor.position();
        let mut nodes = Vec::new();
        let mut node_end_offsets = Vec::new();

        loop {
            let node = self.parse_node(nodes.is_empty())?;
            log::trace!("parsed path node {node:?}");
            nodes.push(node);
            node_end_offsets.push(self.cursor.position() - start);

            match self.cursor.peek() {
                None | Some(' ') => break,
                Some('[' | '{') => {}
                Some(_) => self.cursor.expect('.')?,
            }
        }

        let text = self.cursor.slice_from(start).to_string();
        log::debug!("parsed path '{text}' into {} nodes", nodes.len());
        Ok(Path::from_parts(text, nodes, node_end_offsets))
    }

    fn parse_node(&mut self, first: bool) -> ParseResult<PathNode> {
        match self.cursor.peek() {
            Some('{') if first => Ok(PathNode::MatchRootObject {
                pattern: self.parse_filter()?,
            }),
            Some('{') => Err(SyntaxError::MisplacedRootFilter {
                position: self.cursor.position(),
            }),
            Some('[') => self.parse_index_node(),
            Some('"' | '\'') => {
                let name = self.cursor.read_quoted_string()?;
                self.parse_object_node(name)
            }
            _ => {
                let name = self.read_bare_key()?;
                self.parse_object_node(name)
            }
        }
    }

    fn parse_object_node(&mut self, name: String) -> ParseResult<PathNode> {
        if self.cursor.peek() == Some('{') {
            let pattern = self.parse_filter()?;
            Ok(PathNode::MatchObject { name, pattern })
        } else {
            Ok(PathNode::CompoundChild { name })
        }
    }

    fn parse_index_node(&mut self) -> ParseResult<PathNode> {
        self.cursor.expect('[')?;

        let node = match self.cursor.peek() {
            Some('{') => PathNode::MatchElement {
                pattern: self.parse_filter()?,
            },
            Some(']') => PathNode::AllElements,
            Some(_) => PathNode::IndexedElement {
                index: self.read_index()?,
            },
            None => {
                return Err(SyntaxError::UnexpectedEnd {
                    position: self.cursor.position(),
                    context: "list index",
                });
            }
        };

        self.cursor.expect(']')?;
        Ok(node)
    }

    /// A malformed index body is reported like a malformed key
    fn read_index(&mut self) -> ParseResult<i64> {
        self.cursor.read_integer().map_err(|err| match err {
            SyntaxError::InvalidInteger { text, position } => {
                SyntaxError::invalid_node(position, format!("invalid list index '{text}'"))
            }
            other => other,
        })
    }

    fn parse_filter(&mut self) -> ParseResult<Compound> {
        LiteralParser::new(self.cursor, self.config).parse_compound()
    }

    fn read_bare_key(&mut self) -> ParseResult<String> {
        let position = self.cursor.position();
        let name = self.cursor.read_while(is_allowed_in_bare_key);
        if name.is_empty() {
            let message = match self.cursor.peek() {
                Some(ch) => format!("expected key, found '{ch}'"),
                None => "expected key".to_string(),
            };
            return Err(SyntaxError::invalid_node(position, message));
        }
        Ok(name.to_string())
    }
}
