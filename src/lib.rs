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

//! Path expressions over dynamically typed value trees
//!
//! A path such as `items[{id:"a"}].count` is parsed once into an immutable
//! [`Path`] and then applied to any number of trees to read, count, create,
//! overwrite, remove or insert values.
//!
//! ```
//! use treepath::{Value, parse};
//!
//! let mut root: Value = r#"{items:[{id:"a",count:1},{id:"b"}]}"#.parse().unwrap();
//! let path = parse(r#"items[{id:"a"}].count"#).unwrap();
//!
//! assert_eq!(path.set(&mut root, || Value::int(5)).unwrap(), 1);
//! assert_eq!(path.get(&root).unwrap(), vec![&Value::int(5)]);
//! ```

pub mod ast;
pub mod cache;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;

// Re-export main types
pub use ast::PathNode;
pub use cache::{PathCache, PathCacheConfig, PathCacheStats, global_path_cache, parse_cached};
pub use error::{Result, TreePathError};
pub use evaluator::{EvaluationError, EvaluationResult, NotFoundError, Path};
pub use model::{Compound, ModelError, Scalar, Value, ValueKind};
pub use parser::{ParserConfig, SyntaxError, TextCursor, parse, parse_with_config};
