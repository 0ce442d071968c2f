//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Selection Program Module
//!
//! Selections can also be written down as data: a program is an ordered list
//! of steps, each naming a selection operator and its configuration. Programs
//! are what record operators receive in their JSON configs and what users
//! keep in files next to their pipelines.
//!
//! ## Architecture
//!
//! - **Parser** ([parser.rs](parser/index.html)): JSON, YAML or line syntax
//!   into the IR
//! - **IR** ([ir.rs](ir/index.html)): [`ZiDSLProgram`] of [`ZiDSLNode`] steps
//! - **Compat** ([compat.rs](compat/index.html)): operator names, including
//!   deprecated spellings
//! - **Compiler** ([compiler.rs](compiler/index.html)): IR into a
//!   [`ZiColumnSet`](crate::selection::ZiColumnSet)
//!
//! ## Chaining
//!
//! The first step starts the selection (`all`, `cols`, `cols_at_any_depth`,
//! `in`, ...). Every following step refines it (`except`, `take`,
//! `name_contains`, `distinct`, ...). A refining step in first position
//! refines `all`.
//!
//! ## Usage Example (JSON)
//!
//! ```json
//! [
//!   {"operator": "all"},
//!   {"operator": "except", "config": {"cols": ["address.street"]}},
//!   {"operator": "distinct"}
//! ]
//! ```
//!
//! ## Usage Example (Simple Syntax)
//!
//! ```text
//! cols_at_any_depth contains=id ignore_case=true
//! except user.id
//! take 3
//! ```

pub mod compat;
pub mod compiler;
pub mod ir;
pub mod parser;

pub use compat::{lookup_operator, ZiOperatorName};
pub use compiler::{parse_predicate, ZiDSLCompiler};
pub use ir::{ZiDSLNode, ZiDSLProgram};
pub use parser::{ZiDSLParser, ZiDSLParserConfig, ZiParseResult};
