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

//! # Zicol Library
//!
//! Column selection over hierarchical table schemas. A table's columns form a
//! tree of value columns, column groups and frame columns; selections are
//! declarative expressions resolved against that tree into an ordered list of
//! columns, which a table then projects into a new table.
//!
//! ## Module Overview
//!
//! - **column**: the column tree model (paths, types, groups, frames)
//! - **selection**: the selection algebra, its resolver and structural `except`
//! - **table**: schema inference from records and ordered projection
//! - **record**: rows as JSON payloads
//! - **dsl**: selection programs in JSON, YAML or line syntax
//! - **operator** / **operators**: record operators built on selections
//! - **config**: resolver settings
//!
//! ## Feature Flags
//!
//! - `parallel`: projects rows on the rayon thread pool
//! - `full`: enables all features
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use zicol::{all, ZiRecord, ZiTable, ZiTableProvider};
//!
//! let table = ZiTable::from_records(vec![ZiRecord::new(None, json!({
//!     "id": 1,
//!     "name": "Ada",
//!     "address": {"street": "Main St", "city": "London"}
//! }))]).unwrap();
//!
//! let projected = table.select(&all().except("address.street")).unwrap();
//! assert_eq!(projected.records()[0].payload, json!({
//!     "id": 1,
//!     "name": "Ada",
//!     "address": {"city": "London"}
//! }));
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ZiError>`. Resolution failures carry the
//! missing name and the scope it was looked up in.

#![allow(non_snake_case)]

pub mod column;
pub mod config;
pub mod dsl;
pub mod errors;
pub mod operator;
pub mod operators;
pub mod record;
pub mod selection;
pub mod table;

pub use column::{
    ZiBaseType, ZiColumn, ZiColumnData, ZiColumnKind, ZiColumnPath, ZiColumnTree, ZiDataType,
};
pub use config::{ZiResolverConfig, ZiUnresolvedColumnsPolicy};
pub use errors::{Result, ZiError};
pub use record::{ZiRecord, ZiRecordBatch};
pub use operator::{execute_chain, execute_operator, ZiOperator};
pub use table::{ZiTable, ZiTableProvider};

pub use selection::{
    all, all_except, col, col_group, cols, cols_at, cols_at_any_depth, cols_of, cols_of_kind,
    cols_where, ZiColumnGroupRef, ZiColumnPredicate, ZiColumnRef, ZiColumnSet, ZiColumnsResolver,
    ZiPick, ZiResolutionContext, ZiSlice,
};

pub use dsl::{ZiDSLCompiler, ZiDSLNode, ZiDSLParser, ZiDSLParserConfig, ZiDSLProgram, ZiParseResult};
pub use operators::columns::{ZiRemoveColumns, ZiSelectColumns};
