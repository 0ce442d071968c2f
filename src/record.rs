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

//! # Zicol Record Module
//!
//! Rows of a table. Each record carries an optional stable identifier and a
//! JSON object payload whose keys are the table's top-level columns: nested
//! objects are column groups and arrays of objects are frame columns.
//!
//! ```rust
//! use zicol::record::ZiRecord;
//! use serde_json::json;
//!
//! let record = ZiRecord::new(Some("row-1".to_string()), json!({
//!     "id": 1,
//!     "address": {"street": "Main St", "city": "Springfield"}
//! }));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::column::ZiColumnPath;

/// One row of a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiRecord {
    /// Optional stable identifier, carried through projections unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Cell values keyed by column name.
    pub payload: Value,
}

impl ZiRecord {
    pub fn new(id: Option<String>, payload: Value) -> Self {
        ZiRecord {
            id,
            payload,
        }
    }

    /// Cell addressed by an absolute column path, if present.
    pub fn value_at(&self, path: &ZiColumnPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.payload, |current, segment| current.as_object()?.get(segment))
    }
}

/// Convenience alias for working on batches of records.
pub type ZiRecordBatch = Vec<ZiRecord>;
