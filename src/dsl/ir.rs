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

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, ZiError};

/// One step of a selection program.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiDSLNode {
    pub operator: String,
    #[serde(default = "empty_config")]
    pub config: Value,
}

impl ZiDSLNode {
    pub fn new(operator: impl Into<String>, config: Value) -> Self {
        Self {
            operator: operator.into(),
            config,
        }
    }

    /// Step without configuration.
    pub fn bare(operator: impl Into<String>) -> Self {
        Self::new(operator, empty_config())
    }
}

fn empty_config() -> Value {
    Value::Object(Map::new())
}

/// Ordered steps; each one refines the selection built by the previous ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiDSLProgram {
    pub nodes: Vec<ZiDSLNode>,
}

impl ZiDSLProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(mut self, node: ZiDSLNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ZiError::internal(format!("Failed to serialize program: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ZiError::validation(format!("Invalid program JSON: {}", e)))
    }
}
