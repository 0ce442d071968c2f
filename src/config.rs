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

//! # Zicol Configuration Module
//!
//! Resolution settings shared by every selection evaluated against a tree.
//! The configuration is plain data: it can be built with chained setters or
//! deserialized from the JSON blob an operator receives.
//!
//! ```rust
//! use zicol::config::{ZiResolverConfig, ZiUnresolvedColumnsPolicy};
//!
//! let config = ZiResolverConfig::new()
//!     .unresolved(ZiUnresolvedColumnsPolicy::Skip)
//!     .path_separator('/');
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};

/// What to do when a referenced column does not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiUnresolvedColumnsPolicy {
    /// Abort the whole resolution with `ColumnNotFound`.
    #[default]
    Fail,
    /// Drop the reference and keep resolving.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiResolverConfig {
    pub unresolved: ZiUnresolvedColumnsPolicy,
    /// Separator used when a textual reference names a nested column.
    pub path_separator: char,
}

impl Default for ZiResolverConfig {
    fn default() -> Self {
        Self {
            unresolved: ZiUnresolvedColumnsPolicy::Fail,
            path_separator: '.',
        }
    }
}

impl ZiResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unresolved(mut self, policy: ZiUnresolvedColumnsPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    pub fn path_separator(mut self, separator: char) -> Self {
        self.path_separator = separator;
        self
    }

    /// Reads a configuration object; absent keys keep their defaults.
    pub fn from_json(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| ZiError::validation(format!("invalid resolver config: {e}")))
    }
}
