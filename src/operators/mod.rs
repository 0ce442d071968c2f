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

//! # Operators Module
//!
//! Record operators available in Zicol.
//!
//! - **columns**: `columns.select` and `columns.remove`, projecting batches
//!   onto a selection program
//!
//! Operators are created through factory functions taking the JSON config of
//! a pipeline step; [`create_operator`] looks the factory up by name.

pub mod columns;

use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::operator::ZiOperator;

/// Builds the operator registered under `name`.
pub fn create_operator(name: &str, config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    match name {
        "columns.select" => columns::select_columns_factory(config),
        "columns.remove" => columns::remove_columns_factory(config),
        _ => Err(ZiError::validation(format!("Unknown operator: {}", name))),
    }
}
