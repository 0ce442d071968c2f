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

use serde_json::{json, Value};

use crate::config::{ZiResolverConfig, ZiUnresolvedColumnsPolicy};
use crate::dsl::ZiDSLCompiler;
use crate::errors::{Result, ZiError};
use crate::operator::ZiOperator;
use crate::record::ZiRecordBatch;
use crate::selection::{all, ZiColumnSet};
use crate::table::{ZiTable, ZiTableProvider};

/// Projects every record onto the resolved selection.
#[derive(Debug)]
pub struct ZiSelectColumns {
    selection: ZiColumnSet,
    config: ZiResolverConfig,
}

impl ZiSelectColumns {
    pub fn new(selection: ZiColumnSet, config: ZiResolverConfig) -> Self {
        Self { selection, config }
    }
}

impl ZiOperator for ZiSelectColumns {
    fn name(&self) -> &'static str {
        "columns.select"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        project_batch(batch, &self.selection, &self.config)
    }
}

/// Keeps every column except the selection; nested exclusions rebuild
/// their parent groups.
#[derive(Debug)]
pub struct ZiRemoveColumns {
    selection: ZiColumnSet,
    config: ZiResolverConfig,
}

impl ZiRemoveColumns {
    pub fn new(exclusion: ZiColumnSet, config: ZiResolverConfig) -> Self {
        Self {
            selection: all().except(exclusion),
            config,
        }
    }
}

impl ZiOperator for ZiRemoveColumns {
    fn name(&self) -> &'static str {
        "columns.remove"
    }

    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        project_batch(batch, &self.selection, &self.config)
    }
}

fn project_batch(
    batch: ZiRecordBatch,
    selection: &ZiColumnSet,
    config: &ZiResolverConfig,
) -> Result<ZiRecordBatch> {
    if batch.is_empty() {
        return Ok(batch);
    }

    let table = ZiTable::from_records(batch)?;
    let projected = table.select_with(selection, config)?;
    Ok(projected.into_records())
}

pub fn select_columns_factory(config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let (selection, resolver) = parse_config("columns.select", config)?;
    Ok(Box::new(ZiSelectColumns::new(selection, resolver)))
}

pub fn remove_columns_factory(config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let (selection, resolver) = parse_config("columns.remove", config)?;
    Ok(Box::new(ZiRemoveColumns::new(selection, resolver)))
}

fn parse_config(operator: &str, config: &Value) -> Result<(ZiColumnSet, ZiResolverConfig)> {
    let obj = config
        .as_object()
        .ok_or_else(|| ZiError::validation(format!("{} config must be object", operator)))?;

    let program = obj
        .get("selection")
        .ok_or_else(|| ZiError::validation(format!("{} requires 'selection'", operator)))?;

    let strict = obj.get("strict").and_then(Value::as_bool).unwrap_or(true);
    let selection = ZiDSLCompiler::new().strict(strict).compile_value(program)?;

    let mut resolver = ZiResolverConfig::from_json(&json!({
        "path_separator": obj.get("path_separator").cloned().unwrap_or(json!(".")),
    }))?;
    if let Some(policy) = obj.get("policy").or_else(|| obj.get("unresolved")) {
        resolver.unresolved = serde_json::from_value::<ZiUnresolvedColumnsPolicy>(policy.clone())
            .map_err(|_| {
                ZiError::validation(format!(
                    "{} policy must be 'fail' or 'skip', got {}",
                    operator, policy
                ))
            })?;
    }

    Ok((selection, resolver))
}
