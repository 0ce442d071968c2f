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

//! # Zicol Table Module
//!
//! The table side of selection: a [`ZiTable`] pairs a [`ZiColumnTree`] with
//! its rows and materializes resolved selections into new tables.
//!
//! ## Schema Inference
//!
//! [`ZiTable::from_records`] derives the column tree from row payloads:
//!
//! - keys appear in first-seen order across all rows
//! - nested objects become column groups, arrays of objects frame columns
//! - scalar types widen across rows (`int` + `float` -> `number`, otherwise
//!   `any`); nulls or missing keys make a value column nullable
//! - an object where a scalar was seen before (or the reverse) is a schema error
//!
//! ## Projection
//!
//! [`ZiTableProvider::project`] honours the exact order of the resolved
//! columns, display-name overrides and groups rebuilt by `except`. Nested
//! columns selected on their own surface as top-level output columns.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::column::{ZiBaseType, ZiColumn, ZiColumnTree, ZiDataType};
use crate::config::ZiResolverConfig;
use crate::errors::{Result, ZiError};
use crate::record::{ZiRecord, ZiRecordBatch};
use crate::selection::ZiColumnSet;

/// Contract between the selection engine and a table implementation.
pub trait ZiTableProvider {
    /// Read-only column hierarchy of the table.
    fn column_tree(&self) -> &ZiColumnTree;

    /// New table holding exactly `columns`, in order.
    fn project(&self, columns: &[ZiColumn]) -> Result<Self>
    where
        Self: Sized;

    fn select(&self, selection: &ZiColumnSet) -> Result<Self>
    where
        Self: Sized,
    {
        self.select_with(selection, &ZiResolverConfig::default())
    }

    fn select_with(&self, selection: &ZiColumnSet, config: &ZiResolverConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let columns = self.column_tree().select_with(selection, config)?;
        self.project(&columns)
    }
}

/// In-memory table of JSON rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZiTable {
    tree: ZiColumnTree,
    records: ZiRecordBatch,
}

impl ZiTable {
    /// Infers the column tree from the rows.
    pub fn from_records(records: ZiRecordBatch) -> Result<Self> {
        let mut inferred = InferredObject::default();
        for (idx, record) in records.iter().enumerate() {
            let row = record.payload.as_object().ok_or_else(|| {
                ZiError::schema(format!("record {idx} payload must be a JSON object"))
            })?;
            inferred.observe(row, "")?;
        }

        let tree = ZiColumnTree::new(inferred.finish())?;
        Ok(Self { tree, records })
    }

    /// Pairs rows with an explicit column tree. Rows are not validated.
    pub fn with_tree(tree: ZiColumnTree, records: ZiRecordBatch) -> Self {
        Self { tree, records }
    }

    /// Loads rows from a JSON Lines file; see [`ZiTable::load_jsonl_reader`].
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::load_jsonl_reader(BufReader::new(file))
    }

    /// Each non-blank line is either an object with `payload` (and optional
    /// `id`) or the row object itself.
    pub fn load_jsonl_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&line).map_err(|e| {
                ZiError::validation(format!("invalid JSON on line {}: {e}", idx + 1))
            })?;
            records.push(parse_record(value, idx + 1)?);
        }
        Self::from_records(records)
    }

    pub fn tree(&self) -> &ZiColumnTree {
        &self.tree
    }

    pub fn records(&self) -> &[ZiRecord] {
        &self.records
    }

    pub fn into_records(self) -> ZiRecordBatch {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Top-level output column names, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.tree.columns().iter().map(ZiColumn::name).collect()
    }
}

impl ZiTableProvider for ZiTable {
    fn column_tree(&self) -> &ZiColumnTree {
        &self.tree
    }

    fn project(&self, columns: &[ZiColumn]) -> Result<Self> {
        let mut names = HashSet::new();
        for column in columns {
            if !names.insert(column.display_name()) {
                return Err(ZiError::schema(format!(
                    "duplicate column name '{}' in projection",
                    column.display_name()
                )));
            }
        }

        let tree = ZiColumnTree::new(columns.iter().map(ZiColumn::materialized).collect())?;

        #[cfg(feature = "parallel")]
        let records = self
            .records
            .par_iter()
            .map(|record| project_record(record, columns))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let records = self
            .records
            .iter()
            .map(|record| project_record(record, columns))
            .collect();

        Ok(Self { tree, records })
    }
}

fn parse_record(value: Value, line: usize) -> Result<ZiRecord> {
    match value {
        Value::Object(mut map) if map.contains_key("payload") => {
            let id = match map.remove("id") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s),
                Some(other) => Some(other.to_string()),
            };
            let payload = map.remove("payload").unwrap_or(Value::Null);
            Ok(ZiRecord::new(id, payload))
        }
        Value::Object(map) => Ok(ZiRecord::new(None, Value::Object(map))),
        _ => Err(ZiError::validation(format!(
            "line {line}: expected a JSON object"
        ))),
    }
}

fn project_record(record: &ZiRecord, columns: &[ZiColumn]) -> ZiRecord {
    let mut out = Map::new();
    for column in columns {
        out.insert(column.display_name().to_string(), project_cell(record, column));
    }
    ZiRecord::new(record.id.clone(), Value::Object(out))
}

fn project_cell(record: &ZiRecord, column: &ZiColumn) -> Value {
    match record.value_at(column.path()) {
        None | Some(Value::Null) => Value::Null,
        Some(_) if column.is_group() => {
            let mut out = Map::new();
            for child in column.children() {
                out.insert(child.display_name().to_string(), project_cell(record, child));
            }
            Value::Object(out)
        }
        Some(value) => value.clone(),
    }
}

#[derive(Debug)]
enum InferredNode {
    /// Nothing observed yet.
    Unknown,
    /// Only nulls seen so far.
    Null,
    Value(ZiDataType),
    Group(InferredObject),
    Frame(InferredObject),
}

#[derive(Debug)]
struct InferredField {
    name: String,
    node: InferredNode,
    count: usize,
}

#[derive(Debug, Default)]
struct InferredObject {
    fields: Vec<InferredField>,
    seen: usize,
}

impl InferredObject {
    fn observe(&mut self, object: &Map<String, Value>, prefix: &str) -> Result<()> {
        self.seen += 1;
        for (key, value) in object {
            let idx = match self.fields.iter().position(|f| &f.name == key) {
                Some(idx) => idx,
                None => {
                    self.fields.push(InferredField {
                        name: key.clone(),
                        node: InferredNode::Unknown,
                        count: 0,
                    });
                    self.fields.len() - 1
                }
            };
            let field = &mut self.fields[idx];
            field.count += 1;
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            observe_value(&mut field.node, value, &path)?;
        }
        Ok(())
    }

    fn finish(self) -> Vec<ZiColumn> {
        let seen = self.seen;
        self.fields
            .into_iter()
            .map(|field| {
                let missing = field.count < seen;
                match field.node {
                    InferredNode::Unknown | InferredNode::Null => {
                        ZiColumn::value(field.name, ZiDataType::any().or_null())
                    }
                    InferredNode::Value(data_type) => {
                        let data_type = if missing { data_type.or_null() } else { data_type };
                        ZiColumn::value(field.name, data_type)
                    }
                    InferredNode::Group(inner) => ZiColumn::group(field.name, inner.finish()),
                    InferredNode::Frame(inner) => ZiColumn::frame(field.name, inner.finish()),
                }
            })
            .collect()
    }
}

fn observe_value(node: &mut InferredNode, value: &Value, path: &str) -> Result<()> {
    match value {
        Value::Null => {
            match node {
                InferredNode::Unknown => *node = InferredNode::Null,
                InferredNode::Value(data_type) => *data_type = data_type.or_null(),
                _ => {}
            }
            Ok(())
        }
        Value::Object(object) => {
            if matches!(node, InferredNode::Unknown | InferredNode::Null) {
                *node = InferredNode::Group(InferredObject::default());
            }
            match node {
                InferredNode::Group(inner) => inner.observe(object, path),
                _ => Err(conflict(path, "object")),
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            if matches!(node, InferredNode::Unknown | InferredNode::Null)
                || matches!(node, InferredNode::Value(t) if t.base == ZiBaseType::List)
            {
                *node = InferredNode::Frame(InferredObject::default());
            }
            match node {
                InferredNode::Frame(inner) => {
                    for item in items {
                        match item {
                            Value::Object(object) => inner.observe(object, path)?,
                            Value::Null => {}
                            _ => return Err(conflict(path, "mixed array")),
                        }
                    }
                    Ok(())
                }
                _ => Err(conflict(path, "array of objects")),
            }
        }
        Value::Array(_) if matches!(node, InferredNode::Frame(_)) => Ok(()),
        scalar => {
            let observed = scalar_type(scalar);
            match node {
                InferredNode::Unknown => {
                    *node = InferredNode::Value(observed);
                    Ok(())
                }
                InferredNode::Null => {
                    *node = InferredNode::Value(observed.or_null());
                    Ok(())
                }
                InferredNode::Value(data_type) => {
                    *data_type = data_type.widen(&observed);
                    Ok(())
                }
                _ => Err(conflict(path, observed.base.as_str())),
            }
        }
    }
}

fn scalar_type(value: &Value) -> ZiDataType {
    match value {
        Value::Bool(_) => ZiDataType::bool(),
        Value::Number(n) if n.is_i64() || n.is_u64() => ZiDataType::int(),
        Value::Number(_) => ZiDataType::float(),
        Value::String(_) => ZiDataType::string(),
        Value::Array(_) => ZiDataType::list(),
        _ => ZiDataType::any(),
    }
}

fn conflict(path: &str, observed: &str) -> ZiError {
    ZiError::schema(format!(
        "column '{path}' holds a {observed} where another row has a different layout"
    ))
}
