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

//! # Zicol Column Module
//!
//! This module provides the hierarchical column model the selection engine
//! resolves against. A table's columns form a tree:
//!
//! - **Value columns** are leaves carrying a declared [`ZiDataType`]
//! - **Column groups** are named namespaces holding ordered child columns
//! - **Frame columns** are leaves whose cells are nested tables; their schema
//!   is kept for projection but never expanded during selection
//!
//! The identity of a column is its [`ZiColumnPath`]: two columns are the same
//! column iff their paths are equal. Within one group child names are unique,
//! which [`ZiColumnTree::new`] enforces.
//!
//! ## Usage Example
//!
//! ```rust
//! use zicol::column::{ZiColumn, ZiColumnTree, ZiDataType};
//!
//! let tree = ZiColumnTree::new(vec![
//!     ZiColumn::value("id", ZiDataType::int()),
//!     ZiColumn::group("address", vec![
//!         ZiColumn::value("street", ZiDataType::string()),
//!         ZiColumn::value("city", ZiDataType::string()),
//!     ]),
//! ]).unwrap();
//!
//! assert_eq!(tree.columns()[1].children()[0].path().to_string(), "address.street");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZiError};

/// Sequence of names locating a column from the table root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZiColumnPath {
    segments: Vec<String>,
}

impl ZiColumnPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty path, denoting the table root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Splits `text` on `separator`. Empty segments are rejected.
    pub fn parse(text: &str, separator: char) -> Result<Self> {
        let segments: Vec<String> = text
            .split(separator)
            .map(|segment| segment.trim().to_string())
            .collect();

        if segments.iter().any(String::is_empty) {
            return Err(ZiError::validation(format!(
                "column path '{text}' contains an empty segment"
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, i.e. the column's own name.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn join(&self, other: &ZiColumnPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    pub fn starts_with(&self, prefix: &ZiColumnPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// True when `other` lies strictly below this path.
    pub fn is_ancestor_of(&self, other: &ZiColumnPath) -> bool {
        other.len() > self.len() && other.starts_with(self)
    }
}

impl fmt::Display for ZiColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Base element types understood by type-aware filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiBaseType {
    Any,
    Number,
    Int,
    Float,
    Bool,
    String,
    List,
    Frame,
}

impl ZiBaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiBaseType::Any => "any",
            ZiBaseType::Number => "number",
            ZiBaseType::Int => "int",
            ZiBaseType::Float => "float",
            ZiBaseType::Bool => "bool",
            ZiBaseType::String => "string",
            ZiBaseType::List => "list",
            ZiBaseType::Frame => "frame",
        }
    }

    pub fn is_subtype_of(self, other: ZiBaseType) -> bool {
        match (self, other) {
            (_, ZiBaseType::Any) => true,
            (a, b) if a == b => true,
            (ZiBaseType::Int | ZiBaseType::Float, ZiBaseType::Number) => true,
            _ => false,
        }
    }

    /// Smallest common supertype of two base types.
    pub fn widen(self, other: ZiBaseType) -> ZiBaseType {
        if self.is_subtype_of(other) {
            other
        } else if other.is_subtype_of(self) {
            self
        } else if self.is_subtype_of(ZiBaseType::Number) && other.is_subtype_of(ZiBaseType::Number) {
            ZiBaseType::Number
        } else {
            ZiBaseType::Any
        }
    }
}

/// Declared element type of a value or frame column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZiDataType {
    pub base: ZiBaseType,
    #[serde(default)]
    pub nullable: bool,
}

impl ZiDataType {
    pub fn new(base: ZiBaseType, nullable: bool) -> Self {
        Self { base, nullable }
    }

    pub fn of(base: ZiBaseType) -> Self {
        Self::new(base, false)
    }

    pub fn any() -> Self {
        Self::of(ZiBaseType::Any)
    }

    pub fn number() -> Self {
        Self::of(ZiBaseType::Number)
    }

    pub fn int() -> Self {
        Self::of(ZiBaseType::Int)
    }

    pub fn float() -> Self {
        Self::of(ZiBaseType::Float)
    }

    pub fn bool() -> Self {
        Self::of(ZiBaseType::Bool)
    }

    pub fn string() -> Self {
        Self::of(ZiBaseType::String)
    }

    pub fn list() -> Self {
        Self::of(ZiBaseType::List)
    }

    pub fn frame() -> Self {
        Self::of(ZiBaseType::Frame)
    }

    /// Same base type, accepting nulls.
    pub fn or_null(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// A nullable type is only a subtype of a nullable supertype.
    pub fn is_subtype_of(&self, other: &ZiDataType) -> bool {
        self.base.is_subtype_of(other.base) && (!self.nullable || other.nullable)
    }

    pub fn widen(&self, other: &ZiDataType) -> ZiDataType {
        ZiDataType {
            base: self.base.widen(other.base),
            nullable: self.nullable || other.nullable,
        }
    }
}

impl fmt::Display for ZiDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.base.as_str())
        } else {
            write!(f, "{}", self.base.as_str())
        }
    }
}

impl FromStr for ZiDataType {
    type Err = ZiError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (name, nullable) = match trimmed.strip_suffix('?') {
            Some(name) => (name, true),
            None => (trimmed, false),
        };

        let base = match name.to_ascii_lowercase().as_str() {
            "any" => ZiBaseType::Any,
            "number" => ZiBaseType::Number,
            "int" | "integer" | "long" => ZiBaseType::Int,
            "float" | "double" => ZiBaseType::Float,
            "bool" | "boolean" => ZiBaseType::Bool,
            "string" | "str" => ZiBaseType::String,
            "list" | "array" => ZiBaseType::List,
            "frame" => ZiBaseType::Frame,
            other => {
                return Err(ZiError::validation(format!("unknown column type '{other}'")));
            }
        };

        Ok(ZiDataType::new(base, nullable))
    }
}

/// Capability classification of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiColumnKind {
    Value,
    Group,
    Frame,
}

impl ZiColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiColumnKind::Value => "value",
            ZiColumnKind::Group => "group",
            ZiColumnKind::Frame => "frame",
        }
    }
}

impl FromStr for ZiColumnKind {
    type Err = ZiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "value" => Ok(ZiColumnKind::Value),
            "group" | "column_group" => Ok(ZiColumnKind::Group),
            "frame" | "frame_column" => Ok(ZiColumnKind::Frame),
            other => Err(ZiError::validation(format!("unknown column kind '{other}'"))),
        }
    }
}

/// Kind-specific payload of a column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ZiColumnData {
    Value { data_type: ZiDataType },
    Group { children: Vec<ZiColumn> },
    /// Schema of the nested table, rooted at that table's own root.
    Frame { schema: Vec<ZiColumn> },
}

/// A node of the column tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiColumn {
    name: String,
    path: ZiColumnPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    data: ZiColumnData,
}

impl ZiColumn {
    /// Constructs a top-level value column.
    pub fn value(name: impl Into<String>, data_type: ZiDataType) -> Self {
        Self::top_level(name.into(), ZiColumnData::Value { data_type })
    }

    /// Constructs a top-level column group; children are re-rooted beneath it.
    pub fn group(name: impl Into<String>, children: Vec<ZiColumn>) -> Self {
        let name = name.into();
        let path = ZiColumnPath::new([name.clone()]);
        let children = children
            .into_iter()
            .map(|child| child.rebased(&path))
            .collect();
        Self {
            name,
            path,
            alias: None,
            data: ZiColumnData::Group { children },
        }
    }

    /// Constructs a top-level frame column holding nested tables of `schema`.
    pub fn frame(name: impl Into<String>, schema: Vec<ZiColumn>) -> Self {
        let root = ZiColumnPath::root();
        let schema = schema.into_iter().map(|c| c.rebased(&root)).collect();
        Self::top_level(name.into(), ZiColumnData::Frame { schema })
    }

    fn top_level(name: String, data: ZiColumnData) -> Self {
        Self {
            path: ZiColumnPath::new([name.clone()]),
            name,
            alias: None,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used in projected output: the alias when one was attached.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn path(&self) -> &ZiColumnPath {
        &self.path
    }

    pub fn data(&self) -> &ZiColumnData {
        &self.data
    }

    pub fn kind(&self) -> ZiColumnKind {
        match self.data {
            ZiColumnData::Value { .. } => ZiColumnKind::Value,
            ZiColumnData::Group { .. } => ZiColumnKind::Group,
            ZiColumnData::Frame { .. } => ZiColumnKind::Frame,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self.data, ZiColumnData::Value { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self.data, ZiColumnData::Group { .. })
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.data, ZiColumnData::Frame { .. })
    }

    /// Direct children of a group; empty for value and frame columns.
    pub fn children(&self) -> &[ZiColumn] {
        match &self.data {
            ZiColumnData::Group { children } => children,
            _ => &[],
        }
    }

    pub fn child(&self, name: &str) -> Option<&ZiColumn> {
        self.children().iter().find(|child| child.name == name)
    }

    pub fn frame_schema(&self) -> Option<&[ZiColumn]> {
        match &self.data {
            ZiColumnData::Frame { schema } => Some(schema),
            _ => None,
        }
    }

    /// Declared element type. Groups have none.
    pub fn data_type(&self) -> Option<ZiDataType> {
        match &self.data {
            ZiColumnData::Value { data_type } => Some(*data_type),
            ZiColumnData::Frame { .. } => Some(ZiDataType::frame()),
            ZiColumnData::Group { .. } => None,
        }
    }

    /// Copy of this group carrying a different set of children.
    pub fn with_children(&self, children: Vec<ZiColumn>) -> Self {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            alias: self.alias.clone(),
            data: ZiColumnData::Group { children },
        }
    }

    /// Same column under a display-name override. Identity is unchanged.
    pub fn named(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Moves the column (and its subtree) beneath `parent`.
    pub fn rebased(mut self, parent: &ZiColumnPath) -> Self {
        self.path = parent.child(self.name.clone());
        let path = self.path.clone();
        if let ZiColumnData::Group { children } = &mut self.data {
            let moved = std::mem::take(children);
            *children = moved.into_iter().map(|c| c.rebased(&path)).collect();
        }
        self
    }

    /// Top-level copy with aliases applied, as it appears in a projected table.
    pub fn materialized(&self) -> Self {
        self.materialized_under(&ZiColumnPath::root())
    }

    fn materialized_under(&self, parent: &ZiColumnPath) -> Self {
        let name = self.display_name().to_string();
        let path = parent.child(name.clone());
        let data = match &self.data {
            ZiColumnData::Group { children } => ZiColumnData::Group {
                children: children.iter().map(|c| c.materialized_under(&path)).collect(),
            },
            other => other.clone(),
        };
        Self {
            name,
            path,
            alias: None,
            data,
        }
    }
}

/// Validated, read-only column hierarchy of a table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiColumnTree {
    columns: Vec<ZiColumn>,
}

impl ZiColumnTree {
    /// Builds a tree from top-level columns, rejecting duplicate sibling names.
    pub fn new(columns: Vec<ZiColumn>) -> Result<Self> {
        let root = ZiColumnPath::root();
        let columns: Vec<ZiColumn> = columns.into_iter().map(|c| c.rebased(&root)).collect();
        validate_unique(&columns, &root)?;
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[ZiColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn find(&self, path: &ZiColumnPath) -> Option<&ZiColumn> {
        let mut candidates = self.columns.as_slice();
        let mut found = None;
        for segment in path.segments() {
            let column = candidates.iter().find(|c| c.name() == segment)?;
            candidates = column.children();
            found = Some(column);
        }
        found
    }

    /// Every column in pre-order, descending into groups but not frames.
    pub fn iter_depth_first(&self) -> Vec<&ZiColumn> {
        fn walk<'a>(columns: &'a [ZiColumn], out: &mut Vec<&'a ZiColumn>) {
            for column in columns {
                out.push(column);
                walk(column.children(), out);
            }
        }

        let mut out = Vec::new();
        walk(&self.columns, &mut out);
        out
    }
}

fn validate_unique(columns: &[ZiColumn], scope: &ZiColumnPath) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.name()) {
            let location = if scope.is_empty() {
                "table root".to_string()
            } else {
                format!("group '{scope}'")
            };
            return Err(ZiError::schema(format!(
                "duplicate column name '{}' in {location}",
                column.name()
            )));
        }
        match column.data() {
            ZiColumnData::Group { children } => validate_unique(children, column.path())?,
            ZiColumnData::Frame { schema } => validate_unique(schema, &ZiColumnPath::root())?,
            ZiColumnData::Value { .. } => {}
        }
    }
    Ok(())
}
