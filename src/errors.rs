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

//! # Zicol Error Module
//!
//! This module defines the error types used throughout the column selection
//! engine for consistent error handling and reporting.
//!
//! ## Error Categories
//!
//! - **ColumnNotFound**: A name, path or index did not resolve in the current scope
//! - **NotAColumnGroup**: A group-only operation was applied to a leaf column
//! - **TypeMismatch**: A typed column reference disagrees with the declared type
//! - **AmbiguousSingle**: `single_col` resolved to zero or several columns
//! - **Io**: Filesystem errors while loading rows
//! - **Schema**: Malformed column trees or conflicting row layouts
//! - **Validation**: Invalid parameters or selection programs
//! - **Operator**: Failures raised by record operators
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! Resolution errors are never retried inside the engine: resolution is pure,
//! so the same expression against the same tree always fails the same way.
//!
//! ## Usage
//!
//! ```rust
//! use zicol::errors::{Result, ZiError};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(ZiError::column_not_found(name, "address"))
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Zicol.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zicol.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum ZiError {
    /// A referenced name, path or index does not exist in the resolution scope.
    #[error("column '{name}' not found in {scope}")]
    ColumnNotFound { name: String, scope: String },

    /// A group-only operation was invoked on a value or frame column.
    #[error("column '{path}' is not a column group")]
    NotAColumnGroup { path: String },

    /// A typed reference resolved to a column of an incompatible type.
    #[error("column '{path}' has type {actual}, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// `single_col` resolved to a number of columns other than one.
    #[error("expected exactly one column, selection resolved to {count}")]
    AmbiguousSingle { count: usize },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Errors caused by malformed column trees or incompatible row layout.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Any failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZiError {
    fn from(err: serde_yaml::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<regex::Error> for ZiError {
    fn from(err: regex::Error) -> Self {
        ZiError::validation(format!("invalid name pattern: {err}"))
    }
}

impl ZiError {
    /// Helper to construct missing-column errors. An empty scope means the table root.
    pub fn column_not_found(name: impl Into<String>, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        ZiError::ColumnNotFound {
            name: name.into(),
            scope: if scope.is_empty() {
                "table root".to_string()
            } else {
                format!("group '{scope}'")
            },
        }
    }

    /// Helper to construct errors for group-only operations on leaves.
    pub fn not_a_group(path: impl Into<String>) -> Self {
        ZiError::NotAColumnGroup { path: path.into() }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        ZiError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZiError::Internal(message.into())
    }

    /// Returns true for errors produced while resolving a selection.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ZiError::ColumnNotFound { .. }
                | ZiError::NotAColumnGroup { .. }
                | ZiError::TypeMismatch { .. }
                | ZiError::AmbiguousSingle { .. }
        )
    }
}
