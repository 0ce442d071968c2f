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

//! # Zicol Operator Module
//!
//! Batch operators built on column selections. An operator receives a batch
//! of records, infers the batch's column tree, resolves its selection against
//! it and returns the projected batch.
//!
//! ```rust
//! use zicol::operator::ZiOperator;
//! use zicol::record::ZiRecordBatch;
//! use zicol::errors::Result;
//!
//! #[derive(Debug)]
//! struct Passthrough;
//!
//! impl ZiOperator for Passthrough {
//!     fn name(&self) -> &'static str {
//!         "columns.passthrough"
//!     }
//!
//!     fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
//!         Ok(batch)
//!     }
//! }
//! ```

use crate::errors::{Result, ZiError};
use crate::record::ZiRecordBatch;

/// Contract every record operator fulfills.
pub trait ZiOperator: std::fmt::Debug {
    /// Registry name, also used in error messages.
    fn name(&self) -> &'static str;

    /// Applies the operator to an incoming batch of records.
    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch>;
}

/// Runs `operator`, attaching its name to failures.
///
/// Column resolution errors are returned unchanged so callers can still
/// match on the missing column or the offending path.
pub fn execute_operator(operator: &dyn ZiOperator, batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
    operator.apply(batch).map_err(|err| {
        if err.is_resolution_error() {
            err
        } else {
            ZiError::operator(operator.name(), err.to_string())
        }
    })
}

/// Applies operators in order, feeding each the previous output.
pub fn execute_chain(
    operators: &[Box<dyn ZiOperator + Send + Sync>],
    batch: ZiRecordBatch,
) -> Result<ZiRecordBatch> {
    let mut current = batch;
    for operator in operators {
        log::debug!("running operator '{}' on {} records", operator.name(), current.len());
        current = execute_operator(operator.as_ref(), current)?;
    }
    Ok(current)
}
