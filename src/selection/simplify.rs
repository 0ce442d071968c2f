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

//! Path-based de-duplication and simplification of resolved columns.

use std::collections::HashSet;

use crate::column::{ZiColumn, ZiColumnPath};

/// Keeps the first occurrence of every path.
pub fn distinct(columns: Vec<ZiColumn>) -> Vec<ZiColumn> {
    let mut seen: HashSet<ZiColumnPath> = HashSet::with_capacity(columns.len());
    columns
        .into_iter()
        .filter(|column| seen.insert(column.path().clone()))
        .collect()
}

/// `distinct`, then drops any column already contained in another selected group.
///
/// A group rebuilt by `except` only covers the children it still holds.
pub fn simplify(columns: Vec<ZiColumn>) -> Vec<ZiColumn> {
    let unique = distinct(columns);
    let covered: Vec<bool> = unique
        .iter()
        .map(|column| unique.iter().any(|other| covers(other, column.path())))
        .collect();

    unique
        .into_iter()
        .zip(covered)
        .filter_map(|(column, covered)| (!covered).then_some(column))
        .collect()
}

fn covers(group: &ZiColumn, path: &ZiColumnPath) -> bool {
    if !group.path().is_ancestor_of(path) {
        return false;
    }
    path.segments()[group.path().len()..]
        .iter()
        .try_fold(group, |current, segment| current.child(segment))
        .is_some()
}
