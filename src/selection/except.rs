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

//! Structural exception ("except") resolution.
//!
//! `S except E` removes the columns of `E` from `S` without flattening groups:
//! when `E` names a column nested inside a group selected in `S`, the group is
//! kept and rebuilt from its remaining children, recursively.
//!
//! Two rules complete the algorithm:
//!
//! - a group whose children are all excluded disappears from the result
//! - the result is de-duplicated by path, so repeated references to the same
//!   group collapse: `cols(g, g, g.age, g.age) except g.age == cols(g) except g.age`

use std::collections::HashSet;

use crate::column::{ZiColumn, ZiColumnPath};
use crate::errors::Result;
use crate::selection::context::ZiResolutionContext;
use crate::selection::resolver::ZiColumnsResolver;
use crate::selection::simplify::distinct;
use crate::selection::ZiColumnSet;

/// Resolves both sides in the same context, then subtracts structurally.
pub(crate) fn resolve_except(
    source: &ZiColumnSet,
    exclusion: &ZiColumnSet,
    context: &ZiResolutionContext<'_>,
) -> Result<Vec<ZiColumn>> {
    let columns = source.resolve(context)?;
    let excluded: Vec<ZiColumnPath> = exclusion
        .resolve(context)?
        .iter()
        .map(|column| column.path().clone())
        .collect();

    log::debug!(
        "excepting {} columns from {} resolved columns",
        excluded.len(),
        columns.len()
    );

    Ok(distinct(except_columns(columns, &excluded)))
}

/// Removes every column whose path is in `excluded`, rebuilding any group
/// that contains an excluded descendant. Order is preserved.
pub fn except_columns(columns: Vec<ZiColumn>, excluded: &[ZiColumnPath]) -> Vec<ZiColumn> {
    let exact: HashSet<&ZiColumnPath> = excluded.iter().collect();
    except_with(columns, &exact, excluded)
}

fn except_with(
    columns: Vec<ZiColumn>,
    exact: &HashSet<&ZiColumnPath>,
    excluded: &[ZiColumnPath],
) -> Vec<ZiColumn> {
    columns
        .into_iter()
        .filter_map(|column| {
            if exact.contains(column.path()) {
                return None;
            }

            let overlaps = column.is_group()
                && excluded.iter().any(|path| column.path().is_ancestor_of(path));
            if !overlaps {
                return Some(column);
            }

            let children = except_with(column.children().to_vec(), exact, excluded);
            if children.is_empty() {
                None
            } else {
                Some(column.with_children(children))
            }
        })
        .collect()
}
