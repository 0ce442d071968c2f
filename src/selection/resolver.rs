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

//! Evaluation of selection expressions.
//!
//! Every combinator resolves to an ordered `Vec<ZiColumn>` whose entries carry
//! absolute paths, so results produced in different scopes can be compared
//! and subtracted directly.

use crate::column::{ZiColumn, ZiColumnPath};
use crate::errors::{Result, ZiError};
use crate::selection::context::ZiResolutionContext;
use crate::selection::except::resolve_except;
use crate::selection::predicate::ZiColumnPredicate;
use crate::selection::simplify::{distinct, simplify};
use crate::selection::{ZiColumnRef, ZiColumnSet, ZiPick, ZiSlice};

/// Anything that can be resolved into an ordered column sequence.
///
/// Resolution is a pure function of the context: no caching, no state kept
/// between calls. Duplicates are allowed unless explicitly removed.
pub trait ZiColumnsResolver {
    fn resolve(&self, context: &ZiResolutionContext<'_>) -> Result<Vec<ZiColumn>>;
}

impl ZiColumnsResolver for ZiColumnRef {
    fn resolve(&self, context: &ZiResolutionContext<'_>) -> Result<Vec<ZiColumn>> {
        match self {
            ZiColumnRef::Name(text) => {
                let path = ZiColumnPath::parse(text, context.config().path_separator)?;
                resolve_path(context, &path)
            }
            ZiColumnRef::Path(path) => resolve_path(context, path),
            ZiColumnRef::Typed { path, data_type } => {
                let columns = resolve_path(context, path)?;
                for column in &columns {
                    let compatible = column
                        .data_type()
                        .map(|declared| declared.is_subtype_of(data_type))
                        .unwrap_or(false);
                    if !compatible {
                        return Err(ZiError::TypeMismatch {
                            path: column.path().to_string(),
                            expected: data_type.to_string(),
                            actual: column
                                .data_type()
                                .map(|t| t.to_string())
                                .unwrap_or_else(|| column.kind().as_str().to_string()),
                        });
                    }
                }
                Ok(columns)
            }
            ZiColumnRef::Resolved(columns) => Ok(columns.clone()),
        }
    }
}

/// Walks `path` from the current scope through nested groups.
fn resolve_path(context: &ZiResolutionContext<'_>, path: &ZiColumnPath) -> Result<Vec<ZiColumn>> {
    if path.is_empty() {
        return Err(ZiError::validation("column reference may not be empty"));
    }

    let mut candidates = context.scope_columns();
    let mut current: Option<&ZiColumn> = None;

    for segment in path.segments() {
        if let Some(parent) = current {
            if !parent.is_group() {
                return Err(ZiError::not_a_group(parent.path().to_string()));
            }
            candidates = parent.children();
        }

        match candidates.iter().find(|column| column.name() == segment) {
            Some(column) => current = Some(column),
            None => {
                let scope = current
                    .map(|parent| parent.path().clone())
                    .unwrap_or_else(|| context.scope_path());
                context.unresolved(&path.to_string(), &scope)?;
                return Ok(Vec::new());
            }
        }
    }

    Ok(current.cloned().into_iter().collect())
}

impl ZiColumnsResolver for ZiColumnSet {
    fn resolve(&self, context: &ZiResolutionContext<'_>) -> Result<Vec<ZiColumn>> {
        match self {
            ZiColumnSet::All => Ok(context.scope_columns().to_vec()),
            ZiColumnSet::Cols(references) => {
                let mut out = Vec::new();
                for reference in references {
                    out.extend(reference.resolve(context)?);
                }
                Ok(out)
            }
            ZiColumnSet::Indices(indices) => {
                let columns = context.scope_columns();
                let mut out = Vec::with_capacity(indices.len());
                for &index in indices {
                    match columns.get(index) {
                        Some(column) => out.push(column.clone()),
                        None => context.unresolved(&format!("#{index}"), &context.scope_path())?,
                    }
                }
                Ok(out)
            }
            ZiColumnSet::Where(predicate) => Ok(context
                .scope_columns()
                .iter()
                .filter(|column| predicate.matches(column))
                .cloned()
                .collect()),
            ZiColumnSet::AtAnyDepth(predicate) => {
                let mut out = Vec::new();
                collect_at_any_depth(context.scope_columns(), predicate, &mut out);
                Ok(out)
            }
            ZiColumnSet::In { group, selection } => {
                let groups = group.resolve(context)?;
                let mut out = Vec::new();
                for group in &groups {
                    let scoped = context.descend(group)?;
                    out.extend(selection.resolve(&scoped)?);
                }
                Ok(out)
            }
            ZiColumnSet::And(left, right) => {
                let mut out = left.resolve(context)?;
                out.extend(right.resolve(context)?);
                Ok(out)
            }
            ZiColumnSet::Except(source, exclusion) => resolve_except(source, exclusion, context),
            ZiColumnSet::Slice(source, slice) => Ok(slice.apply(source.resolve(context)?)),
            ZiColumnSet::Filter(source, predicate) => {
                let mut columns = source.resolve(context)?;
                columns.retain(|column| predicate.matches(column));
                Ok(columns)
            }
            ZiColumnSet::Distinct(source) => Ok(distinct(source.resolve(context)?)),
            ZiColumnSet::Simplify(source) => Ok(simplify(source.resolve(context)?)),
            ZiColumnSet::ColsInGroups(source) => Ok(source
                .resolve(context)?
                .iter()
                .flat_map(|column| column.children().iter().cloned())
                .collect()),
            ZiColumnSet::Pick(source, pick) => pick.apply(source.resolve(context)?, context),
            ZiColumnSet::Named(source, name) => {
                let mut columns = source.resolve(context)?;
                if columns.len() != 1 {
                    return Err(ZiError::AmbiguousSingle {
                        count: columns.len(),
                    });
                }
                let column = columns.remove(0);
                Ok(vec![column.named(name.clone())])
            }
        }
    }
}

fn collect_at_any_depth(columns: &[ZiColumn], predicate: &ZiColumnPredicate, out: &mut Vec<ZiColumn>) {
    for column in columns {
        if predicate.matches(column) {
            out.push(column.clone());
        }
        collect_at_any_depth(column.children(), predicate, out);
    }
}

impl ZiSlice {
    pub fn apply(&self, mut columns: Vec<ZiColumn>) -> Vec<ZiColumn> {
        let len = columns.len();
        match self {
            ZiSlice::Take(count) => {
                columns.truncate(*count);
                columns
            }
            ZiSlice::TakeLast(count) => columns.split_off(len.saturating_sub(*count)),
            ZiSlice::Drop(count) => columns.split_off((*count).min(len)),
            ZiSlice::DropLast(count) => {
                columns.truncate(len.saturating_sub(*count));
                columns
            }
            ZiSlice::TakeWhile(predicate) => columns
                .into_iter()
                .take_while(|column| predicate.matches(column))
                .collect(),
            ZiSlice::DropWhile(predicate) => columns
                .into_iter()
                .skip_while(|column| predicate.matches(column))
                .collect(),
            ZiSlice::TakeLastWhile(predicate) => {
                let kept = trailing_matches(&columns, predicate);
                columns.split_off(len - kept)
            }
            ZiSlice::DropLastWhile(predicate) => {
                let dropped = trailing_matches(&columns, predicate);
                columns.truncate(len - dropped);
                columns
            }
        }
    }
}

fn trailing_matches(columns: &[ZiColumn], predicate: &ZiColumnPredicate) -> usize {
    columns
        .iter()
        .rev()
        .take_while(|column| predicate.matches(column))
        .count()
}

impl ZiPick {
    fn apply(&self, columns: Vec<ZiColumn>, context: &ZiResolutionContext<'_>) -> Result<Vec<ZiColumn>> {
        let (predicate, label) = match self {
            ZiPick::First(predicate) => (predicate, "first column"),
            ZiPick::Last(predicate) => (predicate, "last column"),
            ZiPick::Single(predicate) => (predicate, "single column"),
        };

        let mut candidates: Vec<ZiColumn> = match predicate {
            Some(predicate) => columns.into_iter().filter(|c| predicate.matches(c)).collect(),
            None => columns,
        };

        let picked = match self {
            ZiPick::First(_) => candidates.drain(..).next(),
            ZiPick::Last(_) => candidates.pop(),
            ZiPick::Single(_) => {
                if candidates.len() != 1 {
                    return Err(ZiError::AmbiguousSingle {
                        count: candidates.len(),
                    });
                }
                candidates.pop()
            }
        };

        match picked {
            Some(column) => Ok(vec![column]),
            None => Err(ZiError::column_not_found(label, context.scope_path().to_string())),
        }
    }
}
