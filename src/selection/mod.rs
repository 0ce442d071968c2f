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

//! # Selection Algebra Module
//!
//! A selection is a declarative tree of combinators ([`ZiColumnSet`]) that is
//! resolved against a [`ZiColumnTree`] into an ordered list of columns. The
//! expression is never mutated; each resolution runs fresh against the tree.
//!
//! ## Components
//!
//! - **context**: the per-call [`ZiResolutionContext`] (tree + current scope)
//! - **predicate**: column predicates for filters and depth-first search
//! - **resolver**: the [`ZiColumnsResolver`] evaluator for every combinator
//! - **except**: structural set difference through nested column groups
//! - **simplify**: path de-duplication and ancestor subsumption
//!
//! ## Column References
//!
//! Every way of naming a column is normalized into a [`ZiColumnRef`] before
//! resolution: textual names (`"address.street"`, split on the configured
//! separator), explicit paths, typed references and already-resolved columns.
//!
//! ## Usage Example
//!
//! ```rust
//! use zicol::selection::{all, ZiColumnPredicate};
//!
//! let selection = all()
//!     .except("address.street")
//!     .and(zicol::selection::cols_at_any_depth(ZiColumnPredicate::name_contains("id", true)))
//!     .distinct();
//! ```

pub mod context;
pub mod except;
pub mod predicate;
pub mod resolver;
pub mod simplify;

pub use context::ZiResolutionContext;
pub use except::except_columns;
pub use predicate::{ZiColumnFilter, ZiColumnPredicate};
pub use resolver::ZiColumnsResolver;
pub use simplify::{distinct, simplify};

use crate::column::{ZiColumn, ZiColumnKind, ZiColumnPath, ZiColumnTree, ZiDataType};
use crate::config::ZiResolverConfig;
use crate::errors::Result;

/// Normalized reference to one column (or an already-resolved set).
#[derive(Clone, Debug, PartialEq)]
pub enum ZiColumnRef {
    /// Textual reference; nested columns are written with the path separator.
    Name(String),
    Path(ZiColumnPath),
    /// Resolved by path, then checked against the expected type.
    Typed {
        path: ZiColumnPath,
        data_type: ZiDataType,
    },
    Resolved(Vec<ZiColumn>),
}

impl ZiColumnRef {
    pub fn name(name: impl Into<String>) -> Self {
        ZiColumnRef::Name(name.into())
    }

    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ZiColumnRef::Path(ZiColumnPath::new(segments))
    }

    pub fn typed(path: ZiColumnPath, data_type: ZiDataType) -> Self {
        ZiColumnRef::Typed { path, data_type }
    }
}

impl From<&str> for ZiColumnRef {
    fn from(name: &str) -> Self {
        ZiColumnRef::Name(name.to_string())
    }
}

impl From<String> for ZiColumnRef {
    fn from(name: String) -> Self {
        ZiColumnRef::Name(name)
    }
}

impl From<ZiColumnPath> for ZiColumnRef {
    fn from(path: ZiColumnPath) -> Self {
        ZiColumnRef::Path(path)
    }
}

impl From<ZiColumn> for ZiColumnRef {
    fn from(column: ZiColumn) -> Self {
        ZiColumnRef::Resolved(vec![column])
    }
}

impl From<Vec<ZiColumn>> for ZiColumnRef {
    fn from(columns: Vec<ZiColumn>) -> Self {
        ZiColumnRef::Resolved(columns)
    }
}

/// Positional slicing over a resolved sequence. Counts past the end clamp.
#[derive(Clone, Debug)]
pub enum ZiSlice {
    Take(usize),
    TakeLast(usize),
    Drop(usize),
    DropLast(usize),
    TakeWhile(ZiColumnPredicate),
    TakeLastWhile(ZiColumnPredicate),
    DropWhile(ZiColumnPredicate),
    DropLastWhile(ZiColumnPredicate),
}

/// Single-column picks.
#[derive(Clone, Debug)]
pub enum ZiPick {
    First(Option<ZiColumnPredicate>),
    Last(Option<ZiColumnPredicate>),
    Single(Option<ZiColumnPredicate>),
}

/// Declarative column selection expression.
#[derive(Clone, Debug)]
pub enum ZiColumnSet {
    /// Direct children of the current scope, in declared order.
    All,
    Cols(Vec<ZiColumnRef>),
    /// Direct children by 0-based position.
    Indices(Vec<usize>),
    /// Direct children matching a predicate.
    Where(ZiColumnPredicate),
    /// Pre-order search through groups at every depth.
    AtAnyDepth(ZiColumnPredicate),
    /// Resolves `selection` with each group of `group` as scope.
    In {
        group: ZiColumnRef,
        selection: Box<ZiColumnSet>,
    },
    And(Box<ZiColumnSet>, Box<ZiColumnSet>),
    Except(Box<ZiColumnSet>, Box<ZiColumnSet>),
    Slice(Box<ZiColumnSet>, ZiSlice),
    Filter(Box<ZiColumnSet>, ZiColumnPredicate),
    Distinct(Box<ZiColumnSet>),
    Simplify(Box<ZiColumnSet>),
    ColsInGroups(Box<ZiColumnSet>),
    Pick(Box<ZiColumnSet>, ZiPick),
    Named(Box<ZiColumnSet>, String),
}

/// All direct children of the current scope.
pub fn all() -> ZiColumnSet {
    ZiColumnSet::All
}

pub fn col(reference: impl Into<ZiColumnRef>) -> ZiColumnSet {
    ZiColumnSet::Cols(vec![reference.into()])
}

pub fn cols<I, R>(references: I) -> ZiColumnSet
where
    I: IntoIterator<Item = R>,
    R: Into<ZiColumnRef>,
{
    ZiColumnSet::Cols(references.into_iter().map(Into::into).collect())
}

pub fn cols_at<I>(indices: I) -> ZiColumnSet
where
    I: IntoIterator<Item = usize>,
{
    ZiColumnSet::Indices(indices.into_iter().collect())
}

pub fn cols_where(predicate: ZiColumnPredicate) -> ZiColumnSet {
    ZiColumnSet::Where(predicate)
}

pub fn cols_at_any_depth(predicate: ZiColumnPredicate) -> ZiColumnSet {
    ZiColumnSet::AtAnyDepth(predicate)
}

/// Direct children whose declared type is a subtype of `data_type`.
pub fn cols_of(data_type: ZiDataType) -> ZiColumnSet {
    ZiColumnSet::Where(ZiColumnPredicate::TypeOf(data_type))
}

pub fn cols_of_kind<I>(kinds: I) -> ZiColumnSet
where
    I: IntoIterator<Item = ZiColumnKind>,
{
    ZiColumnSet::Where(ZiColumnPredicate::kind_is(kinds))
}

/// `all()` except the given selection, in the current scope.
pub fn all_except(selection: impl Into<ZiColumnSet>) -> ZiColumnSet {
    all().except(selection)
}

pub fn col_group(reference: impl Into<ZiColumnRef>) -> ZiColumnGroupRef {
    ZiColumnGroupRef {
        reference: reference.into(),
    }
}

/// Reference to a column group, entry point of group-scoped operations.
#[derive(Clone, Debug)]
pub struct ZiColumnGroupRef {
    reference: ZiColumnRef,
}

impl ZiColumnGroupRef {
    /// Resolves `selection` with this group as scope.
    pub fn select(&self, selection: impl Into<ZiColumnSet>) -> ZiColumnSet {
        ZiColumnSet::In {
            group: self.reference.clone(),
            selection: Box::new(selection.into()),
        }
    }

    pub fn all(&self) -> ZiColumnSet {
        self.select(ZiColumnSet::All)
    }

    pub fn cols<I, R>(&self, references: I) -> ZiColumnSet
    where
        I: IntoIterator<Item = R>,
        R: Into<ZiColumnRef>,
    {
        self.select(cols(references))
    }

    /// Children of the group except `selection`, resolved relative to the group.
    pub fn all_cols_except(&self, selection: impl Into<ZiColumnSet>) -> ZiColumnSet {
        self.select(all_except(selection))
    }

    pub fn cols_at_any_depth(&self, predicate: ZiColumnPredicate) -> ZiColumnSet {
        self.select(ZiColumnSet::AtAnyDepth(predicate))
    }
}

impl From<ZiColumnGroupRef> for ZiColumnSet {
    fn from(group: ZiColumnGroupRef) -> Self {
        ZiColumnSet::Cols(vec![group.reference])
    }
}

impl From<ZiColumnRef> for ZiColumnSet {
    fn from(reference: ZiColumnRef) -> Self {
        ZiColumnSet::Cols(vec![reference])
    }
}

impl From<&str> for ZiColumnSet {
    fn from(name: &str) -> Self {
        col(name)
    }
}

impl From<String> for ZiColumnSet {
    fn from(name: String) -> Self {
        col(name)
    }
}

impl From<ZiColumnPath> for ZiColumnSet {
    fn from(path: ZiColumnPath) -> Self {
        col(path)
    }
}

impl From<ZiColumn> for ZiColumnSet {
    fn from(column: ZiColumn) -> Self {
        col(column)
    }
}

impl<R: Into<ZiColumnRef>> From<Vec<R>> for ZiColumnSet {
    fn from(references: Vec<R>) -> Self {
        cols(references)
    }
}

impl<R: Into<ZiColumnRef>, const N: usize> From<[R; N]> for ZiColumnSet {
    fn from(references: [R; N]) -> Self {
        cols(references)
    }
}

impl ZiColumnSet {
    /// Concatenation: `self` then `other`, duplicates retained.
    pub fn and(self, other: impl Into<ZiColumnSet>) -> Self {
        ZiColumnSet::And(Box::new(self), Box::new(other.into()))
    }

    /// Structural difference; the exclusion is resolved in the same scope.
    pub fn except(self, exclusion: impl Into<ZiColumnSet>) -> Self {
        ZiColumnSet::Except(Box::new(self), Box::new(exclusion.into()))
    }

    pub fn take(self, count: usize) -> Self {
        self.slice(ZiSlice::Take(count))
    }

    pub fn take_last(self, count: usize) -> Self {
        self.slice(ZiSlice::TakeLast(count))
    }

    pub fn drop(self, count: usize) -> Self {
        self.slice(ZiSlice::Drop(count))
    }

    pub fn drop_last(self, count: usize) -> Self {
        self.slice(ZiSlice::DropLast(count))
    }

    pub fn take_while(self, predicate: ZiColumnPredicate) -> Self {
        self.slice(ZiSlice::TakeWhile(predicate))
    }

    pub fn take_last_while(self, predicate: ZiColumnPredicate) -> Self {
        self.slice(ZiSlice::TakeLastWhile(predicate))
    }

    pub fn drop_while(self, predicate: ZiColumnPredicate) -> Self {
        self.slice(ZiSlice::DropWhile(predicate))
    }

    pub fn drop_last_while(self, predicate: ZiColumnPredicate) -> Self {
        self.slice(ZiSlice::DropLastWhile(predicate))
    }

    fn slice(self, slice: ZiSlice) -> Self {
        ZiColumnSet::Slice(Box::new(self), slice)
    }

    pub fn filter(self, predicate: ZiColumnPredicate) -> Self {
        ZiColumnSet::Filter(Box::new(self), predicate)
    }

    pub fn distinct(self) -> Self {
        ZiColumnSet::Distinct(Box::new(self))
    }

    /// Drops columns already covered by a selected ancestor group.
    pub fn simplify(self) -> Self {
        ZiColumnSet::Simplify(Box::new(self))
    }

    pub fn name_contains(self, text: impl Into<String>, ignore_case: bool) -> Self {
        self.filter(ZiColumnPredicate::name_contains(text, ignore_case))
    }

    pub fn name_starts_with(self, prefix: impl Into<String>, ignore_case: bool) -> Self {
        self.filter(ZiColumnPredicate::name_starts_with(prefix, ignore_case))
    }

    pub fn name_ends_with(self, suffix: impl Into<String>, ignore_case: bool) -> Self {
        self.filter(ZiColumnPredicate::name_ends_with(suffix, ignore_case))
    }

    pub fn name_matches(self, pattern: &str) -> Result<Self> {
        Ok(self.filter(ZiColumnPredicate::name_matches(pattern)?))
    }

    pub fn cols_of(self, data_type: ZiDataType) -> Self {
        self.filter(ZiColumnPredicate::TypeOf(data_type))
    }

    pub fn cols_of_kind<I>(self, kinds: I) -> Self
    where
        I: IntoIterator<Item = ZiColumnKind>,
    {
        self.filter(ZiColumnPredicate::kind_is(kinds))
    }

    /// Children of every group in the set; leaves contribute nothing.
    pub fn cols_in_groups(self) -> Self {
        ZiColumnSet::ColsInGroups(Box::new(self))
    }

    pub fn first_col(self) -> Self {
        ZiColumnSet::Pick(Box::new(self), ZiPick::First(None))
    }

    pub fn first_col_where(self, predicate: ZiColumnPredicate) -> Self {
        ZiColumnSet::Pick(Box::new(self), ZiPick::First(Some(predicate)))
    }

    pub fn last_col(self) -> Self {
        ZiColumnSet::Pick(Box::new(self), ZiPick::Last(None))
    }

    pub fn last_col_where(self, predicate: ZiColumnPredicate) -> Self {
        ZiColumnSet::Pick(Box::new(self), ZiPick::Last(Some(predicate)))
    }

    pub fn single_col(self) -> Self {
        ZiColumnSet::Pick(Box::new(self), ZiPick::Single(None))
    }

    pub fn single_col_where(self, predicate: ZiColumnPredicate) -> Self {
        ZiColumnSet::Pick(Box::new(self), ZiPick::Single(Some(predicate)))
    }

    /// Attaches a display name; the selection must resolve to one column.
    pub fn named(self, name: impl Into<String>) -> Self {
        ZiColumnSet::Named(Box::new(self), name.into())
    }
}

impl ZiColumnTree {
    /// Resolves `selection` against the root with the default configuration.
    pub fn select(&self, selection: &ZiColumnSet) -> Result<Vec<ZiColumn>> {
        self.select_with(selection, &ZiResolverConfig::default())
    }

    pub fn select_with(
        &self,
        selection: &ZiColumnSet,
        config: &ZiResolverConfig,
    ) -> Result<Vec<ZiColumn>> {
        let context = ZiResolutionContext::new(self, config);
        let columns = selection.resolve(&context)?;
        log::debug!(
            "resolved {} columns from {} root columns",
            columns.len(),
            self.len()
        );
        Ok(columns)
    }
}
