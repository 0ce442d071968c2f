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

//! Column predicates used by `cols_where`, `filter`, the name filters,
//! `cols_of` and `cols_at_any_depth`.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::column::{ZiColumn, ZiColumnKind, ZiDataType};
use crate::errors::Result;

/// Caller-supplied predicate over column metadata.
#[derive(Clone)]
pub struct ZiColumnFilter(Arc<dyn Fn(&ZiColumn) -> bool + Send + Sync>);

impl ZiColumnFilter {
    pub fn new<F>(filter: F) -> Self
    where
        F: Fn(&ZiColumn) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(filter))
    }

    pub fn test(&self, column: &ZiColumn) -> bool {
        (self.0)(column)
    }
}

impl fmt::Debug for ZiColumnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ZiColumnFilter(<fn>)")
    }
}

/// Boolean predicate over a column's name, kind and declared type.
///
/// Name predicates look at the column's own name only, never the full path.
#[derive(Clone, Debug)]
pub enum ZiColumnPredicate {
    Any,
    NameEquals { name: String, ignore_case: bool },
    NameContains { text: String, ignore_case: bool },
    NameStartsWith { prefix: String, ignore_case: bool },
    NameEndsWith { suffix: String, ignore_case: bool },
    NameMatches(Regex),
    KindIs(Vec<ZiColumnKind>),
    /// Declared type is a subtype of the given one; groups never match.
    TypeOf(ZiDataType),
    Not(Box<ZiColumnPredicate>),
    AllOf(Vec<ZiColumnPredicate>),
    AnyOf(Vec<ZiColumnPredicate>),
    Custom(ZiColumnFilter),
}

impl ZiColumnPredicate {
    pub fn custom<F>(filter: F) -> Self
    where
        F: Fn(&ZiColumn) -> bool + Send + Sync + 'static,
    {
        ZiColumnPredicate::Custom(ZiColumnFilter::new(filter))
    }

    pub fn name_equals(name: impl Into<String>, ignore_case: bool) -> Self {
        ZiColumnPredicate::NameEquals {
            name: name.into(),
            ignore_case,
        }
    }

    pub fn name_contains(text: impl Into<String>, ignore_case: bool) -> Self {
        ZiColumnPredicate::NameContains {
            text: text.into(),
            ignore_case,
        }
    }

    pub fn name_starts_with(prefix: impl Into<String>, ignore_case: bool) -> Self {
        ZiColumnPredicate::NameStartsWith {
            prefix: prefix.into(),
            ignore_case,
        }
    }

    pub fn name_ends_with(suffix: impl Into<String>, ignore_case: bool) -> Self {
        ZiColumnPredicate::NameEndsWith {
            suffix: suffix.into(),
            ignore_case,
        }
    }

    pub fn name_matches(pattern: &str) -> Result<Self> {
        Ok(ZiColumnPredicate::NameMatches(Regex::new(pattern)?))
    }

    pub fn kind_is<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ZiColumnKind>,
    {
        ZiColumnPredicate::KindIs(kinds.into_iter().collect())
    }

    pub fn type_of(data_type: ZiDataType) -> Self {
        ZiColumnPredicate::TypeOf(data_type)
    }

    pub fn negate(self) -> Self {
        ZiColumnPredicate::Not(Box::new(self))
    }

    pub fn matches(&self, column: &ZiColumn) -> bool {
        let name = column.name();
        match self {
            ZiColumnPredicate::Any => true,
            ZiColumnPredicate::NameEquals { name: other, ignore_case } => {
                compare_text(name, other, *ignore_case, |a, b| a == b)
            }
            ZiColumnPredicate::NameContains { text, ignore_case } => {
                compare_text(name, text, *ignore_case, |a, b| a.contains(b))
            }
            ZiColumnPredicate::NameStartsWith { prefix, ignore_case } => {
                compare_text(name, prefix, *ignore_case, |a, b| a.starts_with(b))
            }
            ZiColumnPredicate::NameEndsWith { suffix, ignore_case } => {
                compare_text(name, suffix, *ignore_case, |a, b| a.ends_with(b))
            }
            ZiColumnPredicate::NameMatches(re) => re.is_match(name),
            ZiColumnPredicate::KindIs(kinds) => kinds.contains(&column.kind()),
            ZiColumnPredicate::TypeOf(target) => column
                .data_type()
                .map(|declared| declared.is_subtype_of(target))
                .unwrap_or(false),
            ZiColumnPredicate::Not(inner) => !inner.matches(column),
            ZiColumnPredicate::AllOf(all) => all.iter().all(|p| p.matches(column)),
            ZiColumnPredicate::AnyOf(any) => any.iter().any(|p| p.matches(column)),
            ZiColumnPredicate::Custom(filter) => filter.test(column),
        }
    }
}

fn compare_text(haystack: &str, needle: &str, ignore_case: bool, op: fn(&str, &str) -> bool) -> bool {
    if ignore_case {
        op(&haystack.to_lowercase(), &needle.to_lowercase())
    } else {
        op(haystack, needle)
    }
}
