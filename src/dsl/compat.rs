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

//! Operator name table for selection programs.
//!
//! Programs written against older releases use names that have since been
//! renamed. Those still compile, mapped onto the current operator, with a
//! deprecation warning logged once per step.

/// Operators that start a selection.
pub const SOURCE_OPERATORS: &[&str] = &[
    "all",
    "col",
    "cols",
    "cols_at",
    "cols_where",
    "cols_at_any_depth",
    "cols_of",
    "cols_of_kind",
    "all_except",
    "in",
    "all_cols_except",
];

/// Operators that refine the selection built so far.
pub const TRANSFORM_OPERATORS: &[&str] = &[
    "and",
    "except",
    "take",
    "take_last",
    "drop",
    "drop_last",
    "take_while",
    "take_last_while",
    "drop_while",
    "drop_last_while",
    "filter",
    "distinct",
    "simplify",
    "name_contains",
    "name_starts_with",
    "name_ends_with",
    "name_matches",
    "cols_in_groups",
    "first_col",
    "last_col",
    "single_col",
    "named",
];

/// Sources that double as filters when they follow another step.
pub const FILTERING_SOURCES: &[&str] = &["cols_where", "cols_of", "cols_of_kind"];

const DEPRECATED: &[(&str, &str)] = &[
    ("dfs", "cols_at_any_depth"),
    ("all_dfs", "cols_at_any_depth"),
    ("recursively", "cols_at_any_depth"),
    ("rec", "cols_at_any_depth"),
    ("all_recursively", "cols_at_any_depth"),
    ("first", "first_col"),
    ("last", "last_col"),
    ("single", "single_col"),
    ("children", "cols_where"),
    ("starts_with", "name_starts_with"),
    ("ends_with", "name_ends_with"),
    ("contains", "name_contains"),
    ("except_cols", "except"),
];

const ALIASES: &[(&str, &str)] = &[("into", "named"), ("select", "in"), ("col_group", "in")];

/// Canonical operator a program step refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZiOperatorName {
    pub canonical: &'static str,
    pub deprecated: bool,
}

impl ZiOperatorName {
    pub fn is_source(&self) -> bool {
        SOURCE_OPERATORS.contains(&self.canonical)
    }

    pub fn is_filtering_source(&self) -> bool {
        FILTERING_SOURCES.contains(&self.canonical)
    }
}

/// Looks `name` up, accepting camelCase spellings. `None` for unknown names.
pub fn lookup_operator(name: &str) -> Option<ZiOperatorName> {
    let normalized = to_snake_case(name.trim());

    if let Some((_, canonical)) = DEPRECATED.iter().find(|(old, _)| *old == normalized) {
        return Some(ZiOperatorName {
            canonical: *canonical,
            deprecated: true,
        });
    }

    if let Some((_, canonical)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
        return Some(ZiOperatorName {
            canonical: *canonical,
            deprecated: false,
        });
    }

    SOURCE_OPERATORS
        .iter()
        .chain(TRANSFORM_OPERATORS)
        .find(|op| **op == normalized)
        .map(|canonical| ZiOperatorName {
            canonical: *canonical,
            deprecated: false,
        })
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (idx, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out
}
