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

use serde_json::Value;

use crate::column::{ZiColumnKind, ZiDataType};
use crate::dsl::compat::{lookup_operator, ZiOperatorName};
use crate::dsl::ir::{ZiDSLNode, ZiDSLProgram};
use crate::dsl::parser::ZiDSLParser;
use crate::errors::{Result, ZiError};
use crate::selection::{
    self, col_group, ZiColumnPredicate, ZiColumnRef, ZiColumnSet,
};

/// Keys of a step config that describe a column predicate.
const PREDICATE_KEYS: &[&str] = &[
    "predicate",
    "where",
    "name",
    "contains",
    "starts_with",
    "ends_with",
    "matches",
    "kind",
    "kinds",
    "type",
    "not",
    "all_of",
    "any_of",
];

/// Turns a selection program into a [`ZiColumnSet`].
#[derive(Debug, Default)]
pub struct ZiDSLCompiler {
    strict: bool,
}

impl ZiDSLCompiler {
    pub fn new() -> Self {
        Self { strict: false }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parses `source` in any supported format and compiles it.
    pub fn compile_source(&self, source: &str) -> Result<ZiColumnSet> {
        let parsed = ZiDSLParser::new().strict(self.strict).parse(source)?;
        for warning in &parsed.warnings {
            log::warn!("selection program: {}", warning);
        }
        self.compile(&parsed.program)
    }

    /// Compiles a program given as a JSON value (array, `{"steps": ..}`,
    /// a single step object, or a line of text).
    pub fn compile_value(&self, value: &Value) -> Result<ZiColumnSet> {
        match value {
            Value::String(source) => self.compile_source(source),
            other => {
                let source = serde_json::to_string(other)?;
                self.compile_source(&source)
            }
        }
    }

    pub fn compile(&self, program: &ZiDSLProgram) -> Result<ZiColumnSet> {
        let mut current: Option<ZiColumnSet> = None;

        for node in &program.nodes {
            let Some(name) = self.lookup(node)? else {
                continue;
            };
            current = Some(self.compile_node(current, name, &node.config)?);
        }

        current.ok_or_else(|| ZiError::validation("selection program has no steps"))
    }

    fn lookup(&self, node: &ZiDSLNode) -> Result<Option<ZiOperatorName>> {
        match lookup_operator(&node.operator) {
            Some(name) => {
                if name.deprecated {
                    log::warn!(
                        "operator '{}' is deprecated, use '{}'",
                        node.operator,
                        name.canonical
                    );
                }
                Ok(Some(name))
            }
            None if self.strict => Err(ZiError::validation(format!(
                "Unknown operator: {}",
                node.operator
            ))),
            None => {
                log::warn!("Unknown operator '{}', skipping", node.operator);
                Ok(None)
            }
        }
    }

    fn compile_node(
        &self,
        current: Option<ZiColumnSet>,
        name: ZiOperatorName,
        config: &Value,
    ) -> Result<ZiColumnSet> {
        let op = name.canonical;

        if name.is_source() {
            return match current {
                None => self.compile_source_op(op, config),
                Some(set) if name.is_filtering_source() => {
                    Ok(set.filter(self.source_filter(op, config)?))
                }
                Some(_) => Err(ZiError::validation(format!(
                    "'{}' starts a selection and cannot follow another step",
                    op
                ))),
            };
        }

        let set = current.unwrap_or_else(selection::all);

        match op {
            "and" => Ok(set.and(self.nested_set(op, config)?)),
            "except" => Ok(set.except(self.nested_set(op, config)?)),
            "take" => Ok(set.take(count_arg(op, config)?)),
            "take_last" => Ok(set.take_last(count_arg(op, config)?)),
            "drop" => Ok(set.drop(count_arg(op, config)?)),
            "drop_last" => Ok(set.drop_last(count_arg(op, config)?)),
            "take_while" => Ok(set.take_while(predicate_of(config)?)),
            "take_last_while" => Ok(set.take_last_while(predicate_of(config)?)),
            "drop_while" => Ok(set.drop_while(predicate_of(config)?)),
            "drop_last_while" => Ok(set.drop_last_while(predicate_of(config)?)),
            "filter" => Ok(set.filter(predicate_of(config)?)),
            "distinct" => Ok(set.distinct()),
            "simplify" => Ok(set.simplify()),
            "name_contains" => Ok(set.name_contains(text_arg(op, config)?, ignore_case(config))),
            "name_starts_with" => {
                Ok(set.name_starts_with(text_arg(op, config)?, ignore_case(config)))
            }
            "name_ends_with" => Ok(set.name_ends_with(text_arg(op, config)?, ignore_case(config))),
            "name_matches" => set.name_matches(&text_arg(op, config)?),
            "cols_in_groups" => Ok(set.cols_in_groups()),
            "first_col" => Ok(match optional_predicate(config)? {
                Some(predicate) => set.first_col_where(predicate),
                None => set.first_col(),
            }),
            "last_col" => Ok(match optional_predicate(config)? {
                Some(predicate) => set.last_col_where(predicate),
                None => set.last_col(),
            }),
            "single_col" => Ok(match optional_predicate(config)? {
                Some(predicate) => set.single_col_where(predicate),
                None => set.single_col(),
            }),
            "named" => Ok(set.named(text_arg(op, config)?)),
            other => Err(ZiError::internal(format!("operator '{}' has no compiler", other))),
        }
    }

    fn compile_source_op(&self, op: &str, config: &Value) -> Result<ZiColumnSet> {
        match op {
            "all" => Ok(selection::all()),
            "col" | "cols" => {
                let names = names_from(config, &["names", "cols", "name"])?;
                if names.is_empty() {
                    return Err(missing(op, "column names"));
                }
                Ok(selection::cols(names))
            }
            "cols_at" => {
                let indices = list_arg(config, &["indices"])
                    .iter()
                    .map(|v| as_count(op, v))
                    .collect::<Result<Vec<_>>>()?;
                Ok(selection::cols_at(indices))
            }
            "cols_where" => Ok(selection::cols_where(predicate_of(config)?)),
            "cols_at_any_depth" => Ok(selection::cols_at_any_depth(predicate_of(config)?)),
            "cols_of" => Ok(selection::cols_of(type_arg(op, config)?)),
            "cols_of_kind" => Ok(selection::cols_of_kind(kinds_arg(op, config)?)),
            "all_except" => Ok(selection::all_except(self.nested_set(op, config)?)),
            "in" => {
                let (group, rest) = group_arg(op, config)?;
                let inner = self.optional_nested_set(config, &rest)?;
                Ok(col_group(group).select(inner.unwrap_or_else(selection::all)))
            }
            "all_cols_except" => {
                let (group, rest) = group_arg(op, config)?;
                let exclusion = self
                    .optional_nested_set(config, &rest)?
                    .ok_or_else(|| missing(op, "columns to exclude"))?;
                Ok(col_group(group).all_cols_except(exclusion))
            }
            other => Err(ZiError::internal(format!("operator '{}' has no compiler", other))),
        }
    }

    fn source_filter(&self, op: &str, config: &Value) -> Result<ZiColumnPredicate> {
        match op {
            "cols_of" => Ok(ZiColumnPredicate::type_of(type_arg(op, config)?)),
            "cols_of_kind" => Ok(ZiColumnPredicate::kind_is(kinds_arg(op, config)?)),
            _ => predicate_of(config),
        }
    }

    fn nested_set(&self, op: &str, config: &Value) -> Result<ZiColumnSet> {
        let args = list_arg(config, &[]);
        self.optional_nested_set(config, &args)?
            .ok_or_else(|| missing(op, "'steps', 'cols' or column names"))
    }

    /// Nested `steps` program, else a `cols` list, else the given names.
    fn optional_nested_set(&self, config: &Value, args: &[Value]) -> Result<Option<ZiColumnSet>> {
        if let Some(steps) = config.get("steps") {
            return self.compile_steps(steps).map(Some);
        }

        let names = match config.get("cols") {
            Some(cols) => names_of(cols)?,
            None => args.iter().map(name_of).collect::<Result<Vec<_>>>()?,
        };

        if names.is_empty() {
            Ok(None)
        } else {
            Ok(Some(selection::cols(names)))
        }
    }

    fn compile_steps(&self, steps: &Value) -> Result<ZiColumnSet> {
        let items = match steps {
            Value::Array(items) => items.as_slice(),
            _ => return Err(ZiError::validation("'steps' must be an array")),
        };

        let parser = ZiDSLParser::new().strict(self.strict);
        let nodes = items
            .iter()
            .map(|item| parser.parse_node(item))
            .collect::<Result<Vec<_>>>()?;

        self.compile(&ZiDSLProgram { nodes })
    }
}

fn missing(op: &str, what: &str) -> ZiError {
    ZiError::validation(format!("'{}' requires {}", op, what))
}

/// Positional arguments: `args`, a bare array or scalar config, or the
/// first of `keys` present.
fn list_arg(config: &Value, keys: &[&str]) -> Vec<Value> {
    let found = keys
        .iter()
        .find_map(|key| config.get(*key))
        .or_else(|| config.get("args"));

    match found {
        Some(Value::Array(items)) => items.clone(),
        Some(value) => vec![value.clone()],
        None => match config {
            Value::Array(items) => items.clone(),
            Value::Object(_) | Value::Null => Vec::new(),
            scalar => vec![scalar.clone()],
        },
    }
}

fn first_arg(config: &Value, keys: &[&str]) -> Option<Value> {
    list_arg(config, keys).into_iter().next()
}

fn name_of(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ZiError::validation(format!(
            "expected a column name, got {}",
            other
        ))),
    }
}

fn names_of(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(name_of).collect(),
        other => Ok(vec![name_of(other)?]),
    }
}

fn names_from(config: &Value, keys: &[&str]) -> Result<Vec<String>> {
    list_arg(config, keys).iter().map(name_of).collect()
}

fn as_count(op: &str, value: &Value) -> Result<usize> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        ZiError::validation(format!("'{}' expects a non-negative integer, got {}", op, value))
    })
}

fn count_arg(op: &str, config: &Value) -> Result<usize> {
    let value = first_arg(config, &["count", "n"]).ok_or_else(|| missing(op, "a count"))?;
    as_count(op, &value)
}

fn text_arg(op: &str, config: &Value) -> Result<String> {
    let value = first_arg(config, &["text", "prefix", "suffix", "pattern", "name", "value"])
        .ok_or_else(|| missing(op, "a text argument"))?;
    name_of(&value)
}

fn ignore_case(config: &Value) -> bool {
    config
        .get("ignore_case")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn type_arg(op: &str, config: &Value) -> Result<ZiDataType> {
    let value = first_arg(config, &["type"]).ok_or_else(|| missing(op, "a column type"))?;
    name_of(&value)?.parse()
}

fn kinds_arg(op: &str, config: &Value) -> Result<Vec<ZiColumnKind>> {
    let kinds = list_arg(config, &["kinds", "kind"])
        .iter()
        .map(|v| name_of(v)?.parse())
        .collect::<Result<Vec<ZiColumnKind>>>()?;
    if kinds.is_empty() {
        return Err(missing(op, "at least one column kind"));
    }
    Ok(kinds)
}

/// Group reference from `group` or the first positional argument; the
/// remaining positional arguments are returned for the inner selection.
fn group_arg(op: &str, config: &Value) -> Result<(ZiColumnRef, Vec<Value>)> {
    let mut args = list_arg(config, &[]);
    let group = match config.get("group") {
        Some(group) => name_of(group)?,
        None if !args.is_empty() => name_of(&args.remove(0))?,
        None => return Err(missing(op, "a 'group'")),
    };
    Ok((ZiColumnRef::name(group), args))
}

fn predicate_of(config: &Value) -> Result<ZiColumnPredicate> {
    Ok(optional_predicate(config)?.unwrap_or(ZiColumnPredicate::Any))
}

fn optional_predicate(config: &Value) -> Result<Option<ZiColumnPredicate>> {
    if let Some(nested) = config.get("predicate").or_else(|| config.get("where")) {
        return parse_predicate(nested).map(Some);
    }
    match config {
        Value::Object(map) if PREDICATE_KEYS.iter().any(|key| map.contains_key(*key)) => {
            parse_predicate(config).map(Some)
        }
        _ => Ok(None),
    }
}

/// Predicate from its JSON form. A string is an exact name match; an array
/// requires every element; an object combines the filters it names.
pub fn parse_predicate(value: &Value) -> Result<ZiColumnPredicate> {
    let map = match value {
        Value::Null => return Ok(ZiColumnPredicate::Any),
        Value::String(s) if s == "*" || s == "any" => return Ok(ZiColumnPredicate::Any),
        Value::String(s) => return Ok(ZiColumnPredicate::name_equals(s.clone(), false)),
        Value::Array(items) => {
            let all = items.iter().map(parse_predicate).collect::<Result<Vec<_>>>()?;
            return Ok(ZiColumnPredicate::AllOf(all));
        }
        Value::Object(map) => map,
        other => {
            return Err(ZiError::validation(format!("invalid column predicate: {}", other)));
        }
    };

    let ignore_case = ignore_case(value);
    let mut parts = Vec::new();

    for (key, arg) in map {
        let predicate = match key.as_str() {
            "name" => ZiColumnPredicate::name_equals(name_of(arg)?, ignore_case),
            "contains" => ZiColumnPredicate::name_contains(name_of(arg)?, ignore_case),
            "starts_with" => ZiColumnPredicate::name_starts_with(name_of(arg)?, ignore_case),
            "ends_with" => ZiColumnPredicate::name_ends_with(name_of(arg)?, ignore_case),
            "matches" => ZiColumnPredicate::name_matches(&name_of(arg)?)?,
            "kind" | "kinds" => {
                let kinds = names_of(arg)?
                    .iter()
                    .map(|k| k.parse())
                    .collect::<Result<Vec<ZiColumnKind>>>()?;
                ZiColumnPredicate::kind_is(kinds)
            }
            "type" => ZiColumnPredicate::type_of(name_of(arg)?.parse()?),
            "not" => parse_predicate(arg)?.negate(),
            "all_of" => ZiColumnPredicate::AllOf(predicate_list(arg)?),
            "any_of" => ZiColumnPredicate::AnyOf(predicate_list(arg)?),
            "predicate" | "where" => parse_predicate(arg)?,
            _ => continue,
        };
        parts.push(predicate);
    }

    Ok(match parts.len() {
        0 => ZiColumnPredicate::Any,
        1 => parts.remove(0),
        _ => ZiColumnPredicate::AllOf(parts),
    })
}

fn predicate_list(value: &Value) -> Result<Vec<ZiColumnPredicate>> {
    match value {
        Value::Array(items) => items.iter().map(parse_predicate).collect(),
        other => Ok(vec![parse_predicate(other)?]),
    }
}
