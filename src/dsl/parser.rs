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

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::dsl::ir::{ZiDSLNode, ZiDSLProgram};
use crate::errors::{Result, ZiError};

#[derive(Clone, Debug)]
pub struct ZiParseResult {
    pub program: ZiDSLProgram,
    pub warnings: Vec<String>,
    pub variables: HashMap<String, Value>,
}

#[derive(Clone, Debug)]
pub struct ZiDSLParserConfig {
    pub strict: bool,
    pub allow_variables: bool,
}

impl Default for ZiDSLParserConfig {
    fn default() -> Self {
        Self {
            strict: false,
            allow_variables: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct ZiDSLParser {
    config: ZiDSLParserConfig,
    variables: HashMap<String, Value>,
}

impl ZiDSLParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ZiDSLParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    pub fn set_variable(mut self, name: &str, value: Value) -> Self {
        self.variables.insert(name.to_string(), value);
        self
    }

    /// Detects the source format from its first characters.
    pub fn parse(&self, source: &str) -> Result<ZiParseResult> {
        let trimmed = source.trim_start();

        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            self.parse_json(source)
        } else if trimmed.starts_with("steps:")
            || trimmed.starts_with("selection:")
            || trimmed.starts_with("- ")
        {
            self.parse_yaml(source)
        } else {
            self.parse_simple(source)
        }
    }

    pub fn parse_json(&self, source: &str) -> Result<ZiParseResult> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| ZiError::validation(format!("Invalid JSON: {}", e)))?;
        self.parse_document(value)
    }

    pub fn parse_yaml(&self, source: &str) -> Result<ZiParseResult> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(source)
            .map_err(|e| ZiError::validation(format!("Invalid YAML: {}", e)))?;
        self.parse_document(yaml_to_json(&yaml_value))
    }

    pub fn parse_file(&self, path: &Path) -> Result<ZiParseResult> {
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => self.parse_json(&content),
            "yaml" | "yml" => self.parse_yaml(&content),
            _ => self.parse(&content),
        }
    }

    /// Parses one step given as an object or as a `op key=value` line.
    pub fn parse_node(&self, value: &Value) -> Result<ZiDSLNode> {
        self.parse_json_node(value, &self.variables)
    }

    fn parse_document(&self, value: Value) -> Result<ZiParseResult> {
        let mut warnings = Vec::new();

        let nodes = match &value {
            Value::Array(arr) => self.parse_json_array(arr, &mut warnings)?,
            Value::Object(map) => {
                let steps = map.get("steps").or_else(|| map.get("selection"));
                match steps {
                    Some(Value::Array(arr)) => self.parse_json_array(arr, &mut warnings)?,
                    Some(_) => {
                        return Err(ZiError::validation("'steps' must be an array"));
                    }
                    None if map.contains_key("operator") => {
                        vec![self.parse_json_node(&value, &self.variables)?]
                    }
                    None => {
                        return Err(ZiError::validation(
                            "program must be an array or an object with 'steps'",
                        ));
                    }
                }
            }
            _ => return Err(ZiError::validation("program must be an array or an object")),
        };

        Ok(ZiParseResult {
            program: ZiDSLProgram { nodes },
            warnings,
            variables: self.variables.clone(),
        })
    }

    fn parse_json_array(&self, arr: &[Value], warnings: &mut Vec<String>) -> Result<Vec<ZiDSLNode>> {
        let mut nodes = Vec::new();

        for (idx, item) in arr.iter().enumerate() {
            match self.parse_json_node(item, &self.variables) {
                Ok(node) => nodes.push(node),
                Err(e) => {
                    if self.config.strict {
                        return Err(ZiError::validation(format!(
                            "Error parsing step {}: {}",
                            idx, e
                        )));
                    }
                    warnings.push(format!("Step {}: {}", idx, e));
                }
            }
        }

        Ok(nodes)
    }

    fn parse_json_node(&self, value: &Value, variables: &HashMap<String, Value>) -> Result<ZiDSLNode> {
        match value {
            Value::Object(map) => {
                let operator = map
                    .get("operator")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| ZiError::validation("Missing 'operator' field"))?
                    .to_string();

                let config = map
                    .get("config")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new()));

                let config = self.resolve_variables(&config, variables)?;

                Ok(ZiDSLNode { operator, config })
            }
            Value::String(line) => self.parse_line(line.trim(), variables),
            _ => Err(ZiError::validation("Node must be object or string")),
        }
    }

    fn parse_simple(&self, source: &str) -> Result<ZiParseResult> {
        let mut warnings = Vec::new();
        let mut nodes = Vec::new();
        let mut variables = self.variables.clone();

        for (line_num, line) in source.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
                continue;
            }

            if trimmed.starts_with('$') && self.config.allow_variables {
                match parse_variable_line(trimmed) {
                    Ok((name, value)) => {
                        variables.insert(name, value);
                    }
                    Err(e) => {
                        if self.config.strict {
                            return Err(ZiError::validation(format!(
                                "Variable error at line {}: {}",
                                line_num + 1,
                                e
                            )));
                        }
                        warnings.push(format!("Line {}: {}", line_num + 1, e));
                    }
                }
                continue;
            }

            match self.parse_line(trimmed, &variables) {
                Ok(node) => nodes.push(node),
                Err(e) => {
                    if self.config.strict {
                        return Err(ZiError::validation(format!(
                            "Parse error at line {}: {}",
                            line_num + 1,
                            e
                        )));
                    }
                    warnings.push(format!("Line {}: {}", line_num + 1, e));
                }
            }
        }

        Ok(ZiParseResult {
            program: ZiDSLProgram { nodes },
            warnings,
            variables,
        })
    }

    fn parse_line(&self, line: &str, variables: &HashMap<String, Value>) -> Result<ZiDSLNode> {
        let mut parts = line.splitn(2, char::is_whitespace);
        let operator = match parts.next() {
            Some(op) if !op.is_empty() => op.to_string(),
            _ => return Err(ZiError::validation("Empty line")),
        };

        let config = match parts.next().map(str::trim) {
            Some(rest) if rest.starts_with('{') => serde_json::from_str(rest)
                .map_err(|e| ZiError::validation(format!("Invalid JSON config: {}", e)))?,
            Some(rest) if !rest.is_empty() => parse_inline_config(rest),
            _ => Value::Object(Map::new()),
        };

        let config = self.resolve_variables(&config, variables)?;

        Ok(ZiDSLNode { operator, config })
    }

    fn resolve_variables(&self, value: &Value, variables: &HashMap<String, Value>) -> Result<Value> {
        if !self.config.allow_variables {
            return Ok(value.clone());
        }

        match value {
            Value::String(s) => {
                // `${name}` must be defined; an undefined bare `$name` is literal text.
                if let Some(name) = s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
                    return variables
                        .get(name)
                        .cloned()
                        .ok_or_else(|| ZiError::validation(format!("Undefined variable: {}", name)));
                }
                match s.strip_prefix('$').and_then(|name| variables.get(name)) {
                    Some(value) => Ok(value.clone()),
                    None => Ok(Value::String(s.clone())),
                }
            }
            Value::Object(map) => {
                let mut new_map = Map::new();
                for (k, v) in map {
                    new_map.insert(k.clone(), self.resolve_variables(v, variables)?);
                }
                Ok(Value::Object(new_map))
            }
            Value::Array(arr) => {
                let new_arr: Result<Vec<Value>> = arr
                    .iter()
                    .map(|v| self.resolve_variables(v, variables))
                    .collect();
                Ok(Value::Array(new_arr?))
            }
            _ => Ok(value.clone()),
        }
    }
}

fn parse_variable_line(line: &str) -> Result<(String, Value)> {
    let line = line.strip_prefix('$').unwrap_or(line);
    let (name, value_str) = line
        .split_once('=')
        .ok_or_else(|| ZiError::validation("Variable must be in format $name=value"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ZiError::validation("Variable name is empty"));
    }

    Ok((name.to_string(), parse_list_value(value_str.trim())))
}

/// `key=value` pairs go into the config object; bare tokens are collected
/// in order under `args`.
fn parse_inline_config(config_str: &str) -> Value {
    let mut map = Map::new();
    let mut args = Vec::new();

    for token in config_str.split_whitespace() {
        match token.split_once('=') {
            Some((key, value_str)) if !key.is_empty() => {
                map.insert(key.to_string(), parse_list_value(value_str));
            }
            _ => {
                for item in token.split(',').filter(|s| !s.is_empty()) {
                    args.push(parse_value(item));
                }
            }
        }
    }

    if !args.is_empty() {
        map.insert("args".to_string(), Value::Array(args));
    }

    Value::Object(map)
}

fn parse_list_value(value_str: &str) -> Value {
    let quoted = value_str.starts_with('"') || value_str.starts_with('\'');
    if !quoted && value_str.contains(',') {
        Value::Array(
            value_str
                .split(',')
                .filter(|s| !s.is_empty())
                .map(parse_value)
                .collect(),
        )
    } else {
        parse_value(value_str)
    }
}

/// Scalar literal from a line token.
pub fn parse_value(value_str: &str) -> Value {
    if value_str.starts_with('"') || value_str.starts_with('\'') {
        Value::String(value_str.trim_matches(|c| c == '"' || c == '\'').to_string())
    } else if let Ok(n) = value_str.parse::<i64>() {
        Value::Number(n.into())
    } else if let Ok(f) = value_str.parse::<f64>() {
        serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value_str.to_string()))
    } else if value_str == "true" || value_str == "false" {
        Value::Bool(value_str == "true")
    } else if value_str == "null" {
        Value::Null
    } else {
        Value::String(value_str.to_string())
    }
}

fn yaml_to_json(yaml: &serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut obj = Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    _ => continue,
                };
                obj.insert(key, yaml_to_json(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
