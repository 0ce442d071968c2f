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

use crate::column::{ZiColumn, ZiColumnPath, ZiColumnTree};
use crate::config::{ZiResolverConfig, ZiUnresolvedColumnsPolicy};
use crate::errors::{Result, ZiError};

/// Ephemeral state of one resolution pass: the tree being resolved against
/// and the column group that relative references are looked up in.
#[derive(Clone, Copy, Debug)]
pub struct ZiResolutionContext<'a> {
    tree: &'a ZiColumnTree,
    scope: Option<&'a ZiColumn>,
    config: &'a ZiResolverConfig,
}

impl<'a> ZiResolutionContext<'a> {
    pub fn new(tree: &'a ZiColumnTree, config: &'a ZiResolverConfig) -> Self {
        Self {
            tree,
            scope: None,
            config,
        }
    }

    pub fn tree(&self) -> &'a ZiColumnTree {
        self.tree
    }

    pub fn config(&self) -> &'a ZiResolverConfig {
        self.config
    }

    /// Current group, or `None` at the table root.
    pub fn scope(&self) -> Option<&'a ZiColumn> {
        self.scope
    }

    pub fn scope_path(&self) -> ZiColumnPath {
        self.scope.map(|group| group.path().clone()).unwrap_or_default()
    }

    /// Direct children of the current scope.
    pub fn scope_columns(&self) -> &'a [ZiColumn] {
        match self.scope {
            Some(group) => group.children(),
            None => self.tree.columns(),
        }
    }

    /// Context scoped to `group`. Fails for anything but a column group.
    pub fn descend<'b>(&self, group: &'b ZiColumn) -> Result<ZiResolutionContext<'b>>
    where
        'a: 'b,
    {
        if !group.is_group() {
            return Err(ZiError::not_a_group(group.path().to_string()));
        }
        Ok(ZiResolutionContext {
            tree: self.tree,
            scope: Some(group),
            config: self.config,
        })
    }

    /// Applies the unresolved-columns policy to a reference that did not resolve.
    pub(crate) fn unresolved(&self, name: &str, scope: &ZiColumnPath) -> Result<()> {
        match self.config.unresolved {
            ZiUnresolvedColumnsPolicy::Fail => {
                Err(ZiError::column_not_found(name, scope.to_string()))
            }
            ZiUnresolvedColumnsPolicy::Skip => {
                log::warn!("skipping unresolved column '{}' in '{}'", name, scope);
                Ok(())
            }
        }
    }
}
