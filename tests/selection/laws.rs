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

use std::collections::BTreeSet;

use proptest::prelude::*;
use zicol::column::{ZiColumn, ZiColumnPath, ZiColumnTree, ZiDataType};
use zicol::selection::{all, cols_at, except_columns, simplify};

/// Top-level columns named from `names`; every other one is a group with
/// two value children.
fn build_tree(names: &BTreeSet<String>) -> ZiColumnTree {
    let columns = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx % 2 == 1 {
                ZiColumn::group(
                    name.clone(),
                    vec![
                        ZiColumn::value("left", ZiDataType::int()),
                        ZiColumn::value("right", ZiDataType::string()),
                    ],
                )
            } else {
                ZiColumn::value(name.clone(), ZiDataType::int())
            }
        })
        .collect();
    ZiColumnTree::new(columns).unwrap()
}

fn tree_and_indices() -> impl Strategy<Value = (ZiColumnTree, Vec<usize>, Vec<usize>)> {
    prop::collection::btree_set("[a-z]{1,6}", 1..10).prop_flat_map(|names| {
        let len = names.len();
        (
            Just(build_tree(&names)),
            prop::collection::vec(0..len, 0..6),
            prop::collection::vec(0..len, 0..6),
        )
    })
}

fn paths(columns: &[ZiColumn]) -> Vec<ZiColumnPath> {
    columns.iter().map(|c| c.path().clone()).collect()
}

proptest! {
    #[test]
    fn ZiFTLawAndIsConcatenation((tree, a, b) in tree_and_indices()) {
        let left = tree.select(&cols_at(a.clone())).unwrap();
        let right = tree.select(&cols_at(b.clone())).unwrap();
        let both = tree.select(&cols_at(a).and(cols_at(b))).unwrap();

        let mut expected = left;
        expected.extend(right);
        prop_assert_eq!(both, expected);
    }

    #[test]
    fn ZiFTLawTakeAndDropPartition((tree, a, _b) in tree_and_indices(), n in 0usize..12) {
        let source = cols_at(a);
        let resolved = tree.select(&source).unwrap();

        let taken = tree.select(&source.clone().take(n)).unwrap();
        let dropped = tree.select(&source.drop(n)).unwrap();

        prop_assert_eq!(taken.len(), n.min(resolved.len()));
        let mut joined = taken;
        joined.extend(dropped);
        prop_assert_eq!(joined, resolved);
    }

    #[test]
    fn ZiFTLawFlatExceptIsFilter((tree, excluded, _b) in tree_and_indices()) {
        let removed: BTreeSet<usize> = excluded.iter().copied().collect();
        let expected: Vec<ZiColumn> = tree
            .columns()
            .iter()
            .enumerate()
            .filter(|(idx, _)| !removed.contains(idx))
            .map(|(_, column)| column.clone())
            .collect();

        let result = tree.select(&all().except(cols_at(excluded))).unwrap();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn ZiFTLawNestedExceptKeepsSiblings((tree, _a, _b) in tree_and_indices()) {
        let excluded: Vec<ZiColumnPath> = tree
            .columns()
            .iter()
            .filter(|c| c.is_group())
            .map(|c| c.path().child("left"))
            .collect();

        let kept = except_columns(tree.columns().to_vec(), &excluded);
        prop_assert_eq!(kept.len(), tree.len());
        for column in kept.iter().filter(|c| c.is_group()) {
            prop_assert_eq!(column.children().len(), 1);
            prop_assert_eq!(column.children()[0].name(), "right");
        }
    }

    #[test]
    fn ZiFTLawSimplifyIsIdempotent((tree, a, b) in tree_and_indices()) {
        let mut columns = tree.select(&cols_at(a).and(cols_at(b))).unwrap();
        for group in tree.columns().iter().filter(|c| c.is_group()) {
            columns.extend(group.children().iter().cloned());
        }

        let once = simplify(columns);
        let twice = simplify(once.clone());
        prop_assert_eq!(&once, &twice);

        let unique: BTreeSet<ZiColumnPath> = paths(&once).into_iter().collect();
        prop_assert_eq!(unique.len(), once.len());
        for column in &once {
            prop_assert!(!once.iter().any(|other| other.path().is_ancestor_of(column.path())));
        }
    }
}
