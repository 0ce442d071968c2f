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

use zicol::column::{ZiColumn, ZiColumnKind, ZiColumnPath, ZiColumnTree, ZiDataType};
use zicol::config::{ZiResolverConfig, ZiUnresolvedColumnsPolicy};
use zicol::errors::ZiError;
use zicol::selection::{
    all, col, col_group, cols, cols_at, cols_at_any_depth, cols_of, cols_of_kind, cols_where,
    ZiColumnPredicate, ZiColumnRef,
};

fn tree() -> ZiColumnTree {
    ZiColumnTree::new(vec![
        ZiColumn::value("id", ZiDataType::int()),
        ZiColumn::value("myCol", ZiDataType::string()),
        ZiColumn::value("score", ZiDataType::float().or_null()),
        ZiColumn::group(
            "user",
            vec![
                ZiColumn::value("userId", ZiDataType::int()),
                ZiColumn::group(
                    "profile",
                    vec![ZiColumn::group(
                        "contact",
                        vec![ZiColumn::value("emailId", ZiDataType::string())],
                    )],
                ),
            ],
        ),
        ZiColumn::frame("orders", vec![ZiColumn::value("orderId", ZiDataType::int())]),
    ])
    .unwrap()
}

fn paths(columns: &[ZiColumn]) -> Vec<String> {
    columns.iter().map(|c| c.path().to_string()).collect()
}

#[test]
fn ZiFTResolverAllReturnsDirectChildrenInOrder() {
    let columns = tree().select(&all()).unwrap();
    assert_eq!(paths(&columns), vec!["id", "myCol", "score", "user", "orders"]);
}

#[test]
fn ZiFTResolverAndConcatenatesInOrder() {
    let tree = tree();
    let a = cols(["score", "id"]);
    let b = cols_at([4, 1]);

    let mut expected = tree.select(&a).unwrap();
    expected.extend(tree.select(&b).unwrap());

    let combined = tree.select(&a.and(b)).unwrap();
    assert_eq!(combined, expected);
    assert_eq!(paths(&combined), vec!["score", "id", "orders", "myCol"]);
}

#[test]
fn ZiFTResolverResolvesNestedReferences() {
    let tree = tree();
    let by_name = tree.select(&col("user.profile.contact.emailId")).unwrap();
    let by_path = tree
        .select(&col(ZiColumnPath::new(["user", "profile", "contact", "emailId"])))
        .unwrap();

    assert_eq!(by_name, by_path);
    assert_eq!(paths(&by_name), vec!["user.profile.contact.emailId"]);
}

#[test]
fn ZiFTResolverMissingNestedNameReportsGroupScope() {
    let err = tree().select(&col("user.profile.phone")).unwrap_err();
    assert_eq!(
        err,
        ZiError::ColumnNotFound {
            name: "user.profile.phone".to_string(),
            scope: "group 'user.profile'".to_string(),
        }
    );
    assert!(err.to_string().contains("user.profile.phone"));
}

#[test]
fn ZiFTResolverMissingIndexFails() {
    let err = tree().select(&cols_at([0, 9])).unwrap_err();
    assert!(matches!(err, ZiError::ColumnNotFound { ref name, .. } if name == "#9"));
}

#[test]
fn ZiFTResolverSkipPolicyDropsMissingReferences() {
    let config = ZiResolverConfig::new().unresolved(ZiUnresolvedColumnsPolicy::Skip);
    let columns = tree()
        .select_with(&cols(["id", "nope", "user.nope"]), &config)
        .unwrap();
    assert_eq!(paths(&columns), vec!["id"]);
}

#[test]
fn ZiFTResolverCustomPathSeparator() {
    let config = ZiResolverConfig::new().path_separator('/');
    let columns = tree().select_with(&col("user/userId"), &config).unwrap();
    assert_eq!(paths(&columns), vec!["user.userId"]);
}

#[test]
fn ZiFTResolverGroupOperationOnLeafFails() {
    let tree = tree();

    let err = tree.select(&col_group("id").all()).unwrap_err();
    assert_eq!(err, ZiError::not_a_group("id"));

    let err = tree.select(&col("id.inner")).unwrap_err();
    assert_eq!(err, ZiError::not_a_group("id"));

    let err = tree
        .select(&col_group("score").cols_at_any_depth(ZiColumnPredicate::Any))
        .unwrap_err();
    assert!(matches!(err, ZiError::NotAColumnGroup { .. }));
}

#[test]
fn ZiFTResolverGroupScopedSelectionIsRelative() {
    let columns = tree().select(&col_group("user").cols(["userId"])).unwrap();
    assert_eq!(paths(&columns), vec!["user.userId"]);

    let err = tree().select(&col_group("user").cols(["id"])).unwrap_err();
    assert_eq!(err, ZiError::column_not_found("id", "user"));
}

#[test]
fn ZiFTResolverTypedReferenceChecksDeclaredType() {
    let tree = tree();
    let ok = tree
        .select(&col(ZiColumnRef::typed(ZiColumnPath::new(["id"]), ZiDataType::number())))
        .unwrap();
    assert_eq!(paths(&ok), vec!["id"]);

    let err = tree
        .select(&col(ZiColumnRef::typed(ZiColumnPath::new(["score"]), ZiDataType::float())))
        .unwrap_err();
    assert_eq!(
        err,
        ZiError::TypeMismatch {
            path: "score".to_string(),
            expected: "float".to_string(),
            actual: "float?".to_string(),
        }
    );
}

#[test]
fn ZiFTResolverColsAtAnyDepthFindsDeepLeaves() {
    let columns = tree()
        .select(&cols_at_any_depth(ZiColumnPredicate::name_ends_with("Id", false)))
        .unwrap();

    assert_eq!(
        paths(&columns),
        vec!["user.userId", "user.profile.contact.emailId"]
    );
}

#[test]
fn ZiFTResolverColsAtAnyDepthDoesNotExpandFrames() {
    let columns = tree()
        .select(&cols_at_any_depth(ZiColumnPredicate::name_equals("orderId", false)))
        .unwrap();
    assert!(columns.is_empty());
}

#[test]
fn ZiFTResolverNameFilterCaseSensitivity() {
    let tree = tree();

    let insensitive = tree.select(&all().name_contains("MY", true)).unwrap();
    assert_eq!(paths(&insensitive), vec!["myCol"]);

    let sensitive = tree.select(&all().name_contains("MY", false)).unwrap();
    assert!(sensitive.is_empty());
}

#[test]
fn ZiFTResolverNameFiltersUseLeafNameOnly() {
    let columns = tree()
        .select(&cols_at_any_depth(ZiColumnPredicate::Any).name_starts_with("user", false))
        .unwrap();
    assert_eq!(paths(&columns), vec!["user", "user.userId"]);
}

#[test]
fn ZiFTResolverTakeDropBoundaries() {
    let tree = tree();
    let len = tree.len();

    assert!(tree.select(&all().take(0)).unwrap().is_empty());
    assert_eq!(tree.select(&all().take(len)).unwrap(), tree.columns().to_vec());
    assert_eq!(tree.select(&all().take(len + 5)).unwrap(), tree.columns().to_vec());
    assert!(tree.select(&all().drop_last(len)).unwrap().is_empty());
    assert_eq!(paths(&tree.select(&all().drop(3)).unwrap()), vec!["user", "orders"]);
}

#[test]
fn ZiFTResolverWhileSlicesStopAtFirstMismatch() {
    let tree = tree();
    let is_value = ZiColumnPredicate::kind_is([ZiColumnKind::Value]);

    let taken = tree.select(&all().take_while(is_value.clone())).unwrap();
    assert_eq!(paths(&taken), vec!["id", "myCol", "score"]);

    let dropped = tree.select(&all().drop_while(is_value.clone())).unwrap();
    assert_eq!(paths(&dropped), vec!["user", "orders"]);

    let trailing = tree
        .select(&all().take_last_while(is_value.clone().negate()))
        .unwrap();
    assert_eq!(paths(&trailing), vec!["user", "orders"]);

    let head = tree.select(&all().drop_last_while(is_value.negate())).unwrap();
    assert_eq!(paths(&head), vec!["id", "myCol", "score"]);
}

#[test]
fn ZiFTResolverColsOfUsesSubtyping() {
    let tree = tree();

    let numbers = tree.select(&cols_of(ZiDataType::number())).unwrap();
    assert_eq!(paths(&numbers), vec!["id"]);

    let nullable_numbers = tree.select(&cols_of(ZiDataType::number().or_null())).unwrap();
    assert_eq!(paths(&nullable_numbers), vec!["id", "score"]);

    let frames = tree.select(&cols_of_kind([ZiColumnKind::Frame])).unwrap();
    assert_eq!(paths(&frames), vec!["orders"]);
}

#[test]
fn ZiFTResolverPicksSingleColumns() {
    let tree = tree();

    let first = tree.select(&all().first_col()).unwrap();
    assert_eq!(paths(&first), vec!["id"]);

    let last_value = tree
        .select(&all().last_col_where(ZiColumnPredicate::kind_is([ZiColumnKind::Value])))
        .unwrap();
    assert_eq!(paths(&last_value), vec!["score"]);

    let single = tree
        .select(&cols_where(ZiColumnPredicate::kind_is([ZiColumnKind::Group])).single_col())
        .unwrap();
    assert_eq!(paths(&single), vec!["user"]);

    let err = tree.select(&all().single_col()).unwrap_err();
    assert_eq!(err, ZiError::AmbiguousSingle { count: 5 });

    let err = tree.select(&all().take(0).first_col()).unwrap_err();
    assert!(matches!(err, ZiError::ColumnNotFound { .. }));
}

#[test]
fn ZiFTResolverColsInGroupsFlattensOneLevel() {
    let columns = tree().select(&all().cols_in_groups()).unwrap();
    assert_eq!(paths(&columns), vec!["user.userId", "user.profile"]);
}

#[test]
fn ZiFTResolverDistinctAndSimplify() {
    let tree = tree();
    let selection = cols(["user.userId", "id", "user", "id"]);

    let distinct = tree.select(&selection.clone().distinct()).unwrap();
    assert_eq!(paths(&distinct), vec!["user.userId", "id", "user"]);

    let simplified = tree.select(&selection.simplify()).unwrap();
    assert_eq!(paths(&simplified), vec!["id", "user"]);
}

#[test]
fn ZiFTResolverNamedRequiresExactlyOneColumn() {
    let tree = tree();

    let named = tree.select(&col("id").named("key")).unwrap();
    assert_eq!(named[0].display_name(), "key");

    let err = tree.select(&cols(["id", "score"]).named("key")).unwrap_err();
    assert_eq!(err, ZiError::AmbiguousSingle { count: 2 });
}

#[test]
fn ZiFTResolverNameMatchesRejectsBadPattern() {
    assert!(all().name_matches("(").is_err());

    let columns = tree().select(&all().name_matches("^[a-z]+$").unwrap()).unwrap();
    assert_eq!(paths(&columns), vec!["id", "score", "user", "orders"]);
}

#[test]
fn ZiFTResolverCustomPredicate() {
    let predicate = ZiColumnPredicate::custom(|column: &ZiColumn| column.path().len() == 2);
    let columns = tree().select(&cols_at_any_depth(predicate)).unwrap();
    assert_eq!(paths(&columns), vec!["user.userId", "user.profile"]);
}
