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
use zicol::errors::ZiError;

fn person_tree() -> ZiColumnTree {
    ZiColumnTree::new(vec![
        ZiColumn::value("id", ZiDataType::int()),
        ZiColumn::value("name", ZiDataType::string()),
        ZiColumn::group(
            "address",
            vec![
                ZiColumn::value("street", ZiDataType::string()),
                ZiColumn::value("city", ZiDataType::string()),
            ],
        ),
        ZiColumn::frame("orders", vec![ZiColumn::value("sku", ZiDataType::string())]),
    ])
    .unwrap()
}

#[test]
fn ZiFTColumnTreeChildrenFollowDeclaredOrder() {
    let tree = person_tree();
    let address = &tree.columns()[2];

    let names: Vec<_> = address.children().iter().map(ZiColumn::name).collect();
    assert_eq!(names, vec!["street", "city"]);
    assert!(tree.columns()[0].children().is_empty());
    assert!(tree.columns()[3].children().is_empty());
}

#[test]
fn ZiFTColumnTreeClassifiesKinds() {
    let tree = person_tree();
    let kinds: Vec<_> = tree.columns().iter().map(ZiColumn::kind).collect();

    assert_eq!(
        kinds,
        vec![
            ZiColumnKind::Value,
            ZiColumnKind::Value,
            ZiColumnKind::Group,
            ZiColumnKind::Frame
        ]
    );
    assert!(tree.columns()[2].is_group());
    assert!(tree.columns()[3].is_frame());
    assert_eq!(tree.columns()[2].data_type(), None);
    assert_eq!(tree.columns()[3].data_type(), Some(ZiDataType::frame()));
}

#[test]
fn ZiFTColumnTreePathsAreAbsolute() {
    let tree = person_tree();
    let city = tree.find(&ZiColumnPath::new(["address", "city"])).unwrap();

    assert_eq!(city.path().to_string(), "address.city");
    assert_eq!(city.path().parent(), Some(ZiColumnPath::new(["address"])));
    assert!(ZiColumnPath::new(["address"]).is_ancestor_of(city.path()));
    assert!(!city.path().is_ancestor_of(city.path()));
}

#[test]
fn ZiFTColumnTreeFindMissesUnknownAndFrameInternals() {
    let tree = person_tree();

    assert!(tree.find(&ZiColumnPath::new(["address", "zip"])).is_none());
    assert!(tree.find(&ZiColumnPath::new(["orders", "sku"])).is_none());
}

#[test]
fn ZiFTColumnTreeRejectsDuplicateSiblings() {
    let err = ZiColumnTree::new(vec![ZiColumn::group(
        "address",
        vec![
            ZiColumn::value("city", ZiDataType::string()),
            ZiColumn::value("city", ZiDataType::string()),
        ],
    )])
    .unwrap_err();

    match err {
        ZiError::Schema { message } => assert!(message.contains("group 'address'")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn ZiFTColumnTreeAllowsSameNameInDifferentGroups() {
    let tree = ZiColumnTree::new(vec![
        ZiColumn::group("home", vec![ZiColumn::value("city", ZiDataType::string())]),
        ZiColumn::group("work", vec![ZiColumn::value("city", ZiDataType::string())]),
    ]);
    assert!(tree.is_ok());
}

#[test]
fn ZiFTColumnTreeDepthFirstVisitsGroupsBeforeChildren() {
    let tree = person_tree();
    let paths: Vec<String> = tree
        .iter_depth_first()
        .iter()
        .map(|column| column.path().to_string())
        .collect();

    assert_eq!(
        paths,
        vec!["id", "name", "address", "address.street", "address.city", "orders"]
    );
}

#[test]
fn ZiFTColumnPathParseRejectsEmptySegments() {
    assert_eq!(
        ZiColumnPath::parse("a/b", '/').unwrap(),
        ZiColumnPath::new(["a", "b"])
    );
    assert!(ZiColumnPath::parse("a..b", '.').is_err());
}

#[test]
fn ZiFTColumnNamedKeepsIdentity() {
    let column = ZiColumn::value("id", ZiDataType::int()).named("user_id");

    assert_eq!(column.name(), "id");
    assert_eq!(column.display_name(), "user_id");
    assert_eq!(column.path(), &ZiColumnPath::new(["id"]));

    let materialized = column.materialized();
    assert_eq!(materialized.name(), "user_id");
    assert_eq!(materialized.alias(), None);
}

#[test]
fn ZiFTColumnTreeSerializesWithKindTags() {
    let tree = person_tree();
    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json["columns"][2]["data"]["kind"], "group");
    let back: ZiColumnTree = serde_json::from_value(json).unwrap();
    assert_eq!(back, tree);
}
