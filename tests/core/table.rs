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

use std::io::{Cursor, Write};

use serde_json::json;
use zicol::column::{ZiColumn, ZiColumnTree, ZiDataType};
use zicol::errors::ZiError;
use zicol::record::ZiRecord;
use zicol::selection::{all, col, col_group, cols};
use zicol::table::{ZiTable, ZiTableProvider};

fn people() -> ZiTable {
    ZiTable::from_records(vec![
        ZiRecord::new(
            Some("r1".into()),
            json!({"id": 1, "name": "Ada", "address": {"street": "Main St", "city": "London"}}),
        ),
        ZiRecord::new(
            Some("r2".into()),
            json!({"id": 2, "name": "Alan", "address": {"street": "High St", "city": "Wilmslow"}}),
        ),
    ])
    .unwrap()
}

#[test]
fn ZiFTTableInfersNestedGroups() {
    let table = people();
    let tree = table.tree();

    assert_eq!(table.column_names(), vec!["id", "name", "address"]);
    assert_eq!(tree.columns()[0].data_type(), Some(ZiDataType::int()));
    assert_eq!(tree.columns()[1].data_type(), Some(ZiDataType::string()));
    assert!(tree.columns()[2].is_group());
    assert_eq!(tree.columns()[2].children()[1].path().to_string(), "address.city");
}

#[test]
fn ZiFTTableSelectExceptNestedColumnKeepsGroup() {
    let projected = people().select(&all().except("address.street")).unwrap();

    assert_eq!(projected.column_names(), vec!["id", "name", "address"]);
    let address = &projected.tree().columns()[2];
    assert_eq!(address.children().len(), 1);
    assert_eq!(address.children()[0].name(), "city");

    assert_eq!(
        projected.records()[0].payload,
        json!({"id": 1, "name": "Ada", "address": {"city": "London"}})
    );
    assert_eq!(projected.records()[1].id.as_deref(), Some("r2"));
}

#[test]
fn ZiFTTableProjectionFollowsSelectionOrder() {
    let projected = people()
        .select(&cols(["address.city", "id"]))
        .unwrap();

    assert_eq!(projected.column_names(), vec!["city", "id"]);
    let keys: Vec<_> = projected.records()[1]
        .payload
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["city", "id"]);
}

#[test]
fn ZiFTTableProjectionAppliesDisplayNames() {
    let projected = people()
        .select(&col("name").named("full_name").and(col_group("address").cols(["city"])))
        .unwrap();

    assert_eq!(projected.column_names(), vec!["full_name", "city"]);
    assert_eq!(
        projected.records()[0].payload,
        json!({"full_name": "Ada", "city": "London"})
    );
}

#[test]
fn ZiFTTableProjectionRejectsDuplicateOutputNames() {
    let err = people().select(&cols(["id", "id"])).unwrap_err();
    assert!(matches!(err, ZiError::Schema { .. }));
}

#[test]
fn ZiFTTableMissingCellsProjectAsNull() {
    let table = ZiTable::from_records(vec![
        ZiRecord::new(None, json!({"id": 1, "email": "a@x"})),
        ZiRecord::new(None, json!({"id": 2})),
    ])
    .unwrap();

    assert_eq!(
        table.tree().columns()[1].data_type(),
        Some(ZiDataType::string().or_null())
    );

    let projected = table.select(&cols(["email"])).unwrap();
    assert_eq!(projected.records()[1].payload, json!({"email": null}));
}

#[test]
fn ZiFTTableRejectsNonObjectPayloads() {
    let err = ZiTable::from_records(vec![ZiRecord::new(None, json!("text"))]).unwrap_err();
    assert!(matches!(err, ZiError::Schema { .. }));
}

#[test]
fn ZiFTTableWithTreeUsesGivenSchema() {
    let tree = ZiColumnTree::new(vec![
        ZiColumn::value("a", ZiDataType::int()),
        ZiColumn::value("b", ZiDataType::int()),
    ])
    .unwrap();
    let table = ZiTable::with_tree(tree, vec![ZiRecord::new(None, json!({"a": 1}))]);

    let projected = table.select(&all().except("a")).unwrap();
    assert_eq!(projected.records()[0].payload, json!({"b": null}));
}

#[test]
fn ZiFTTableLoadsJsonLinesInBothShapes() {
    let source = concat!(
        "{\"id\": \"r1\", \"payload\": {\"x\": 1}}\n",
        "\n",
        "{\"x\": 2.5}\n",
    );
    let table = ZiTable::load_jsonl_reader(Cursor::new(source)).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0].id.as_deref(), Some("r1"));
    assert_eq!(table.records()[1].id, None);
    assert_eq!(table.tree().columns()[0].data_type(), Some(ZiDataType::number()));
}

#[test]
fn ZiFTTableLoadJsonlReportsLineNumbers() {
    let err = ZiTable::load_jsonl_reader(Cursor::new("{\"x\": 1}\nnot json\n")).unwrap_err();
    match err {
        ZiError::Validation { message } => assert!(message.contains("line 2")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn ZiFTTableLoadsJsonlFromFile() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{\"id\": 1, \"tags\": [\"a\", \"b\"]}}").unwrap();
    writeln!(file, "{{\"id\": 2, \"tags\": []}}").unwrap();

    let table = ZiTable::load_jsonl(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.tree().columns()[1].data_type(), Some(ZiDataType::list()));
}
