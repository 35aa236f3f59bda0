//! Edge case tests for ledgerdb-engine
//!
//! These tests cover boundary conditions and unusual inputs.

use ledgerdb_engine::{
    Collection, CountArgs, DataProvider, Filter, FindManyArgs, ManualClock, Record, Store,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

fn provider() -> DataProvider {
    DataProvider::with_clock(Store::new(), Arc::new(ManualClock::from_millis(0)))
}

fn args<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

fn collection(values: Value) -> Collection {
    Collection::from(serde_json::from_value::<Vec<Record>>(values).unwrap())
}

fn matching_ids(collection: &Collection, where_clause: Value) -> Vec<String> {
    collection
        .find_many(&args(json!({ "where": where_clause })))
        .iter()
        .filter_map(|r| r.id_str().map(str::to_string))
        .collect()
}

// ============================================================================
// String Edge Cases
// ============================================================================

#[tokio::test]
async fn empty_string_fields() {
    let provider = provider();
    let items = provider.model("items");

    items.create(args(json!({"data": {"id": "a", "name": ""}}))).await;

    let found = items
        .find_many(args(json!({"where": {"name": ""}})))
        .await;
    assert_eq!(found.len(), 1);

    // Every string contains, starts and ends with the empty string.
    let found = items
        .find_many(args(json!({
            "where": {"name": {"contains": "", "startsWith": "", "endsWith": ""}}
        })))
        .await;
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn unicode_strings() {
    let provider = provider();
    let items = provider.model("items");

    let names = [
        "日本語テスト",
        "Привет мир",
        "مرحبا بالعالم",
        "🎉🚀💯",
        "Ω≈ç√∫",
        "Hello\nWorld\tTab",
        "Null\0Test",
    ];

    for (i, name) in names.iter().enumerate() {
        items
            .create(args(json!({"data": {"id": format!("item_{i}"), "name": name}})))
            .await;
    }

    for name in names {
        let found = items
            .find_many(args(json!({"where": {"name": name}})))
            .await;
        assert_eq!(found.len(), 1, "Failed for: {name}");
    }

    let found = items
        .find_many(args(json!({"where": {"name": {"contains": "🚀"}}})))
        .await;
    assert_eq!(found[0].id_str(), Some("item_3"));
}

#[tokio::test]
async fn very_long_strings() {
    let provider = provider();
    let items = provider.model("items");

    // 1MB string
    let long_string = "x".repeat(1024 * 1024);
    items
        .create(args(json!({"data": {"id": "big", "body": format!("{long_string}!")}})))
        .await;

    let found = items
        .find_many(args(json!({"where": {"body": {"endsWith": "x!"}}})))
        .await;
    assert_eq!(found.len(), 1);
    let body = found[0].get("body").and_then(Value::as_str).unwrap();
    assert_eq!(body.len(), 1024 * 1024 + 1);
}

// ============================================================================
// Numeric Edge Cases
// ============================================================================

#[test]
fn integer_boundaries() {
    let c = collection(json!([
        {"id": "min", "n": i64::MIN},
        {"id": "max", "n": i64::MAX},
        {"id": "umax", "n": u64::MAX},
        {"id": "zero", "n": 0},
        {"id": "neg", "n": -1}
    ]));

    assert_eq!(matching_ids(&c, json!({"n": {"gt": i64::MAX}})), vec!["umax"]);
    assert_eq!(matching_ids(&c, json!({"n": {"lt": -1}})), vec!["min"]);
    assert_eq!(matching_ids(&c, json!({"n": {"gte": 0, "lte": 0}})), vec!["zero"]);
    assert_eq!(matching_ids(&c, json!({"n": u64::MAX})), vec!["umax"]);
}

#[test]
fn floats_and_integers_compare_numerically() {
    let c = collection(json!([
        {"id": "a", "amount": 10},
        {"id": "b", "amount": 10.0},
        {"id": "c", "amount": 10.5},
        {"id": "d", "amount": -0.25}
    ]));

    assert_eq!(matching_ids(&c, json!({"amount": 10})), vec!["a", "b"]);
    assert_eq!(matching_ids(&c, json!({"amount": {"in": [10.5, -0.25]}})), vec!["c", "d"]);
    assert_eq!(matching_ids(&c, json!({"amount": {"gt": 10}})), vec!["c"]);
    assert_eq!(matching_ids(&c, json!({"amount": {"lt": 0}})), vec!["d"]);
}

// ============================================================================
// Nested Data
// ============================================================================

#[test]
fn deeply_nested_json() {
    let mut nested = json!({"level": 0});
    for level in 1..50 {
        nested = json!({"level": level, "child": nested});
    }
    let c = collection(json!([{"id": "deep", "tree": nested.clone()}, {"id": "flat", "tree": 1}]));

    assert_eq!(matching_ids(&c, json!({"tree": {"equals": nested}})), vec!["deep"]);
    // Object literals under a field are operator objects, never literals.
    assert_eq!(matching_ids(&c, json!({"tree": {"level": 49}})), vec!["deep", "flat"]);
}

#[test]
fn deeply_nested_combinators() {
    let mut clause = json!({"kind": "leaf"});
    for depth in 0..64 {
        clause = if depth % 2 == 0 {
            json!({"AND": [clause]})
        } else {
            json!({"OR": [clause, {"kind": "never"}]})
        };
    }
    let c = collection(json!([{"id": "1", "kind": "leaf"}, {"id": "2", "kind": "branch"}]));

    assert_eq!(matching_ids(&c, clause), vec!["1"]);
}

#[test]
fn json_with_all_types() {
    let c = collection(json!([{
        "id": "all",
        "string": "text",
        "int": 42,
        "float": 1.5,
        "bool": true,
        "null": null,
        "array": [1, "two", null],
        "object": {"k": "v"}
    }]));

    for (field, value) in [
        ("string", json!("text")),
        ("int", json!(42)),
        ("float", json!(1.5)),
        ("bool", json!(true)),
        ("null", json!(null)),
        ("array", json!([1, "two", null])),
    ] {
        assert_eq!(matching_ids(&c, json!({ field: value })), vec!["all"], "{field}");
    }
    assert_eq!(
        matching_ids(&c, json!({"object": {"equals": {"k": "v"}}})),
        vec!["all"]
    );
}

// ============================================================================
// Field Names and Ids
// ============================================================================

#[test]
fn field_with_special_characters_in_name() {
    let c = collection(json!([
        {"id": "1", "field-with-dash": 1, "field.with.dots": 2, "field with spaces": 3, "": 4}
    ]));

    for field in ["field-with-dash", "field.with.dots", "field with spaces", ""] {
        assert_eq!(matching_ids(&c, json!({ field: {"gte": 1} })), vec!["1"], "{field:?}");
    }
    // Dots are not paths.
    assert!(matching_ids(&c, json!({"field": {"equals": 2}})).is_empty());
}

#[tokio::test]
async fn ids_with_special_characters() {
    let provider = provider();
    let items = provider.model("items");

    let ids = [
        "simple",
        "with-dash",
        "with_underscore",
        "with.dot",
        "with:colon",
        "with/slash",
        "uuid-550e8400-e29b-41d4-a716-446655440000",
    ];

    for id in ids {
        items.create(args(json!({"data": {"id": id}}))).await;
    }

    for id in ids {
        let found = items
            .find_unique(args(json!({"where": {"id": id}})))
            .await;
        assert!(found.is_some(), "Failed for ID: {id}");
    }
}

#[tokio::test]
async fn numeric_ids_are_kept() {
    let provider = provider();
    let items = provider.model("items");

    let created = items.create(args(json!({"data": {"id": 7}}))).await;

    assert_eq!(created.id(), Some(&json!(7)));
    assert!(items
        .find_unique(args(json!({"where": {"id": "7"}})))
        .await
        .is_none());
}

// ============================================================================
// Duplicates
// ============================================================================

#[tokio::test]
async fn duplicate_ids_first_match_wins() {
    let provider = provider();
    let items = provider.model("items");

    items.create(args(json!({"data": {"id": "dup", "n": 1}}))).await;
    items.create(args(json!({"data": {"id": "dup", "n": 2}}))).await;

    let found = items
        .find_unique(args(json!({"where": {"id": "dup"}})))
        .await
        .unwrap();
    assert_eq!(found.get("n"), Some(&json!(1)));

    let removed = items
        .delete(args(json!({"where": {"id": "dup"}})))
        .await
        .unwrap();
    assert_eq!(removed.get("n"), Some(&json!(1)));

    let remaining = items
        .find_unique(args(json!({"where": {"id": "dup"}})))
        .await
        .unwrap();
    assert_eq!(remaining.get("n"), Some(&json!(2)));
}

// ============================================================================
// Large Collections
// ============================================================================

#[tokio::test]
async fn many_records() {
    let provider = provider();
    let entries = provider.model("entries");

    for i in 0..1000 {
        entries
            .create(args(json!({"data": {"id": format!("e{i}"), "n": i, "even": i % 2 == 0}})))
            .await;
    }

    assert_eq!(entries.count(CountArgs::default()).await, 1000);
    assert_eq!(
        entries
            .count(CountArgs::new(Filter::new().equals("even", true)))
            .await,
        500
    );

    let top = entries
        .find_many(args(json!({"orderBy": {"n": "desc"}, "take": 3})))
        .await;
    let ids: Vec<&str> = top.iter().filter_map(Record::id_str).collect();
    assert_eq!(ids, vec!["e999", "e998", "e997"]);

    let tail = entries.find_many(FindManyArgs::new().skip(998)).await;
    assert_eq!(tail.len(), 2);
}
