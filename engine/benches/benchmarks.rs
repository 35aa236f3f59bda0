//! Performance benchmarks for ledgerdb-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ledgerdb_engine::{
    Collection, FindFirstArgs, FindManyArgs, Fixtures, Record, Store,
};
use serde_json::{json, Value};

const NOW: &str = "2024-01-01T00:00:00.000Z";

fn transaction(i: usize) -> Record {
    let kind = if i % 3 == 0 { "income" } else { "expense" };
    let fields = json!({
        "id": format!("tx_{i}"),
        "amount": (i * 37) % 1000,
        "type": kind,
        "description": format!("Transaction {i}"),
    });
    match fields {
        Value::Object(map) => Record::create(map, NOW),
        _ => Record::default(),
    }
}

fn populated(size: usize) -> Collection {
    Collection::from((0..size).map(transaction).collect::<Vec<_>>())
}

fn args<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

fn bench_collection_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_operations");

    group.bench_function("insert", |b| {
        let mut collection = Collection::new();
        let mut i = 0;

        b.iter(|| {
            i += 1;
            collection.insert(black_box(transaction(i)))
        })
    });

    group.bench_function("find_unique", |b| {
        let collection = populated(1000);
        let filter = args(json!({"id": "tx_500"}));

        b.iter(|| collection.find_unique(black_box(&filter)))
    });

    group.bench_function("find_first_ordered", |b| {
        let collection = populated(1000);
        let find: FindFirstArgs = args(json!({
            "where": {"type": "expense"},
            "orderBy": {"amount": "desc"}
        }));

        b.iter(|| collection.find_first(black_box(&find)))
    });

    group.bench_function("count_range", |b| {
        let collection = populated(1000);
        let filter = args(json!({"amount": {"gte": 100, "lt": 500}}));

        b.iter(|| collection.count(black_box(&filter)))
    });

    group.finish();
}

fn bench_find_many(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_many");

    for size in [100, 1000, 10000].iter() {
        let collection = populated(*size);
        let query: FindManyArgs = args(json!({
            "where": {
                "OR": [{"type": "income"}, {"amount": {"gte": 900}}],
                "description": {"startsWith": "Transaction"}
            },
            "orderBy": [{"type": "asc"}, {"amount": "desc"}],
            "skip": 10,
            "take": 20
        }));

        group.bench_with_input(
            BenchmarkId::new("filter_sort_page", size),
            &collection,
            |b, collection| b.iter(|| collection.find_many(black_box(&query))),
        );
    }

    group.finish();
}

fn bench_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixtures");

    for size in [100, 1000].iter() {
        let mut fixtures = Fixtures::new();
        fixtures.insert("transactions", (0..*size).map(transaction).collect());
        let json = fixtures.to_json().unwrap();

        group.bench_with_input(BenchmarkId::new("to_json", size), &fixtures, |b, fixtures| {
            b.iter(|| fixtures.to_json())
        });

        group.bench_with_input(BenchmarkId::new("load", size), &json, |b, json| {
            b.iter(|| {
                let fixtures = Fixtures::from_json(black_box(json)).unwrap();
                Store::from_fixtures(fixtures, NOW)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_collection_operations,
    bench_find_many,
    bench_fixtures,
);
criterion_main!(benches);
