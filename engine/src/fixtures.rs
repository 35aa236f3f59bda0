//! Seed data for the store.
//!
//! Fixtures are a JSON object mapping each collection name to an array of
//! records:
//!
//! ```json
//! {
//!   "categories": [{ "id": "c1", "name": "Food" }],
//!   "transactions": [{ "id": "t1", "amount": 50, "categoryId": "c1" }]
//! }
//! ```
//!
//! Collections are kept in a `BTreeMap` so serialized output is
//! deterministic. Record order within a collection is preserved.

use crate::{error::Result, CollectionName, Error, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records to load into (or exported from) a store, grouped by collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixtures {
    collections: BTreeMap<CollectionName, Vec<Record>>,
}

impl Fixtures {
    /// Create empty fixtures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the records of one collection, replacing any previous ones.
    pub fn insert(&mut self, collection: impl Into<CollectionName>, records: Vec<Record>) {
        self.collections.insert(collection.into(), records);
    }

    /// Append one record to a collection.
    pub fn add_record(&mut self, collection: impl Into<CollectionName>, record: Record) {
        self.collections
            .entry(collection.into())
            .or_default()
            .push(record);
    }

    /// Records of one collection.
    pub fn records(&self, collection: &str) -> Option<&[Record]> {
        self.collections.get(collection).map(Vec::as_slice)
    }

    /// Collection names, sorted.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Count total records across all collections.
    pub fn record_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn into_collections(self) -> BTreeMap<CollectionName, Vec<Record>> {
        self.collections
    }

    /// Serialize to JSON with deterministic ordering.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidFixture(e.to_string()))
    }

    /// Serialize to pretty JSON with deterministic ordering.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidFixture(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidFixture(e.to_string()))
    }
}
