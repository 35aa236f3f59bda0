//! Store - the in-memory state container.
//!
//! The Store maps collection names to ordered sequences of records. A
//! collection comes into existence the first time its name is referenced;
//! an unknown name is simply an empty collection.

use crate::paginate::paginate;
use crate::query::{FindFirstArgs, FindManyArgs};
use crate::{CollectionName, Fields, Filter, Fixtures, Record};
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An ordered sequence of records.
///
/// This is the synchronous query kernel behind every model handler:
/// filter, then sort, then paginate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in store order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record.
    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Matching records, sorted, then sliced by `skip`/`take`.
    pub fn find_many(&self, args: &FindManyArgs) -> Vec<Record> {
        let mut matched: Vec<&Record> = self.matching(&args.filter).collect();
        args.order_by.sort(&mut matched);
        paginate(matched, args.skip, args.take)
            .into_iter()
            .cloned()
            .collect()
    }

    /// First matching record in store order.
    pub fn find_unique(&self, filter: &Filter) -> Option<Record> {
        self.matching(filter).next().cloned()
    }

    /// First matching record after sorting.
    pub fn find_first(&self, args: &FindFirstArgs) -> Option<Record> {
        // min_by keeps the earliest of equal elements, same as a stable sort.
        self.matching(&args.filter)
            .min_by(|a, b| args.order_by.compare(a, b))
            .cloned()
    }

    /// Number of matching records.
    pub fn count(&self, filter: &Filter) -> usize {
        self.matching(filter).count()
    }

    /// Merge `data` into the first matching record and return the result.
    pub fn update_first(&mut self, filter: &Filter, data: Fields, now: &str) -> Option<Record> {
        let record = self.records.iter_mut().find(|r| filter.matches(r))?;
        record.merge(data, now);
        Some(record.clone())
    }

    /// Remove the first matching record and return it.
    pub fn remove_first(&mut self, filter: &Filter) -> Option<Record> {
        let index = self.records.iter().position(|r| filter.matches(r))?;
        Some(self.records.remove(index))
    }

    fn matching<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| filter.matches(r))
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

/// A live, shared reference to one collection.
///
/// Every handle obtained for the same name points at the same sequence, so a
/// mutation through one is visible through all others.
#[derive(Debug, Clone, Default)]
pub struct SharedCollection(Arc<RwLock<Collection>>);

impl SharedCollection {
    pub fn new(collection: Collection) -> Self {
        Self(Arc::new(RwLock::new(collection)))
    }

    /// Lock for reading. Operations never panic while holding the lock, so a
    /// poisoned lock still guards consistent data and is recovered.
    pub fn read(&self) -> RwLockReadGuard<'_, Collection> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for writing. See [`SharedCollection::read`] about poisoning.
    pub fn write(&self) -> RwLockWriteGuard<'_, Collection> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether both handles refer to the same collection.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// The main store holding all collections.
#[derive(Debug, Default)]
pub struct Store {
    collections: DashMap<CollectionName, SharedCollection>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from fixtures.
    pub fn from_fixtures(fixtures: Fixtures, now: &str) -> Self {
        let store = Self::new();
        store.seed(fixtures, now);
        store
    }

    /// Get the collection for `name`, creating it empty if it does not exist.
    pub fn collection(&self, name: &str) -> SharedCollection {
        if let Some(existing) = self.collections.get(name) {
            return existing.value().clone();
        }
        self.collections
            .entry(name.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// Whether `name` has been referenced or seeded.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Names of all known collections, sorted.
    pub fn collection_names(&self) -> Vec<CollectionName> {
        let mut names: Vec<_> = self.collections.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.collections.iter().map(|e| e.value().read().len()).sum()
    }

    /// Append fixture records to their collections.
    ///
    /// Records missing `id`, `createdAt` or `updatedAt` get them filled in.
    pub fn seed(&self, fixtures: Fixtures, now: &str) {
        for (name, records) in fixtures.into_collections() {
            let count = records.len();
            let shared = self.collection(&name);
            let mut collection = shared.write();
            for mut record in records {
                record.ensure_metadata(now);
                collection.insert(record);
            }
            tracing::debug!(collection = %name, records = count, "Seeded collection");
        }
    }

    /// Copy of the current contents of every collection.
    pub fn export_state(&self) -> Fixtures {
        let mut fixtures = Fixtures::new();
        for entry in self.collections.iter() {
            fixtures.insert(entry.key().clone(), entry.value().read().records().to_vec());
        }
        fixtures
    }

    /// Empty every collection in place.
    ///
    /// Collections stay registered, so existing handles remain bound.
    pub fn reset(&self) {
        for entry in self.collections.iter() {
            entry.value().write().clear();
        }
    }
}
