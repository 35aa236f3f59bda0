//! Model handlers: the per-collection query and CRUD surface.
//!
//! Operations are `async` so the handler can stand in for a networked ORM
//! client, but each one runs to completion without an await point. A
//! read-then-write sequence spread over two calls is not atomic.

use crate::query::{
    CountArgs, CreateArgs, DeleteArgs, FindFirstArgs, FindManyArgs, FindUniqueArgs, UpdateArgs,
};
use crate::store::SharedCollection;
use crate::{error::Result, Clock, CollectionName, Error, Record};
use std::sync::Arc;

/// Query and CRUD operations bound to one collection.
#[derive(Debug)]
pub struct ModelHandler {
    name: CollectionName,
    collection: SharedCollection,
    clock: Arc<dyn Clock>,
}

impl ModelHandler {
    pub fn new(
        name: impl Into<CollectionName>,
        collection: SharedCollection,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            collection,
            clock,
        }
    }

    /// Name of the collection this handler serves.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The live collection behind this handler.
    pub fn collection(&self) -> &SharedCollection {
        &self.collection
    }

    /// Records matching `where`, ordered by `orderBy`, then `skip`/`take`.
    pub async fn find_many(&self, args: FindManyArgs) -> Vec<Record> {
        self.collection.read().find_many(&args)
    }

    /// First record in store order matching `where`.
    pub async fn find_unique(&self, args: FindUniqueArgs) -> Option<Record> {
        self.collection.read().find_unique(&args.filter)
    }

    /// First record matching `where` after ordering by `orderBy`.
    pub async fn find_first(&self, args: FindFirstArgs) -> Option<Record> {
        self.collection.read().find_first(&args)
    }

    pub async fn count(&self, args: CountArgs) -> usize {
        self.collection.read().count(&args.filter)
    }

    /// Append a new record built from `data` and return it.
    pub async fn create(&self, args: CreateArgs) -> Record {
        let record = Record::create(args.data, &self.clock.timestamp());
        self.collection.write().insert(record.clone());

        tracing::debug!(collection = %self.name, id = ?record.id(), "Record created");
        record
    }

    /// Merge `data` into the first record matching `where`.
    ///
    /// Fails with [`Error::NotFound`] when nothing matches; the collection is
    /// then left untouched.
    pub async fn update(&self, args: UpdateArgs) -> Result<Record> {
        let now = self.clock.timestamp();
        let updated = self
            .collection
            .write()
            .update_first(&args.filter, args.data, &now);

        match updated {
            Some(record) => {
                tracing::debug!(collection = %self.name, id = ?record.id(), "Record updated");
                Ok(record)
            }
            None => {
                tracing::debug!(collection = %self.name, "Update matched no record");
                Err(Error::NotFound(self.name.clone()))
            }
        }
    }

    /// Remove the first record matching `where` and return it.
    ///
    /// Fails with [`Error::NotFound`] when nothing matches.
    pub async fn delete(&self, args: DeleteArgs) -> Result<Record> {
        let removed = self.collection.write().remove_first(&args.filter);

        match removed {
            Some(record) => {
                tracing::debug!(collection = %self.name, id = ?record.id(), "Record deleted");
                Ok(record)
            }
            None => {
                tracing::debug!(collection = %self.name, "Delete matched no record");
                Err(Error::NotFound(self.name.clone()))
            }
        }
    }
}
