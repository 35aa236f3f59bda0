//! The data provider: the single entry point callers use.
//!
//! Any collection name resolves to a [`ModelHandler`]. Handlers are created
//! on first use and memoized, so every lookup of the same name yields the
//! same handler bound to the same live collection.

use crate::{Clock, ModelHandler, Store, SystemClock};
use dashmap::DashMap;
use std::sync::Arc;

/// Generates named accessors for the collections the dashboard uses.
macro_rules! model_accessors {
    ($($(#[$meta:meta])* $method:ident => $collection:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $method(&self) -> Arc<ModelHandler> {
                self.model($collection)
            }
        )*
    };
}

/// Resolves collection names to model handlers over an injected store.
#[derive(Debug)]
pub struct DataProvider {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
    handlers: DashMap<String, Arc<ModelHandler>>,
}

impl DataProvider {
    /// Create a provider over `store` using the system clock.
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a provider over `store` with an explicit clock.
    pub fn with_clock(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self::shared(Arc::new(store), clock)
    }

    /// Create a provider over a store that may also be used elsewhere.
    pub fn shared(store: Arc<Store>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            handlers: DashMap::new(),
        }
    }

    /// The handler for `name`, created on first access.
    pub fn model(&self, name: &str) -> Arc<ModelHandler> {
        if let Some(handler) = self.handlers.get(name) {
            return Arc::clone(handler.value());
        }

        let handler = self
            .handlers
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(collection = %name, "Creating model handler");
                Arc::new(ModelHandler::new(
                    name,
                    self.store.collection(name),
                    Arc::clone(&self.clock),
                ))
            });
        Arc::clone(handler.value())
    }

    model_accessors! {
        categories => "categories",
        transactions => "transactions",
        organizations => "organizations",
        users => "users",
        organization_members => "organizationMembers",
        roles => "roles",
        permissions => "permissions",
        role_permissions => "rolePermissions",
        approvals => "approvals",
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Empty every collection. Existing handlers stay valid.
    pub fn reset(&self) {
        self.store.reset();
        tracing::debug!("Store reset");
    }
}
