//! # ledgerdb engine
//!
//! An in-memory query engine that emulates a relational ORM's query surface
//! over schema-less records.
//!
//! It backs the organizational-finance dashboard's data layer: every
//! collection (`transactions`, `categories`, `approvals`, ...) is an ordered
//! sequence of JSON records, queried through declarative where clauses and
//! sort/paginate envelopes.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine knows nothing about files, network or terminals
//! - **Schema-less**: any field, any shape; nothing is validated on write
//! - **Permissive**: unknown filter operators contribute no constraint
//! - **Explicit state**: the [`Store`] and [`Clock`] are injected into the
//!   [`DataProvider`], so each test can start from a fresh store
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] is an open mapping of field names to JSON values. The engine
//! maintains `id`, `createdAt` and `updatedAt`.
//!
//! ### Where clauses
//!
//! A [`Filter`] is parsed from a JSON object. Field keys map to a literal
//! (strict equality) or an operator object (`equals`, `not`, `in`, `notIn`,
//! `lt`, `lte`, `gt`, `gte`, `contains`, `startsWith`, `endsWith`). `AND` and
//! `OR` combine nested clauses.
//!
//! ### Model handlers
//!
//! A [`ModelHandler`] exposes `find_many`, `find_unique`, `find_first`,
//! `count`, `create`, `update` and `delete` for one collection. The
//! [`DataProvider`] resolves any collection name to its memoized handler.
//!
//! ## Quick Start
//!
//! ```rust
//! use ledgerdb_engine::{DataProvider, FindManyArgs, Fixtures, Store};
//! use serde_json::json;
//!
//! # tokio_test_block(async {
//! let fixtures = Fixtures::from_json(r#"{"transactions": [
//!     {"id": "1", "amount": 50, "type": "income"},
//!     {"id": "2", "amount": 200, "type": "expense"},
//!     {"id": "3", "amount": 75, "type": "expense"}
//! ]}"#).unwrap();
//! let provider = DataProvider::new(Store::from_fixtures(fixtures, "2024-01-01T00:00:00.000Z"));
//!
//! let args: FindManyArgs = serde_json::from_value(json!({
//!     "where": {"type": "expense", "amount": {"gte": 100}}
//! })).unwrap();
//! let expensive = provider.transactions().find_many(args).await;
//!
//! assert_eq!(expensive.len(), 1);
//! assert_eq!(expensive[0].id_str(), Some("2"));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
//! # }
//! ```
//!
//! ## JSON hosts
//!
//! The [`command`] module accepts `{model, action, args}` requests and
//! renders results as JSON, for hosts such as the `ledgerdb` shell.

pub mod clock;
pub mod command;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod handler;
pub mod paginate;
pub mod provider;
pub mod query;
pub mod record;
pub mod sort;
pub mod store;

// Re-export main types at crate root
pub use clock::{format_timestamp, Clock, ManualClock, SystemClock};
pub use command::{Action, Command};
pub use error::Error;
pub use filter::{Condition, Filter, Operator, Predicate};
pub use fixtures::Fixtures;
pub use handler::ModelHandler;
pub use paginate::paginate;
pub use provider::DataProvider;
pub use query::{
    CountArgs, CreateArgs, DeleteArgs, FindFirstArgs, FindManyArgs, FindUniqueArgs, UpdateArgs,
};
pub use record::{generate_id, Fields, Record};
pub use sort::{OrderBy, SortOrder};
pub use store::{Collection, SharedCollection, Store};

/// Type aliases for clarity
pub type CollectionName = String;
/// ISO-8601 UTC timestamp, e.g. `2024-01-31T12:00:00.000Z`.
pub type Timestamp = String;
