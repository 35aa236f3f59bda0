//! Argument envelopes for model handler operations.
//!
//! Each envelope deserializes from the same JSON shape a caller of the
//! data provider would pass (`where`, `orderBy`, `skip`, `take`, `data`) and
//! also offers builder methods for Rust callers.

use crate::paginate::deserialize_bound;
use crate::{Fields, Filter, OrderBy};
use serde::Deserialize;

/// Arguments of `findMany`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindManyArgs {
    #[serde(default, rename = "where")]
    pub filter: Filter,
    #[serde(default)]
    pub order_by: OrderBy,
    #[serde(default, deserialize_with = "deserialize_bound")]
    pub skip: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_bound")]
    pub take: Option<usize>,
}

impl FindManyArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn take(mut self, take: usize) -> Self {
        self.take = Some(take);
        self
    }
}

/// Arguments of `findUnique`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FindUniqueArgs {
    #[serde(rename = "where")]
    pub filter: Filter,
}

impl FindUniqueArgs {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

/// Arguments of `findFirst`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindFirstArgs {
    #[serde(default, rename = "where")]
    pub filter: Filter,
    #[serde(default)]
    pub order_by: OrderBy,
}

impl FindFirstArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }
}

/// Arguments of `count`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountArgs {
    #[serde(default, rename = "where")]
    pub filter: Filter,
}

impl CountArgs {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

/// Arguments of `create`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateArgs {
    pub data: Fields,
}

impl CreateArgs {
    pub fn new(data: Fields) -> Self {
        Self { data }
    }
}

/// Arguments of `update`: the first record matching `filter` receives `data`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateArgs {
    #[serde(rename = "where")]
    pub filter: Filter,
    pub data: Fields,
}

impl UpdateArgs {
    pub fn new(filter: Filter, data: Fields) -> Self {
        Self { filter, data }
    }
}

/// Arguments of `delete`: the first record matching `filter` is removed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeleteArgs {
    #[serde(rename = "where")]
    pub filter: Filter,
}

impl DeleteArgs {
    pub fn new(filter: Filter) -> Self {
        Self { filter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn find_many_from_json() {
        let args: FindManyArgs = serde_json::from_value(json!({
            "where": {"type": "expense"},
            "orderBy": {"amount": "desc"},
            "skip": 1,
            "take": 2
        }))
        .unwrap();

        assert_eq!(
            args,
            FindManyArgs::new()
                .filter(Filter::new().equals("type", "expense"))
                .order_by(OrderBy::new().desc("amount"))
                .skip(1)
                .take(2)
        );
    }

    #[test]
    fn read_envelopes_default_when_empty() {
        let many: FindManyArgs = serde_json::from_value(json!({})).unwrap();
        assert_eq!(many, FindManyArgs::default());

        let first: FindFirstArgs = serde_json::from_value(json!({})).unwrap();
        assert!(first.filter.is_empty() && first.order_by.is_empty());

        let count: CountArgs = serde_json::from_value(json!({"where": null})).unwrap();
        assert!(count.filter.is_empty());
    }

    #[test]
    fn mutation_envelopes_require_their_fields() {
        assert!(serde_json::from_value::<UpdateArgs>(json!({"where": {"id": "1"}})).is_err());
        assert!(serde_json::from_value::<CreateArgs>(json!({})).is_err());
        assert!(serde_json::from_value::<CreateArgs>(json!({"data": [1, 2]})).is_err());
        assert!(serde_json::from_value::<DeleteArgs>(json!({})).is_err());
    }

    #[test]
    fn update_from_json() {
        let args: UpdateArgs = serde_json::from_value(json!({
            "where": {"id": "tx-1"},
            "data": {"status": "approved"}
        }))
        .unwrap();

        assert_eq!(args.filter, Filter::new().equals("id", "tx-1"));
        assert_eq!(args.data.get("status"), Some(&json!("approved")));
    }
}
