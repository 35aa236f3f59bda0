//! Multi-key ordering of records.
//!
//! An `orderBy` is either an object (`{"date": "desc", "amount": "asc"}`,
//! keys applied in declaration order) or an array of single-key objects
//! (`[{"date": "desc"}, {"amount": "asc"}]`).

use crate::filter::{compare_values, json_type_name};
use crate::Record;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Direction of one sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a direction. Anything other than `desc` (any case) is ascending.
    pub fn parse(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// An ordered list of sort keys. Empty means store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    keys: Vec<(String, SortOrder)>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(self, field: impl Into<String>) -> Self {
        self.then(field, SortOrder::Asc)
    }

    pub fn desc(self, field: impl Into<String>) -> Self {
        self.then(field, SortOrder::Desc)
    }

    /// Append a sort key; earlier keys take precedence.
    pub fn then(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.keys.push((field.into(), order));
        self
    }

    pub fn keys(&self) -> &[(String, SortOrder)] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compare two records key by key; the first key that differs decides.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for (field, order) in &self.keys {
            let ordering = compare_keys(a.get(field), b.get(field));
            if ordering != Ordering::Equal {
                return order.apply(ordering);
            }
        }
        Ordering::Equal
    }

    /// Stable in-place sort; full ties keep their relative order.
    pub fn sort<R: Borrow<Record>>(&self, records: &mut [R]) {
        if self.is_empty() {
            return;
        }
        records.sort_by(|a, b| self.compare(a.borrow(), b.borrow()));
    }

    /// Sorted copy of `records`. The input is left untouched.
    pub fn sorted(&self, records: &[Record]) -> Vec<Record> {
        let mut sorted = records.to_vec();
        self.sort(&mut sorted);
        sorted
    }

    fn push_entry(&mut self, field: String, direction: &Value) {
        let order = direction.as_str().map(SortOrder::parse).unwrap_or_default();
        self.keys.push((field, order));
    }
}

/// Total order over field values.
///
/// Values of one kind use their natural order. Different kinds are grouped:
/// numbers, then strings, then booleans, then everything else (absent,
/// `null`, arrays, objects), which all tie.
fn compare_keys(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (rank_a, rank_b) = (kind_rank(a), kind_rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }
    match (a, b) {
        (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn kind_rank(value: Option<&Value>) -> u8 {
    match value {
        Some(Value::Number(_)) => 0,
        Some(Value::String(_)) => 1,
        Some(Value::Bool(_)) => 2,
        _ => 3,
    }
}

impl<'de> Deserialize<'de> for OrderBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut order_by = OrderBy::new();
        match Value::deserialize(deserializer)? {
            Value::Null => {}
            Value::Object(map) => {
                for (field, direction) in map {
                    order_by.push_entry(field, &direction);
                }
            }
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Object(map) => {
                            for (field, direction) in map {
                                order_by.push_entry(field, &direction);
                            }
                        }
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "orderBy entries must be objects, got {}",
                                json_type_name(&other)
                            )))
                        }
                    }
                }
            }
            other => {
                return Err(serde::de::Error::custom(format!(
                    "orderBy must be an object or an array, got {}",
                    json_type_name(&other)
                )))
            }
        }
        Ok(order_by)
    }
}
