//! Declarative where clauses and the predicate matcher.
//!
//! A where clause is a JSON object. Each key is either a field name or one of
//! the combinators `AND` / `OR`:
//!
//! ```json
//! {
//!   "type": "expense",
//!   "amount": { "gte": 100, "lt": 1000 },
//!   "OR": [ { "status": "approved" }, { "status": { "in": ["pending", "review"] } } ]
//! }
//! ```
//!
//! Parsing is permissive. Unknown operators, and operators whose argument has
//! the wrong shape, contribute no constraint. All keys of a clause are ANDed.

use crate::{error::Result, Error, Record};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// Reserved key combining sub-clauses by conjunction.
pub const AND: &str = "AND";
/// Reserved key combining sub-clauses by disjunction.
pub const OR: &str = "OR";

/// A parsed where clause. The empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

/// One key of a where clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Matches when every sub-filter matches (vacuously true when empty).
    And(Vec<Filter>),
    /// Matches when at least one sub-filter matches (false when empty).
    Or(Vec<Filter>),
    /// Constrains a single field.
    Field { field: String, predicate: Predicate },
}

/// Constraint on a field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Strict equality with a literal.
    Literal(Value),
    /// Every operator must hold. No operators means no constraint.
    Operators(Vec<Operator>),
}

/// A named comparison inside an operator object.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Equals(Value),
    Not(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Lt(Value),
    Lte(Value),
    Gt(Value),
    Gte(Value),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
}

impl Filter {
    /// The empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a where clause. `null` is the empty filter.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(Error::InvalidQuery(format!(
                "where clause must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Parse a where clause from its key/value map.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let conditions = map
            .into_iter()
            .filter_map(|(key, value)| Condition::parse(key, value))
            .collect();
        Self { conditions }
    }

    /// A filter matching when all `filters` match.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::new().with(Condition::And(filters.into_iter().collect()))
    }

    /// A filter matching when any of `filters` matches.
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::new().with(Condition::Or(filters.into_iter().collect()))
    }

    /// Require `field` to strictly equal `value`.
    pub fn equals(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(Condition::Field {
            field: field.into(),
            predicate: Predicate::Literal(value.into()),
        })
    }

    /// Require `field` to satisfy every operator in `operators`.
    pub fn field(
        self,
        field: impl Into<String>,
        operators: impl IntoIterator<Item = Operator>,
    ) -> Self {
        self.with(Condition::Field {
            field: field.into(),
            predicate: Predicate::Operators(operators.into_iter().collect()),
        })
    }

    /// Add a condition.
    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check whether `record` satisfies this filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }
}

impl TryFrom<Value> for Filter {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(serde::de::Error::custom(format!(
                "where clause must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl Condition {
    fn parse(key: String, value: Value) -> Option<Self> {
        match key.as_str() {
            AND => parse_branches(value).map(Condition::And),
            OR => parse_branches(value).map(Condition::Or),
            _ => {
                let predicate = match value {
                    Value::Object(ops) => Predicate::Operators(
                        ops.into_iter()
                            .filter_map(|(name, arg)| Operator::parse(&name, arg))
                            .collect(),
                    ),
                    literal => Predicate::Literal(literal),
                };
                Some(Condition::Field {
                    field: key,
                    predicate,
                })
            }
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Condition::And(filters) => filters.iter().all(|f| f.matches(record)),
            Condition::Or(filters) => filters.iter().any(|f| f.matches(record)),
            Condition::Field { field, predicate } => predicate.matches(record.get(field)),
        }
    }
}

/// Branches of `AND`/`OR`: an array of clauses, or a single clause object.
/// Non-object entries behave like the empty clause. Any other shape is
/// ignored.
fn parse_branches(value: Value) -> Option<Vec<Filter>> {
    match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Filter::from_map(map),
                    _ => Filter::default(),
                })
                .collect(),
        ),
        Value::Object(map) => Some(vec![Filter::from_map(map)]),
        _ => None,
    }
}

impl Predicate {
    /// `value` is `None` when the record lacks the field.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Predicate::Literal(expected) => strict_eq(value, expected),
            Predicate::Operators(ops) => ops.iter().all(|op| op.matches(value)),
        }
    }
}

impl Operator {
    /// Parse one entry of an operator object. Returns `None` for unknown
    /// operators and malformed arguments.
    pub fn parse(name: &str, arg: Value) -> Option<Self> {
        let op = match name {
            "equals" => Operator::Equals(arg),
            "not" => Operator::Not(arg),
            "in" => Operator::In(into_array(arg)?),
            "notIn" => Operator::NotIn(into_array(arg)?),
            "lt" => Operator::Lt(arg),
            "lte" => Operator::Lte(arg),
            "gt" => Operator::Gt(arg),
            "gte" => Operator::Gte(arg),
            "contains" => Operator::Contains(into_string(arg)?),
            "startsWith" => Operator::StartsWith(into_string(arg)?),
            "endsWith" => Operator::EndsWith(into_string(arg)?),
            _ => return None,
        };
        Some(op)
    }

    /// Evaluate against a field value (`None` when the field is absent).
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Operator::Equals(arg) => strict_eq(value, arg),
            Operator::Not(arg) => !strict_eq(value, arg),
            Operator::In(args) => args.iter().any(|arg| strict_eq(value, arg)),
            Operator::NotIn(args) => !args.iter().any(|arg| strict_eq(value, arg)),
            Operator::Lt(arg) => compare_field(value, arg) == Some(Ordering::Less),
            Operator::Lte(arg) => matches!(
                compare_field(value, arg),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Gt(arg) => compare_field(value, arg) == Some(Ordering::Greater),
            Operator::Gte(arg) => matches!(
                compare_field(value, arg),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::Contains(needle) => text(value).is_some_and(|s| s.contains(needle.as_str())),
            Operator::StartsWith(prefix) => {
                text(value).is_some_and(|s| s.starts_with(prefix.as_str()))
            }
            Operator::EndsWith(suffix) => text(value).is_some_and(|s| s.ends_with(suffix.as_str())),
        }
    }
}

fn into_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

fn compare_field(value: Option<&Value>, arg: &Value) -> Option<Ordering> {
    compare_values(value?, arg)
}

/// Strict equality between a field value and an expected value.
///
/// An absent field equals nothing, not even `null`. Numbers compare by value,
/// so `1` equals `1.0`. There is no coercion across JSON types.
pub fn strict_eq(value: Option<&Value>, expected: &Value) -> bool {
    value.is_some_and(|v| values_equal(v, expected))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Natural ordering of two JSON values.
///
/// Numbers order numerically, strings lexicographically, booleans with
/// `false < true`. Every other pairing is incomparable.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Exact numeric ordering. Integers never pass through `f64`, so the order
/// stays total when large integers and floats are mixed.
fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    match (exact_int(a), exact_int(b)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        (Some(x), None) => compare_int_float(x, b.as_f64()?),
        (None, Some(y)) => compare_int_float(y, a.as_f64()?).map(Ordering::reverse),
        (None, None) => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn exact_int(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    let bound = 2f64.powi(127);
    if float >= bound {
        return Some(Ordering::Less);
    }
    if float < -bound {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0f64.partial_cmp(&(float - whole)),
        unequal => Some(unequal),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
