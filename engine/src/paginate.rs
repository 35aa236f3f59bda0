//! Offset/limit slicing of an already filtered and sorted result.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Drop the first `skip` items, then keep at most `take` of the rest.
///
/// Both bounds are optional and never fail: a `skip` past the end yields an
/// empty result.
pub fn paginate<T>(mut items: Vec<T>, skip: Option<usize>, take: Option<usize>) -> Vec<T> {
    if let Some(skip) = skip {
        let skip = skip.min(items.len());
        items.drain(..skip);
    }
    if let Some(take) = take {
        items.truncate(take);
    }
    items
}

/// Deserialize an optional `skip`/`take`, clamping negative numbers to zero.
///
/// Fractional values are truncated.
pub(crate) fn deserialize_bound<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                Ok(Some(usize::try_from(u).unwrap_or(usize::MAX)))
            } else if n.as_i64().is_some() {
                Ok(Some(0))
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                Ok(Some(if f <= 0.0 { 0 } else { f as usize }))
            }
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a number, got {}",
            crate::filter::json_type_name(&other)
        ))),
    }
}
