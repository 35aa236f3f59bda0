//! Record types for storing data.
//!
//! A record is an open, schema-less mapping of field names to JSON values.
//! Field order is preserved as inserted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The field map of a record, or the `data` of a mutation.
pub type Fields = Map<String, Value>;

/// A schema-less entry in a collection.
///
/// Every record stored by the engine carries `id`, `createdAt` and
/// `updatedAt`; everything else is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Fields);

impl Record {
    pub const ID: &'static str = "id";
    pub const CREATED_AT: &'static str = "createdAt";
    pub const UPDATED_AT: &'static str = "updatedAt";

    /// Build a new record from caller data.
    ///
    /// `id` and `createdAt` are taken from `data` when present and non-null,
    /// otherwise an id is generated and `createdAt` is set to `now`.
    /// `updatedAt` is always `now`.
    pub fn create(mut data: Fields, now: &str) -> Self {
        let id = data
            .shift_remove(Self::ID)
            .filter(|id| !id.is_null())
            .unwrap_or_else(|| Value::String(generate_id()));
        let created_at = data
            .shift_remove(Self::CREATED_AT)
            .filter(|at| !at.is_null())
            .unwrap_or_else(|| Value::String(now.to_string()));
        data.shift_remove(Self::UPDATED_AT);

        let mut fields = Fields::with_capacity(data.len() + 3);
        fields.insert(Self::ID.to_string(), id);
        fields.extend(data);
        fields.insert(Self::CREATED_AT.to_string(), created_at);
        fields.insert(Self::UPDATED_AT.to_string(), Value::String(now.to_string()));

        Self(fields)
    }

    /// Wrap an existing field map without touching it.
    pub fn from_fields(fields: Fields) -> Self {
        Self(fields)
    }

    /// Fill in any missing `id`, `createdAt` or `updatedAt`.
    ///
    /// Used when seeding, where fixtures may omit engine-maintained fields.
    pub fn ensure_metadata(&mut self, now: &str) {
        if is_absent(self.0.get(Self::ID)) {
            self.0
                .insert(Self::ID.to_string(), Value::String(generate_id()));
        }
        if is_absent(self.0.get(Self::CREATED_AT)) {
            self.0
                .insert(Self::CREATED_AT.to_string(), Value::String(now.to_string()));
        }
        if is_absent(self.0.get(Self::UPDATED_AT)) {
            let created_at = self
                .0
                .get(Self::CREATED_AT)
                .cloned()
                .unwrap_or_else(|| Value::String(now.to_string()));
            self.0.insert(Self::UPDATED_AT.to_string(), created_at);
        }
    }

    /// Shallow-merge `data` over this record and stamp `updatedAt`.
    ///
    /// Fields absent from `data` are kept as they are.
    pub fn merge(&mut self, data: Fields, now: &str) {
        for (key, value) in data {
            self.0.insert(key, value);
        }
        self.0
            .insert(Self::UPDATED_AT.to_string(), Value::String(now.to_string()));
    }

    /// Value of a field, or `None` if the record has no such field.
    ///
    /// A stored JSON `null` is `Some(&Value::Null)`, not `None`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The record id.
    pub fn id(&self) -> Option<&Value> {
        self.0.get(Self::ID)
    }

    /// The record id, if it is a string.
    pub fn id_str(&self) -> Option<&str> {
        self.id().and_then(Value::as_str)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.0.get(Self::CREATED_AT).and_then(Value::as_str)
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.0.get(Self::UPDATED_AT).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

fn is_absent(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_null)
}

/// Generate an opaque, collision-resistant record id.
///
/// Not suitable as a secret.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
