//! JSON command dispatch.
//!
//! Hosts that speak JSON (the shell, tests, future bindings) send a
//! [`Command`] naming a model, an action and its arguments:
//!
//! ```json
//! { "model": "transactions", "action": "findMany", "args": { "where": { "type": "expense" } } }
//! ```
//!
//! The result is the JSON rendering of what the handler returned: an array
//! for `findMany`, a record or `null` for lookups, a number for `count`.

use crate::query::{
    CountArgs, CreateArgs, DeleteArgs, FindFirstArgs, FindManyArgs, FindUniqueArgs, UpdateArgs,
};
use crate::{error::Result, CollectionName, DataProvider, Error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A model handler operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    FindMany,
    FindUnique,
    FindFirst,
    Create,
    Update,
    Delete,
    Count,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::FindMany,
        Action::FindUnique,
        Action::FindFirst,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Count,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::FindMany => "findMany",
            Action::FindUnique => "findUnique",
            Action::FindFirst => "findFirst",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Count => "count",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::InvalidQuery(format!("unknown action: {s}")))
    }
}

/// One request against the data provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Command {
    pub model: CollectionName,
    pub action: Action,
    #[serde(default)]
    pub args: Value,
}

impl Command {
    pub fn new(model: impl Into<CollectionName>, action: Action, args: Value) -> Self {
        Self {
            model: model.into(),
            action,
            args,
        }
    }

    /// Parse a command from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidQuery(e.to_string()))
    }
}

impl DataProvider {
    /// Run a command and render its result as JSON.
    pub async fn execute(&self, command: Command) -> Result<Value> {
        let handler = self.model(&command.model);
        let args = command.args;

        let result = match command.action {
            Action::FindMany => {
                let records = handler.find_many(decode::<FindManyArgs>(args)?).await;
                Value::Array(records.into_iter().map(Value::from).collect())
            }
            Action::FindUnique => handler
                .find_unique(decode::<FindUniqueArgs>(args)?)
                .await
                .map_or(Value::Null, Value::from),
            Action::FindFirst => handler
                .find_first(decode::<FindFirstArgs>(args)?)
                .await
                .map_or(Value::Null, Value::from),
            Action::Count => Value::from(handler.count(decode::<CountArgs>(args)?).await),
            Action::Create => Value::from(handler.create(decode::<CreateArgs>(args)?).await),
            Action::Update => Value::from(handler.update(decode::<UpdateArgs>(args)?).await?),
            Action::Delete => Value::from(handler.delete(decode::<DeleteArgs>(args)?).await?),
        };

        Ok(result)
    }
}

/// Decode action arguments; a missing or `null` envelope is an empty object.
fn decode<T: DeserializeOwned>(args: Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| Error::InvalidQuery(e.to_string()))
}
