//! Wire DTOs for the todo API.
//!
//! These mirror the server's JSON shapes but are defined independently so
//! the client does not depend on the server crate. The integration test
//! catches any drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "todoId")]
    pub id: Uuid,
    pub value: String,
    pub order: i64,
    pub done_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn is_done(&self) -> bool {
        self.done_at.is_some()
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub value: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    /// Moves the todo to this rank, swapping with its current holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// `Some(Some(true))` marks the todo done. `Some(Some(false))` and
    /// `Some(None)` (sent as `null`) both reopen it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub done: Option<Option<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodoEnvelope {
    pub todo: Todo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TodoListEnvelope {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorEnvelope {
    pub error_message: String,
}
