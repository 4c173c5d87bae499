//! Todo documents and the request/response envelopes that carry them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A todo item as stored and as returned over the wire.
///
/// `order` is the display rank (highest first). `done_at` is `None` while the
/// item is open and holds the completion time once it is marked done.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(rename = "todoId")]
    pub id: Uuid,
    pub value: String,
    pub order: i64,
    pub done_at: Option<DateTime<Utc>>,
}

/// A todo that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub value: String,
    pub order: i64,
}

/// PATCH payload. Every field is optional and omitted fields are left alone.
///
/// `done` distinguishes "absent" (`None`) from "present but null"
/// (`Some(None)`); both `null` and `false` reopen the item.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub done: Option<Option<bool>>,
    #[serde(default)]
    pub value: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub todo: TodoItem,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub todos: Vec<TodoItem>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
}
