//! Persistence for todo documents.
//!
//! The store is a plain document collection keyed by id. Every call is an
//! independent write or read; there are no multi-document transactions, so
//! callers that need atomic read-modify-write sequences must serialize them
//! themselves (see `TodoService`).

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::cmp::Ordering;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::{NewTodo, TodoItem};

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Persists a new document and returns it with its assigned id.
    async fn insert(&self, todo: NewTodo) -> StoreResult<TodoItem>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<TodoItem>>;

    /// Returns a document holding exactly `order`, if any.
    async fn find_by_order(&self, order: i64) -> StoreResult<Option<TodoItem>>;

    /// Returns every document, highest `order` first.
    async fn find_all(&self) -> StoreResult<Vec<TodoItem>>;

    /// Returns the highest `order` in the collection, or `None` when empty.
    async fn find_max_order(&self) -> StoreResult<Option<i64>>;

    /// Writes `item` under its id, replacing any previous version.
    async fn save(&self, item: &TodoItem) -> StoreResult<()>;

    /// Removes the document. Returns `false` if it did not exist.
    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;
}

/// Order descending, ties broken by id so listings are stable.
fn by_order_desc(a: &TodoItem, b: &TodoItem) -> Ordering {
    b.order.cmp(&a.order).then_with(|| a.id.cmp(&b.id))
}

/// Builds the document for a fresh insert.
fn assign_id(todo: NewTodo) -> TodoItem {
    TodoItem {
        id: Uuid::new_v4(),
        value: todo.value,
        order: todo.order,
        done_at: None,
    }
}
