use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{assign_id, by_order_desc, ItemStore};
use crate::error::StoreResult;
use crate::model::{NewTodo, TodoItem};

/// Volatile store used when no data directory is configured, and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<Uuid, TodoItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn insert(&self, todo: NewTodo) -> StoreResult<TodoItem> {
        let item = assign_id(todo);
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<TodoItem>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn find_by_order(&self, order: i64) -> StoreResult<Option<TodoItem>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| item.order == order)
            .min_by_key(|item| item.id)
            .cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<TodoItem>> {
        let mut all: Vec<TodoItem> = self.items.read().await.values().cloned().collect();
        all.sort_by(by_order_desc);
        Ok(all)
    }

    async fn find_max_order(&self) -> StoreResult<Option<i64>> {
        Ok(self.items.read().await.values().map(|item| item.order).max())
    }

    async fn save(&self, item: &TodoItem) -> StoreResult<()> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.items.write().await.remove(&id).is_some())
    }
}
