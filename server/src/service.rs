//! Todo operations on top of an [`ItemStore`].
//!
//! Creating an item reads the current maximum order before inserting, and a
//! reorder reads the occupant of the target rank before writing both items.
//! Neither sequence is atomic at the store level, so every mutating call runs
//! under one collection-wide lock. This keeps `order` unique even with
//! concurrent requests. Listing does not take the lock.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::TodoError;
use crate::model::{NewTodo, TodoItem, UpdateTodo};
use crate::store::ItemStore;
use crate::validation::{next_order, validate_update, validate_value};

pub struct TodoService {
    store: Arc<dyn ItemStore>,
    write_lock: Mutex<()>,
}

impl TodoService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a todo ranked above every existing one.
    pub async fn create(&self, value: &str) -> Result<TodoItem, TodoError> {
        validate_value(value)?;

        let _guard = self.write_lock.lock().await;
        let order = next_order(self.store.find_max_order().await?)?;
        let todo = self
            .store
            .insert(NewTodo {
                value: value.to_string(),
                order,
            })
            .await?;

        tracing::info!(todo_id = %todo.id, order, "created todo");
        Ok(todo)
    }

    /// All todos, highest order first.
    pub async fn list(&self) -> Result<Vec<TodoItem>, TodoError> {
        Ok(self.store.find_all().await?)
    }

    /// Applies an update to the todo with `id`.
    ///
    /// Moving an item to an order that another item holds swaps the two
    /// ranks: the other item is written first with the moved item's old
    /// order, then the moved item is written with its new one.
    pub async fn update(&self, id: Uuid, update: UpdateTodo) -> Result<(), TodoError> {
        let _guard = self.write_lock.lock().await;
        let mut current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound)?;
        let patch = validate_update(update)?;

        if let Some(order) = patch.order {
            if order != current.order {
                if let Some(mut occupant) = self.store.find_by_order(order).await? {
                    occupant.order = current.order;
                    self.store.save(&occupant).await?;
                    tracing::debug!(
                        todo_id = %occupant.id,
                        order = occupant.order,
                        "swapped order with moved todo"
                    );
                }
                tracing::info!(todo_id = %id, from = current.order, to = order, "reordered todo");
                current.order = order;
            }
        }
        if let Some(done) = patch.done {
            current.done_at = done.then(Utc::now);
        }
        if let Some(value) = patch.value {
            current.value = value;
        }

        self.store.save(&current).await?;
        tracing::debug!(todo_id = %id, "updated todo");
        Ok(())
    }

    /// Permanently removes a todo. Remaining orders are not renumbered.
    pub async fn delete(&self, id: Uuid) -> Result<(), TodoError> {
        let _guard = self.write_lock.lock().await;
        if !self.store.delete_by_id(id).await? {
            return Err(TodoError::NotFound);
        }
        tracing::info!(todo_id = %id, "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::validation::MAX_ORDER;

    fn service() -> TodoService {
        TodoService::new(Arc::new(MemoryStore::new()))
    }

    fn reorder(order: i64) -> UpdateTodo {
        UpdateTodo {
            order: Some(order),
            ..Default::default()
        }
    }

    fn mark_done(done: bool) -> UpdateTodo {
        UpdateTodo {
            done: Some(Some(done)),
            ..Default::default()
        }
    }

    async fn orders(service: &TodoService) -> Vec<(String, i64)> {
        service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| (todo.value, todo.order))
            .collect()
    }

    async fn find(service: &TodoService, id: Uuid) -> TodoItem {
        service
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|todo| todo.id == id)
            .unwrap()
    }

    #[tokio::test]
    async fn create_validates_length() {
        let service = service();
        assert!(matches!(
            service.create("").await,
            Err(TodoError::Validation(_))
        ));
        assert!(matches!(
            service.create(&"x".repeat(51)).await,
            Err(TodoError::Validation(_))
        ));
        assert!(service.create("x").await.is_ok());
        assert!(service.create(&"x".repeat(50)).await.is_ok());
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn sequential_creates_number_from_one() {
        let service = service();
        for i in 1..=5 {
            let todo = service.create(&format!("item {i}")).await.unwrap();
            assert_eq!(todo.order, i);
            assert!(todo.done_at.is_none());
        }
    }

    #[tokio::test]
    async fn create_continues_after_highest_order() {
        let service = service();
        let first = service.create("a").await.unwrap();
        service.create("b").await.unwrap();
        service.update(first.id, reorder(9)).await.unwrap();

        assert_eq!(service.create("c").await.unwrap().order, 10);
    }

    #[tokio::test]
    async fn list_is_strictly_descending() {
        let service = service();
        for value in ["milk", "eggs", "bread"] {
            service.create(value).await.unwrap();
        }
        assert_eq!(
            orders(&service).await,
            vec![
                ("bread".to_string(), 3),
                ("eggs".to_string(), 2),
                ("milk".to_string(), 1)
            ]
        );
    }

    #[tokio::test]
    async fn reorder_swaps_with_occupant() {
        let service = service();
        let mut ids = Vec::new();
        for i in 1..=5 {
            ids.push(service.create(&format!("item {i}")).await.unwrap().id);
        }
        let (a, b) = (ids[1], ids[4]);

        service.update(a, reorder(5)).await.unwrap();

        assert_eq!(find(&service, a).await.order, 5);
        assert_eq!(find(&service, b).await.order, 2);
        let mut all: Vec<i64> = orders(&service).await.into_iter().map(|(_, o)| o).collect();
        all.sort_unstable();
        assert_eq!(all, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn reorder_to_free_rank_relabels_only() {
        let service = service();
        let a = service.create("a").await.unwrap();
        let b = service.create("b").await.unwrap();

        service.update(a.id, reorder(7)).await.unwrap();

        assert_eq!(find(&service, a.id).await.order, 7);
        assert_eq!(find(&service, b.id).await.order, 2);
    }

    #[tokio::test]
    async fn reorder_to_own_rank_is_noop() {
        let service = service();
        let a = service.create("a").await.unwrap();
        service.update(a.id, reorder(1)).await.unwrap();
        assert_eq!(find(&service, a.id).await.order, 1);
    }

    #[tokio::test]
    async fn zero_order_and_empty_value_are_ignored() {
        let service = service();
        let a = service.create("a").await.unwrap();
        service
            .update(
                a.id,
                UpdateTodo {
                    order: Some(0),
                    value: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = find(&service, a.id).await;
        assert_eq!(stored.order, 1);
        assert_eq!(stored.value, "a");
    }

    #[tokio::test]
    async fn done_sets_and_clears_timestamp() {
        let service = service();
        let a = service.create("a").await.unwrap();

        service.update(a.id, mark_done(true)).await.unwrap();
        let done_at = find(&service, a.id).await.done_at;
        assert!(done_at.is_some());

        service
            .update(
                a.id,
                UpdateTodo {
                    value: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let stored = find(&service, a.id).await;
        assert_eq!(stored.done_at, done_at);
        assert_eq!(stored.value, "renamed");

        service.update(a.id, mark_done(false)).await.unwrap();
        assert!(find(&service, a.id).await.done_at.is_none());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_changes_nothing() {
        let service = service();
        service.create("a").await.unwrap();
        let before = service.list().await.unwrap();

        let missing = Uuid::new_v4();
        assert!(matches!(
            service.update(missing, reorder(1)).await,
            Err(TodoError::NotFound)
        ));
        assert!(matches!(
            service.delete(missing).await,
            Err(TodoError::NotFound)
        ));
        assert_eq!(service.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn create_at_order_ceiling_is_rejected() {
        let service = service();
        let a = service.create("a").await.unwrap();
        service.update(a.id, reorder(MAX_ORDER)).await.unwrap();

        assert!(matches!(
            service.create("b").await,
            Err(TodoError::Validation(_))
        ));
        assert!(matches!(
            service.update(a.id, reorder(i64::MAX)).await,
            Err(TodoError::Validation(_))
        ));
        assert_eq!(orders(&service).await, vec![("a".to_string(), MAX_ORDER)]);
    }

    #[tokio::test]
    async fn create_after_stored_overflowing_order_does_not_wrap() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(NewTodo {
                value: "imported".to_string(),
                order: i64::MAX,
            })
            .await
            .unwrap();
        let service = TodoService::new(store);

        assert!(matches!(
            service.create("b").await,
            Err(TodoError::Validation(_))
        ));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_wins_over_invalid_payload() {
        let service = service();
        assert!(matches!(
            service.update(Uuid::new_v4(), reorder(-1)).await,
            Err(TodoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_leaves_gaps() {
        let service = service();
        service.create("a").await.unwrap();
        let b = service.create("b").await.unwrap();
        service.create("c").await.unwrap();

        service.delete(b.id).await.unwrap();

        assert_eq!(
            orders(&service).await,
            vec![("c".to_string(), 3), ("a".to_string(), 1)]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_unique_orders() {
        let service = Arc::new(service());
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.create(&format!("todo {i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut all: Vec<i64> = orders(&service).await.into_iter().map(|(_, o)| o).collect();
        all.sort_unstable();
        assert_eq!(all, (1..=20).collect::<Vec<_>>());
    }
}
