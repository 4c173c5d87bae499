//! Durable document collection on the local filesystem.
//!
//! Each todo lives in `<dir>/<id>.json`. Writes go to a uniquely named temp
//! file in the same directory and are renamed into place, so a reader sees
//! either the previous document or the new one, never a torn write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use super::{assign_id, by_order_desc, ItemStore};
use crate::error::{StoreError, StoreResult};
use crate::model::{NewTodo, TodoItem};

const DOCUMENT_EXTENSION: &str = "json";

#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the collection at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.{DOCUMENT_EXTENSION}"))
    }

    async fn read_document(&self, path: &Path) -> StoreResult<Option<TodoItem>> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| StoreError::Corrupt {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
    }

    async fn read_all(&self) -> StoreResult<Vec<TodoItem>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut items = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            // A concurrent delete can remove the file between listing and reading.
            if let Some(item) = self.read_document(&path).await? {
                items.push(item);
            }
        }
        Ok(items)
    }

    async fn write_document(&self, item: &TodoItem) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(item)?;
        let temp_path = self
            .dir
            .join(format!("{}.{}.tmp", item.id, Uuid::new_v4().simple()));
        fs::write(&temp_path, &json).await?;
        if let Err(err) = fs::rename(&temp_path, self.document_path(item.id)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(err.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ItemStore for FileStore {
    async fn insert(&self, todo: NewTodo) -> StoreResult<TodoItem> {
        let item = assign_id(todo);
        self.write_document(&item).await?;
        Ok(item)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<TodoItem>> {
        self.read_document(&self.document_path(id)).await
    }

    async fn find_by_order(&self, order: i64) -> StoreResult<Option<TodoItem>> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|item| item.order == order)
            .min_by_key(|item| item.id))
    }

    async fn find_all(&self) -> StoreResult<Vec<TodoItem>> {
        let mut all = self.read_all().await?;
        all.sort_by(by_order_desc);
        Ok(all)
    }

    async fn find_max_order(&self) -> StoreResult<Option<i64>> {
        Ok(self.read_all().await?.iter().map(|item| item.order).max())
    }

    async fn save(&self, item: &TodoItem) -> StoreResult<()> {
        self.write_document(item).await
    }

    async fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        match fs::remove_file(self.document_path(id)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
