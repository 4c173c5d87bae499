//! Command-line and environment configuration for the server binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::error::StoreResult;
use crate::store::{FileStore, ItemStore, MemoryStore};

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server")]
#[command(version, about = "REST backend for an ordered todo list")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding one JSON document per todo. Todos are kept in
    /// memory when unset.
    #[arg(long, env = "TODO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory served for any path outside `/api`.
    #[arg(long, env = "TODO_STATIC_DIR", default_value = "./assets")]
    pub static_dir: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long, env = "TODO_LOG_JSON")]
    pub log_json: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Opens the configured store.
    pub async fn open_store(&self) -> StoreResult<Arc<dyn ItemStore>> {
        match &self.data_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "using file store");
                Ok(Arc::new(FileStore::open(dir).await?))
            }
            None => {
                tracing::warn!("no data directory configured; todos are kept in memory");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

/// Formats a bound address for the startup log line.
pub fn describe(addr: SocketAddr) -> String {
    format!("http://{addr}/api")
}
