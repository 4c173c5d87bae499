//! REST backend for an ordered todo list.
//!
//! Requests enter through [`routes`], payloads are checked by
//! [`validation`], and [`service::TodoService`] applies them to an
//! [`store::ItemStore`]. The store handle is passed in explicitly, so tests
//! and the binary each choose their own backend.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use error::{StoreError, TodoError};
pub use model::{TodoItem, UpdateTodo};
pub use service::TodoService;
pub use store::{FileStore, ItemStore, MemoryStore};

/// Router backed by a fresh in-memory store.
pub fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

/// Router exposing the API under `/api`.
pub fn app_with_store(store: Arc<dyn ItemStore>) -> Router {
    build(store, None)
}

/// Router that also serves files from `static_dir` for non-API paths.
pub fn app_with_assets(store: Arc<dyn ItemStore>, static_dir: &Path) -> Router {
    build(store, Some(static_dir))
}

fn build(store: Arc<dyn ItemStore>, static_dir: Option<&Path>) -> Router {
    let service = Arc::new(TodoService::new(store));
    let mut router = Router::new().nest("/api", routes::router(service));
    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }
    router.layer(TraceLayer::new_for_http())
}

pub async fn run<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
