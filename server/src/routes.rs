//! HTTP handlers for the `/api` surface.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::TodoError;
use crate::model::{TodoListResponse, TodoResponse, UpdateTodo};
use crate::service::TodoService;
use crate::validation::parse_create;

type SharedService = Arc<TodoService>;

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{todo_id}", patch(update_todo).delete(delete_todo))
        .with_state(service)
}

async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hi!" }))
}

async fn list_todos(
    State(service): State<SharedService>,
) -> Result<Json<TodoListResponse>, TodoError> {
    let todos = service.list().await?;
    Ok(Json(TodoListResponse { todos }))
}

async fn create_todo(
    State(service): State<SharedService>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), TodoError> {
    let Json(payload) = payload.map_err(reject_body)?;
    let value = parse_create(&payload)?;
    let todo = service.create(&value).await?;
    Ok((StatusCode::CREATED, Json(TodoResponse { todo })))
}

async fn update_todo(
    State(service): State<SharedService>,
    Path(todo_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, TodoError> {
    let id = parse_id(&todo_id)?;
    let update = parse_update(&body)?;
    service.update(id, update).await?;
    Ok(Json(json!({})))
}

async fn delete_todo(
    State(service): State<SharedService>,
    Path(todo_id): Path<String>,
) -> Result<Json<Value>, TodoError> {
    service.delete(parse_id(&todo_id)?).await?;
    Ok(Json(json!({})))
}

/// An id that does not parse cannot name a stored todo.
fn parse_id(raw: &str) -> Result<Uuid, TodoError> {
    Uuid::parse_str(raw).map_err(|_| TodoError::NotFound)
}

/// An empty PATCH body changes nothing, like `{}`.
fn parse_update(body: &[u8]) -> Result<UpdateTodo, TodoError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdateTodo::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| TodoError::validation(format!("invalid update payload: {err}")))
}

fn reject_body(rejection: JsonRejection) -> TodoError {
    TodoError::validation(rejection.body_text())
}
