//! Stateless HTTP request builder and response parser for the todo API.
//!
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateTodo, ErrorEnvelope, MessageEnvelope, Todo, TodoEnvelope, TodoListEnvelope, UpdateTodo,
};

const API_PREFIX: &str = "/api";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    pub fn build_health(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.url(""))
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.url("/todos"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.url("/todos"), input)
    }

    pub fn build_update_todo(&self, id: Uuid, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Patch, self.url(&format!("/todos/{id}")), input)
    }

    pub fn build_delete_todo(&self, id: Uuid) -> HttpRequest {
        bodyless(HttpMethod::Delete, self.url(&format!("/todos/{id}")))
    }

    /// Returns the server's greeting.
    pub fn parse_health(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        decode::<MessageEnvelope>(&response.body).map(|envelope| envelope.message)
    }

    /// Todos ordered by rank, highest first.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode::<TodoListEnvelope>(&response.body).map(|envelope| envelope.todos)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode::<TodoEnvelope>(&response.body).map(|envelope| envelope.todo)
    }

    /// The server acknowledges updates without echoing the todo.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }
}

fn bodyless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: serde::Serialize>(
    method: HttpMethod,
    path: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body =
        serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = || {
        serde_json::from_str::<ErrorEnvelope>(&response.body)
            .map(|envelope| envelope.error_message)
            .unwrap_or_else(|_| response.body.clone())
    };
    match response.status {
        404 => Err(ApiError::NotFound(message())),
        400 => Err(ApiError::Validation(message())),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
