//! Synchronous client core for the todo REST API.
//!
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the actual HTTP round-trip,
//! which keeps this crate deterministic and free of I/O dependencies.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, UpdateTodo};
