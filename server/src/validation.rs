//! Payload checks applied before anything reaches the store.

use serde_json::Value;

use crate::error::TodoError;
use crate::model::UpdateTodo;

pub const MAX_VALUE_LEN: usize = 50;

/// Highest rank a todo may hold. Matches the largest integer a JSON client
/// can represent exactly.
pub const MAX_ORDER: i64 = 9_007_199_254_740_991;

/// Extracts `value` from a create payload.
///
/// The payload must be an object with a string `value` and no other keys.
/// Length limits are enforced separately by [`validate_value`].
pub fn parse_create(payload: &Value) -> Result<String, TodoError> {
    let Some(fields) = payload.as_object() else {
        return Err(TodoError::validation("\"value\" must be of type object"));
    };
    let value = match fields.get("value") {
        None => return Err(TodoError::validation("\"value\" is required")),
        Some(Value::String(value)) => value.clone(),
        Some(_) => return Err(TodoError::validation("\"value\" must be a string")),
    };
    if let Some(unknown) = fields.keys().find(|key| key.as_str() != "value") {
        return Err(TodoError::validation(format!("\"{unknown}\" is not allowed")));
    }
    Ok(value)
}

/// Todo text must hold between 1 and [`MAX_VALUE_LEN`] characters.
pub fn validate_value(value: &str) -> Result<(), TodoError> {
    if value.is_empty() {
        return Err(TodoError::validation("\"value\" is not allowed to be empty"));
    }
    if value.chars().count() > MAX_VALUE_LEN {
        return Err(TodoError::validation(format!(
            "\"value\" length must be less than or equal to {MAX_VALUE_LEN} characters long"
        )));
    }
    Ok(())
}

/// Rank for a new todo given the current highest one.
pub fn next_order(max: Option<i64>) -> Result<i64, TodoError> {
    match max {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .filter(|order| *order <= MAX_ORDER)
            .ok_or_else(|| {
                TodoError::validation(format!(
                    "\"order\" cannot exceed {MAX_ORDER}; reorder existing todos first"
                ))
            }),
    }
}

/// The changes an update actually applies after presence rules are resolved.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    /// New rank; the occupant of that rank, if any, takes the old one.
    pub order: Option<i64>,
    /// `Some(true)` marks the item done now, `Some(false)` reopens it.
    pub done: Option<bool>,
    pub value: Option<String>,
}

/// Resolves an update payload into a [`TodoPatch`].
///
/// `order: 0` and `value: ""` are treated as absent. `done` applies whenever
/// it is present, with `null` behaving like `false`.
pub fn validate_update(update: UpdateTodo) -> Result<TodoPatch, TodoError> {
    let order = match update.order {
        Some(order) if order < 0 => {
            return Err(TodoError::validation("\"order\" must be a positive number"))
        }
        Some(order) if order > MAX_ORDER => {
            return Err(TodoError::validation(format!(
                "\"order\" must be less than or equal to {MAX_ORDER}"
            )))
        }
        Some(0) | None => None,
        Some(order) => Some(order),
    };
    let value = match update.value {
        Some(value) if value.is_empty() => None,
        Some(value) => {
            validate_value(&value)?;
            Some(value)
        }
        None => None,
    };
    Ok(TodoPatch {
        order,
        done: update.done.map(|done| done.unwrap_or(false)),
        value,
    })
}
