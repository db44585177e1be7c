use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{AppError, ValidationError};
use crate::model::Todo;
use crate::store::TodoStore;
use crate::validation;

/// `/todos` routes, still waiting for their store.
pub fn todo_routes() -> Router<TodoStore> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
}

// An empty body reads as `{}`. Malformed JSON and a missing content type are
// reported like any other schema violation.
fn json_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    if !is_json_content_type(headers) {
        return Err(ValidationError::single(
            "Expected request with `Content-Type: application/json`",
        )
        .into());
    }
    Json::<Value>::from_bytes(body)
        .map(|Json(value)| value)
        .map_err(|rejection| ValidationError::single(rejection.body_text()).into())
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<Todo>> {
    Json(store.list().await)
}

async fn get_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    Ok(Json(store.get(&id).await?))
}

async fn create_todo(
    State(store): State<TodoStore>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let input = validation::new_todo(&json_body(&headers, &body)?)?;
    let todo = store.create(input).await;
    info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Todo>, AppError> {
    let patch = validation::patch(&json_body(&headers, &body)?)?;
    let todo = store.update(&id, patch).await?;
    info!(id = %todo.id, "updated todo");
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.remove(&id).await?;
    info!(%id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
