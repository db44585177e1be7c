//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item(&self, id: &str) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Get, self.collection())
    }

    pub fn build_get_todo(&self, id: &str) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Get, self.item(id))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Post, self.collection(), body))
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Put, self.item(id), body))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Delete, self.item(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[derive(Deserialize)]
struct ValidationBody {
    message: Vec<String>,
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    if response.status == 400 {
        if let Ok(body) = serde_json::from_str::<ValidationBody>(&response.body) {
            return Err(ApiError::Validation(body.message));
        }
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    const TODO_JSON: &str = r#"{"id":"1","title":"Test","description":"","completed":false,"starred":false,"priority":"medium","tags":[],"created":"2024-05-01T12:00:00.000Z","updated":"2024-05-01T12:00:00.000Z"}"#;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo("abc");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos/abc");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_skips_absent_fields() {
        let req = client().build_create_todo(&CreateTodo::titled("Buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Buy milk" }));
    }

    #[test]
    fn build_create_todo_sends_supplied_fields() {
        let input = CreateTodo {
            title: "Plan trip".to_string(),
            priority: Some(Priority::High),
            tags: Some(vec!["travel".to_string()]),
            ..CreateTodo::default()
        };
        let req = client().build_create_todo(&input).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["priority"], "high");
        assert_eq!(body["tags"], serde_json::json!(["travel"]));
        assert!(body.get("starred").is_none());
    }

    #[test]
    fn build_update_todo_produces_sparse_body() {
        let input = UpdateTodo {
            completed: Some(true),
            ..UpdateTodo::default()
        };
        let req = client().build_update_todo("abc", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todos/abc");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo("abc");
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(response(200, &format!("[{TODO_JSON}]")))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Test");
        assert_eq!(todos[0].priority, Priority::Medium);
        assert_eq!(todos[0].created, todos[0].updated);
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client().parse_get_todo(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert!(err.is_gone());
    }

    #[test]
    fn parse_create_todo_success() {
        let todo = client().parse_create_todo(response(201, TODO_JSON)).unwrap();
        assert_eq!(todo.id, "1");
    }

    #[test]
    fn parse_create_todo_validation_failure() {
        let body = r#"{"statusCode":400,"message":["title must be a string"],"error":"Bad Request"}"#;
        let err = client().parse_create_todo(response(400, body)).unwrap_err();
        match err {
            ApiError::Validation(messages) => assert_eq!(messages, vec!["title must be a string"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client().parse_create_todo(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
        assert!(!err.is_gone());
        assert_eq!(err.user_message(), crate::error::GENERIC_USER_MESSAGE);
    }

    #[test]
    fn unparseable_400_is_a_plain_http_error() {
        let err = client().parse_update_todo(response(400, "bad")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_update_todo_success() {
        let body = TODO_JSON.replace(r#""completed":false"#, r#""completed":true"#);
        let todo = client().parse_update_todo(response(200, &body)).unwrap();
        assert!(todo.completed);
    }

    #[test]
    fn parse_delete_todo_success() {
        assert!(client().parse_delete_todo(response(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let err = client().parse_delete_todo(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/todos");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
