//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `HttpTodoService` stitches the two halves together over a transport.

use percent_encoding::utf8_percent_encode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{ListFilter, URI_COMPONENT};
use crate::types::{BulkUpdate, BulkUpdateResult, ListResponse, NewTodo, Todo, TodoId};

/// Synchronous, stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
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

    pub fn build_list(&self, filter: &ListFilter) -> HttpRequest {
        let query = filter.to_query_string();
        let path = if query.is_empty() {
            format!("{}/todo", self.base_url)
        } else {
            format!("{}/todo?{query}", self.base_url)
        };
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_post_one(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        self.json_post(format!("{}/todo", self.base_url), input)
    }

    pub fn build_post_bulk(&self, input: &BulkUpdate) -> Result<HttpRequest, ApiError> {
        self.json_post(format!("{}/todo/bulk", self.base_url), input)
    }

    pub fn build_delete_one(&self, id: &TodoId) -> HttpRequest {
        let segment = id.to_string();
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todo/{}", self.base_url, utf8_percent_encode(&segment, URI_COMPONENT)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<ListResponse, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_post_one(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response)
    }

    pub fn parse_post_bulk(&self, response: HttpResponse) -> Result<BulkUpdateResult, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_delete_one(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    fn json_post<T: Serialize>(&self, path: String, input: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoState;

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
    fn build_list_without_filter_has_no_query() {
        let req = client().build_list(&ListFilter::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todo");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_appends_recognized_params() {
        let filter = ListFilter {
            state: Some(TodoState::Pending),
            page_size: Some(10),
            ..ListFilter::default()
        };
        let req = client().build_list(&filter);
        assert_eq!(req.path, "http://localhost:3000/todo?state=pending&page_size=10");
    }

    #[test]
    fn build_post_one_produces_json_request() {
        let req = client().build_post_one(&NewTodo::titled("Buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todo");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["state"], "pending");
    }

    #[test]
    fn build_post_bulk_targets_bulk_endpoint() {
        let bulk = BulkUpdate {
            state: TodoState::Completed,
            todo_list: vec![TodoId::from("a"), TodoId::from("b")],
        };
        let req = client().build_post_bulk(&bulk).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todo/bulk");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"state": "completed", "todoList": ["a", "b"]}));
    }

    #[test]
    fn build_delete_one_puts_id_in_path() {
        let req = client().build_delete_one(&TodoId::from("42"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todo/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_one_encodes_reserved_characters() {
        let req = client().build_delete_one(&TodoId::from("a/b?c#d e"));
        assert_eq!(req.path, "http://localhost:3000/todo/a%2Fb%3Fc%23d%20e");

        let req = client().build_delete_one(&TodoId::Int(17));
        assert_eq!(req.path, "http://localhost:3000/todo/17");
    }

    #[test]
    fn parse_list_with_numeric_ids() {
        let body = r#"{"rows":[{"id":1,"state":"pending"},{"id":2,"state":"ongoing"}],
                       "pagination":{"page":1,"page_size":20,"total":2}}"#;
        let list = client().parse_list(response(200, body)).unwrap();
        assert_eq!(list.rows[0].id, TodoId::Int(1));
        assert_eq!(list.rows[1].state, TodoState::Ongoing);
    }

    #[test]
    fn parse_list_success() {
        let body = r#"{"rows":[{"id":"1","state":"pending","title":"Test"}],
                       "pagination":{"page":1,"page_size":20,"total":1}}"#;
        let list = client().parse_list(response(200, body)).unwrap();
        assert_eq!(list.rows.len(), 1);
        assert_eq!(list.rows[0].title(), Some("Test"));
        assert_eq!(list.pagination.total, 1);
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_post_one_wrong_status() {
        let err = client()
            .parse_post_one(response(500, "internal error"))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpError {
                status: 500,
                body: "internal error".to_string()
            }
        );
    }

    #[test]
    fn parse_post_bulk_success() {
        let result = client()
            .parse_post_bulk(response(200, r#"{"updated":2}"#))
            .unwrap();
        assert_eq!(result.updated, 2);
    }

    #[test]
    fn parse_delete_one_not_found() {
        let err = client().parse_delete_one(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert!(client().parse_delete_one(response(204, "")).is_ok());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list(&ListFilter::default());
        assert_eq!(req.path, "http://localhost:3000/todo");
    }
}
