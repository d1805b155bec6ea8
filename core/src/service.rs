//! Service adapter: the four remote operations the store depends on.

use async_trait::async_trait;
use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::query::ListFilter;
use crate::types::{BulkUpdate, BulkUpdateResult, ListResponse, NewTodo, Todo, TodoId};

/// Remote todo operations as seen by the store.
#[async_trait]
pub trait TodoService: Send + Sync {
    async fn list(&self, filter: &ListFilter) -> Result<ListResponse, ApiError>;

    async fn post_one(&self, todo: &NewTodo) -> Result<Todo, ApiError>;

    async fn post_bulk(&self, update: &BulkUpdate) -> Result<BulkUpdateResult, ApiError>;

    async fn delete_one(&self, id: &TodoId) -> Result<(), ApiError>;
}

/// `TodoService` backed by `TodoClient` and a caller-supplied transport.
#[derive(Debug, Clone)]
pub struct HttpTodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: HttpTransport> HttpTodoService<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }
}

#[async_trait]
impl<T: HttpTransport> TodoService for HttpTodoService<T> {
    async fn list(&self, filter: &ListFilter) -> Result<ListResponse, ApiError> {
        let request = self.client.build_list(filter);
        debug!(path = %request.path, "listing todos");
        let response = self.transport.execute(request).await?;
        self.client.parse_list(response)
    }

    async fn post_one(&self, todo: &NewTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_post_one(todo)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_post_one(response)
    }

    async fn post_bulk(&self, update: &BulkUpdate) -> Result<BulkUpdateResult, ApiError> {
        let request = self.client.build_post_bulk(update)?;
        debug!(state = %update.state, count = update.todo_list.len(), "bulk update");
        let response = self.transport.execute(request).await?;
        self.client.parse_post_bulk(response)
    }

    async fn delete_one(&self, id: &TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_one(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_one(response)
    }
}
