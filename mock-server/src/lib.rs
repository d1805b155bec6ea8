use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    #[default]
    Pending,
    Ongoing,
    Completed,
    Archived,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub state: TodoState,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub state: TodoState,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub state: Option<TodoState>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub q: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub rows: Vec<Todo>,
    pub pagination: Pagination,
}

#[derive(Deserialize)]
pub struct BulkUpdate {
    pub state: TodoState,
    #[serde(rename = "todoList")]
    pub todo_list: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkUpdateResult {
    pub updated: usize,
}

/// Todos in insertion order.
pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/todo", get(list_todos).post(create_todo))
        .route("/todo/bulk", post(update_bulk))
        .route("/todo/{id}", delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todo server listening");
    }
    axum::serve(listener, app()).await
}

fn matches_query(todo: &Todo, query: &ListQuery) -> bool {
    if query.state.is_some_and(|state| state != todo.state) {
        return false;
    }
    match &query.q {
        Some(q) => todo
            .attributes
            .get("title")
            .and_then(Value::as_str)
            .is_some_and(|title| title.to_lowercase().contains(&q.to_lowercase())),
        None => true,
    }
}

async fn list_todos(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<ListResponse> {
    let todos = db.read().await;
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let matching: Vec<&Todo> = todos.iter().filter(|t| matches_query(t, &query)).collect();
    let rows = matching
        .iter()
        .skip((page as usize - 1).saturating_mul(page_size as usize))
        .take(page_size as usize)
        .map(|t| (*t).clone())
        .collect();

    Json(ListResponse {
        rows,
        pagination: Pagination {
            page,
            page_size,
            total: matching.len() as u64,
        },
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<NewTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut attributes = input.attributes;
    attributes.remove("id");
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        state: input.state,
        attributes,
    };
    db.write().await.push(todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn update_bulk(
    State(db): State<Db>,
    Json(input): Json<BulkUpdate>,
) -> Json<BulkUpdateResult> {
    let mut todos = db.write().await;
    let mut updated = 0;
    for todo in todos.iter_mut().filter(|t| input.todo_list.contains(&t.id)) {
        todo.state = input.state;
        updated += 1;
    }
    Json(BulkUpdateResult { updated })
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut todos = db.write().await;
    let index = todos
        .iter()
        .position(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    todos.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
