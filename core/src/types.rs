//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! A todo has a fixed required field set (`id`, `state`); every other field
//! the server sends lives in a flattened attribute bag and is passed through
//! untouched. Integration tests catch any schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Opaque, server-assigned todo identifier.
///
/// Servers hand out either integers or strings; whichever form arrives is
/// sent back unchanged in bulk updates and delete paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Int(i64),
    Text(String),
}

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        TodoId::Text(id.into())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Int(id) => write!(f, "{id}"),
            TodoId::Text(id) => f.write_str(id),
        }
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        TodoId::Text(id)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        TodoId::Int(id)
    }
}

/// Board category of a todo.
///
/// No transition graph is enforced here: a bulk update may move a todo from
/// any state to any other.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TodoState {
    #[default]
    Pending,
    Ongoing,
    Completed,
    Archived,
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    pub state: TodoState,
    /// Descriptive fields (title and anything else) carried as-is.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Todo {
    pub fn new(id: impl Into<TodoId>, state: TodoState) -> Self {
        Self {
            id: id.into(),
            state,
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(Value::as_str)
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewTodo {
    #[serde(default)]
    pub state: TodoState,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl NewTodo {
    pub fn titled(title: &str) -> Self {
        let mut attributes = Map::new();
        attributes.insert("title".to_string(), Value::from(title));
        Self {
            state: TodoState::Pending,
            attributes,
        }
    }
}

/// Page descriptor returned alongside every list response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

/// Body of a successful list call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse {
    pub rows: Vec<Todo>,
    pub pagination: Pagination,
}

/// Moves every listed todo into `state` in a single request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkUpdate {
    pub state: TodoState,
    #[serde(rename = "todoList")]
    pub todo_list: Vec<TodoId>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkUpdateResult {
    pub updated: usize,
}
