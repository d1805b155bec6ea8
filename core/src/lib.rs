//! Client-side store for a todo board.
//!
//! # Overview
//! Holds the canonical todo list, its pagination and two UI flags (loading,
//! dragging), and exposes the actions that change them by talking to the
//! remote todo API. Success and failure are reported to pluggable alert and
//! error routers.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern); an
//!   `HttpTransport` supplied by the embedder does the round-trip.
//! - `HttpTodoService` joins the two into the `TodoService` adapter the
//!   store depends on. Tests swap in scripted services.
//! - `TodoStore` owns `StoreState` and only changes it through the mutation
//!   methods on `StoreState`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod alert;
pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod service;
pub mod store;
pub mod types;

pub use alert::{AlertMessage, AlertRouter, ErrorRouter, ShowType};
pub use client::TodoClient;
pub use error::{ApiError, FilterError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use query::{ListFilter, LIST_QUERY_KEYS};
pub use service::{HttpTodoService, TodoService};
pub use store::{ActionOutcome, StoreOptions, StoreState, SuccessMessages, TodoStore};
pub use types::{BulkUpdate, BulkUpdateResult, ListResponse, NewTodo, Pagination, Todo, TodoId, TodoState};
