//! Todo board store: held state, its mutations, derived views and the
//! asynchronous actions that drive them.
//!
//! # Design
//! `StoreState` is plain data. Its mutation methods are the only way it
//! changes, and `TodoStore` only calls them while holding the state lock,
//! never across a network await. Actions take `&self` so the UI may dispatch
//! several at once; overlapping `list` calls are ordered by a sequence number
//! so a slow, older response cannot overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::alert::{AlertMessage, AlertRouter, ErrorRouter};
use crate::error::ApiError;
use crate::query::ListFilter;
use crate::service::TodoService;
use crate::types::{BulkUpdate, NewTodo, Pagination, Todo, TodoId, TodoState};

/// Everything the board UI renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// `None` until the first successful list.
    pub todo_list: Option<Vec<Todo>>,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub is_dragging: bool,
}

impl StoreState {
    pub fn start_request(&mut self) {
        self.loading = true;
    }

    /// Keeps the previous list and pagination visible.
    pub fn request_failed(&mut self) {
        self.loading = false;
    }

    pub fn finish_request(&mut self) {
        self.loading = false;
    }

    pub fn set_todo(&mut self, todo_list: Vec<Todo>, pagination: Pagination) {
        self.loading = false;
        self.todo_list = Some(todo_list);
        self.pagination = Some(pagination);
    }

    pub fn set_is_dragging(&mut self, is_dragging: bool) {
        self.is_dragging = is_dragging;
    }

    /// Todos in `state`, in list order. Empty before the first load.
    pub fn todo_list_by_state(&self, state: TodoState) -> Vec<&Todo> {
        self.todo_list
            .iter()
            .flatten()
            .filter(|todo| todo.state == state)
            .collect()
    }

    pub fn pending_todo_list(&self) -> Vec<&Todo> {
        self.todo_list_by_state(TodoState::Pending)
    }

    pub fn ongoing_todo_list(&self) -> Vec<&Todo> {
        self.todo_list_by_state(TodoState::Ongoing)
    }

    pub fn completed_todo_list(&self) -> Vec<&Todo> {
        self.todo_list_by_state(TodoState::Completed)
    }

    pub fn archived_todo_list(&self) -> Vec<&Todo> {
        self.todo_list_by_state(TodoState::Archived)
    }
}

/// Toast texts shown after successful mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessMessages {
    pub bulk_saved: String,
    pub added: String,
    pub deleted: String,
}

impl Default for SuccessMessages {
    fn default() -> Self {
        Self {
            bulk_saved: "Change has been saved.".to_string(),
            added: "New todo has been added.".to_string(),
            deleted: "Todo has been deleted.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Drop list responses older than one already applied. When off,
    /// responses land in completion order.
    pub discard_stale_lists: bool,
    pub messages: SuccessMessages,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            discard_stale_lists: true,
            messages: SuccessMessages::default(),
        }
    }
}

/// How an action ended. Failures have already been handed to the error
/// router by the time the caller sees `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    Failed,
    /// A newer list response was applied first; this one was discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct Inner {
    state: StoreState,
    current_filter: ListFilter,
    last_applied_list: u64,
}

pub struct TodoStore<S, A, E> {
    service: S,
    alerts: A,
    errors: E,
    options: StoreOptions,
    inner: RwLock<Inner>,
    issued_lists: AtomicU64,
}

impl<S, A, E> TodoStore<S, A, E>
where
    S: TodoService,
    A: AlertRouter,
    E: ErrorRouter,
{
    pub fn new(service: S, alerts: A, errors: E) -> Self {
        Self::with_options(service, alerts, errors, StoreOptions::default())
    }

    pub fn with_options(service: S, alerts: A, errors: E, options: StoreOptions) -> Self {
        Self {
            service,
            alerts,
            errors,
            options,
            inner: RwLock::new(Inner::default()),
            issued_lists: AtomicU64::new(0),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    pub fn errors(&self) -> &E {
        &self.errors
    }

    /// Cloned copy of the current state.
    pub async fn snapshot(&self) -> StoreState {
        self.inner.read().await.state.clone()
    }

    /// Run `f` against the current state without cloning it.
    pub async fn state<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&self.inner.read().await.state)
    }

    /// Filter the next `refresh` will reuse.
    pub async fn current_filter(&self) -> ListFilter {
        self.inner.read().await.current_filter.clone()
    }

    pub async fn set_is_dragging(&self, is_dragging: bool) {
        self.inner.write().await.state.set_is_dragging(is_dragging);
    }

    /// Fetch a page of todos and replace the held list with it.
    pub async fn list(&self, filter: ListFilter, routing_context: &E::Context) -> ActionOutcome {
        self.alerts.clear();
        let seq = self.issued_lists.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut inner = self.inner.write().await;
            inner.state.start_request();
            inner.current_filter = filter.clone();
        }
        debug!(seq, query = %filter.to_query_string(), "list started");

        match self.service.list(&filter).await {
            Ok(response) => {
                let mut inner = self.inner.write().await;
                if self.options.discard_stale_lists && seq < inner.last_applied_list {
                    warn!(seq, applied = inner.last_applied_list, "discarding superseded list response");
                    return ActionOutcome::Superseded;
                }
                inner.last_applied_list = inner.last_applied_list.max(seq);
                debug!(seq, rows = response.rows.len(), "list applied");
                inner.state.set_todo(response.rows, response.pagination);
                ActionOutcome::Completed
            }
            Err(error) => self.fail(error, routing_context).await,
        }
    }

    /// Re-issue `list` with the most recently used filter.
    pub async fn refresh(&self, routing_context: &E::Context) -> ActionOutcome {
        let filter = self.current_filter().await;
        self.list(filter, routing_context).await
    }

    /// Move `todo_ids` into `target_state`. The held list is left alone; the
    /// caller refreshes when it wants the server's view.
    pub async fn update_bulk(
        &self,
        target_state: TodoState,
        todo_ids: Vec<TodoId>,
        routing_context: &E::Context,
    ) -> ActionOutcome {
        self.begin().await;
        let update = BulkUpdate {
            state: target_state,
            todo_list: todo_ids,
        };
        match self.service.post_bulk(&update).await {
            Ok(result) => {
                debug!(updated = result.updated, state = %target_state, "bulk update saved");
                self.inner.write().await.state.finish_request();
                self.alerts
                    .success(AlertMessage::toast(&self.options.messages.bulk_saved));
                ActionOutcome::Completed
            }
            Err(error) => self.fail(error, routing_context).await,
        }
    }

    /// Create a todo, then refresh the list.
    pub async fn add_one(&self, todo: NewTodo, routing_context: &E::Context) -> ActionOutcome {
        self.begin().await;
        if let Err(error) = self.service.post_one(&todo).await {
            return self.fail(error, routing_context).await;
        }
        self.refresh(routing_context).await;
        self.alerts
            .success(AlertMessage::toast(&self.options.messages.added));
        ActionOutcome::Completed
    }

    /// Delete a todo, then refresh the list.
    pub async fn delete_one(&self, todo_id: &TodoId, routing_context: &E::Context) -> ActionOutcome {
        self.begin().await;
        if let Err(error) = self.service.delete_one(todo_id).await {
            return self.fail(error, routing_context).await;
        }
        self.refresh(routing_context).await;
        self.alerts
            .success(AlertMessage::toast(&self.options.messages.deleted));
        ActionOutcome::Completed
    }

    async fn begin(&self) {
        self.alerts.clear();
        self.inner.write().await.state.start_request();
    }

    async fn fail(&self, error: ApiError, routing_context: &E::Context) -> ActionOutcome {
        warn!(%error, "todo action failed");
        self.inner.write().await.state.request_failed();
        self.errors.handle_service_exception(error, routing_context);
        ActionOutcome::Failed
    }
}
