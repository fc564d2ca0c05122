//! Todo Synchronization
//!
//! Reads go through the query cache; every successful create, update or
//! delete invalidates the `(Todos, token)` entry so the next read refetches.
//! The cached collection is never patched locally ahead of the server.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{require_token, TodoApi};
use crate::cache::{QueryCache, QueryKey};
use crate::editor::{MutationKind, Submission};
use crate::error::{ClientError, ClientResult};
use crate::models::Todo;

pub struct TodoSync<A: TodoApi> {
    api: Rc<A>,
    cache: RefCell<QueryCache<Vec<Todo>>>,
}

impl<A: TodoApi> TodoSync<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self {
            api,
            cache: RefCell::new(QueryCache::new()),
        }
    }

    pub fn api(&self) -> &Rc<A> {
        &self.api
    }

    /// Todo collection for `token`, served from cache while fresh
    pub async fn todos(&self, token: Option<&str>) -> ClientResult<Vec<Todo>> {
        let token = require_token(token)?;
        let key = QueryKey::todos(token);

        let cached = self.cache.borrow().fresh(&key);
        if let Some(todos) = cached {
            return Ok(todos);
        }

        let todos = self.api.list_todos(token).await.map_err(|e| {
            tracing::error!(error = %e, "failed to load todos");
            e
        })?;
        tracing::debug!(count = todos.len(), "todos loaded");
        self.cache.borrow_mut().insert(key, todos.clone());
        Ok(todos)
    }

    pub async fn create(&self, token: Option<&str>, todo: &Todo) -> ClientResult<()> {
        let token = self.precondition(token, "create")?;
        let result = self.api.create_todo(token, todo).await;
        self.settle(token, "create", result)
    }

    pub async fn update(&self, token: Option<&str>, todo: &Todo) -> ClientResult<()> {
        let token = self.precondition(token, "update")?;
        let result = self.api.update_todo(token, &todo.id, todo).await;
        self.settle(token, "update", result)
    }

    pub async fn delete(&self, token: Option<&str>, id: &str) -> ClientResult<()> {
        let token = self.precondition(token, "delete")?;
        let result = self.api.delete_todo(token, id).await;
        self.settle(token, "delete", result)
    }

    /// Send an editor submission as a create or an update
    pub async fn apply(&self, token: Option<&str>, submission: &Submission) -> ClientResult<()> {
        match submission.kind {
            MutationKind::Create => self.create(token, &submission.todo).await,
            MutationKind::Update => self.update(token, &submission.todo).await,
        }
    }

    pub fn invalidate(&self, token: &str) {
        self.cache.borrow_mut().invalidate(&QueryKey::todos(token));
    }

    pub fn is_stale(&self, token: &str) -> bool {
        self.cache.borrow().is_stale(&QueryKey::todos(token))
    }

    /// Drop everything cached for a token that is no longer in use
    pub fn forget(&self, token: &str) {
        self.cache.borrow_mut().remove(&QueryKey::todos(token));
    }

    fn precondition<'t>(&self, token: Option<&'t str>, op: &str) -> ClientResult<&'t str> {
        require_token(token).map_err(|e| {
            tracing::warn!(op, "todo mutation attempted without a session token");
            e
        })
    }

    fn settle(&self, token: &str, op: &str, result: ClientResult<()>) -> ClientResult<()> {
        match result {
            Ok(()) => {
                self.invalidate(token);
                tracing::debug!(op, "todo mutation succeeded, collection invalidated");
                Ok(())
            }
            Err(e) => {
                log_failure(op, &e);
                Err(e)
            }
        }
    }
}

fn log_failure(op: &str, error: &ClientError) {
    tracing::error!(op, error = %error, "todo mutation failed");
}
