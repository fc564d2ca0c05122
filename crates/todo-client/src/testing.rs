//! In-memory backend for tests
//!
//! Behaves like the REST backend for a single user and records every call.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::api::{require_token, TodoApi};
use crate::error::{ClientError, ClientResult};
use crate::models::{LoginData, LoginResponse, RegisterData, RegisterResponse, Todo};

pub const VALID_TOKEN: &str = "token-123";

#[derive(Default)]
pub struct MemoryBackend {
    pub todos: RefCell<Vec<Todo>>,
    pub users: RefCell<Vec<RegisterData>>,
    pub calls: RefCell<Vec<String>>,
    pub default_token: RefCell<Option<String>>,
    /// Status returned by the next mutating call, if set
    pub fail_next: Cell<Option<u16>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(email: &str, password: &str) -> Self {
        let backend = Self::new();
        backend.users.borrow_mut().push(RegisterData {
            email: email.to_string(),
            password: password.to_string(),
        });
        backend
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_to(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == name).count()
    }

    fn record(&self, name: &str) {
        self.calls.borrow_mut().push(name.to_string());
    }

    fn authorize(&self, token: &str) -> ClientResult<()> {
        require_token(Some(token))?;
        if token != VALID_TOKEN {
            return Err(ClientError::Status {
                status: 401,
                body: "Unauthorized".to_string(),
            });
        }
        Ok(())
    }

    fn take_failure(&self) -> ClientResult<()> {
        match self.fail_next.take() {
            Some(status) => Err(ClientError::Status {
                status,
                body: "Injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl TodoApi for MemoryBackend {
    fn set_default_token(&self, token: Option<&str>) {
        *self.default_token.borrow_mut() = token.map(str::to_string);
    }

    async fn sign_up(&self, data: &RegisterData) -> ClientResult<RegisterResponse> {
        self.record("sign_up");
        let mut users = self.users.borrow_mut();
        if users.iter().any(|u| u.email == data.email) {
            return Err(ClientError::Status {
                status: 409,
                body: "User exists".to_string(),
            });
        }
        users.push(data.clone());
        Ok(RegisterResponse {
            user_id: format!("user-{}", users.len()),
        })
    }

    async fn login(&self, data: &LoginData) -> ClientResult<LoginResponse> {
        self.record("login");
        let users = self.users.borrow();
        let position = users
            .iter()
            .position(|u| u.email == data.username && u.password == data.password)
            .ok_or_else(|| ClientError::Status {
                status: 401,
                body: "Bad credentials".to_string(),
            })?;
        Ok(LoginResponse {
            user_id: format!("user-{}", position + 1),
            access_token: VALID_TOKEN.to_string(),
        })
    }

    async fn list_todos(&self, token: &str) -> ClientResult<Vec<Todo>> {
        self.record("list_todos");
        self.authorize(token)?;
        Ok(self.todos.borrow().clone())
    }

    async fn create_todo(&self, token: &str, todo: &Todo) -> ClientResult<()> {
        self.record("create_todo");
        self.authorize(token)?;
        self.take_failure()?;
        self.todos.borrow_mut().push(todo.clone());
        Ok(())
    }

    async fn update_todo(&self, token: &str, id: &str, todo: &Todo) -> ClientResult<()> {
        self.record("update_todo");
        self.authorize(token)?;
        self.take_failure()?;
        let mut todos = self.todos.borrow_mut();
        let slot = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::Status {
                status: 404,
                body: "Not found".to_string(),
            })?;
        *slot = todo.clone();
        Ok(())
    }

    async fn delete_todo(&self, token: &str, id: &str) -> ClientResult<()> {
        self.record("delete_todo");
        self.authorize(token)?;
        self.take_failure()?;
        self.todos.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }
}

pub fn todo(id: &str, title: &str) -> Todo {
    Todo {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        is_completed: false,
        due_date: "2030-06-15".to_string(),
        created_at: Some("2030-01-01T08:00:00Z".to_string()),
        updated_at: None,
    }
}
