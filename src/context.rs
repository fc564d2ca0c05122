//! Application Context
//!
//! Services and refetch triggers provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use todo_client::{ApiClient, AuthSession, ClientConfig, ClientResult, TodoSync};

use crate::cookies::CookieTokenStore;

pub type Session = AuthSession<CookieTokenStore, ApiClient>;

/// Remote client, session manager and synchronization layer
#[derive(Clone)]
pub struct Services {
    pub session: Rc<Session>,
    pub sync: Rc<TodoSync<ApiClient>>,
}

impl Services {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let api = Rc::new(ApiClient::new(config)?);
        let store = CookieTokenStore::new(config.token_cookie.clone());
        Ok(Self {
            session: Rc::new(AuthSession::new(store, api.clone(), config)),
            sync: Rc::new(TodoSync::new(api)),
        })
    }
}

/// App-wide services and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Services, LocalStorage>,
    /// Bumped after every settled mutation - read
    pub todos_version: ReadSignal<u32>,
    /// Bumped after every settled mutation - write
    set_todos_version: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(services: Services) -> Self {
        let (todos_version, set_todos_version) = signal(0u32);
        Self {
            services: StoredValue::new_local(services),
            todos_version,
            set_todos_version,
        }
    }

    pub fn services(&self) -> Services {
        self.services.get_value()
    }

    /// Trigger a refetch of the todo collection
    pub fn reload_todos(&self) {
        self.set_todos_version.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
