//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Components read
//! fields directly and mutate only through the helpers below.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_client::Todo;

/// Global UI state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Bearer token of the signed-in user
    pub token: Option<String>,
    /// Todo collection in server order
    pub todos: Vec<Todo>,
    /// Todo open in the popup for editing (None = creating)
    pub editing_todo: Option<Todo>,
    /// Whether the todo form popup is shown
    pub popup: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_token(store: &AppStore, token: Option<String>) {
    store.token().set(token);
}

/// Replace the todo collection with a fresh server read
pub fn store_set_todos(store: &AppStore, todos: Vec<Todo>) {
    store.todos().set(todos);
}

/// Forget everything tied to the current session
pub fn store_sign_out(store: &AppStore) {
    store.token().set(None);
    store.todos().write().clear();
    store_close_editor(store);
}

/// Open the popup on an empty form
pub fn store_open_create(store: &AppStore) {
    store.editing_todo().set(None);
    store.popup().set(true);
}

/// Open the popup pre-filled with `todo`
pub fn store_open_edit(store: &AppStore, todo: Todo) {
    store.editing_todo().set(Some(todo));
    store.popup().set(true);
}

/// Hide the popup and clear the edit target
pub fn store_close_editor(store: &AppStore) {
    store.popup().set(false);
    store.editing_todo().set(None);
}
