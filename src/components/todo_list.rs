//! Todo List Component
//!
//! Fetches the collection whenever the token changes or a mutation settles.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::TodoCard;
use crate::context::use_app_context;
use crate::store::{store_set_todos, use_app_store, AppStateStoreFields};

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (loading, set_loading) = signal(false);
    let (loaded, set_loaded) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let version = ctx.todos_version.get();
        let Some(token) = store.token().get() else {
            store_set_todos(&store, Vec::new());
            set_error.set(None);
            return;
        };
        let sync = ctx.services().sync;
        set_loading.set(true);
        spawn_local(async move {
            match sync.todos(Some(&token)).await {
                Ok(todos) => {
                    tracing::debug!(count = todos.len(), version, "todo list refreshed");
                    set_error.set(None);
                    set_loaded.set(true);
                    store_set_todos(&store, todos);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="todo-list">
            {move || {
                if let Some(message) = error.get() {
                    view! { <p class="list-error">"Error: " {message}</p> }.into_any()
                } else if loading.get() && !loaded.get() {
                    view! { <p class="list-loading">"Loading..."</p> }.into_any()
                } else {
                    store
                        .todos()
                        .get()
                        .into_iter()
                        .map(|todo| view! { <TodoCard todo=todo /> })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}
