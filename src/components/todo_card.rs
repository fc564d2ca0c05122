//! Todo Card Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_client::Todo;

use crate::context::use_app_context;
use crate::store::{store_open_edit, use_app_store, AppStateStoreFields};

/// One todo with its edit and delete actions
#[component]
pub fn TodoCard(todo: Todo) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let due_date = todo.formatted_due_date();
    let completed = todo.is_completed;
    let id = todo.id.clone();
    let title = todo.title.clone();
    let description = todo.description.clone();

    let edit = move |_| store_open_edit(&store, todo.clone());

    let delete = move |_| {
        let id = id.clone();
        let token = store.token().get_untracked();
        let sync = ctx.services().sync;
        spawn_local(async move {
            if sync.delete(token.as_deref(), &id).await.is_ok() {
                ctx.reload_todos();
            }
        });
    };

    view! {
        <article class=if completed { "todo-card completed" } else { "todo-card" }>
            <h3 class="todo-title">{title}</h3>
            <p class="todo-description">{description}</p>
            <p class="todo-due">{due_date}</p>
            {completed.then(|| view! { <span class="todo-status">"Completed"</span> })}
            <div class="todo-actions">
                <button class="edit-btn" on:click=edit>"Edit"</button>
                <button class="delete-btn" on:click=delete>"Delete"</button>
            </div>
        </article>
    }
}
