//! Todo Popup Component
//!
//! Create-or-edit form shown over the list. The editor state machine owns the
//! todo being built; the store only says whether the popup is open and which
//! todo, if any, is being edited.

use chrono::{Local, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_client::{submit_disabled, DueDateRule, Field, SubmitError, TodoEditor, TodoForm};

use super::FieldError;
use crate::context::use_app_context;
use crate::store::{store_close_editor, use_app_store, AppStateStoreFields};

#[component]
pub fn TodoPopup() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let today = Local::now().date_naive();
    let editor = StoredValue::new_local(TodoEditor::with_due_date_rule(DueDateRule::not_before(today)));

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (due_date, set_due_date) = signal(String::new());
    let (completed, set_completed) = signal(false);
    let (editing, set_editing) = signal(false);
    let (attempted, set_attempted) = signal(false);
    let (submitting, set_submitting) = signal(false);

    let reset_fields = move |form: TodoForm| {
        set_title.set(form.title);
        set_description.set(form.description);
        set_due_date.set(form.due_date);
        set_completed.set(form.is_completed.unwrap_or(false));
        set_attempted.set(false);
    };

    // Open or close the editor session whenever the popup or its target changes
    Effect::new(move |_| {
        let open = store.popup().get();
        let target = store.editing_todo().get();
        if !open {
            editor.update_value(TodoEditor::cancel);
            set_editing.set(false);
            return;
        }
        let form = editor
            .try_update_value(|editor| {
                match target {
                    Some(todo) => {
                        tracing::debug!(todo_id = %todo.id, "editing todo");
                        editor.open_edit(todo);
                    }
                    None => {
                        let id = editor.open_create();
                        tracing::debug!(todo_id = %id, "creating todo");
                    }
                }
                editor.form()
            })
            .unwrap_or_default();
        set_editing.set(editor.with_value(TodoEditor::is_update));
        reset_fields(form);
    });

    let form = Memo::new(move |_| TodoForm {
        title: title.get(),
        description: description.get(),
        due_date: due_date.get(),
        is_completed: editing.get().then(|| completed.get()),
    });
    let errors = Memo::new(move |_| form.with(|form| editor.with_value(|editor| editor.validate(form).err())));

    let close = move |_| store_close_editor(&store);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_attempted.set(true);
        let values = form.get_untracked();
        let submission = editor
            .try_update_value(|editor| editor.submit(&values, Utc::now()))
            .unwrap_or(Err(SubmitError::NotOpen));
        let submission = match submission {
            Ok(submission) => submission,
            Err(SubmitError::Invalid(_)) => return,
            Err(e) => {
                tracing::warn!(error = %e, "todo submit ignored");
                return;
            }
        };

        let token = store.token().get_untracked();
        let sync = ctx.services().sync;
        set_submitting.set(true);
        spawn_local(async move {
            let result = sync.apply(token.as_deref(), &submission).await;
            editor.update_value(|editor| editor.complete(&result));
            set_submitting.set(false);
            if result.is_ok() {
                reset_fields(TodoForm::default());
                store_close_editor(&store);
                ctx.reload_todos();
            }
        });
    };

    let visible = move |base: &'static str| {
        if store.popup().get() {
            format!("{} visible", base)
        } else {
            base.to_string()
        }
    };

    view! {
        <div class=move || visible("overlay") on:click=close></div>
        <div class=move || visible("popup")>
            <form class="todo-form" novalidate=true on:submit=on_submit>
                <label>
                    "Title"
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                </label>
                <FieldError errors=errors field=Field::Title show=attempted />
                <label>
                    "Description"
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <FieldError errors=errors field=Field::Description show=attempted />
                <label>
                    "Due date"
                    <input
                        type="date"
                        prop:value=move || due_date.get()
                        on:input=move |ev| set_due_date.set(event_target_value(&ev))
                    />
                </label>
                <FieldError errors=errors field=Field::DueDate show=attempted />
                <Show when=move || editing.get()>
                    <label class="checkbox-label">
                        <input
                            type="checkbox"
                            prop:checked=move || completed.get()
                            on:change=move |ev| set_completed.set(event_target_checked(&ev))
                        />
                        "Completed"
                    </label>
                </Show>
                <button
                    type="submit"
                    disabled=move || errors.with(|errors| submit_disabled(attempted.get(), submitting.get(), errors.as_ref()))
                >
                    {move || if editing.get() { "Update" } else { "Create" }}
                </button>
            </form>
        </div>
    }
}
