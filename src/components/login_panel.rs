//! Login Panel Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use todo_client::{submit_disabled, Field, LoginForm, Validate};

use super::FieldError;
use crate::context::use_app_context;
use crate::store::{store_set_token, use_app_store};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (attempted, set_attempted) = signal(false);
    let (submitting, set_submitting) = signal(false);
    let (failure, set_failure) = signal::<Option<String>>(None);

    let form = Memo::new(move |_| LoginForm {
        username: username.get(),
        password: password.get(),
    });
    let errors = Memo::new(move |_| form.with(|form| form.validate().err()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_attempted.set(true);
        if submitting.get_untracked() || errors.with_untracked(Option::is_some) {
            return;
        }
        let form = form.get_untracked();
        let session = ctx.services().session;
        let navigate = navigate.clone();
        set_submitting.set(true);
        set_failure.set(None);
        spawn_local(async move {
            match session.login(&form.username, &form.password).await {
                Ok(response) => {
                    store_set_token(&store, Some(response.access_token));
                    set_submitting.set(false);
                    navigate("/", Default::default());
                }
                Err(e) => {
                    set_failure.set(Some(e.to_string()));
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <form class="auth-form" novalidate=true on:submit=on_submit>
            <label>
                "Email"
                <input
                    type="text"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
            </label>
            <FieldError errors=errors field=Field::Username show=attempted />
            <label>
                "Password"
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
            </label>
            <FieldError errors=errors field=Field::Password show=attempted />
            {move || failure.get().map(|message| view! { <p class="form-error">"Error: " {message}</p> })}
            <button
                type="submit"
                disabled=move || errors.with(|errors| submit_disabled(attempted.get(), submitting.get(), errors.as_ref()))
            >
                "Login"
            </button>
        </form>
    }
}
