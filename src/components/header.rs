//! Header Component
//!
//! Navigation, session controls and the "Add todo" entry point.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::context::use_app_context;
use crate::store::{store_open_create, store_set_token, store_sign_out, use_app_store, AppStateStoreFields};

#[component]
pub fn Header() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    // Seed the store from the persisted session once on mount
    Effect::new(move |_| {
        let token = ctx.services().session.restore();
        store_set_token(&store, token);
    });

    let logout = move |_| {
        let services = ctx.services();
        if let Some(token) = store.token().get_untracked() {
            services.sync.forget(&token);
        }
        if let Err(e) = services.session.clear_token() {
            tracing::error!(error = %e, "failed to clear session");
        }
        store_sign_out(&store);
    };

    let signed_in = move || store.token().with(|token| token.is_some());

    view! {
        <header class="app-header">
            <span class="logo">
                <A href="/">"TodoPlatform"</A>
            </span>
            <nav class="header-actions">
                <button
                    class="add-btn"
                    disabled=move || !signed_in()
                    on:click=move |_| store_open_create(&store)
                >
                    "Add todo"
                </button>
                <Show
                    when=signed_in
                    fallback=|| view! { <A href="/login">"Login"</A> }
                >
                    <button class="logout-btn" on:click=logout>"Logout"</button>
                </Show>
                <A href="/signup">"Sign up"</A>
            </nav>
        </header>
    }
}
