//! Routed Pages

use leptos::prelude::*;

use crate::components::{LoginPanel, SignupPanel, TodoList, TodoPopup};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="home-page">
            <TodoList />
            <TodoPopup />
        </section>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <section class="auth-page">
            <h2>"Login"</h2>
            <LoginPanel />
        </section>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    view! {
        <section class="auth-page">
            <h2>"Sign up"</h2>
            <SignupPanel />
        </section>
    }
}
