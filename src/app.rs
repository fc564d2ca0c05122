//! TodoPlatform Frontend App
//!
//! Root component: shared state, header and routes.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;
use todo_client::ClientConfig;

use crate::components::Header;
use crate::context::{AppContext, Services};
use crate::pages::{HomePage, LoginPage, SignupPage};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::default();
    let services = match Services::new(&config) {
        Ok(services) => services,
        Err(e) => {
            tracing::error!(error = %e, base_url = %config.base_url, "failed to set up client");
            return view! { <p class="app-error">"Error: " {e.to_string()}</p> }.into_any();
        }
    };
    tracing::info!(base_url = %config.base_url, "client ready");

    // Provide context to all children
    provide_context(Store::new(AppState::default()));
    provide_context(AppContext::new(services));

    view! {
        <Router>
            <Header />
            <main class="main-content">
                <Routes fallback=|| view! { <h2 class="not-found">"There is nothing here: 404!"</h2> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/signup") view=SignupPage />
                </Routes>
            </main>
        </Router>
    }
    .into_any()
}
