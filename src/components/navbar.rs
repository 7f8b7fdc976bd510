use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::theme_toggle::ThemeToggle;
use crate::store::AuthStore;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthStore>();
    let navigate = use_navigate();

    // Logout, then return to the login page either way. A failed logout
    // keeps the session in the store so the navbar stays truthful.
    let on_logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::auth::logout().await {
                Ok(()) => auth.logged_out(),
                Err(e) => auth.logout_failed(e.to_string()),
            }
            navigate("/login", Default::default());
        });
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-brand">"ResuMate"</a>
            <div class="navbar-actions">
                <ThemeToggle />
                {move || {
                    if auth.loading() {
                        view! { <span class="navbar-status">"Checking session..."</span> }
                            .into_any()
                    } else if auth.logged_in() {
                        let name = auth
                            .user()
                            .map(|u| u.display_name().to_string())
                            .unwrap_or_else(|| "User".to_string());
                        view! {
                            <div class="navbar-session">
                                <span class="navbar-user">{name}</span>
                                <button class="btn btn-secondary" on:click=on_logout.clone()>
                                    "Logout"
                                </button>
                            </div>
                        }
                        .into_any()
                    } else {
                        view! { <a href="/login" class="btn btn-secondary">"Login"</a> }
                            .into_any()
                    }
                }}
            </div>
        </nav>
    }
}
