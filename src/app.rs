use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::auth::STATUS_CHECK_FAILED;
use crate::components::navbar::Navbar;
use crate::pages::login::LoginPage;
use crate::pages::workbench::WorkbenchPage;
use crate::store::{AuthStore, ResumeStore};
use crate::theme::{apply_theme, detect_initial_mode, ThemeContext, ThemeMode};

#[component]
pub fn App() -> impl IntoView {
    provide_context(ResumeStore::new());
    let auth = AuthStore::new();
    provide_context(auth);

    let (mode, set_mode) = signal(ThemeMode::default());
    provide_context(ThemeContext { mode, set_mode });

    // Load the saved theme preference on mount
    Effect::new(move |_| {
        set_mode.set(detect_initial_mode());
    });

    // Apply theme to DOM whenever the signal changes
    Effect::new(move |_| {
        apply_theme(mode.get());
    });

    // Ask the backend who is signed in. Errors here mean the probe itself
    // failed, not that the visitor is logged out.
    Effect::new(move |_| {
        spawn_local(async move {
            match api::auth::check_status().await {
                Ok(profile) => auth.resolve(profile),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Auth status check failed: {}", e).into(),
                    );
                    auth.check_failed(STATUS_CHECK_FAILED.to_string());
                }
            }
        });
    });

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <header class="app-header">
                    <h1>"ResuMate"</h1>
                    <p class="app-tagline">
                        "Optimize, generate, and enhance your resume with AI"
                    </p>
                </header>
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=WorkbenchPage />
                        <Route path=path!("/login") view=LoginPage />
                    </Routes>
                </main>
                <footer class="app-footer">
                    <p>"ResuMate sends resume content to its backend for processing."</p>
                </footer>
            </div>
        </Router>
    }
}
