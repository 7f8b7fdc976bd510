//! Login page. The backend owns the OAuth flow; this page just starts it
//! with a full-page redirect and absorbs the callback query parameters the
//! backend sends back.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::api;
use crate::api::auth::{OAuthProvider, UserProfile};
use crate::store::AuthStore;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthStore>();
    let query = use_query_map();
    let navigate = use_navigate();

    // Send signed-in visitors straight back to the workbench.
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if !auth.loading() && auth.logged_in() {
                navigate(
                    "/",
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        });
    }

    // Absorb OAuth callback parameters carried on the query string. The
    // access token is only the success marker; the session itself lives in
    // the cookie the backend set.
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            let params = query.get();
            match params.get("action").as_deref() {
                Some("success") => {
                    let access_token = params.get("accessToken").unwrap_or_default();
                    let user_id = params.get("userId").unwrap_or_default();
                    let email = params.get("userEmail").unwrap_or_default();
                    if access_token.is_empty() || user_id.is_empty() || email.is_empty() {
                        auth.set_error(Some(
                            "Login callback was missing required parameters.".to_string(),
                        ));
                        return;
                    }
                    let profile = UserProfile {
                        id: user_id,
                        email,
                        name: params.get("userName"),
                        image: params.get("userImage"),
                        role: params.get("userRole").unwrap_or_else(|| "USER".to_string()),
                        username: params.get("username"),
                        provider: params.get("provider"),
                    };
                    auth.login_success(profile);
                    navigate(
                        "/",
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                _ => {
                    if let Some(message) = params.get("error") {
                        auth.set_error(Some(message));
                    } else {
                        auth.set_error(None);
                    }
                }
            }
        });
    }

    // Full-page redirect into the backend's OAuth flow, forwarding the dev
    // server port so the callback can find its way back.
    let oauth_redirect = move |provider: OAuthProvider| {
        if let Some(window) = web_sys::window() {
            let port = window.location().port().unwrap_or_default();
            let url = api::auth::login_url(provider, &port);
            if let Err(e) = window.location().set_href(&url) {
                web_sys::console::error_1(&e);
            }
        }
    };

    view! {
        <div class="page login-page">
            <style>{include_str!("login.css")}</style>
            <Show
                when=move || !auth.loading()
                fallback=|| view! {
                    <div class="loading-indicator">
                        <div class="spinner"></div>
                        <p>"Checking your session..."</p>
                    </div>
                }
            >
                <div class="login-card">
                    <h2>"Sign in to ResuMate"</h2>
                    <p class="login-subtitle">
                        "Sign in to optimize, generate, and export resumes."
                    </p>
                    {move || {
                        auth.error().map(|message| view! {
                            <div class="error-banner" role="alert">{message}</div>
                        })
                    }}
                    <div class="oauth-buttons">
                        {OAuthProvider::ALL
                            .iter()
                            .copied()
                            .map(|provider| view! {
                                <button
                                    class="btn btn-oauth"
                                    on:click=move |_| oauth_redirect(provider)
                                >
                                    {format!("Continue with {}", provider.label())}
                                </button>
                            })
                            .collect_view()}
                    </div>
                    <div class="login-divider"><span>"or"</span></div>
                    <p class="login-note">
                        "Email and password sign-in is not available yet. Use one of the providers above."
                    </p>
                </div>
            </Show>
        </div>
    }
}
