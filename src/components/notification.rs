use leptos::prelude::*;

use crate::store::ResumeStore;

/// Banner surfacing the first pending operation error, with a dismiss button
/// that clears every error slot at once.
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = expect_context::<ResumeStore>();

    view! {
        {move || {
            store.first_error().map(|message| view! {
                <div class="error-banner" role="alert">
                    <span class="error-banner-text">{message}</span>
                    <button class="btn btn-dismiss" on:click=move |_| store.clear_errors()>
                        "Dismiss"
                    </button>
                </div>
            })
        }}
    }
}
