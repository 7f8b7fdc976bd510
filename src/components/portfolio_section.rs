use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::resume::PortfolioRequest;
use crate::store::{Operation, ResumeStore};

/// Generate a single-file portfolio website from the current resume content.
#[component]
pub fn PortfolioSection() -> impl IntoView {
    let store = expect_context::<ResumeStore>();
    let (prompt, set_prompt) = signal(String::new());

    let on_generate = move |_| {
        let prompt = prompt.with(|p| p.trim().to_string());
        let request = PortfolioRequest {
            resume_content: store.resume_content(),
            prompt: (!prompt.is_empty()).then_some(prompt),
        };
        let token = store.begin(Operation::Portfolio);
        spawn_local(async move {
            match api::resume::generate_portfolio(&request).await {
                Ok(html) => store.complete_portfolio(token, html),
                Err(e) => store.fail(token, e.to_string()),
            }
        });
    };

    let generate_disabled = move || {
        store.loading(Operation::Portfolio) || store.with(|s| s.resume_content().trim().is_empty())
    };

    view! {
        <section class="panel portfolio-section">
            <h3>"Portfolio Website"</h3>
            <div class="form-group">
                <label>"Resume content used as source"</label>
                <textarea
                    class="input text-area"
                    rows="8"
                    readonly=true
                    prop:value=move || store.resume_content()
                ></textarea>
                <p class="input-hint">
                    "Parse, paste, or generate a resume on the other tabs to fill this in."
                </p>
            </div>
            <div class="form-group">
                <label>"Style directions (optional)"</label>
                <textarea
                    class="input text-area"
                    rows="3"
                    placeholder="e.g. dark single-page layout with a projects grid"
                    prop:value=move || prompt.get()
                    on:input=move |ev| set_prompt.set(event_target_value(&ev))
                ></textarea>
            </div>
            <button class="btn btn-primary" on:click=on_generate disabled=generate_disabled>
                {move || {
                    if store.loading(Operation::Portfolio) {
                        "Generating..."
                    } else {
                        "Generate Portfolio"
                    }
                }}
            </button>
        </section>
    }
}
