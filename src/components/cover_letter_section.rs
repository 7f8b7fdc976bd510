use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::resume::CoverLetterRequest;
use crate::store::{Operation, ResumeStore};

/// Generate a cover letter from the current resume and job description.
#[component]
pub fn CoverLetterSection() -> impl IntoView {
    let store = expect_context::<ResumeStore>();
    let (prompt, set_prompt) = signal(String::new());

    let on_generate = move |_| {
        let prompt = prompt.with(|p| p.trim().to_string());
        let request = CoverLetterRequest {
            resume_content: store.resume_content(),
            job_description: store.job_description(),
            prompt: (!prompt.is_empty()).then_some(prompt),
        };
        let token = store.begin(Operation::CoverLetter);
        spawn_local(async move {
            match api::resume::generate_cover_letter(&request).await {
                Ok(text) => store.complete_cover_letter(token, text),
                Err(e) => store.fail(token, e.to_string()),
            }
        });
    };

    let generate_disabled = move || {
        store.loading(Operation::CoverLetter)
            || store.with(|s| s.resume_content().trim().is_empty())
            || store.with(|s| s.job_description().trim().is_empty())
    };

    view! {
        <section class="panel cover-letter-section">
            <h3>"Cover Letter"</h3>
            <div class="form-group">
                <label>"Resume content used as source"</label>
                <textarea
                    class="input text-area"
                    rows="6"
                    readonly=true
                    prop:value=move || store.resume_content()
                ></textarea>
            </div>
            <div class="form-group">
                <label>"Job description"</label>
                <textarea
                    class="input text-area"
                    rows="6"
                    readonly=true
                    prop:value=move || store.job_description()
                ></textarea>
                <p class="input-hint">
                    "Both fields above come from the Upload & Optimize tab."
                </p>
            </div>
            <div class="form-group">
                <label>"Tone or emphasis (optional)"</label>
                <textarea
                    class="input text-area"
                    rows="3"
                    placeholder="e.g. formal tone, lead with the migration project"
                    prop:value=move || prompt.get()
                    on:input=move |ev| set_prompt.set(event_target_value(&ev))
                ></textarea>
            </div>
            <button class="btn btn-primary" on:click=on_generate disabled=generate_disabled>
                {move || {
                    if store.loading(Operation::CoverLetter) {
                        "Generating..."
                    } else {
                        "Generate Cover Letter"
                    }
                }}
            </button>
        </section>
    }
}
