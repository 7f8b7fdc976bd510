use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::resume::{EnhanceRequest, GenerateRequest};
use crate::store::{Operation, ResumeStore};

/// Generate a resume from a free-form description.
#[component]
pub fn GenerateSection() -> impl IntoView {
    let store = expect_context::<ResumeStore>();
    let (prompt, set_prompt) = signal(String::new());

    let on_generate = move |_| {
        let request = GenerateRequest {
            prompt: prompt.get(),
            system_instruction: None,
            conversation_id: None,
        };
        let token = store.begin(Operation::Generate);
        spawn_local(async move {
            match api::resume::generate_resume(&request).await {
                Ok(text) => store.complete_generate(token, text),
                Err(e) => store.fail(token, e.to_string()),
            }
        });
    };

    let generate_disabled = move || {
        store.loading(Operation::Generate) || prompt.with(|p| p.trim().is_empty())
    };

    view! {
        <section class="panel generate-section">
            <h3>"Generate a Resume"</h3>
            <div class="form-group">
                <label>"Describe the resume you want"</label>
                <textarea
                    class="input text-area"
                    rows="6"
                    placeholder="e.g. A resume for a senior backend engineer with 8 years of distributed systems experience..."
                    prop:value=move || prompt.get()
                    on:input=move |ev| set_prompt.set(event_target_value(&ev))
                ></textarea>
            </div>
            <button class="btn btn-primary" on:click=on_generate disabled=generate_disabled>
                {move || {
                    if store.loading(Operation::Generate) { "Generating..." } else { "Generate Resume" }
                }}
            </button>
        </section>
    }
}

/// Rewrite the current resume content, optionally focused on one section or
/// one goal. Reuses the optimization conversation when one exists so the
/// backend keeps its context.
#[component]
pub fn EnhanceSection() -> impl IntoView {
    let store = expect_context::<ResumeStore>();
    let (section, set_section) = signal(String::new());
    let (goal, set_goal) = signal(String::new());

    let on_enhance = move |_| {
        let section = section.with(|s| s.trim().to_string());
        let goal = goal.with(|g| g.trim().to_string());
        let request = EnhanceRequest {
            resume_content: store.resume_content(),
            section_to_enhance: (!section.is_empty()).then_some(section),
            enhancement_goal: (!goal.is_empty()).then_some(goal),
            conversation_id: store.conversation_id(),
        };
        let token = store.begin(Operation::Enhance);
        spawn_local(async move {
            match api::resume::enhance_resume(&request).await {
                Ok(text) => store.complete_enhance(token, text),
                Err(e) => store.fail(token, e.to_string()),
            }
        });
    };

    let enhance_disabled = move || {
        store.loading(Operation::Enhance) || store.with(|s| s.resume_content().trim().is_empty())
    };

    view! {
        <section class="panel enhance-section">
            <h3>"Enhance the Current Resume"</h3>
            <div class="form-group">
                <label>"Resume content to enhance"</label>
                <textarea
                    class="input text-area"
                    rows="10"
                    placeholder="Parse, paste, or generate a resume first..."
                    prop:value=move || store.resume_content()
                    on:input=move |ev| store.set_resume_content(event_target_value(&ev))
                ></textarea>
            </div>
            <div class="input-row">
                <div class="form-group">
                    <label>"Section to enhance (optional)"</label>
                    <input
                        type="text"
                        class="input"
                        placeholder="e.g. experience"
                        prop:value=move || section.get()
                        on:input=move |ev| set_section.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Enhancement goal (optional)"</label>
                    <input
                        type="text"
                        class="input"
                        placeholder="e.g. emphasize leadership"
                        prop:value=move || goal.get()
                        on:input=move |ev| set_goal.set(event_target_value(&ev))
                    />
                </div>
            </div>
            <button class="btn btn-primary" on:click=on_enhance disabled=enhance_disabled>
                {move || {
                    if store.loading(Operation::Enhance) { "Enhancing..." } else { "Enhance Resume" }
                }}
            </button>
        </section>
    }
}
