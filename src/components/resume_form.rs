use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::request::FileUpload;
use crate::api::resume::OptimizeInputs;
use crate::store::{Operation, ResumeStore};

/// Resume source form: file upload with parsing, a plain-text fallback, and
/// the job description that optimization runs against.
///
/// The file and the text box are alternatives. Picking a file clears the
/// text, typing clears the selection, and optimization prefers the file when
/// both somehow exist.
#[component]
pub fn ResumeForm() -> impl IntoView {
    let store = expect_context::<ResumeStore>();
    // Selected file, already read into memory so the upload handlers stay
    // synchronous.
    let (selected_file, set_selected_file) = signal::<Option<FileUpload>>(None);
    let file_input_id = "resume-file-input";

    // Handle file selection
    let on_file_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            if let Some(file) = files.get(0) {
                spawn_local(async move {
                    match read_file_upload(file).await {
                        Ok(upload) => {
                            set_selected_file.set(Some(upload));
                            store.set_resume_content(String::new());
                        }
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("Failed to read file: {}", e).into(),
                            );
                        }
                    }
                });
            }
        }
    };

    // Parse the selected file into editable text
    let on_parse = move |_| {
        if let Some(upload) = selected_file.get() {
            let token = store.begin(Operation::Parse);
            spawn_local(async move {
                match api::resume::parse_resume_file(&upload).await {
                    Ok(text) => store.complete_parse(token, text),
                    Err(e) => store.fail(token, e.to_string()),
                }
            });
        }
    };

    // Optimize against the job description
    let on_optimize = move |_| {
        let inputs = OptimizeInputs {
            resume_file: selected_file.get(),
            resume_content: Some(store.resume_content()),
            job_description: store.job_description(),
            conversation_id: store.conversation_id(),
        };
        let token = store.begin(Operation::Optimize);
        spawn_local(async move {
            match api::resume::optimize_resume(&inputs).await {
                Ok(result) => store.complete_optimize(token, result),
                Err(e) => store.fail(token, e.to_string()),
            }
        });
    };

    let parse_disabled = move || {
        selected_file.with(|f| f.is_none()) || store.loading(Operation::Parse)
    };
    let optimize_disabled = move || {
        store.loading(Operation::Optimize)
            || (selected_file.with(|f| f.is_none())
                && store.with(|s| s.resume_content().trim().is_empty()))
            || store.with(|s| s.job_description().trim().is_empty())
    };

    view! {
        <section class="panel resume-form">
            <h3>"Resume Source"</h3>

            <div class="form-group">
                <div class="input-row">
                    <label for=file_input_id class="btn btn-secondary">
                        "Choose Resume File"
                    </label>
                    <input
                        type="file"
                        id=file_input_id
                        accept=".pdf,.doc,.docx,.txt,.md"
                        style="display: none"
                        on:change=on_file_change
                    />
                    {move || {
                        selected_file
                            .with(|f| f.as_ref().map(|u| u.filename.clone()))
                            .map(|name| view! { <span class="file-name">{name}</span> })
                    }}
                    <button class="btn btn-primary" on:click=on_parse disabled=parse_disabled>
                        {move || {
                            if store.loading(Operation::Parse) { "Parsing..." } else { "Parse Resume" }
                        }}
                    </button>
                </div>
                <p class="input-hint">"Parsing extracts the file into editable text below."</p>
            </div>

            <div class="form-group">
                <label>"Or paste your resume as plain text"</label>
                <textarea
                    class="input text-area"
                    rows="10"
                    placeholder="Paste your resume content here..."
                    prop:value=move || store.resume_content()
                    on:input=move |ev| {
                        set_selected_file.set(None);
                        store.set_resume_content(event_target_value(&ev));
                    }
                ></textarea>
            </div>

            <div class="form-group">
                <label>"Job Description"</label>
                <textarea
                    class="input text-area"
                    rows="8"
                    placeholder="Paste the job description to optimize against..."
                    prop:value=move || store.job_description()
                    on:input=move |ev| {
                        store.set_job_description(event_target_value(&ev));
                    }
                ></textarea>
            </div>

            <button class="btn btn-primary" on:click=on_optimize disabled=optimize_disabled>
                {move || {
                    if store.loading(Operation::Optimize) {
                        "Optimizing..."
                    } else {
                        "Optimize Against Job"
                    }
                }}
            </button>
        </section>
    }
}

/// Read a selected file into memory for multipart upload.
async fn read_file_upload(file: web_sys::File) -> Result<FileUpload, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen_futures::JsFuture;

    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Failed to convert to ArrayBuffer")?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();

    Ok(FileUpload {
        filename: file.name(),
        mime_type: file.type_(),
        bytes,
    })
}
