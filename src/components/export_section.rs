use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::export::{self, DocumentKind, OutputFormat};
use crate::store::{Operation, ResumeStore};

/// Export the resume, portfolio, or cover letter through the backend
/// conversion endpoints and save the result as a browser download.
#[component]
pub fn ExportSection() -> impl IntoView {
    let store = expect_context::<ResumeStore>();
    let (kind, set_kind) = signal(DocumentKind::Resume);
    let (format_id, set_format_id) = signal(OutputFormat::Docx.id().to_string());
    let (filename, set_filename) = signal(String::new());

    // Content the selected document kind resolves to.
    let source_content = move || match kind.get() {
        DocumentKind::Resume => store.resume_content(),
        DocumentKind::Portfolio => store.portfolio_html(),
        DocumentKind::CoverLetter => store.cover_letter(),
    };

    // Re-suggest the filename when the document kind or the job description
    // changes. The memo keeps unrelated state changes from stomping a
    // hand-edited name.
    let job_description = Memo::new(move |_| store.job_description());
    Effect::new(move |_| {
        set_filename.set(export::suggested_filename(&job_description.get(), kind.get()));
    });

    let selected_format = move || format_id.with(|id| id.parse::<OutputFormat>().ok());

    let on_export = move |_| {
        let content = source_content();
        let name = filename.with(|f| f.trim().to_string());
        let format_id = format_id.get();
        let token = store.begin(Operation::Export);
        spawn_local(async move {
            let outcome = async {
                let format: OutputFormat = format_id.parse()?;
                export::export_document(&content, format, &name).await
            }
            .await;
            match outcome {
                Ok(()) => store.complete_export(token),
                Err(e) => store.fail(token, e.to_string()),
            }
        });
    };

    let export_disabled = move || {
        store.loading(Operation::Export)
            || source_content().trim().is_empty()
            || filename.with(|f| f.trim().is_empty())
    };

    view! {
        <section class="panel export-section">
            <h3>"Export"</h3>

            <div class="form-group">
                <label>"Document"</label>
                <div class="radio-row">
                    {DocumentKind::ALL
                        .iter()
                        .copied()
                        .map(|k| {
                            let available = move || match k {
                                DocumentKind::Resume => {
                                    store.with(|s| !s.resume_content().trim().is_empty())
                                }
                                DocumentKind::Portfolio => {
                                    store.with(|s| !s.portfolio_html().is_empty())
                                }
                                DocumentKind::CoverLetter => {
                                    store.with(|s| !s.cover_letter().is_empty())
                                }
                            };
                            view! {
                                <label class="radio-option" class:radio-disabled=move || !available()>
                                    <input
                                        type="radio"
                                        name="export-document"
                                        prop:checked=move || kind.get() == k
                                        disabled=move || !available()
                                        on:change=move |_| set_kind.set(k)
                                    />
                                    {k.label()}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="form-group">
                <label>"Format"</label>
                <select
                    class="input"
                    prop:value=move || format_id.get()
                    on:change=move |ev| set_format_id.set(event_target_value(&ev))
                >
                    {OutputFormat::ALL
                        .iter()
                        .copied()
                        .map(|f| view! { <option value=f.id()>{f.label()}</option> })
                        .collect_view()}
                </select>
                <p class="input-hint">
                    {move || {
                        match selected_format() {
                            Some(f) if f.takes_html_input() => {
                                "This format converts HTML input. The portfolio exports best here."
                            }
                            _ => "This format converts Markdown or plain text input.",
                        }
                    }}
                </p>
            </div>

            <div class="form-group">
                <label>"Filename"</label>
                <div class="input-row">
                    <input
                        type="text"
                        class="input"
                        prop:value=move || filename.get()
                        on:input=move |ev| set_filename.set(event_target_value(&ev))
                    />
                    <span class="filename-extension">
                        {move || {
                            selected_format()
                                .map(|f| format!(".{}", f.plan().extension))
                                .unwrap_or_default()
                        }}
                    </span>
                </div>
            </div>

            <button class="btn btn-primary" on:click=on_export disabled=export_disabled>
                {move || {
                    if store.loading(Operation::Export) { "Exporting..." } else { "Export" }
                }}
            </button>
        </section>
    }
}
