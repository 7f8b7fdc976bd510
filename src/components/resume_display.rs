use leptos::prelude::*;

/// Titled read-only document panel. Renders nothing while the text is empty.
#[component]
pub fn ResumeDisplay(
    #[prop(into)] title: String,
    #[prop(into)] text: Signal<String>,
) -> impl IntoView {
    view! {
        <Show when=move || text.with(|t| !t.is_empty())>
            <section class="display-section">
                <h3>{title.clone()}</h3>
                <pre class="document-text">{move || text.get()}</pre>
            </section>
        </Show>
    }
}
