use leptos::prelude::*;

/// Live preview of the generated portfolio page, rendered in a sandboxed
/// iframe so its scripts and styles cannot leak into the app.
#[component]
pub fn PortfolioPreview(#[prop(into)] html: Signal<String>) -> impl IntoView {
    view! {
        <Show when=move || html.with(|h| !h.is_empty())>
            <section class="display-section portfolio-preview">
                <h3>"Portfolio Preview"</h3>
                <iframe
                    class="portfolio-frame"
                    title="Portfolio preview"
                    sandbox="allow-scripts allow-forms allow-popups allow-same-origin"
                    srcdoc=move || html.get()
                ></iframe>
            </section>
        </Show>
    }
}
