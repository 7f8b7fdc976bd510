use leptos::prelude::*;

use crate::store::ResumeStore;

/// Renders the latest optimization result: score, tailored summary, the
/// suggestion list, and the rewritten section when the backend returned one.
#[component]
pub fn OptimizationDisplay() -> impl IntoView {
    let store = expect_context::<ResumeStore>();

    view! {
        {move || {
            store.optimization().map(|result| {
                view! {
                    <section class="display-section optimization-results">
                        <h3>"Optimization Results"</h3>
                        <p class="optimization-score">
                            "Match score: "
                            <strong>{format!("{:.0}%", result.optimization_score)}</strong>
                        </p>
                        <p class="tailored-summary">{result.tailored_summary}</p>
                        {(!result.suggestions.is_empty())
                            .then(|| view! {
                                <ul class="suggestion-list">
                                    {result
                                        .suggestions
                                        .into_iter()
                                        .map(|suggestion| view! {
                                            <li class="suggestion-item">
                                                <span class="suggestion-kind">{suggestion.kind}</span>
                                                ": "
                                                {suggestion.recommendation}
                                                {suggestion.details.map(|details| view! {
                                                    <ul class="suggestion-details">
                                                        {details
                                                            .into_iter()
                                                            .map(|detail| view! { <li>{detail}</li> })
                                                            .collect_view()}
                                                    </ul>
                                                })}
                                            </li>
                                        })
                                        .collect_view()}
                                </ul>
                            })}
                        {result.improved_resume_section.map(|text| view! {
                            <div class="improved-section">
                                <h4>"Improved Section"</h4>
                                <pre class="document-text">{text}</pre>
                            </div>
                        })}
                    </section>
                }
            })
        }}
    }
}
