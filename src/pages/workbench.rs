//! The resume workbench: one page of tabbed panels sharing a single
//! session state, so content produced on one tab feeds the next.

use leptos::prelude::*;

use crate::components::cover_letter_section::CoverLetterSection;
use crate::components::export_section::ExportSection;
use crate::components::generate_enhance::{EnhanceSection, GenerateSection};
use crate::components::notification::ErrorBanner;
use crate::components::optimization_display::OptimizationDisplay;
use crate::components::portfolio_display::PortfolioPreview;
use crate::components::portfolio_section::PortfolioSection;
use crate::components::resume_display::ResumeDisplay;
use crate::components::resume_form::ResumeForm;
use crate::store::ResumeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkbenchTab {
    Upload,
    Generate,
    Portfolio,
    CoverLetter,
    Export,
}

impl WorkbenchTab {
    const ALL: [WorkbenchTab; 5] = [
        WorkbenchTab::Upload,
        WorkbenchTab::Generate,
        WorkbenchTab::Portfolio,
        WorkbenchTab::CoverLetter,
        WorkbenchTab::Export,
    ];

    fn label(self) -> &'static str {
        match self {
            WorkbenchTab::Upload => "Upload & Optimize",
            WorkbenchTab::Generate => "Generate & Enhance",
            WorkbenchTab::Portfolio => "Portfolio",
            WorkbenchTab::CoverLetter => "Cover Letter",
            WorkbenchTab::Export => "Export",
        }
    }
}

#[component]
pub fn WorkbenchPage() -> impl IntoView {
    let store = expect_context::<ResumeStore>();
    let (tab, set_tab) = signal(WorkbenchTab::Upload);

    // Switching tabs drops errors left over from the previous one.
    let select_tab = move |next: WorkbenchTab| {
        if tab.get() != next {
            store.clear_errors();
        }
        set_tab.set(next);
    };

    view! {
        <div class="page workbench-page">
            <style>{include_str!("workbench.css")}</style>

            <ErrorBanner />

            <div class="tab-bar" role="tablist">
                {WorkbenchTab::ALL
                    .iter()
                    .copied()
                    .map(|t| view! {
                        <button
                            class="tab-button"
                            class:tab-active=move || tab.get() == t
                            on:click=move |_| select_tab(t)
                        >
                            {t.label()}
                        </button>
                    })
                    .collect_view()}
            </div>

            {move || {
                match tab.get() {
                    WorkbenchTab::Upload => view! {
                        <div class="tab-panel">
                            <ResumeForm />
                            <Show when=move || store.has_resume_artifact()>
                                <ResumeDisplay
                                    title="Current Resume Content"
                                    text=Signal::derive(move || store.resume_content())
                                />
                            </Show>
                            <OptimizationDisplay />
                        </div>
                    }
                    .into_any(),

                    WorkbenchTab::Generate => view! {
                        <div class="tab-panel">
                            <GenerateSection />
                            <EnhanceSection />
                            <ResumeDisplay
                                title="Generated Resume"
                                text=Signal::derive(move || store.generated_resume())
                            />
                            <ResumeDisplay
                                title="Enhanced Resume"
                                text=Signal::derive(move || store.enhanced_resume())
                            />
                        </div>
                    }
                    .into_any(),

                    WorkbenchTab::Portfolio => view! {
                        <div class="tab-panel">
                            <PortfolioSection />
                            <PortfolioPreview html=Signal::derive(move || store.portfolio_html()) />
                        </div>
                    }
                    .into_any(),

                    WorkbenchTab::CoverLetter => view! {
                        <div class="tab-panel">
                            <CoverLetterSection />
                            <ResumeDisplay
                                title="Cover Letter"
                                text=Signal::derive(move || store.cover_letter())
                            />
                        </div>
                    }
                    .into_any(),

                    WorkbenchTab::Export => view! {
                        <div class="tab-panel">
                            <ExportSection />
                        </div>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}
