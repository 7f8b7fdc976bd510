use leptos::prelude::*;

use crate::theme::{persist_mode, ThemeContext, ThemeMode};

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = expect_context::<ThemeContext>();

    let on_toggle = move |_| {
        let next = theme.mode.get().toggled();
        theme.set_mode.set(next);
        persist_mode(next);
    };

    view! {
        <button class="btn btn-secondary theme-toggle" on:click=on_toggle>
            {move || {
                match theme.mode.get() {
                    ThemeMode::Light => "Dark mode",
                    ThemeMode::Dark => "Light mode",
                }
            }}
        </button>
    }
}
