use leptos::prelude::*;

const STORAGE_KEY: &str = "themeMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<ThemeMode> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub mode: ReadSignal<ThemeMode>,
    pub set_mode: WriteSignal<ThemeMode>,
}

/// Saved preference first, then the OS preference, then light.
pub fn detect_initial_mode() -> ThemeMode {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(saved)) = storage.get_item(STORAGE_KEY) {
                if let Some(mode) = ThemeMode::parse(&saved) {
                    return mode;
                }
            }
        }
        if let Ok(Some(query)) = window.match_media("(prefers-color-scheme: dark)") {
            if query.matches() {
                return ThemeMode::Dark;
            }
        }
    }
    ThemeMode::default()
}

pub fn persist_mode(mode: ThemeMode) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(STORAGE_KEY, mode.as_str());
        }
    }
}

/// Apply the theme by setting the `data-theme` attribute on `<html>`.
pub fn apply_theme(mode: ThemeMode) {
    if let Some(window) = web_sys::window() {
        if let Some(doc) = window.document() {
            if let Some(html) = doc.document_element() {
                let _ = html.set_attribute("data-theme", mode.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips_between_modes() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn parse_round_trips_both_modes() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(ThemeMode::parse("system"), None);
        assert_eq!(ThemeMode::parse(""), None);
    }
}
