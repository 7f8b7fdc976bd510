//! Authentication state, resolved once on startup and updated by the
//! login page and the navbar logout control.

use leptos::prelude::*;

use crate::api::auth::UserProfile;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    logged_in: bool,
    user: Option<UserProfile>,
    loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// Startup state: loading until the status probe resolves.
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn login_success(&mut self, user: UserProfile) {
        self.logged_in = true;
        self.user = Some(user);
        self.loading = false;
        self.error = None;
    }

    pub fn logged_out(&mut self) {
        self.logged_in = false;
        self.user = None;
        self.loading = false;
        self.error = None;
    }

    /// Applies the result of the startup status probe. A profile without an
    /// id means the backend answered but no session exists.
    pub fn resolve(&mut self, profile: Option<UserProfile>) {
        match profile {
            Some(user) if !user.id.is_empty() => self.login_success(user),
            _ => self.logged_out(),
        }
    }

    /// The probe itself failed. State falls back to logged out but the
    /// message stays visible.
    pub fn check_failed(&mut self, message: String) {
        self.logged_in = false;
        self.user = None;
        self.loading = false;
        self.error = Some(message);
    }

    /// Logout request failed. The session may still exist server-side, so
    /// the profile is kept.
    pub fn logout_failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }
}

#[derive(Clone, Copy)]
pub struct AuthStore {
    state: RwSignal<AuthState>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::new()),
        }
    }

    pub fn with<R>(self, f: impl FnOnce(&AuthState) -> R) -> R {
        self.state.with(f)
    }

    pub fn logged_in(self) -> bool {
        self.with(|s| s.logged_in())
    }

    pub fn loading(self) -> bool {
        self.with(|s| s.loading())
    }

    pub fn user(self) -> Option<UserProfile> {
        self.with(|s| s.user().cloned())
    }

    pub fn error(self) -> Option<String> {
        self.with(|s| s.error().map(str::to_string))
    }

    pub fn login_success(self, user: UserProfile) {
        self.state.update(|s| s.login_success(user));
    }

    pub fn logged_out(self) {
        self.state.update(|s| s.logged_out());
    }

    pub fn resolve(self, profile: Option<UserProfile>) {
        self.state.update(|s| s.resolve(profile));
    }

    pub fn check_failed(self, message: String) {
        self.state.update(|s| s.check_failed(message));
    }

    pub fn logout_failed(self, message: String) {
        self.state.update(|s| s.logout_failed(message));
    }

    pub fn set_error(self, message: Option<String>) {
        self.state.update(|s| s.set_error(message));
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: "dev@example.com".into(),
            name: Some("Dev".into()),
            image: None,
            role: "USER".into(),
            username: None,
            provider: Some("google".into()),
        }
    }

    #[test]
    fn starts_loading() {
        let state = AuthState::new();
        assert!(state.loading());
        assert!(!state.logged_in());
    }

    #[test]
    fn resolve_with_profile_logs_in() {
        let mut state = AuthState::new();
        state.resolve(Some(profile("u-1")));
        assert!(state.logged_in());
        assert!(!state.loading());
        assert_eq!(state.user().map(|u| u.id.as_str()), Some("u-1"));
    }

    #[test]
    fn resolve_without_profile_logs_out() {
        let mut state = AuthState::new();
        state.resolve(None);
        assert!(!state.logged_in());
        assert!(!state.loading());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn resolve_with_empty_id_counts_as_logged_out() {
        let mut state = AuthState::new();
        state.resolve(Some(profile("")));
        assert!(!state.logged_in());
        assert!(state.user().is_none());
    }

    #[test]
    fn check_failed_keeps_the_message_while_logging_out() {
        let mut state = AuthState::new();
        state.check_failed("Failed to check authentication status. Please try again.".into());
        assert!(!state.logged_in());
        assert!(!state.loading());
        assert_eq!(
            state.error(),
            Some("Failed to check authentication status. Please try again.")
        );
    }

    #[test]
    fn logout_failure_keeps_the_session() {
        let mut state = AuthState::new();
        state.resolve(Some(profile("u-2")));
        state.logout_failed("API Error 500: internal".into());
        assert!(state.logged_in());
        assert_eq!(state.error(), Some("API Error 500: internal"));
    }
}
