//! Session endpoints. Authentication itself is cookie-based and driven by the
//! backend's OAuth redirects; this module only checks, ends, and links to it.

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http;
use super::request::HttpRequest;
use crate::config;

/// Shown when the status check cannot reach the backend at all.
pub const STATUS_CHECK_FAILED: &str =
    "Failed to check authentication status. Please try again.";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Backend role enum, treated as an opaque string here.
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

fn default_role() -> String {
    "USER".to_string()
}

impl UserProfile {
    /// Name shown in the navbar: display name, then email, then a generic
    /// fallback.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ if !self.email.is_empty() => &self.email,
            _ => "User",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 2] = [OAuthProvider::Google, OAuthProvider::Github];

    pub fn label(self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Github => "GitHub",
        }
    }

    fn path(self) -> &'static str {
        match self {
            OAuthProvider::Google => "/auth/google",
            OAuthProvider::Github => "/auth/github",
        }
    }
}

pub fn status_request() -> HttpRequest {
    HttpRequest::get(config::endpoint("/auth/me"))
}

pub fn logout_request() -> HttpRequest {
    HttpRequest::post_empty(config::endpoint("/auth/logout"))
}

/// Full-page navigation target that starts the OAuth flow. The page's port is
/// forwarded so the backend can redirect back to non-default dev ports.
pub fn login_url(provider: OAuthProvider, port: &str) -> String {
    let base = config::endpoint(provider.path());
    if port.is_empty() {
        base
    } else {
        format!("{}?cli_port={}", base, port)
    }
}

/// Asks the backend who is logged in. Non-2xx, empty, and undecodable
/// responses all mean "nobody"; only transport failures are errors.
pub async fn check_status() -> Result<Option<UserProfile>, ApiError> {
    let response = http::send(status_request()).await?;
    if !response.ok() {
        return Ok(None);
    }
    match http::response_json(&response).await {
        Ok(value) => Ok(serde_wasm_bindgen::from_value::<Option<UserProfile>>(value)
            .ok()
            .flatten()),
        Err(_) => Ok(None),
    }
}

/// Ends the session server-side; the backend clears its cookie.
pub async fn logout() -> Result<(), ApiError> {
    let response = http::send(logout_request()).await?;
    http::ensure_success(&response).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_url_forwards_dev_port() {
        let url = login_url(OAuthProvider::Google, "5173");
        assert!(url.ends_with("/auth/google?cli_port=5173"));
    }

    #[test]
    fn login_url_omits_query_on_default_port() {
        let url = login_url(OAuthProvider::Github, "");
        assert!(url.ends_with("/auth/github"));
        assert!(!url.contains("cli_port"));
    }

    #[test]
    fn profile_decodes_with_defaults() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.c"}"#).unwrap();
        assert_eq!(user.role, "USER");
        assert_eq!(user.name, None);
        assert_eq!(user.display_name(), "a@b.c");
    }

    #[test]
    fn display_name_prefers_name_then_email() {
        let mut user: UserProfile = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.c","name":"Ada","role":"ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Ada");

        user.name = None;
        assert_eq!(user.display_name(), "a@b.c");

        user.email.clear();
        assert_eq!(user.display_name(), "User");
    }
}
