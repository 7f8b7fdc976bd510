//! Backend location for API calls.
//!
//! By default all requests go to the relative `/api` prefix, which the dev
//! server proxies to the backend (see Trunk.toml). Deployments that serve the
//! frontend from a different origin set `RESUMATE_API_BASE` at build time.

/// Base path prepended to every backend endpoint.
pub fn api_base() -> &'static str {
    option_env!("RESUMATE_API_BASE").unwrap_or("/api")
}

/// Full URL for a backend endpoint path like `/resume/parse`.
pub fn endpoint(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let url = endpoint("/resume/parse");
        assert!(url.starts_with(api_base()));
        assert!(url.ends_with("/resume/parse"));
    }
}
