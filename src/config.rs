//! API endpoint configuration.
//!
//! A WASM bundle has no process environment at runtime, so the base URL is
//! baked in at compile time from `PUBLIC_API_BASE_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Build a config pointing at `base_url` (trailing slashes are trimmed).
    pub fn new(base_url: &str) -> Self {
        Self { base_url: resolve_base_url(Some(base_url)) }
    }

    /// Build config from the compile-time environment.
    ///
    /// Optional:
    /// - `PUBLIC_API_BASE_URL`: default `http://localhost:8000`
    pub fn from_env() -> Self {
        Self { base_url: resolve_base_url(option_env!("PUBLIC_API_BASE_URL")) }
    }

    /// Absolute URL for an API `path` (which must start with `/`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn resolve_base_url(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(url) if !url.is_empty() => url.trim_end_matches('/').to_owned(),
        _ => DEFAULT_API_BASE_URL.to_owned(),
    }
}
