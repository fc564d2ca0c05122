//! Client Configuration
//!
//! Base URL and session cookie settings. The base URL can be baked in at
//! build time through the `TODO_API_URL` environment variable.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://api.calmplete.net/api";
pub const DEFAULT_TOKEN_COOKIE: &str = "accessToken";
pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,
    #[serde(default = "default_token_lifetime_days")]
    pub token_lifetime_days: i64,
}

fn default_token_cookie() -> String {
    DEFAULT_TOKEN_COOKIE.to_string()
}

fn default_token_lifetime_days() -> i64 {
    DEFAULT_TOKEN_LIFETIME_DAYS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("TODO_API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
            token_cookie: default_token_cookie(),
            token_lifetime_days: default_token_lifetime_days(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_lifetime_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default().with_base_url(DEFAULT_API_URL);
        assert_eq!(config.base_url, "http://api.calmplete.net/api");
        assert_eq!(config.token_cookie, "accessToken");
        assert_eq!(config.token_lifetime(), chrono::Duration::days(7));
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"https://todos.example/api"}"#).unwrap();
        assert_eq!(config.base_url, "https://todos.example/api");
        assert_eq!(config.token_cookie, DEFAULT_TOKEN_COOKIE);
        assert_eq!(config.token_lifetime_days, 7);
    }
}
