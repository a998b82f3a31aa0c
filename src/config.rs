//! Backend credentials.
//!
//! Read from the process environment after loading a `.env` file (or the file
//! given with `--env-file`). Nothing else in the program is configured through
//! the environment except the log filter (`ATOME_LOG`).

use std::path::Path;

use crate::error::AppError;

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";

#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            url: url.trim().trim_end_matches('/').to_string(),
            anon_key: anon_key.into().trim().to_string(),
        }
    }

    /// Load `.env` (or `env_file`) and read the credentials.
    pub fn from_env(env_file: Option<&Path>) -> Result<Self, AppError> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    AppError::config(format!("Failed to load env file '{}': {e}", path.display()))
                })?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let read = |key: &str| -> Result<String, AppError> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::config(format!("Missing {key} in environment (.env).")))
        };
        let url = read(ENV_URL)?;
        let anon_key = read(ENV_ANON_KEY)?;

        let config = Self::new(url, anon_key);
        if !(config.url.starts_with("https://") || config.url.starts_with("http://")) {
            return Err(AppError::config(format!(
                "{ENV_URL} must be an http(s) URL, got '{}'.",
                config.url
            )));
        }
        Ok(config)
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_and_normalizes() {
        let config = BackendConfig::from_lookup(lookup(&[
            (ENV_URL, "https://demo.supabase.co/"),
            (ENV_ANON_KEY, " key "),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://demo.supabase.co");
        assert_eq!(config.anon_key, "key");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = BackendConfig::from_lookup(lookup(&[(ENV_URL, "https://demo.supabase.co")]))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
        assert!(err.message().contains(ENV_ANON_KEY));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = BackendConfig::from_lookup(lookup(&[(ENV_URL, " "), (ENV_ANON_KEY, "k")]))
            .unwrap_err();
        assert!(err.message().contains(ENV_URL));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = BackendConfig::from_lookup(lookup(&[(ENV_URL, "demo.supabase.co"), (ENV_ANON_KEY, "k")]))
            .unwrap_err();
        assert!(err.message().contains("http(s)"));
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", BackendConfig::new("https://x", "secret"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn unreadable_env_file_is_reported() {
        let err = BackendConfig::from_env(Some(Path::new("/nonexistent/atome.env"))).unwrap_err();
        assert!(err.message().contains("/nonexistent/atome.env"));
    }
}
