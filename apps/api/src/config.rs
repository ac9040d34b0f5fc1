use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Document service base URL. Unset means drafts are kept in memory.
    pub backend_url: Option<String>,
    pub backend_timeout_secs: u64,
    pub backend_max_retries: u32,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            backend_timeout_secs: 30,
            backend_max_retries: 3,
            max_upload_bytes: 10 * 1024 * 1024,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            backend_url: std::env::var("BACKEND_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            backend_timeout_secs: parse_env("BACKEND_TIMEOUT_SECS", defaults.backend_timeout_secs)?,
            backend_max_retries: parse_env("BACKEND_MAX_RETRIES", defaults.backend_max_retries)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Default `EnvFilter` directives when `RUST_LOG` holds a bare level.
    /// Covers the library, the `api` binary and request tracing.
    pub fn log_filter(&self) -> String {
        format!(
            "resume_editor={0},api={0},tower_http={0}",
            self.rust_log
        )
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
