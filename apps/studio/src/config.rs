use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::render::Template;

/// Application configuration loaded from environment variables.
/// Fails at startup when a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Redis slot backend; takes precedence over `store_dir`.
    pub redis_url: Option<String>,
    /// Directory for the JSON file backend.
    pub store_dir: Option<PathBuf>,
    pub template: Template,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            redis_url: None,
            store_dir: None,
            template: Template::Classic,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            redis_url: optional_env("REDIS_URL"),
            store_dir: optional_env("STORE_DIR").map(PathBuf::from),
            template: optional_env("TEMPLATE")
                .map(|value| value.parse::<Template>().map_err(|e| anyhow!(e)))
                .transpose()
                .context("TEMPLATE must be 'classic' or 'modern'")?
                .unwrap_or_default(),
        })
    }
}

/// Unset and blank both read as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
