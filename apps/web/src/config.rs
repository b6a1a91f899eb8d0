use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_SECRET_KEY: &str = "default_secret_key";
const DEFAULT_DATABASE_URL: &str = "sqlite://jobflow.db";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every setting has a default, so an empty environment yields a working local setup.
#[derive(Debug, Clone)]
pub struct Config {
    pub secret_key: String,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_upload_dir = std::env::current_dir()
            .context("Cannot determine the working directory")?
            .join("uploads");
        Self::from_lookup(|key| std::env::var(key).ok(), default_upload_dir)
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F, default_upload_dir: PathBuf) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            secret_key: var_or("SECRET_KEY", DEFAULT_SECRET_KEY),
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default_upload_dir),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: var_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var_or("RUST_LOG", "info"),
        })
    }
}
