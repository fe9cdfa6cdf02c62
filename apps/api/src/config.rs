use anyhow::{Context, Result};
use std::str::FromStr;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Keyword cap used when a request does not send `max_k`.
    pub default_max_k: usize,
    /// Largest `max_k` a request may ask for.
    pub max_k_limit: usize,
    pub max_upload_bytes: usize,
    pub skills_weight: f32,
    pub text_weight: f32,
    /// Salience of a keyword occurrence on the job posting's title line.
    pub title_weight: f32,
    /// Base URL the `analyze` client calls.
    pub analyzer_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            default_max_k: 10,
            max_k_limit: 50,
            max_upload_bytes: 10 * 1024 * 1024,
            skills_weight: 1.0,
            text_weight: 0.5,
            title_weight: 2.0,
            analyzer_base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            default_max_k: env_or("DEFAULT_MAX_K", defaults.default_max_k)?,
            max_k_limit: env_or("MAX_K_LIMIT", defaults.max_k_limit)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            skills_weight: env_or("SKILLS_WEIGHT", defaults.skills_weight)?,
            text_weight: env_or("TEXT_WEIGHT", defaults.text_weight)?,
            title_weight: env_or("TITLE_WEIGHT", defaults.title_weight)?,
            analyzer_base_url: std::env::var("ANALYZER_BASE_URL")
                .unwrap_or(defaults.analyzer_base_url),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_max_k == 0 {
            anyhow::bail!("DEFAULT_MAX_K must be at least 1");
        }
        if self.max_k_limit < self.default_max_k {
            anyhow::bail!(
                "MAX_K_LIMIT ({}) must not be smaller than DEFAULT_MAX_K ({})",
                self.max_k_limit,
                self.default_max_k
            );
        }
        let weights = [
            ("SKILLS_WEIGHT", self.skills_weight),
            ("TEXT_WEIGHT", self.text_weight),
            ("TITLE_WEIGHT", self.title_weight),
        ];
        for (key, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                anyhow::bail!("{key} must be a finite, non-negative number, got {weight}");
            }
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
