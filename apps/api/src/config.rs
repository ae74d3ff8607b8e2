use anyhow::{anyhow, Context, Result};

use crate::generation::fit_scoring::ScoreStrategy;
use crate::generation::generator::OptimizeStrategy;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub score_strategy: ScoreStrategy,
    pub optimize_strategy: OptimizeStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: optional_env("PORT", "3001")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            score_strategy: optional_env("SCORE_STRATEGY", "exact")
                .parse::<ScoreStrategy>()
                .map_err(|e| anyhow!(e))
                .context("SCORE_STRATEGY must be exact or fuzzy")?,
            optimize_strategy: optional_env("OPTIMIZE_STRATEGY", "tailored")
                .parse::<OptimizeStrategy>()
                .map_err(|e| anyhow!(e))
                .context("OPTIMIZE_STRATEGY must be tailored or keyword_append")?,
        })
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
