use anyhow::{Context, Result};

use crate::screening::batch::DEFAULT_SCORE_THRESHOLD;

/// Application configuration loaded from environment variables.
///
/// The model API key is deliberately NOT required at startup: the gateway
/// reports a missing key per call, so a misconfigured deployment still
/// returns complete (all-rejected) batches instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    pub score_threshold: f64,
    /// Optional comma-separated override for the disqualifying-employer list.
    pub disqualified_employers: Option<Vec<String>>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_endpoint: std::env::var("GEMINI_ENDPOINT").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            score_threshold: std::env::var("SCORE_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_SCORE_THRESHOLD.to_string())
                .parse::<f64>()
                .context("SCORE_THRESHOLD must be a number")?,
            disqualified_employers: std::env::var("DISQUALIFIED_EMPLOYERS").ok().map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
