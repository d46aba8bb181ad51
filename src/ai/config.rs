use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("GEMINI_API_KEY environment variable is not set"))?;
        let request_timeout = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow!("invalid GEMINI_TIMEOUT_SECS '{raw}': {e}"))?;
                if secs == 0 {
                    return Err(anyhow!("GEMINI_TIMEOUT_SECS must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Ok(Self {
            api_key,
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout,
        })
    }

    /// Config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
