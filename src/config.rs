use std::env;
use std::net::SocketAddr;

use anyhow::{anyhow, Result};

use crate::ai::config::AiConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rate_limit_per_second: Option<u64>,
    pub ai: AiConfig,
}

impl Config {
    /// Load settings from the process environment and an optional `.env`.
    ///
    /// A missing `GEMINI_API_KEY` is an error here, before the server
    /// listens, rather than on every request.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let raw_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e| anyhow!("invalid BIND_ADDR '{raw_addr}': {e}"))?;
        let rate_limit_per_second = match env::var("API_RATE_LIMIT_PER_SECOND") {
            Ok(raw) => {
                let limit: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow!("invalid API_RATE_LIMIT_PER_SECOND '{raw}': {e}"))?;
                if limit == 0 {
                    return Err(anyhow!(
                        "API_RATE_LIMIT_PER_SECOND must be greater than zero; unset it to disable"
                    ));
                }
                Some(limit)
            }
            Err(_) => None,
        };
        let ai = AiConfig::from_env()?;
        Ok(Self {
            bind_addr,
            rate_limit_per_second,
            ai,
        })
    }
}
