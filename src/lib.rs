use anyhow::Result;
use dotenvy::dotenv;

pub mod ai;
pub mod api;
pub mod config;
pub mod error;
pub mod list;
pub mod recommend;
pub mod system_info;
pub mod tests {
    pub mod util;
}

pub use ai::{AiConfig, GeminiClient, TextGenerator};
pub use api::{router as api_router, ApiConfig};
pub use config::Config;
pub use error::RecommendError;
pub use list::{FallbackList, ShoppingList};
pub use system_info::get_system_info;

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting TotsyList list generator ({})", get_system_info());

    let config = Config::from_env()?;
    let generator = GeminiClient::new(&config.ai)?;
    tracing::info!(model = %config.ai.model, "Generation provider configured");

    let app = api_router(
        generator,
        ApiConfig {
            rate_limit_per_second: config.rate_limit_per_second,
        },
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
