// Text generation provider and the helpers around it

use std::future::Future;

use crate::error::RecommendError;

pub mod config;
pub mod gemini;
pub mod normalize;
pub mod prompts;

pub use config::AiConfig;
pub use gemini::GeminiClient;

/// A service that turns a prompt into raw completion text.
///
/// The output is untrusted: it may be fenced, truncated or not JSON at all.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str)
        -> impl Future<Output = Result<String, RecommendError>> + Send;

    /// Model identifier actually used for requests.
    fn model(&self) -> &str;

    /// Whether a provider credential is loaded.
    fn has_credentials(&self) -> bool;
}
