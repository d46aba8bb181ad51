use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while producing a shopping list.
///
/// Each variant maps to exactly one machine-readable code and one HTTP status,
/// so every handler reports failures the same way.
#[derive(Debug, Clone, Error)]
pub enum RecommendError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("generation failed: {0}")]
    Provider(String),
    #[error("model returned malformed JSON: {0}")]
    MalformedOutput(String),
    #[error("model output does not match the list schema: {0}")]
    SchemaMismatch(String),
    #[error("rate limit exceeded")]
    RateLimited,
}

impl RecommendError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Provider(_) => "provider_error",
            Self::MalformedOutput(_) => "malformed_output",
            Self::SchemaMismatch(_) => "schema_mismatch",
            Self::RateLimited => "rate_limited",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Provider(_) | Self::MalformedOutput(_) | Self::SchemaMismatch(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl From<reqwest::Error> for RecommendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Provider(err.to_string())
    }
}
