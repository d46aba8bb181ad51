use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Extension, State},
    http::{HeaderName, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::ai::TextGenerator;
use crate::error::RecommendError;
use crate::list::FallbackList;
use crate::recommend::generate_shopping_list;
use crate::system_info::get_system_info;

pub const GENERATE_LIST_PATH: &str = "/api/generate-list";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    user_input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(rename = "where")]
    pub location: String,
    pub has_api_key: bool,
    pub model: String,
    pub version: String,
}

#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    pub rate_limit_per_second: Option<u64>,
}

#[derive(Clone, Debug)]
struct RequestContext {
    request_id: String,
}

struct AppState<G> {
    generator: Arc<G>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
        }
    }
}

#[derive(Debug)]
struct RateLimiter {
    limit: u64,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

pub fn router<G>(generator: G, config: ApiConfig) -> Router
where
    G: TextGenerator + 'static,
{
    let state = AppState {
        generator: Arc::new(generator),
    };
    let request_id_layer = middleware::from_fn(assign_request_id);
    let mut router = Router::new()
        .route(
            GENERATE_LIST_PATH,
            get(health::<G>).post(generate_list::<G>),
        )
        .with_state(state);

    if let Some(rate_limit) = config.rate_limit_per_second {
        let limiter = Arc::new(RateLimiter {
            limit: rate_limit,
            window: Duration::from_secs(1),
            timestamps: Mutex::new(VecDeque::new()),
        });
        let rate_limit_layer = middleware::from_fn_with_state(limiter, rate_limit_requests);
        router = router.layer(rate_limit_layer);
    }

    router.layer(request_id_layer)
}

async fn health<G: TextGenerator + 'static>(State(state): State<AppState<G>>) -> Response {
    let response = HealthResponse {
        ok: true,
        location: GENERATE_LIST_PATH.to_string(),
        has_api_key: state.generator.has_credentials(),
        model: state.generator.model().to_string(),
        version: get_system_info(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn generate_list<G: TextGenerator + 'static>(
    State(state): State<AppState<G>>,
    Extension(request): Extension<RequestContext>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let err = RecommendError::InvalidRequest(rejection.body_text());
            tracing::debug!(request_id = %request.request_id, error = %err, "Rejected request body");
            return err.into_response();
        }
    };

    tracing::debug!(
        request_id = %request.request_id,
        model = state.generator.model(),
        input_len = payload.user_input.len(),
        "Generating shopping list"
    );

    match generate_shopping_list(state.generator.as_ref(), &payload.user_input).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(err) => {
            tracing::error!(
                request_id = %request.request_id,
                model = state.generator.model(),
                code = err.code(),
                error = %err,
                "Failed to generate shopping list"
            );
            err.into_response()
        }
    }
}

impl IntoResponse for RecommendError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(FallbackList::from(&self))).into_response()
    }
}

async fn assign_request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });
    let method = req.method().clone();
    let uri = req.uri().clone();
    let mut response = next.run(req).await;
    let status = response.status();
    let header_value = match request_id.parse() {
        Ok(value) => value,
        Err(_) => {
            return response;
        }
    };
    response
        .headers_mut()
        .insert(HeaderName::from_static("x-request-id"), header_value);
    tracing::debug!(
        request_id,
        method = %method,
        uri = %uri,
        status = %status,
        "API request completed"
    );
    response
}

async fn rate_limit_requests(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.as_str())
        .unwrap_or("unknown");
    let now = Instant::now();
    let mut timestamps = limiter.timestamps.lock().await;
    while let Some(ts) = timestamps.front() {
        if now.duration_since(*ts) >= limiter.window {
            timestamps.pop_front();
        } else {
            break;
        }
    }

    if timestamps.len() as u64 >= limiter.limit {
        tracing::debug!(request_id, "API rate limit exceeded");
        return RecommendError::RateLimited.into_response();
    }
    timestamps.push_back(now);
    drop(timestamps);
    next.run(req).await
}
