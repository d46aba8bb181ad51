use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use crate::ai::config::AiConfig;
use crate::ai::TextGenerator;
use crate::error::RecommendError;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Holds one HTTP connection pool; clone it freely.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    api_url: String,
    client: Client,
}

impl GeminiClient {
    /// Fails with `Configuration` if the key is blank, so no request can ever
    /// be sent without one.
    pub fn new(config: &AiConfig) -> Result<Self, RecommendError> {
        if config.api_key.trim().is_empty() {
            return Err(RecommendError::Configuration(
                "GEMINI_API_KEY environment variable is not set".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RecommendError::Configuration(e.to_string()))?;
        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/models/{}:generateContent", self.api_url, self.model)
    }

    #[instrument(level = "trace", skip(self, prompt), fields(model = %self.model))]
    async fn generate_content(&self, prompt: &str) -> Result<String, RecommendError> {
        let url = self.endpoint();
        debug!(url, prompt_len = prompt.len(), "sending generateContent request");

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err_text = resp.text().await.unwrap_or_default();
            warn!(%status, model = %self.model, "Gemini API error");
            return Err(RecommendError::Provider(format!(
                "Gemini API error {status}: {err_text}"
            )));
        }

        let raw = resp.text().await?;
        let snippet: String = raw.chars().take(200).collect();
        debug!(snippet = %snippet, "generateContent response body");
        trace!(raw = %raw, "generateContent response");

        let parsed: GenerateResponse = serde_json::from_str(&raw)
            .map_err(|e| RecommendError::Provider(format!("undecodable Gemini response: {e}")))?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| RecommendError::Provider("no response from Gemini API".to_string()))
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, RecommendError> {
        self.generate_content(prompt).await
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AiConfig {
        AiConfig {
            api_url: format!("{}/", server.uri()),
            ..AiConfig::new("test-key")
        }
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = GeminiClient::new(&AiConfig::new("  ")).err().unwrap();
        assert_eq!(err.code(), "configuration_error");
    }

    #[test]
    fn endpoint_uses_configured_model() {
        let mut cfg = AiConfig::new("k");
        cfg.model = "gemini-pro".into();
        cfg.api_url = "http://localhost:9/".into();
        let client = GeminiClient::new(&cfg).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1/models/gemini-pro:generateContent"
        );
        assert_eq!(client.model(), "gemini-pro");
        assert!(client.has_credentials());
    }

    #[tokio::test]
    async fn returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({"contents":[{"parts":[{"text":"hi"}]}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "hello"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config_for(&server)).unwrap();
        assert_eq!(client.generate("hi").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn non_success_status_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config_for(&server)).unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert_eq!(err.code(), "provider_error");
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn missing_candidates_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config_for(&server)).unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("no response from Gemini API"));
    }

    #[tokio::test]
    async fn non_json_body_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config_for(&server)).unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert_eq!(err.code(), "provider_error");
        assert!(err.to_string().contains("undecodable Gemini response"));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_secs(5))
                    .set_body_json(json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let mut cfg = config_for(&server);
        cfg.request_timeout = std::time::Duration::from_millis(100);
        let client = GeminiClient::new(&cfg).unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert_eq!(err.code(), "provider_error");
    }
}
