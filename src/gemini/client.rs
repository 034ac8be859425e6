use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use super::error::GeminiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Anything that can answer a `generateContent` call. Implemented by
/// [`GeminiClient`] and by in-memory fakes in tests.
pub trait ContentGenerator {
    fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, GeminiError>> + Send;
}

pub struct GeminiClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// `base_url` is the API root, e.g. `https://generativelanguage.googleapis.com`.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            api_key,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

impl ContentGenerator for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.endpoint(model);
        tracing::debug!(%url, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(req)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok()?.parse::<u64>().ok())
                .map_or(1000, |secs| secs.saturating_mul(1000));
            return Err(GeminiError::RateLimited { retry_after_ms });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::with_base_url("test-key".into(), server.uri()).unwrap()
    }

    #[tokio::test]
    async fn posts_to_model_endpoint_with_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "status?"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "All good."}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server)
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::prompt("status?"))
            .await
            .unwrap();
        assert_eq!(resp.text(), "All good.");
    }

    #[tokio::test]
    async fn maps_429_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeminiError::RateLimited {
                retry_after_ms: 7000
            }
        ));
    }

    #[tokio::test]
    async fn huge_retry_after_saturates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "99999999999999999"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GeminiError::RateLimited {
                retry_after_ms: u64::MAX
            }
        ));
    }

    #[tokio::test]
    async fn maps_error_status_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::prompt("x"))
            .await
            .unwrap_err();
        match err {
            GeminiError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("gemini-2.5-flash", &GenerateContentRequest::prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::NetworkError(_)));
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let client = GeminiClient::with_base_url("k".into(), "http://localhost:9/".into()).unwrap();
        assert_eq!(
            client.endpoint("m"),
            "http://localhost:9/v1beta/models/m:generateContent"
        );
    }
}
