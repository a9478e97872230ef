use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{GemImgError, Result},
    models::{GenerateContentRequest, GenerateContentResponse},
};

pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// One generateContent exchange against the provider.
///
/// `Ok(None)` signals a request timeout; callers treat it as "no result"
/// rather than an error so batch loops keep going.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, body: &GenerateContentRequest)
        -> Result<Option<GenerateContentResponse>>;
}

pub struct HttpTransport {
    http: Client,
    api_key: String,
    model: String,
}

impl HttpTransport {
    /// One HTTP connection per client instance; credentials and
    /// connection state are never shared across instances.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GemImgError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<Option<GenerateContentResponse>> {
        log::info!("Invoking model: {}", self.model);

        // The key travels in a header, never in the URL.
        let response = match self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                log::warn!("generateContent request to {} timed out", self.model);
                return Ok(None);
            }
            Err(e) => return Err(GemImgError::Network(format!("request failed: {}", e))),
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log::error!("generateContent returned HTTP {}: {}", status, message);
            return Err(GemImgError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GemImgError::Response(format!("malformed response body: {}", e)))?;

        Ok(Some(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model() {
        let transport = HttpTransport::new(
            "test-key".to_string(),
            "gemini-2.5-flash-image".to_string(),
            Duration::from_secs(120),
        )
        .unwrap();

        assert_eq!(
            transport.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }
}
