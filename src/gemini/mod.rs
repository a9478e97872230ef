pub mod image_client;
pub mod transport;

use std::time::Duration;

use crate::{
    config::GeminiConfig,
    error::{GemImgError, Result},
    models::{GenerationRequest, ImageGen},
};

pub use image_client::ImageClient;
pub use transport::{HttpTransport, Transport};

/// Entry point for the library. Owns the HTTP transport and the image
/// generation client built on top of it.
pub struct GeminiClient {
    image_client: ImageClient,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient").finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Builds a client from the given configuration. The API key is
    /// required; construction fails without one.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                GemImgError::Config(
                    "Gemini API key is required (set GEMINI_API_KEY or use with_api_key)".into(),
                )
            })?;

        let transport = HttpTransport::new(
            api_key,
            config.model().to_string(),
            Duration::from_secs(config.timeout_secs()),
        )?;

        Ok(Self {
            image_client: ImageClient::new(Box::new(transport), config.save_dir),
        })
    }

    /// Builds a client configured from the environment (and `.env`).
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    /// Convenience passthrough to [`ImageClient::generate`].
    pub async fn generate(&self, request: GenerationRequest) -> Result<Option<ImageGen>> {
        self.image_client.generate(request).await
    }
}
