use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub save_dir: Option<PathBuf>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: None,
            timeout_secs: None,
            save_dir: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads configuration from the environment, loading a `.env` file
    /// first if one is present. Recognized variables: `GEMINI_API_KEY`
    /// and `GEMINI_MODEL`.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let model = env::var("GEMINI_MODEL").ok().filter(|m| !m.is_empty());

        GeminiConfig {
            api_key,
            model,
            timeout_secs: None,
            save_dir: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Directory where generated images are written. Defaults to the
    /// process working directory.
    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(save_dir.into());
        self
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::new();
        assert!(config.api_key.is_none());
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert!(config.save_dir.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = GeminiConfig::new()
            .with_api_key("test-key")
            .with_model("gemini-3-pro-image-preview")
            .with_timeout_secs(30)
            .with_save_dir("/tmp/out");

        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.model(), "gemini-3-pro-image-preview");
        assert_eq!(config.timeout_secs(), 30);
        assert_eq!(config.save_dir, Some(PathBuf::from("/tmp/out")));
    }
}
