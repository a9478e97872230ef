//! Lightweight client for generating and editing images with Gemini's
//! multimodal `generateContent` endpoint.
//!
//! ```no_run
//! use gemimg::{GeminiClient, GenerationRequest};
//!
//! # async fn run() -> gemimg::Result<()> {
//! let client = GeminiClient::from_env()?;
//! let result = client
//!     .generate(GenerationRequest::new("a corgi wearing a wizard hat"))
//!     .await?;
//!
//! if let Some(result) = result {
//!     println!("saved: {:?}", result.image_paths);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod imaging;
pub mod logger;
pub mod models;

pub use config::GeminiConfig;
pub use error::{GemImgError, Result};
pub use gemini::{GeminiClient, HttpTransport, ImageClient, Transport};
pub use models::{GenerationRequest, ImageGen, ImageInput, OutputFormat};
