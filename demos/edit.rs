use gemimg::{GeminiClient, GeminiConfig, GenerationRequest};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    gemimg::logger::init()?;

    let input = env::args()
        .nth(1)
        .unwrap_or_else(|| "input.png".to_string());
    log::info!("✏️  Editing {}", input);

    let client = GeminiClient::new(GeminiConfig::from_env())?;

    let request = GenerationRequest::new("Repaint this image in a watercolor style")
        .with_image(input.as_str())
        .with_system("Preserve the original composition")
        .with_webp(true);

    match client.generate(request).await? {
        Some(result) => {
            for path in &result.image_paths {
                log::info!("💾 Saved edited image to {}", path.display());
            }
        }
        None => {
            log::warn!("No result produced (timed out or blocked by moderation)");
        }
    }

    Ok(())
}
