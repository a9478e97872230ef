use gemimg::{GeminiClient, GeminiConfig, GenerationRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    gemimg::logger::init()?;

    let config = GeminiConfig::from_env().with_save_dir("output");
    std::fs::create_dir_all("output")?;
    let client = GeminiClient::new(config)?;

    let request = GenerationRequest::new(
        "A corgi wearing a tiny wizard hat, studio lighting, shallow depth of field",
    )
    .with_temperature(1.0);

    match client.generate(request).await? {
        Some(result) => {
            if let Some(text) = result.first_text() {
                log::info!("📝 Model commentary: {}", text);
            }
            for path in &result.image_paths {
                log::info!("💾 Saved image to {}", path.display());
            }
        }
        None => {
            log::warn!("No result produced (timed out or blocked by moderation)");
        }
    }

    Ok(())
}
