use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::{
    error::{GemImgError, Result},
    imaging,
    models::{
        Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
        GenerationRequest, ImageGen, OutputFormat, Part, SystemInstruction, PROHIBITED_CONTENT,
    },
};

use super::transport::Transport;

pub struct ImageClient {
    transport: Box<dyn Transport>,
    save_dir: Option<PathBuf>,
}

impl ImageClient {
    pub fn new(transport: Box<dyn Transport>, save_dir: Option<PathBuf>) -> Self {
        Self {
            transport,
            save_dir,
        }
    }

    /// Runs `request.n` sequential generations and folds the results
    /// together. Returns `Ok(None)` when no generation produced a result
    /// (timed out or rejected by content moderation).
    pub async fn generate(&self, request: GenerationRequest) -> Result<Option<ImageGen>> {
        validate(&request)?;

        let mut combined: Option<ImageGen> = None;
        for round in 0..request.n {
            if request.n > 1 {
                log::info!("Running generation {}/{}", round + 1, request.n);
            }

            // A round yielding nothing contributes nothing; the batch
            // continues with whatever earlier rounds accumulated.
            combined = match (combined, self.generate_once(&request).await?) {
                (None, outcome) => outcome,
                (Some(acc), Some(result)) => Some(acc.combine(result)),
                (acc, None) => acc,
            };
        }

        Ok(combined)
    }

    async fn generate_once(&self, request: &GenerationRequest) -> Result<Option<ImageGen>> {
        let body = build_body(request)?;

        let Some(response) = self.transport.send(&body).await? else {
            return Ok(None);
        };

        self.collect_outputs(response, request)
    }

    fn collect_outputs(
        &self,
        response: GenerateContentResponse,
        request: &GenerationRequest,
    ) -> Result<Option<ImageGen>> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GemImgError::Response("response contained no candidates".into()))?;

        if candidate.finish_reason.as_deref() == Some(PROHIBITED_CONTENT) {
            log::warn!(
                "generation rejected by content moderation (finishReason = {})",
                PROHIBITED_CONTENT
            );
            return Ok(None);
        }

        let mut texts = Vec::new();
        let mut images = Vec::new();

        if let Some(content) = candidate.content {
            for part in content.parts {
                match (part.text, part.inline_data) {
                    (Some(text), _) if !text.is_empty() => texts.push(text),
                    (_, Some(inline)) => images.push(imaging::decode_base64(&inline.data)?),
                    _ => {}
                }
            }
        }

        let image_paths = if request.save && !images.is_empty() {
            let response_id = response.response_id.as_deref().ok_or_else(|| {
                GemImgError::Response("response is missing responseId, required for saving".into())
            })?;
            self.persist(&images, response_id, request.output_format())?
        } else {
            Vec::new()
        };

        Ok(Some(ImageGen::new(texts, images, image_paths)))
    }

    /// Writes decoded images to the save directory. A single image is
    /// named `{responseId}.{ext}`; multiple images get a zero-based
    /// `-{index}` suffix in output order.
    fn persist(
        &self,
        images: &[DynamicImage],
        response_id: &str,
        format: OutputFormat,
    ) -> Result<Vec<PathBuf>> {
        let dir = self
            .save_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let mut paths = Vec::with_capacity(images.len());
        for (index, img) in images.iter().enumerate() {
            let file_name = if images.len() == 1 {
                format!("{}.{}", response_id, format.extension())
            } else {
                format!("{}-{}.{}", response_id, index, format.extension())
            };

            let path = dir.join(file_name);
            write_image(img, &path, format)?;
            log::info!("Saved image to {}", path.display());
            paths.push(path);
        }

        Ok(paths)
    }
}

fn validate(request: &GenerationRequest) -> Result<()> {
    let prompt_empty = request
        .prompt
        .as_deref()
        .map_or(true, |p| p.trim().is_empty());

    if prompt_empty && request.images.is_empty() {
        return Err(GemImgError::Request(
            "a prompt or at least one input image is required".into(),
        ));
    }
    if request.n == 0 {
        return Err(GemImgError::Request("n must be at least 1".into()));
    }
    if request.n > 1 && request.temperature == 0.0 {
        return Err(GemImgError::Request(
            "repeated generation with temperature 0 would produce identical results".into(),
        ));
    }

    Ok(())
}

/// Assembles the provider payload: image parts first, in input order,
/// then one trailing text part with the trimmed prompt.
fn build_body(request: &GenerationRequest) -> Result<GenerateContentRequest> {
    let mut parts = Vec::with_capacity(request.images.len() + 1);

    for image in &request.images {
        let encoded = imaging::encode_base64(image, request.resize_inputs)?;
        parts.push(Part::inline_image(encoded));
    }

    if let Some(prompt) = request.prompt.as_deref() {
        let prompt = prompt.trim();
        if !prompt.is_empty() {
            parts.push(Part::text(prompt));
        }
    }

    let system_instruction = request.system.as_deref().map(|system| SystemInstruction {
        parts: vec![Part::text(system.trim())],
    });

    Ok(GenerateContentRequest {
        generation_config: GenerationConfig {
            temperature: request.temperature,
        },
        system_instruction,
        contents: vec![Content { parts }],
    })
}

fn write_image(img: &DynamicImage, path: &Path, format: OutputFormat) -> Result<()> {
    let result = match format {
        OutputFormat::Png => img.save_with_format(path, image::ImageFormat::Png),
        // The WebP encoder only accepts 8-bit RGB(A) pixel data.
        OutputFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8())
            .save_with_format(path, image::ImageFormat::WebP),
    };

    result.map_err(|e| GemImgError::Io(format!("failed to write {}: {}", path.display(), e)))
}
