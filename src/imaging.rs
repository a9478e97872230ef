use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage, ImageFormat};

use crate::{
    error::{GemImgError, Result},
    models::ImageInput,
};

/// Mime type for outbound image parts. Inputs are always re-encoded to
/// WebP regardless of their original format.
pub const IMAGE_MIME: &str = "image/webp";

/// Longer-side cap applied to input images before encoding.
pub const MAX_INPUT_DIMENSION: u32 = 768;

/// Scales the image uniformly so its longer side equals `max_dimension`,
/// preserving aspect ratio. Images already within the cap are returned
/// unchanged; there is no upscaling.
pub fn resize_to_fit(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if width.max(height) <= max_dimension {
        return img;
    }

    let scale_factor = if width > height {
        max_dimension as f64 / width as f64
    } else {
        max_dimension as f64 / height as f64
    };

    let new_width = (width as f64 * scale_factor) as u32;
    let new_height = (height as f64 * scale_factor) as u32;
    img.resize_exact(new_width.max(1), new_height.max(1), FilterType::Lanczos3)
}

/// Encodes an input image (or path to one) as a standard base64 string,
/// re-encoded to WebP in memory. When `resize` is true the image is first
/// scaled down to [`MAX_INPUT_DIMENSION`].
pub fn encode_base64(input: &ImageInput, resize: bool) -> Result<String> {
    let img = match input {
        ImageInput::Path(path) => image::open(path).map_err(|e| {
            GemImgError::Codec(format!("failed to read image {}: {}", path.display(), e))
        })?,
        ImageInput::Image(img) => img.clone(),
    };

    let img = if resize {
        resize_to_fit(img, MAX_INPUT_DIMENSION)
    } else {
        img
    };

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.to_rgba8())
        .write_to(&mut buffer, ImageFormat::WebP)
        .map_err(|e| GemImgError::Codec(format!("failed to encode image as WebP: {}", e)))?;

    Ok(STANDARD.encode(buffer.into_inner()))
}

/// Decodes a base64 string into an in-memory image, inferring the format
/// from the decoded bytes.
pub fn decode_base64(data: &str) -> Result<DynamicImage> {
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| GemImgError::Codec(format!("failed to decode base64 image data: {}", e)))?;

    image::load_from_memory(&bytes)
        .map_err(|e| GemImgError::Codec(format!("failed to parse image bytes: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        }))
    }

    #[test]
    fn test_resize_skips_small_images() {
        let img = gradient(640, 480);
        let resized = resize_to_fit(img, MAX_INPUT_DIMENSION);
        assert_eq!(resized.width(), 640);
        assert_eq!(resized.height(), 480);
    }

    #[test]
    fn test_resize_caps_longer_side() {
        let landscape = resize_to_fit(gradient(1000, 500), 768);
        assert_eq!((landscape.width(), landscape.height()), (768, 384));

        let portrait = resize_to_fit(gradient(500, 1000), 768);
        assert_eq!((portrait.width(), portrait.height()), (384, 768));
    }

    #[test]
    fn test_resize_preserves_aspect_ratio() {
        let resized = resize_to_fit(gradient(1234, 567), 768);
        assert_eq!(resized.width(), 768);
        let expected_height = (567u64 * 768 / 1234) as i64;
        assert!((resized.height() as i64 - expected_height).abs() <= 1);
    }

    #[test]
    fn test_base64_round_trip() {
        let img = gradient(32, 20);
        let encoded = encode_base64(&ImageInput::Image(img.clone()), false).unwrap();
        let decoded = decode_base64(&encoded).unwrap();

        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 20);
        // WebP encoding here is lossless, so pixels survive intact.
        assert_eq!(decoded.to_rgba8().into_raw(), img.to_rgba8().into_raw());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let err = decode_base64("not-base64!").unwrap_err();
        assert!(matches!(err, GemImgError::Codec(_)));
    }

    #[test]
    fn test_decode_rejects_non_image_bytes() {
        let encoded = STANDARD.encode(b"plain text, not an image");
        let err = decode_base64(&encoded).unwrap_err();
        assert!(matches!(err, GemImgError::Codec(_)));
    }
}
