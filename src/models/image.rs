use std::path::{Path, PathBuf};

use image::DynamicImage;

/// An input image for editing or reference, either loaded in memory or
/// referenced by path.
#[derive(Debug, Clone)]
pub enum ImageInput {
    Path(PathBuf),
    Image(DynamicImage),
}

impl From<&str> for ImageInput {
    fn from(path: &str) -> Self {
        ImageInput::Path(PathBuf::from(path))
    }
}

impl From<String> for ImageInput {
    fn from(path: String) -> Self {
        ImageInput::Path(PathBuf::from(path))
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        ImageInput::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl From<DynamicImage> for ImageInput {
    fn from(img: DynamicImage) -> Self {
        ImageInput::Image(img)
    }
}

/// File format for persisted output images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    WebP,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }
}

/// A single image-generation request. At least one of `prompt` and
/// `images` must be supplied.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: Option<String>,
    pub images: Vec<ImageInput>,
    pub system: Option<String>,
    pub n: u32,
    pub temperature: f32,
    pub resize_inputs: bool,
    pub save: bool,
    pub webp: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            prompt: None,
            images: Vec::new(),
            system: None,
            n: 1,
            temperature: 1.0,
            resize_inputs: true,
            save: true,
            webp: false,
        }
    }
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        GenerationRequest {
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    /// Starts an image-only request (e.g. "describe and rework these").
    pub fn from_images<I, T>(images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageInput>,
    {
        GenerationRequest {
            images: images.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<ImageInput>) -> Self {
        self.images.push(image.into());
        self
    }

    pub fn with_images<I, T>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageInput>,
    {
        self.images.extend(images.into_iter().map(Into::into));
        self
    }

    /// System instruction sent alongside the prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Number of sequential generations to run and combine.
    pub fn with_n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Persist outputs as WebP instead of PNG.
    pub fn with_webp(mut self, webp: bool) -> Self {
        self.webp = webp;
        self
    }

    pub fn with_resize_inputs(mut self, resize_inputs: bool) -> Self {
        self.resize_inputs = resize_inputs;
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.webp {
            OutputFormat::WebP
        } else {
            OutputFormat::Png
        }
    }
}

/// The outputs of one or more combined generations, owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct ImageGen {
    pub texts: Vec<String>,
    pub images: Vec<DynamicImage>,
    pub image_paths: Vec<PathBuf>,
}

impl ImageGen {
    pub fn new(texts: Vec<String>, images: Vec<DynamicImage>, image_paths: Vec<PathBuf>) -> Self {
        ImageGen {
            texts,
            images,
            image_paths,
        }
    }

    /// First text fragment, for the common single-output case.
    pub fn first_text(&self) -> Option<&str> {
        self.texts.first().map(String::as_str)
    }

    /// First generated image, for the common single-output case.
    pub fn first_image(&self) -> Option<&DynamicImage> {
        self.images.first()
    }

    /// First persisted path, if saving was enabled.
    pub fn first_image_path(&self) -> Option<&Path> {
        self.image_paths.first().map(PathBuf::as_path)
    }

    /// Concatenates image lists and path lists in call order. Texts are
    /// not merged; combined results carry none.
    pub fn combine(mut self, other: ImageGen) -> ImageGen {
        self.images.extend(other.images);
        self.image_paths.extend(other.image_paths);
        ImageGen {
            texts: Vec::new(),
            images: self.images,
            image_paths: self.image_paths,
        }
    }
}
