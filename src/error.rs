use thiserror::Error;

#[derive(Debug, Error)]
pub enum GemImgError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("request error: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response shape: {0}")]
    Response(String),
    #[error("image codec error: {0}")]
    Codec(String),
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, GemImgError>;
