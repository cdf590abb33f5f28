use tch::TchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("Endpoint not available error: {0}")]
    FileDownloadError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Tch tensor error: {0}")]
    TchError(String),

    #[error("Vocabulary error: {0}")]
    VocabularyError(String),

    #[error("Invalid configuration error: {0}")]
    InvalidConfigurationError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

#[cfg(feature = "remote")]
impl From<cached_path::Error> for SentimentError {
    fn from(error: cached_path::Error) -> Self {
        SentimentError::FileDownloadError(error.to_string())
    }
}

impl From<std::io::Error> for SentimentError {
    fn from(error: std::io::Error) -> Self {
        SentimentError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for SentimentError {
    fn from(error: serde_json::Error) -> Self {
        SentimentError::InvalidConfigurationError(error.to_string())
    }
}

impl From<TchError> for SentimentError {
    fn from(error: TchError) -> Self {
        SentimentError::TchError(error.to_string())
    }
}
