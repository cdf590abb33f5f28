use crate::common::error::SentimentError;
use crate::pipelines::presentation::{image_mime_type, BackgroundImage};
use crate::pipelines::sentiment::SentimentConfig;
use crate::resources::resource_from_location;
use crate::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tch::Device;

/// Cache subdirectory of the remote artifacts
const CACHE_SUBDIR: &str = "imdb-gru";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// # Device the model is placed on
pub enum DeviceOption {
    Cpu,
    Cuda,
}

impl Default for DeviceOption {
    fn default() -> Self {
        DeviceOption::Cpu
    }
}

impl From<DeviceOption> for Device {
    fn from(device: DeviceOption) -> Self {
        match device {
            DeviceOption::Cpu => Device::Cpu,
            DeviceOption::Cuda => Device::Cuda(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// # Server configuration
/// Artifact locations (local paths or `http(s)` URLs) and listening address.
///
/// ```json
/// {
///   "model_config": "resources/config.json",
///   "model_weights": "resources/model.ot",
///   "vocabulary": "resources/tokenizer.json",
///   "background_image": "resources/background.jpg",
///   "address": "127.0.0.1:8501"
/// }
/// ```
pub struct ServerConfig {
    pub model_config: String,
    pub model_weights: String,
    pub vocabulary: String,
    pub background_image: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub device: DeviceOption,
}

fn default_address() -> String {
    "127.0.0.1:8501".to_string()
}

impl Config for ServerConfig {}

impl ServerConfig {
    /// Resources of the sentiment context
    pub fn sentiment_config(&self) -> Result<SentimentConfig, SentimentError> {
        Ok(SentimentConfig {
            config_resource: resource_from_location(&self.model_config, CACHE_SUBDIR)?,
            model_resource: resource_from_location(&self.model_weights, CACHE_SUBDIR)?,
            vocabulary_resource: resource_from_location(&self.vocabulary, CACHE_SUBDIR)?,
            device: self.device.into(),
        })
    }

    /// Loads the background image. The MIME type is taken from the configured location since
    /// cached downloads do not keep their extension.
    pub fn background(&self) -> Result<BackgroundImage, SentimentError> {
        let mime_type = image_mime_type(Path::new(&self.background_image))?;
        let local_path =
            resource_from_location(&self.background_image, CACHE_SUBDIR)?.get_local_path()?;
        BackgroundImage::from_file_with_mime_type(local_path, mime_type)
    }
}
