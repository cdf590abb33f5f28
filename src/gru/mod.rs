//! # GRU sentiment classifier
//!
//! Recurrent binary classifier trained on IMDB reviews: token embeddings, a GRU and a dense
//! sigmoid unit returning the probability that a review is positive.
//! The model is consumed as a pre-trained artifact made of:
//! - a configuration file (`GruSentimentConfig`, JSON)
//! - the weights, in the `.ot` format produced by `convert-tensor`
//!
//! ```no_run
//! use imdb_sentiment::gru::GruSentimentModel;
//! use imdb_sentiment::pipelines::padding::pad_review;
//! use imdb_sentiment::pipelines::sentiment::SentimentScorer;
//! use imdb_sentiment::resources::LocalResource;
//! use std::path::PathBuf;
//! use tch::Device;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config_resource = LocalResource::from(PathBuf::from("path/to/config.json"));
//! let weights_resource = LocalResource::from(PathBuf::from("path/to/model.ot"));
//! let model = GruSentimentModel::new(&config_resource, &weights_resource, Device::Cpu)?;
//! let score = model.score(&pad_review(&[11, 6, 3, 1038]))?;
//! # Ok(())
//! # }
//! ```

mod conversion;
mod gru_model;

pub use conversion::keras_to_torch_layout;
pub use gru_model::{GruSentimentClassifier, GruSentimentConfig, GruSentimentModel};
