//! # Sentiment pipeline
//!
//! `analyze` runs one review through the tokenizer, the padder and the model, then maps the score
//! to what is displayed:
//!
//! ```no_run
//! use imdb_sentiment::pipelines::sentiment::{analyze, SentimentConfig, SentimentContext};
//! use imdb_sentiment::resources::LocalResource;
//! use std::path::PathBuf;
//! # fn main() -> anyhow::Result<()> {
//! let context = SentimentContext::new(SentimentConfig::new(
//!     Box::new(LocalResource::from(PathBuf::from("path/to/config.json"))),
//!     Box::new(LocalResource::from(PathBuf::from("path/to/model.ot"))),
//!     Box::new(LocalResource::from(PathBuf::from("path/to/tokenizer.json"))),
//! ))?;
//! let output = analyze("This movie was a masterpiece, I loved every second.", &context)?;
//! # Ok(())
//! # }
//! ```
//! Output: \
//! `Sentiment(Sentiment { polarity: Positive, score: 0.92, confidence: 0.92, confidence_percent: 92 })`

pub mod padding;
pub mod presentation;
pub mod sentiment;
