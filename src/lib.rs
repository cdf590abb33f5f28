//! Movie review sentiment classification with a single-page web front-end.
//!
//! A review goes through four stages:
//! - [`tokenizer`]: encodes the text with the vocabulary fitted at training time
//! - [`pipelines::padding`]: pads or truncates the sequence to 200 tokens
//! - [`gru`]: scores the sequence with the pre-trained GRU classifier (`tch`)
//! - [`pipelines::presentation`]: turns the score into a label, a confidence and HTML
//!
//! [`pipelines::sentiment::analyze`] runs the whole path for one review, [`server`] serves it over HTTP.
//!
//! ```no_run
//! use imdb_sentiment::pipelines::sentiment::{analyze, SentimentConfig, SentimentContext};
//! use imdb_sentiment::resources::LocalResource;
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let context = SentimentContext::new(SentimentConfig::new(
//!     Box::new(LocalResource::from(PathBuf::from("resources/config.json"))),
//!     Box::new(LocalResource::from(PathBuf::from("resources/model.ot"))),
//!     Box::new(LocalResource::from(PathBuf::from("resources/tokenizer.json"))),
//! ))?;
//! let render_model = analyze("Terrible, boring, waste of time.", &context)?;
//! println!("{}", render_model.to_html());
//! # Ok(())
//! # }
//! ```

mod common;
pub mod gru;
pub mod pipelines;
pub mod server;
pub mod tokenizer;

pub use common::error::SentimentError;
pub use common::resources;
pub use common::Config;
