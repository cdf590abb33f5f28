// Copyright 2019 Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Sentiment Analysis pipeline
//! Predicts the binary sentiment of a movie review. The review is encoded with the vocabulary the
//! model was trained with, padded to 200 tokens and scored by a GRU classifier returning the
//! probability of a positive review.
//!
//! ```no_run
//! use imdb_sentiment::pipelines::sentiment::{analyze, SentimentConfig, SentimentContext};
//! use imdb_sentiment::resources::LocalResource;
//! use std::path::PathBuf;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SentimentConfig::new(
//!     Box::new(LocalResource::from(PathBuf::from("path/to/config.json"))),
//!     Box::new(LocalResource::from(PathBuf::from("path/to/model.ot"))),
//!     Box::new(LocalResource::from(PathBuf::from("path/to/tokenizer.json"))),
//! );
//! let context = SentimentContext::new(config)?;
//! let output = analyze("This movie was a masterpiece, I loved every second.", &context)?;
//! # Ok(())
//! # }
//! ```
//!
//! Output: \
//! ```no_run
//! # use imdb_sentiment::pipelines::presentation::RenderModel;
//! # use imdb_sentiment::pipelines::sentiment::Sentiment;
//! # use imdb_sentiment::pipelines::sentiment::SentimentPolarity::Positive;
//! # let output =
//! RenderModel::Sentiment(Sentiment {
//!     polarity: Positive,
//!     score: 0.92,
//!     confidence: 0.92,
//!     confidence_percent: 92,
//! })
//! # ;
//! ```

use crate::common::error::SentimentError;
use crate::gru::GruSentimentModel;
use crate::pipelines::padding::{pad_review, PaddedSequence};
use crate::pipelines::presentation::{RenderModel, EMPTY_REVIEW_WARNING};
use crate::resources::ResourceProvider;
use crate::tokenizer::{ReviewTokenizer, Vocabulary};
use serde::{Deserialize, Serialize};
use tch::Device;
use tracing::{debug, warn};

/// Scores at or above this value are positive
pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Enum with the possible sentiment polarities. The model is a binary classifier without neutral class.
pub enum SentimentPolarity {
    Positive,
    Negative,
}

impl SentimentPolarity {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentPolarity::Positive => "Positive",
            SentimentPolarity::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Sentiment derived from a Prediction Score.
pub struct Sentiment {
    /// Polarity of the sentiment
    pub polarity: SentimentPolarity,
    /// Probability of a positive review returned by the model
    pub score: f64,
    /// Probability of the predicted polarity, always at least 0.5
    pub confidence: f64,
    /// Confidence as a truncated percentage in [50, 100]
    pub confidence_percent: u8,
}

impl Sentiment {
    /// Builds the sentiment for a validated score in [0, 1].
    ///
    /// # Example
    ///
    /// ```
    /// use imdb_sentiment::pipelines::sentiment::{Sentiment, SentimentPolarity};
    /// let sentiment = Sentiment::from_score(0.08);
    /// assert_eq!(sentiment.polarity, SentimentPolarity::Negative);
    /// assert_eq!(sentiment.confidence_percent, 92);
    /// ```
    pub fn from_score(score: f64) -> Sentiment {
        let (polarity, confidence) = if score >= DECISION_THRESHOLD {
            (SentimentPolarity::Positive, score)
        } else {
            (SentimentPolarity::Negative, 1.0 - score)
        };
        let confidence_percent = (confidence * 100.0).floor() as u8;
        Sentiment {
            polarity,
            score,
            confidence,
            confidence_percent,
        }
    }
}

/// # Sentiment Model interface
/// A pre-trained binary classifier returning the probability that a review is positive.
pub trait SentimentScorer {
    /// Runs one forward pass on a Padded Sequence and returns the raw model output.
    fn score(&self, input: &PaddedSequence) -> Result<f64, SentimentError>;
}

/// Checks the raw model output against the single scalar in [0, 1] contract.
/// Non-finite values are rejected, finite values outside the range are clamped.
pub fn validate_score(raw_score: f64) -> Result<f64, SentimentError> {
    if !raw_score.is_finite() {
        return Err(SentimentError::InferenceError(format!(
            "model returned a non-finite score: {}",
            raw_score
        )));
    }
    if !(0.0..=1.0).contains(&raw_score) {
        warn!(raw_score, "model score outside of [0, 1], clamping");
    }
    Ok(raw_score.max(0.0).min(1.0))
}

/// # Configuration for the sentiment context
/// Contains the resources of the model (configuration, weights), of the tokenizer (vocabulary)
/// and the device placement (CPU/GPU).
pub struct SentimentConfig {
    /// Model configuration resource (GRU dimensions)
    pub config_resource: Box<dyn ResourceProvider>,
    /// Model weights resource
    pub model_resource: Box<dyn ResourceProvider>,
    /// Tokenizer artifact resource
    pub vocabulary_resource: Box<dyn ResourceProvider>,
    /// Device to place the model on (default: CPU)
    pub device: Device,
}

impl SentimentConfig {
    /// Instantiate a new sentiment configuration on CPU.
    ///
    /// # Arguments
    ///
    /// * `config_resource` - The `ResourceProvider` pointing to the model configuration to load (e.g. config.json)
    /// * `model_resource` - The `ResourceProvider` pointing to the model weights to load (e.g. model.ot)
    /// * `vocabulary_resource` - The `ResourceProvider` pointing to the tokenizer artifact to load (e.g. tokenizer.json)
    pub fn new(
        config_resource: Box<dyn ResourceProvider>,
        model_resource: Box<dyn ResourceProvider>,
        vocabulary_resource: Box<dyn ResourceProvider>,
    ) -> SentimentConfig {
        SentimentConfig {
            config_resource,
            model_resource,
            vocabulary_resource,
            device: Device::Cpu,
        }
    }
}

/// # Sentiment context
/// Immutable tokenizer and model pair, built once at startup and shared by reference with every
/// analyze action.
pub struct SentimentContext<M = GruSentimentModel> {
    tokenizer: ReviewTokenizer,
    model: M,
}

impl SentimentContext<GruSentimentModel> {
    /// Load the vocabulary and the model described by `config`. Any missing or corrupt artifact is
    /// returned as an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use imdb_sentiment::pipelines::sentiment::{SentimentConfig, SentimentContext};
    /// use imdb_sentiment::resources::LocalResource;
    /// use std::path::PathBuf;
    ///
    /// let config = SentimentConfig::new(
    ///     Box::new(LocalResource::from(PathBuf::from("path/to/config.json"))),
    ///     Box::new(LocalResource::from(PathBuf::from("path/to/model.ot"))),
    ///     Box::new(LocalResource::from(PathBuf::from("path/to/tokenizer.json"))),
    /// );
    /// let context = SentimentContext::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: SentimentConfig) -> Result<SentimentContext, SentimentError> {
        let vocabulary_path = config.vocabulary_resource.get_local_path()?;
        let vocabulary = Vocabulary::from_file(vocabulary_path)?;
        let model = GruSentimentModel::new(
            config.config_resource.as_ref(),
            config.model_resource.as_ref(),
            config.device,
        )?;
        Ok(SentimentContext::with_model(
            ReviewTokenizer::new(vocabulary),
            model,
        ))
    }
}

impl<M: SentimentScorer> SentimentContext<M> {
    /// Build a context from an existing tokenizer and any `SentimentScorer`.
    pub fn with_model(tokenizer: ReviewTokenizer, model: M) -> SentimentContext<M> {
        SentimentContext { tokenizer, model }
    }

    pub fn tokenizer(&self) -> &ReviewTokenizer {
        &self.tokenizer
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Tokenizes, pads and scores a review.
    ///
    /// # Returns
    /// * `Sentiment` derived from the validated model score
    pub fn predict(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let input_sequence = self.tokenizer.encode(text);
        let padded_sequence = pad_review(&input_sequence);
        debug!(
            tokens = input_sequence.len(),
            kept = padded_sequence.content_len(),
            "scoring review"
        );
        let score = validate_score(self.model.score(&padded_sequence)?)?;
        Ok(Sentiment::from_score(score))
    }
}

/// Runs one analyze action.
///
/// A review that is empty once trimmed produces a warning without invoking the tokenizer or the
/// model. Any other review is scored and turned into a sentiment to display.
///
/// # Arguments
///
/// * `text` - raw review entered by the user
/// * `context` - `SentimentContext` loaded at startup
///
/// # Returns
/// * `RenderModel` to display
pub fn analyze<M: SentimentScorer>(
    text: &str,
    context: &SentimentContext<M>,
) -> Result<RenderModel, SentimentError> {
    if text.trim().is_empty() {
        return Ok(RenderModel::Warning(EMPTY_REVIEW_WARNING.to_string()));
    }
    Ok(RenderModel::Sentiment(context.predict(text)?))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn non_finite_scores_are_rejected() {
        assert!(validate_score(f64::NAN).is_err());
        assert!(validate_score(f64::INFINITY).is_err());
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        assert_eq!(validate_score(1.2).unwrap(), 1.0);
        assert_eq!(validate_score(-0.1).unwrap(), 0.0);
        assert_eq!(validate_score(0.25).unwrap(), 0.25);
    }
}
