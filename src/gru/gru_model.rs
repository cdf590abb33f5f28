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

use crate::common::error::SentimentError;
use crate::pipelines::padding::PaddedSequence;
use crate::pipelines::sentiment::SentimentScorer;
use crate::resources::ResourceProvider;
use crate::Config;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use tch::nn::{self, RNN};
use tch::{no_grad, Device, Kind, Tensor};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// # GRU sentiment model configuration
/// Defines the dimensions of the embedding, recurrent and classification layers.
pub struct GruSentimentConfig {
    /// Number of rows of the embedding matrix (largest token index + 1)
    pub vocab_size: i64,
    pub embedding_dim: i64,
    pub hidden_size: i64,
    #[serde(default = "default_num_layers")]
    pub num_layers: i64,
    /// Skip padding tokens (index 0) in the recurrent pass
    #[serde(default)]
    pub mask_zero: bool,
}

fn default_num_layers() -> i64 {
    1
}

impl Config for GruSentimentConfig {}

impl GruSentimentConfig {
    pub fn validate(&self) -> Result<(), SentimentError> {
        let dimensions = [
            ("vocab_size", self.vocab_size),
            ("embedding_dim", self.embedding_dim),
            ("hidden_size", self.hidden_size),
            ("num_layers", self.num_layers),
        ];
        for (name, value) in dimensions.iter() {
            if *value < 1 {
                return Err(SentimentError::InvalidConfigurationError(format!(
                    "{} must be strictly positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// # GRU sentiment classifier
/// Embedding, GRU and a single-unit linear head with sigmoid activation.
/// The variables are stored under `embedding`, `gru` and `classifier`.
pub struct GruSentimentClassifier {
    embedding: nn::Embedding,
    gru: nn::GRU,
    classifier: nn::Linear,
    hidden_size: i64,
}

impl GruSentimentClassifier {
    /// Build a new `GruSentimentClassifier`
    ///
    /// # Arguments
    ///
    /// * `p` - Variable store path for the root of the model
    /// * `config` - `GruSentimentConfig` object defining the model architecture
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imdb_sentiment::gru::{GruSentimentClassifier, GruSentimentConfig};
    /// use imdb_sentiment::Config;
    /// use tch::{nn, Device};
    /// # fn main() -> Result<(), imdb_sentiment::SentimentError> {
    /// let config = GruSentimentConfig::from_file("path/to/config.json")?;
    /// let vs = nn::VarStore::new(Device::Cpu);
    /// let classifier = GruSentimentClassifier::new(&vs.root(), &config);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<'p, P>(p: P, config: &GruSentimentConfig) -> GruSentimentClassifier
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let embedding = nn::embedding(
            p / "embedding",
            config.vocab_size,
            config.embedding_dim,
            Default::default(),
        );
        let gru_config = nn::RNNConfig {
            num_layers: config.num_layers,
            batch_first: true,
            train: false,
            ..Default::default()
        };
        let gru = nn::gru(
            &(p / "gru"),
            config.embedding_dim,
            config.hidden_size,
            gru_config,
        );
        let classifier = nn::linear(p / "classifier", config.hidden_size, 1, Default::default());
        GruSentimentClassifier {
            embedding,
            gru,
            classifier,
            hidden_size: config.hidden_size,
        }
    }

    /// Forward pass through the model
    ///
    /// # Arguments
    ///
    /// * `input_ids` - Input tensor of shape (*batch size*, *sequence_length*). An empty sequence
    ///   produces the output of the zero hidden state.
    ///
    /// # Returns
    ///
    /// * `Tensor` of shape (*batch size*, 1) holding the probability of a positive review
    pub fn forward(&self, input_ids: &Tensor) -> Tensor {
        let size = input_ids.size();
        let hidden_state = if size[1] == 0 {
            Tensor::zeros(&[size[0], self.hidden_size], (Kind::Float, input_ids.device()))
        } else {
            let (output, _) = self.gru.seq(&input_ids.apply(&self.embedding));
            output.select(1, -1)
        };
        hidden_state.apply(&self.classifier).sigmoid()
    }
}

/// # Sentiment Model
/// Pre-trained `GruSentimentClassifier` with its variable store. Loaded once, every call to
/// `score` is a stateless forward pass.
pub struct GruSentimentModel {
    classifier: GruSentimentClassifier,
    config: GruSentimentConfig,
    var_store: nn::VarStore,
}

impl GruSentimentModel {
    /// Load a model from its configuration and weights resources.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imdb_sentiment::gru::GruSentimentModel;
    /// use imdb_sentiment::resources::LocalResource;
    /// use std::path::PathBuf;
    /// use tch::Device;
    /// # fn main() -> Result<(), imdb_sentiment::SentimentError> {
    /// let config_resource = LocalResource::from(PathBuf::from("path/to/config.json"));
    /// let weights_resource = LocalResource::from(PathBuf::from("path/to/model.ot"));
    /// let model = GruSentimentModel::new(&config_resource, &weights_resource, Device::Cpu)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        config_resource: &dyn ResourceProvider,
        weights_resource: &dyn ResourceProvider,
        device: Device,
    ) -> Result<GruSentimentModel, SentimentError> {
        let config_path = config_resource.get_local_path()?;
        let weights_path = weights_resource.get_local_path()?;
        let config = GruSentimentConfig::from_file(&config_path)?;
        let mut model = GruSentimentModel::initialize(config, device)?;
        model.var_store.load(&weights_path).map_err(|e| {
            SentimentError::TchError(format!(
                "could not load weights {}: {}",
                weights_path.display(),
                e
            ))
        })?;
        info!(
            config = %config_path.display(),
            weights = %weights_path.display(),
            device = ?device,
            "loaded sentiment model"
        );
        Ok(model)
    }

    /// Creates a model with randomly initialized weights.
    pub fn initialize(
        config: GruSentimentConfig,
        device: Device,
    ) -> Result<GruSentimentModel, SentimentError> {
        config.validate()?;
        let var_store = nn::VarStore::new(device);
        let classifier = GruSentimentClassifier::new(&var_store.root(), &config);
        Ok(GruSentimentModel {
            classifier,
            config,
            var_store,
        })
    }

    pub fn config(&self) -> &GruSentimentConfig {
        &self.config
    }

    pub fn device(&self) -> Device {
        self.var_store.device()
    }

    fn check_token_ids(&self, token_ids: &[i64]) -> Result<(), SentimentError> {
        match token_ids
            .iter()
            .find(|&&token_id| token_id < 0 || token_id >= self.config.vocab_size)
        {
            Some(token_id) => Err(SentimentError::InferenceError(format!(
                "token index {} is outside of the embedding matrix (vocab_size = {})",
                token_id, self.config.vocab_size
            ))),
            None => Ok(()),
        }
    }
}

impl SentimentScorer for GruSentimentModel {
    fn score(&self, input: &PaddedSequence) -> Result<f64, SentimentError> {
        self.check_token_ids(input.token_ids())?;
        let token_ids: Vec<i64> = if self.config.mask_zero {
            input
                .token_ids()
                .iter()
                .copied()
                .filter(|&token_id| token_id != 0)
                .collect()
        } else {
            input.token_ids().to_vec()
        };
        let input_tensor = Tensor::of_slice(&token_ids)
            .to_kind(Kind::Int64)
            .unsqueeze(0)
            .to(self.var_store.device());
        let output = no_grad(|| self.classifier.forward(&input_tensor));
        Ok(output.f_double_value(&[0, 0])?)
    }
}
