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
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Characters replaced by the split string before word-level splitting.
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

#[derive(Debug, Clone, PartialEq)]
/// # Options controlling how raw text is split into tokens
/// Saved alongside the word index when the tokenizer was fitted.
pub struct TokenizerOptions {
    /// Characters removed from the text (replaced by `split`) before splitting
    pub filters: String,
    /// Lowercase the text before splitting
    pub lower: bool,
    /// Word separator
    pub split: String,
    /// Every character is a token when set
    pub char_level: bool,
    /// Only indices strictly below this bound are kept
    pub num_words: Option<i64>,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            filters: DEFAULT_FILTERS.to_string(),
            lower: true,
            split: " ".to_string(),
            char_level: false,
            num_words: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// # Handling of tokens missing from the word index
pub enum OovPolicy {
    /// Unknown tokens are removed from the sequence
    Drop,
    /// Unknown tokens are replaced by the reserved index
    Reserved(i64),
}

/// # Vocabulary Mapping
/// Immutable token to index table with the tokenizer options it was built with.
/// Index 0 is never assigned to a token and is used for padding.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    word_index: HashMap<String, i64>,
    options: TokenizerOptions,
    oov_policy: OovPolicy,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VocabularyFile {
    Tokenizer(TokenizerFile),
    WordIndex(HashMap<String, i64>),
}

#[derive(Deserialize)]
struct TokenizerFile {
    #[serde(default)]
    class_name: Option<String>,
    config: TokenizerFileConfig,
}

#[derive(Deserialize)]
struct TokenizerFileConfig {
    #[serde(default)]
    num_words: Option<i64>,
    #[serde(default)]
    filters: Option<String>,
    #[serde(default)]
    lower: Option<bool>,
    #[serde(default)]
    split: Option<String>,
    #[serde(default)]
    char_level: Option<bool>,
    #[serde(default)]
    oov_token: Option<String>,
    word_index: WordIndexField,
}

// `Tokenizer.to_json()` stores the word index as a JSON document encoded in a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WordIndexField {
    Encoded(String),
    Map(HashMap<String, i64>),
}

impl Vocabulary {
    /// Build a vocabulary from an existing word index.
    ///
    /// # Arguments
    ///
    /// * `word_index` - `HashMap<String, i64>` token to index mapping (indices start at 1)
    /// * `options` - `TokenizerOptions` used to split text
    /// * `oov_token` - optional token whose index replaces unknown tokens
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imdb_sentiment::tokenizer::{TokenizerOptions, Vocabulary};
    /// use std::collections::HashMap;
    /// # fn main() -> Result<(), imdb_sentiment::SentimentError> {
    /// let mut word_index = HashMap::new();
    /// word_index.insert("<OOV>".to_string(), 1);
    /// word_index.insert("movie".to_string(), 2);
    /// let vocabulary = Vocabulary::from_word_index(word_index, TokenizerOptions::default(), Some("<OOV>"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_word_index(
        word_index: HashMap<String, i64>,
        options: TokenizerOptions,
        oov_token: Option<&str>,
    ) -> Result<Vocabulary, SentimentError> {
        if !options.char_level && options.split.is_empty() {
            return Err(SentimentError::VocabularyError(
                "the split string of a word-level tokenizer cannot be empty".to_string(),
            ));
        }
        if let Some((token, index)) = word_index.iter().find(|&(_, &index)| index < 1) {
            return Err(SentimentError::VocabularyError(format!(
                "token {:?} has index {}, indices must start at 1 (0 is reserved for padding)",
                token, index
            )));
        }
        let oov_policy = match oov_token {
            Some(token) => match word_index.get(token) {
                Some(&index) => OovPolicy::Reserved(index),
                None => {
                    return Err(SentimentError::VocabularyError(format!(
                        "out-of-vocabulary token {:?} is missing from the word index",
                        token
                    )))
                }
            },
            None => OovPolicy::Drop,
        };
        Ok(Vocabulary {
            word_index,
            options,
            oov_policy,
        })
    }

    /// Parse a vocabulary artifact. Both the document produced by a fitted Keras tokenizer
    /// (`{"class_name": "Tokenizer", "config": {...}}`) and a flat `{token: index}` object are
    /// accepted. A flat object uses the default options and drops unknown tokens.
    pub fn from_json_str(content: &str) -> Result<Vocabulary, SentimentError> {
        let file: VocabularyFile = serde_json::from_str(content).map_err(|e| {
            SentimentError::VocabularyError(format!("could not parse vocabulary: {}", e))
        })?;
        match file {
            VocabularyFile::WordIndex(word_index) => {
                Vocabulary::from_word_index(word_index, TokenizerOptions::default(), None)
            }
            VocabularyFile::Tokenizer(tokenizer_file) => {
                if let Some(class_name) = &tokenizer_file.class_name {
                    if class_name != "Tokenizer" {
                        return Err(SentimentError::VocabularyError(format!(
                            "unsupported tokenizer class {}",
                            class_name
                        )));
                    }
                }
                let config = tokenizer_file.config;
                let word_index = match config.word_index {
                    WordIndexField::Map(word_index) => word_index,
                    WordIndexField::Encoded(encoded) => serde_json::from_str(&encoded)
                        .map_err(|e| {
                            SentimentError::VocabularyError(format!(
                                "could not parse encoded word index: {}",
                                e
                            ))
                        })?,
                };
                let defaults = TokenizerOptions::default();
                let options = TokenizerOptions {
                    filters: config.filters.unwrap_or(defaults.filters),
                    lower: config.lower.unwrap_or(defaults.lower),
                    split: config.split.unwrap_or(defaults.split),
                    char_level: config.char_level.unwrap_or(defaults.char_level),
                    num_words: config.num_words,
                };
                Vocabulary::from_word_index(word_index, options, config.oov_token.as_deref())
            }
        }
    }

    /// Load the vocabulary artifact from a file. Called once at startup.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imdb_sentiment::tokenizer::Vocabulary;
    /// # fn main() -> Result<(), imdb_sentiment::SentimentError> {
    /// let vocabulary = Vocabulary::from_file("path/to/tokenizer.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Vocabulary, SentimentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SentimentError::IOError(format!(
                "could not read vocabulary {}: {}",
                path.display(),
                e
            ))
        })?;
        let vocabulary = Vocabulary::from_json_str(&content)?;
        info!(
            path = %path.display(),
            tokens = vocabulary.len(),
            oov = ?vocabulary.oov_policy(),
            "loaded vocabulary"
        );
        Ok(vocabulary)
    }

    /// Index of a token, if present in the word index
    pub fn token_to_id(&self, token: &str) -> Option<i64> {
        self.word_index.get(token).copied()
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    pub fn oov_policy(&self) -> OovPolicy {
        self.oov_policy
    }

    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }
}
