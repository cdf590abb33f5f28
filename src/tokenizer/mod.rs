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

//! # Tokenizer adapter
//! Converts a raw review into the sequence of vocabulary indices the sentiment model was trained on.
//! The splitting rules (filters, lowercasing, separator, character level) and the word index are
//! read from the artifact saved with the fitted Keras tokenizer, so that a review is encoded exactly
//! as it was at training time.
//!
//! ```no_run
//! use imdb_sentiment::tokenizer::{ReviewTokenizer, Vocabulary};
//! # fn main() -> Result<(), imdb_sentiment::SentimentError> {
//! let tokenizer = ReviewTokenizer::new(Vocabulary::from_file("path/to/tokenizer.json")?);
//! let input_sequence = tokenizer.encode("This movie was a masterpiece, I loved every second.");
//! # Ok(())
//! # }
//! ```

mod vocab;

pub use vocab::{OovPolicy, TokenizerOptions, Vocabulary, DEFAULT_FILTERS};

/// Splits a text into tokens following the word-level rules of `options`:
/// lowercasing, replacement of every filtered character by the separator, split on the
/// separator and removal of empty tokens.
///
/// # Example
///
/// ```
/// use imdb_sentiment::tokenizer::{text_to_word_sequence, TokenizerOptions};
/// let tokens = text_to_word_sequence("Great movie, GREAT cast!", &TokenizerOptions::default());
/// assert_eq!(tokens, vec!["great", "movie", "great", "cast"]);
/// ```
pub fn text_to_word_sequence(text: &str, options: &TokenizerOptions) -> Vec<String> {
    let text = if options.lower {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    let mut filtered = String::with_capacity(text.len());
    for character in text.chars() {
        if options.filters.contains(character) {
            filtered.push_str(&options.split);
        } else {
            filtered.push(character);
        }
    }
    filtered
        .split(options.split.as_str())
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// # Tokenizer Adapter
/// Wraps the immutable vocabulary and encodes reviews into Input Sequences.
#[derive(Debug, Clone)]
pub struct ReviewTokenizer {
    vocabulary: Vocabulary,
}

impl ReviewTokenizer {
    pub fn new(vocabulary: Vocabulary) -> ReviewTokenizer {
        ReviewTokenizer { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Splits a review into tokens. Character-level vocabularies produce one token per character
    /// (after optional lowercasing) without filtering.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let options = self.vocabulary.options();
        if options.char_level {
            let text = if options.lower {
                text.to_lowercase()
            } else {
                text.to_string()
            };
            text.chars().map(String::from).collect()
        } else {
            text_to_word_sequence(text, options)
        }
    }

    /// Encodes a review into its Input Sequence.
    ///
    /// Tokens whose index is at or above `num_words`, and tokens absent from the vocabulary,
    /// are replaced by the out-of-vocabulary index when the vocabulary reserves one and dropped
    /// otherwise. A `num_words` of 0 sets no limit.
    pub fn encode(&self, text: &str) -> Vec<i64> {
        let num_words = self.vocabulary.options().num_words.filter(|&limit| limit > 0);
        let oov_policy = self.vocabulary.oov_policy();
        self.tokenize(text)
            .iter()
            .filter_map(|token| match self.vocabulary.token_to_id(token) {
                Some(index) if num_words.map_or(true, |limit| index < limit) => Some(index),
                _ => match oov_policy {
                    OovPolicy::Reserved(oov_index) => Some(oov_index),
                    OovPolicy::Drop => None,
                },
            })
            .collect()
    }
}
