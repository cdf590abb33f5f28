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

//! # Sequence padder
//! Normalizes variable-length Input Sequences to the fixed width expected by the sentiment model.
//!
//! ```
//! use imdb_sentiment::pipelines::padding::{pad_sequence, PaddingSide, MAX_SEQUENCE_LENGTH};
//! let padded = pad_sequence(&[12, 7, 431], MAX_SEQUENCE_LENGTH, PaddingSide::Post, PaddingSide::Post, 0);
//! assert_eq!(padded.len(), 200);
//! assert_eq!(&padded.token_ids()[..4], &[12, 7, 431, 0]);
//! ```

/// Width of every Padded Sequence fed to the model
pub const MAX_SEQUENCE_LENGTH: usize = 200;

/// Value used to fill padded positions
pub const PADDING_VALUE: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// # Side of a sequence where padding is added or tokens are removed
pub enum PaddingSide {
    /// Beginning of the sequence
    Pre,
    /// End of the sequence
    Post,
}

/// # Padded Sequence
/// Fixed-length sequence of token indices, only built by [`pad_sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedSequence {
    token_ids: Vec<i64>,
    padding_value: i64,
}

impl PaddedSequence {
    pub fn token_ids(&self) -> &[i64] {
        &self.token_ids
    }

    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }

    /// Number of entries that are not padding
    pub fn content_len(&self) -> usize {
        self.token_ids
            .iter()
            .filter(|&&token_id| token_id != self.padding_value)
            .count()
    }
}

/// Pads or truncates `sequence` to exactly `max_len` entries.
///
/// # Arguments
///
/// * `sequence` - Input Sequence of token indices
/// * `max_len` - target length
/// * `padding` - side where `value` is added when the sequence is shorter than `max_len`
/// * `truncating` - side where tokens are removed when the sequence is longer than `max_len`
/// * `value` - padding value
///
/// # Returns
///
/// * `PaddedSequence` of length `max_len`
pub fn pad_sequence(
    sequence: &[i64],
    max_len: usize,
    padding: PaddingSide,
    truncating: PaddingSide,
    value: i64,
) -> PaddedSequence {
    let kept = if sequence.len() > max_len {
        match truncating {
            PaddingSide::Post => &sequence[..max_len],
            PaddingSide::Pre => &sequence[sequence.len() - max_len..],
        }
    } else {
        sequence
    };

    let mut token_ids = Vec::with_capacity(max_len);
    let padding_length = max_len - kept.len();
    if padding == PaddingSide::Pre {
        token_ids.extend(std::iter::repeat(value).take(padding_length));
    }
    token_ids.extend_from_slice(kept);
    if padding == PaddingSide::Post {
        token_ids.extend(std::iter::repeat(value).take(padding_length));
    }
    PaddedSequence {
        token_ids,
        padding_value: value,
    }
}

/// Applies the padding policy of the sentiment pipeline: 200 entries, tail truncation, tail zero padding.
pub fn pad_review(sequence: &[i64]) -> PaddedSequence {
    pad_sequence(
        sequence,
        MAX_SEQUENCE_LENGTH,
        PaddingSide::Post,
        PaddingSide::Post,
        PADDING_VALUE,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pre_truncation_keeps_the_last_tokens() {
        let padded = pad_sequence(&[1, 2, 3, 4, 5], 3, PaddingSide::Post, PaddingSide::Pre, 0);
        assert_eq!(padded.token_ids(), &[3, 4, 5]);
    }

    #[test]
    fn pre_padding_prepends_value() {
        let padded = pad_sequence(&[8, 9], 5, PaddingSide::Pre, PaddingSide::Post, -1);
        assert_eq!(padded.token_ids(), &[-1, -1, -1, 8, 9]);
        assert_eq!(padded.content_len(), 2);
    }
}
