use imdb_sentiment::tokenizer::{
    text_to_word_sequence, OovPolicy, ReviewTokenizer, TokenizerOptions, Vocabulary,
};
use imdb_sentiment::SentimentError;
use std::collections::HashMap;
use std::io::Write;

fn word_index(tokens: &[(&str, i64)]) -> HashMap<String, i64> {
    tokens
        .iter()
        .map(|(token, index)| (token.to_string(), *index))
        .collect()
}

fn keras_tokenizer_json(oov_token: Option<&str>, num_words: Option<i64>) -> String {
    let word_index = serde_json::json!({
        "<OOV>": 1, "the": 2, "movie": 3, "was": 4, "a": 5, "masterpiece": 6, "i": 7, "loved": 8,
        "every": 9, "second": 10, "don't": 11
    });
    serde_json::json!({
        "class_name": "Tokenizer",
        "config": {
            "num_words": num_words,
            "filters": "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n",
            "lower": true,
            "split": " ",
            "char_level": false,
            "oov_token": oov_token,
            "document_count": 25000,
            "word_index": word_index.to_string()
        }
    })
    .to_string()
}

#[test]
fn word_sequence_filters_and_lowercases() {
    let tokens = text_to_word_sequence(
        "This movie was a MASTERPIECE, I loved every second.\nDon't miss it!",
        &TokenizerOptions::default(),
    );
    assert_eq!(
        tokens,
        vec![
            "this",
            "movie",
            "was",
            "a",
            "masterpiece",
            "i",
            "loved",
            "every",
            "second",
            "don't",
            "miss",
            "it"
        ]
    );
}

#[test]
fn word_sequence_of_punctuation_is_empty() {
    assert!(text_to_word_sequence("?! ... --", &TokenizerOptions::default()).is_empty());
}

#[test]
fn keras_artifact_with_oov_token() -> anyhow::Result<()> {
    //    Given
    let vocabulary = Vocabulary::from_json_str(&keras_tokenizer_json(Some("<OOV>"), None))?;
    let tokenizer = ReviewTokenizer::new(vocabulary);

    //    When
    let sequence = tokenizer.encode("This movie was a masterpiece, I loved every second.");

    //    Then
    assert_eq!(tokenizer.vocabulary().oov_policy(), OovPolicy::Reserved(1));
    assert_eq!(sequence, vec![1, 3, 4, 5, 6, 7, 8, 9, 10]);
    Ok(())
}

#[test]
fn keras_artifact_without_oov_token_drops_unknown_tokens() -> anyhow::Result<()> {
    let vocabulary = Vocabulary::from_json_str(&keras_tokenizer_json(None, None))?;
    let tokenizer = ReviewTokenizer::new(vocabulary);

    let sequence = tokenizer.encode("This movie was a masterpiece, I loved every second.");

    assert_eq!(tokenizer.vocabulary().oov_policy(), OovPolicy::Drop);
    assert_eq!(sequence, vec![3, 4, 5, 6, 7, 8, 9, 10]);
    Ok(())
}

#[test]
fn num_words_limits_kept_indices() -> anyhow::Result<()> {
    let with_oov = ReviewTokenizer::new(Vocabulary::from_json_str(&keras_tokenizer_json(
        Some("<OOV>"),
        Some(6),
    ))?);
    let without_oov =
        ReviewTokenizer::new(Vocabulary::from_json_str(&keras_tokenizer_json(None, Some(6)))?);

    assert_eq!(with_oov.encode("the movie was a masterpiece"), vec![2, 3, 4, 5, 1]);
    assert_eq!(without_oov.encode("the movie was a masterpiece"), vec![2, 3, 4, 5]);
    Ok(())
}

#[test]
fn zero_num_words_sets_no_limit() -> anyhow::Result<()> {
    let tokenizer =
        ReviewTokenizer::new(Vocabulary::from_json_str(&keras_tokenizer_json(None, Some(0)))?);

    assert_eq!(
        tokenizer.encode("the movie was a masterpiece"),
        vec![2, 3, 4, 5, 6]
    );
    Ok(())
}

#[test]
fn word_index_object_is_accepted() -> anyhow::Result<()> {
    let vocabulary = Vocabulary::from_json_str(r#"{"great": 1, "film": 2}"#)?;
    assert_eq!(vocabulary.len(), 2);
    assert_eq!(vocabulary.options(), &TokenizerOptions::default());

    let tokenizer = ReviewTokenizer::new(vocabulary);
    assert_eq!(tokenizer.encode("Great, great FILM... not bad"), vec![1, 1, 2]);
    Ok(())
}

#[test]
fn char_level_tokenizer() -> anyhow::Result<()> {
    let options = TokenizerOptions {
        char_level: true,
        ..Default::default()
    };
    let vocabulary = Vocabulary::from_word_index(
        word_index(&[("a", 1), ("b", 2), (" ", 3)]),
        options,
        None,
    )?;
    let tokenizer = ReviewTokenizer::new(vocabulary);

    assert_eq!(tokenizer.tokenize("Ab a"), vec!["a", "b", " ", "a"]);
    assert_eq!(tokenizer.encode("AB c!"), vec![1, 2, 3]);
    Ok(())
}

#[test]
fn vocabulary_is_not_mutated_by_encoding() -> anyhow::Result<()> {
    let tokenizer = ReviewTokenizer::new(Vocabulary::from_json_str(&keras_tokenizer_json(
        Some("<OOV>"),
        None,
    ))?);
    let size = tokenizer.vocabulary().len();

    let first = tokenizer.encode("an entirely unseen review");
    let second = tokenizer.encode("an entirely unseen review");

    assert_eq!(first, second);
    assert_eq!(tokenizer.vocabulary().len(), size);
    assert_eq!(tokenizer.vocabulary().token_to_id("unseen"), None);
    Ok(())
}

#[test]
fn oov_token_missing_from_word_index_is_rejected() {
    let result = Vocabulary::from_word_index(
        word_index(&[("movie", 1)]),
        TokenizerOptions::default(),
        Some("<OOV>"),
    );
    assert!(matches!(result, Err(SentimentError::VocabularyError(_))));
}

#[test]
fn padding_index_is_reserved() {
    let result = Vocabulary::from_word_index(
        word_index(&[("movie", 0)]),
        TokenizerOptions::default(),
        None,
    );
    assert!(matches!(result, Err(SentimentError::VocabularyError(_))));
}

#[test]
fn vocabulary_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(keras_tokenizer_json(Some("<OOV>"), None).as_bytes())?;

    let vocabulary = Vocabulary::from_file(file.path())?;

    assert_eq!(vocabulary.len(), 11);
    assert_eq!(vocabulary.token_to_id("masterpiece"), Some(6));
    Ok(())
}

#[test]
fn missing_vocabulary_file_fails() {
    let result = Vocabulary::from_file("this/path/does/not/exist/tokenizer.json");
    assert!(matches!(result, Err(SentimentError::IOError(_))));
}

#[test]
fn corrupt_vocabulary_file_fails() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"\x80\x03ckeras_preprocessing.text\nTokenizer")?;

    assert!(Vocabulary::from_file(file.path()).is_err());
    Ok(())
}
