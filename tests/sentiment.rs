use imdb_sentiment::pipelines::padding::{PaddedSequence, MAX_SEQUENCE_LENGTH};
use imdb_sentiment::pipelines::presentation::{
    RenderModel, EMPTY_REVIEW_WARNING, NEGATIVE_COLOR, NEGATIVE_EMOJI, POSITIVE_COLOR,
    POSITIVE_EMOJI,
};
use imdb_sentiment::pipelines::sentiment::{
    analyze, Sentiment, SentimentContext, SentimentPolarity, SentimentScorer,
};
use imdb_sentiment::tokenizer::{ReviewTokenizer, Vocabulary};
use imdb_sentiment::SentimentError;
use std::cell::RefCell;

/// Returns a fixed score and records every sequence it is called with
struct FixedScorer {
    score: f64,
    calls: RefCell<Vec<Vec<i64>>>,
}

impl FixedScorer {
    fn new(score: f64) -> FixedScorer {
        FixedScorer {
            score,
            calls: RefCell::new(vec![]),
        }
    }
}

impl SentimentScorer for FixedScorer {
    fn score(&self, input: &PaddedSequence) -> Result<f64, SentimentError> {
        self.calls.borrow_mut().push(input.token_ids().to_vec());
        Ok(self.score)
    }
}

struct FailingScorer;

impl SentimentScorer for FailingScorer {
    fn score(&self, _input: &PaddedSequence) -> Result<f64, SentimentError> {
        Err(SentimentError::InferenceError("forward pass failed".to_string()))
    }
}

fn tokenizer() -> ReviewTokenizer {
    let vocabulary = Vocabulary::from_json_str(
        r#"{"<OOV>": 1, "this": 2, "movie": 3, "was": 4, "a": 5, "masterpiece": 6, "terrible": 7, "boring": 8}"#,
    )
    .unwrap();
    ReviewTokenizer::new(vocabulary)
}

fn context(score: f64) -> SentimentContext<FixedScorer> {
    SentimentContext::with_model(tokenizer(), FixedScorer::new(score))
}

#[test]
fn positive_review() -> anyhow::Result<()> {
    //    Given
    let context = context(0.92);

    //    When
    let output = analyze("This movie was a masterpiece, I loved every second.", &context)?;

    //    Then
    let sentiment = match &output {
        RenderModel::Sentiment(sentiment) => sentiment,
        RenderModel::Warning(message) => panic!("unexpected warning {}", message),
    };
    assert_eq!(sentiment.polarity, SentimentPolarity::Positive);
    assert_eq!(sentiment.confidence_percent, 92);
    let html = output.to_html();
    assert!(html.contains(POSITIVE_EMOJI));
    assert!(html.contains(&format!(
        "<span style='color:{}'>Positive</span>",
        POSITIVE_COLOR
    )));
    assert!(html.contains("Confidence: 92%"));
    assert!(html.contains(&format!("width:92%; background-color:{}", POSITIVE_COLOR)));

    let calls = context.model().calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), MAX_SEQUENCE_LENGTH);
    assert_eq!(&calls[0][..6], &[2, 3, 4, 5, 6, 0]);
    Ok(())
}

#[test]
fn negative_review() -> anyhow::Result<()> {
    let context = context(0.08);

    let output = analyze("Terrible, boring, waste of time.", &context)?;

    assert_eq!(
        output,
        RenderModel::Sentiment(Sentiment {
            polarity: SentimentPolarity::Negative,
            score: 0.08,
            confidence: 1.0 - 0.08,
            confidence_percent: 92,
        })
    );
    let html = output.to_html();
    assert!(html.contains(NEGATIVE_EMOJI));
    assert!(html.contains(&format!(
        "<span style='color:{}'>Negative</span>",
        NEGATIVE_COLOR
    )));
    assert!(html.contains("Confidence: 92%"));
    Ok(())
}

#[test]
fn empty_review_short_circuits() -> anyhow::Result<()> {
    let context = context(0.92);

    for review in ["", "   ", "\n\t  \r\n"].iter() {
        let output = analyze(review, &context)?;
        assert_eq!(output, RenderModel::Warning(EMPTY_REVIEW_WARNING.to_string()));
        assert!(!output.to_html().contains("Confidence"));
    }
    assert!(context.model().calls.borrow().is_empty());
    Ok(())
}

#[test]
fn threshold_boundary_is_positive() {
    let sentiment = Sentiment::from_score(0.5);
    assert_eq!(sentiment.polarity, SentimentPolarity::Positive);
    assert_eq!(sentiment.confidence_percent, 50);
}

#[test]
fn confidence_is_truncated() {
    assert_eq!(Sentiment::from_score(0.995).confidence_percent, 99);
    assert_eq!(Sentiment::from_score(0.57).confidence_percent, 56);
    assert_eq!(Sentiment::from_score(0.499).confidence_percent, 50);
    assert_eq!(Sentiment::from_score(0.29).confidence_percent, 71);
    assert_eq!(Sentiment::from_score(0.0).confidence_percent, 100);
    assert_eq!(Sentiment::from_score(1.0).confidence_percent, 100);
}

#[test]
fn label_and_confidence_over_score_range() {
    for step in 0..=1000 {
        let score = step as f64 / 1000.0;
        let sentiment = Sentiment::from_score(score);
        if score < 0.5 {
            assert_eq!(sentiment.polarity, SentimentPolarity::Negative);
            assert_eq!(
                sentiment.confidence_percent as f64,
                ((1.0 - score) * 100.0).floor()
            );
        } else {
            assert_eq!(sentiment.polarity, SentimentPolarity::Positive);
            assert_eq!(sentiment.confidence_percent as f64, (score * 100.0).floor());
        }
        assert!((50..=100).contains(&sentiment.confidence_percent));
    }
}

#[test]
fn analysis_is_idempotent() -> anyhow::Result<()> {
    let context = context(0.73);
    let review = "This movie was boring... a masterpiece of boredom";

    let first = analyze(review, &context)?;
    let second = analyze(review, &context)?;

    assert_eq!(first, second);
    assert_eq!(first.to_html(), second.to_html());
    let calls = context.model().calls.borrow();
    assert_eq!(calls[0], calls[1]);
    Ok(())
}

#[test]
fn out_of_range_model_output_is_clamped() -> anyhow::Result<()> {
    let output = analyze("a masterpiece", &context(1.7))?;
    match output {
        RenderModel::Sentiment(sentiment) => {
            assert_eq!(sentiment.score, 1.0);
            assert_eq!(sentiment.confidence_percent, 100);
        }
        RenderModel::Warning(message) => panic!("unexpected warning {}", message),
    }
    Ok(())
}

#[test]
fn non_finite_model_output_fails_the_interaction() {
    let result = analyze("a masterpiece", &context(f64::NAN));
    assert!(matches!(result, Err(SentimentError::InferenceError(_))));
}

#[test]
fn model_failure_is_local_to_the_interaction() -> anyhow::Result<()> {
    let failing = SentimentContext::with_model(tokenizer(), FailingScorer);
    assert!(analyze("a masterpiece", &failing).is_err());
    assert!(analyze("a masterpiece", &failing).is_err());
    assert_eq!(
        analyze(" ", &failing)?,
        RenderModel::Warning(EMPTY_REVIEW_WARNING.to_string())
    );
    Ok(())
}
