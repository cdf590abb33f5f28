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

//! # Presentation layer
//! Maps analyze results to HTML: a result fragment (emoji, colored label, confidence percentage and
//! confidence bar) and the single page hosting the review form.
//! The output only depends on its inputs, identical scores render identical bytes.

use crate::common::error::SentimentError;
use crate::pipelines::sentiment::{Sentiment, SentimentPolarity};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;
use tracing::info;

pub const POSITIVE_COLOR: &str = "#00cc44";
pub const NEGATIVE_COLOR: &str = "#cc0000";
pub const POSITIVE_EMOJI: &str = "😊";
pub const NEGATIVE_EMOJI: &str = "😞";
pub const EMPTY_REVIEW_WARNING: &str = "⚠️ Please enter a review to analyze.";

impl SentimentPolarity {
    pub fn color(&self) -> &'static str {
        match self {
            SentimentPolarity::Positive => POSITIVE_COLOR,
            SentimentPolarity::Negative => NEGATIVE_COLOR,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SentimentPolarity::Positive => POSITIVE_EMOJI,
            SentimentPolarity::Negative => NEGATIVE_EMOJI,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Outcome of one analyze action
pub enum RenderModel {
    /// Inline validation warning, no inference was performed
    Warning(String),
    /// Sentiment of the review
    Sentiment(Sentiment),
}

impl RenderModel {
    /// Renders the result fragment.
    ///
    /// # Example
    ///
    /// ```
    /// use imdb_sentiment::pipelines::presentation::RenderModel;
    /// use imdb_sentiment::pipelines::sentiment::Sentiment;
    /// let html = RenderModel::Sentiment(Sentiment::from_score(0.92)).to_html();
    /// assert!(html.contains("Confidence: 92%"));
    /// ```
    pub fn to_html(&self) -> String {
        match self {
            RenderModel::Warning(message) => {
                format!("<div class='warning'>{}</div>\n", escape_html(message))
            }
            RenderModel::Sentiment(sentiment) => {
                let color = sentiment.polarity.color();
                let percent = sentiment.confidence_percent;
                format!(
                    "<div class='emoji'>{emoji}</div>\n\
                     <h3 style='text-align:center;'>Sentiment: <span style='color:{color}'>{label}</span></h3>\n\
                     <p style='text-align:center;'>Confidence: {percent}%</p>\n\
                     <div style=\"background-color:#ddd; border-radius:10px; height:20px; margin-top:10px;\">\n\
                     \x20   <div style=\"width:{percent}%; background-color:{color}; height:100%; border-radius:10px; transition: width 0.6s;\"></div>\n\
                     </div>\n",
                    emoji = sentiment.polarity.emoji(),
                    color = color,
                    label = sentiment.polarity.label(),
                    percent = percent,
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// # Page state
/// `Idle` until the first analyze action, then `Displayed` with the latest result.
pub enum ViewState {
    Idle,
    Displayed(RenderModel),
}

impl ViewState {
    /// State after an analyze action, whatever the previous state was.
    pub fn analyzed(render_model: RenderModel) -> ViewState {
        ViewState::Displayed(render_model)
    }

    pub fn fragment(&self) -> Option<String> {
        match self {
            ViewState::Idle => None,
            ViewState::Displayed(render_model) => Some(render_model.to_html()),
        }
    }
}

/// # Background image of the page
/// Loaded once at startup and inlined in the page as a data URL.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    data_url: String,
}

impl BackgroundImage {
    /// Encodes raw image bytes of the given MIME type.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<BackgroundImage, SentimentError> {
        if bytes.is_empty() {
            return Err(SentimentError::InvalidConfigurationError(
                "background image is empty".to_string(),
            ));
        }
        Ok(BackgroundImage {
            data_url: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        })
    }

    /// Reads an image file, the MIME type is derived from the file extension.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imdb_sentiment::pipelines::presentation::BackgroundImage;
    /// # fn main() -> Result<(), imdb_sentiment::SentimentError> {
    /// let background = BackgroundImage::from_file("resources/background.jpg")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BackgroundImage, SentimentError> {
        let path = path.as_ref();
        let mime_type = image_mime_type(path)?;
        BackgroundImage::from_file_with_mime_type(path, mime_type)
    }

    /// Reads an image file of a known MIME type (e.g. a downloaded file without extension).
    pub fn from_file_with_mime_type<P: AsRef<Path>>(
        path: P,
        mime_type: &str,
    ) -> Result<BackgroundImage, SentimentError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            SentimentError::IOError(format!(
                "could not read background image {}: {}",
                path.display(),
                e
            ))
        })?;
        let background = BackgroundImage::from_bytes(&bytes, mime_type)?;
        info!(path = %path.display(), bytes = bytes.len(), "loaded background image");
        Ok(background)
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

/// MIME type of an image, from the extension of its file name.
pub fn image_mime_type(path: &Path) -> Result<&'static str, SentimentError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => Ok("image/png"),
        Some("jpg") | Some("jpeg") => Ok("image/jpeg"),
        Some("gif") => Ok("image/gif"),
        Some("webp") => Ok("image/webp"),
        Some("svg") => Ok("image/svg+xml"),
        _ => Err(SentimentError::InvalidConfigurationError(format!(
            "unsupported background image format: {}",
            path.display()
        ))),
    }
}

const PAGE_STYLE: &str = "
    body {
        font-family: \"Source Sans Pro\", sans-serif;
        margin: 0;
        min-height: 100vh;
    }
    .title {
        font-size: 42px;
        font-weight: bold;
        text-align: center;
        margin-bottom: 10px;
    }
    .imdb {
        background-color: #f5c518;
        color: black;
        padding: 2px 10px;
        border-radius: 4px;
        font-weight: bold;
    }
    .box {
        background-color: rgba(255, 255, 255, 0.88);
        padding: 30px;
        border-radius: 15px;
        max-width: 700px;
        margin: 40px auto;
        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.2);
    }
    .box textarea {
        width: 100%;
        height: 150px;
        box-sizing: border-box;
    }
    .warning {
        background-color: rgba(255, 189, 69, 0.2);
        color: #926c05;
        padding: 16px;
        border-radius: 8px;
        margin-top: 10px;
    }
    .emoji {
        font-size: 60px;
        text-align: center;
        animation: pulse 1.2s infinite;
    }
    @keyframes pulse {
        0% { transform: scale(1); }
        50% { transform: scale(1.05); }
        100% { transform: scale(1); }
    }
";

/// Renders the full page: title, review form, and the result fragment of `view`.
/// `review` is echoed back in the text area.
pub fn render_page(view: &ViewState, review: &str, background: Option<&BackgroundImage>) -> String {
    let background_style = match background {
        Some(background) => format!(
            "    body {{\n\
             \x20       background-image: url(\"{}\");\n\
             \x20       background-size: cover;\n\
             \x20       background-repeat: no-repeat;\n\
             \x20       background-attachment: fixed;\n\
             \x20       background-position: center;\n\
             \x20   }}\n",
            background.data_url()
        ),
        None => String::new(),
    };
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>IMDB Sentiment Classifier</title>\n\
         <style>{style}{background}</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"title\">🎬 <span class=\"imdb\">IMDB</span> Movie Review Sentiment Classifier</div>\n\
         <div class=\"box\">\n\
         <form method=\"post\" action=\"/\">\n\
         <label for=\"review\">✍️ Enter a Movie Review:</label>\n\
         <textarea id=\"review\" name=\"review\" placeholder=\"Example: This movie was a masterpiece...\">{review}</textarea>\n\
         <button type=\"submit\">🔍 Analyze</button>\n\
         </form>\n\
         {fragment}\
         </div>\n\
         </body>\n\
         </html>\n",
        style = PAGE_STYLE,
        background = background_style,
        review = escape_html(review),
        fragment = view.fragment().unwrap_or_default(),
    )
}

/// Escapes the characters with a special meaning in HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }
    escaped
}
