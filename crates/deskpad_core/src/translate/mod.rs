//! Remote translation client for the translator widget.
//!
//! # Responsibility
//! - Issue one blocking translation request per call, no retry.
//! - Surface failures as displayable errors without touching widget state.
//!
//! # Invariants
//! - Blank input never reaches the network.
//! - Returned text has the endpoint's HTML entity escapes decoded.

use log::{debug, error};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";
const API_KEY_ENV: &str = "DESKPAD_TRANSLATE_API_KEY";

/// Translation direction of the widget's two-language toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    KoreanToEnglish,
    EnglishToKorean,
}

impl Direction {
    /// Language code sent as the source of the translation.
    pub fn source(self) -> &'static str {
        match self {
            Self::KoreanToEnglish => "ko",
            Self::EnglishToKorean => "en",
        }
    }

    /// Language code sent as the target of the translation.
    pub fn target(self) -> &'static str {
        match self {
            Self::KoreanToEnglish => "en",
            Self::EnglishToKorean => "ko",
        }
    }

    /// The opposite direction, for the widget's swap button.
    pub fn toggled(self) -> Self {
        match self {
            Self::KoreanToEnglish => Self::EnglishToKorean,
            Self::EnglishToKorean => Self::KoreanToEnglish,
        }
    }
}

/// Translation request failures. `Display` text is written for inline
/// rendering next to the input field.
#[derive(Debug)]
pub enum TranslateError {
    /// Input was empty or whitespace-only.
    EmptyInput,
    /// Transport-level failure issuing the request or reading the body.
    Http(reqwest::Error),
    /// The service answered with a non-success status.
    Api { status: u16 },
    /// The service answered 2xx but the payload was not usable.
    MalformedResponse(&'static str),
}

impl Display for TranslateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "enter text to translate"),
            Self::Http(err) => write!(f, "translation request failed: {err}"),
            Self::Api { status } => {
                write!(f, "translation service returned status {status}")
            }
            Self::MalformedResponse(details) => {
                write!(f, "translation service returned an unexpected payload: {details}")
            }
        }
    }
}

impl Error for TranslateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

/// Endpoint and credential configuration for the translator.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl TranslatorConfig {
    /// Configuration against the default endpoint with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Reads the API key from `DESKPAD_TRANSLATE_API_KEY`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV).ok().map(Self::new)
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    translations: Vec<TranslationRow>,
}

#[derive(Debug, Deserialize)]
struct TranslationRow {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Stateless call-and-return client over the translation endpoint.
pub struct Translator {
    config: TranslatorConfig,
    client: reqwest::blocking::Client,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Translates `text` between the given language codes.
    ///
    /// Blocks the caller for the duration of the request; the widget core
    /// never calls this from a mutation path.
    pub fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        debug!("event=translate module=translate status=start source={source} target={target}");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", trimmed),
                ("source", source),
                ("target", target),
            ])
            .send()
            .map_err(TranslateError::Http)?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "event=translate module=translate status=error http_status={}",
                status.as_u16()
            );
            return Err(TranslateError::Api {
                status: status.as_u16(),
            });
        }

        let payload: TranslateResponse = response.json().map_err(TranslateError::Http)?;
        let row = payload
            .data
            .translations
            .into_iter()
            .next()
            .ok_or(TranslateError::MalformedResponse("no translations in payload"))?;

        debug!("event=translate module=translate status=ok");
        Ok(decode_html_entities(&row.translated_text))
    }

    /// Translates along the widget's current direction toggle.
    pub fn translate_auto(&self, text: &str, direction: Direction) -> Result<String, TranslateError> {
        self.translate(text, direction.source(), direction.target())
    }
}

// The endpoint HTML-escapes a handful of characters in translated text;
// decode exactly those. `&amp;` goes last so freshly produced ampersands
// are not decoded twice.
fn decode_html_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::{decode_html_entities, Direction, TranslateError, Translator, TranslatorConfig};

    #[test]
    fn direction_maps_language_codes() {
        assert_eq!(Direction::KoreanToEnglish.source(), "ko");
        assert_eq!(Direction::KoreanToEnglish.target(), "en");
        assert_eq!(Direction::EnglishToKorean.source(), "en");
        assert_eq!(Direction::EnglishToKorean.target(), "ko");
    }

    #[test]
    fn toggling_swaps_direction_and_back() {
        let direction = Direction::KoreanToEnglish;
        assert_eq!(direction.toggled(), Direction::EnglishToKorean);
        assert_eq!(direction.toggled().toggled(), direction);
    }

    #[test]
    fn decodes_escaped_entities() {
        assert_eq!(
            decode_html_entities("she said &quot;don&#39;t&quot; &amp; left"),
            "she said \"don't\" & left"
        );
        assert_eq!(decode_html_entities("1 &lt; 2 &gt; 0"), "1 < 2 > 0");
        assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn blank_input_is_rejected_before_any_request() {
        let translator = Translator::new(TranslatorConfig::new("test-key"));
        let err = translator
            .translate("   ", "ko", "en")
            .expect_err("blank input must be rejected");
        assert!(matches!(err, TranslateError::EmptyInput));
        assert_eq!(err.to_string(), "enter text to translate");
    }

    #[test]
    fn error_messages_read_as_inline_text() {
        let api = TranslateError::Api { status: 403 };
        assert_eq!(api.to_string(), "translation service returned status 403");
    }
}
