use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::form_urlencoded;

use quiz_core::model::RawQuestion;

use super::QuestionProvider;
use crate::config::QuizConfig;
use crate::error::ProviderError;

/// Multiple-choice questions from an Open Trivia DB compatible endpoint.
///
/// Fields are requested RFC 3986 percent-encoded and decoded here, so no
/// HTML entities reach the core.
#[derive(Clone, Debug)]
pub struct OpenTriviaProvider {
    client: Client,
    base_url: String,
}

impl OpenTriviaProvider {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &QuizConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/api.php", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuestionProvider for OpenTriviaProvider {
    async fn fetch(&self, amount: u32) -> Result<Vec<RawQuestion>, ProviderError> {
        let url = self.endpoint();
        debug!(%url, amount, "requesting trivia questions");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("amount", amount.to_string()),
                ("type", "multiple".to_string()),
                ("encode", "url3986".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "trivia request rejected");
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        into_raw_questions(body)
    }
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<TriviaResult>,
}

#[derive(Debug, Deserialize)]
struct TriviaResult {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

fn into_raw_questions(body: TriviaResponse) -> Result<Vec<RawQuestion>, ProviderError> {
    if body.response_code != 0 {
        warn!(code = body.response_code, "trivia API reported an error");
        return Err(ProviderError::ResponseCode(body.response_code));
    }

    Ok(body
        .results
        .into_iter()
        .map(|result| {
            RawQuestion::new(
                decode_field(&result.question),
                decode_field(&result.correct_answer),
                result
                    .incorrect_answers
                    .iter()
                    .map(|text| decode_field(text))
                    .collect(),
            )
        })
        .collect())
}

// url3986 payloads never contain a raw `&`, `=` or `+`, so form decoding of a
// single key is plain percent decoding.
fn decode_field(encoded: &str) -> String {
    form_urlencoded::parse(encoded.as_bytes())
        .next()
        .map(|(text, _)| text.into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<RawQuestion>, ProviderError> {
        into_raw_questions(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn decodes_percent_encoded_fields() {
        let questions = parse(
            r#"{
                "response_code": 0,
                "results": [{
                    "type": "multiple",
                    "difficulty": "easy",
                    "category": "General%20Knowledge",
                    "question": "What%20is%20%22H2O%22%3F",
                    "correct_answer": "Water",
                    "incorrect_answers": ["Salt", "Caf%C3%A9%20au%20lait", "1%2B1%3D2"]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(questions.len(), 1);
        let question = &questions[0];
        assert_eq!(question.question_text, "What is \"H2O\"?");
        assert_eq!(question.correct_answer_text, "Water");
        assert_eq!(
            question.incorrect_answer_texts,
            vec!["Salt", "Café au lait", "1+1=2"]
        );
    }

    #[test]
    fn non_zero_response_code_is_an_error() {
        let err = parse(r#"{ "response_code": 1, "results": [] }"#).unwrap_err();
        assert!(matches!(err, ProviderError::ResponseCode(1)));
    }

    #[test]
    fn missing_results_are_empty() {
        let questions = parse(r#"{ "response_code": 0 }"#).unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let provider = OpenTriviaProvider::new("https://opentdb.com/");
        assert_eq!(provider.endpoint(), "https://opentdb.com/api.php");
    }
}
