use std::env;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_QUESTION_COUNT: u32 = 15;
/// Thirty minutes.
pub const DEFAULT_DURATION_SECS: u32 = 30 * 60;
/// Upper bound the trivia API accepts per request.
pub const MAX_QUESTION_COUNT: u32 = 50;

pub const ENV_BASE_URL: &str = "QUIZ_API_BASE_URL";
pub const ENV_QUESTION_COUNT: &str = "QUIZ_QUESTION_COUNT";
pub const ENV_DURATION_SECS: &str = "QUIZ_DURATION_SECS";

/// Runtime knobs for a quiz run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub base_url: String,
    pub question_count: u32,
    pub duration_secs: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl QuizConfig {
    /// Read configuration from `QUIZ_*` environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`QuizConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(ENV_BASE_URL)) {
            config.base_url = raw;
        }
        if let Some(raw) = non_blank(lookup(ENV_QUESTION_COUNT)) {
            config.question_count = parse_number(ENV_QUESTION_COUNT, &raw)?;
        }
        if let Some(raw) = non_blank(lookup(ENV_DURATION_SECS)) {
            config.duration_secs = parse_number(ENV_DURATION_SECS, &raw)?;
        }

        config.validate()
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_question_count(mut self, question_count: u32) -> Self {
        self.question_count = question_count;
        self
    }

    #[must_use]
    pub fn with_duration_secs(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError` for an unparsable base URL, a question count
    /// outside `1..=MAX_QUESTION_COUNT`, or a zero time limit.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        if self.question_count == 0 || self.question_count > MAX_QUESTION_COUNT {
            return Err(ConfigError::QuestionCount {
                count: self.question_count,
                max: MAX_QUESTION_COUNT,
            });
        }
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn parse_number(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
        key,
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = QuizConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.duration_secs, 1800);
        assert_eq!(config.question_count, 15);
    }

    #[test]
    fn reads_overrides() {
        let config = QuizConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_QUESTION_COUNT, "5"),
            (ENV_DURATION_SECS, " 90 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.question_count, 5);
        assert_eq!(config.duration_secs, 90);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = QuizConfig::from_lookup(lookup(&[(ENV_QUESTION_COUNT, "many")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: ENV_QUESTION_COUNT,
                raw: "many".into()
            }
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            QuizConfig::default().with_question_count(0).validate(),
            Err(ConfigError::QuestionCount { count: 0, .. })
        ));
        assert!(matches!(
            QuizConfig::default().with_question_count(51).validate(),
            Err(ConfigError::QuestionCount { count: 51, .. })
        ));
        assert_eq!(
            QuizConfig::default().with_duration_secs(0).validate(),
            Err(ConfigError::ZeroDuration)
        );
        assert!(matches!(
            QuizConfig::default().with_base_url("not a url").validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }
}
