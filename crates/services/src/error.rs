//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;
use quiz_core::model::{EntrantError, QuestionError};

/// Errors emitted by question providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question provider returned response code {0}")]
    ResponseCode(u8),
    #[error("question provider returned no questions")]
    Empty,
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while reading `QuizConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {raw:?}")]
    InvalidNumber { key: &'static str, raw: String },
    #[error("question count must be between 1 and {max}, got {count}")]
    QuestionCount { count: u32, max: u32 },
    #[error("time limit must be at least one second")]
    ZeroDuration,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors surfaced by the quiz loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Validation(#[from] EntrantError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
