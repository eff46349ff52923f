use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid regex"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntrantError {
    #[error("an email address is required")]
    Empty,

    #[error("not a valid email address: {0}")]
    InvalidEmail(String),
}

/// Validated identifier of the person taking the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entrant(String);

impl Entrant {
    /// Trim and validate a user-supplied email address.
    ///
    /// # Errors
    ///
    /// Returns `EntrantError::Empty` for blank input and
    /// `EntrantError::InvalidEmail` when the input is not shaped like `a@b.c`.
    pub fn parse(raw: &str) -> Result<Self, EntrantError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EntrantError::Empty);
        }
        if !EMAIL_SHAPE.is_match(trimmed) {
            return Err(EntrantError::InvalidEmail(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
