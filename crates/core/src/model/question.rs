use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text must not be empty")]
    EmptyText,

    #[error("a question needs at least two choices, got {count}")]
    TooFewChoices { count: usize },

    #[error("correct answer is not one of the choices")]
    MissingCorrectAnswer,

    #[error("question set must contain at least one question")]
    EmptySet,
}

//
// ─── RAW QUESTION ─────────────────────────────────────────────────────────────
//

/// Provider-supplied question, already free of markup and entity escaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub question_text: String,
    pub correct_answer_text: String,
    pub incorrect_answer_texts: Vec<String>,
}

impl RawQuestion {
    #[must_use]
    pub fn new(
        question_text: impl Into<String>,
        correct_answer_text: impl Into<String>,
        incorrect_answer_texts: Vec<String>,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            correct_answer_text: correct_answer_text.into(),
            incorrect_answer_texts,
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single-choice question whose choice order is fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    choices: Vec<String>,
    correct_answer: String,
}

impl Question {
    /// Build a question with choices in the given order.
    ///
    /// Duplicate choice text is kept as-is.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` for blank question text,
    /// `QuestionError::TooFewChoices` for fewer than two choices, and
    /// `QuestionError::MissingCorrectAnswer` if no choice equals `correct_answer`.
    pub fn new(
        text: impl Into<String>,
        choices: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if choices.len() < 2 {
            return Err(QuestionError::TooFewChoices {
                count: choices.len(),
            });
        }
        if !choices.iter().any(|choice| *choice == correct_answer) {
            return Err(QuestionError::MissingCorrectAnswer);
        }

        Ok(Self {
            text,
            choices,
            correct_answer,
        })
    }

    /// Build a question from provider output, permuting
    /// `[correct, ...incorrect]` once with `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`Question::new`].
    pub fn shuffled<R: Rng + ?Sized>(raw: RawQuestion, rng: &mut R) -> Result<Self, QuestionError> {
        let RawQuestion {
            question_text,
            correct_answer_text,
            incorrect_answer_texts,
        } = raw;

        let mut choices = Vec::with_capacity(incorrect_answer_texts.len() + 1);
        choices.push(correct_answer_text.clone());
        choices.extend(incorrect_answer_texts);
        choices.shuffle(rng);

        Self::new(question_text, choices, correct_answer_text)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Exact, case-sensitive comparison against the stored correct answer.
    #[must_use]
    pub fn is_correct(&self, answer_text: &str) -> bool {
        answer_text == self.correct_answer
    }
}

//
// ─── QUESTION SET ─────────────────────────────────────────────────────────────
//

/// Ordered, non-empty list of questions for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSet(Vec<Question>);

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptySet` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::EmptySet);
        }
        Ok(Self(questions))
    }

    /// Build a set from provider output, shuffling each question's choices.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` hit, or `QuestionError::EmptySet`.
    pub fn from_raw<R: Rng + ?Sized>(
        raw: impl IntoIterator<Item = RawQuestion>,
        rng: &mut R,
    ) -> Result<Self, QuestionError> {
        let questions = raw
            .into_iter()
            .map(|q| Question::shuffled(q, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.0.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn raw(text: &str) -> RawQuestion {
        RawQuestion::new(
            text,
            "Paris",
            vec!["Rome".into(), "Madrid".into(), "Berlin".into()],
        )
    }

    #[test]
    fn shuffled_keeps_every_choice_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let question = Question::shuffled(raw("Capital of France?"), &mut rng).unwrap();

        let mut sorted = question.choices().to_vec();
        sorted.sort();
        assert_eq!(sorted, vec!["Berlin", "Madrid", "Paris", "Rome"]);
        assert_eq!(question.correct_answer(), "Paris");
        assert_eq!(question.text(), "Capital of France?");
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let a = Question::shuffled(raw("Q"), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Question::shuffled(raw("Q"), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.choices(), b.choices());
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = Question::new("  ", vec!["a".into(), "b".into()], "a").unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }

    #[test]
    fn single_choice_is_rejected() {
        let err = Question::new("Q", vec!["a".into()], "a").unwrap_err();
        assert_eq!(err, QuestionError::TooFewChoices { count: 1 });
    }

    #[test]
    fn correct_answer_must_be_a_choice() {
        let err = Question::new("Q", vec!["a".into(), "b".into()], "c").unwrap_err();
        assert_eq!(err, QuestionError::MissingCorrectAnswer);
    }

    #[test]
    fn duplicate_distractor_text_is_kept() {
        let question = Question::new("Q", vec!["a".into(), "a".into(), "b".into()], "a").unwrap();
        assert_eq!(question.choice_count(), 3);
        assert!(question.is_correct(question.choice(1).unwrap()));
    }

    #[test]
    fn correctness_is_case_sensitive() {
        let question = Question::new("Q", vec!["Yes".into(), "No".into()], "Yes").unwrap();
        assert!(question.is_correct("Yes"));
        assert!(!question.is_correct("yes"));
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(QuestionSet::new(Vec::new()).unwrap_err(), QuestionError::EmptySet);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            QuestionSet::from_raw(Vec::new(), &mut rng).unwrap_err(),
            QuestionError::EmptySet
        );
    }

    #[test]
    fn from_raw_preserves_question_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let set = QuestionSet::from_raw(vec![raw("first"), raw("second")], &mut rng).unwrap();
        let texts: Vec<_> = set.iter().map(Question::text).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(set.len(), 2);
    }
}
