use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{AnswerLedger, QuestionSet};

/// Marker shown in place of an answer the user never gave.
pub const NOT_ANSWERED: &str = "Not Answered";

//
// ─── ANSWER TEXT ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum AnswerText {
    Answered(String),
    NotAnswered,
}

impl AnswerText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AnswerText::Answered(text) => text,
            AnswerText::NotAnswered => NOT_ANSWERED,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self, AnswerText::Answered(_))
    }
}

impl fmt::Display for AnswerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── REPORT ───────────────────────────────────────────────────────────────────
//

/// How the session came to be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitReason {
    /// Explicit finish.
    Manual,
    /// "Next" pressed on the last question.
    LastQuestion,
    /// The countdown reached zero.
    TimeExpired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Zero-based question position.
    pub position: usize,
    pub question: String,
    pub your_answer: AnswerText,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub correct: usize,
    pub total: usize,
}

/// Context captured at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportContext {
    pub reason: SubmitReason,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub remaining_seconds: u32,
}

/// Scored outcome of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    entries: Vec<ReportEntry>,
    summary: ReportSummary,
    reason: SubmitReason,
    started_at: DateTime<Utc>,
    submitted_at: DateTime<Utc>,
    remaining_seconds: u32,
}

impl Report {
    /// Grade every question in order against the latest recorded answers.
    ///
    /// An entry is correct only when the chosen choice text equals the stored
    /// correct answer exactly; unanswered questions are never correct.
    #[must_use]
    pub fn generate(
        questions: &QuestionSet,
        answers: &AnswerLedger,
        context: ReportContext,
    ) -> Self {
        let mut correct = 0_usize;
        let entries: Vec<ReportEntry> = questions
            .iter()
            .enumerate()
            .map(|(position, question)| {
                let your_answer = answers
                    .choice(position)
                    .and_then(|choice| question.choice(choice))
                    .map_or(AnswerText::NotAnswered, |text| {
                        AnswerText::Answered(text.to_string())
                    });
                let is_correct = match &your_answer {
                    AnswerText::Answered(text) => question.is_correct(text),
                    AnswerText::NotAnswered => false,
                };
                if is_correct {
                    correct += 1;
                }

                ReportEntry {
                    position,
                    question: question.text().to_string(),
                    your_answer,
                    correct_answer: question.correct_answer().to_string(),
                    is_correct,
                }
            })
            .collect();

        let summary = ReportSummary {
            correct,
            total: entries.len(),
        };

        Self {
            entries,
            summary,
            reason: context.reason,
            started_at: context.started_at,
            submitted_at: context.submitted_at,
            remaining_seconds: context.remaining_seconds,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        self.summary
    }

    #[must_use]
    pub fn reason(&self) -> SubmitReason {
        self.reason
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Wall-clock seconds between start and submission, never negative.
    #[must_use]
    pub fn elapsed_seconds(&self) -> i64 {
        (self.submitted_at - self.started_at).num_seconds().max(0)
    }

    #[must_use]
    pub fn score_line(&self) -> String {
        format!(
            "You scored {} out of {} questions.",
            self.summary.correct, self.summary.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::time::fixed_now;

    fn context() -> ReportContext {
        ReportContext {
            reason: SubmitReason::Manual,
            started_at: fixed_now(),
            submitted_at: fixed_now() + chrono::Duration::seconds(75),
            remaining_seconds: 10,
        }
    }

    fn set(questions: Vec<Question>) -> QuestionSet {
        QuestionSet::new(questions).unwrap()
    }

    #[test]
    fn unanswered_is_never_correct() {
        let questions = set(vec![
            Question::new("Q1", vec!["a".into(), "b".into()], "a").unwrap(),
        ]);
        let report = Report::generate(&questions, &AnswerLedger::new(1), context());

        let entry = &report.entries()[0];
        assert_eq!(entry.your_answer, AnswerText::NotAnswered);
        assert_eq!(entry.your_answer.to_string(), NOT_ANSWERED);
        assert!(!entry.is_correct);
        assert_eq!(report.summary(), ReportSummary { correct: 0, total: 1 });
    }

    #[test]
    fn grades_by_choice_text() {
        let questions = set(vec![
            Question::new("Q1", vec!["b".into(), "a".into()], "a").unwrap(),
            Question::new("Q2", vec!["x".into(), "y".into()], "x").unwrap(),
        ]);
        let mut answers = AnswerLedger::new(2);
        answers.record(0, 1);
        answers.record(1, 1);

        let report = Report::generate(&questions, &answers, context());

        assert!(report.entries()[0].is_correct);
        assert_eq!(report.entries()[0].your_answer.as_str(), "a");
        assert!(!report.entries()[1].is_correct);
        assert_eq!(report.entries()[1].correct_answer, "x");
        assert_eq!(report.summary(), ReportSummary { correct: 1, total: 2 });
        assert_eq!(report.score_line(), "You scored 1 out of 2 questions.");
    }

    #[test]
    fn duplicate_text_counts_as_correct() {
        let questions = set(vec![
            Question::new("Q", vec!["same".into(), "same".into(), "other".into()], "same").unwrap(),
        ]);
        let mut answers = AnswerLedger::new(1);
        answers.record(0, 1);

        let report = Report::generate(&questions, &answers, context());
        assert!(report.entries()[0].is_correct);
    }

    #[test]
    fn carries_submission_context() {
        let questions = set(vec![
            Question::new("Q", vec!["a".into(), "b".into()], "a").unwrap(),
        ]);
        let report = Report::generate(&questions, &AnswerLedger::new(1), context());

        assert_eq!(report.reason(), SubmitReason::Manual);
        assert_eq!(report.elapsed_seconds(), 75);
        assert_eq!(report.remaining_seconds(), 10);
    }
}
