use serde::Serialize;

use quiz_core::{NavStatus, Phase, Session};

/// One option of the displayed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    pub text: String,
    pub selected: bool,
}

/// Presentation-agnostic snapshot of a session.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - positions are zero-based
///
/// The presentation layer decides how to label positions and format time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub phase: Phase,
    pub current: Option<usize>,
    pub total: usize,
    pub question: Option<String>,
    pub choices: Vec<ChoiceView>,
    pub statuses: Vec<NavStatus>,
    pub remaining_seconds: u32,
    pub answered: usize,
    pub flagged: usize,
    pub can_go_previous: bool,
    pub next_submits: bool,
}

impl SessionView {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let selected = session.selected_choice();
        let (question, choices) = match session.current_question() {
            Some(question) => (
                Some(question.text().to_string()),
                question
                    .choices()
                    .iter()
                    .enumerate()
                    .map(|(index, text)| ChoiceView {
                        text: text.clone(),
                        selected: selected == Some(index),
                    })
                    .collect(),
            ),
            None => (None, Vec::new()),
        };

        Self {
            phase: session.phase(),
            current: session.current_index(),
            total: session.question_count(),
            question,
            choices,
            statuses: session.statuses(),
            remaining_seconds: session.remaining_seconds(),
            answered: session.answers().answered_count(),
            flagged: session.flagged().len(),
            can_go_previous: session.can_go_previous(),
            next_submits: session.next_submits(),
        }
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }
}
