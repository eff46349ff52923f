use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SessionError;
use crate::model::{AnswerLedger, Question, QuestionSet};
use crate::navigation::{self, NavStatus};
use crate::report::{Report, ReportContext, SubmitReason};
use crate::timer::{CountdownTimer, TimerTick};

/// Coarse lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Submitted,
}

/// What a successful operation did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// State the presentation layer reads has changed.
    StateChanged,
    /// The session was submitted by this operation; carries the final report.
    Submitted(Report),
    /// The operation was a valid no-op.
    Unchanged,
}

impl SessionEvent {
    #[must_use]
    pub fn report(&self) -> Option<&Report> {
        match self {
            SessionEvent::Submitted(report) => Some(report),
            _ => None,
        }
    }
}

/// One timed attempt at a question set.
///
/// `Session` is the single owner of all mutable quiz state. Every mutation
/// goes through the operations below, which either succeed or leave the state
/// untouched and return a [`SessionError`].
///
/// Operations that may end the session take `now` so timestamps come from the
/// caller's clock.
#[derive(Clone)]
pub struct Session {
    duration_seconds: u32,
    questions: Option<QuestionSet>,
    answers: AnswerLedger,
    current: usize,
    visited: BTreeSet<usize>,
    flagged: BTreeSet<usize>,
    timer: CountdownTimer,
    phase: Phase,
    started_at: Option<DateTime<Utc>>,
    report: Option<Report>,
}

impl Session {
    /// Creates a session in `NotStarted` with the given time limit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Timer` if `duration_seconds` is zero.
    pub fn new(duration_seconds: u32) -> Result<Self, SessionError> {
        Ok(Self {
            duration_seconds,
            questions: None,
            answers: AnswerLedger::default(),
            current: 0,
            visited: BTreeSet::new(),
            flagged: BTreeSet::new(),
            timer: CountdownTimer::new(duration_seconds)?,
            phase: Phase::NotStarted,
            started_at: None,
            report: None,
        })
    }

    //
    // ─── OPERATIONS ───────────────────────────────────────────────────────────
    //

    /// Begin the attempt: all answers empty, first question current and visited,
    /// countdown running.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` or `SessionError::AlreadySubmitted`
    /// unless the phase is `NotStarted`.
    pub fn start(
        &mut self,
        questions: QuestionSet,
        now: DateTime<Utc>,
    ) -> Result<SessionEvent, SessionError> {
        match self.phase {
            Phase::NotStarted => {}
            Phase::InProgress => return Err(SessionError::AlreadyStarted),
            Phase::Submitted => return Err(SessionError::AlreadySubmitted),
        }

        self.timer.start(self.duration_seconds)?;
        self.answers = AnswerLedger::new(questions.len());
        self.questions = Some(questions);
        self.current = 0;
        self.visited.clear();
        self.visited.insert(0);
        self.flagged.clear();
        self.started_at = Some(now);
        self.report = None;
        self.phase = Phase::InProgress;
        Ok(SessionEvent::StateChanged)
    }

    /// Record `choice` for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns a phase error outside `InProgress`, or
    /// `SessionError::ChoiceOutOfRange` for an index past the current question's choices.
    pub fn select_answer(&mut self, choice: usize) -> Result<SessionEvent, SessionError> {
        let count = self.current_in_progress()?.choice_count();
        if choice >= count {
            return Err(SessionError::ChoiceOutOfRange { choice, count });
        }

        self.answers.record(self.current, choice);
        Ok(SessionEvent::StateChanged)
    }

    /// Advance one question. On the last question this submits instead.
    ///
    /// # Errors
    ///
    /// Returns a phase error outside `InProgress`.
    pub fn go_to_next(&mut self, now: DateTime<Utc>) -> Result<SessionEvent, SessionError> {
        let len = self.len_in_progress()?;
        if self.current + 1 < len {
            self.move_to(self.current + 1);
            Ok(SessionEvent::StateChanged)
        } else {
            Ok(self.finish(SubmitReason::LastQuestion, now))
        }
    }

    /// Step back one question; a no-op on the first.
    ///
    /// # Errors
    ///
    /// Returns a phase error outside `InProgress`.
    pub fn go_to_previous(&mut self) -> Result<SessionEvent, SessionError> {
        self.len_in_progress()?;
        if self.current == 0 {
            return Ok(SessionEvent::Unchanged);
        }
        self.move_to(self.current - 1);
        Ok(SessionEvent::StateChanged)
    }

    /// Jump to any question.
    ///
    /// # Errors
    ///
    /// Returns a phase error outside `InProgress`, or
    /// `SessionError::QuestionOutOfRange` for `index >= len`.
    pub fn go_to(&mut self, index: usize) -> Result<SessionEvent, SessionError> {
        let len = self.len_in_progress()?;
        if index >= len {
            return Err(SessionError::QuestionOutOfRange { index, len });
        }
        self.move_to(index);
        Ok(SessionEvent::StateChanged)
    }

    /// Flip the review flag on the current question. Answers are unaffected.
    ///
    /// # Errors
    ///
    /// Returns a phase error outside `InProgress`.
    pub fn toggle_flag(&mut self) -> Result<SessionEvent, SessionError> {
        self.len_in_progress()?;
        if !self.flagged.remove(&self.current) {
            self.flagged.insert(self.current);
        }
        Ok(SessionEvent::StateChanged)
    }

    /// Finish the attempt and grade it.
    ///
    /// Only the first submission has effect; later calls return
    /// `SessionEvent::Unchanged`, so a manual submit racing the timer is harmless.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<SessionEvent, SessionError> {
        match self.phase {
            Phase::NotStarted => Err(SessionError::NotStarted),
            Phase::Submitted => Ok(SessionEvent::Unchanged),
            Phase::InProgress => Ok(self.finish(SubmitReason::Manual, now)),
        }
    }

    /// Advance the countdown by one second, submitting on expiry.
    ///
    /// Ticks arriving after submission are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<SessionEvent, SessionError> {
        match self.phase {
            Phase::NotStarted => Err(SessionError::NotStarted),
            Phase::Submitted => Ok(SessionEvent::Unchanged),
            Phase::InProgress => match self.timer.tick() {
                TimerTick::Running { .. } => Ok(SessionEvent::StateChanged),
                TimerTick::Expired => Ok(self.finish(SubmitReason::TimeExpired, now)),
                TimerTick::Idle => Ok(SessionEvent::Unchanged),
            },
        }
    }

    /// Discard the attempt and return to `NotStarted` with the full time limit.
    pub fn restart(&mut self) -> SessionEvent {
        self.timer.reset();
        self.questions = None;
        self.answers = AnswerLedger::default();
        self.current = 0;
        self.visited.clear();
        self.flagged.clear();
        self.started_at = None;
        self.report = None;
        self.phase = Phase::NotStarted;
        SessionEvent::StateChanged
    }

    //
    // ─── ACCESSORS ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    /// Index of the displayed question; `None` before `start`.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.questions.as_ref().map(|_| self.current)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.as_ref().and_then(|q| q.get(self.current))
    }

    #[must_use]
    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.as_ref().map_or(0, QuestionSet::len)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerLedger {
        &self.answers
    }

    /// Choice recorded for the current question, if any.
    #[must_use]
    pub fn selected_choice(&self) -> Option<usize> {
        self.questions
            .as_ref()
            .and_then(|_| self.answers.choice(self.current))
    }

    #[must_use]
    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    #[must_use]
    pub fn flagged(&self) -> &BTreeSet<usize> {
        &self.flagged
    }

    /// Indices with a recorded answer, derived from the answer ledger.
    #[must_use]
    pub fn attempted(&self) -> BTreeSet<usize> {
        self.answers.answered_positions().collect()
    }

    #[must_use]
    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    #[must_use]
    pub fn is_flagged(&self, index: usize) -> bool {
        self.flagged.contains(&index)
    }

    #[must_use]
    pub fn is_attempted(&self, index: usize) -> bool {
        self.answers.is_answered(index)
    }

    #[must_use]
    pub fn statuses(&self) -> Vec<NavStatus> {
        navigation::statuses(self)
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining_seconds()
    }

    #[must_use]
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    #[must_use]
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// The final report once submitted.
    #[must_use]
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.phase == Phase::InProgress && self.current > 0
    }

    /// True when "next" on the current question would submit the session.
    #[must_use]
    pub fn next_submits(&self) -> bool {
        self.phase == Phase::InProgress && self.current + 1 == self.question_count()
    }

    //
    // ─── INTERNALS ────────────────────────────────────────────────────────────
    //

    fn len_in_progress(&self) -> Result<usize, SessionError> {
        match (self.phase, self.questions.as_ref()) {
            (Phase::InProgress, Some(questions)) => Ok(questions.len()),
            (Phase::Submitted, _) => Err(SessionError::AlreadySubmitted),
            _ => Err(SessionError::NotStarted),
        }
    }

    fn current_in_progress(&self) -> Result<&Question, SessionError> {
        self.len_in_progress()?;
        self.current_question().ok_or(SessionError::NotStarted)
    }

    fn move_to(&mut self, index: usize) {
        self.current = index;
        self.visited.insert(index);
    }

    fn finish(&mut self, reason: SubmitReason, now: DateTime<Utc>) -> SessionEvent {
        self.timer.stop();
        self.phase = Phase::Submitted;

        let Some(questions) = self.questions.as_ref() else {
            return SessionEvent::Unchanged;
        };
        let report = Report::generate(
            questions,
            &self.answers,
            ReportContext {
                reason,
                started_at: self.started_at.unwrap_or(now),
                submitted_at: now,
                remaining_seconds: self.timer.remaining_seconds(),
            },
        );
        self.report = Some(report.clone());
        SessionEvent::Submitted(report)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .field("questions_len", &self.question_count())
            .field("current", &self.current)
            .field("answered", &self.answers.answered_count())
            .field("visited_len", &self.visited.len())
            .field("flagged_len", &self.flagged.len())
            .field("remaining_seconds", &self.timer.remaining_seconds())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
