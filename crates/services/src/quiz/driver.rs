use std::fmt;

use tracing::{debug, info};

use quiz_core::model::Entrant;
use quiz_core::{Clock, Report, Session, SessionError, SessionEvent};

use super::view::SessionView;

/// A user gesture or clock tick, already mapped onto a session operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Next,
    Previous,
    GoTo(usize),
    ToggleFlag,
    Submit,
    Tick,
}

/// Receives notifications after each operation that changed the session.
pub trait SessionListener {
    fn started(&mut self, _view: &SessionView) {}

    fn state_changed(&mut self, _intent: QuizIntent, _view: &SessionView) {}

    fn submitted(&mut self, _report: &Report) {}

    /// The session went back to `NotStarted`; `view` has no question.
    fn restarted(&mut self, _view: &SessionView) {}
}

/// Owns one session and routes intents into it.
pub struct QuizDriver {
    clock: Clock,
    entrant: Option<Entrant>,
    session: Session,
    listener: Option<Box<dyn SessionListener>>,
}

impl QuizDriver {
    #[must_use]
    pub fn new(clock: Clock, session: Session) -> Self {
        Self {
            clock,
            entrant: None,
            session,
            listener: None,
        }
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Box<dyn SessionListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn set_listener(&mut self, listener: Box<dyn SessionListener>) {
        self.listener = Some(listener);
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn entrant(&self) -> Option<&Entrant> {
        self.entrant.as_ref()
    }

    pub fn set_entrant(&mut self, entrant: Entrant) {
        self.entrant = Some(entrant);
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView::from_session(&self.session)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Apply one intent and notify the listener.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the intent is not valid for the current
    /// phase or index; the session is unchanged in that case.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<SessionEvent, SessionError> {
        let now = self.clock.now();
        let event = match intent {
            QuizIntent::Select(choice) => self.session.select_answer(choice),
            QuizIntent::Next => self.session.go_to_next(now),
            QuizIntent::Previous => self.session.go_to_previous(),
            QuizIntent::GoTo(index) => self.session.go_to(index),
            QuizIntent::ToggleFlag => self.session.toggle_flag(),
            QuizIntent::Submit => self.session.submit(now),
            QuizIntent::Tick => self.session.tick(now),
        }
        .inspect_err(|err| debug!(?intent, %err, "intent rejected"))?;

        self.notify(intent, &event);
        Ok(event)
    }

    /// Return the session to `NotStarted`, keeping the time limit and listener.
    pub fn restart(&mut self) -> SessionEvent {
        self.entrant = None;
        let event = self.session.restart();
        info!("quiz session restarted");
        let view = self.view();
        if let Some(listener) = self.listener.as_mut() {
            listener.restarted(&view);
        }
        event
    }

    pub(crate) fn notify_started(&mut self) {
        let view = self.view();
        if let Some(listener) = self.listener.as_mut() {
            listener.started(&view);
        }
    }

    fn notify(&mut self, intent: QuizIntent, event: &SessionEvent) {
        match event {
            SessionEvent::Unchanged => {}
            SessionEvent::StateChanged => {
                let view = self.view();
                if let Some(listener) = self.listener.as_mut() {
                    listener.state_changed(intent, &view);
                }
            }
            SessionEvent::Submitted(report) => {
                let summary = report.summary();
                info!(
                    entrant = self.entrant.as_ref().map_or("", Entrant::as_str),
                    correct = summary.correct,
                    total = summary.total,
                    reason = ?report.reason(),
                    "quiz submitted"
                );
                if let Some(listener) = self.listener.as_mut() {
                    listener.submitted(report);
                }
            }
        }
    }
}

impl fmt::Debug for QuizDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizDriver")
            .field("entrant", &self.entrant)
            .field("session", &self.session)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
