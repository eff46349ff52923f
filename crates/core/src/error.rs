use thiserror::Error;

/// Rejections raised by the countdown timer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerError {
    #[error("countdown duration must be at least one second")]
    ZeroDuration,
}

/// An operation was invoked outside its valid phase or index range.
///
/// The session state is left untouched whenever one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has not been started")]
    NotStarted,

    #[error("session is already in progress")]
    AlreadyStarted,

    #[error("session has already been submitted")]
    AlreadySubmitted,

    #[error("question {index} is out of range for a set of {len}")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("choice {choice} is out of range for a question with {count} choices")]
    ChoiceOutOfRange { choice: usize, count: usize },

    #[error(transparent)]
    Timer(#[from] TimerError),
}
