#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod provider;
pub mod quiz;

pub use quiz_core::Clock;

pub use config::QuizConfig;
pub use error::{ConfigError, ProviderError, QuizError};
pub use provider::{OpenTriviaProvider, QuestionProvider, StaticQuestionProvider};
pub use quiz::{ChoiceView, QuizDriver, QuizIntent, QuizLoopService, SessionListener, SessionView};
