mod driver;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use driver::{QuizDriver, QuizIntent, SessionListener};
pub use view::{ChoiceView, SessionView};
pub use workflow::QuizLoopService;
