mod answer;
mod entrant;
mod question;

pub use answer::{AnswerLedger, AnswerSlot};
pub use entrant::{Entrant, EntrantError};
pub use question::{Question, QuestionError, QuestionSet, RawQuestion};
