mod in_memory;
mod open_trivia;

use async_trait::async_trait;

use quiz_core::model::RawQuestion;

use crate::error::ProviderError;

pub use in_memory::StaticQuestionProvider;
pub use open_trivia::OpenTriviaProvider;

/// Source of raw questions for a session.
///
/// Implementations return decoded text; an empty result is allowed here and
/// rejected by the quiz loop.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    async fn fetch(&self, amount: u32) -> Result<Vec<RawQuestion>, ProviderError>;
}
