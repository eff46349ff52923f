use async_trait::async_trait;

use quiz_core::model::RawQuestion;

use super::QuestionProvider;
use crate::error::ProviderError;

/// Serves a fixed list of questions; used for offline runs and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticQuestionProvider {
    questions: Vec<RawQuestion>,
}

impl StaticQuestionProvider {
    #[must_use]
    pub fn new(questions: Vec<RawQuestion>) -> Self {
        Self { questions }
    }

    /// A small built-in general knowledge set.
    #[must_use]
    pub fn sample() -> Self {
        let q = |text: &str, correct: &str, wrong: [&str; 3]| {
            RawQuestion::new(text, correct, wrong.iter().map(|w| (*w).to_string()).collect())
        };
        Self::new(vec![
            q(
                "Which planet is known as the Red Planet?",
                "Mars",
                ["Venus", "Jupiter", "Mercury"],
            ),
            q("What is the chemical symbol for gold?", "Au", ["Ag", "Gd", "Go"]),
            q("How many continents are there on Earth?", "7", ["5", "6", "8"]),
            q(
                "Who wrote \"Pride and Prejudice\"?",
                "Jane Austen",
                ["Charlotte Bronte", "Mary Shelley", "George Eliot"],
            ),
            q("What is the largest ocean on Earth?", "Pacific", ["Atlantic", "Indian", "Arctic"]),
            q(
                "Which gas do plants absorb from the air?",
                "Carbon dioxide",
                ["Oxygen", "Nitrogen", "Helium"],
            ),
            q(
                "In which year did the first person walk on the Moon?",
                "1969",
                ["1965", "1972", "1959"],
            ),
            q("What is the smallest prime number?", "2", ["1", "3", "0"]),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[async_trait]
impl QuestionProvider for StaticQuestionProvider {
    async fn fetch(&self, amount: u32) -> Result<Vec<RawQuestion>, ProviderError> {
        let take = usize::try_from(amount).unwrap_or(usize::MAX);
        Ok(self.questions.iter().take(take).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_truncates_to_amount() {
        let provider = StaticQuestionProvider::sample();
        let questions = provider.fetch(3).await.unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].correct_answer_text, "Mars");
    }

    #[tokio::test]
    async fn fetch_returns_everything_when_amount_is_large() {
        let provider = StaticQuestionProvider::sample();
        let questions = provider.fetch(100).await.unwrap();
        assert_eq!(questions.len(), provider.len());
    }
}
