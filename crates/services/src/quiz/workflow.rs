use std::sync::Arc;

use rand::SeedableRng;
use rand::rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use quiz_core::model::{Entrant, QuestionError, QuestionSet, RawQuestion};
use quiz_core::{Clock, Phase, Session, SessionError, SessionEvent};

use super::driver::QuizDriver;
use crate::config::QuizConfig;
use crate::error::{ProviderError, QuizError};
use crate::provider::QuestionProvider;

/// Orchestrates entry, question fetch, and session start.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    provider: Arc<dyn QuestionProvider>,
    config: QuizConfig,
    rng_seed: Option<u64>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, provider: Arc<dyn QuestionProvider>, config: QuizConfig) -> Self {
        Self {
            clock,
            provider,
            config,
            rng_seed: None,
        }
    }

    /// Shuffle choices from a fixed seed instead of the thread RNG.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Validate the entry input.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Validation` for a blank or malformed email.
    pub fn admit(&self, raw: &str) -> Result<Entrant, QuizError> {
        Entrant::parse(raw)
            .inspect_err(|err| debug!(%err, "entry rejected"))
            .map_err(QuizError::from)
    }

    /// Create a driver holding a `NotStarted` session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` if the configured time limit is zero.
    pub fn new_driver(&self) -> Result<QuizDriver, QuizError> {
        let session = Session::new(self.config.duration_secs)?;
        Ok(QuizDriver::new(self.clock, session))
    }

    /// Fetch and shuffle a question set.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the provider fails, returns nothing, or
    /// returns a question that cannot be built.
    pub async fn load_questions(&self) -> Result<QuestionSet, ProviderError> {
        let amount = self.config.question_count;
        let raw = self
            .provider
            .fetch(amount)
            .await
            .inspect_err(|err| warn!(%err, "question fetch failed"))?;

        if raw.is_empty() {
            warn!(amount, "question provider returned no questions");
            return Err(ProviderError::Empty);
        }
        debug!(requested = amount, received = raw.len(), "questions fetched");

        Ok(self.build_set(raw)?)
    }

    /// Fetch questions and start the driver's session for `entrant`.
    ///
    /// On error the driver stays in `NotStarted` and may be retried.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` if the session is not in `NotStarted`, or
    /// `QuizError::Provider` if no question set could be loaded.
    pub async fn begin(
        &self,
        driver: &mut QuizDriver,
        entrant: Entrant,
    ) -> Result<SessionEvent, QuizError> {
        match driver.session().phase() {
            Phase::NotStarted => {}
            Phase::InProgress => return Err(SessionError::AlreadyStarted.into()),
            Phase::Submitted => return Err(SessionError::AlreadySubmitted.into()),
        }

        let questions = self.load_questions().await?;
        let count = questions.len();
        let now = driver.clock().now();
        let event = driver.session_mut().start(questions, now)?;

        info!(
            entrant = entrant.as_str(),
            questions = count,
            duration_secs = self.config.duration_secs,
            "quiz session started"
        );
        driver.set_entrant(entrant);
        driver.notify_started();
        Ok(event)
    }

    /// Create a driver and start it in one step.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::begin`].
    pub async fn start_session(&self, entrant: Entrant) -> Result<QuizDriver, QuizError> {
        let mut driver = self.new_driver()?;
        self.begin(&mut driver, entrant).await?;
        Ok(driver)
    }

    fn build_set(&self, raw: Vec<RawQuestion>) -> Result<QuestionSet, QuestionError> {
        match self.rng_seed {
            Some(seed) => QuestionSet::from_raw(raw, &mut StdRng::seed_from_u64(seed)),
            None => QuestionSet::from_raw(raw, &mut rng()),
        }
    }
}
