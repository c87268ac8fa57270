use std::future::Future;
use std::sync::Arc;

use quiz_core::leaderboard::{RankedEntry, rank};
use quiz_core::model::{AttemptId, QuestionBank, ScoreRecord};
use quiz_core::quiz::{QuizSession, ScoreSubmission};
use storage::repository::{ScoreRepository, StorageError};
use storage::sort::SortKey;

use crate::error::QuizServiceError;

/// How many records the leaderboard read fetches before ranking.
pub const DEFAULT_FETCH_LIMIT: u32 = 50;

/// Result of a detached save, to be applied back to the session.
#[derive(Debug)]
pub struct SaveOutcome {
    pub attempt: AttemptId,
    pub result: Result<ScoreRecord, StorageError>,
}

impl SaveOutcome {
    /// Report the outcome to `session`.
    ///
    /// Returns `Ok(true)` when the record was attached, `Ok(false)` when the
    /// session has since moved on to another attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Persistence` when the store rejected the
    /// save; the session is left ready for a retry.
    pub fn apply(self, session: &mut QuizSession) -> Result<bool, QuizServiceError> {
        match self.result {
            Ok(record) => Ok(session.complete_save(self.attempt, record)),
            Err(err) => {
                session.fail_save(self.attempt);
                Err(err.into())
            }
        }
    }
}

/// Orchestrates quiz attempts against a score store.
#[derive(Clone)]
pub struct QuizLoopService {
    bank: QuestionBank,
    scores: Arc<dyn ScoreRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(bank: QuestionBank, scores: Arc<dyn ScoreRepository>) -> Self {
        Self { bank, scores }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// A fresh session in the intro phase.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        log::debug!("new quiz session with {} questions", self.bank.len());
        QuizSession::new(self.bank.clone())
    }

    /// Persist the session's result under `player_name` and attach the stored record.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` / `Validation` when the session cannot
    /// be saved, and `QuizServiceError::Persistence` when the store fails. A
    /// failed save leaves the session retryable.
    pub async fn save_score(
        &self,
        session: &mut QuizSession,
        player_name: &str,
    ) -> Result<ScoreRecord, QuizServiceError> {
        let submission = session.begin_save(player_name)?;
        let attempt = submission.attempt();
        match self.save_task(submission).await.result {
            Ok(record) => {
                session.complete_save(attempt, record.clone());
                Ok(record)
            }
            Err(err) => {
                session.fail_save(attempt);
                Err(err.into())
            }
        }
    }

    /// Detached save for callers that keep the session interactive meanwhile.
    ///
    /// The returned future owns everything it needs, so it can be handed to
    /// `tokio::spawn`. Apply its [`SaveOutcome`] to the session afterwards.
    pub fn save_task(
        &self,
        submission: ScoreSubmission,
    ) -> impl Future<Output = SaveOutcome> + Send + 'static {
        let scores = Arc::clone(&self.scores);
        async move {
            let attempt = submission.attempt();
            let result = scores.create(submission.score()).await;
            match &result {
                Ok(record) => log::info!(
                    "saved score {} for {} ({})",
                    record.id(),
                    record.player_name(),
                    record.percentage()
                ),
                Err(err) => log::warn!("failed to save score: {err}"),
            }
            SaveOutcome { attempt, result }
        }
    }

    /// Read the best `DEFAULT_FETCH_LIMIT` records and rank them, flagging
    /// `current` if present.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Persistence` when the store cannot be read.
    pub async fn leaderboard(
        &self,
        current: Option<&ScoreRecord>,
    ) -> Result<Vec<RankedEntry>, QuizServiceError> {
        let sort = SortKey::leaderboard();
        let records = self
            .scores
            .list(&sort, DEFAULT_FETCH_LIMIT)
            .await
            .inspect_err(|err| log::warn!("failed to load leaderboard: {err}"))?;
        log::debug!("ranking {} records (sort {sort})", records.len());
        Ok(rank(&records, current))
    }

    /// Save, then re-read the leaderboard once the create has completed.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::save_score`] and
    /// [`QuizLoopService::leaderboard`].
    pub async fn save_and_refresh(
        &self,
        session: &mut QuizSession,
        player_name: &str,
    ) -> Result<Vec<RankedEntry>, QuizServiceError> {
        let record = self.save_score(session, player_name).await?;
        self.leaderboard(Some(&record)).await
    }
}
