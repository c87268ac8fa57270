//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ScoreError;
use quiz_core::quiz::QuizError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizLoopService`.
///
/// Every variant is recoverable: the session keeps its score and a failed
/// save can be retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(QuizError),
    #[error("invalid score: {0}")]
    Validation(ScoreError),
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

impl From<QuizError> for QuizServiceError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::Score(inner) => QuizServiceError::Validation(inner),
            other => QuizServiceError::Quiz(other),
        }
    }
}

impl From<ScoreError> for QuizServiceError {
    fn from(err: ScoreError) -> Self {
        QuizServiceError::Validation(err)
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("remote backend requested but QUIZ_API_URL is not set")]
    RemoteNotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_errors_inside_quiz_errors_become_validation() {
        let err: QuizServiceError = QuizError::Score(ScoreError::EmptyPlayerName).into();
        assert!(matches!(
            err,
            QuizServiceError::Validation(ScoreError::EmptyPlayerName)
        ));

        let err: QuizServiceError = QuizError::AlreadySaved.into();
        assert!(matches!(err, QuizServiceError::Quiz(QuizError::AlreadySaved)));
    }
}
