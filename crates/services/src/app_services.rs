use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::repository::{ScoreRepository, Storage};

use crate::Clock;
use crate::entity_client::{EntityApiConfig, EntityApiRepository};
use crate::error::AppServicesError;
use crate::quiz_loop::QuizLoopService;

/// Where scores are read from and written to.
#[derive(Clone, Debug)]
pub enum Backend {
    Sqlite { url: String },
    Remote(EntityApiConfig),
}

impl Backend {
    /// Remote when `QUIZ_BACKEND=remote`, otherwise `SQLite` at `default_db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::RemoteNotConfigured` if the remote backend is
    /// selected without `QUIZ_API_URL`.
    pub fn from_env(default_db_url: &str) -> Result<Self, AppServicesError> {
        let remote = std::env::var("QUIZ_BACKEND")
            .is_ok_and(|value| value.trim().eq_ignore_ascii_case("remote"));
        if remote {
            return Self::remote_from_env();
        }
        let url = std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| default_db_url.to_string());
        Ok(Self::Sqlite { url })
    }

    /// # Errors
    ///
    /// Returns `AppServicesError::RemoteNotConfigured` without `QUIZ_API_URL`.
    pub fn remote_from_env() -> Result<Self, AppServicesError> {
        EntityApiConfig::from_env()
            .map(Self::Remote)
            .ok_or(AppServicesError::RemoteNotConfigured)
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Backend::Sqlite { url } => format!("sqlite ({url})"),
            Backend::Remote(config) => format!("entity api ({})", config.base_url),
        }
    }
}

/// Assembles app-facing services over the selected backend.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, clock).await?;
        Ok(Self::from_storage(storage))
    }

    /// Build services backed by the hosted entity API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the HTTP client cannot be built.
    pub fn new_remote(config: EntityApiConfig) -> Result<Self, AppServicesError> {
        let scores: Arc<dyn ScoreRepository> = Arc::new(EntityApiRepository::new(config)?);
        Ok(Self::from_storage(Storage { scores }))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(Storage::in_memory(clock))
    }

    /// # Errors
    ///
    /// See [`AppServices::new_sqlite`] and [`AppServices::new_remote`].
    pub async fn connect(backend: Backend, clock: Clock) -> Result<Self, AppServicesError> {
        log::info!("using {} for scores", backend.describe());
        match backend {
            Backend::Sqlite { url } => Self::new_sqlite(&url, clock).await,
            Backend::Remote(config) => Self::new_remote(config),
        }
    }

    #[must_use]
    pub fn from_storage(storage: Storage) -> Self {
        let quiz = QuizLoopService::new(QuestionBank::synaptic(), storage.scores);
        Self {
            quiz: Arc::new(quiz),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn describes_backends() {
        let sqlite = Backend::Sqlite {
            url: "sqlite://quiz.sqlite3".into(),
        };
        assert_eq!(sqlite.describe(), "sqlite (sqlite://quiz.sqlite3)");
        let remote = Backend::Remote(EntityApiConfig::new("https://api.example.test"));
        assert_eq!(remote.describe(), "entity api (https://api.example.test)");
    }

    #[test]
    fn in_memory_services_use_the_full_bank() {
        let services = AppServices::in_memory(Clock::fixed(fixed_now()));
        assert_eq!(services.quiz().bank().len(), 12);
    }

    #[test]
    fn remote_services_build_without_network() {
        let services = AppServices::new_remote(EntityApiConfig::new("https://api.example.test"));
        assert!(services.is_ok());
    }
}
