use async_trait::async_trait;
use quiz_core::Clock;
use quiz_core::model::{NewScore, ScoreId, ScoreRecord};
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::sort::{SortField, SortKey};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("rejected by store (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Contract of the score store the quiz reads from and writes to.
///
/// Stores only create and list; records are never updated or deleted.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Fetch up to `limit` records ordered by `sort`.
    ///
    /// Ordering among records equal under `sort` is store-defined.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list(&self, sort: &SortKey, limit: u32) -> Result<Vec<ScoreRecord>, StorageError>;

    /// Persist a new score; the store assigns `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the score cannot be stored.
    async fn create(&self, score: &NewScore) -> Result<ScoreRecord, StorageError>;
}

pub(crate) fn compare_by(sort: &SortKey, a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    let ord = match sort.field {
        SortField::Percentage => a.percentage().cmp(&b.percentage()),
        SortField::Score => a.score().cmp(&b.score()),
        SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
    };
    if sort.descending { ord.reverse() } else { ord }
}

pub(crate) fn new_score_id() -> ScoreId {
    ScoreId::new(uuid::Uuid::new_v4().simple().to_string())
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Records equal under the requested sort come back in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    clock: Clock,
    scores: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            scores: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Insert an already persisted record, e.g. to seed fixtures.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert(&self, record: ScoreRecord) -> Result<(), StorageError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record);
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn list(&self, sort: &SortKey, limit: u32) -> Result<Vec<ScoreRecord>, StorageError> {
        let guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut out = guard.clone();
        drop(guard);

        out.sort_by(|a, b| compare_by(sort, a, b));
        out.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(out)
    }

    async fn create(&self, score: &NewScore) -> Result<ScoreRecord, StorageError> {
        let record = ScoreRecord::from_new(new_score_id(), score, self.clock.now());
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record.clone());
        log::debug!("stored score {} in memory", record.id());
        Ok(record)
    }
}

/// Holds the score store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self {
            scores: Arc::new(InMemoryRepository::with_clock(clock)),
        }
    }
}
