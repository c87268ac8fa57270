use quiz_core::model::{ScoreId, ScoreRecord};
use sqlx::Row;
use sqlx::error::ErrorKind;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Constraint violations mean the store refused the data; anything else is
/// treated as the database being unreachable.
pub(crate) fn db_error(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        let status = match db.kind() {
            ErrorKind::UniqueViolation => Some(409),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => Some(422),
            _ => None,
        };
        if let Some(status) = status {
            return StorageError::Rejected {
                status,
                message: db.message().to_string(),
            };
        }
    }
    StorageError::Connection(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_score_row(row: &sqlx::sqlite::SqliteRow) -> Result<ScoreRecord, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let player_name: String = row.try_get("player_name").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let total_questions = u32_from_i64(
        "total_questions",
        row.try_get::<i64, _>("total_questions").map_err(ser)?,
    )?;
    let percentage: i64 = row.try_get("percentage").map_err(ser)?;
    let created_at = row.try_get("created_at").map_err(ser)?;

    ScoreRecord::from_persisted(
        ScoreId::new(id),
        &player_name,
        score,
        total_questions,
        percentage,
        created_at,
    )
    .map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteRepository;

    async fn migrated(name: &str) -> SqliteRepository {
        let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
        let repo = SqliteRepository::connect(&url).await.unwrap();
        repo.migrate().await.unwrap();
        repo
    }

    async fn insert_raw(
        repo: &SqliteRepository,
        id: &str,
        score: i64,
        percentage: i64,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO quiz_scores (id, player_name, score, total_questions, percentage, created_at)
             VALUES (?1, 'Ada', ?2, 12, ?3, '2023-11-14T22:13:20Z')",
        )
        .bind(id)
        .bind(score)
        .bind(percentage)
        .execute(repo.pool())
        .await
        .map(|_| ())
        .map_err(db_error)
    }

    #[tokio::test]
    async fn check_violation_is_rejected() {
        let repo = migrated("memdb_mapping_check").await;
        let err = insert_raw(&repo, "a", 7, 150).await.unwrap_err();
        assert!(matches!(err, StorageError::Rejected { status: 422, .. }));

        let err = insert_raw(&repo, "b", 13, 100).await.unwrap_err();
        assert!(matches!(err, StorageError::Rejected { status: 422, .. }));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = migrated("memdb_mapping_unique").await;
        insert_raw(&repo, "dup", 7, 58).await.unwrap();
        let err = insert_raw(&repo, "dup", 7, 58).await.unwrap_err();
        assert!(matches!(err, StorageError::Rejected { status: 409, .. }));
    }

    #[test]
    fn other_errors_are_connection_failures() {
        assert!(matches!(
            db_error(sqlx::Error::PoolTimedOut),
            StorageError::Connection(_)
        ));
    }
}
