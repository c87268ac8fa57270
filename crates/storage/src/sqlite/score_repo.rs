use quiz_core::model::{NewScore, ScoreRecord};

use super::SqliteRepository;
use super::mapping::{db_error, map_score_row};
use crate::repository::{ScoreRepository, StorageError, new_score_id};
use crate::sort::SortKey;

#[async_trait::async_trait]
impl ScoreRepository for SqliteRepository {
    async fn list(&self, sort: &SortKey, limit: u32) -> Result<Vec<ScoreRecord>, StorageError> {
        // Column names come from a closed enum, never from user input.
        let direction = if sort.descending { "DESC" } else { "ASC" };
        let sql = format!(
            r"
                SELECT id, player_name, score, total_questions, percentage, created_at
                FROM quiz_scores
                ORDER BY {column} {direction}, rowid ASC
                LIMIT ?1
            ",
            column = sort.field.column(),
        );

        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_score_row(&row)?);
        }
        Ok(out)
    }

    async fn create(&self, score: &NewScore) -> Result<ScoreRecord, StorageError> {
        let record = ScoreRecord::from_new(new_score_id(), score, self.clock.now());

        sqlx::query(
            r"
                INSERT INTO quiz_scores (
                    id, player_name, score, total_questions, percentage, created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(record.id().as_str())
        .bind(record.player_name().as_str())
        .bind(i64::from(record.score()))
        .bind(i64::from(record.total_questions()))
        .bind(i64::from(record.percentage().value()))
        .bind(record.created_at())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(record)
    }
}
