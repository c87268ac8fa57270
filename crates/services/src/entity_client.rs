use std::env;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use quiz_core::model::{NewScore, ScoreId, ScoreRecord};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use storage::repository::{ScoreRepository, StorageError};
use storage::sort::SortKey;

pub const DEFAULT_ENTITY: &str = "QuizScore";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct EntityApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub entity: String,
    pub timeout: Duration,
}

impl EntityApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            entity: DEFAULT_ENTITY.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read `QUIZ_API_URL` and friends; `None` when no base URL is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("QUIZ_API_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let api_key = env::var("QUIZ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let entity = env::var("QUIZ_ENTITY")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENTITY.into());
        let timeout_secs = env::var("QUIZ_API_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            base_url,
            api_key,
            entity,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/entities/{}",
            self.base_url.trim().trim_end_matches('/'),
            self.entity
        )
    }
}

/// Score store backed by a hosted entity API.
#[derive(Clone)]
pub struct EntityApiRepository {
    client: Client,
    config: EntityApiConfig,
}

impl EntityApiRepository {
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be built.
    pub fn new(config: EntityApiConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &EntityApiConfig {
        &self.config
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("api_key", key),
            None => request,
        }
    }
}

#[async_trait]
impl ScoreRepository for EntityApiRepository {
    async fn list(&self, sort: &SortKey, limit: u32) -> Result<Vec<ScoreRecord>, StorageError> {
        let request = self
            .client
            .get(self.config.collection_url())
            .query(&[("sort", sort.to_string()), ("limit", limit.to_string())]);
        let response = self.authorize(request).send().await.map_err(transport)?;
        let body = read_body(response).await?;

        let entities: Vec<serde_json::Value> = serde_json::from_slice(&body)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        log::debug!(
            "fetched {} {} entities (sort {sort})",
            entities.len(),
            self.config.entity
        );
        Ok(valid_records(entities))
    }

    async fn create(&self, score: &NewScore) -> Result<ScoreRecord, StorageError> {
        let payload = CreateScoreBody::from(score);
        let request = self.client.post(self.config.collection_url()).json(&payload);
        let response = self.authorize(request).send().await.map_err(transport)?;
        let body = read_body(response).await?;

        let entity: ScoreEntity = serde_json::from_slice(&body)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        entity.into_record()
    }
}

/// Other clients write to the same collection, so one malformed row must not
/// hide the rest of the leaderboard.
fn valid_records(entities: Vec<serde_json::Value>) -> Vec<ScoreRecord> {
    entities
        .into_iter()
        .filter_map(|raw| {
            let id = raw
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("<no id>")
                .to_string();
            serde_json::from_value::<ScoreEntity>(raw)
                .map_err(|e| StorageError::Serialization(e.to_string()))
                .and_then(ScoreEntity::into_record)
                .inspect_err(|err| log::warn!("skipping score entity {id}: {err}"))
                .ok()
        })
        .collect()
}

fn transport(err: reqwest::Error) -> StorageError {
    StorageError::Connection(err.to_string())
}

async fn read_body(response: Response) -> Result<Vec<u8>, StorageError> {
    let status = response.status();
    if status.is_client_error() {
        let message = response.text().await.unwrap_or_default();
        return Err(StorageError::Rejected {
            status: status.as_u16(),
            message,
        });
    }
    if !status.is_success() {
        return Err(StorageError::Connection(format!(
            "entity api responded with status {status}"
        )));
    }
    let bytes = response.bytes().await.map_err(transport)?;
    Ok(bytes.to_vec())
}

#[derive(Debug, Serialize)]
struct CreateScoreBody<'a> {
    player_name: &'a str,
    score: u32,
    total_questions: u32,
    percentage: u8,
}

impl<'a> From<&'a NewScore> for CreateScoreBody<'a> {
    fn from(score: &'a NewScore) -> Self {
        Self {
            player_name: score.player_name.as_str(),
            score: score.score,
            total_questions: score.total_questions,
            percentage: score.percentage.value(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScoreEntity {
    id: String,
    player_name: String,
    score: u32,
    total_questions: u32,
    percentage: i64,
    created_date: String,
}

impl ScoreEntity {
    fn into_record(self) -> Result<ScoreRecord, StorageError> {
        let created_at = parse_created_date(&self.created_date)?;
        ScoreRecord::from_persisted(
            ScoreId::new(self.id),
            &self.player_name,
            self.score,
            self.total_questions,
            self.percentage,
            created_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Accepts RFC 3339 and the offset-less form some entity stores emit (read as UTC).
fn parse_created_date(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| StorageError::Serialization(format!("invalid created_date: {raw}")))
}
