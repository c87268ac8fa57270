use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::ScoreId;

/// Maximum length of a player name, in characters.
pub const PLAYER_NAME_MAX_LEN: usize = 30;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("player name cannot be empty")]
    EmptyPlayerName,

    #[error("player name is {len} characters, limit is {PLAYER_NAME_MAX_LEN}")]
    PlayerNameTooLong { len: usize },

    #[error("a score needs at least one question")]
    NoQuestions,

    #[error("score {score} exceeds total questions {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("percentage must be between 0 and 100, got {0}")]
    PercentageOutOfRange(i64),
}

//
// ─── PLAYER NAME ───────────────────────────────────────────────────────────────
//

/// Display name attached to a saved score: trimmed, 1–30 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Validates and normalizes a player name.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyPlayerName` if the name is blank after trimming,
    /// or `ScoreError::PlayerNameTooLong` if it exceeds `PLAYER_NAME_MAX_LEN` characters.
    pub fn parse(raw: &str) -> Result<Self, ScoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScoreError::EmptyPlayerName);
        }
        let len = trimmed.chars().count();
        if len > PLAYER_NAME_MAX_LEN {
            return Err(ScoreError::PlayerNameTooLong { len });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = ScoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlayerName> for String {
    fn from(value: PlayerName) -> Self {
        value.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── PERCENTAGE ────────────────────────────────────────────────────────────────
//

/// Whole-number percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Computes `round(100 * score / total)` with halves rounded up.
    ///
    /// Uses integer arithmetic so `1/8` (12.5) rounds to 13 exactly.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::NoQuestions` if `total` is zero and
    /// `ScoreError::ScoreExceedsTotal` if `score > total`.
    pub fn of(score: u32, total: u32) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::NoQuestions);
        }
        if score > total {
            return Err(ScoreError::ScoreExceedsTotal { score, total });
        }
        let score = u64::from(score);
        let total = u64::from(total);
        let rounded = (200 * score + total) / (2 * total);
        // score <= total keeps this within 0..=100
        Ok(Self(u8::try_from(rounded).unwrap_or(100)))
    }

    /// Wraps an already computed percentage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::PercentageOutOfRange` outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, ScoreError> {
        if (0..=100).contains(&value) {
            Ok(Self(u8::try_from(value).unwrap_or(0)))
        } else {
            Err(ScoreError::PercentageOutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Percentage {
    type Error = ScoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

//
// ─── NEW SCORE ─────────────────────────────────────────────────────────────────
//

/// Fields submitted to the score store when a player saves a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub player_name: PlayerName,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: Percentage,
}

impl NewScore {
    /// Builds a submission, deriving the percentage from `score` and `total_questions`.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` if the counts are inconsistent.
    pub fn new(player_name: PlayerName, score: u32, total_questions: u32) -> Result<Self, ScoreError> {
        let percentage = Percentage::of(score, total_questions)?;
        Ok(Self {
            player_name,
            score,
            total_questions,
            percentage,
        })
    }
}

//
// ─── SCORE RECORD ──────────────────────────────────────────────────────────────
//

/// A persisted leaderboard entry, owned by the score store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    id: ScoreId,
    player_name: PlayerName,
    score: u32,
    total_questions: u32,
    percentage: Percentage,
    created_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Rehydrate a record from a storage backend.
    ///
    /// The percentage is taken as stored; stores are free to have recorded it
    /// with a different question count than the current bank.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` if the name, counts, or percentage are out of range.
    pub fn from_persisted(
        id: ScoreId,
        player_name: &str,
        score: u32,
        total_questions: u32,
        percentage: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ScoreError> {
        let player_name = PlayerName::parse(player_name)?;
        if total_questions == 0 {
            return Err(ScoreError::NoQuestions);
        }
        if score > total_questions {
            return Err(ScoreError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }
        let percentage = Percentage::new(percentage)?;

        Ok(Self {
            id,
            player_name,
            score,
            total_questions,
            percentage,
            created_at,
        })
    }

    /// Materialize a record for a submission the store has just accepted.
    #[must_use]
    pub fn from_new(id: ScoreId, score: &NewScore, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            player_name: score.player_name.clone(),
            score: score.score,
            total_questions: score.total_questions,
            percentage: score.percentage,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ScoreId {
        &self.id
    }

    #[must_use]
    pub fn player_name(&self) -> &PlayerName {
        &self.player_name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(Percentage::of(7, 12).unwrap().value(), 58);
        assert_eq!(Percentage::of(1, 3).unwrap().value(), 33);
        assert_eq!(Percentage::of(1, 8).unwrap().value(), 13);
        assert_eq!(Percentage::of(2, 3).unwrap().value(), 67);
        assert_eq!(Percentage::of(0, 12).unwrap().value(), 0);
        assert_eq!(Percentage::of(12, 12).unwrap().value(), 100);
    }

    #[test]
    fn percentage_rejects_inconsistent_counts() {
        assert_eq!(Percentage::of(1, 0), Err(ScoreError::NoQuestions));
        assert_eq!(
            Percentage::of(5, 4),
            Err(ScoreError::ScoreExceedsTotal { score: 5, total: 4 })
        );
        assert_eq!(Percentage::new(101), Err(ScoreError::PercentageOutOfRange(101)));
        assert_eq!(Percentage::new(-1), Err(ScoreError::PercentageOutOfRange(-1)));
    }

    #[test]
    fn player_name_is_trimmed_and_bounded() {
        assert_eq!(PlayerName::parse("  Ada  ").unwrap().as_str(), "Ada");
        assert_eq!(PlayerName::parse("   "), Err(ScoreError::EmptyPlayerName));

        let thirty = "n".repeat(30);
        assert!(PlayerName::parse(&thirty).is_ok());
        let long = "n".repeat(31);
        assert_eq!(
            PlayerName::parse(&long),
            Err(ScoreError::PlayerNameTooLong { len: 31 })
        );
    }

    #[test]
    fn player_name_counts_characters_not_bytes() {
        let name = "é".repeat(30);
        assert!(name.len() > 30);
        assert!(PlayerName::parse(&name).is_ok());
    }

    #[test]
    fn new_score_derives_percentage() {
        let name = PlayerName::parse("Ada").unwrap();
        let score = NewScore::new(name, 7, 12).unwrap();
        assert_eq!(score.percentage.value(), 58);
    }

    #[test]
    fn from_persisted_validates() {
        let now = fixed_now();
        let ok = ScoreRecord::from_persisted(ScoreId::new("a"), "Ada", 7, 12, 58, now).unwrap();
        assert_eq!(ok.percentage().value(), 58);
        assert_eq!(ok.player_name().as_str(), "Ada");

        let err = ScoreRecord::from_persisted(ScoreId::new("a"), "Ada", 13, 12, 100, now);
        assert!(matches!(err, Err(ScoreError::ScoreExceedsTotal { .. })));

        let err = ScoreRecord::from_persisted(ScoreId::new("a"), "", 1, 12, 8, now);
        assert_eq!(err, Err(ScoreError::EmptyPlayerName));
    }
}
