//! Leaderboard ordering: percentage descending, most recent first on ties.

use std::cmp::Ordering;

use crate::model::ScoreRecord;

/// Maximum number of entries shown on the leaderboard.
pub const LEADERBOARD_CAP: usize = 10;

/// Shown by front ends when `rank` returns no entries.
pub const EMPTY_LEADERBOARD_MESSAGE: &str = "No scores yet. Be the first!";

/// Podium placement for the first three positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

/// One row of the ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based display position; ties do not share a position.
    pub position: usize,
    pub record: ScoreRecord,
    /// The record the current player just saved.
    pub is_current: bool,
}

impl RankedEntry {
    #[must_use]
    pub fn medal(&self) -> Option<Medal> {
        match self.position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// Leaderboard order: higher percentage first, then newer `created_at` first.
#[must_use]
pub fn compare(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.percentage()
        .cmp(&a.percentage())
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

/// Order, cap and flag score records for display.
///
/// The sort is stable, so records equal in both percentage and `created_at`
/// keep their input order. Records past [`LEADERBOARD_CAP`] are dropped even if
/// they tie with the last shown entry.
#[must_use]
pub fn rank(records: &[ScoreRecord], current: Option<&ScoreRecord>) -> Vec<RankedEntry> {
    let mut sorted: Vec<&ScoreRecord> = records.iter().collect();
    sorted.sort_by(|a, b| compare(a, b));
    sorted.truncate(LEADERBOARD_CAP);

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, record)| RankedEntry {
            position: i + 1,
            record: record.clone(),
            is_current: current.is_some_and(|c| c.id() == record.id()),
        })
        .collect()
}
