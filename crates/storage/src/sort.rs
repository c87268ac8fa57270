use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SortKeyError {
    #[error("sort key cannot be empty")]
    Empty,

    #[error("unknown sort field: {0}")]
    UnknownField(String),
}

/// Score fields a store can order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Percentage,
    Score,
    CreatedAt,
}

impl SortField {
    /// Field name as used by the entity API.
    #[must_use]
    pub fn api_name(self) -> &'static str {
        match self {
            SortField::Percentage => "percentage",
            SortField::Score => "score",
            SortField::CreatedAt => "created_date",
        }
    }

    /// Column name in the `quiz_scores` table.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            SortField::Percentage => "percentage",
            SortField::Score => "score",
            SortField::CreatedAt => "created_at",
        }
    }
}

/// Ordering requested from a score store, written `"-field"` for descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    #[must_use]
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    #[must_use]
    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    /// The leaderboard query: best percentage first.
    #[must_use]
    pub fn leaderboard() -> Self {
        Self::descending(SortField::Percentage)
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::leaderboard()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(self.field.api_name())
    }
}

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if name.is_empty() {
            return Err(SortKeyError::Empty);
        }
        let field = match name {
            "percentage" => SortField::Percentage,
            "score" => SortField::Score,
            "created_date" | "created_at" => SortField::CreatedAt,
            other => return Err(SortKeyError::UnknownField(other.to_string())),
        };
        Ok(Self { field, descending })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descending_percentage() {
        let key: SortKey = "-percentage".parse().unwrap();
        assert_eq!(key, SortKey::leaderboard());
        assert_eq!(key.to_string(), "-percentage");
    }

    #[test]
    fn parses_created_aliases() {
        let a: SortKey = "created_date".parse().unwrap();
        let b: SortKey = "+created_at".parse().unwrap();
        assert_eq!(a, b);
        assert!(!a.descending);
        assert_eq!(a.to_string(), "created_date");
    }

    #[test]
    fn rejects_unknown_or_empty() {
        assert_eq!("-".parse::<SortKey>(), Err(SortKeyError::Empty));
        assert_eq!(
            "-name".parse::<SortKey>(),
            Err(SortKeyError::UnknownField("name".into()))
        );
    }
}
