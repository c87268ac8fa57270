use std::fmt;

use crate::model::score::Percentage;

/// Performance band shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    /// 90% and above.
    Expert,
    /// 70–89%.
    Great,
    /// 50–69%.
    Good,
    /// Below 50%.
    KeepLearning,
}

impl Grade {
    #[must_use]
    pub fn for_percentage(percentage: Percentage) -> Self {
        match percentage.value() {
            90.. => Self::Expert,
            70..=89 => Self::Great,
            50..=69 => Self::Good,
            _ => Self::KeepLearning,
        }
    }

    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Self::Expert => "Neuroscience Expert!",
            Self::Great => "Great Understanding!",
            Self::Good => "Good Progress!",
            Self::KeepLearning => "Keep Learning!",
        }
    }

    /// Whether the result earns the trophy treatment (70% and above).
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Self::Expert | Self::Great)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(value: i64) -> Grade {
        Grade::for_percentage(Percentage::new(value).unwrap())
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(grade(100), Grade::Expert);
        assert_eq!(grade(90), Grade::Expert);
        assert_eq!(grade(89), Grade::Great);
        assert_eq!(grade(70), Grade::Great);
        assert_eq!(grade(69), Grade::Good);
        assert_eq!(grade(50), Grade::Good);
        assert_eq!(grade(49), Grade::KeepLearning);
        assert_eq!(grade(0), Grade::KeepLearning);
    }

    #[test]
    fn high_grades() {
        assert!(Grade::Great.is_high());
        assert!(!Grade::Good.is_high());
        assert_eq!(Grade::Expert.to_string(), "Neuroscience Expert!");
    }
}
