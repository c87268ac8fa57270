use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct option index {index} is out of range")]
    CorrectOutOfRange { index: usize },

    #[error("question bank cannot be empty")]
    EmptyBank,
}

//
// ─── OPTION INDEX ──────────────────────────────────────────────────────────────
//

/// Position of an answer option, always in `0..OPTION_COUNT`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionIndex(u8);

impl OptionIndex {
    pub const ALL: [OptionIndex; OPTION_COUNT] = [Self(0), Self(1), Self(2), Self(3)];

    /// Returns `None` when `index` is not a valid option position.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        if index < OPTION_COUNT {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    /// Parses an option letter (`A`–`D`, case-insensitive).
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return None;
        }
        Self::new(usize::from(upper as u8 - b'A'))
    }

    #[must_use]
    pub fn value(self) -> usize {
        usize::from(self.0)
    }

    /// Display letter used in front of the option text.
    #[must_use]
    pub fn letter(self) -> char {
        char::from(b'A' + self.0)
    }
}

impl fmt::Debug for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionIndex({})", self.0)
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: [String; OPTION_COUNT],
    correct: OptionIndex,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` or `QuestionError::EmptyOption` for blank
    /// text, and `QuestionError::CorrectOutOfRange` if `correct` is not a valid option.
    pub fn new(
        text: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        let correct =
            OptionIndex::new(correct).ok_or(QuestionError::CorrectOutOfRange { index: correct })?;

        Ok(Self {
            text,
            options: options.map(str::to_owned),
            correct,
        })
    }

    /// Builds a question from compile-time data that is known to be valid.
    pub(super) fn from_static(text: &str, options: [&str; OPTION_COUNT], correct: u8) -> Self {
        debug_assert!(usize::from(correct) < OPTION_COUNT);
        Self {
            text: text.to_owned(),
            options: options.map(str::to_owned),
            correct: OptionIndex(correct),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &str {
        &self.options[index.value()]
    }

    #[must_use]
    pub fn correct(&self) -> OptionIndex {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, index: OptionIndex) -> bool {
        self.correct == index
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Fixed, ordered, non-empty set of questions shared by every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// Builds a bank from an ordered list of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyBank` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::EmptyBank);
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    pub(super) fn from_static(questions: Vec<Question>) -> Self {
        debug_assert!(!questions.is_empty());
        Self {
            questions: questions.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions as stored on score records.
    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_index_bounds() {
        assert!(OptionIndex::new(3).is_some());
        assert!(OptionIndex::new(4).is_none());
    }

    #[test]
    fn option_letters_round_trip() {
        for index in OptionIndex::ALL {
            assert_eq!(OptionIndex::from_letter(index.letter()), Some(index));
        }
        assert_eq!(OptionIndex::from_letter('c'), OptionIndex::new(2));
        assert_eq!(OptionIndex::from_letter('E'), None);
        assert_eq!(OptionIndex::from_letter('1'), None);
    }

    #[test]
    fn question_rejects_bad_input() {
        assert_eq!(
            Question::new(" ", ["a", "b", "c", "d"], 0).unwrap_err(),
            QuestionError::EmptyText
        );
        assert_eq!(
            Question::new("Q", ["a", "", "c", "d"], 0).unwrap_err(),
            QuestionError::EmptyOption { index: 1 }
        );
        assert_eq!(
            Question::new("Q", ["a", "b", "c", "d"], 4).unwrap_err(),
            QuestionError::CorrectOutOfRange { index: 4 }
        );
    }

    #[test]
    fn question_reports_correct_option() {
        let q = Question::new("Q", ["a", "b", "c", "d"], 2).unwrap();
        assert!(q.is_correct(OptionIndex::new(2).unwrap()));
        assert!(!q.is_correct(OptionIndex::new(0).unwrap()));
        assert_eq!(q.option(q.correct()), "c");
    }

    #[test]
    fn empty_bank_is_rejected() {
        assert_eq!(QuestionBank::new(Vec::new()).unwrap_err(), QuestionError::EmptyBank);
    }
}
