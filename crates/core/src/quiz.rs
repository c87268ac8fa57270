//! Quiz session state machine: `Intro → Playing → Results`, with restart.

use std::fmt;

use thiserror::Error;

use crate::model::{
    AttemptId, Grade, NewScore, OPTION_COUNT, OptionIndex, Percentage, PlayerName, Question,
    QuestionBank, ScoreError, ScoreRecord,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("cannot {action} while in {phase}")]
    InvalidTransition { action: QuizAction, phase: Phase },

    #[error("the current question has already been answered")]
    AlreadyAnswered,

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("option index {index} is out of range")]
    OptionOutOfRange { index: usize },

    #[error("this attempt has already been saved")]
    AlreadySaved,

    #[error("a save for this attempt is still in flight")]
    SaveInFlight,

    #[error(transparent)]
    Score(#[from] ScoreError),
}

//
// ─── PHASE / ACTION ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Intro,
    Playing,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Intro => "intro",
            Phase::Playing => "playing",
            Phase::Results => "results",
        })
    }
}

/// User actions that drive the session, used to report rejected transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizAction {
    Start,
    SelectAnswer,
    Advance,
    SaveScore,
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuizAction::Start => "start",
            QuizAction::SelectAnswer => "select an answer",
            QuizAction::Advance => "advance",
            QuizAction::SaveScore => "save the score",
        })
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What the player learns right after choosing an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub selected: OptionIndex,
    pub correct: OptionIndex,
    pub is_correct: bool,
}

/// Where `advance()` landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    NextQuestion,
    Finished,
}

/// Per-option display state for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    /// Not revealed yet; the option can be chosen.
    Selectable,
    /// Revealed; this is the right answer.
    Correct,
    /// Revealed; the player chose this wrong answer.
    Incorrect,
    /// Revealed; neither chosen nor correct.
    Dimmed,
}

/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen.
    pub question_number: usize,
    pub total: usize,
    /// Questions whose answer has been revealed so far.
    pub answered: usize,
    pub score: u32,
}

impl QuizProgress {
    /// Share of the quiz reached, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.question_number as f64 / self.total as f64
    }
}

/// Final tally of a finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResults {
    pub score: u32,
    pub total: u32,
    pub incorrect: u32,
    pub percentage: Percentage,
    pub grade: Grade,
}

/// A validated score ready to be handed to the score store.
///
/// Carries the attempt it was produced for so the completion can be matched
/// back to the session after an asynchronous save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    attempt: AttemptId,
    score: NewScore,
}

impl ScoreSubmission {
    #[must_use]
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    #[must_use]
    pub fn score(&self) -> &NewScore {
        &self.score
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one player's quiz attempt.
///
/// Owned by a single caller and mutated only through the transition methods.
/// Every rejected transition returns an error and leaves the state untouched.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    attempt: AttemptId,
    phase: Phase,
    current: usize,
    selected: Option<OptionIndex>,
    score: u32,
    saved: Option<ScoreRecord>,
    save_in_flight: bool,
}

impl QuizSession {
    /// Creates a session in the intro phase.
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            attempt: AttemptId::default(),
            phase: Phase::Intro,
            current: 0,
            selected: None,
            score: 0,
            saved: None,
            save_in_flight: false,
        }
    }

    /// Begin a fresh attempt from the intro or results screen.
    ///
    /// The previous attempt's state is discarded entirely.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` while an attempt is being played.
    pub fn start(&mut self) -> Result<AttemptId, QuizError> {
        if self.phase == Phase::Playing {
            return Err(self.invalid(QuizAction::Start));
        }

        let mut next = Self::new(self.bank.clone());
        next.attempt = self.attempt.next();
        next.phase = Phase::Playing;
        *self = next;
        Ok(self.attempt)
    }

    /// Choose an option by position (0-based).
    ///
    /// # Errors
    ///
    /// See [`QuizSession::select_option`]; additionally returns
    /// `QuizError::OptionOutOfRange` when `index >= OPTION_COUNT`.
    pub fn select_answer(&mut self, index: usize) -> Result<AnswerFeedback, QuizError> {
        self.ensure_phase(Phase::Playing, QuizAction::SelectAnswer)?;
        if self.selected.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let option = OptionIndex::new(index).ok_or(QuizError::OptionOutOfRange { index })?;
        self.select_option(option)
    }

    /// Choose an option and reveal the answer, scoring at most once per question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside the playing phase and
    /// `QuizError::AlreadyAnswered` if the answer is already revealed.
    pub fn select_option(&mut self, option: OptionIndex) -> Result<AnswerFeedback, QuizError> {
        self.ensure_phase(Phase::Playing, QuizAction::SelectAnswer)?;
        if self.selected.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let correct = self
            .current_question()
            .map(Question::correct)
            .ok_or_else(|| self.invalid(QuizAction::SelectAnswer))?;

        let is_correct = option == correct;
        self.selected = Some(option);
        if is_correct {
            self.score = self.score.saturating_add(1);
        }

        Ok(AnswerFeedback {
            selected: option,
            correct,
            is_correct,
        })
    }

    /// Move past a revealed question; from the last one this enters results.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside the playing phase and
    /// `QuizError::NotAnswered` before the current answer is revealed.
    pub fn advance(&mut self) -> Result<Advanced, QuizError> {
        self.ensure_phase(Phase::Playing, QuizAction::Advance)?;
        if self.selected.is_none() {
            return Err(QuizError::NotAnswered);
        }

        if self.is_last_question() {
            self.phase = Phase::Results;
            Ok(Advanced::Finished)
        } else {
            self.current += 1;
            self.selected = None;
            Ok(Advanced::NextQuestion)
        }
    }

    /// Validate a save request and mark it in flight.
    ///
    /// The returned submission is persisted by the caller, which then reports
    /// back through [`QuizSession::complete_save`] or [`QuizSession::fail_save`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` outside results,
    /// `QuizError::AlreadySaved` / `QuizError::SaveInFlight` when a save exists or
    /// is pending, and `QuizError::Score` for an invalid player name.
    pub fn begin_save(&mut self, player_name: &str) -> Result<ScoreSubmission, QuizError> {
        self.ensure_phase(Phase::Results, QuizAction::SaveScore)?;
        if self.saved.is_some() {
            return Err(QuizError::AlreadySaved);
        }
        if self.save_in_flight {
            return Err(QuizError::SaveInFlight);
        }

        let player_name = PlayerName::parse(player_name)?;
        let score = NewScore::new(player_name, self.score, self.bank.total())?;
        self.save_in_flight = true;

        Ok(ScoreSubmission {
            attempt: self.attempt,
            score,
        })
    }

    /// Record the store's copy of a saved score.
    ///
    /// Returns `false` and changes nothing if `attempt` is no longer the
    /// current attempt (the player restarted while the save was pending) or
    /// no save is in flight for it.
    pub fn complete_save(&mut self, attempt: AttemptId, record: ScoreRecord) -> bool {
        if attempt != self.attempt || self.phase != Phase::Results || !self.save_in_flight {
            return false;
        }
        self.saved = Some(record);
        self.save_in_flight = false;
        true
    }

    /// Clear the in-flight marker after a failed save so the player can retry.
    ///
    /// Returns `false` if `attempt` is stale or no save is in flight.
    pub fn fail_save(&mut self, attempt: AttemptId) -> bool {
        if attempt != self.attempt || !self.save_in_flight {
            return false;
        }
        self.save_in_flight = false;
        true
    }

    fn ensure_phase(&self, expected: Phase, action: QuizAction) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: QuizAction) -> QuizError {
        QuizError::InvalidTransition {
            action,
            phase: self.phase,
        }
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn selected(&self) -> Option<OptionIndex> {
        self.selected
    }

    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.selected.is_some()
    }

    #[must_use]
    pub fn saved_record(&self) -> Option<&ScoreRecord> {
        self.saved.as_ref()
    }

    #[must_use]
    pub fn is_save_in_flight(&self) -> bool {
        self.save_in_flight
    }

    /// True when the save form should be offered.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.phase == Phase::Results && self.saved.is_none() && !self.save_in_flight
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.bank.len()
    }

    /// The question on screen; `None` outside the playing phase.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Playing {
            self.bank.get(self.current)
        } else {
            None
        }
    }

    /// 1-based number of the current question.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.bank.len()
    }

    /// Number of questions whose answer has been revealed in this attempt.
    #[must_use]
    pub fn answered(&self) -> usize {
        match self.phase {
            Phase::Intro => 0,
            Phase::Playing => self.current + usize::from(self.answer_revealed()),
            Phase::Results => self.bank.len(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            question_number: self.question_number(),
            total: self.bank.len(),
            answered: self.answered(),
            score: self.score,
        }
    }

    /// Display state of each option; `None` outside the playing phase.
    #[must_use]
    pub fn option_states(&self) -> Option<[OptionState; OPTION_COUNT]> {
        let question = self.current_question()?;
        let Some(selected) = self.selected else {
            return Some([OptionState::Selectable; OPTION_COUNT]);
        };

        Some(OptionIndex::ALL.map(|option| {
            if question.is_correct(option) {
                OptionState::Correct
            } else if option == selected {
                OptionState::Incorrect
            } else {
                OptionState::Dimmed
            }
        }))
    }

    /// Final tally; `None` until the attempt reaches results.
    #[must_use]
    pub fn results(&self) -> Option<QuizResults> {
        if self.phase != Phase::Results {
            return None;
        }
        let total = self.bank.total();
        let percentage = Percentage::of(self.score, total).ok()?;
        Some(QuizResults {
            score: self.score,
            total,
            incorrect: total.saturating_sub(self.score),
            percentage,
            grade: Grade::for_percentage(percentage),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScoreId;
    use crate::time::fixed_now;

    fn bank(correct: &[usize]) -> QuestionBank {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| Question::new(format!("Q{i}"), ["a", "b", "c", "d"], c).unwrap())
            .collect();
        QuestionBank::new(questions).unwrap()
    }

    fn playing(correct: &[usize]) -> QuizSession {
        let mut session = QuizSession::new(bank(correct));
        session.start().unwrap();
        session
    }

    fn finish_with(session: &mut QuizSession, answers: &[usize]) {
        for &answer in answers {
            session.select_answer(answer).unwrap();
            session.advance().unwrap();
        }
    }

    fn record_for(submission: &ScoreSubmission, id: &str) -> ScoreRecord {
        ScoreRecord::from_new(ScoreId::new(id), submission.score(), fixed_now())
    }

    #[test]
    fn new_session_starts_in_intro() {
        let session = QuizSession::new(bank(&[0, 1]));
        assert_eq!(session.phase(), Phase::Intro);
        assert!(session.current_question().is_none());
        assert_eq!(session.answered(), 0);
    }

    #[test]
    fn start_resets_everything() {
        let session = playing(&[0, 1, 2]);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.selected().is_none());
        assert!(!session.answer_revealed());
        assert!(session.saved_record().is_none());
        assert_eq!(session.attempt(), AttemptId::new(1));
    }

    #[test]
    fn correct_answer_scores_once() {
        let mut session = playing(&[1, 0]);
        let feedback = session.select_answer(1).unwrap();
        assert!(feedback.is_correct);
        assert_eq!(session.score(), 1);
        assert!(session.answer_revealed());

        let err = session.select_answer(1).unwrap_err();
        assert_eq!(err, QuizError::AlreadyAnswered);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn wrong_answer_does_not_score() {
        let mut session = playing(&[1, 0]);
        let feedback = session.select_answer(3).unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct, OptionIndex::new(1).unwrap());
        assert_eq!(session.score(), 0);

        // switching to the right answer after the reveal is not allowed
        assert!(session.select_answer(1).is_err());
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected(), OptionIndex::new(3));
    }

    #[test]
    fn out_of_range_option_is_rejected_without_change() {
        let mut session = playing(&[0]);
        assert_eq!(
            session.select_answer(4).unwrap_err(),
            QuizError::OptionOutOfRange { index: 4 }
        );
        assert!(!session.answer_revealed());
    }

    #[test]
    fn advance_requires_reveal() {
        let mut session = playing(&[0, 0]);
        assert_eq!(session.advance().unwrap_err(), QuizError::NotAnswered);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn advance_clears_selection() {
        let mut session = playing(&[0, 0]);
        session.select_answer(2).unwrap();
        assert_eq!(session.advance().unwrap(), Advanced::NextQuestion);
        assert_eq!(session.current_index(), 1);
        assert!(session.selected().is_none());
        assert!(!session.answer_revealed());
    }

    #[test]
    fn last_advance_enters_results_exactly_once() {
        let mut session = playing(&[0, 0]);
        session.select_answer(0).unwrap();
        session.advance().unwrap();
        session.select_answer(0).unwrap();
        assert_eq!(session.advance().unwrap(), Advanced::Finished);
        assert_eq!(session.phase(), Phase::Results);

        let err = session.advance().unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidTransition {
                action: QuizAction::Advance,
                phase: Phase::Results
            }
        );
        assert_eq!(session.phase(), Phase::Results);
        assert_eq!(session.score(), 2);
    }

    #[test]
    fn actions_outside_their_phase_are_rejected() {
        let mut session = QuizSession::new(bank(&[0]));
        assert!(matches!(
            session.select_answer(0),
            Err(QuizError::InvalidTransition {
                phase: Phase::Intro,
                ..
            })
        ));
        assert!(session.advance().is_err());
        assert!(session.begin_save("Ada").is_err());

        session.start().unwrap();
        assert_eq!(
            session.start().unwrap_err(),
            QuizError::InvalidTransition {
                action: QuizAction::Start,
                phase: Phase::Playing
            }
        );
        assert!(matches!(
            session.begin_save("Ada"),
            Err(QuizError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn score_never_exceeds_answered_for_every_answer_sequence() {
        let correct = [0, 1, 2];
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    let mut session = playing(&correct);
                    let mut last_score = 0;
                    for answer in [a, b, c] {
                        // a repeated select must never add to the score
                        session.select_answer(answer).unwrap();
                        let _ = session.select_answer(answer);
                        assert!(session.score() >= last_score);
                        assert!(session.score() as usize <= session.current_index() + 1);
                        assert!(session.score() as usize <= session.answered());
                        last_score = session.score();
                        session.advance().unwrap();
                    }
                    let expected =
                        u32::from(a == 0) + u32::from(b == 1) + u32::from(c == 2);
                    assert_eq!(session.score(), expected);
                }
            }
        }
    }

    #[test]
    fn restart_from_results_resets_prior_attempt() {
        let mut session = playing(&[0, 1]);
        finish_with(&mut session, &[0, 1]);
        let submission = session.begin_save("Ada").unwrap();
        assert!(session.complete_save(submission.attempt(), record_for(&submission, "s1")));
        assert!(session.saved_record().is_some());

        let attempt = session.start().unwrap();
        assert_eq!(attempt, AttemptId::new(2));
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);
        assert!(session.selected().is_none());
        assert!(!session.answer_revealed());
        assert!(session.saved_record().is_none());
        assert!(!session.is_save_in_flight());
    }

    #[test]
    fn begin_save_validates_name_before_submission() {
        let mut session = playing(&[0]);
        finish_with(&mut session, &[0]);

        assert_eq!(
            session.begin_save("   ").unwrap_err(),
            QuizError::Score(ScoreError::EmptyPlayerName)
        );
        assert!(matches!(
            session.begin_save(&"x".repeat(31)),
            Err(QuizError::Score(ScoreError::PlayerNameTooLong { len: 31 }))
        ));
        assert!(session.can_save());
        assert!(!session.is_save_in_flight());
    }

    #[test]
    fn begin_save_builds_submission() {
        let correct = [0; 12];
        let mut session = playing(&correct);
        let mut answers = [1; 12];
        answers[..7].fill(0);
        finish_with(&mut session, &answers);

        let submission = session.begin_save("  Ada ").unwrap();
        let score = submission.score();
        assert_eq!(score.player_name.as_str(), "Ada");
        assert_eq!(score.score, 7);
        assert_eq!(score.total_questions, 12);
        assert_eq!(score.percentage.value(), 58);
        assert!(session.is_save_in_flight());
        assert_eq!(session.begin_save("Ada").unwrap_err(), QuizError::SaveInFlight);
    }

    #[test]
    fn saved_attempt_cannot_be_saved_again() {
        let mut session = playing(&[0]);
        finish_with(&mut session, &[0]);
        let submission = session.begin_save("Ada").unwrap();
        assert!(session.complete_save(submission.attempt(), record_for(&submission, "s1")));
        assert!(!session.can_save());
        assert_eq!(session.begin_save("Ada").unwrap_err(), QuizError::AlreadySaved);
    }

    #[test]
    fn second_completion_does_not_replace_saved_record() {
        let mut session = playing(&[0]);
        finish_with(&mut session, &[0]);
        let submission = session.begin_save("Ada").unwrap();
        assert!(session.complete_save(submission.attempt(), record_for(&submission, "s1")));

        assert!(!session.complete_save(submission.attempt(), record_for(&submission, "s2")));
        assert!(!session.fail_save(submission.attempt()));
        assert_eq!(session.saved_record().unwrap().id().as_str(), "s1");
        assert!(!session.is_save_in_flight());
    }

    #[test]
    fn completion_without_pending_save_is_ignored() {
        let mut session = playing(&[0]);
        finish_with(&mut session, &[0]);
        let submission = session.begin_save("Ada").unwrap();
        assert!(session.fail_save(submission.attempt()));

        assert!(!session.complete_save(submission.attempt(), record_for(&submission, "s1")));
        assert!(session.saved_record().is_none());
        assert!(session.can_save());
    }

    #[test]
    fn failed_save_can_be_retried() {
        let mut session = playing(&[0]);
        finish_with(&mut session, &[0]);
        let submission = session.begin_save("Ada").unwrap();
        assert!(session.fail_save(submission.attempt()));
        assert!(session.saved_record().is_none());
        assert_eq!(session.score(), 1);

        let retry = session.begin_save("Ada").unwrap();
        assert!(session.complete_save(retry.attempt(), record_for(&retry, "s2")));
        assert_eq!(session.saved_record().unwrap().id().as_str(), "s2");
    }

    #[test]
    fn stale_save_completion_is_ignored_after_restart() {
        let mut session = playing(&[0]);
        finish_with(&mut session, &[0]);
        let submission = session.begin_save("Ada").unwrap();

        session.start().unwrap();
        assert!(!session.complete_save(submission.attempt(), record_for(&submission, "s1")));
        assert!(!session.fail_save(submission.attempt()));
        assert!(session.saved_record().is_none());

        finish_with(&mut session, &[0]);
        assert!(session.saved_record().is_none());
        assert!(session.can_save());
    }

    #[test]
    fn progress_tracks_reveals() {
        let mut session = playing(&[0, 0, 0, 0]);
        assert_eq!(
            session.progress(),
            QuizProgress {
                question_number: 1,
                total: 4,
                answered: 0,
                score: 0
            }
        );
        session.select_answer(0).unwrap();
        assert_eq!(session.progress().answered, 1);
        session.advance().unwrap();
        let progress = session.progress();
        assert_eq!(progress.question_number, 2);
        assert_eq!(progress.answered, 1);
        assert!((progress.fraction() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn option_states_after_reveal() {
        let mut session = playing(&[2]);
        assert_eq!(
            session.option_states(),
            Some([OptionState::Selectable; OPTION_COUNT])
        );
        session.select_answer(0).unwrap();
        assert_eq!(
            session.option_states(),
            Some([
                OptionState::Incorrect,
                OptionState::Dimmed,
                OptionState::Correct,
                OptionState::Dimmed
            ])
        );
    }

    #[test]
    fn results_summarize_attempt() {
        let mut session = playing(&[0, 0, 0, 0]);
        assert!(session.results().is_none());
        finish_with(&mut session, &[0, 0, 0, 1]);
        let results = session.results().unwrap();
        assert_eq!(results.score, 3);
        assert_eq!(results.incorrect, 1);
        assert_eq!(results.percentage.value(), 75);
        assert_eq!(results.grade, Grade::Great);
    }
}
