mod bank;
mod grade;
mod ids;
mod question;
mod score;

pub use grade::Grade;
pub use ids::{AttemptId, ParseIdError, ScoreId};
pub use question::{OPTION_COUNT, OptionIndex, Question, QuestionBank, QuestionError};
pub use score::{
    NewScore, PLAYER_NAME_MAX_LEN, Percentage, PlayerName, ScoreError, ScoreRecord,
};
