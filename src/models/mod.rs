mod config;
mod question;

pub use config::{Category, Difficulty, QuestionType, QuizConfig, QUESTION_COUNT};
pub use question::Question;
