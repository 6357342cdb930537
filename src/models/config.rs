//! Quiz filter configuration.

use serde::Deserialize;

/// Every quiz is exactly this long.
pub const QUESTION_COUNT: usize = 10;

/// A trivia category as served by the API's category list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// Question difficulty filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Value used in the API query string.
    pub fn as_param(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Question format filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Multiple,
    Boolean,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [QuestionType::Multiple, QuestionType::Boolean];

    /// Value used in the API query string.
    pub fn as_param(self) -> &'static str {
        match self {
            QuestionType::Multiple => "multiple",
            QuestionType::Boolean => "boolean",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Multiple => "Multiple Choice",
            QuestionType::Boolean => "True / False",
        }
    }
}

/// User-selected filters for a quiz. `None` means "Any" and the
/// corresponding query parameter is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizConfig {
    pub category: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub question_type: Option<QuestionType>,
}
