use rand::seq::SliceRandom;

/// A single quiz question with its answer options in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl Question {
    /// Build a question from the correct answer and the incorrect ones.
    ///
    /// The options are the incorrect answers plus the correct answer,
    /// shuffled so the correct one isn't always in the same slot.
    pub fn with_shuffled_options(
        prompt: String,
        correct_answer: String,
        incorrect_answers: Vec<String>,
    ) -> Self {
        let mut options = incorrect_answers;
        options.push(correct_answer.clone());
        options.shuffle(&mut rand::thread_rng());

        Self {
            prompt,
            correct_answer,
            options,
        }
    }

    /// Exact string match against the correct answer.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}
