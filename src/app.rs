//! Session state: one quiz attempt from setup through results.

use std::time::{Duration, Instant};

use crate::models::{Category, Difficulty, Question, QuestionType, QuizConfig};

/// Whole-quiz countdown, in seconds.
pub const QUIZ_SECONDS: u32 = 60;

/// How long the reveal is shown before auto-advancing.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1200);

/// The countdown bar turns red at or below this.
pub const LOW_TIME_SECONDS: u32 = 10;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const NAME_MAX_LENGTH: usize = 16;

/// Top-level phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Quiz,
    Results,
}

/// Which setup control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Name,
    Category,
    Difficulty,
    Type,
}

impl SetupField {
    fn next(self) -> Self {
        match self {
            SetupField::Name => SetupField::Category,
            SetupField::Category => SetupField::Difficulty,
            SetupField::Difficulty => SetupField::Type,
            SetupField::Type => SetupField::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            SetupField::Name => SetupField::Type,
            SetupField::Category => SetupField::Name,
            SetupField::Difficulty => SetupField::Category,
            SetupField::Type => SetupField::Difficulty,
        }
    }
}

/// All mutable state for one quiz attempt.
///
/// The two timing sources (the recurring one-second countdown tick and
/// the one-shot reveal-to-advance delay) live here as deadlines and are
/// serviced by [`App::poll_timers`]. Leaving the quiz phase clears both,
/// so neither can fire against stale state.
pub struct App {
    pub phase: Phase,

    // Setup
    name_input: String,
    name_error: bool,
    setup_error: Option<String>,
    focus: SetupField,
    categories: Vec<Category>,
    category_index: usize,
    difficulty_index: usize,
    type_index: usize,

    // Quiz
    questions: Vec<Question>,
    current_index: usize,
    cursor: usize,
    pending_answer: Option<usize>,
    revealed: bool,
    score: usize,
    time_left: u32,
    next_tick: Option<Instant>,
    advance_at: Option<Instant>,
}

impl App {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            phase: Phase::Setup,
            name_input: String::new(),
            name_error: false,
            setup_error: None,
            focus: SetupField::Name,
            categories,
            category_index: 0,
            difficulty_index: 0,
            type_index: 0,
            questions: Vec::new(),
            current_index: 0,
            cursor: 0,
            pending_answer: None,
            revealed: false,
            score: 0,
            time_left: QUIZ_SECONDS,
            next_tick: None,
            advance_at: None,
        }
    }

    // --- Setup ---

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Name as shown in the quiz header and results.
    pub fn player_name(&self) -> &str {
        self.name_input.trim()
    }

    pub fn name_error(&self) -> bool {
        self.name_error
    }

    pub fn setup_error(&self) -> Option<&str> {
        self.setup_error.as_deref()
    }

    pub fn focus(&self) -> SetupField {
        self.focus
    }

    pub fn push_name_char(&mut self, c: char) {
        if self.name_input.len() < NAME_MAX_LENGTH {
            self.name_input.push(c);
        }
        self.dismiss_errors();
    }

    pub fn pop_name_char(&mut self) {
        self.name_input.pop();
        self.dismiss_errors();
    }

    pub fn dismiss_errors(&mut self) {
        self.name_error = false;
        self.setup_error = None;
    }

    pub fn set_setup_error(&mut self, message: String) {
        self.setup_error = Some(message);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Cycle the focused selector forward. Index 0 is always "Any".
    pub fn cycle_right(&mut self) {
        match self.focus {
            SetupField::Name => {}
            SetupField::Category => {
                let count = self.categories.len() + 1;
                self.category_index = (self.category_index + 1) % count;
            }
            SetupField::Difficulty => {
                let count = Difficulty::ALL.len() + 1;
                self.difficulty_index = (self.difficulty_index + 1) % count;
            }
            SetupField::Type => {
                let count = QuestionType::ALL.len() + 1;
                self.type_index = (self.type_index + 1) % count;
            }
        }
    }

    /// Cycle the focused selector backward.
    pub fn cycle_left(&mut self) {
        match self.focus {
            SetupField::Name => {}
            SetupField::Category => {
                let count = self.categories.len() + 1;
                self.category_index = (self.category_index + count - 1) % count;
            }
            SetupField::Difficulty => {
                let count = Difficulty::ALL.len() + 1;
                self.difficulty_index = (self.difficulty_index + count - 1) % count;
            }
            SetupField::Type => {
                let count = QuestionType::ALL.len() + 1;
                self.type_index = (self.type_index + count - 1) % count;
            }
        }
    }

    pub fn category_label(&self) -> &str {
        match self.category_index.checked_sub(1) {
            Some(i) => &self.categories[i].name,
            None => "Any",
        }
    }

    pub fn difficulty_label(&self) -> &'static str {
        match self.difficulty_index.checked_sub(1) {
            Some(i) => Difficulty::ALL[i].label(),
            None => "Any",
        }
    }

    pub fn type_label(&self) -> &'static str {
        match self.type_index.checked_sub(1) {
            Some(i) => QuestionType::ALL[i].label(),
            None => "Any",
        }
    }

    /// The filters to request questions with.
    pub fn config(&self) -> QuizConfig {
        QuizConfig {
            category: self
                .category_index
                .checked_sub(1)
                .and_then(|i| self.categories.get(i))
                .map(|c| c.id),
            difficulty: self
                .difficulty_index
                .checked_sub(1)
                .map(|i| Difficulty::ALL[i]),
            question_type: self.type_index.checked_sub(1).map(|i| QuestionType::ALL[i]),
        }
    }

    /// Validate the setup form. A blank name raises the error banner and
    /// keeps the session in setup.
    pub fn try_start(&mut self) -> bool {
        if self.name_input.trim().is_empty() {
            self.name_error = true;
            return false;
        }
        self.name_error = false;
        true
    }

    /// Enter the quiz phase with a fresh batch of questions. Resets the
    /// score, index, and countdown, and arms the tick deadline.
    pub fn start_quiz(&mut self, questions: Vec<Question>, now: Instant) {
        self.questions = questions;
        self.phase = Phase::Quiz;
        self.current_index = 0;
        self.cursor = 0;
        self.pending_answer = None;
        self.revealed = false;
        self.score = 0;
        self.time_left = QUIZ_SECONDS;
        self.next_tick = Some(now + TICK_INTERVAL);
        self.advance_at = None;
        self.setup_error = None;
    }

    // --- Quiz ---

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pending_answer(&self) -> Option<usize> {
        self.pending_answer
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn move_cursor_down(&mut self) {
        if self.phase != Phase::Quiz || self.revealed {
            return;
        }
        let count = self.current_question().options.len();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.phase != Phase::Quiz || self.revealed {
            return;
        }
        let count = self.current_question().options.len();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Record the option under the cursor as the pending answer. No
    /// effect beyond the highlight until it is submitted.
    pub fn select_option(&mut self) {
        if self.phase == Phase::Quiz && !self.revealed {
            self.pending_answer = Some(self.cursor);
        }
    }

    /// Score the pending answer and enter the reveal. A no-op without a
    /// pending answer or while already revealed.
    pub fn submit_answer(&mut self, now: Instant) {
        if self.phase != Phase::Quiz || self.revealed {
            return;
        }
        let Some(pending) = self.pending_answer else {
            return;
        };

        let question = &self.questions[self.current_index];
        if question
            .options
            .get(pending)
            .is_some_and(|option| question.is_correct(option))
        {
            self.score += 1;
        }

        self.revealed = true;
        self.advance_at = Some(now + REVEAL_DELAY);
    }

    /// Service both timer deadlines against the current instant.
    ///
    /// The countdown catches up one second at a time; hitting zero ends
    /// the session immediately, discarding any pending answer and the
    /// armed auto-advance.
    pub fn poll_timers(&mut self, now: Instant) {
        if self.phase != Phase::Quiz {
            return;
        }

        while let Some(tick) = self.next_tick {
            if now < tick || self.time_left == 0 {
                break;
            }
            self.time_left -= 1;
            self.next_tick = Some(tick + TICK_INTERVAL);
        }

        if self.time_left == 0 {
            self.finish();
            return;
        }

        if self.advance_at.is_some_and(|at| now >= at) {
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.advance_at = None;
        if self.current_index + 1 >= self.questions.len() {
            self.finish();
        } else {
            self.current_index += 1;
            self.cursor = 0;
            self.pending_answer = None;
            self.revealed = false;
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Results;
        self.next_tick = None;
        self.advance_at = None;
        self.pending_answer = None;
    }

    // --- Results ---

    pub fn percentage(&self) -> u32 {
        let total = self.questions.len();
        if total == 0 {
            return 0;
        }
        ((self.score as f64 / total as f64) * 100.0).round() as u32
    }

    pub fn feedback_message(&self) -> &'static str {
        match self.percentage() {
            100 => "Perfect score! Outstanding work.",
            p if p >= 70 => "Great job! You aced most of it.",
            p if p >= 40 => "Good effort! Keep learning.",
            p if p >= 10 => "Don't be discouraged! Practice makes perfect.",
            _ => "Keep trying! Every expert was once a beginner.",
        }
    }

    pub fn elapsed_seconds(&self) -> u32 {
        QUIZ_SECONDS - self.time_left
    }

    /// Back to a pristine setup, keeping only the fetched category list.
    pub fn restart(&mut self) {
        *self = Self::new(std::mem::take(&mut self.categories));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                prompt: format!("Question {i}"),
                correct_answer: "right".to_string(),
                options: vec![
                    "wrong a".to_string(),
                    "right".to_string(),
                    "wrong b".to_string(),
                    "wrong c".to_string(),
                ],
            })
            .collect()
    }

    fn quiz_app(n: usize) -> (App, Instant) {
        let mut app = App::new(Vec::new());
        for c in "Ada".chars() {
            app.push_name_char(c);
        }
        assert!(app.try_start());
        let now = Instant::now();
        app.start_quiz(questions(n), now);
        (app, now)
    }

    /// Run a full 10-question quiz answering `correct` of them right.
    fn finished_app(correct: usize) -> App {
        let (mut app, mut now) = quiz_app(10);
        for i in 0..10 {
            if i < correct {
                app.move_cursor_down(); // cursor 1 is the correct option
            }
            app.select_option();
            app.submit_answer(now);
            now += REVEAL_DELAY + Duration::from_millis(100);
            app.poll_timers(now);
        }
        assert_eq!(app.phase, Phase::Results);
        app
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut app = App::new(Vec::new());
        assert!(!app.try_start());
        assert_eq!(app.phase, Phase::Setup);
        assert!(app.name_error());

        for c in "   ".chars() {
            app.push_name_char(c);
        }
        assert!(!app.try_start());
        assert!(app.name_error());
    }

    #[test]
    fn typing_dismisses_the_error_banner() {
        let mut app = App::new(Vec::new());
        assert!(!app.try_start());
        assert!(app.name_error());

        app.push_name_char('A');
        assert!(!app.name_error());
        assert!(app.try_start());
    }

    #[test]
    fn name_input_is_bounded() {
        let mut app = App::new(Vec::new());
        for c in "abcdefghijklmnopqrstuvwxyz".chars() {
            app.push_name_char(c);
        }
        assert_eq!(app.name_input().len(), 16);
    }

    #[test]
    fn start_quiz_resets_session_state() {
        let (app, _) = quiz_app(10);
        assert_eq!(app.phase, Phase::Quiz);
        assert_eq!(app.total_questions(), 10);
        assert_eq!(app.current_question_number(), 1);
        assert_eq!(app.score(), 0);
        assert_eq!(app.time_left(), QUIZ_SECONDS);
        assert!(!app.revealed());
        assert_eq!(app.pending_answer(), None);
    }

    #[test]
    fn selecting_an_option_only_records_it() {
        let (mut app, _) = quiz_app(10);
        app.move_cursor_down();
        app.select_option();

        assert_eq!(app.pending_answer(), Some(1));
        assert_eq!(app.score(), 0);
        assert!(!app.revealed());
        assert_eq!(app.current_question_number(), 1);
    }

    #[test]
    fn correct_answer_scores_one_point() {
        let (mut app, now) = quiz_app(10);
        app.move_cursor_down();
        app.select_option();
        app.submit_answer(now);

        assert_eq!(app.score(), 1);
        assert!(app.revealed());
    }

    #[test]
    fn wrong_answer_leaves_score_unchanged() {
        let (mut app, now) = quiz_app(10);
        app.select_option(); // cursor 0 is wrong
        app.submit_answer(now);

        assert_eq!(app.score(), 0);
        assert!(app.revealed());
    }

    #[test]
    fn submit_without_pending_answer_is_a_noop() {
        let (mut app, now) = quiz_app(10);
        app.submit_answer(now);

        assert!(!app.revealed());
        assert_eq!(app.score(), 0);
    }

    #[test]
    fn double_submit_does_not_score_twice() {
        let (mut app, now) = quiz_app(10);
        app.move_cursor_down();
        app.select_option();
        app.submit_answer(now);
        app.submit_answer(now);

        assert_eq!(app.score(), 1);
    }

    #[test]
    fn input_is_ignored_while_revealed() {
        let (mut app, now) = quiz_app(10);
        app.select_option();
        app.submit_answer(now);

        app.move_cursor_down();
        app.select_option();
        assert_eq!(app.cursor(), 0);
        assert_eq!(app.pending_answer(), Some(0));
    }

    #[test]
    fn reveal_advances_after_the_delay() {
        let (mut app, now) = quiz_app(10);
        app.move_cursor_down();
        app.select_option();
        app.submit_answer(now);

        // Just before the deadline nothing moves.
        app.poll_timers(now + Duration::from_millis(1100));
        assert!(app.revealed());
        assert_eq!(app.current_question_number(), 1);

        app.poll_timers(now + Duration::from_millis(1300));
        assert_eq!(app.current_question_number(), 2);
        assert!(!app.revealed());
        assert_eq!(app.pending_answer(), None);
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn last_question_reveal_finishes_the_quiz() {
        let (mut app, now) = quiz_app(1);
        app.move_cursor_down();
        app.select_option();
        app.submit_answer(now);
        app.poll_timers(now + REVEAL_DELAY);

        assert_eq!(app.phase, Phase::Results);
        assert_eq!(app.score(), 1);
    }

    #[test]
    fn countdown_decrements_once_per_second() {
        let (mut app, now) = quiz_app(10);
        app.poll_timers(now + Duration::from_millis(500));
        assert_eq!(app.time_left(), QUIZ_SECONDS);

        app.poll_timers(now + Duration::from_secs(1));
        assert_eq!(app.time_left(), QUIZ_SECONDS - 1);

        // Catch-up after a long gap between polls.
        app.poll_timers(now + Duration::from_secs(5));
        assert_eq!(app.time_left(), QUIZ_SECONDS - 5);
    }

    #[test]
    fn countdown_keeps_running_during_reveal() {
        let (mut app, now) = quiz_app(10);
        app.select_option();
        app.submit_answer(now);

        app.poll_timers(now + Duration::from_secs(1));
        assert!(app.revealed());
        assert_eq!(app.time_left(), QUIZ_SECONDS - 1);
    }

    #[test]
    fn timer_expiry_forces_results() {
        let (mut app, now) = quiz_app(10);
        app.move_cursor_down();
        app.select_option(); // pending, never submitted

        app.poll_timers(now + Duration::from_secs(QUIZ_SECONDS as u64 + 1));

        assert_eq!(app.phase, Phase::Results);
        assert_eq!(app.time_left(), 0);
        assert_eq!(app.score(), 0); // the in-flight answer is discarded
        assert_eq!(app.pending_answer(), None);
        assert_eq!(app.elapsed_seconds(), QUIZ_SECONDS);
    }

    #[test]
    fn timer_expiry_wins_over_pending_advance() {
        let (mut app, now) = quiz_app(10);
        app.poll_timers(now + Duration::from_secs(59));
        assert_eq!(app.time_left(), 1);

        // Submit with under a second left; the reveal deadline would land
        // after the final tick.
        let late = now + Duration::from_millis(59_500);
        app.move_cursor_down();
        app.select_option();
        app.submit_answer(late);

        app.poll_timers(now + Duration::from_millis(60_500));
        assert_eq!(app.phase, Phase::Results);
        assert_eq!(app.score(), 1); // submitted before expiry, still counts
        assert_eq!(app.current_question_number(), 1);
    }

    #[test]
    fn timers_are_inert_outside_the_quiz_phase() {
        let mut app = App::new(Vec::new());
        app.poll_timers(Instant::now() + Duration::from_secs(120));
        assert_eq!(app.phase, Phase::Setup);
        assert_eq!(app.time_left(), QUIZ_SECONDS);

        let app = finished_app(3);
        assert_eq!(app.phase, Phase::Results);
        let before = app.time_left();
        let mut app = app;
        app.poll_timers(Instant::now() + Duration::from_secs(600));
        assert_eq!(app.time_left(), before);
    }

    #[test]
    fn perfect_score_gets_the_top_message() {
        let app = finished_app(10);
        assert_eq!(app.percentage(), 100);
        assert_eq!(app.feedback_message(), "Perfect score! Outstanding work.");
    }

    #[test]
    fn zero_score_gets_the_bottom_message() {
        let app = finished_app(0);
        assert_eq!(app.percentage(), 0);
        assert_eq!(
            app.feedback_message(),
            "Keep trying! Every expert was once a beginner."
        );
    }

    #[test]
    fn message_threshold_bands() {
        assert_eq!(
            finished_app(7).feedback_message(),
            "Great job! You aced most of it."
        );
        assert_eq!(
            finished_app(9).feedback_message(),
            "Great job! You aced most of it."
        );
        assert_eq!(
            finished_app(4).feedback_message(),
            "Good effort! Keep learning."
        );
        assert_eq!(
            finished_app(1).feedback_message(),
            "Don't be discouraged! Practice makes perfect."
        );
    }

    #[test]
    fn score_never_exceeds_question_count() {
        let app = finished_app(10);
        assert_eq!(app.score(), app.total_questions());
    }

    #[test]
    fn elapsed_time_reflects_the_countdown() {
        let app = finished_app(5);
        assert_eq!(app.elapsed_seconds(), QUIZ_SECONDS - app.time_left());
        // 10 questions at ~1.3 s apiece.
        assert!(app.elapsed_seconds() >= 10);
    }

    #[test]
    fn restart_matches_first_load() {
        let categories = vec![Category {
            id: 9,
            name: "General Knowledge".to_string(),
        }];
        let mut app = App::new(categories.clone());
        for c in "Ada".chars() {
            app.push_name_char(c);
        }
        app.focus_next();
        app.cycle_right();
        assert!(app.try_start());
        let now = Instant::now();
        app.start_quiz(questions(10), now);
        app.move_cursor_down();
        app.select_option();
        app.submit_answer(now);

        app.restart();

        assert_eq!(app.phase, Phase::Setup);
        assert_eq!(app.name_input(), "");
        assert!(!app.name_error());
        assert_eq!(app.focus(), SetupField::Name);
        assert_eq!(app.config(), QuizConfig::default());
        assert_eq!(app.score(), 0);
        assert_eq!(app.time_left(), QUIZ_SECONDS);
        assert_eq!(app.total_questions(), 0);
        // The fetched category list survives the reset.
        assert_eq!(app.category_label(), "Any");
        app.focus_next();
        app.cycle_right();
        assert_eq!(app.category_label(), "General Knowledge");
    }

    #[test]
    fn selector_cycling_wraps_and_builds_the_config() {
        let categories = vec![
            Category {
                id: 9,
                name: "General Knowledge".to_string(),
            },
            Category {
                id: 18,
                name: "Science: Computers".to_string(),
            },
        ];
        let mut app = App::new(categories);

        app.focus_next(); // Category
        app.cycle_right();
        app.cycle_right();
        assert_eq!(app.category_label(), "Science: Computers");

        app.focus_next(); // Difficulty
        app.cycle_left(); // wraps to Hard
        assert_eq!(app.difficulty_label(), "Hard");

        app.focus_next(); // Type
        app.cycle_right();
        assert_eq!(app.type_label(), "Multiple Choice");

        let config = app.config();
        assert_eq!(config.category, Some(18));
        assert_eq!(config.difficulty, Some(Difficulty::Hard));
        assert_eq!(config.question_type, Some(QuestionType::Multiple));

        app.cycle_left(); // Type back to Any
        assert_eq!(app.config().question_type, None);
    }

    #[test]
    fn cursor_wraps_over_the_option_list() {
        let (mut app, _) = quiz_app(10);
        for _ in 0..4 {
            app.move_cursor_down();
        }
        assert_eq!(app.cursor(), 0);

        app.move_cursor_up();
        assert_eq!(app.cursor(), 3);
    }
}
