//! # trivia-quiz
//!
//! A terminal trivia quiz backed by the Open Trivia DB.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::api::{TriviaClient, DEFAULT_BASE_URL};
//! use trivia_quiz::{Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let client = TriviaClient::new(DEFAULT_BASE_URL);
//!
//!     // A missing category list only limits the filter to "Any".
//!     let categories = client.fetch_categories().await.unwrap_or_default();
//!
//!     Quiz::new(client, categories).run().await
//! }
//! ```

pub mod api;
mod app;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::warn;

use api::{ApiError, TriviaClient};

pub use app::{App, Phase, SetupField, QUIZ_SECONDS, REVEAL_DELAY};
pub use models::{Category, Difficulty, Question, QuestionType, QuizConfig, QUESTION_COUNT};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The trivia API request failed.
    #[error("trivia API request failed: {0}")]
    Api(#[from] ApiError),

    /// Terminal IO error during quiz execution.
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz session that can be run in the terminal.
pub struct Quiz {
    app: App,
    client: TriviaClient,
}

impl Quiz {
    /// Create a new session against the given API client, offering the
    /// given categories as filters.
    pub fn new(client: TriviaClient, categories: Vec<Category>) -> Self {
        Self {
            app: App::new(categories),
            client,
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal, displays the quiz UI, and returns when
    /// the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut terminal = terminal::init()?;
        let result = run_event_loop(&mut terminal, &mut self.app, &self.client).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying session state.
    pub fn app(&self) -> &App {
        &self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    client: &TriviaClient,
) -> Result<(), QuizError> {
    loop {
        app.poll_timers(Instant::now());
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match handle_input(app, key.code) {
                    Action::Quit => break,
                    Action::StartQuiz => start_quiz(app, client).await,
                    Action::None => {}
                }
            }
        }
    }

    Ok(())
}

/// Fetch a question batch and enter the quiz phase. The fetch is the
/// only suspension point in the loop; on failure the session stays in
/// setup with the error shown in the banner.
async fn start_quiz(app: &mut App, client: &TriviaClient) {
    match client.fetch_questions(&app.config()).await {
        Ok(questions) => app.start_quiz(questions, Instant::now()),
        Err(err) => {
            warn!(error = %err, "question fetch failed");
            app.set_setup_error(err.to_string());
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    StartQuiz,
    Quit,
}

fn handle_input(app: &mut App, key: KeyCode) -> Action {
    match app.phase {
        Phase::Setup => handle_setup_input(app, key),
        Phase::Quiz => handle_quiz_input(app, key),
        Phase::Results => handle_results_input(app, key),
    }
}

fn handle_setup_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Enter => {
            if app.try_start() {
                Action::StartQuiz
            } else {
                Action::None
            }
        }
        KeyCode::Esc => {
            if app.name_error() || app.setup_error().is_some() {
                app.dismiss_errors();
                Action::None
            } else {
                Action::Quit
            }
        }
        KeyCode::Up => {
            app.focus_previous();
            Action::None
        }
        KeyCode::Down | KeyCode::Tab => {
            app.focus_next();
            Action::None
        }
        KeyCode::Left => {
            app.cycle_left();
            Action::None
        }
        KeyCode::Right => {
            app.cycle_right();
            Action::None
        }
        KeyCode::Backspace => {
            if app.focus() == SetupField::Name {
                app.pop_name_char();
            }
            Action::None
        }
        // The name field consumes characters; elsewhere they are commands.
        KeyCode::Char(c) if app.focus() == SetupField::Name => {
            app.push_name_char(c);
            Action::None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        KeyCode::Char('k') => {
            app.focus_previous();
            Action::None
        }
        KeyCode::Char('j') => {
            app.focus_next();
            Action::None
        }
        KeyCode::Char('h') => {
            app.cycle_left();
            Action::None
        }
        KeyCode::Char('l') => {
            app.cycle_right();
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_cursor_up();
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_cursor_down();
            Action::None
        }
        KeyCode::Char(' ') => {
            app.select_option();
            Action::None
        }
        KeyCode::Enter => {
            app.submit_answer(Instant::now());
            Action::None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        _ => Action::None,
    }
}

fn handle_results_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
            app.restart();
            Action::None
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            prompt: "prompt".to_string(),
            correct_answer: "yes".to_string(),
            options: vec!["no".to_string(), "yes".to_string()],
        }
    }

    #[test]
    fn setup_typing_goes_to_the_name_field() {
        let mut app = App::new(Vec::new());

        // 'q' is a character while the name field is focused, not quit.
        assert_eq!(handle_input(&mut app, KeyCode::Char('q')), Action::None);
        assert_eq!(handle_input(&mut app, KeyCode::Char('j')), Action::None);
        assert_eq!(app.name_input(), "qj");

        assert_eq!(handle_input(&mut app, KeyCode::Backspace), Action::None);
        assert_eq!(app.name_input(), "q");
    }

    #[test]
    fn setup_quit_works_off_the_name_field() {
        let mut app = App::new(Vec::new());
        handle_input(&mut app, KeyCode::Down);
        assert_eq!(handle_input(&mut app, KeyCode::Char('q')), Action::Quit);
    }

    #[test]
    fn enter_requests_a_start_only_with_a_name() {
        let mut app = App::new(Vec::new());
        assert_eq!(handle_input(&mut app, KeyCode::Enter), Action::None);
        assert!(app.name_error());

        handle_input(&mut app, KeyCode::Char('A'));
        assert_eq!(handle_input(&mut app, KeyCode::Enter), Action::StartQuiz);
    }

    #[test]
    fn esc_dismisses_the_banner_before_quitting() {
        let mut app = App::new(Vec::new());
        handle_input(&mut app, KeyCode::Enter);
        assert!(app.name_error());

        assert_eq!(handle_input(&mut app, KeyCode::Esc), Action::None);
        assert!(!app.name_error());
        assert_eq!(handle_input(&mut app, KeyCode::Esc), Action::Quit);
    }

    #[test]
    fn quiz_keys_drive_the_state_machine() {
        let mut app = App::new(Vec::new());
        app.push_name_char('A');
        assert!(app.try_start());
        app.start_quiz(vec![question()], Instant::now());

        handle_input(&mut app, KeyCode::Down);
        handle_input(&mut app, KeyCode::Char(' '));
        assert_eq!(app.pending_answer(), Some(1));

        handle_input(&mut app, KeyCode::Enter);
        assert!(app.revealed());
        assert_eq!(app.score(), 1);
    }

    #[test]
    fn results_restart_returns_to_setup() {
        let mut app = App::new(Vec::new());
        app.push_name_char('A');
        app.start_quiz(vec![question()], Instant::now());
        let now = Instant::now();
        app.select_option();
        app.submit_answer(now);
        app.poll_timers(now + REVEAL_DELAY);
        assert_eq!(app.phase, Phase::Results);

        assert_eq!(handle_input(&mut app, KeyCode::Char('r')), Action::None);
        assert_eq!(app.phase, Phase::Setup);
        assert_eq!(app.name_input(), "");

        assert_eq!(handle_input(&mut app, KeyCode::Char('q')), Action::None);
        assert_eq!(app.name_input(), "q");
    }
}
