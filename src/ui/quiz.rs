//! Quiz screen: countdown, progress, question, and answer options.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::app::{App, LOW_TIME_SECONDS, QUIZ_SECONDS};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Time left
        Constraint::Length(1), // Countdown bar
        Constraint::Length(1),
        Constraint::Length(1), // Progress
        Constraint::Length(4), // Question text
        Constraint::Fill(1),   // Options
        Constraint::Length(1), // Status / controls
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], app);
    render_countdown(frame, chunks[1], chunks[2], app);
    render_progress(frame, chunks[4], app);
    render_question_text(frame, chunks[5], &app.current_question().prompt);
    render_options(frame, chunks[6], app);
    render_status(frame, chunks[7], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let title = Paragraph::new(format!("{}'s Quiz", app.player_name())).fg(Color::Gray);
    frame.render_widget(title, halves[0]);

    let score = Paragraph::new(format!("Score: {}", app.score()))
        .alignment(Alignment::Right)
        .fg(Color::White)
        .bold();
    frame.render_widget(score, halves[1]);
}

fn render_countdown(frame: &mut Frame, label_area: Rect, bar_area: Rect, app: &App) {
    let time_left = app.time_left();
    let color = if time_left <= LOW_TIME_SECONDS {
        Color::Red
    } else {
        Color::Green
    };

    let label = Paragraph::new(format!("Time Left: {}s", time_left))
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(label, label_area);

    let gauge = Gauge::default()
        .ratio(f64::from(time_left) / f64::from(QUIZ_SECONDS))
        .label("")
        .gauge_style(Style::default().fg(color));
    frame.render_widget(gauge, bar_area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "Question {} of {}",
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == app.cursor();
        let is_pending = app.pending_answer() == Some(index);

        let style = if app.revealed() {
            if question.is_correct(option) {
                Style::default().fg(Color::Green).bold()
            } else if is_pending {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        } else if is_pending {
            Style::default().fg(Color::Yellow).bold()
        } else if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };

        let marker = if is_cursor { ">" } else { " " };
        let chosen = if is_pending { "*" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {}{} ", marker, chosen), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let widget = if app.revealed() {
        let question = app.current_question();
        let correct = app
            .pending_answer()
            .and_then(|i| question.options.get(i))
            .is_some_and(|option| question.is_correct(option));

        if correct {
            Paragraph::new("Correct!").fg(Color::Green).bold()
        } else {
            Paragraph::new("Wrong - the correct answer is highlighted").fg(Color::Red)
        }
    } else {
        Paragraph::new("j/k move  ·  space choose  ·  enter submit  ·  q quit")
            .fg(Color::DarkGray)
    };

    frame.render_widget(widget.alignment(Alignment::Center), area);
}
