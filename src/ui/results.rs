//! Results screen: percentage, feedback message, elapsed time.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Fill(1),
    ])
    .split(area);

    let percentage = app.percentage();
    let color = grade_color(percentage);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ COMPLETE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(format!("{}, here are your results:", app.player_name()).fg(Color::Gray)),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", percentage),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {} correct", app.score(), app.total_questions()),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.feedback_message(),
            Style::default().fg(Color::Gray).italic(),
        )),
        Line::from(""),
        Line::from(format!("Time elapsed: {} seconds", app.elapsed_seconds()).fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            "[R] new quiz  ·  [Q] quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn grade_color(percentage: u32) -> Color {
    match percentage {
        100 => Color::Green,
        70..=99 => Color::Cyan,
        40..=69 => Color::Yellow,
        10..=39 => Color::LightRed,
        _ => Color::Red,
    }
}
