//! Setup screen: player name and quiz filters.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, SetupField};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Percentage(25),
        Constraint::Length(17),
        Constraint::Percentage(25),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("10 questions · 60 seconds".fg(Color::DarkGray)),
        Line::from(""),
    ];

    content.push(name_line(app));
    content.push(Line::from(""));
    content.push(selector_line(app, SetupField::Category, "Category", app.category_label()));
    content.push(selector_line(app, SetupField::Difficulty, "Difficulty", app.difficulty_label()));
    content.push(selector_line(app, SetupField::Type, "Type", app.type_label()));
    content.push(Line::from(""));

    content.push(banner_line(app));

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Up/Down] field  ·  [Left/Right] change  ·  [Enter] start  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn name_line(app: &App) -> Line<'_> {
    let focused = app.focus() == SetupField::Name;
    let label_style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled("What's your name? ", label_style),
        Span::styled(app.name_input(), Style::default().fg(Color::Yellow)),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn selector_line<'a>(
    app: &App,
    field: SetupField,
    label: &'a str,
    value: &'a str,
) -> Line<'a> {
    let focused = app.focus() == field;
    let style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { ">" } else { " " };

    Line::from(vec![
        Span::styled(format!("{} {:<11}", marker, label), style),
        Span::styled(format!("< {} >", value), style),
    ])
}

fn banner_line(app: &App) -> Line<'static> {
    if app.name_error() {
        Line::from(Span::styled(
            "You must enter your name before starting the quiz",
            Style::default().fg(Color::Red).bold(),
        ))
    } else if let Some(error) = app.setup_error() {
        Line::from(Span::styled(
            format!("Could not start the quiz: {}", error),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from("")
    }
}
