mod quiz;
mod results;
mod setup;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Phase};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase {
        Phase::Setup => setup::render(frame, area, app),
        Phase::Quiz => quiz::render(frame, area, app),
        Phase::Results => results::render(frame, area, app),
    }
}
