use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct BurnWidget;

impl BurnWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let burn_text = vec![
            Line::from(Span::styled(
                format!("${:.2}", state.current_cost),
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("at ${:.2}/h", state.total_hourly_rate()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!("elapsed {}", state.elapsed_text()),
                Style::default().fg(Color::Gray),
            )),
        ];

        let burn = Paragraph::new(burn_text)
            .block(Block::bordered().title("Money burned"))
            .alignment(Alignment::Center);

        frame.render_widget(burn, area);
    }
}
