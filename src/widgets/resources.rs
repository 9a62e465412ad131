use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::AppState;

pub struct ResourcesWidget;

impl ResourcesWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let resource_lines: Vec<Line> = state
            .session
            .resources()
            .iter()
            .map(|resource| {
                Line::from(vec![
                    Span::raw("  - "),
                    Span::styled(
                        resource.name().to_string(),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(format!(" at {}", resource.cost())),
                ])
            })
            .collect();

        let title = format!("Resources ({})", state.session.resources().len());
        let resources = Paragraph::new(resource_lines).block(Block::bordered().title(title));

        frame.render_widget(resources, area);
    }
}
