//! Narration pane: what the current step is doing, or the weight being typed

use super::pane_block;
use crate::steps::Phase;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const IDLE_HINT: &str = "Idle — press space to build the heap, or a to add a weight";

/// Render the narration pane
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    phase: Phase,
    message: &str,
    input: Option<&str>,
) {
    let paragraph = if let Some(buffer) = input {
        let block = pane_block(" Add Weight ".to_string(), true);
        Paragraph::new(Line::from(vec![
            Span::styled("Weight: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                format!("{}▏", buffer),
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "   Enter to add, Esc to cancel",
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]))
        .block(block)
    } else if message.is_empty() {
        Paragraph::new(IDLE_HINT)
            .block(pane_block(format!(" {} ", phase), false))
            .style(Style::default().fg(DEFAULT_THEME.comment))
    } else {
        Paragraph::new(message)
            .block(pane_block(format!(" {} ", phase), false))
            .style(Style::default().fg(DEFAULT_THEME.fg))
    };

    frame.render_widget(paragraph, area);
}
