//! Input queue pane rendering

use super::{clamp_scroll, pane_block};
use crate::heap::HeapItem;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the input queue pane, front of the queue at the top
pub fn render_queue_pane(
    frame: &mut Frame,
    area: Rect,
    input: &[HeapItem],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Input Queue ({}) ", input.len()), is_focused);

    if input.is_empty() {
        let paragraph = Paragraph::new("(queue is empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders, min 1
    clamp_scroll(scroll_offset, input.len(), visible_height);

    let items: Vec<ListItem> = input
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, item)| {
            // The next item to be inserted stands out
            let marker = if i == 0 { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("P{:<4}", item.person_id),
                    Style::default().fg(DEFAULT_THEME.person),
                ),
                Span::styled(
                    item.weight.to_string(),
                    Style::default()
                        .fg(DEFAULT_THEME.number)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
