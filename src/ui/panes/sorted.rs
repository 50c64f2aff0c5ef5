//! Sorted output pane rendering

use super::{clamp_scroll, pane_block};
use crate::heap::HeapItem;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the sorted list, heaviest first, newest extraction at the bottom.
///
/// While items keep arriving the view follows the tail, like a terminal.
pub fn render_sorted_pane(
    frame: &mut Frame,
    area: Rect,
    sorted: &[HeapItem],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" Sorted ({}) ", sorted.len()), is_focused);

    if sorted.is_empty() {
        let paragraph = Paragraph::new("(nothing extracted yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if !is_focused {
        *scroll_offset = usize::MAX;
    }
    clamp_scroll(scroll_offset, sorted.len(), visible_height);

    let rank_width = sorted.len().to_string().len();
    let last = sorted.len() - 1;
    let items: Vec<ListItem> = sorted
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, item)| {
            let weight_style = if i == last {
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.number)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>width$}. ", i + 1, width = rank_width),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("P{:<4}", item.person_id),
                    Style::default().fg(DEFAULT_THEME.person),
                ),
                Span::styled(item.weight.to_string(), weight_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
