//! Heap tree pane
//!
//! Draws the heap as a complete binary tree, one level per band of rows.
//! Level `l` is split into `2^l` equal slots and each node is centred in its
//! slot, so children always sit under their parent's half of the row:
//!
//! ```text
//!                119
//!                P8
//!
//!        104             114
//!        P10             P16
//! ```
//!
//! Nodes named by the current step's highlights are drawn inverted, yellow
//! while building and red while extracting.

use super::pane_block;
use crate::heap::HeapItem;
use crate::steps::Phase;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Number of levels a heap of `len` items occupies
pub fn level_count(len: usize) -> u32 {
    if len == 0 {
        0
    } else {
        len.ilog2() + 1
    }
}

/// Pad or cut `text` to exactly `width` columns, centred
fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

/// Render the heap tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    heap: &[HeapItem],
    highlighted: &[usize],
    phase: Phase,
    is_focused: bool,
) {
    let block = pane_block(format!(" Max-Heap ({}) ", heap.len()), is_focused);

    if heap.is_empty() {
        let paragraph = Paragraph::new("(heap is empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let content_width = area.width.saturating_sub(2).max(1) as usize; // borders
    let highlight_bg = match phase {
        Phase::Extracting | Phase::HeapifyDown => DEFAULT_THEME.extracting,
        _ => DEFAULT_THEME.compare,
    };

    let mut lines = Vec::new();
    for level in 0..level_count(heap.len()) {
        let first = (1usize << level) - 1;
        let last = (first * 2 + 1).min(heap.len());
        let slot_width = (content_width >> level).max(1);

        let mut weights = Vec::new();
        let mut people = Vec::new();
        for (i, item) in heap.iter().enumerate().take(last).skip(first) {
            let (weight_style, person_style) = if highlighted.contains(&i) {
                let style = Style::default()
                    .bg(highlight_bg)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD);
                (style, style)
            } else {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.number)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(DEFAULT_THEME.person),
                )
            };

            weights.push(Span::styled(
                centered(&item.weight.to_string(), slot_width),
                weight_style,
            ));
            people.push(Span::styled(
                centered(&format!("P{}", item.person_id), slot_width),
                person_style,
            ));
        }

        lines.push(Line::from(weights));
        lines.push(Line::from(people));
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_count() {
        assert_eq!(level_count(0), 0);
        assert_eq!(level_count(1), 1);
        assert_eq!(level_count(3), 2);
        assert_eq!(level_count(4), 3);
        assert_eq!(level_count(30), 5);
    }

    #[test]
    fn test_centered() {
        assert_eq!(centered("85", 6), "  85  ");
        assert_eq!(centered("119", 6), " 119  ");
        assert_eq!(centered("P100", 2), "P1");
    }
}
