//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`tree`]: The heap drawn level by level, with compared nodes highlighted
//! - [`queue`]: People still waiting in the input queue, front first
//! - [`sorted`]: People already extracted, heaviest first
//! - [`narration`]: The current step's message, or the weight being typed
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a `render_*` function that draws from borrowed
//! state; scroll offsets are the only thing the panes write back.

pub mod narration;
pub mod queue;
pub mod sorted;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use narration::render_narration_pane;
pub use queue::render_queue_pane;
pub use sorted::render_sorted_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tree::render_tree_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border style every pane shares
fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so a list of `total` rows fills `visible` rows
fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
