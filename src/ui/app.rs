//! Main TUI application state and logic

use crate::player::{Mode, Player, SPEED_PRESETS_MS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Longest the event loop waits for a key before checking the ticker again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Queue,
    Sorted,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> queue -> sorted)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Queue,
            FocusedPane::Queue => FocusedPane::Sorted,
            FocusedPane::Sorted => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// The playback controller
    pub player: Player,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub queue_scroll: usize,
    pub sorted_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Weight being typed, while in add mode
    pub input_buffer: Option<String>,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around the given player
    pub fn new(player: Player) -> Self {
        App {
            player,
            focused_pane: FocusedPane::Tree,
            queue_scroll: 0,
            sorted_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            input_buffer: None,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let now = Instant::now();
            if self.player.tick(now) {
                self.status_message = if self.player.is_playing() {
                    "Playing...".to_string()
                } else {
                    self.completion_message()
                };
            }

            // Wake up for the next tick or the next key, whichever comes first
            let timeout = self
                .player
                .time_until_next_tick(now)
                .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, narration and status bar below
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        // Tree on the left, queue and sorted list stacked on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let snapshot = self.player.snapshot();

        super::panes::render_tree_pane(
            frame,
            columns[0],
            &snapshot.heap,
            self.player.highlighted(),
            self.player.phase(),
            self.focused_pane == FocusedPane::Tree,
        );

        super::panes::render_queue_pane(
            frame,
            right_rows[0],
            &snapshot.input,
            self.focused_pane == FocusedPane::Queue,
            &mut self.queue_scroll,
        );

        super::panes::render_sorted_pane(
            frame,
            right_rows[1],
            &snapshot.sorted,
            self.focused_pane == FocusedPane::Sorted,
            &mut self.sorted_scroll,
        );

        super::panes::render_narration_pane(
            frame,
            main_chunks[1],
            self.player.phase(),
            self.player.message(),
            self.input_buffer.as_deref(),
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            super::panes::StatusRenderData {
                message: &self.status_message,
                position: self.player.position(),
                total_steps: self.player.total_steps(),
                mode: self.player.mode(),
                is_playing: self.player.is_playing(),
                is_input: self.input_buffer.is_some(),
                speed_ms: self.player.speed_ms(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input_buffer.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.status_message = match self.player.toggle(Instant::now()) {
                        Ok(true) => "Playing...".to_string(),
                        Ok(false) => "Paused".to_string(),
                        Err(e) => format!("Cannot play: {}", e),
                    };
                }
            }
            KeyCode::Right | KeyCode::Char('n') => self.step_forward(),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.status_message = match self.player.extract_all(Instant::now()) {
                    Ok(()) => "Extracting...".to_string(),
                    Err(e) => format!("Cannot extract: {}", e),
                };
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.input_buffer = Some(String::new());
                self.status_message = format!(
                    "Adding Person {}: type a weight",
                    self.player.next_person_id()
                );
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_speed(faster(self.player.speed_ms()));
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.set_speed(slower(self.player.speed_ms()));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.player.reset();
                self.queue_scroll = 0;
                self.sorted_scroll = 0;
                self.status_message = "Reset".to_string();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Queue => self.queue_scroll = self.queue_scroll.saturating_sub(1),
                FocusedPane::Sorted => self.sorted_scroll = self.sorted_scroll.saturating_sub(1),
                FocusedPane::Tree => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Queue => self.queue_scroll = self.queue_scroll.saturating_add(1),
                FocusedPane::Sorted => self.sorted_scroll = self.sorted_scroll.saturating_add(1),
                FocusedPane::Tree => {}
            },
            _ => {}
        }
    }

    /// Keys while typing a weight
    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(buffer) = self.input_buffer.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => {
                self.input_buffer = None;
                self.status_message = "Cancelled".to_string();
            }
            KeyCode::Enter => {
                let text = self.input_buffer.take().unwrap_or_default();
                self.status_message = match self.player.add_item(&text) {
                    Ok(item) => format!(
                        "Added Person {} (weight: {})",
                        item.person_id, item.weight
                    ),
                    Err(e) => format!("Not added: {}", e),
                };
            }
            _ => {}
        }
    }

    /// Step forward in the current run
    fn step_forward(&mut self) {
        self.status_message = match self.player.step_forward() {
            Ok(()) if self.player.mode() == Mode::Done => self.completion_message(),
            Ok(()) => "Stepped forward".to_string(),
            Err(e) => format!("Cannot step forward: {}", e),
        };
    }

    fn set_speed(&mut self, speed_ms: u64) {
        self.player.set_speed(speed_ms);
        self.status_message = format!("Speed {}", speed_label(self.player.speed_ms()));
    }

    fn completion_message(&self) -> String {
        let snapshot = self.player.snapshot();
        if snapshot.heap.is_empty() && !snapshot.sorted.is_empty() {
            format!("Sorted {} people, heaviest first", snapshot.sorted.len())
        } else {
            format!(
                "Heap built with {} people. Press e to extract",
                snapshot.heap.len()
            )
        }
    }
}

/// Next faster preset, or `speed_ms` if already at the fastest
pub fn faster(speed_ms: u64) -> u64 {
    SPEED_PRESETS_MS
        .iter()
        .copied()
        .find(|&preset| preset < speed_ms)
        .unwrap_or(speed_ms)
}

/// Next slower preset, or `speed_ms` if already at the slowest
pub fn slower(speed_ms: u64) -> u64 {
    SPEED_PRESETS_MS
        .iter()
        .rev()
        .copied()
        .find(|&preset| preset > speed_ms)
        .unwrap_or(speed_ms)
}

/// Playback rate relative to one step per second, e.g. `2.0x`
pub fn speed_label(speed_ms: u64) -> String {
    format!("{:.1}x", 1000.0 / speed_ms.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_presets() {
        assert_eq!(faster(800), 500);
        assert_eq!(faster(200), 200);
        assert_eq!(slower(800), 1000);
        assert_eq!(slower(2000), 2000);
        assert_eq!(speed_label(500), "2.0x");
        assert_eq!(speed_label(2000), "0.5x");
    }
}
