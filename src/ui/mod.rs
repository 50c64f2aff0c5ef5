//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, weight input mode
//! - **[`panes`]**: stateless render functions for each visible pane (heap tree,
//!   input queue, sorted list, narration, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Player`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Player`]: crate::player::Player
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
