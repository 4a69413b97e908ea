//! Terminal UI plumbing shared by the player and the CLI
//!
//! - `app`: raw mode / alternate screen ownership around a ratatui terminal
//! - `footer`: key hint line
//! - `theme`: colors for TUI widgets and plain CLI output
//! - `ui`: layout helpers

pub mod app;
pub mod footer;
pub mod theme;
pub mod ui;

pub use app::TuiApp;
pub use theme::{current_theme, Theme};
