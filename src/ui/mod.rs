//! Terminal UI components
//!
//! Built with ratatui for a neon aesthetic.
//! Keyboard-first navigation throughout.

pub mod hero;
pub mod nav;
pub mod search;
pub mod shell;
pub mod theme;

pub use shell::{render_ui, render_ui_at};
pub use theme::Theme;
