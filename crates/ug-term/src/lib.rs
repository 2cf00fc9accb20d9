//! Terminal backend for unicodegame.
//!
//! Presents composited frames with ratatui (truecolor cells or half-block
//! pixels) and translates crossterm key presses into engine input events.

pub mod backend;
pub mod canvas;
pub mod fps;
pub mod ui;

pub use backend::TerminalBackend;
pub use fps::FpsCounter;
