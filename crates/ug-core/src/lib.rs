//! Shared types for unicodegame.
//!
//! This crate contains the colour helpers, pixel surfaces, cell grids,
//! input events, frame clock, backend traits and configuration logic
//! used across the unicodegame workspace.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod surface;
pub mod traits;

pub use clock::FrameClock;
pub use color::{Rgb, Rgba};
pub use config::{EngineConfig, PresentMode};
pub use error::CoreError;
pub use grid::{Cell, CellGrid};
pub use input::{InputEvent, Key, Modifiers};
pub use surface::Surface;
pub use traits::{Backend, Frame};
