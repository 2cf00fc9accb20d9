//! Bitmap fonts for unicodegame.
//!
//! Parses BDF fonts into cell-sized coverage masks, fills the gaps with
//! procedurally drawn block elements and Legacy Computing wedges, and
//! caches loaded fonts by name. A 10x20 font is embedded as the fallback
//! for missing files.

pub mod bdf;
pub mod builtin;
pub mod error;
pub mod font;
pub mod glyph;
pub mod registry;

pub use bdf::{BdfFont, BdfGlyph, BoundingBox, parse_bdf};
pub use error::FontError;
pub use font::Font;
pub use glyph::GlyphMask;
pub use registry::{FontRegistry, parse_cell_size};
