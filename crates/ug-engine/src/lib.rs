//! Unicode-cell graphics engine.
//!
//! Windows made of fixed-size character cells, drawn with BDF bitmap fonts
//! (10×20 by default), sprites that glide between cells, fading particle
//! effects, and a game loop that composites everything and hands the frame
//! to a [`ug_core::traits::Backend`].
//!
//! # PUBLIC API
//!
//! - `Engine`: init, windows, game loop, fullscreen
//! - `Game`: update / render / on_key callbacks
//! - `Window`: cell drawing, pixel drawing, sprite storage
//! - `WindowOptions`: z-index, font, scale, alpha, background
//! - `SpriteId`: handle to a sprite inside its window
//! - `Sprite`: multi-cell sprite with smooth movement
//! - `SpriteFrame`: one animation frame
//! - `SpriteEntry`: sprite or effect as stored by a window
//! - `EffectSprite`: velocity, drag and fade particle
//! - `EffectParams`: optional arguments of `create_effect`
//! - `create_sprite`: sprite from a multi-line pattern
//! - `create_effect`: effect from a multi-line pattern
//! - `parse_pattern`: pattern to frame
//! - `HeadlessBackend`: scripted backend without display
//! - `EngineError`: engine error type
//!
//! # Example
//! ```
//! use ug_engine::{Engine, Game, HeadlessBackend, create_sprite};
//! use ug_core::{EngineConfig, FrameClock};
//!
//! struct Demo;
//! impl Game for Demo {
//!     fn render(&mut self, engine: &mut Engine) {
//!         if let Ok(root) = engine.root_mut() {
//!             root.put_string(2, 1, "Hello", (0, 255, 0), None);
//!             root.draw_sprites();
//!         }
//!     }
//! }
//!
//! let mut engine = Engine::init(EngineConfig::new("Hello", 10, 3)).unwrap();
//! engine.set_clock(FrameClock::fixed(1.0 / 60.0));
//! let mut backend = HeadlessBackend::new(100, 60).with_frame_limit(1);
//! engine.run(&mut backend, &mut Demo).unwrap();
//! assert_eq!(backend.last_cells().unwrap().to_text(), "\n  Hello\n");
//! ```

pub mod compositor;
pub mod effect;
pub mod engine;
pub mod error;
pub mod headless;
pub mod pattern;
pub mod sprite;
pub mod window;

pub use effect::{EffectParams, EffectSprite, create_effect};
pub use engine::{Engine, Game};
pub use error::EngineError;
pub use headless::HeadlessBackend;
pub use pattern::parse_pattern;
pub use sprite::{Sprite, SpriteEntry, SpriteFrame, create_sprite};
pub use window::{SpriteId, Window, WindowOptions};

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    const SOURCE: &str = include_str!("lib.rs");

    fn listed() -> BTreeSet<String> {
        SOURCE
            .lines()
            .skip_while(|l| !l.starts_with("//! # PUBLIC API"))
            .skip(1)
            .take_while(|l| !l.starts_with("//! #"))
            .filter_map(|l| l.strip_prefix("//! - `"))
            .filter_map(|l| l.split('`').next())
            .map(str::to_string)
            .collect()
    }

    fn exported() -> BTreeSet<String> {
        SOURCE
            .lines()
            .filter_map(|l| l.strip_prefix("pub use "))
            .flat_map(|l| {
                let l = l.trim_end_matches(';');
                let names = match l.split_once('{') {
                    Some((_, inner)) => inner.trim_end_matches('}').to_string(),
                    None => l.rsplit("::").next().unwrap_or(l).to_string(),
                };
                names
                    .split(',')
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn public_api_list_matches_reexports() {
        let listed = listed();
        assert_eq!(listed.len(), 15);
        assert_eq!(listed, exported());
    }
}
