use std::collections::HashMap;

use ug_core::color::{Rgb, Rgba, WHITE};

use crate::pattern::parse_pattern;
use crate::sprite::SpriteFrame;
use crate::window::Window;

/// Particule purement visuelle (étincelles, explosions…).
///
/// Pas de position logique : `x`, `y` en cellules (flottants), vitesse en
/// cellules/s, freinage exponentiel et fondu optionnels. Une fois le fondu
/// terminé, `alive` passe à `false` et la fenêtre la retire.
///
/// # Example
/// ```
/// use ug_engine::{EffectParams, create_effect};
/// let mut spark = create_effect("*", 10.0, 15.0, EffectParams {
///     vx: 4.0,
///     fade_time: 0.5,
///     ..EffectParams::default()
/// });
/// spark.update(0.25);
/// assert_eq!(spark.x, 11.0);
/// assert_eq!(spark.alpha(), 127);
/// spark.update(0.25);
/// assert!(!spark.alive);
/// ```
#[derive(Clone, Debug)]
pub struct EffectSprite {
    pub frames: Vec<SpriteFrame>,
    pub fg: Rgb,
    pub bg: Option<Rgba>,
    pub origin: (i32, i32),
    pub current_frame: usize,
    pub visible: bool,
    /// `false` once fully faded.
    pub alive: bool,
    /// Column, fractional.
    pub x: f32,
    /// Row, fractional.
    pub y: f32,
    /// Cells per second.
    pub vx: f32,
    /// Cells per second.
    pub vy: f32,
    /// Velocity multiplier per second (0.1 = 10 % left after 1 s, 1.0 = none).
    pub drag: f32,
    /// Seconds until fully transparent, 0 = never fades.
    pub fade_time: f32,
    fade_elapsed: f32,
}

impl EffectSprite {
    #[must_use]
    pub fn new(frames: Vec<SpriteFrame>) -> Self {
        Self {
            frames,
            fg: WHITE,
            bg: None,
            origin: (0, 0),
            current_frame: 0,
            visible: true,
            alive: true,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            drag: 1.0,
            fade_time: 0.0,
            fade_elapsed: 0.0,
        }
    }

    /// Intègre vitesse, freinage et fondu sur `dt` secondes.
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.x += self.vx * dt;
        self.y += self.vy * dt;

        if self.drag > 0.0 && self.drag < 1.0 {
            let decay = self.drag.powf(dt);
            self.vx *= decay;
            self.vy *= decay;
        }

        if self.fade_time > 0.0 {
            self.fade_elapsed += dt;
            if self.fade_elapsed >= self.fade_time {
                self.alive = false;
                self.visible = false;
            }
        }
    }

    /// Opacité courante : 255 sans fondu, décroissance linéaire sinon.
    #[must_use]
    pub fn alpha(&self) -> u8 {
        if self.fade_time <= 0.0 {
            return 255;
        }
        let progress = (self.fade_elapsed / self.fade_time).min(1.0);
        (255.0 * (1.0 - progress)) as u8
    }

    pub fn draw(&self, window: &mut Window) {
        if !self.visible {
            return;
        }
        let Some(frame) = self.frames.get(self.current_frame) else {
            return;
        };
        let (cell_w, cell_h) = window.cell_size();
        let base = (
            (self.x - self.origin.0 as f32) * cell_w as f32,
            (self.y - self.origin.1 as f32) * cell_h as f32,
        );
        frame.draw(window, base, self.fg, self.bg, self.alpha());
    }
}

/// Paramètres optionnels de [`create_effect`].
///
/// # Example
/// ```
/// use ug_engine::EffectParams;
/// let params = EffectParams { vy: -3.0, drag: 0.5, ..EffectParams::default() };
/// assert_eq!(params.fg, (255, 255, 255));
/// assert_eq!(params.fade_time, 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct EffectParams {
    pub vx: f32,
    pub vy: f32,
    pub fg: Rgb,
    pub bg: Option<Rgba>,
    pub drag: f32,
    pub fade_time: f32,
    pub char_colors: HashMap<char, Rgb>,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            fg: WHITE,
            bg: None,
            drag: 1.0,
            fade_time: 0.0,
            char_colors: HashMap::new(),
        }
    }
}

/// Crée un effet à partir d'un motif (mêmes règles que [`crate::create_sprite`]).
///
/// # Arguments
/// * `pattern` - character(s) of the effect, multi-line allowed
/// * `x`, `y` - starting position in cells
/// * `params` - velocity, colours, drag, fade and per-character colours
///
/// # Returns
/// An [`EffectSprite`] ready for `Window::add_sprite`.
///
/// # Example
/// ```
/// use ug_engine::{EffectParams, create_effect};
/// let spark = create_effect("*", 10.0, 15.0, EffectParams {
///     vx: 5.0,
///     vy: -8.0,
///     fg: (255, 200, 0),
///     drag: 0.3,
///     fade_time: 0.5,
///     ..EffectParams::default()
/// });
/// assert_eq!((spark.x, spark.y), (10.0, 15.0));
/// assert_eq!(spark.frames[0].chars, vec![vec!['*']]);
/// ```
#[must_use]
pub fn create_effect(pattern: &str, x: f32, y: f32, params: EffectParams) -> EffectSprite {
    let mut effect = EffectSprite::new(vec![parse_pattern(pattern, &params.char_colors)]);
    effect.fg = params.fg;
    effect.bg = params.bg;
    effect.x = x;
    effect.y = y;
    effect.vx = params.vx;
    effect.vy = params.vy;
    effect.drag = params.drag;
    effect.fade_time = params.fade_time;
    effect
}
