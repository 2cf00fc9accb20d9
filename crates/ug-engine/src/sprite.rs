use std::collections::HashMap;

use ug_core::color::{Rgb, Rgba, WHITE};

use crate::effect::EffectSprite;
use crate::pattern::parse_pattern;
use crate::window::Window;

/// Distance (pixels) under which a moving sprite snaps to its target.
const SNAP_DISTANCE: f32 = 0.5;

/// Default seconds per animation frame.
pub const DEFAULT_FRAME_DURATION: f32 = 0.1;

/// Une frame d'animation : grille de caractères et couleurs optionnelles.
///
/// `None` dans une grille de couleurs = couleur par défaut du sprite.
///
/// # Example
/// ```
/// use ug_engine::SpriteFrame;
/// let frame = SpriteFrame::new(vec![vec!['/', '\\'], vec!['\\', '/']]);
/// assert_eq!((frame.width(), frame.height()), (2, 2));
/// assert_eq!(SpriteFrame::new(vec![]).width(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteFrame {
    /// Rows of characters. `' '` is transparent.
    pub chars: Vec<Vec<char>>,
    /// Per-character foreground overrides.
    pub fg_colors: Option<Vec<Vec<Option<Rgb>>>>,
    /// Per-character background overrides.
    pub bg_colors: Option<Vec<Vec<Option<Rgba>>>>,
}

impl SpriteFrame {
    #[must_use]
    pub fn new(chars: Vec<Vec<char>>) -> Self {
        Self {
            chars,
            fg_colors: None,
            bg_colors: None,
        }
    }

    /// Builder: per-character foreground grid.
    #[must_use]
    pub fn with_fg_colors(mut self, colors: Vec<Vec<Option<Rgb>>>) -> Self {
        self.fg_colors = Some(colors);
        self
    }

    /// Builder: per-character background grid.
    #[must_use]
    pub fn with_bg_colors(mut self, colors: Vec<Vec<Option<Rgba>>>) -> Self {
        self.bg_colors = Some(colors);
        self
    }

    /// Longueur de la première ligne (0 sans ligne).
    #[must_use]
    pub fn width(&self) -> usize {
        self.chars.first().map_or(0, Vec::len)
    }

    /// Nombre de lignes.
    #[must_use]
    pub fn height(&self) -> usize {
        self.chars.len()
    }

    fn fg_at(&self, row: usize, col: usize) -> Option<Rgb> {
        self.fg_colors.as_ref()?.get(row)?.get(col).copied().flatten()
    }

    fn bg_at(&self, row: usize, col: usize) -> Option<Rgba> {
        self.bg_colors.as_ref()?.get(row)?.get(col).copied().flatten()
    }

    /// Dessine la frame au pixel (`base_x`, `base_y`) de la fenêtre.
    pub(crate) fn draw(
        &self,
        window: &mut Window,
        (base_x, base_y): (f32, f32),
        fg: Rgb,
        bg: Option<Rgba>,
        alpha: u8,
    ) {
        let (cell_w, cell_h) = window.cell_size();
        for (row, line) in self.chars.iter().enumerate() {
            for (col, &ch) in line.iter().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let px = base_x + col as f32 * cell_w as f32;
                let py = base_y + row as f32 * cell_h as f32;
                let fg = self.fg_at(row, col).unwrap_or(fg);
                let bg = self.bg_at(row, col).or(bg);
                window.put_at_pixel(px, py, ch, fg, bg, alpha);
            }
        }
    }
}

/// Bloc de caractères déplacé d'un seul tenant.
///
/// La position logique (`x`, `y`, en cellules) change instantanément avec
/// [`Sprite::move_to`] ; la position visuelle (pixels) la rejoint à
/// `move_speed` cellules par seconde lors de [`Sprite::update`].
///
/// # Example
/// ```
/// use ug_engine::{Sprite, SpriteFrame};
/// let mut sprite = Sprite::new(vec![SpriteFrame::new(vec![vec!['@']])]);
/// sprite.set_move_speed(10.0);
/// sprite.move_to(2, 0);
/// sprite.update(0.1, 10, 20);
/// // 10 cellules/s × 10 px × 0.1 s = 10 px parcourus sur 20.
/// assert_eq!(sprite.visual_position(), (10.0, 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sprite {
    pub frames: Vec<SpriteFrame>,
    /// Default foreground.
    pub fg: Rgb,
    /// Default background, `None` = transparent.
    pub bg: Option<Rgba>,
    /// Offset in cells subtracted from the position when drawing.
    pub origin: (i32, i32),
    pub current_frame: usize,
    /// Seconds per frame for multi-frame sprites.
    pub frame_duration: f32,
    pub visible: bool,
    /// Logical column.
    pub x: i32,
    /// Logical row.
    pub y: i32,
    frame_timer: f32,
    visual_x: f32,
    visual_y: f32,
    move_speed: f32,
}

impl Sprite {
    /// Sprite blanc, sans fond, origine (0, 0), en (0, 0).
    #[must_use]
    pub fn new(frames: Vec<SpriteFrame>) -> Self {
        Self {
            frames,
            fg: WHITE,
            bg: None,
            origin: (0, 0),
            current_frame: 0,
            frame_duration: DEFAULT_FRAME_DURATION,
            visible: true,
            x: 0,
            y: 0,
            frame_timer: 0.0,
            visual_x: 0.0,
            visual_y: 0.0,
            move_speed: 0.0,
        }
    }

    /// Builder: default colours.
    #[must_use]
    pub fn with_colors(mut self, fg: Rgb, bg: Option<Rgba>) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    /// Builder: drawing origin in cells.
    #[must_use]
    pub fn with_origin(mut self, origin: (i32, i32)) -> Self {
        self.origin = origin;
        self
    }

    /// Change la position logique. La position visuelle suit au prochain `update`.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Vitesse de glissement en cellules/s. 0 ou moins = déplacement instantané.
    pub fn set_move_speed(&mut self, cells_per_second: f32) {
        self.move_speed = cells_per_second;
    }

    #[must_use]
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Position visuelle en pixels de la fenêtre.
    #[must_use]
    pub fn visual_position(&self) -> (f32, f32) {
        (self.visual_x, self.visual_y)
    }

    /// Sélectionne la frame `index` (modulo le nombre de frames).
    pub fn set_frame(&mut self, index: usize) {
        if !self.frames.is_empty() {
            self.current_frame = index % self.frames.len();
            self.frame_timer = 0.0;
        }
    }

    /// Avance l'animation et rapproche la position visuelle de la cible.
    pub fn update(&mut self, dt: f32, cell_width: u32, cell_height: u32) {
        self.advance_animation(dt);

        let target_x = (i64::from(self.x) * i64::from(cell_width)) as f32;
        let target_y = (i64::from(self.y) * i64::from(cell_height)) as f32;

        if self.move_speed <= 0.0 {
            self.visual_x = target_x;
            self.visual_y = target_y;
            return;
        }

        let dx = target_x - self.visual_x;
        let dy = target_y - self.visual_y;
        let distance = dx.hypot(dy);
        if distance > SNAP_DISTANCE {
            let step = (self.move_speed * cell_width as f32 * dt).min(distance);
            self.visual_x += dx / distance * step;
            self.visual_y += dy / distance * step;
        } else {
            self.visual_x = target_x;
            self.visual_y = target_y;
        }
    }

    fn advance_animation(&mut self, dt: f32) {
        if self.frames.len() < 2 || self.frame_duration <= 0.0 {
            return;
        }
        self.frame_timer += dt;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.current_frame = (self.current_frame + 1) % self.frames.len();
        }
    }

    /// Dessine la frame courante à la position visuelle.
    pub fn draw(&self, window: &mut Window) {
        let Some(frame) = self.frames.get(self.current_frame) else {
            return;
        };
        let (cell_w, cell_h) = window.cell_size();
        let base = (
            self.visual_x - (self.origin.0 as f32 * cell_w as f32),
            self.visual_y - (self.origin.1 as f32 * cell_h as f32),
        );
        frame.draw(window, base, self.fg, self.bg, 255);
    }
}

/// Sprite ou effet, tel que stocké par une fenêtre.
///
/// # Example
/// ```
/// use ug_engine::{EffectParams, SpriteEntry, create_effect};
/// let entry = SpriteEntry::from(create_effect("*", 0.0, 0.0, EffectParams::default()));
/// assert!(entry.alive() && entry.visible());
/// ```
#[derive(Clone, Debug)]
pub enum SpriteEntry {
    Sprite(Sprite),
    Effect(EffectSprite),
}

impl SpriteEntry {
    #[must_use]
    pub fn visible(&self) -> bool {
        match self {
            Self::Sprite(s) => s.visible,
            Self::Effect(e) => e.visible,
        }
    }

    /// `false` une fois un effet complètement estompé.
    #[must_use]
    pub fn alive(&self) -> bool {
        match self {
            Self::Sprite(_) => true,
            Self::Effect(e) => e.alive,
        }
    }

    pub(crate) fn update(&mut self, dt: f32, cell_width: u32, cell_height: u32) {
        match self {
            Self::Sprite(s) => s.update(dt, cell_width, cell_height),
            Self::Effect(e) => e.update(dt),
        }
    }

    pub(crate) fn draw(&self, window: &mut Window) {
        match self {
            Self::Sprite(s) => s.draw(window),
            Self::Effect(e) => e.draw(window),
        }
    }
}

impl From<Sprite> for SpriteEntry {
    fn from(sprite: Sprite) -> Self {
        Self::Sprite(sprite)
    }
}

impl From<EffectSprite> for SpriteEntry {
    fn from(effect: EffectSprite) -> Self {
        Self::Effect(effect)
    }
}

/// Crée un sprite d'une frame à partir d'un motif multi-lignes.
///
/// L'indentation commune et les lignes vides de début et de fin sont
/// retirées ; les espaces sont transparents. `char_colors` associe une
/// couleur de premier plan à certains caractères.
///
/// # Arguments
/// * `pattern` - multi-line character art
/// * `fg` - default foreground
/// * `bg` - default background, `None` = transparent
/// * `char_colors` - per-character foreground overrides (may be empty)
///
/// # Returns
/// A single-frame [`Sprite`] at logical position (0, 0).
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use ug_engine::create_sprite;
/// let colors = HashMap::from([('@', (255, 255, 0))]);
/// let player = create_sprite("
///      @
///     /|\\
///     / \\
/// ", (0, 255, 0), None, &colors);
/// let frame = &player.frames[0];
/// assert_eq!(frame.chars[0], vec![' ', '@', ' ']);
/// assert_eq!(frame.width(), 3);
/// assert_eq!(frame.fg_colors.as_ref().unwrap()[0][1], Some((255, 255, 0)));
/// ```
#[must_use]
pub fn create_sprite(
    pattern: &str,
    fg: Rgb,
    bg: Option<Rgba>,
    char_colors: &HashMap<char, Rgb>,
) -> Sprite {
    Sprite::new(vec![parse_pattern(pattern, char_colors)]).with_colors(fg, bg)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ug_font::Font;

    use super::*;
    use crate::window::WindowOptions;

    fn single(ch: char) -> Sprite {
        Sprite::new(vec![SpriteFrame::new(vec![vec![ch]])])
    }

    fn window(cell: (u32, u32), size: (u32, u32)) -> Window {
        let font = Arc::new(Font::builtin("test", cell.0, cell.1));
        Window::new("w", (0, 0), size, font, &WindowOptions::default()).unwrap()
    }

    #[test]
    fn zero_speed_snaps() {
        let mut sprite = single('@');
        sprite.move_to(3, 2);
        sprite.update(0.016, 10, 20);
        assert_eq!(sprite.visual_position(), (30.0, 40.0));
    }

    #[test]
    fn step_never_overshoots() {
        let mut sprite = single('@');
        sprite.set_move_speed(100.0);
        sprite.move_to(1, 0);
        sprite.update(1.0, 10, 20);
        assert_eq!(sprite.visual_position(), (10.0, 0.0));
    }

    #[test]
    fn diagonal_move_follows_straight_line() {
        let mut sprite = single('@');
        sprite.set_move_speed(1.0);
        sprite.move_to(3, 2);
        // Cible (30, 40), distance 50 ; pas = 1 × 10 × 1 = 10 px.
        sprite.update(1.0, 10, 20);
        let (x, y) = sprite.visual_position();
        assert!((x - 6.0).abs() < 1e-4 && (y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn close_enough_snaps() {
        let mut sprite = single('@');
        sprite.set_move_speed(1.0);
        sprite.update(0.0, 10, 20);
        sprite.move_to(0, 0);
        sprite.visual_x = 0.4;
        sprite.update(0.0, 10, 20);
        assert_eq!(sprite.visual_position(), (0.0, 0.0));
    }

    #[test]
    fn multi_frame_animation_wraps() {
        let mut sprite = Sprite::new(vec![
            SpriteFrame::new(vec![vec!['a']]),
            SpriteFrame::new(vec![vec!['b']]),
        ]);
        sprite.frame_duration = 0.5;
        sprite.update(1.25, 10, 20);
        assert_eq!(sprite.current_frame, 0);
        sprite.update(0.25, 10, 20);
        assert_eq!(sprite.current_frame, 1);
        sprite.set_frame(3);
        assert_eq!(sprite.current_frame, 1);
    }

    #[test]
    fn single_frame_never_advances() {
        let mut sprite = single('x');
        sprite.update(5.0, 10, 20);
        assert_eq!(sprite.current_frame, 0);
    }

    #[test]
    fn origin_shifts_drawing_up_and_left() {
        let mut win = window((2, 4), (6, 6));
        let mut sprite = single('█').with_origin((1, 2));
        sprite.move_to(3, 3);
        sprite.update(0.0, 2, 4);
        sprite.draw(&mut win);
        // (3, 3) moins l'origine (1, 2) : cellule (2, 1), pixel (4, 4).
        assert_eq!(win.cells().get(2, 1).unwrap().ch, '█');
        assert_eq!(win.cells().get(3, 3).unwrap().ch, ' ');
        assert_eq!(win.surface().pixel(4, 4), (255, 255, 255, 255));
        assert_eq!(win.surface().pixel(6, 12), (0, 0, 0, 0));
    }

    #[test]
    fn per_char_background_overrides_sprite_bg() {
        let mut win = window((6, 10), (4, 2));
        let frame = SpriteFrame::new(vec![vec!['a', 'b']])
            .with_bg_colors(vec![vec![Some((0, 0, 200, 255)), None]]);
        let sprite = Sprite::new(vec![frame]).with_colors(WHITE, Some((9, 9, 9, 255)));
        sprite.draw(&mut win);
        // Le coin (0, 0) d'une boîte tofu reste vide : on y lit le fond.
        assert_eq!(win.surface().pixel(0, 0), (0, 0, 200, 255));
        assert_eq!(win.surface().pixel(6, 0), (9, 9, 9, 255));
        assert_eq!(win.cells().get(0, 0).unwrap().bg, Some((0, 0, 200)));
        assert_eq!(win.cells().get(1, 0).unwrap().bg, Some((9, 9, 9)));
        assert_eq!(win.cells().get(2, 0).unwrap().bg, None);
    }

    #[test]
    fn color_lookup_falls_back() {
        let frame = SpriteFrame::new(vec![vec!['a', 'b']])
            .with_fg_colors(vec![vec![Some((1, 2, 3))]]);
        assert_eq!(frame.fg_at(0, 0), Some((1, 2, 3)));
        assert_eq!(frame.fg_at(0, 1), None);
        assert_eq!(frame.bg_at(0, 0), None);
    }
}
