use std::collections::HashMap;
use std::sync::Arc;

use ug_core::color::{Rgb, Rgba, TRANSPARENT, lerp_rgb, scale_alpha};
use ug_core::grid::{Cell, CellGrid};
use ug_core::surface::Surface;
use ug_core::CoreError;
use ug_font::{Font, GlyphMask};

use crate::effect::EffectSprite;
use crate::error::EngineError;
use crate::sprite::{Sprite, SpriteEntry};

const BLACK: Rgb = (0, 0, 0);

/// Identifiant d'un sprite dans sa fenêtre, stable jusqu'à son retrait.
///
/// # Example
/// ```
/// use ug_engine::{Engine, create_sprite};
/// use ug_core::EngineConfig;
/// let mut engine = Engine::init(EngineConfig::new("doc", 10, 5)).unwrap();
/// let root = engine.root_mut().unwrap();
/// let id = root.add_sprite(create_sprite("@", (255, 255, 255), None, &Default::default()));
/// assert!(root.sprite(id).is_some());
/// root.remove_sprite(id);
/// assert!(root.sprite(id).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(u64);

/// Options de création d'une fenêtre (voir `Engine::create_window`).
///
/// # Example
/// ```
/// use ug_engine::WindowOptions;
/// let options = WindowOptions {
///     z_index: 10,
///     font_name: Some("6x13".into()),
///     alpha: 128,
///     ..WindowOptions::default()
/// };
/// assert_eq!(options.scale, 1.0);
/// assert!(options.bg.is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WindowOptions {
    /// Drawing order, higher on top.
    pub z_index: i32,
    /// Font name, `None` = the root font.
    pub font_name: Option<String>,
    /// Extra scale applied to the font cell.
    pub scale: f32,
    /// Window opacity when composited.
    pub alpha: u8,
    /// Background, `None` = transparent.
    pub bg: Option<Rgba>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            z_index: 0,
            font_name: None,
            scale: 1.0,
            alpha: 255,
            bg: None,
        }
    }
}

/// Surface de rendu nommée, avec sa propre police et ses propres cellules.
///
/// Position (`x`, `y`) en cellules racine ; taille en cellules de la
/// fenêtre. Composée par le moteur en ordre de `z_index` croissant.
///
/// # Example
/// ```
/// use ug_engine::{Engine, WindowOptions};
/// use ug_core::EngineConfig;
/// let mut engine = Engine::init(EngineConfig::new("doc", 20, 10)).unwrap();
/// let hud = engine
///     .create_window("hud", 0, 8, 20, 2, WindowOptions { z_index: 5, ..Default::default() })
///     .unwrap();
/// hud.put_string(1, 0, "HP 10", (255, 0, 0), None);
/// assert_eq!(hud.cells().get(1, 0).map(|c| c.ch), Some('H'));
/// assert_eq!(hud.pixel_size(), (200, 40));
/// ```
#[derive(Debug)]
pub struct Window {
    /// Column in root cells.
    pub x: i32,
    /// Row in root cells.
    pub y: i32,
    pub z_index: i32,
    pub alpha: u8,
    pub visible: bool,
    name: String,
    width: u32,
    height: u32,
    scale: f32,
    bg: Rgba,
    font: Arc<Font>,
    cell_width: u32,
    cell_height: u32,
    surface: Surface,
    cells: CellGrid,
    scaled_glyphs: Option<HashMap<char, GlyphMask>>,
    sprites: Vec<(SpriteId, SpriteEntry)>,
    next_sprite: u64,
}

impl Window {
    /// Crée une fenêtre vidée à sa couleur de fond.
    ///
    /// # Errors
    /// [`CoreError::InvalidScale`] if `options.scale` is not finite and
    /// positive, [`CoreError::InvalidDimensions`] for a zero-sized window.
    pub fn new(
        name: &str,
        (x, y): (i32, i32),
        (width, height): (u32, u32),
        font: Arc<Font>,
        options: &WindowOptions,
    ) -> Result<Self, EngineError> {
        if !options.scale.is_finite() || options.scale <= 0.0 {
            return Err(CoreError::InvalidScale(options.scale).into());
        }
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height }.into());
        }
        let (font_w, font_h) = font.cell_size();
        let cell_width = ((font_w as f32 * options.scale) as u32).max(1);
        let cell_height = ((font_h as f32 * options.scale) as u32).max(1);
        let scaled_glyphs = ((cell_width, cell_height) != (font_w, font_h)).then(HashMap::new);

        let mut window = Self {
            x,
            y,
            z_index: options.z_index,
            alpha: options.alpha,
            visible: true,
            name: name.to_string(),
            width,
            height,
            scale: options.scale,
            bg: options.bg.unwrap_or(TRANSPARENT),
            font,
            cell_width,
            cell_height,
            surface: Surface::new(width * cell_width, height * cell_height),
            cells: CellGrid::new(width, height),
            scaled_glyphs,
            sprites: Vec::new(),
            next_sprite: 0,
        };
        window.clear();
        log::debug!(
            "Fenêtre {name} : {width}x{height} cellules de {cell_width}x{cell_height} px ({})",
            window.font.name()
        );
        Ok(window)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Largeur en cellules de la fenêtre.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Hauteur en cellules de la fenêtre.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Taille d'une cellule en pixels, échelle appliquée.
    #[must_use]
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Taille de la surface en pixels.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.surface.width, self.surface.height)
    }

    #[must_use]
    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    /// Pixels dessinés depuis le dernier `clear`.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Ombre textuelle de la surface.
    #[must_use]
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    #[must_use]
    pub fn bg(&self) -> Rgba {
        self.bg
    }

    /// Change la couleur de fond, appliquée au prochain `clear`.
    pub fn set_bg(&mut self, bg: Rgba) {
        self.bg = bg;
    }

    /// Remplit la surface et les cellules avec la couleur de fond.
    pub fn clear(&mut self) {
        self.surface.fill(self.bg);
        let (r, g, b, a) = self.bg;
        self.cells
            .clear_to((a > 0).then(|| lerp_rgb(BLACK, (r, g, b), a)));
    }

    /// Dessine `ch` dans la cellule (x, y). Hors fenêtre → ignoré.
    ///
    /// Avec `bg`, la cellule est d'abord remplie (opaque).
    ///
    /// # Example
    /// ```
    /// use ug_engine::Engine;
    /// use ug_core::EngineConfig;
    /// let mut engine = Engine::init(EngineConfig::new("doc", 10, 5)).unwrap();
    /// let root = engine.root_mut().unwrap();
    /// root.put(2, 1, '@', (255, 255, 0), Some((0, 0, 80)));
    /// let cell = root.cells().get(2, 1).unwrap();
    /// assert_eq!((cell.ch, cell.fg, cell.bg), ('@', (255, 255, 0), Some((0, 0, 80))));
    /// // Coin haut-gauche de la cellule : le fond, pas le glyphe.
    /// assert_eq!(root.surface().pixel(20, 20), (0, 0, 80, 255));
    /// root.put(10, 0, 'x', (255, 255, 255), None);
    /// assert!(root.cells().get(10, 0).is_none());
    /// ```
    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Rgb, bg: Option<Rgb>) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let px = x * self.cell_width as i32;
        let py = y * self.cell_height as i32;
        if let Some((r, g, b)) = bg {
            self.surface
                .fill_rect(px, py, self.cell_width, self.cell_height, (r, g, b, 255));
        }
        self.draw_glyph(px, py, ch, fg, 255);

        if let Some(cell) = self.cells.get_mut(x as u32, y as u32) {
            *cell = Cell {
                ch,
                fg,
                bg: bg.or(cell.bg),
            };
        }
    }

    /// `put` pour chaque caractère, à partir de (x, y), sans retour à la ligne.
    ///
    /// # Example
    /// ```
    /// use ug_engine::Engine;
    /// use ug_core::EngineConfig;
    /// let mut engine = Engine::init(EngineConfig::new("doc", 10, 5)).unwrap();
    /// let root = engine.root_mut().unwrap();
    /// root.put_string(8, 0, "xyz", (0, 255, 0), None);
    /// let row: String = (8..10).filter_map(|x| root.cells().get(x, 0)).map(|c| c.ch).collect();
    /// // Le 'z' tombe hors de la fenêtre.
    /// assert_eq!(row, "xy");
    /// ```
    pub fn put_string(&mut self, x: i32, y: i32, text: &str, fg: Rgb, bg: Option<Rgb>) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x.saturating_add(i as i32), y, ch, fg, bg);
        }
    }

    /// Dessine `ch` au pixel (px, py), tronqué vers zéro.
    ///
    /// Ignoré si le point tronqué tombe hors de la surface. Le fond
    /// optionnel remplace les pixels avec l'alpha `bg.a * alpha / 255` ;
    /// le glyphe est mélangé avec `alpha`.
    ///
    /// # Example
    /// ```
    /// use ug_engine::Engine;
    /// use ug_core::EngineConfig;
    /// let mut engine = Engine::init(EngineConfig::new("doc", 10, 5)).unwrap();
    /// let root = engine.root_mut().unwrap();
    /// // 24/10 et 41/20 s'arrondissent à la cellule (2, 2).
    /// root.put_at_pixel(24.0, 41.0, '*', (255, 0, 0), None, 255);
    /// let cell = root.cells().get(2, 2).unwrap();
    /// assert_eq!((cell.ch, cell.fg), ('*', (255, 0, 0)));
    /// root.put_at_pixel(-3.0, 0.0, '#', (255, 0, 0), None, 255);
    /// assert_eq!(root.cells().get(0, 0).unwrap().ch, ' ');
    /// ```
    pub fn put_at_pixel(&mut self, px: f32, py: f32, ch: char, fg: Rgb, bg: Option<Rgba>, alpha: u8) {
        let (xi, yi) = (px as i32, py as i32);
        if xi < 0 || yi < 0 || xi as u32 >= self.surface.width || yi as u32 >= self.surface.height {
            return;
        }
        if let Some((r, g, b, a)) = bg {
            self.surface.fill_rect(
                xi,
                yi,
                self.cell_width,
                self.cell_height,
                (r, g, b, scale_alpha(a, alpha)),
            );
        }
        self.draw_glyph(xi, yi, ch, fg, alpha);

        let cx = (px / self.cell_width as f32).round() as i32;
        let cy = (py / self.cell_height as f32).round() as i32;
        if cx < 0 || cy < 0 {
            return;
        }
        if let Some(cell) = self.cells.get_mut(cx as u32, cy as u32) {
            if let Some((r, g, b, a)) = bg {
                let a = scale_alpha(a, alpha);
                if a > 0 {
                    cell.bg = Some(lerp_rgb(cell.bg.unwrap_or(BLACK), (r, g, b), a));
                }
            }
            if ch != ' ' {
                cell.ch = ch;
                cell.fg = lerp_rgb(cell.bg.unwrap_or(BLACK), fg, alpha);
            }
        }
    }

    fn draw_glyph(&mut self, px: i32, py: i32, ch: char, fg: Rgb, alpha: u8) {
        let font = &self.font;
        let mask = match self.scaled_glyphs.as_mut() {
            None => font.mask(ch),
            Some(cache) => {
                let (w, h) = (self.cell_width, self.cell_height);
                &*cache.entry(ch).or_insert_with(|| font.mask(ch).scaled(w, h))
            }
        };
        self.surface
            .blend_mask(px, py, &mask.coverage, mask.width, mask.height, fg, alpha);
    }

    // === Sprites ===

    /// Ajoute un sprite ou un effet, dessiné après ceux déjà présents.
    ///
    /// # Example
    /// ```
    /// use ug_engine::{Engine, Sprite, SpriteFrame};
    /// use ug_core::EngineConfig;
    /// let mut engine = Engine::init(EngineConfig::new("doc", 10, 5)).unwrap();
    /// let root = engine.root_mut().unwrap();
    /// let ship = Sprite::new(vec![SpriteFrame::new(vec![vec!['<', '>']])]);
    /// let a = root.add_sprite(ship.clone());
    /// let b = root.add_sprite(ship);
    /// assert_ne!(a, b);
    /// assert!(root.sprite_mut(a).is_some());
    /// assert!(root.effect_mut(a).is_none());
    /// ```
    pub fn add_sprite(&mut self, sprite: impl Into<SpriteEntry>) -> SpriteId {
        let id = SpriteId(self.next_sprite);
        self.next_sprite += 1;
        self.sprites.push((id, sprite.into()));
        id
    }

    /// Retire un sprite. Identifiant inconnu → rien.
    pub fn remove_sprite(&mut self, id: SpriteId) -> Option<SpriteEntry> {
        let index = self.sprites.iter().position(|(sid, _)| *sid == id)?;
        Some(self.sprites.remove(index).1)
    }

    #[must_use]
    pub fn sprite(&self, id: SpriteId) -> Option<&SpriteEntry> {
        self.sprites.iter().find(|(sid, _)| *sid == id).map(|(_, s)| s)
    }

    /// Accès mutable à un [`Sprite`] (pas un effet).
    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        match self.entry_mut(id)? {
            SpriteEntry::Sprite(sprite) => Some(sprite),
            SpriteEntry::Effect(_) => None,
        }
    }

    /// Accès mutable à un [`EffectSprite`].
    pub fn effect_mut(&mut self, id: SpriteId) -> Option<&mut EffectSprite> {
        match self.entry_mut(id)? {
            SpriteEntry::Effect(effect) => Some(effect),
            SpriteEntry::Sprite(_) => None,
        }
    }

    fn entry_mut(&mut self, id: SpriteId) -> Option<&mut SpriteEntry> {
        self.sprites
            .iter_mut()
            .find(|(sid, _)| *sid == id)
            .map(|(_, s)| s)
    }

    #[must_use]
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Met à jour tous les sprites puis retire les effets terminés.
    pub fn update_sprites(&mut self, dt: f32) {
        let (cell_w, cell_h) = (self.cell_width, self.cell_height);
        for (_, sprite) in &mut self.sprites {
            sprite.update(dt, cell_w, cell_h);
        }
        self.sprites.retain(|(_, sprite)| sprite.alive());
    }

    /// Dessine les sprites visibles dans l'ordre d'ajout.
    pub fn draw_sprites(&mut self) {
        let sprites = std::mem::take(&mut self.sprites);
        for (_, sprite) in &sprites {
            if sprite.visible() {
                sprite.draw(self);
            }
        }
        self.sprites = sprites;
    }
}
