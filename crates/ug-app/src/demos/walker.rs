use std::collections::HashMap;

use anyhow::Result;
use ug_core::color::Rgb;
use ug_core::input::Key;
use ug_engine::{Engine, Game, Sprite, SpriteEntry, SpriteId, WindowOptions, parse_pattern};

/// Fenêtre du décor lointain, défilant à mi-vitesse.
const HILLS: &str = "hills";
/// Fenêtre du personnage et du sol.
const STAGE: &str = "stage";

const HILLS_WIDTH: u32 = 120;
const HILLS_HEIGHT: u32 = 8;
const GROUND_ROW: i32 = 19;
const PLAYER_ROW: i32 = 16;
const MAX_X: i32 = 57;
/// Cellules par seconde.
const WALK_SPEED: f32 = 12.0;
const STAR_COUNT: usize = 40;
const FULL: char = '█';
const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';

const STEP_A: &str = "
 o
/|\\
/ \\
";
const STEP_B: &str = "
 o
/|\\
 |
";

/// Personnage qui marche (flèches gauche/droite) devant des collines en
/// parallaxe et un ciel étoilé. Q quitte.
pub struct Walker {
    player: SpriteId,
    stars: Vec<(i32, i32, Rgb)>,
}

impl Walker {
    /// Crée les fenêtres `hills` et `stage` et y place le personnage.
    ///
    /// # Errors
    /// Propagates window creation errors.
    pub fn new(engine: &mut Engine, seed: u64) -> Result<Self> {
        let (width, height) = {
            let root = engine.root()?;
            (root.width() as i32, root.height() as i32)
        };

        let mut rng = fastrand::Rng::with_seed(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| {
                let level = rng.u8(90..=220);
                (rng.i32(0..width), rng.i32(2..height / 2), (level, level, level.saturating_add(30)))
            })
            .collect();

        engine.create_window(
            HILLS,
            0,
            GROUND_ROW + 1 - HILLS_HEIGHT as i32,
            HILLS_WIDTH,
            HILLS_HEIGHT,
            WindowOptions {
                z_index: 1,
                ..WindowOptions::default()
            },
        )?;

        let stage = engine.create_window(
            STAGE,
            0,
            0,
            width as u32,
            height as u32,
            WindowOptions {
                z_index: 2,
                ..WindowOptions::default()
            },
        )?;
        let colors = HashMap::from([('o', (255, 220, 180))]);
        let mut player = Sprite::new(vec![parse_pattern(STEP_A, &colors), parse_pattern(STEP_B, &colors)])
            .with_colors((120, 200, 255), None);
        player.frame_duration = 0.15;
        player.move_to(5, PLAYER_ROW);
        // Vitesse nulle : la position visuelle se cale sur la case de départ.
        let (cell_w, cell_h) = stage.cell_size();
        player.update(0.0, cell_w, cell_h);
        player.set_move_speed(WALK_SPEED);
        let player = stage.add_sprite(player);

        Ok(Self { player, stars })
    }

    fn player_x(&self, engine: &Engine) -> Option<i32> {
        match engine.get_window(STAGE).ok()?.sprite(self.player)? {
            SpriteEntry::Sprite(sprite) => Some(sprite.x),
            SpriteEntry::Effect(_) => None,
        }
    }
}

impl Game for Walker {
    fn update(&mut self, engine: &mut Engine, dt: f32) {
        let Ok(stage) = engine.get_window_mut(STAGE) else {
            return;
        };
        stage.update_sprites(dt);
        let cell_width = stage.cell_size().0.max(1) as f32;
        let Some(visual_x) = stage.sprite_mut(self.player).map(|s| s.visual_position().0) else {
            return;
        };
        // Les collines avancent deux fois moins vite que le personnage.
        if let Ok(hills) = engine.get_window_mut(HILLS) {
            hills.x = -((visual_x / cell_width / 2.0) as i32);
        }
    }

    fn render(&mut self, engine: &mut Engine) {
        if let Ok(root) = engine.root_mut() {
            for &(x, y, color) in &self.stars {
                root.put(x, y, '.', color, None);
            }
            root.put_string(1, 0, "Left/Right: walk  Q: quit", (80, 80, 80), None);
        }

        if let Ok(hills) = engine.get_window_mut(HILLS) {
            for col in 0..HILLS_WIDTH as i32 {
                let ridge = 3.0 + 2.0 * (col as f32 * 0.35).sin() + (col as f32 * 0.13).cos();
                let top = HILLS_HEIGHT as i32 - ridge.round().max(1.0) as i32;
                hills.put(col, top, LOWER_HALF, (30, 90, 50), None);
                for row in top + 1..HILLS_HEIGHT as i32 {
                    hills.put(col, row, FULL, (30, 90, 50), None);
                }
            }
        }

        if let Ok(stage) = engine.get_window_mut(STAGE) {
            let width = stage.width() as i32;
            for col in 0..width {
                stage.put(col, GROUND_ROW, UPPER_HALF, (120, 80, 40), None);
            }
            stage.draw_sprites();
        }
    }

    fn on_key(&mut self, engine: &mut Engine, key: Key) {
        let step = match key {
            Key::Left => -1,
            Key::Right => 1,
            Key::Char('q' | 'Q') => {
                engine.quit();
                return;
            }
            _ => return,
        };
        let Some(x) = self.player_x(engine) else {
            return;
        };
        if let Ok(stage) = engine.get_window_mut(STAGE)
            && let Some(player) = stage.sprite_mut(self.player)
        {
            player.move_to((x + step).clamp(0, MAX_X), PLAYER_ROW);
        }
    }
}

#[cfg(test)]
mod tests {
    use ug_core::config::EngineConfig;

    use super::*;
    use crate::demos::Demo;

    fn setup() -> (Engine, Walker) {
        let mut config = EngineConfig::default();
        Demo::Walker.configure(&mut config);
        let mut engine = Engine::init(config).unwrap();
        let walker = Walker::new(&mut engine, 42).unwrap();
        (engine, walker)
    }

    #[test]
    fn arrows_move_the_player() {
        let (mut engine, mut walker) = setup();
        walker.on_key(&mut engine, Key::Right);
        walker.on_key(&mut engine, Key::Right);
        walker.on_key(&mut engine, Key::Left);
        assert_eq!(walker.player_x(&engine), Some(6));
    }

    #[test]
    fn player_stays_on_screen() {
        let (mut engine, mut walker) = setup();
        for _ in 0..20 {
            walker.on_key(&mut engine, Key::Left);
        }
        assert_eq!(walker.player_x(&engine), Some(0));
    }

    #[test]
    fn hills_scroll_at_half_speed() {
        let (mut engine, mut walker) = setup();
        for _ in 0..35 {
            walker.on_key(&mut engine, Key::Right);
        }
        // 40 cellules, bien plus que le trajet restant à 12 cellules/s.
        for _ in 0..10 {
            walker.update(&mut engine, 1.0);
        }
        assert_eq!(walker.player_x(&engine), Some(40));
        assert_eq!(engine.get_window(HILLS).unwrap().x, -20);
    }

    #[test]
    fn stars_are_seeded() {
        let (_, a) = setup();
        let (_, b) = setup();
        assert_eq!(a.stars, b.stars);
        assert_eq!(a.stars.len(), STAR_COUNT);
    }
}
