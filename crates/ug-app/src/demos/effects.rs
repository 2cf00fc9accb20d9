use ug_core::color::Rgb;
use ug_core::input::Key;
use ug_engine::{EffectParams, Engine, Game, Window, create_effect};

const SPARK_CHARS: [char; 5] = ['*', '+', '.', '·', '°'];
const SPARK_COLORS: [Rgb; 4] = [
    (255, 200, 50),
    (255, 150, 30),
    (255, 100, 20),
    (255, 255, 100),
];
const BURST: usize = 10;
const HINT: Rgb = (80, 80, 80);

/// Gerbes d'étincelles : Espace en lance une, les flèches déplacent le point
/// d'émission, Q quitte.
pub struct Effects {
    spawn: (i32, i32),
    rng: fastrand::Rng,
}

impl Effects {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            spawn: (30, 15),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.rng.f32() * (hi - lo)
    }

    fn burst(&mut self, root: &mut Window) {
        let (x, y) = self.spawn;
        for _ in 0..BURST {
            let ch = SPARK_CHARS[self.rng.usize(..SPARK_CHARS.len())];
            let fg = SPARK_COLORS[self.rng.usize(..SPARK_COLORS.len())];
            let params = EffectParams {
                vx: self.uniform(-8.0, 8.0),
                // Surtout vers le haut.
                vy: self.uniform(-12.0, -4.0),
                fg,
                drag: self.uniform(0.2, 0.5),
                fade_time: self.uniform(0.5, 1.5),
                ..EffectParams::default()
            };
            root.add_sprite(create_effect(&ch.to_string(), x as f32, y as f32, params));
        }
        log::debug!("Gerbe en ({x}, {y}), {} particules", root.sprite_count());
    }
}

impl Game for Effects {
    fn update(&mut self, engine: &mut Engine, dt: f32) {
        if let Ok(root) = engine.root_mut() {
            root.update_sprites(dt);
        }
    }

    fn render(&mut self, engine: &mut Engine) {
        let Ok(root) = engine.root_mut() else {
            return;
        };
        root.put(self.spawn.0, self.spawn.1, '+', (100, 100, 100), None);
        root.put_string(
            1,
            1,
            "Space: spawn particles  Arrows: move spawn point  Q: quit",
            HINT,
            None,
        );
        let count = format!("Particles: {}", root.sprite_count());
        root.put_string(1, 28, &count, HINT, None);
        root.draw_sprites();
    }

    fn on_key(&mut self, engine: &mut Engine, key: Key) {
        let (x, y) = self.spawn;
        match key {
            Key::Char(' ') => {
                if let Ok(root) = engine.root_mut() {
                    self.burst(root);
                }
            }
            Key::Left => self.spawn.0 = (x - 1).max(5),
            Key::Right => self.spawn.0 = (x + 1).min(55),
            Key::Up => self.spawn.1 = (y - 1).max(5),
            Key::Down => self.spawn.1 = (y + 1).min(25),
            Key::Char('q' | 'Q') => engine.quit(),
            _ => {}
        }
    }
}
