use ug_core::color::Rgb;
use ug_core::input::Key;
use ug_engine::{Engine, Game, Window};

const FULL: char = '█';
const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';
const LABEL: Rgb = (150, 150, 150);
const DIM: Rgb = (80, 80, 80);

/// Biseau n° `index` (0..44) : 0..22 remplis sous la diagonale, 22..44 leurs inverses.
fn wedge(index: u32) -> char {
    char::from_u32(0x1FB3C + index).unwrap_or('?')
}

/// Galerie des 44 biseaux et formes lisses construites avec eux. Q quitte.
pub struct Wedges;

impl Wedges {
    fn gallery(root: &mut Window) {
        root.put_string(
            2,
            1,
            "Legacy Computing Wedge Characters (U+1FB3C-U+1FB67)",
            (200, 200, 255),
            None,
        );

        root.put_string(2, 3, "Base wedges (22):", LABEL, None);
        for i in 0..22 {
            let x = 2 + (i % 11) * 3;
            let y = 4 + (i / 11) * 2;
            root.put(x, y, wedge(i as u32), (255, 255, 255), None);
            root.put_string(x, y + 1, &format!("{i:02}"), DIM, None);
        }

        root.put_string(2, 8, "Inverted wedges (22):", LABEL, None);
        for i in 0..22 {
            let x = 2 + (i % 11) * 3;
            let y = 9 + (i / 11) * 2;
            root.put(x, y, wedge(22 + i as u32), (255, 255, 255), None);
        }
    }

    fn rounded_rect(root: &mut Window) {
        root.put_string(2, 14, "Rounded rectangle example:", LABEL, None);
        let (rx, ry) = (4, 16);
        let color = (100, 200, 100);
        for y in ry..ry + 4 {
            for x in rx..=rx + 8 {
                root.put(x, y, FULL, color, None);
            }
        }
        // Coins : grands remplissages avec l'angle découpé.
        root.put(rx, ry, wedge(5), color, None);
        root.put(rx + 8, ry, wedge(16), color, None);
        root.put(rx, ry + 3, wedge(22), color, None);
        root.put(rx + 8, ry + 3, wedge(33), color, None);
    }

    fn diagonal(root: &mut Window) {
        root.put_string(30, 14, "Diagonal line:", LABEL, None);
        let (dx, dy) = (32, 16);
        let color = (200, 150, 100);
        for i in 0..6 {
            let x = dx + i / 2 + i % 2;
            let (left, right) = if i % 2 == 0 { (42, 20) } else { (26, 4) };
            root.put(x, dy + i, wedge(left), color, None);
            root.put(x + 1, dy + i, wedge(right), color, None);
        }
    }

    fn pairs(root: &mut Window) {
        root.put_string(2, 22, "Wedge pairs (base + inverted = full block):", LABEL, None);
        let color = (255, 200, 100);
        for (idx, (a, b)) in [(0, 22), (1, 23), (5, 27), (11, 33), (16, 38)].into_iter().enumerate() {
            let x = 4 + idx as i32 * 8;
            root.put(x, 24, wedge(a), color, None);
            root.put(x + 1, 24, '+', (100, 100, 100), None);
            root.put(x + 2, 24, wedge(b), color, None);
            root.put(x + 3, 24, '=', (100, 100, 100), None);
            root.put(x + 4, 24, FULL, color, None);
        }
    }

    fn circle(root: &mut Window) {
        root.put_string(2, 26, "Circle:", LABEL, None);
        let (cx, cy) = (4, 28);
        let color = (200, 100, 200);
        // Bords haut et bas : 0 → 2/3 → 1 → 2/3 → 0.
        let top = [wedge(14), wedge(6), FULL, wedge(17), wedge(3)];
        let bottom = [wedge(41), wedge(23), FULL, wedge(34), wedge(30)];
        for (col, (t, b)) in top.into_iter().zip(bottom).enumerate() {
            root.put(cx + col as i32, cy, t, color, None);
            root.put(cx + col as i32, cy + 3, b, color, None);
        }
        for row in 1..3 {
            for col in 0..5 {
                root.put(cx + col, cy + row, FULL, color, None);
            }
        }
        root.put(cx - 1, cy + 1, wedge(15), color, None);
        root.put(cx - 1, cy + 2, wedge(42), color, None);
        root.put(cx + 5, cy + 1, wedge(4), color, None);
        root.put(cx + 5, cy + 2, wedge(31), color, None);
    }

    fn triangle(root: &mut Window) {
        root.put_string(12, 26, "Triangle:", LABEL, None);
        let (tx, ty) = (14, 28);
        let color = (100, 200, 200);
        // Paires (15, 4) en haut des flancs, (9, 20) en bas.
        for (row, half_width) in [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)] {
            let (left, right) = if row % 2 == 0 { (15, 4) } else { (9, 20) };
            let start = tx + 2 - half_width;
            let end = tx + 3 + half_width;
            root.put(start, ty + row, wedge(left), color, None);
            for x in start + 1..end {
                root.put(x, ty + row, FULL, color, None);
            }
            root.put(end, ty + row, wedge(right), color, None);
        }
    }

    fn arrow(root: &mut Window) {
        root.put_string(24, 26, "Arrow:", LABEL, None);
        let (ax, ay) = (26, 28);
        let color = (255, 200, 100);
        let top: String = [LOWER_HALF, LOWER_HALF, wedge(19), wedge(0)].into_iter().collect();
        let bottom: String = [UPPER_HALF, UPPER_HALF, wedge(36), wedge(27)].into_iter().collect();
        root.put_string(ax, ay, &top, color, None);
        root.put_string(ax, ay + 1, &bottom, color, None);
    }

    fn speech_bubble(root: &mut Window) {
        root.put_string(36, 26, "Speech bubble:", LABEL, None);
        let (sx, sy) = (38, 28);
        let color = (200, 200, 200);
        for i in 1..8 {
            root.put(sx + i, sy, FULL, color, None);
            root.put(sx + i, sy + 2, FULL, color, None);
        }
        root.put(sx, sy, wedge(5), color, None);
        root.put(sx + 8, sy, wedge(16), color, None);
        root.put(sx, sy + 1, FULL, color, None);
        root.put_string(sx + 2, sy + 1, "Hello!", color, None);
        root.put(sx + 8, sy + 1, FULL, color, None);
        root.put(sx, sy + 2, wedge(22), color, None);
        root.put(sx + 8, sy + 2, wedge(33), color, None);
        // Queue
        root.put(sx + 1, sy + 3, wedge(29), color, None);
    }
}

impl Game for Wedges {
    fn render(&mut self, engine: &mut Engine) {
        let Ok(root) = engine.root_mut() else {
            return;
        };
        Self::gallery(root);
        Self::rounded_rect(root);
        Self::diagonal(root);
        Self::pairs(root);
        Self::circle(root);
        Self::triangle(root);
        Self::arrow(root);
        Self::speech_bubble(root);
        root.put_string(2, 38, "Press Q to quit", DIM, None);
    }

    fn on_key(&mut self, engine: &mut Engine, key: Key) {
        if matches!(key, Key::Char('q' | 'Q')) {
            engine.quit();
        }
    }
}

#[cfg(test)]
mod tests {
    use ug_core::config::EngineConfig;

    use super::*;
    use crate::demos::Demo;

    fn rendered() -> Engine {
        let mut config = EngineConfig::default();
        Demo::Wedges.configure(&mut config);
        let mut engine = Engine::init(config).unwrap();
        Wedges.render(&mut engine);
        engine
    }

    fn ch(engine: &Engine, x: u32, y: u32) -> Option<char> {
        engine.root().unwrap().cells().get(x, y).map(|c| c.ch)
    }

    #[test]
    fn wedge_indices() {
        assert_eq!(wedge(0), '\u{1FB3C}');
        assert_eq!(wedge(43), '\u{1FB67}');
    }

    #[test]
    fn gallery_lists_all_wedges() {
        let engine = rendered();
        assert_eq!(ch(&engine, 2, 4), Some(wedge(0)));
        assert_eq!(ch(&engine, 2 + 10 * 3, 6), Some(wedge(21)));
        assert_eq!(ch(&engine, 2, 9), Some(wedge(22)));
        assert_eq!(ch(&engine, 2 + 10 * 3, 11), Some(wedge(43)));
        assert_eq!(ch(&engine, 5, 5), Some('0'));
    }

    #[test]
    fn shapes_use_rounded_corners() {
        let engine = rendered();
        assert_eq!(ch(&engine, 4, 16), Some(wedge(5)));
        assert_eq!(ch(&engine, 12, 19), Some(wedge(33)));
        assert_eq!(ch(&engine, 8, 17), Some(FULL));
        // Triangle : base sur 6 cellules.
        assert_eq!(ch(&engine, 14, 32), Some(wedge(15)));
        assert_eq!(ch(&engine, 19, 32), Some(wedge(4)));
        assert_eq!(ch(&engine, 16, 28), Some(wedge(15)));
        assert_eq!(ch(&engine, 17, 29), Some(wedge(20)));
        assert_eq!(ch(&engine, 28, 29), Some(wedge(36)));
    }
}
