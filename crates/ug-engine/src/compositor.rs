//! Composition des fenêtres sur la surface de rendu et la grille racine.

use ug_core::color::{Rgb, lerp_rgb};
use ug_core::grid::{Cell, CellGrid};
use ug_core::surface::Surface;

use crate::window::Window;

const BLACK: Rgb = (0, 0, 0);

/// Indices des fenêtres visibles, `z_index` croissant, ordre de création
/// conservé à égalité.
#[must_use]
pub fn draw_order(windows: &[Window]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..windows.len())
        .filter(|&i| windows[i].visible)
        .collect();
    order.sort_by_key(|&i| windows[i].z_index);
    order
}

/// Compose toutes les fenêtres visibles.
///
/// `surface` est remplie de noir opaque puis chaque fenêtre y est collée
/// en (`x * root_cw`, `y * root_ch`) avec son alpha. `cells` reçoit la
/// même composition au niveau caractère.
pub fn composite(
    windows: &[Window],
    (root_cw, root_ch): (u32, u32),
    surface: &mut Surface,
    cells: &mut CellGrid,
) {
    surface.fill((0, 0, 0, 255));
    cells.clear_to(Some(BLACK));

    for index in draw_order(windows) {
        let window = &windows[index];
        if window.alpha == 0 {
            continue;
        }
        let px = window.x.saturating_mul(root_cw as i32);
        let py = window.y.saturating_mul(root_ch as i32);
        surface.blit(window.surface(), px, py, window.alpha);
        composite_cells(window, (root_cw, root_ch), cells);
    }
}

/// Chaque cellule racine dont le centre tombe dans la fenêtre prend la
/// cellule de fenêtre sous ce centre.
fn composite_cells(window: &Window, (root_cw, root_ch): (u32, u32), cells: &mut CellGrid) {
    let (cell_w, cell_h) = window.cell_size();
    let (pixel_w, pixel_h) = window.pixel_size();
    let (root_cw, root_ch) = (root_cw.max(1), root_ch.max(1));

    let mut j = 0u32;
    while j * root_ch + root_ch / 2 < pixel_h {
        let center_y = j * root_ch + root_ch / 2;
        let ry = i64::from(window.y) + i64::from(j);
        j += 1;
        if ry < 0 || ry >= i64::from(cells.height) {
            continue;
        }
        let mut i = 0u32;
        while i * root_cw + root_cw / 2 < pixel_w {
            let center_x = i * root_cw + root_cw / 2;
            let rx = i64::from(window.x) + i64::from(i);
            i += 1;
            if rx < 0 || rx >= i64::from(cells.width) {
                continue;
            }
            let Some(src) = window.cells().get(center_x / cell_w, center_y / cell_h) else {
                continue;
            };
            if let Some(dst) = cells.get_mut(rx as u32, ry as u32) {
                merge_cell(dst, src, window.alpha);
            }
        }
    }
}

/// Cellule de fenêtre par-dessus une cellule racine.
///
/// Un caractère sans fond garde le fond du dessous ; un espace avec fond
/// efface le caractère du dessous.
fn merge_cell(dst: &mut Cell, src: &Cell, alpha: u8) {
    if let Some(bg) = src.bg {
        dst.bg = Some(lerp_rgb(dst.bg.unwrap_or(BLACK), bg, alpha));
        if src.ch == ' ' {
            dst.ch = ' ';
        }
    }
    if src.ch != ' ' {
        dst.ch = src.ch;
        dst.fg = lerp_rgb(dst.bg.unwrap_or(BLACK), src.fg, alpha);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ug_font::Font;

    use super::*;
    use crate::window::WindowOptions;

    fn window(name: &str, pos: (i32, i32), size: (u32, u32), options: &WindowOptions, cell: (u32, u32)) -> Window {
        let font = Arc::new(Font::builtin(name, cell.0, cell.1));
        Window::new(name, pos, size, font, options).unwrap()
    }

    #[test]
    fn stable_z_order_skips_hidden() {
        let opts = |z| WindowOptions { z_index: z, ..Default::default() };
        let mut windows = vec![
            window("a", (0, 0), (1, 1), &opts(5), (2, 2)),
            window("b", (0, 0), (1, 1), &opts(0), (2, 2)),
            window("c", (0, 0), (1, 1), &opts(5), (2, 2)),
            window("d", (0, 0), (1, 1), &opts(-1), (2, 2)),
        ];
        windows[1].visible = false;
        assert_eq!(draw_order(&windows), vec![3, 0, 2]);
    }

    #[test]
    fn higher_z_wins_and_alpha_blends() {
        let red = WindowOptions { bg: Some((255, 0, 0, 255)), ..Default::default() };
        let blue = WindowOptions { z_index: 1, alpha: 128, bg: Some((0, 0, 255, 255)), ..Default::default() };
        let windows = vec![
            window("top", (1, 0), (1, 1), &blue, (2, 2)),
            window("bottom", (0, 0), (2, 1), &red, (2, 2)),
        ];
        let mut surface = Surface::new(4, 2);
        let mut cells = CellGrid::new(2, 1);
        composite(&windows, (2, 2), &mut surface, &mut cells);
        assert_eq!(surface.pixel(0, 0), (255, 0, 0, 255));
        assert_eq!(surface.pixel(2, 0), (127, 0, 128, 255));
        assert_eq!(cells.get(0, 0).and_then(|c| c.bg), Some((255, 0, 0)));
        assert_eq!(cells.get(1, 0).and_then(|c| c.bg), Some((127, 0, 128)));
    }

    #[test]
    fn negative_position_is_clipped() {
        let mut w = window("w", (-1, 0), (2, 1), &WindowOptions::default(), (2, 2));
        w.put(0, 0, 'a', (255, 255, 255), None);
        w.put(1, 0, 'b', (255, 255, 255), None);
        let mut surface = Surface::new(4, 2);
        let mut cells = CellGrid::new(2, 1);
        composite(&[w], (2, 2), &mut surface, &mut cells);
        assert_eq!(cells.to_text(), "b");
    }

    #[test]
    fn small_font_window_samples_cell_centres() {
        // Cellules de fenêtre 1x1 sous des cellules racine 2x2.
        let mut w = window("small", (0, 0), (4, 2), &WindowOptions::default(), (1, 1));
        w.put(1, 1, 'x', (255, 255, 255), None);
        w.put(3, 1, 'y', (255, 255, 255), None);
        let mut surface = Surface::new(4, 2);
        let mut cells = CellGrid::new(2, 1);
        composite(&[w], (2, 2), &mut surface, &mut cells);
        assert_eq!(cells.to_text(), "xy");
    }

    #[test]
    fn char_keeps_underlying_background() {
        let mut dst = Cell { ch: '#', fg: (1, 1, 1), bg: Some((9, 9, 9)) };
        merge_cell(&mut dst, &Cell { ch: '@', fg: (255, 255, 255), bg: None }, 255);
        assert_eq!(dst, Cell { ch: '@', fg: (255, 255, 255), bg: Some((9, 9, 9)) });
        merge_cell(&mut dst, &Cell { ch: ' ', fg: (0, 0, 0), bg: Some((50, 50, 50)) }, 255);
        assert_eq!(dst.ch, ' ');
        assert_eq!(dst.bg, Some((50, 50, 50)));
        // Cellule vide : rien ne change.
        let before = dst;
        merge_cell(&mut dst, &Cell::default(), 255);
        assert_eq!(dst, before);
    }
}
