use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ug_core::color::Rgb;
use ug_core::grid::CellGrid;
use ug_core::surface::{Surface, fit_rect};

#[inline]
fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Écrit la grille de cellules composée dans le buffer, une cellule
/// terminal par cellule racine, centrée dans `area` et coupée si trop grande.
///
/// # Example
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ug_core::grid::{Cell, CellGrid};
/// use ug_term::canvas::render_cells;
///
/// let mut grid = CellGrid::new(2, 1);
/// grid.set(1, 0, Cell { ch: '@', ..Cell::default() });
/// let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
/// render_cells(&mut buf, Rect::new(0, 0, 2, 1), &grid);
/// assert_eq!(buf[(1, 0)].symbol(), "@");
/// ```
pub fn render_cells(buf: &mut Buffer, area: Rect, grid: &CellGrid) {
    let grid_w = u16::try_from(grid.width).unwrap_or(u16::MAX);
    let grid_h = u16::try_from(grid.height).unwrap_or(u16::MAX);
    let off_x = area.width.saturating_sub(grid_w) / 2;
    let off_y = area.height.saturating_sub(grid_h) / 2;

    for cy in 0..grid_h.min(area.height) {
        for cx in 0..grid_w.min(area.width) {
            let Some(cell) = grid.get(u32::from(cx), u32::from(cy)) else {
                continue;
            };
            if let Some(buf_cell) = buf.cell_mut((area.x + off_x + cx, area.y + off_y + cy)) {
                buf_cell
                    .set_char(cell.ch)
                    .set_fg(rgb(cell.fg))
                    .set_bg(cell.bg.map_or(Color::Reset, rgb));
            }
        }
    }
}

/// Affiche la surface de pixels en demi-blocs : deux pixels verticaux par
/// cellule (`▄`, fg = pixel du bas, bg = pixel du haut), ratio conservé.
///
/// # Example
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use ratatui::style::Color;
/// use ug_core::surface::Surface;
/// use ug_term::canvas::render_pixels;
///
/// let mut surface = Surface::filled(1, 2, (0, 0, 255, 255));
/// surface.set_pixel(0, 1, (255, 0, 0, 255));
/// let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
/// render_pixels(&mut buf, Rect::new(0, 0, 1, 1), &surface);
/// assert_eq!(buf[(0, 0)].symbol(), "▄");
/// assert_eq!(buf[(0, 0)].fg, Color::Rgb(255, 0, 0));
/// assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 255));
/// ```
pub fn render_pixels(buf: &mut Buffer, area: Rect, surface: &Surface) {
    let target_w = u32::from(area.width);
    let target_h = u32::from(area.height) * 2;
    let (ox, oy, w, h) = fit_rect(surface.width, surface.height, target_w, target_h);
    if w == 0 || h == 0 {
        return;
    }
    let scaled = surface.scale_nearest(w, h);
    let sample = |x: u32, y: u32| -> Rgb {
        if x < ox || y < oy || x >= ox + w || y >= oy + h {
            return (0, 0, 0);
        }
        let (r, g, b, _) = scaled.pixel(x - ox, y - oy);
        (r, g, b)
    };

    for cy in 0..area.height {
        for cx in 0..area.width {
            let x = u32::from(cx);
            let top = sample(x, u32::from(cy) * 2);
            let bottom = sample(x, u32::from(cy) * 2 + 1);
            if let Some(buf_cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                buf_cell.set_char('▄').set_fg(rgb(bottom)).set_bg(rgb(top));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ug_core::grid::Cell;

    #[test]
    fn small_grid_is_centred() {
        let mut grid = CellGrid::new(2, 1);
        grid.set(0, 0, Cell { ch: 'a', fg: (1, 2, 3), bg: Some((4, 5, 6)) });
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        render_cells(&mut buf, area, &grid);
        assert_eq!(buf[(2, 1)].symbol(), "a");
        assert_eq!(buf[(2, 1)].fg, Color::Rgb(1, 2, 3));
        assert_eq!(buf[(2, 1)].bg, Color::Rgb(4, 5, 6));
        assert_eq!(buf[(3, 1)].bg, Color::Reset);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn large_grid_is_clipped() {
        let mut grid = CellGrid::new(10, 10);
        grid.set(9, 9, Cell { ch: 'z', ..Cell::default() });
        grid.set(1, 1, Cell { ch: 'k', ..Cell::default() });
        let area = Rect::new(1, 1, 3, 3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
        render_cells(&mut buf, area, &grid);
        assert_eq!(buf[(2, 2)].symbol(), "k");
        assert!(buf.content.iter().all(|c| c.symbol() != "z"));
    }

    #[test]
    fn pixels_are_letterboxed() {
        // Surface 4x2 dans 4 colonnes × 4 lignes (8 px de haut) : 4x2 centré.
        let surface = Surface::filled(4, 2, (255, 255, 255, 255));
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        render_pixels(&mut buf, area, &surface);
        // oy = 3 : pixels blancs sur les lignes 3 et 4.
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0, 1)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0, 1)].fg, Color::Rgb(255, 255, 255));
        assert_eq!(buf[(3, 2)].bg, Color::Rgb(255, 255, 255));
        assert_eq!(buf[(3, 2)].fg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(3, 3)].symbol(), "▄");
    }
}
