use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ug_core::config::PresentMode;
use ug_core::traits::Frame as GameFrame;

use crate::canvas;

/// Ce que le terminal doit afficher pour une frame.
pub struct View<'a> {
    pub frame: &'a GameFrame<'a>,
    pub mode: PresentMode,
    /// Ligne de statut sous le cadre (mode fenêtré uniquement).
    pub show_status: bool,
    pub fps: f64,
}

/// Dessine une frame : cadre titré + statut en fenêtré, plein cadre en
/// plein écran.
pub fn draw(frame: &mut Frame, view: &View<'_>) {
    let area = frame.area();
    if view.frame.fullscreen {
        draw_canvas(frame, area, view);
        return;
    }

    let status_height = u16::from(view.show_status);
    let [main, status] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(status_height)]).areas(area);

    let block = Block::bordered()
        .title(format!(" {} ", view.frame.title))
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(main);
    frame.render_widget(block, main);
    draw_canvas(frame, inner, view);

    if view.show_status {
        draw_status(frame, status, view);
    }
}

fn draw_canvas(frame: &mut Frame, area: Rect, view: &View<'_>) {
    match view.mode {
        PresentMode::Cells => canvas::render_cells(frame.buffer_mut(), area, view.frame.cells),
        PresentMode::Pixels => canvas::render_pixels(frame.buffer_mut(), area, view.frame.pixels),
    }
}

fn draw_status(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let mode = match view.mode {
        PresentMode::Cells => "cellules",
        PresentMode::Pixels => "pixels",
    };
    let line = Line::from(vec![
        Span::styled(format!(" {:.0} FPS ", view.fps), Style::default().fg(Color::Green)),
        Span::raw("│ "),
        Span::styled(mode, Style::default().fg(Color::Yellow)),
        Span::styled(
            " │ Alt+Entrée plein écran │ Échap quitter",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ug_core::grid::{Cell, CellGrid};
    use ug_core::surface::Surface;

    use super::*;

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn render(fullscreen: bool, show_status: bool) -> Terminal<TestBackend> {
        let pixels = Surface::new(1, 1);
        let mut cells = CellGrid::new(3, 1);
        cells.set(0, 0, Cell { ch: '@', ..Cell::default() });
        let game_frame = GameFrame { pixels: &pixels, cells: &cells, fullscreen, title: "Jeu" };
        let view = View { frame: &game_frame, mode: PresentMode::Cells, show_status, fps: 60.0 };
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal.draw(|f| draw(f, &view)).unwrap();
        terminal
    }

    #[test]
    fn windowed_has_title_and_status() {
        let terminal = render(false, true);
        assert!(row(&terminal, 0).contains(" Jeu "));
        assert!(row(&terminal, 5).contains("60 FPS"));
        assert!(row(&terminal, 5).contains("cellules"));
    }

    #[test]
    fn status_can_be_hidden() {
        let terminal = render(false, false);
        assert!(!row(&terminal, 5).contains("FPS"));
    }

    #[test]
    fn fullscreen_has_no_chrome() {
        let terminal = render(true, true);
        assert!((0..6).all(|y| !row(&terminal, y).contains("Jeu")));
        // Grille 3x1 centrée dans 30x6.
        assert_eq!(row(&terminal, 2).trim(), "@");
    }
}
