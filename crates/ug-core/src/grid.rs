use crate::color::Rgb;

/// Cellule de la grille de caractères.
///
/// # Example
/// ```
/// use ug_core::grid::Cell;
/// let cell = Cell::default();
/// assert_eq!(cell.ch, ' ');
/// assert!(cell.bg.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground (RGB).
    pub fg: Rgb,
    /// Couleur background. `None` = transparent.
    pub bg: Option<Rgb>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: (255, 255, 255),
            bg: None,
        }
    }
}

impl Cell {
    /// `true` si la cellule ne contribue rien à la composition.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' && self.bg.is_none()
    }
}

/// Grille de caractères, ombre textuelle d'une surface de pixels.
///
/// Utilisée par la présentation terminal en mode cellules.
///
/// # Example
/// ```
/// use ug_core::grid::{Cell, CellGrid};
/// let mut grid = CellGrid::new(80, 24);
/// grid.set(0, 0, Cell { ch: '@', fg: (255, 0, 0), bg: None });
/// assert_eq!(grid.get(0, 0).map(|c| c.ch), Some('@'));
/// assert!(grid.get(80, 0).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<Cell>,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl CellGrid {
    /// Crée une grille vide.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![Cell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    /// Set a cell at position (x, y). Out of bounds is ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = cell;
        }
    }

    /// Get a cell at position (x, y).
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Mutable access to the cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            Some(&mut self.cells[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Réinitialise toutes les cellules (espace, fond `bg`).
    pub fn clear_to(&mut self, bg: Option<Rgb>) {
        for cell in &mut self.cells {
            *cell = Cell {
                bg,
                ..Cell::default()
            };
        }
    }

    /// Texte brut de la grille : une ligne par rangée, espaces de fin retirés.
    ///
    /// # Example
    /// ```
    /// use ug_core::grid::{Cell, CellGrid};
    /// let mut grid = CellGrid::new(4, 2);
    /// grid.set(1, 1, Cell { ch: 'x', ..Cell::default() });
    /// assert_eq!(grid.to_text(), "\n x");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for (i, row) in self.cells.chunks(self.width.max(1) as usize).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let line: String = row.iter().map(|c| c.ch).collect();
            out.push_str(line.trim_end_matches(' '));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_to_sets_background() {
        let mut grid = CellGrid::new(3, 3);
        grid.set(1, 1, Cell { ch: '#', fg: (1, 1, 1), bg: None });
        grid.clear_to(Some((20, 20, 30)));
        assert!(grid.cells.iter().all(|c| c.ch == ' ' && c.bg == Some((20, 20, 30))));
    }

    #[test]
    fn blank_detection() {
        assert!(Cell::default().is_blank());
        assert!(!Cell { bg: Some((0, 0, 0)), ..Cell::default() }.is_blank());
        assert!(!Cell { ch: '.', ..Cell::default() }.is_blank());
    }
}
