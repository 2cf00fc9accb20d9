use anyhow::Result;

use crate::grid::CellGrid;
use crate::input::InputEvent;
use crate::surface::Surface;

/// Image composée d'une frame, telle que remise au backend.
///
/// `pixels` est la surface de rendu à la résolution native ; les backends
/// qui affichent en plein écran la mettent à l'échelle eux-mêmes
/// (`Surface::letterbox`). `cells` est la même frame au niveau caractère.
pub struct Frame<'a> {
    /// Composited pixels, native resolution.
    pub pixels: &'a Surface,
    /// Composited characters, one per root cell.
    pub cells: &'a CellGrid,
    /// Plein écran demandé (Alt+Entrée).
    pub fullscreen: bool,
    /// Titre de la fenêtre de jeu.
    pub title: &'a str,
}

/// Affichage + entrées. Implémenté par : `TerminalBackend`, `HeadlessBackend`.
///
/// # Example
/// ```
/// use ug_core::traits::{Backend, Frame};
/// use ug_core::input::InputEvent;
///
/// struct Null;
/// impl Backend for Null {
///     fn poll_events(&mut self) -> anyhow::Result<Vec<InputEvent>> { Ok(vec![InputEvent::Quit]) }
///     fn present(&mut self, _frame: &Frame<'_>) -> anyhow::Result<()> { Ok(()) }
///     fn set_fullscreen(&mut self, _fullscreen: bool) -> anyhow::Result<()> { Ok(()) }
///     fn display_size(&self) -> (u32, u32) { (0, 0) }
/// }
/// ```
pub trait Backend {
    /// Événements en attente. Ne bloque JAMAIS.
    ///
    /// # Errors
    /// Returns an error if the underlying input source fails.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    /// Affiche une frame composée.
    ///
    /// # Errors
    /// Returns an error if the display cannot be written.
    fn present(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Bascule plein écran / fenêtré.
    ///
    /// # Errors
    /// Returns an error if the display mode cannot be changed.
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()>;

    /// Taille de l'affichage dans l'unité du backend (pixels ou cellules).
    fn display_size(&self) -> (u32, u32);
}
