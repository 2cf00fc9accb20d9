use std::collections::BTreeMap;

use anyhow::Result;
use ug_core::grid::CellGrid;
use ug_core::input::InputEvent;
use ug_core::surface::Surface;
use ug_core::traits::{Backend, Frame};

/// Backend sans affichage : événements scriptés, dernière frame conservée.
///
/// Sert aux tests, aux captures PNG et à la CI.
///
/// # Example
/// ```
/// use ug_core::input::{InputEvent, Key};
/// use ug_core::traits::Backend;
/// use ug_engine::HeadlessBackend;
///
/// let mut backend = HeadlessBackend::new(800, 500)
///     .with_events(0, vec![InputEvent::key(Key::Char(' '))])
///     .with_frame_limit(2);
/// assert_eq!(backend.poll_events().unwrap(), vec![InputEvent::key(Key::Char(' '))]);
/// assert_eq!(backend.poll_events().unwrap(), vec![InputEvent::Quit]);
/// ```
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    script: BTreeMap<u64, Vec<InputEvent>>,
    frame_limit: Option<u64>,
    polled: u64,
    presented: u64,
    display: (u32, u32),
    fullscreen: bool,
    last_pixels: Option<Surface>,
    last_cells: Option<CellGrid>,
}

impl HeadlessBackend {
    /// Affichage virtuel de `width × height` pixels (utilisé en plein écran).
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            display: (width, height),
            ..Self::default()
        }
    }

    /// Ajoute des événements livrés à la frame `frame` (0 = première).
    #[must_use]
    pub fn with_events(mut self, frame: u64, events: Vec<InputEvent>) -> Self {
        self.script.entry(frame).or_default().extend(events);
        self
    }

    /// Émet `Quit` lors de la frame `frames - 1` : au plus `frames` frames
    /// présentées (au moins une).
    #[must_use]
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Nombre de frames reçues par `present`.
    #[must_use]
    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    /// Pixels de la dernière frame (letterboxés en plein écran).
    #[must_use]
    pub fn last_pixels(&self) -> Option<&Surface> {
        self.last_pixels.as_ref()
    }

    /// Cellules de la dernière frame.
    #[must_use]
    pub fn last_cells(&self) -> Option<&CellGrid> {
        self.last_cells.as_ref()
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl Backend for HeadlessBackend {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let frame = self.polled;
        self.polled += 1;
        let mut events = self.script.remove(&frame).unwrap_or_default();
        if self.frame_limit.is_some_and(|limit| frame + 1 >= limit) {
            events.push(InputEvent::Quit);
        }
        Ok(events)
    }

    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let pixels = if frame.fullscreen {
            frame.pixels.letterbox(self.display.0, self.display.1)
        } else {
            frame.pixels.clone()
        };
        self.last_pixels = Some(pixels);
        self.last_cells = Some(frame.cells.clone());
        self.presented += 1;
        log::trace!("Frame {} présentée ({})", self.presented, frame.title);
        Ok(())
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()> {
        self.fullscreen = fullscreen;
        Ok(())
    }

    fn display_size(&self) -> (u32, u32) {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_frames_are_delivered_once() {
        let mut backend = HeadlessBackend::new(1, 1)
            .with_events(1, vec![InputEvent::Resize(3, 4)])
            .with_events(1, vec![InputEvent::Quit]);
        assert!(backend.poll_events().unwrap().is_empty());
        assert_eq!(
            backend.poll_events().unwrap(),
            vec![InputEvent::Resize(3, 4), InputEvent::Quit]
        );
        assert!(backend.poll_events().unwrap().is_empty());
    }

    #[test]
    fn zero_limit_quits_on_first_poll() {
        let mut backend = HeadlessBackend::new(1, 1).with_frame_limit(0);
        assert_eq!(backend.poll_events().unwrap(), vec![InputEvent::Quit]);
    }

    #[test]
    fn present_letterboxes_in_fullscreen() {
        let pixels = Surface::filled(2, 1, (255, 255, 255, 255));
        let cells = CellGrid::new(2, 1);
        let mut backend = HeadlessBackend::new(4, 4);
        backend.set_fullscreen(true).unwrap();
        backend
            .present(&Frame { pixels: &pixels, cells: &cells, fullscreen: true, title: "t" })
            .unwrap();
        let shown = backend.last_pixels().unwrap();
        assert_eq!((shown.width, shown.height), (4, 4));
        assert_eq!(shown.pixel(0, 0), (0, 0, 0, 255));
        assert_eq!(shown.pixel(0, 1), (255, 255, 255, 255));
        assert_eq!(backend.display_size(), (4, 4));
    }
}
