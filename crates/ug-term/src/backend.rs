use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use ug_core::config::EngineConfig;
use ug_core::input::{InputEvent, Key, Modifiers};
use ug_core::traits::{Backend, Frame};

use crate::fps::FpsCounter;
use crate::ui::{self, View};

/// Backend terminal : crossterm en entrée, ratatui en sortie.
///
/// Le terminal est initialisé (`ratatui::init`) et restauré
/// (`ratatui::restore`) par l'appelant. `present_mode` et `show_status`
/// sont relus dans la config partagée à chaque frame.
pub struct TerminalBackend {
    terminal: DefaultTerminal,
    config: Arc<ArcSwap<EngineConfig>>,
    fps: FpsCounter,
}

impl TerminalBackend {
    #[must_use]
    pub fn new(terminal: DefaultTerminal, config: Arc<ArcSwap<EngineConfig>>) -> Self {
        Self {
            terminal,
            config,
            fps: FpsCounter::new(60),
        }
    }
}

impl Backend for TerminalBackend {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO).context("Lecture des événements terminal")? {
            if let Some(event) = translate_event(&event::read()?) {
                events.push(event);
            }
        }
        Ok(events)
    }

    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let config = self.config.load();
        let view = View {
            frame,
            mode: config.present_mode,
            show_status: config.show_status,
            fps: self.fps.fps(),
        };
        self.terminal
            .draw(|f| ui::draw(f, &view))
            .context("Écriture de la frame dans le terminal")?;
        self.fps.tick();
        Ok(())
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()> {
        // Le terminal reste en écran alternatif ; seul le cadre disparaît
        // (`Frame::fullscreen`). On efface pour ne pas garder l'ancien cadre.
        log::debug!("Plein écran : {fullscreen}");
        self.terminal.clear().context("Effacement du terminal")?;
        Ok(())
    }

    fn display_size(&self) -> (u32, u32) {
        crossterm::terminal::size().map_or((0, 0), |(w, h)| (u32::from(w), u32::from(h)))
    }
}

/// Traduit un événement crossterm. Seuls les appuis sont retenus ;
/// Ctrl+C ferme le jeu (le mode raw désactive SIGINT).
///
/// # Example
/// ```
/// use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
/// use ug_core::input::{InputEvent, Key, Modifiers};
/// use ug_term::backend::translate_event;
///
/// let alt_enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
/// assert_eq!(
///     translate_event(&alt_enter),
///     Some(InputEvent::Key { key: Key::Enter, modifiers: Modifiers::ALT })
/// );
/// ```
#[must_use]
pub fn translate_event(event: &Event) -> Option<InputEvent> {
    match *event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Some(InputEvent::Quit);
            }
            Some(InputEvent::Key {
                key: translate_key(code),
                modifiers: Modifiers {
                    alt: modifiers.contains(KeyModifiers::ALT),
                    ctrl: modifiers.contains(KeyModifiers::CONTROL),
                    shift: modifiers.contains(KeyModifiers::SHIFT),
                },
            })
        }
        Event::Resize(w, h) => Some(InputEvent::Resize(u32::from(w), u32::from(h))),
        _ => None,
    }
}

fn translate_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn plain_keys() {
        assert_eq!(
            translate_event(&press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(InputEvent::key(Key::Char(' ')))
        );
        assert_eq!(
            translate_event(&press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(InputEvent::key(Key::Escape))
        );
        assert_eq!(
            translate_event(&press(KeyCode::F(5), KeyModifiers::NONE)),
            Some(InputEvent::key(Key::F(5)))
        );
        assert_eq!(
            translate_event(&press(KeyCode::Home, KeyModifiers::NONE)),
            Some(InputEvent::key(Key::Other))
        );
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            translate_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn releases_are_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate_event(&release), None);
        assert_eq!(translate_event(&Event::FocusGained), None);
    }

    #[test]
    fn resize_is_forwarded() {
        assert_eq!(translate_event(&Event::Resize(120, 40)), Some(InputEvent::Resize(120, 40)));
    }
}
