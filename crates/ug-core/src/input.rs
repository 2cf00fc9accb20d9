/// Touche clavier, indépendante du backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character (space included).
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// Function key F1..F24.
    F(u8),
    /// Any key the backend cannot name.
    Other,
}

/// Modificateurs actifs lors d'un appui.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
    };

    /// Only Alt (Option on macOS) held.
    pub const ALT: Self = Self {
        alt: true,
        ctrl: false,
        shift: false,
    };
}

/// Événement produit par un backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Key pressed.
    Key {
        /// Which key.
        key: Key,
        /// Modifiers held at press time.
        modifiers: Modifiers,
    },
    /// Display resized to (columns or pixels, rows or pixels).
    Resize(u32, u32),
    /// Close request (window closed, Ctrl+C, end of script).
    Quit,
}

impl InputEvent {
    /// Shorthand for an unmodified key press.
    ///
    /// # Example
    /// ```
    /// use ug_core::input::{InputEvent, Key, Modifiers};
    /// assert_eq!(
    ///     InputEvent::key(Key::Char('q')),
    ///     InputEvent::Key { key: Key::Char('q'), modifiers: Modifiers::NONE }
    /// );
    /// ```
    #[must_use]
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}
