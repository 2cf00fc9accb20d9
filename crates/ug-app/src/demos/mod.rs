//! Démos intégrées, une par script d'exemple.

use anyhow::Result;
use ug_core::color::Rgba;
use ug_core::config::EngineConfig;
use ug_core::input::{InputEvent, Key};
use ug_engine::{Engine, Game};

pub mod effects;
pub mod hello;
pub mod walker;
pub mod wedges;

/// Démo sélectionnable en ligne de commande.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    /// Texte et `@` sur la fenêtre racine.
    Hello,
    /// Gerbes de particules (flèches, Espace, Q).
    Effects,
    /// Galerie des caractères biseautés U+1FB3C..U+1FB67.
    Wedges,
    /// Personnage animé sur un décor en parallaxe.
    Walker,
}

impl Demo {
    /// Titre, taille de grille et fond propres à la démo.
    fn window(self) -> (&'static str, u32, u32, Rgba) {
        match self {
            Self::Hello => ("unicodegame Demo", 80, 30, (20, 20, 30, 255)),
            Self::Effects => ("Effect Demo", 60, 30, (10, 10, 20, 255)),
            Self::Wedges => ("Wedge Characters Demo", 80, 40, (10, 10, 30, 255)),
            Self::Walker => ("Walker Demo", 60, 20, (5, 5, 15, 255)),
        }
    }

    /// Impose la géométrie de la démo ; police et runtime restent ceux de la config.
    pub fn configure(self, config: &mut EngineConfig) {
        let (title, width, height, bg) = self.window();
        title.clone_into(&mut config.title);
        config.width = width;
        config.height = height;
        config.bg = Some(bg);
    }

    /// Crée les fenêtres et l'état de jeu.
    ///
    /// # Errors
    /// Propagates window or font errors from the engine.
    pub fn setup(self, engine: &mut Engine, seed: u64) -> Result<Box<dyn Game>> {
        Ok(match self {
            Self::Hello => Box::new(hello::Hello),
            Self::Effects => Box::new(effects::Effects::new(seed)),
            Self::Wedges => Box::new(wedges::Wedges),
            Self::Walker => Box::new(walker::Walker::new(engine, seed)?),
        })
    }

    /// Événements injectés en mode headless pour que la capture montre quelque chose.
    #[must_use]
    pub fn script(self) -> Vec<(u64, Vec<InputEvent>)> {
        match self {
            Self::Hello | Self::Wedges => Vec::new(),
            Self::Effects => vec![
                (0, vec![InputEvent::key(Key::Char(' '))]),
                (10, vec![InputEvent::key(Key::Left), InputEvent::key(Key::Char(' '))]),
            ],
            Self::Walker => (0..8).map(|frame| (frame * 4, vec![InputEvent::key(Key::Right)])).collect(),
        }
    }
}
