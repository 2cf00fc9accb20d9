use std::path::{Path, PathBuf};

use clap::Parser;
use ug_core::config::{EngineConfig, PresentMode};
use ug_core::error::CoreError;

use crate::demos::Demo;

/// Config lue quand `--config` n'est pas fourni.
pub const DEFAULT_CONFIG: &str = "config/default.toml";

/// unicodegame : graphismes Unicode en cellules, dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Démo à lancer.
    #[arg(long, value_enum, default_value_t = Demo::Hello)]
    pub demo: Demo,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Police racine : 5x8, 6x13, 9x18, 10x20.
    #[arg(long)]
    pub font: Option<String>,

    /// FPS cible.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Présentation terminal : cells ou pixels.
    #[arg(long)]
    pub present: Option<String>,

    /// Sans terminal : rendu hors écran avec une horloge fixe.
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Nombre de frames rendues en mode headless.
    #[arg(long, default_value_t = 120)]
    pub frames: u64,

    /// Écrire la dernière frame en PNG (mode headless).
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Afficher la grille de cellules finale sur stdout (mode headless).
    #[arg(long, default_value_t = false)]
    pub dump_cells: bool,

    /// Graine du générateur aléatoire des démos.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Vérifie les combinaisons d'options.
    ///
    /// # Errors
    /// Returns an error for `--frames 0`, or for `--snapshot`/`--dump-cells`
    /// without `--headless`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.frames == 0 {
            return Err(CoreError::Config("--frames doit être au moins 1".to_string()).into());
        }
        if !self.headless && (self.snapshot.is_some() || self.dump_cells) {
            anyhow::bail!("--snapshot et --dump-cells demandent --headless.");
        }
        Ok(())
    }

    /// Chemin de config effectif et s'il a été demandé explicitement.
    #[must_use]
    pub fn config_path(&self) -> (&Path, bool) {
        match self.config.as_deref() {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG), false),
        }
    }

    /// Applique `--font`, `--fps` et `--present` par-dessus la config.
    pub fn apply_overrides(&self, config: &mut EngineConfig) {
        if let Some(ref font) = self.font {
            config.font.clone_from(font);
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if let Some(ref mode) = self.present {
            config.present_mode = match mode.as_str() {
                "cells" => PresentMode::Cells,
                "pixels" => PresentMode::Pixels,
                _ => {
                    log::warn!("Présentation inconnue '{mode}', utilisation du défaut.");
                    config.present_mode
                }
            };
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("unicodegame").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.demo, Demo::Hello);
        assert_eq!(cli.frames, 120);
        assert!(!cli.headless);
        assert_eq!(cli.config_path(), (Path::new(DEFAULT_CONFIG), false));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn demo_names() {
        assert_eq!(parse(&["--demo", "effects"]).demo, Demo::Effects);
        assert_eq!(parse(&["--demo", "wedges"]).demo, Demo::Wedges);
        assert_eq!(parse(&["--demo", "walker"]).demo, Demo::Walker);
        assert!(Cli::try_parse_from(["unicodegame", "--demo", "pong"]).is_err());
    }

    #[test]
    fn overrides_apply_and_clamp() {
        let cli = parse(&["--font", "6x13", "--fps", "1000", "--present", "pixels"]);
        let mut config = EngineConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.font, "6x13");
        assert_eq!(config.target_fps, 240);
        assert_eq!(config.present_mode, PresentMode::Pixels);
    }

    #[test]
    fn unknown_present_mode_keeps_current() {
        let cli = parse(&["--present", "sixel"]);
        let mut config = EngineConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.present_mode, PresentMode::Cells);
    }

    #[test]
    fn snapshot_needs_headless() {
        assert!(parse(&["--snapshot", "out.png"]).validate().is_err());
        assert!(parse(&["--dump-cells"]).validate().is_err());
        assert!(parse(&["--headless", "--snapshot", "out.png"]).validate().is_ok());
    }

    #[test]
    fn zero_frames_rejected() {
        let err = parse(&["--headless", "--frames", "0"]).validate().unwrap_err();
        assert!(err.downcast_ref::<CoreError>().is_some());
    }
}
