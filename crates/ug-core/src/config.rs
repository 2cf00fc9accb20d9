use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Polices connues, du plus petit au plus grand.
pub const AVAILABLE_FONTS: &[&str] = &["5x8", "6x13", "9x18", "10x20"];

/// Police par défaut (cellules 10×20).
pub const DEFAULT_FONT: &str = "10x20";

/// Présentation d'une frame par un backend texte.
///
/// # Example
/// ```
/// use ug_core::config::PresentMode;
/// assert_eq!(PresentMode::default(), PresentMode::Cells);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum PresentMode {
    /// Une cellule terminal par cellule racine, texte lisible.
    #[default]
    Cells,
    /// Surface de pixels en demi-blocs (▄), deux pixels par cellule.
    Pixels,
}

/// Configuration du moteur, hot-rechargeable pour la partie runtime.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ug_core::config::EngineConfig;
/// let config = EngineConfig::default();
/// assert_eq!((config.width, config.height), (80, 25));
/// assert_eq!(config.target_fps, 60);
/// assert_eq!(config.font, "10x20");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EngineConfig {
    // === Fenêtre ===
    /// Title shown by the backend.
    pub title: String,
    /// Grid width in root cells.
    pub width: u32,
    /// Grid height in root cells.
    pub height: u32,
    /// Root window background (R, G, B, A). None = transparent.
    pub bg: Option<Rgba>,
    /// Root font name (see `AVAILABLE_FONTS`).
    pub font: String,

    // === Runtime ===
    /// FPS cible de la boucle de jeu.
    pub target_fps: u32,
    /// Dossier contenant les fichiers `<nom>.bdf`.
    pub font_dir: PathBuf,
    /// Police embarquée si le fichier BDF est absent.
    pub builtin_fallback: bool,
    /// Présentation terminal.
    pub present_mode: PresentMode,
    /// Barre de statut (titre, FPS) en mode fenêtré.
    pub show_status: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "unicodegame".to_string(),
            width: 80,
            height: 25,
            bg: None,
            font: DEFAULT_FONT.to_string(),
            target_fps: 60,
            font_dir: PathBuf::from("fonts"),
            builtin_fallback: true,
            present_mode: PresentMode::Cells,
            show_status: true,
        }
    }
}

impl EngineConfig {
    /// Config with a title and grid size, everything else default.
    ///
    /// # Example
    /// ```
    /// use ug_core::config::EngineConfig;
    /// let config = EngineConfig::new("My Game", 60, 30);
    /// assert_eq!(config.title, "My Game");
    /// ```
    #[must_use]
    pub fn new(title: &str, width: u32, height: u32) -> Self {
        Self {
            title: title.to_string(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Builder: root background.
    #[must_use]
    pub fn with_bg(mut self, bg: Rgba) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Builder: root font.
    #[must_use]
    pub fn with_font(mut self, font: &str) -> Self {
        self.font = font.to_string();
        self
    }

    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(1, 1000);
        self.height = self.height.clamp(1, 1000);
        self.target_fps = self.target_fps.clamp(1, 240);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    window: Option<WindowSection>,
    runtime: Option<RuntimeSection>,
}

/// Window section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct WindowSection {
    title: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    bg: Option<Rgba>,
    font: Option<String>,
}

/// Runtime section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct RuntimeSection {
    target_fps: Option<u32>,
    font_dir: Option<PathBuf>,
    builtin_fallback: Option<bool>,
    present_mode: Option<PresentMode>,
    show_status: Option<bool>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the document is not valid TOML for this schema.
///
/// # Example
/// ```
/// use ug_core::config::parse_config;
/// let config = parse_config("[window]\nwidth = 40\n").unwrap();
/// assert_eq!(config.width, 40);
/// assert_eq!(config.height, 25);
/// ```
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = EngineConfig::default();

    if let Some(w) = file.window {
        if let Some(v) = w.title {
            config.title = v;
        }
        if let Some(v) = w.width {
            config.width = v;
        }
        if let Some(v) = w.height {
            config.height = v;
        }
        if let Some(v) = w.bg {
            config.bg = Some(v);
        }
        if let Some(v) = w.font {
            config.font = v;
        }
    }

    if let Some(r) = file.runtime {
        if let Some(v) = r.target_fps {
            config.target_fps = v;
        }
        if let Some(v) = r.font_dir {
            config.font_dir = v;
        }
        if let Some(v) = r.builtin_fallback {
            config.builtin_fallback = v;
        }
        if let Some(v) = r.present_mode {
            config.present_mode = v;
        }
        if let Some(v) = r.show_status {
            config.show_status = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ug_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide dans {}", path.display()))
}
