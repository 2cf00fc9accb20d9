use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ug_core::config::AVAILABLE_FONTS;

use crate::bdf::parse_bdf;
use crate::error::FontError;
use crate::font::Font;

/// Extrait la taille de cellule d'un nom de police `"LxH"`.
///
/// # Example
/// ```
/// use ug_font::parse_cell_size;
/// assert_eq!(parse_cell_size("10x20"), Some((10, 20)));
/// assert_eq!(parse_cell_size("6x13"), Some((6, 13)));
/// assert_eq!(parse_cell_size("fixed"), None);
/// assert_eq!(parse_cell_size("0x8"), None);
/// ```
#[must_use]
pub fn parse_cell_size(name: &str) -> Option<(u32, u32)> {
    let (w, h) = name.split_once('x')?;
    let w: u32 = w.parse().ok()?;
    let h: u32 = h.parse().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

/// Cache des polices chargées, indexé par nom.
///
/// Les polices sont cherchées dans `dir/<nom>.bdf`. Si le fichier manque
/// et que le repli est actif, la police embarquée est utilisée à la même
/// taille de cellule.
#[derive(Debug)]
pub struct FontRegistry {
    dir: PathBuf,
    builtin_fallback: bool,
    cache: HashMap<String, Arc<Font>>,
}

impl FontRegistry {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, builtin_fallback: bool) -> Self {
        Self {
            dir: dir.into(),
            builtin_fallback,
            cache: HashMap::new(),
        }
    }

    /// Répertoire des fichiers `.bdf`.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Chemin attendu du fichier de la police `name`.
    #[must_use]
    pub fn font_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.bdf"))
    }

    /// Charge (ou retrouve en cache) la police `name`.
    ///
    /// # Errors
    /// [`FontError::UnknownFont`] if `name` is neither cached nor one of the
    /// known sizes, [`FontError::NotFound`] if the file is missing and the
    /// builtin fallback is disabled, [`FontError::Io`] / [`FontError::Syntax`]
    /// if the file exists but cannot be read or parsed.
    ///
    /// # Example
    /// ```
    /// use ug_font::FontRegistry;
    /// let mut fonts = FontRegistry::new("/nonexistent", true);
    /// let font = fonts.load("6x13").unwrap();
    /// assert_eq!(font.cell_size(), (6, 13));
    /// assert!(fonts.load("7x14").is_err());
    /// ```
    pub fn load(&mut self, name: &str) -> Result<Arc<Font>, FontError> {
        if let Some(font) = self.cache.get(name) {
            return Ok(Arc::clone(font));
        }
        if !AVAILABLE_FONTS.contains(&name) {
            return Err(FontError::UnknownFont {
                name: name.to_string(),
                available: AVAILABLE_FONTS.join(", "),
            });
        }

        let path = self.font_path(name);
        let font = if path.exists() {
            let src = std::fs::read_to_string(&path).map_err(|source| FontError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let font = Font::from_bdf(name, &parse_bdf(&src)?);
            log::info!("Police chargée : {}", path.display());
            font
        } else if self.builtin_fallback {
            let (w, h) = parse_cell_size(name).unwrap_or((8, 16));
            log::warn!(
                "{} introuvable, police embarquée utilisée en {w}x{h}",
                path.display()
            );
            Font::bundled(name, w, h)?
        } else {
            return Err(FontError::NotFound {
                path: path.display().to_string(),
            });
        };

        Ok(self.insert(name, font))
    }

    /// Enregistre une police sous `name` (remplace l'existante).
    pub fn insert(&mut self, name: &str, font: Font) -> Arc<Font> {
        let font = Arc::new(font);
        self.cache.insert(name.to_string(), Arc::clone(&font));
        font
    }

    /// `true` si `name` est déjà en cache.
    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }
}
