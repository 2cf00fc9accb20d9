use std::collections::HashMap;

use crate::bdf::{BdfFont, parse_bdf};
use crate::builtin::{procedural_chars, procedural_mask, tofu};
use crate::error::FontError;
use crate::glyph::GlyphMask;

/// Police 10x20 livrée avec le moteur : ASCII, Latin-1 et `█`.
pub const BUNDLED_BDF: &str = include_str!("../../../fonts/10x20.bdf");

/// Police prête au rendu : un masque par caractère, taille de cellule fixe.
///
/// Résolution d'un caractère : glyphe de la police, puis glyphe procédural
/// (blocs, coins biseautés, espace), puis `DEFAULT_CHAR`, puis tofu.
///
/// # Example
/// ```
/// use ug_font::Font;
/// let font = Font::builtin("10x20", 10, 20);
/// assert_eq!(font.cell_size(), (10, 20));
/// assert_eq!(font.mask('█').lit_count(), 200);
/// // Pas de glyphe 'A' : boîte tofu.
/// assert!(!font.has_glyph('A'));
/// assert!(!font.mask('A').is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Font {
    name: String,
    cell_width: u32,
    cell_height: u32,
    glyphs: HashMap<char, GlyphMask>,
    procedural: HashMap<char, GlyphMask>,
    default_char: Option<char>,
    tofu: GlyphMask,
}

impl Font {
    /// Construit une police à partir d'un fichier BDF parsé.
    #[must_use]
    pub fn from_bdf(name: &str, bdf: &BdfFont) -> Self {
        let (cell_width, cell_height) = bdf.cell_size();
        let mut glyphs = HashMap::with_capacity(bdf.glyphs.len());
        for glyph in &bdf.glyphs {
            if let Some(ch) = char::from_u32(glyph.encoding) {
                glyphs.insert(ch, GlyphMask::from_bdf(glyph, bdf, cell_width, cell_height));
            }
        }
        let default_char = bdf
            .default_char
            .and_then(char::from_u32)
            .filter(|ch| glyphs.contains_key(ch));
        log::debug!(
            "Police {name} : {} glyphes, cellule {cell_width}x{cell_height}",
            glyphs.len()
        );
        Self {
            name: name.to_string(),
            cell_width,
            cell_height,
            glyphs,
            default_char,
            procedural: procedural_glyphs(cell_width, cell_height),
            tofu: tofu(cell_width, cell_height),
        }
    }

    /// Police sans fichier : uniquement les glyphes procéduraux.
    #[must_use]
    pub fn builtin(name: &str, cell_width: u32, cell_height: u32) -> Self {
        let (cell_width, cell_height) = (cell_width.max(1), cell_height.max(1));
        Self {
            name: name.to_string(),
            cell_width,
            cell_height,
            glyphs: HashMap::new(),
            default_char: None,
            procedural: procedural_glyphs(cell_width, cell_height),
            tofu: tofu(cell_width, cell_height),
        }
    }

    /// Police embarquée ([`BUNDLED_BDF`]) à la taille `cell_width × cell_height`.
    ///
    /// En 10×20 les glyphes sont ceux du fichier. Aux autres tailles ils sont
    /// redimensionnés au plus proche voisin ; blocs et biseaux restent
    /// dessinés exactement.
    ///
    /// # Errors
    /// [`FontError::Syntax`] if the embedded BDF does not parse.
    ///
    /// # Example
    /// ```
    /// use ug_font::Font;
    /// let font = Font::bundled("10x20", 10, 20).unwrap();
    /// assert!(font.has_glyph('A'));
    /// assert_eq!(font.mask('▀').lit_count(), 100);
    /// ```
    pub fn bundled(name: &str, cell_width: u32, cell_height: u32) -> Result<Self, FontError> {
        let mut font = Self::from_bdf(name, &parse_bdf(BUNDLED_BDF)?);
        let (cell_width, cell_height) = (cell_width.max(1), cell_height.max(1));
        if font.cell_size() != (cell_width, cell_height) {
            for mask in font.glyphs.values_mut() {
                *mask = mask.scaled(cell_width, cell_height);
            }
            font.cell_width = cell_width;
            font.cell_height = cell_height;
            font.procedural = procedural_glyphs(cell_width, cell_height);
            font.tofu = tofu(cell_width, cell_height);
        }
        Ok(font)
    }

    /// Nom sous lequel la police a été chargée.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// (largeur, hauteur) d'une cellule en pixels.
    #[must_use]
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Nombre de glyphes issus du fichier BDF.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// `true` si `ch` a un glyphe propre (fichier ou procédural).
    #[must_use]
    pub fn has_glyph(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch) || self.procedural.contains_key(&ch)
    }

    /// Masque à la taille de cellule pour `ch`.
    #[must_use]
    pub fn mask(&self, ch: char) -> &GlyphMask {
        self.glyphs
            .get(&ch)
            .or_else(|| self.procedural.get(&ch))
            .or_else(|| self.default_char.and_then(|d| self.glyphs.get(&d)))
            .unwrap_or(&self.tofu)
    }
}

fn procedural_glyphs(cell_width: u32, cell_height: u32) -> HashMap<char, GlyphMask> {
    procedural_chars()
        .filter_map(|ch| procedural_mask(ch, cell_width, cell_height).map(|m| (ch, m)))
        .collect()
}
