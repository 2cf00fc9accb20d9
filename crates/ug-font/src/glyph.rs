use crate::bdf::{BdfFont, BdfGlyph};

/// Masque de couverture d'un glyphe à la taille d'une cellule.
///
/// Une valeur par pixel, 0 (vide) ou 255 (plein) pour les polices bitmap.
/// Directement utilisable par `Surface::blend_mask`.
///
/// # Example
/// ```
/// use ug_font::GlyphMask;
/// let mut mask = GlyphMask::empty(4, 4);
/// assert!(mask.is_empty());
/// mask.set(1, 2);
/// assert_eq!(mask.get(1, 2), 255);
/// assert_eq!(mask.get(9, 9), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Coverage values, row-major, `width * height` entries.
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    /// Masque entièrement vide.
    #[must_use]
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width as usize * height as usize],
        }
    }

    /// Couverture au pixel (x, y), 0 hors masque.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    /// Allume le pixel (x, y). Hors masque → ignoré.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.coverage[y as usize * self.width as usize + x as usize] = 255;
        }
    }

    /// `true` si aucun pixel n'est couvert.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0)
    }

    /// Nombre de pixels couverts.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.coverage.iter().filter(|&&c| c != 0).count()
    }

    /// Mise à l'échelle plus-proche-voisin (fenêtres avec `scale != 1`).
    ///
    /// # Example
    /// ```
    /// use ug_font::GlyphMask;
    /// let mut mask = GlyphMask::empty(2, 2);
    /// mask.set(1, 1);
    /// let big = mask.scaled(4, 4);
    /// assert_eq!(big.lit_count(), 4);
    /// assert_eq!(big.get(3, 3), 255);
    /// ```
    #[must_use]
    pub fn scaled(&self, width: u32, height: u32) -> GlyphMask {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut out = GlyphMask::empty(width, height);
        if self.width == 0 || self.height == 0 {
            return out;
        }
        for y in 0..height {
            let sy = (u64::from(y) * u64::from(self.height) / u64::from(height.max(1))) as u32;
            for x in 0..width {
                let sx = (u64::from(x) * u64::from(self.width) / u64::from(width.max(1))) as u32;
                out.coverage[y as usize * width as usize + x as usize] = self.get(sx, sy);
            }
        }
        out
    }

    /// Place un glyphe BDF dans une cellule `cell_width × cell_height`.
    ///
    /// Le coin haut-gauche du bitmap tombe en
    /// `x = bbx.x_offset - font.x_offset`, `y = baseline - (bbx.height + bbx.y_offset)`.
    /// Les pixels qui débordent de la cellule sont coupés.
    #[must_use]
    pub fn from_bdf(glyph: &BdfGlyph, font: &BdfFont, cell_width: u32, cell_height: u32) -> Self {
        let mut mask = GlyphMask::empty(cell_width, cell_height);
        let left = glyph.bbx.x_offset - font.bounding_box.x_offset;
        let top = font.baseline() - (glyph.bbx.height as i32 + glyph.bbx.y_offset);
        for gy in 0..glyph.bbx.height {
            let y = top + gy as i32;
            if y < 0 {
                continue;
            }
            for gx in 0..glyph.bbx.width {
                let x = left + gx as i32;
                if x >= 0 && glyph.is_set(gx, gy) {
                    mask.set(x as u32, y as u32);
                }
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bdf::parse_bdf;

    const FONT: &str = "FONTBOUNDINGBOX 4 6 0 -1
STARTPROPERTIES 1
FONT_ASCENT 5
ENDPROPERTIES
STARTCHAR dot
ENCODING 46
BBX 1 1 2 0
BITMAP
80
ENDCHAR
STARTCHAR comma
ENCODING 44
BBX 1 2 1 -1
BITMAP
80
80
ENDCHAR
STARTCHAR wide
ENCODING 87
BBX 6 1 -1 4
BITMAP
FC
ENDCHAR
";

    #[test]
    fn glyph_sits_on_baseline() {
        let font = parse_bdf(FONT).unwrap();
        let dot = GlyphMask::from_bdf(font.glyph('.').unwrap(), &font, 4, 6);
        // baseline = 5 → ligne 4 est la dernière au-dessus de la ligne de base.
        assert_eq!(dot.lit_count(), 1);
        assert_eq!(dot.get(2, 4), 255);
    }

    #[test]
    fn descender_goes_below_baseline() {
        let font = parse_bdf(FONT).unwrap();
        let comma = GlyphMask::from_bdf(font.glyph(',').unwrap(), &font, 4, 6);
        assert_eq!(comma.get(1, 4), 255);
        assert_eq!(comma.get(1, 5), 255);
    }

    #[test]
    fn overflow_is_clipped() {
        let font = parse_bdf(FONT).unwrap();
        let wide = GlyphMask::from_bdf(font.glyph('W').unwrap(), &font, 4, 6);
        // 6 pixels à partir de x = -1, il en reste 4 dans la cellule.
        assert_eq!(wide.lit_count(), 4);
        assert_eq!(wide.get(0, 0), 255);
    }

    #[test]
    fn scaled_down_keeps_shape() {
        let mut mask = GlyphMask::empty(4, 4);
        for x in 0..4 {
            mask.set(x, 0);
            mask.set(x, 1);
        }
        let small = mask.scaled(2, 2);
        assert_eq!(small.get(0, 0), 255);
        assert_eq!(small.get(1, 0), 255);
        assert_eq!(small.get(0, 1), 0);
    }
}
