//! Parser BDF (Glyph Bitmap Distribution Format 2.1).
//!
//! Seuls les mots-clés nécessaires au rendu sont interprétés ; les autres
//! (`SIZE`, `SWIDTH`, `COMMENT`, propriétés textuelles…) sont ignorés.

use crate::error::FontError;

/// Boîte englobante BDF : taille et décalage de l'origine (y vers le haut).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// Un glyphe BDF décodé.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BdfGlyph {
    /// STARTCHAR name.
    pub name: String,
    /// Code point (ENCODING).
    pub encoding: u32,
    /// Horizontal advance (DWIDTH x), if given.
    pub dwidth: Option<i32>,
    /// Glyph bounding box (BBX).
    pub bbx: BoundingBox,
    /// Bitmap rows, `ceil(bbx.width / 8)` bytes each, MSB = leftmost pixel.
    pub rows: Vec<Vec<u8>>,
}

impl BdfGlyph {
    /// `true` si le pixel (x, y) du bitmap est allumé (y = 0 en haut).
    ///
    /// # Example
    /// ```
    /// use ug_font::bdf::{BdfGlyph, BoundingBox};
    /// let glyph = BdfGlyph {
    ///     name: "bar".into(),
    ///     encoding: 124,
    ///     dwidth: Some(2),
    ///     bbx: BoundingBox { width: 2, height: 1, x_offset: 0, y_offset: 0 },
    ///     rows: vec![vec![0b0100_0000]],
    /// };
    /// assert!(!glyph.is_set(0, 0));
    /// assert!(glyph.is_set(1, 0));
    /// ```
    #[must_use]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.bbx.width {
            return false;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get((x / 8) as usize))
            .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
    }
}

/// Police BDF complète.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BdfFont {
    /// FONT (XLFD name).
    pub name: String,
    /// FONTBOUNDINGBOX.
    pub bounding_box: BoundingBox,
    /// FONT_ASCENT property.
    pub ascent: Option<i32>,
    /// FONT_DESCENT property.
    pub descent: Option<i32>,
    /// DEFAULT_CHAR property.
    pub default_char: Option<u32>,
    /// Glyphs with a non-negative encoding, file order.
    pub glyphs: Vec<BdfGlyph>,
}

impl BdfFont {
    /// Recherche linéaire d'un glyphe par code point.
    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<&BdfGlyph> {
        self.glyphs.iter().find(|g| g.encoding == ch as u32)
    }

    /// Ligne de base depuis le haut de la cellule, en pixels.
    #[must_use]
    pub fn baseline(&self) -> i32 {
        self.ascent
            .unwrap_or(self.bounding_box.height as i32 + self.bounding_box.y_offset)
    }

    /// Taille de cellule : BBX de `█` si présent, sinon FONTBOUNDINGBOX.
    #[must_use]
    pub fn cell_size(&self) -> (u32, u32) {
        let bbx = self
            .glyph('\u{2588}')
            .map_or(self.bounding_box, |g| g.bbx);
        (bbx.width.max(1), bbx.height.max(1))
    }
}

/// Glyphe en cours de lecture.
struct GlyphBuilder {
    name: String,
    encoding: Option<i64>,
    dwidth: Option<i32>,
    bbx: Option<BoundingBox>,
    rows: Vec<Vec<u8>>,
}

/// Parse le contenu texte d'un fichier BDF.
///
/// # Errors
/// Returns [`FontError::Syntax`] with the offending line for malformed
/// numbers, hex rows or block structure, and [`FontError::UnexpectedEof`]
/// when the input stops inside a glyph or bitmap.
///
/// # Example
/// ```
/// use ug_font::bdf::parse_bdf;
/// let src = "STARTFONT 2.1\nFONT tiny\nFONTBOUNDINGBOX 2 2 0 0\nCHARS 1\n\
///            STARTCHAR A\nENCODING 65\nDWIDTH 2 0\nBBX 2 2 0 0\nBITMAP\n80\n40\nENDCHAR\nENDFONT\n";
/// let font = parse_bdf(src).unwrap();
/// assert_eq!(font.glyphs.len(), 1);
/// assert!(font.glyph('A').unwrap().is_set(0, 0));
/// assert!(font.glyph('A').unwrap().is_set(1, 1));
/// ```
pub fn parse_bdf(src: &str) -> Result<BdfFont, FontError> {
    let mut lines = src.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let mut name = String::new();
    let mut bounding_box = None;
    let mut ascent = None;
    let mut descent = None;
    let mut default_char = None;
    let mut glyphs = Vec::new();
    let mut current: Option<GlyphBuilder> = None;
    let mut finished = false;
    let mut last_line = 0;

    while let Some((line_no, line)) = lines.next() {
        last_line = line_no;
        let (keyword, rest) = split_keyword(line);
        match keyword {
            "" | "COMMENT" | "STARTFONT" | "SIZE" | "SWIDTH" | "CHARS" => {}
            "FONT" => name = rest.to_string(),
            "FONTBOUNDINGBOX" => bounding_box = Some(parse_bbox(rest, line_no)?),
            "STARTPROPERTIES" => loop {
                let Some((prop_line, prop)) = lines.next() else {
                    return Err(FontError::UnexpectedEof("ENDPROPERTIES"));
                };
                let (key, value) = split_keyword(prop);
                match key {
                    "ENDPROPERTIES" => break,
                    "FONT_ASCENT" => ascent = Some(parse_int(value, prop_line)?),
                    "FONT_DESCENT" => descent = Some(parse_int(value, prop_line)?),
                    "DEFAULT_CHAR" => default_char = u32::try_from(parse_int(value, prop_line)?).ok(),
                    _ => {}
                }
            },
            "STARTCHAR" => {
                if current.is_some() {
                    return Err(syntax(line_no, "STARTCHAR sans ENDCHAR précédent"));
                }
                current = Some(GlyphBuilder {
                    name: rest.to_string(),
                    encoding: None,
                    dwidth: None,
                    bbx: None,
                    rows: Vec::new(),
                });
            }
            "ENCODING" => {
                let glyph = in_glyph(&mut current, line_no, keyword)?;
                let first = rest.split_whitespace().next().unwrap_or("");
                glyph.encoding = Some(
                    first
                        .parse::<i64>()
                        .map_err(|_| syntax(line_no, &format!("ENCODING invalide : {rest}")))?,
                );
            }
            "DWIDTH" => {
                let glyph = in_glyph(&mut current, line_no, keyword)?;
                let first = rest.split_whitespace().next().unwrap_or("");
                glyph.dwidth = Some(parse_int(first, line_no)?);
            }
            "BBX" => {
                let bbx = parse_bbox(rest, line_no)?;
                in_glyph(&mut current, line_no, keyword)?.bbx = Some(bbx);
            }
            "BITMAP" => {
                let glyph = in_glyph(&mut current, line_no, keyword)?;
                let bbx = glyph
                    .bbx
                    .ok_or_else(|| syntax(line_no, "BITMAP avant BBX"))?;
                let row_bytes = bbx.width.div_ceil(8) as usize;
                for _ in 0..bbx.height {
                    let Some((row_line, row)) = lines.next() else {
                        return Err(FontError::UnexpectedEof("ligne BITMAP"));
                    };
                    if row == "ENDCHAR" {
                        return Err(syntax(
                            row_line,
                            &format!("{} lignes BITMAP attendues, trouvé moins", bbx.height),
                        ));
                    }
                    glyph.rows.push(decode_hex_row(row, row_bytes, row_line)?);
                }
            }
            "ENDCHAR" => {
                let glyph = current
                    .take()
                    .ok_or_else(|| syntax(line_no, "ENDCHAR sans STARTCHAR"))?;
                let encoding = glyph
                    .encoding
                    .ok_or_else(|| syntax(line_no, "glyphe sans ENCODING"))?;
                // ENCODING -1 : glyphe non encodé, ignoré.
                if let Ok(encoding) = u32::try_from(encoding) {
                    let bbx = glyph.bbx.unwrap_or_default();
                    glyphs.push(BdfGlyph {
                        name: glyph.name,
                        encoding,
                        dwidth: glyph.dwidth,
                        bbx,
                        rows: glyph.rows,
                    });
                }
            }
            "ENDFONT" => {
                finished = true;
                break;
            }
            _ => {}
        }
    }

    if current.is_some() {
        return Err(FontError::UnexpectedEof("ENDCHAR"));
    }
    if !finished {
        log::debug!("BDF sans ENDFONT, {} glyphes lus", glyphs.len());
    }
    // Signalé sur la dernière ligne lue : l'en-tête est absent du fichier entier.
    let bounding_box =
        bounding_box.ok_or_else(|| syntax(last_line, "FONTBOUNDINGBOX manquant"))?;

    Ok(BdfFont {
        name,
        bounding_box,
        ascent,
        descent,
        default_char,
        glyphs,
    })
}

fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

fn syntax(line: usize, message: &str) -> FontError {
    FontError::Syntax {
        line,
        message: message.to_string(),
    }
}

fn in_glyph<'a>(
    current: &'a mut Option<GlyphBuilder>,
    line: usize,
    keyword: &str,
) -> Result<&'a mut GlyphBuilder, FontError> {
    current
        .as_mut()
        .ok_or_else(|| syntax(line, &format!("{keyword} hors d'un bloc STARTCHAR")))
}

fn parse_int(value: &str, line: usize) -> Result<i32, FontError> {
    value
        .trim()
        .parse()
        .map_err(|_| syntax(line, &format!("entier invalide : {value:?}")))
}

fn parse_bbox(rest: &str, line: usize) -> Result<BoundingBox, FontError> {
    let fields: Vec<&str> = rest.split_whitespace().collect();
    let [w, h, x, y] = fields.as_slice() else {
        return Err(syntax(line, &format!("4 valeurs attendues, trouvé {rest:?}")));
    };
    let width = parse_int(w, line)?;
    let height = parse_int(h, line)?;
    if width < 0 || height < 0 {
        return Err(syntax(line, "dimensions négatives"));
    }
    Ok(BoundingBox {
        width: width as u32,
        height: height as u32,
        x_offset: parse_int(x, line)?,
        y_offset: parse_int(y, line)?,
    })
}

/// Décode une ligne hexadécimale ; les octets au-delà de `row_bytes` sont ignorés.
fn decode_hex_row(row: &str, row_bytes: usize, line: usize) -> Result<Vec<u8>, FontError> {
    if !row.is_ascii() || row.len() % 2 != 0 || row.len() < row_bytes * 2 {
        return Err(syntax(line, &format!("ligne BITMAP invalide : {row:?}")));
    }
    (0..row_bytes)
        .map(|i| {
            u8::from_str_radix(&row[i * 2..i * 2 + 2], 16)
                .map_err(|_| syntax(line, &format!("hexadécimal invalide : {row:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "STARTFONT 2.1
COMMENT sample
FONT -misc-fixed-medium-r-normal--20-200-75-75-c-100-iso10646-1
SIZE 20 75 75
FONTBOUNDINGBOX 10 20 0 -4
STARTPROPERTIES 3
FONT_ASCENT 16
FONT_DESCENT 4
DEFAULT_CHAR 0
ENDPROPERTIES
CHARS 3
STARTCHAR defaultchar
ENCODING 0
DWIDTH 10 0
BBX 10 2 0 0
BITMAP
FFC0
FFC0
ENDCHAR
STARTCHAR unencoded
ENCODING -1
BBX 1 1 0 0
BITMAP
80
ENDCHAR
STARTCHAR exclam
ENCODING 33
SWIDTH 500 0
DWIDTH 10 0
BBX 1 3 4 0
BITMAP
80
00
80
ENDCHAR
ENDFONT
";

    #[test]
    fn parses_header_and_properties() {
        let font = parse_bdf(SAMPLE).unwrap();
        assert!(font.name.starts_with("-misc-fixed"));
        assert_eq!(
            font.bounding_box,
            BoundingBox { width: 10, height: 20, x_offset: 0, y_offset: -4 }
        );
        assert_eq!(font.ascent, Some(16));
        assert_eq!(font.descent, Some(4));
        assert_eq!(font.default_char, Some(0));
        assert_eq!(font.baseline(), 16);
        assert_eq!(font.cell_size(), (10, 20));
    }

    #[test]
    fn skips_unencoded_glyphs() {
        let font = parse_bdf(SAMPLE).unwrap();
        assert_eq!(font.glyphs.len(), 2);
        let bang = font.glyph('!').unwrap();
        assert_eq!(bang.bbx.x_offset, 4);
        assert_eq!(bang.dwidth, Some(10));
        assert!(bang.is_set(0, 0) && !bang.is_set(0, 1) && bang.is_set(0, 2));
    }

    #[test]
    fn baseline_without_ascent_uses_bounding_box() {
        let src = SAMPLE.replace("FONT_ASCENT 16\n", "");
        let font = parse_bdf(&src).unwrap();
        assert_eq!(font.baseline(), 16);
    }

    #[test]
    fn short_bitmap_reports_line() {
        let src = "FONTBOUNDINGBOX 2 2 0 0\nSTARTCHAR A\nENCODING 65\nBBX 2 2 0 0\nBITMAP\n80\nENDCHAR\n";
        match parse_bdf(src) {
            Err(FontError::Syntax { line, .. }) => assert_eq!(line, 7),
            other => panic!("attendu Syntax, obtenu {other:?}"),
        }
    }

    #[test]
    fn bad_hex_is_rejected() {
        let src = "FONTBOUNDINGBOX 2 1 0 0\nSTARTCHAR A\nENCODING 65\nBBX 2 1 0 0\nBITMAP\nZZ\nENDCHAR\n";
        assert!(matches!(parse_bdf(src), Err(FontError::Syntax { line: 6, .. })));
    }

    #[test]
    fn missing_bounding_box_is_rejected() {
        assert!(matches!(
            parse_bdf("STARTFONT 2.1\nENDFONT\n"),
            Err(FontError::Syntax { line: 2, .. })
        ));
    }

    #[test]
    fn missing_bounding_box_without_endfont_reports_last_line() {
        let src = "STARTFONT 2.1\nFONT tiny\nCOMMENT pas de boîte\n";
        match parse_bdf(src) {
            Err(FontError::Syntax { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("FONTBOUNDINGBOX"));
            }
            other => panic!("attendu Syntax, obtenu {other:?}"),
        }
    }

    #[test]
    fn truncated_glyph_is_eof() {
        let src = "FONTBOUNDINGBOX 2 2 0 0\nSTARTCHAR A\nENCODING 65\n";
        assert!(matches!(parse_bdf(src), Err(FontError::UnexpectedEof("ENDCHAR"))));
    }

    #[test]
    fn endchar_without_startchar() {
        let src = "FONTBOUNDINGBOX 2 2 0 0\nENDCHAR\n";
        assert!(matches!(parse_bdf(src), Err(FontError::Syntax { line: 2, .. })));
    }

    #[test]
    fn wide_rows_use_two_bytes() {
        let font = parse_bdf(SAMPLE).unwrap();
        let block = font.glyph('\0').unwrap();
        assert_eq!(block.rows[0], vec![0xFF, 0xC0]);
        assert!(block.is_set(9, 1));
        assert!(!block.is_set(10, 1));
    }
}
