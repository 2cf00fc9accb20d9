//! Glyphes dessinés procéduralement.
//!
//! Couvre les éléments de bloc (U+2580–U+259F) et les coins biseautés
//! "Symbols for Legacy Computing" (U+1FB3C–U+1FB67), absents de la plupart
//! des polices BDF, plus l'espace et un glyphe "tofu" de remplacement.

use crate::glyph::GlyphMask;

/// Premier code point des coins biseautés.
pub const WEDGE_FIRST: u32 = 0x1FB3C;
/// Dernier code point des coins biseautés.
pub const WEDGE_LAST: u32 = 0x1FB67;

/// Quadrants : bits haut-gauche, haut-droit, bas-gauche, bas-droit.
const UL: u8 = 1;
const UR: u8 = 2;
const LL: u8 = 4;
const LR: u8 = 8;

/// U+2596 à U+259F.
const QUADRANTS: [u8; 10] = [
    LL,
    LR,
    UL,
    UL | LL | LR,
    UL | LR,
    UL | UR | LL,
    UL | UR | LR,
    UR,
    UR | LL,
    UR | LL | LR,
];

#[derive(Clone, Copy)]
enum Corner {
    BottomLeft,
    BottomRight,
}

const T1: f32 = 1.0 / 3.0;
const T2: f32 = 2.0 / 3.0;

/// Segment (a → b) dans le carré unité (y vers le bas) et coin de référence
/// du côté rempli. L'entrée `i + 22` est le complément de l'entrée `i`.
const WEDGES: [((f32, f32), (f32, f32), Corner); 22] = [
    ((0.0, T2), (0.5, 1.0), Corner::BottomLeft),
    ((0.0, T2), (1.0, 1.0), Corner::BottomLeft),
    ((0.0, T1), (0.5, 1.0), Corner::BottomLeft),
    ((0.0, T1), (1.0, 1.0), Corner::BottomLeft),
    ((0.0, 0.0), (0.5, 1.0), Corner::BottomLeft),
    ((0.0, T1), (0.5, 0.0), Corner::BottomRight),
    ((0.0, T1), (1.0, 0.0), Corner::BottomRight),
    ((0.0, T2), (0.5, 0.0), Corner::BottomRight),
    ((0.0, T2), (1.0, 0.0), Corner::BottomRight),
    ((0.0, 1.0), (0.5, 0.0), Corner::BottomRight),
    ((0.0, T2), (1.0, T1), Corner::BottomRight),
    ((0.5, 1.0), (1.0, T2), Corner::BottomRight),
    ((0.0, 1.0), (1.0, T2), Corner::BottomRight),
    ((0.5, 1.0), (1.0, T1), Corner::BottomRight),
    ((0.0, 1.0), (1.0, T1), Corner::BottomRight),
    ((0.5, 1.0), (1.0, 0.0), Corner::BottomRight),
    ((0.5, 0.0), (1.0, T1), Corner::BottomLeft),
    ((0.0, 0.0), (1.0, T1), Corner::BottomLeft),
    ((0.5, 0.0), (1.0, T2), Corner::BottomLeft),
    ((0.0, 0.0), (1.0, T2), Corner::BottomLeft),
    ((0.5, 0.0), (1.0, 1.0), Corner::BottomLeft),
    ((0.0, T1), (1.0, T2), Corner::BottomLeft),
];

/// Tous les caractères dessinables sans police.
pub fn procedural_chars() -> impl Iterator<Item = char> {
    std::iter::once(0x20u32)
        .chain(0x2580..=0x259F)
        .chain(WEDGE_FIRST..=WEDGE_LAST)
        .filter_map(char::from_u32)
}

/// Dessine `ch` dans une cellule `width × height`, ou `None` si le
/// caractère n'est pas couvert.
///
/// # Example
/// ```
/// use ug_font::builtin::procedural_mask;
/// let half = procedural_mask('▀', 4, 8).unwrap();
/// assert_eq!(half.get(0, 3), 255);
/// assert_eq!(half.get(0, 4), 0);
/// assert!(procedural_mask('A', 4, 8).is_none());
/// ```
#[must_use]
pub fn procedural_mask(ch: char, width: u32, height: u32) -> Option<GlyphMask> {
    let cp = ch as u32;
    let mut mask = GlyphMask::empty(width, height);
    match cp {
        0x20 => {}
        0x2580 => fill_rows(&mut mask, 0, height / 2),
        0x2581..=0x2587 => {
            let rows = eighths(height, cp - 0x2580);
            fill_rows(&mut mask, height - rows, height);
        }
        0x2588 => fill_rows(&mut mask, 0, height),
        0x2589..=0x258F => fill_cols(&mut mask, 0, eighths(width, 0x2590 - cp)),
        0x2590 => fill_cols(&mut mask, width / 2, width),
        0x2591..=0x2593 => shade(&mut mask, cp),
        0x2594 => fill_rows(&mut mask, 0, eighths(height, 1)),
        0x2595 => fill_cols(&mut mask, width - eighths(width, 1), width),
        0x2596..=0x259F => quadrants(&mut mask, QUADRANTS[(cp - 0x2596) as usize]),
        WEDGE_FIRST..=WEDGE_LAST => wedge(&mut mask, (cp - WEDGE_FIRST) as usize),
        _ => return None,
    }
    Some(mask)
}

/// Boîte creuse pour les caractères introuvables.
///
/// # Example
/// ```
/// use ug_font::builtin::tofu;
/// let mask = tofu(6, 10);
/// assert_eq!(mask.get(1, 1), 255);
/// assert_eq!(mask.get(2, 5), 0);
/// ```
#[must_use]
pub fn tofu(width: u32, height: u32) -> GlyphMask {
    let mut mask = GlyphMask::empty(width, height);
    if width < 3 || height < 3 {
        fill_rows(&mut mask, 0, height);
        return mask;
    }
    let (x0, y0, x1, y1) = (1, 1, width - 2, height - 2);
    for x in x0..=x1 {
        mask.set(x, y0);
        mask.set(x, y1);
    }
    for y in y0..=y1 {
        mask.set(x0, y);
        mask.set(x1, y);
    }
    mask
}

/// `n/8` de `size`, arrondi, au moins 1 pixel.
fn eighths(size: u32, n: u32) -> u32 {
    ((size * n + 4) / 8).clamp(1, size.max(1)).min(size)
}

fn fill_rows(mask: &mut GlyphMask, y0: u32, y1: u32) {
    for y in y0..y1 {
        for x in 0..mask.width {
            mask.set(x, y);
        }
    }
}

fn fill_cols(mask: &mut GlyphMask, x0: u32, x1: u32) {
    for y in 0..mask.height {
        for x in x0..x1 {
            mask.set(x, y);
        }
    }
}

fn shade(mask: &mut GlyphMask, cp: u32) {
    for y in 0..mask.height {
        for x in 0..mask.width {
            let lit = match cp {
                0x2591 => x % 2 == 0 && y % 2 == 0,
                0x2592 => (x + y) % 2 == 0,
                _ => !(x % 2 == 1 && y % 2 == 1),
            };
            if lit {
                mask.set(x, y);
            }
        }
    }
}

fn quadrants(mask: &mut GlyphMask, bits: u8) {
    let (hw, hh) = (mask.width / 2, mask.height / 2);
    for y in 0..mask.height {
        for x in 0..mask.width {
            let bit = match (x < hw, y < hh) {
                (true, true) => UL,
                (false, true) => UR,
                (true, false) => LL,
                (false, false) => LR,
            };
            if bits & bit != 0 {
                mask.set(x, y);
            }
        }
    }
}

fn wedge(mask: &mut GlyphMask, index: usize) {
    let complement = index >= WEDGES.len();
    let ((ax, ay), (bx, by), corner) = WEDGES[index % WEDGES.len()];
    let (cx, cy) = match corner {
        Corner::BottomLeft => (0.0, 1.0),
        Corner::BottomRight => (1.0, 1.0),
    };
    let side = |px: f32, py: f32| (bx - ax) * (py - ay) - (by - ay) * (px - ax);
    let reference = side(cx, cy);
    let (w, h) = (mask.width as f32, mask.height as f32);
    for y in 0..mask.height {
        for x in 0..mask.width {
            let s = side((x as f32 + 0.5) / w, (y as f32 + 0.5) / h);
            let on_line = s.abs() < 1e-6;
            let same = s * reference > 0.0;
            let lit = if complement { on_line || !same } else { on_line || same };
            if lit {
                mask.set(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(ch: char) -> GlyphMask {
        procedural_mask(ch, 8, 16).unwrap()
    }

    #[test]
    fn full_block_and_space() {
        assert_eq!(mask('█').lit_count(), 128);
        assert!(mask(' ').is_empty());
    }

    #[test]
    fn lower_and_left_eighths() {
        // ▂ : 2/8 de 16 = 4 lignes en bas.
        let lower = mask('▂');
        assert_eq!(lower.lit_count(), 4 * 8);
        assert_eq!(lower.get(0, 12), 255);
        assert_eq!(lower.get(0, 11), 0);
        // ▊ : 6/8 de 8 = 6 colonnes à gauche.
        let left = mask('▊');
        assert_eq!(left.lit_count(), 6 * 16);
        assert_eq!(left.get(5, 0), 255);
        assert_eq!(left.get(6, 0), 0);
    }

    #[test]
    fn right_half_and_edges() {
        let right = mask('▐');
        assert_eq!(right.get(4, 0), 255);
        assert_eq!(right.get(3, 0), 0);
        assert_eq!(mask('▔').lit_count(), 2 * 8);
        let edge = mask('▕');
        assert_eq!(edge.get(7, 3), 255);
        assert_eq!(edge.get(6, 3), 0);
    }

    #[test]
    fn shades_get_darker() {
        let light = mask('░').lit_count();
        let medium = mask('▒').lit_count();
        let dark = mask('▓').lit_count();
        assert_eq!((light, medium, dark), (32, 64, 96));
    }

    #[test]
    fn quadrant_bits() {
        let q = mask('▚');
        assert_eq!(q.get(0, 0), 255);
        assert_eq!(q.get(7, 15), 255);
        assert_eq!(q.get(7, 0), 0);
        assert_eq!(q.get(0, 15), 0);
        assert_eq!(mask('▟').lit_count(), 3 * 32);
    }

    #[test]
    fn wedge_and_complement_cover_cell() {
        for i in 0..22u32 {
            let a = procedural_mask(char::from_u32(WEDGE_FIRST + i).unwrap(), 8, 16).unwrap();
            let b = procedural_mask(char::from_u32(WEDGE_FIRST + i + 22).unwrap(), 8, 16).unwrap();
            for y in 0..16 {
                for x in 0..8 {
                    assert!(a.get(x, y) == 255 || b.get(x, y) == 255, "trou en ({x},{y}) pour {i}");
                }
            }
        }
    }

    #[test]
    fn first_wedge_fills_bottom_left() {
        let w = mask('\u{1FB3C}');
        assert_eq!(w.get(0, 15), 255);
        assert_eq!(w.get(7, 0), 0);
        assert_eq!(w.get(7, 15), 0);
    }

    #[test]
    fn every_procedural_char_draws() {
        assert_eq!(procedural_chars().count(), 1 + 32 + 44);
        assert!(procedural_chars().all(|ch| procedural_mask(ch, 5, 8).is_some()));
    }

    #[test]
    fn tofu_is_hollow() {
        let t = tofu(8, 16);
        assert_eq!(t.get(0, 0), 0);
        assert_eq!(t.get(1, 1), 255);
        assert_eq!(t.get(6, 14), 255);
        assert_eq!(t.get(4, 8), 0);
        assert_eq!(tofu(2, 2).lit_count(), 4);
    }
}
