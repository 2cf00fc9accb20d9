//! Motifs multi-lignes → [`SpriteFrame`].

use std::collections::HashMap;

use ug_core::color::Rgb;

use crate::sprite::SpriteFrame;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Découpe un motif en frame.
///
/// 1. lignes vides (blancs uniquement) retirées en tête et en queue ;
/// 2. plus rien → une frame d'une ligne vide ;
/// 3. l'indentation commune des lignes non vides est retirée, les lignes
///    plus courtes que cette indentation deviennent vides ;
/// 4. lignes complétées par des espaces jusqu'à la plus longue.
///
/// Une grille de couleurs parallèle est construite seulement si
/// `char_colors` n'est pas vide.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use ug_engine::pattern::parse_pattern;
/// let frame = parse_pattern("\n   ab\n  c\n\n", &HashMap::new());
/// assert_eq!(frame.chars, vec![vec![' ', 'a', 'b'], vec!['c', ' ', ' ']]);
/// assert!(frame.fg_colors.is_none());
/// ```
#[must_use]
pub fn parse_pattern(pattern: &str, char_colors: &HashMap<char, Rgb>) -> SpriteFrame {
    let lines: Vec<&str> = pattern.split('\n').collect();
    let start = lines.iter().position(|l| !is_blank(l));
    let end = lines.iter().rposition(|l| !is_blank(l));
    let (Some(start), Some(end)) = (start, end) else {
        return SpriteFrame::new(vec![Vec::new()]);
    };
    let lines = &lines[start..=end];

    let indent = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let mut chars: Vec<Vec<char>> = lines
        .iter()
        .map(|line| line.chars().skip(indent).collect())
        .collect();
    let width = chars.iter().map(Vec::len).max().unwrap_or(0);

    let fg_colors = (!char_colors.is_empty()).then(|| {
        chars
            .iter()
            .map(|row| {
                let mut colors: Vec<Option<Rgb>> =
                    row.iter().map(|c| char_colors.get(c).copied()).collect();
                colors.resize(width, None);
                colors
            })
            .collect()
    });
    for row in &mut chars {
        row.resize(width, ' ');
    }

    SpriteFrame {
        chars,
        fg_colors,
        bg_colors: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_colors() -> HashMap<char, Rgb> {
        HashMap::new()
    }

    #[test]
    fn empty_and_blank_patterns() {
        for pattern in ["", "\n\n", "   \n\t\n  "] {
            let frame = parse_pattern(pattern, &no_colors());
            assert_eq!(frame.chars, vec![Vec::<char>::new()]);
            assert_eq!(frame.width(), 0);
            assert_eq!(frame.height(), 1);
        }
    }

    #[test]
    fn inner_blank_lines_are_kept() {
        let frame = parse_pattern("  a\n\n  b", &no_colors());
        assert_eq!(frame.chars, vec![vec!['a'], vec![' '], vec!['b']]);
    }

    #[test]
    fn short_whitespace_line_becomes_empty_row() {
        // La ligne du milieu (1 espace) est plus courte que l'indentation.
        let frame = parse_pattern("    xy\n \n    z", &no_colors());
        assert_eq!(frame.chars[1], vec![' ', ' ']);
        assert_eq!(frame.chars[2], vec!['z', ' ']);
    }

    #[test]
    fn char_colors_build_padded_grid() {
        let colors = HashMap::from([('@', (255, 255, 0)), ('|', (0, 0, 255))]);
        let frame = parse_pattern(" @\n/|\\", &colors);
        let grid = frame.fg_colors.unwrap();
        assert_eq!(grid[0], vec![None, Some((255, 255, 0)), None]);
        assert_eq!(grid[1], vec![None, Some((0, 0, 255)), None]);
    }

    #[test]
    fn unicode_indent_is_counted_in_chars() {
        let frame = parse_pattern("\u{3000}█\n\u{3000}▀", &no_colors());
        assert_eq!(frame.chars, vec![vec!['█'], vec!['▀']]);
    }
}
