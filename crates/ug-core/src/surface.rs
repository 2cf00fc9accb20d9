use rayon::prelude::*;

use crate::color::{Rgb, Rgba, scale_alpha};

/// Surface de pixels RGBA. Alpha droit, row-major, 4 bytes par pixel.
///
/// Toutes les opérations d'écriture sont clippées : des coordonnées hors
/// surface (y compris négatives) ne paniquent jamais.
///
/// # Example
/// ```
/// use ug_core::surface::Surface;
/// let s = Surface::new(10, 10);
/// assert_eq!(s.data.len(), 400);
/// assert_eq!(s.pixel(3, 3), (0, 0, 0, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Surface {
    /// Crée une surface transparente aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Crée une surface remplie d'une couleur.
    ///
    /// # Example
    /// ```
    /// use ug_core::surface::Surface;
    /// let s = Surface::filled(2, 2, (1, 2, 3, 255));
    /// assert_eq!(s.pixel(1, 1), (1, 2, 3, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut surface = Self::new(width, height);
        surface.fill(color);
        surface
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Accès au pixel (x, y). Hors surface → transparent.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return (0, 0, 0, 0);
        }
        let idx = self.index(x, y);
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit un pixel sans mélange. Hors surface → ignoré.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, (r, g, b, a): Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.data[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
    }

    /// Remplace tous les pixels par `color` (pas de mélange).
    pub fn fill(&mut self, (r, g, b, a): Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, a]);
        }
    }

    /// Remplace les pixels d'un rectangle par `color`, clippé à la surface.
    ///
    /// # Example
    /// ```
    /// use ug_core::surface::Surface;
    /// let mut s = Surface::new(4, 4);
    /// s.fill_rect(-2, -2, 3, 3, (255, 0, 0, 255));
    /// assert_eq!(s.pixel(0, 0), (255, 0, 0, 255));
    /// assert_eq!(s.pixel(1, 1), (0, 0, 0, 0));
    /// ```
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, (r, g, b, a): Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };
        for py in y0..y1 {
            let start = self.index(x0, py);
            let end = self.index(x1, py);
            for px in self.data[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&[r, g, b, a]);
            }
        }
    }

    /// Mélange un masque de couverture teinté `fg` (source-over).
    ///
    /// `mask` contient `mask_width * mask_height` valeurs de couverture
    /// [0,255], multipliées par `alpha`.
    #[allow(clippy::too_many_arguments)]
    pub fn blend_mask(
        &mut self,
        x: i32,
        y: i32,
        mask: &[u8],
        mask_width: u32,
        mask_height: u32,
        fg: Rgb,
        alpha: u8,
    ) {
        if alpha == 0 || mask.len() < mask_width as usize * mask_height as usize {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(x, y, mask_width, mask_height) else {
            return;
        };
        for py in y0..y1 {
            let my = (i64::from(py) - i64::from(y)) as usize;
            for px in x0..x1 {
                let mx = (i64::from(px) - i64::from(x)) as usize;
                let coverage = mask[my * mask_width as usize + mx];
                if coverage == 0 {
                    continue;
                }
                let idx = self.index(px, py);
                blend_over(
                    &mut self.data[idx..idx + 4],
                    fg,
                    u32::from(scale_alpha(coverage, alpha)),
                );
            }
        }
    }

    /// Compose `src` sur cette surface (source-over) avec un alpha global.
    ///
    /// # Example
    /// ```
    /// use ug_core::surface::Surface;
    /// let mut dst = Surface::filled(4, 4, (0, 0, 0, 255));
    /// let src = Surface::filled(2, 2, (200, 100, 50, 255));
    /// dst.blit(&src, 3, 3, 255);
    /// assert_eq!(dst.pixel(3, 3), (200, 100, 50, 255));
    /// assert_eq!(dst.pixel(2, 2), (0, 0, 0, 255));
    /// ```
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(x, y, src.width, src.height) else {
            return;
        };
        for py in y0..y1 {
            let sy = (i64::from(py) - i64::from(y)) as u32;
            for px in x0..x1 {
                let sx = (i64::from(px) - i64::from(x)) as u32;
                let (r, g, b, a) = src.pixel(sx, sy);
                let sa = u32::from(scale_alpha(a, alpha));
                let idx = self.index(px, py);
                blend_over(&mut self.data[idx..idx + 4], (r, g, b), sa);
            }
        }
    }

    /// Rééchantillonnage plus-proche-voisin, lignes traitées en parallèle.
    ///
    /// # Example
    /// ```
    /// use ug_core::surface::Surface;
    /// let mut s = Surface::new(2, 1);
    /// s.set_pixel(1, 0, (9, 9, 9, 255));
    /// let big = s.scale_nearest(4, 2);
    /// assert_eq!(big.pixel(3, 1), (9, 9, 9, 255));
    /// assert_eq!(big.pixel(1, 0), (0, 0, 0, 0));
    /// ```
    #[must_use]
    pub fn scale_nearest(&self, width: u32, height: u32) -> Surface {
        let mut out = Surface::new(width, height);
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        let stride = width as usize * 4;
        out.data
            .par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                let sy = (y as u64 * u64::from(self.height) / u64::from(height)) as u32;
                for (x, px) in row.chunks_exact_mut(4).enumerate() {
                    let sx = (x as u64 * u64::from(self.width) / u64::from(width)) as u32;
                    let si = self.index(sx, sy);
                    px.copy_from_slice(&self.data[si..si + 4]);
                }
            });
        out
    }

    /// Met la surface à l'échelle d'un écran `display_width × display_height`
    /// en conservant le ratio (letterbox/pillarbox), fond noir opaque.
    #[must_use]
    pub fn letterbox(&self, display_width: u32, display_height: u32) -> Surface {
        let mut display = Surface::filled(display_width, display_height, (0, 0, 0, 255));
        let (ox, oy, w, h) = fit_rect(self.width, self.height, display_width, display_height);
        if w == 0 || h == 0 {
            return display;
        }
        let scaled = self.scale_nearest(w, h);
        display.blit(&scaled, ox as i32, oy as i32, 255);
        display
    }

    /// Intersection d'un rectangle signé avec la surface → (x0, y0, x1, y1).
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Rectangle centré qui fait tenir `src` dans `dst` sans déformation.
///
/// Retourne `(offset_x, offset_y, width, height)`.
///
/// # Example
/// ```
/// use ug_core::surface::fit_rect;
/// assert_eq!(fit_rect(800, 500, 1920, 1080), (96, 0, 1728, 1080));
/// ```
#[must_use]
pub fn fit_rect(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> (u32, u32, u32, u32) {
    if src_width == 0 || src_height == 0 {
        return (0, 0, 0, 0);
    }
    let scale = (f64::from(dst_width) / f64::from(src_width))
        .min(f64::from(dst_height) / f64::from(src_height));
    let width = ((f64::from(src_width) * scale) as u32).min(dst_width);
    let height = ((f64::from(src_height) * scale) as u32).min(dst_height);
    ((dst_width - width) / 2, (dst_height - height) / 2, width, height)
}

/// Source-over en alpha droit ; `sa` ∈ [0,255].
#[inline(always)]
fn blend_over(dst: &mut [u8], (r, g, b): Rgb, sa: u32) {
    if sa == 0 {
        return;
    }
    if sa >= 255 {
        dst.copy_from_slice(&[r, g, b, 255]);
        return;
    }
    let dw = u32::from(dst[3]) * (255 - sa) / 255;
    let out_a = sa + dw;
    if out_a == 0 {
        return;
    }
    dst[0] = ((u32::from(r) * sa + u32::from(dst[0]) * dw) / out_a) as u8;
    dst[1] = ((u32::from(g) * sa + u32::from(dst[1]) * dw) / out_a) as u8;
    dst[2] = ((u32::from(b) * sa + u32::from(dst[2]) * dw) / out_a) as u8;
    dst[3] = out_a as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_alpha_over_opaque_black() {
        let mut s = Surface::filled(1, 1, (0, 0, 0, 255));
        s.blend_mask(0, 0, &[255], 1, 1, (200, 100, 50), 128);
        let (r, g, b, a) = s.pixel(0, 0);
        assert_eq!(a, 255);
        assert_eq!((r, g, b), (100, 50, 25));
    }

    #[test]
    fn blend_onto_transparent_keeps_source_color() {
        let mut s = Surface::new(1, 1);
        s.blend_mask(0, 0, &[255], 1, 1, (10, 20, 30), 100);
        assert_eq!(s.pixel(0, 0), (10, 20, 30, 100));
    }

    #[test]
    fn zero_coverage_leaves_pixel() {
        let mut s = Surface::filled(2, 1, (5, 5, 5, 255));
        s.blend_mask(0, 0, &[0, 255], 2, 1, (255, 255, 255), 255);
        assert_eq!(s.pixel(0, 0), (5, 5, 5, 255));
        assert_eq!(s.pixel(1, 0), (255, 255, 255, 255));
    }

    #[test]
    fn blit_negative_offset_is_clipped() {
        let mut dst = Surface::new(3, 3);
        let mut src = Surface::new(2, 2);
        src.set_pixel(1, 1, (1, 2, 3, 255));
        dst.blit(&src, -1, -1, 255);
        assert_eq!(dst.pixel(0, 0), (1, 2, 3, 255));
        assert_eq!(dst.pixel(1, 1), (0, 0, 0, 0));
    }

    #[test]
    fn blit_fully_outside_is_noop() {
        let mut dst = Surface::filled(2, 2, (7, 7, 7, 255));
        let src = Surface::filled(2, 2, (255, 0, 0, 255));
        dst.blit(&src, 5, 0, 255);
        dst.blit(&src, -2, 0, 255);
        assert!(dst.data.chunks_exact(4).all(|p| p == [7, 7, 7, 255]));
    }

    #[test]
    fn fit_rect_pillarbox_and_letterbox() {
        // Écran plus haut que large : bandes en haut et en bas.
        assert_eq!(fit_rect(800, 500, 800, 1000), (0, 250, 800, 500));
        assert_eq!(fit_rect(0, 10, 100, 100), (0, 0, 0, 0));
    }

    #[test]
    fn letterbox_centres_frame_on_black() {
        let frame = Surface::filled(2, 1, (255, 255, 255, 255));
        let display = frame.letterbox(4, 4);
        // 2×1 → 4×2, centré verticalement (offset 1).
        assert_eq!(display.pixel(0, 0), (0, 0, 0, 255));
        assert_eq!(display.pixel(0, 1), (255, 255, 255, 255));
        assert_eq!(display.pixel(3, 2), (255, 255, 255, 255));
        assert_eq!(display.pixel(3, 3), (0, 0, 0, 255));
    }
}
