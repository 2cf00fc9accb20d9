/// Couleur RGB, composantes [0,255].
pub type Rgb = (u8, u8, u8);

/// Couleur RGBA, alpha droit (non prémultiplié).
pub type Rgba = (u8, u8, u8, u8);

/// Fully transparent black, the default window background.
pub const TRANSPARENT: Rgba = (0, 0, 0, 0);

/// Default foreground colour for text and sprites.
pub const WHITE: Rgb = (255, 255, 255);

/// Multiply an alpha value by a second alpha, both in [0,255].
///
/// # Example
/// ```
/// use ug_core::color::scale_alpha;
/// assert_eq!(scale_alpha(255, 128), 128);
/// assert_eq!(scale_alpha(200, 0), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn scale_alpha(a: u8, alpha: u8) -> u8 {
    (u32::from(a) * u32::from(alpha) / 255) as u8
}

/// Linear blend from `from` to `to` by `t` ∈ [0,255] (255 = `to`).
///
/// # Example
/// ```
/// use ug_core::color::lerp_rgb;
/// assert_eq!(lerp_rgb((0, 0, 0), (255, 255, 255), 255), (255, 255, 255));
/// assert_eq!(lerp_rgb((10, 20, 30), (255, 255, 255), 0), (10, 20, 30));
/// ```
#[must_use]
pub fn lerp_rgb(from: Rgb, to: Rgb, t: u8) -> Rgb {
    let t = u32::from(t);
    let mix = |a: u8, b: u8| ((u32::from(a) * (255 - t) + u32::from(b) * t) / 255) as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_alpha_is_multiplicative() {
        assert_eq!(scale_alpha(255, 255), 255);
        assert_eq!(scale_alpha(128, 128), 64);
        assert_eq!(scale_alpha(0, 255), 0);
    }

    #[test]
    fn lerp_midpoint() {
        let (r, g, b) = lerp_rgb((0, 100, 200), (200, 100, 0), 128);
        assert!((i16::from(r) - 100).abs() <= 1);
        assert_eq!(g, 100);
        assert!((i16::from(b) - 100).abs() <= 1);
    }
}
