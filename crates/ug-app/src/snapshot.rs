use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use ug_core::surface::Surface;

/// Écrit une surface en PNG.
///
/// # Errors
/// Returns an error if the surface buffer is inconsistent or the file
/// cannot be written.
pub fn save_png(surface: &Surface, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(surface.width, surface.height, surface.data.clone())
        .context("Buffer de surface incohérent")?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!(
        "Capture {}x{} écrite dans {}",
        surface.width,
        surface.height,
        path.display()
    );
    Ok(())
}
