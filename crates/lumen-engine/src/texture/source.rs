use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

/// Decodes any `image`-supported file into 8-bit RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode texture {}", path.display()))?
        .into_rgba8();

    let (w, h) = image.dimensions();
    anyhow::ensure!(w > 0 && h > 0, "texture {} has zero size", path.display());

    log::debug!("loaded texture {} ({w}x{h})", path.display());
    Ok(image)
}

/// Square checkerboard of `cells` x `cells` squares alternating `a` and `b`.
///
/// The top-left cell is `a`. `cells` is clamped to `1..=size`.
pub fn checkerboard(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    let size = size.max(1);
    let cell = (size / cells.clamp(1, size)).max(1);

    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { Rgba(a) } else { Rgba(b) }
    })
}

/// Opaque fallback texture used when no image is supplied or decoding fails.
pub fn default_texture() -> RgbaImage {
    checkerboard(256, 8, [235, 235, 235, 255], [40, 90, 160, 255])
}
