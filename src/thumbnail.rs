//! PAE thumbnail rendering (PNG output)
//!
//! Each render is a self-contained, stateless operation: fresh buffer in,
//! PNG file out. The image is a square nearest-neighbor downsample of the
//! matrix with no axes or ticks, colored dark-green (low error) to white
//! (high error).

use anyhow::{bail, Context, Result};
use image::{ImageBuffer, Rgb};
use std::path::Path;

/// Fixed thumbnail filename inside each model directory
pub const THUMBNAIL_FILE: &str = "pae_thumbnail.png";

/// Render a PAE matrix to a square PNG of `size_px` × `size_px` pixels.
///
/// Rows of differing length are tolerated: cells past the end of a short
/// row render at the maximum-error color.
pub fn render_pae_thumbnail(pae: &[Vec<f64>], path: &Path, size_px: u32) -> Result<()> {
    if size_px == 0 {
        bail!("thumbnail size must be > 0");
    }
    let n_rows = pae.len();
    if n_rows == 0 || pae.iter().all(|row| row.is_empty()) {
        bail!("PAE matrix is empty");
    }

    let max_value = pae
        .iter()
        .flat_map(|row| row.iter().copied())
        .fold(0.0f64, f64::max);
    let scale = if max_value > 0.0 { max_value } else { 1.0 };

    let img = ImageBuffer::from_fn(size_px, size_px, |x, y| {
        let row = &pae[(y as usize * n_rows) / size_px as usize];
        let value = if row.is_empty() {
            scale
        } else {
            let col = (x as usize * row.len()) / size_px as usize;
            row.get(col).copied().unwrap_or(scale)
        };
        pae_color(value / scale)
    });

    img.save(path)
        .with_context(|| format!("Failed to write thumbnail: {}", path.display()))?;
    Ok(())
}

/// Map a normalized PAE value [0, 1] to the thumbnail color ramp:
/// dark green (confident) -> white (uncertain)
fn pae_color(value: f64) -> Rgb<u8> {
    let t = value.clamp(0.0, 1.0);
    Rgb([
        (255.0 * t) as u8,
        (68.0 + 187.0 * t) as u8,
        (27.0 + 228.0 * t) as u8,
    ])
}
