//! Tile sampling: averages the pixels under one grid cell.

use image::RgbaImage;

use crate::grid::GridSpec;

/// Integer-averaged RGBA color of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TileColor {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

/// Averages the pixel rectangle belonging to cell `(x, y)`.
///
/// The rectangle is clamped to the image bounds, so the last row/column can
/// fall short of a full step when the legacy vertical step overshoots the
/// padded height. A rectangle clamped down to zero area averages to fully
/// transparent rather than erroring.
///
/// Channels are summed independently with no alpha premultiplication; a
/// half-transparent tile's RGB average still includes the colors of its
/// see-through pixels. With `track_alpha` off the source is treated as
/// opaque and alpha is pinned to 255.
pub fn average_tile(
    img: &RgbaImage,
    spec: &GridSpec,
    x: u32,
    y: u32,
    track_alpha: bool,
) -> TileColor {
    let origin_x = x * spec.step_x;
    let origin_y = y * spec.step_y;

    let width = spec.step_x.min(img.width().saturating_sub(origin_x));
    let height = spec.step_y.min(img.height().saturating_sub(origin_y));
    if width == 0 || height == 0 {
        return TileColor::TRANSPARENT;
    }

    let (mut r, mut g, mut b, mut a) = (0u64, 0u64, 0u64, 0u64);
    for py in origin_y..origin_y + height {
        for px in origin_x..origin_x + width {
            let p = img.get_pixel(px, py);
            r += p[0] as u64;
            g += p[1] as u64;
            b += p[2] as u64;
            a += p[3] as u64;
        }
    }

    let count = width as u64 * height as u64;
    TileColor {
        r: (r / count) as u8,
        g: (g / count) as u8,
        b: (b / count) as u8,
        a: if track_alpha { (a / count) as u8 } else { 255 },
    }
}
