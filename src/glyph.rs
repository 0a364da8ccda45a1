//! Glyph rasterization into square brightness tiles.

use image::{Rgba, RgbaImage};

use crate::luma;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A glyph rendered by a font face, before placement in a tile.
#[derive(Clone, Debug, Default)]
pub struct RasterGlyph {
    /// Top of the ink box, y-down relative to the baseline.
    pub ink_top: f32,
    /// Bottom of the ink box, y-down relative to the baseline.
    pub ink_bottom: f32,
    pub advance: f32,
    /// Left bearing of the coverage bitmap.
    pub left: i32,
    /// Offset of the bitmap's bottom edge above the baseline.
    pub bottom: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl RasterGlyph {
    /// Whole-pixel ink height, inclusive of both edges.
    pub fn ink_height(&self) -> i32 {
        self.ink_bottom.trunc() as i32 - self.ink_top.trunc() as i32 + 1
    }
}

/// Source of glyph outlines. Returns `None` when the face has no glyph for `ch`.
pub trait FontFace {
    fn glyph(&self, ch: char, px: f32) -> Option<RasterGlyph>;
}

impl FontFace for fontdue::Font {
    fn glyph(&self, ch: char, px: f32) -> Option<RasterGlyph> {
        if self.lookup_glyph_index(ch) == 0 {
            return None;
        }

        let (metrics, coverage) = self.rasterize(ch, px);
        let bounds = metrics.bounds;
        Some(RasterGlyph {
            ink_top: -(bounds.ymin + bounds.height),
            ink_bottom: -bounds.ymin,
            advance: metrics.advance_width,
            left: metrics.xmin,
            bottom: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            coverage,
        })
    }
}

/// A rendered tile and its mean brightness.
#[derive(Clone, Debug)]
pub struct GlyphTile {
    pub brightness: u8,
    pub image: RgbaImage,
}

/// Render `ch` black on white into a `width` x `height` tile.
///
/// The glyph is centred horizontally on its advance and vertically on its ink
/// box, then clipped to the tile.
pub fn rasterize_tile<F: FontFace + ?Sized>(
    face: &F,
    ch: char,
    width: u32,
    height: u32,
    font_size: f32,
) -> Option<GlyphTile> {
    let glyph = face.glyph(ch, font_size)?;

    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    let ink_height = glyph.ink_height();
    let advance = glyph.advance.trunc() as i32;
    let origin_x = (width as i32 - advance) / 2;
    let baseline = (height as i32 - ink_height) / 2 + ink_height;

    let x_offset = origin_x + glyph.left;
    let y_offset = baseline - glyph.bottom - glyph.height as i32;

    for sy in 0..glyph.height {
        for sx in 0..glyph.width {
            let tx = x_offset + sx as i32;
            let ty = y_offset + sy as i32;
            if tx >= 0 && tx < width as i32 && ty >= 0 && ty < height as i32 {
                let cov = glyph.coverage[sy * glyph.width + sx];
                let px = img.get_pixel_mut(tx as u32, ty as u32);
                let v = px.0[0].saturating_sub(cov);
                *px = Rgba([v, v, v, 255]);
            }
        }
    }

    let brightness = luma::mean_brightness(img.pixels());
    Some(GlyphTile { brightness, image: img })
}
