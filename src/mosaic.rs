//! Still-image mosaic composition.

use image::{DynamicImage, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::atlas::LuminanceAtlas;
use crate::luma;

/// Replace every pixel of `source` by the atlas tile nearest its brightness.
///
/// The canvas is `tile_size` times larger on each axis and starts fully
/// transparent; tiles are drawn over it, so the blank tile leaves it clear.
/// Source rows are rendered in parallel into disjoint canvas bands.
pub fn render_mosaic(source: &RgbaImage, atlas: &LuminanceAtlas) -> RgbaImage {
    let tile = atlas.tile_size();
    let (width, height) = source.dimensions();
    let mut canvas = RgbaImage::new(width * tile, height * tile);

    let band_width = width * tile;
    let band_len = (band_width * tile * 4) as usize;
    if band_len == 0 {
        return canvas;
    }

    canvas.par_chunks_mut(band_len).enumerate().for_each(|(row, band)| {
        for col in 0..width {
            let brightness = luma::brightness(*source.get_pixel(col, row as u32));
            draw_over(band, band_width, atlas.resolve(brightness), col * tile);
        }
    });

    canvas
}

/// [`render_mosaic`] for any decoded image.
pub fn render_image(image: &DynamicImage, atlas: &LuminanceAtlas) -> RgbaImage {
    render_mosaic(&image.to_rgba8(), atlas)
}

/// Source-over composite `tile` into a raw RGBA band at column `x0`.
fn draw_over(band: &mut [u8], band_width: u32, tile: &RgbaImage, x0: u32) {
    for (tx, ty, src) in tile.enumerate_pixels() {
        let idx = ((ty * band_width + x0 + tx) * 4) as usize;
        let dst = &mut band[idx..idx + 4];
        let out = blend_over(*src, Rgba([dst[0], dst[1], dst[2], dst[3]]));
        dst.copy_from_slice(&out.0);
    }
}

fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src.0[3] {
        0 => dst,
        255 => src,
        a => {
            let src_a = a as f32 / 255.0;
            let dst_a = dst.0[3] as f32 / 255.0;
            let out_a = src_a + dst_a * (1.0 - src_a);

            let mix = |s: u8, d: u8| -> u8 {
                let out = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
                out.round().clamp(0.0, 255.0) as u8
            };

            Rgba([
                mix(src.0[0], dst.0[0]),
                mix(src.0[1], dst.0[1]),
                mix(src.0[2], dst.0[2]),
                (out_a * 255.0).round() as u8,
            ])
        }
    }
}
