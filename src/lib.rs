//! Image to glyph-tile mosaic converter.
//!
//! Every source pixel becomes a `SQUARE_PIXELS` square tile showing the
//! character whose rendered brightness is closest to the pixel's.

pub mod animation;
pub mod atlas;
pub mod codec;
pub mod glyph;
pub mod luma;
pub mod mosaic;
pub mod palette;
pub mod resolve;

pub use animation::{FrameTiming, MosaicAnimation, PalettedFrame};
pub use atlas::{AtlasReportEntry, LuminanceAtlas};
pub use glyph::{FontFace, GlyphTile, RasterGlyph};
pub use palette::Palette;

use std::path::Path;

use image::{DynamicImage, Frame, RgbaImage};
use log::info;
use thiserror::Error;

/// Side length of every glyph tile and output block, in pixels.
pub const SQUARE_PIXELS: u32 = 5;

/// Glyph rendering size; one point per pixel at 72 DPI.
pub const FONT_SIZE: f32 = SQUARE_PIXELS as f32;

/// Characters eligible to become tiles, in insertion order.
pub const CHARSET: &str = concat!(
    " .,;?!|-_~`@#$%^&*()=+",
    "abcdefghijklmnopqrstuvxxyz",
    "ABCDEFGHIJKLMNOPQRSTUVXXYZ",
    "0123456789",
    "一二三四五六七八九十墨▇",
);

/// Uniform animation frame delay.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 10;

#[derive(Error, Debug)]
pub enum MosaicError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Font error: {0}")]
    Font(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Animation has no frames")]
    EmptyAnimation,
    #[error("Frame {0} does not match its size or palette")]
    MalformedFrame(usize),
}

pub type Result<T> = std::result::Result<T, MosaicError>;

/// Main converter: one atlas, many conversions.
pub struct Converter {
    atlas: LuminanceAtlas,
    timing: FrameTiming,
}

impl Converter {
    /// Load the font at `font_path` and build the atlas from [`CHARSET`].
    pub fn new(font_path: impl AsRef<Path>, collection_index: u32) -> Result<Self> {
        let font = codec::load_font(font_path, collection_index)?;
        Ok(Self::from_face(&font))
    }

    pub fn from_face<F: FontFace + ?Sized>(face: &F) -> Self {
        Self::from_atlas(LuminanceAtlas::build(CHARSET.chars(), face, SQUARE_PIXELS, FONT_SIZE))
    }

    pub fn from_atlas(atlas: LuminanceAtlas) -> Self {
        Self { atlas, timing: FrameTiming::default() }
    }

    pub fn with_timing(mut self, timing: FrameTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn atlas(&self) -> &LuminanceAtlas {
        &self.atlas
    }

    pub fn convert(&self, image: &DynamicImage) -> RgbaImage {
        mosaic::render_image(image, &self.atlas)
    }

    pub fn convert_frames(&self, frames: &[Frame]) -> Result<MosaicAnimation> {
        animation::render_animation(frames, &self.atlas, self.timing)
    }

    /// Decode a still image, render it and write the mosaic as PNG.
    pub fn convert_still_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<()> {
        let image = codec::load_still(input.as_ref())?;
        let canvas = self.convert(&image);
        codec::save_png(output.as_ref(), &canvas)?;
        info!("Png done: {}", output.as_ref().display());
        Ok(())
    }

    /// Decode a GIF, render each frame and write the mosaic GIF.
    pub fn convert_gif_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<()> {
        let frames = codec::load_gif_frames(input.as_ref())?;
        let animation = self.convert_frames(&frames)?;
        codec::save_gif(output.as_ref(), &animation)?;
        info!("Gif done: {} ({} frames)", output.as_ref().display(), animation.len());
        Ok(())
    }
}
