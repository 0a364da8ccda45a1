//! Per-frame mosaic rendering for animated sources.

use image::{Delay, Frame, RgbaImage};
use log::debug;
use rayon::prelude::*;

use crate::atlas::LuminanceAtlas;
use crate::mosaic;
use crate::palette::Palette;
use crate::{MosaicError, Result, DEFAULT_FRAME_DELAY_MS};

/// How output frame delays are chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameTiming {
    /// Every frame gets the same delay.
    Uniform(Delay),
    /// Each frame keeps the delay of the source frame it came from.
    Source,
}

impl Default for FrameTiming {
    fn default() -> Self {
        FrameTiming::Uniform(Delay::from_numer_denom_ms(DEFAULT_FRAME_DELAY_MS, 1))
    }
}

/// One palette-indexed output frame.
#[derive(Clone, Debug)]
pub struct PalettedFrame {
    pub width: u32,
    pub height: u32,
    /// Row-major palette indices, `width * height` entries.
    pub indices: Vec<u8>,
    pub delay: Delay,
}

/// Rendered animation sharing one palette across all frames.
#[derive(Clone, Debug)]
pub struct MosaicAnimation {
    pub palette: Palette,
    pub frames: Vec<PalettedFrame>,
}

impl MosaicAnimation {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames expanded to RGBA, in order, ready for a GIF encoder.
    ///
    /// Fails on the first frame whose indices do not cover `width * height`
    /// pixels or that names an entry outside the palette.
    pub fn to_rgba_frames(&self) -> Result<Vec<Frame>> {
        self.frames
            .iter()
            .enumerate()
            .map(|(index, f)| {
                let buffer = self
                    .palette
                    .expand(f.width, f.height, &f.indices)
                    .ok_or(MosaicError::MalformedFrame(index))?;
                Ok(Frame::from_parts(buffer, 0, 0, f.delay))
            })
            .collect()
    }
}

/// Render each decoded frame independently and quantize it to the web-safe
/// palette. Output order matches `frames`.
pub fn render_animation(
    frames: &[Frame],
    atlas: &LuminanceAtlas,
    timing: FrameTiming,
) -> Result<MosaicAnimation> {
    if frames.is_empty() {
        return Err(MosaicError::EmptyAnimation);
    }

    let palette = Palette::web_safe_with_transparent();
    let rendered: Vec<PalettedFrame> = frames
        .par_iter()
        .enumerate()
        .map(|(index, frame)| {
            let canvas = mosaic::render_mosaic(frame.buffer(), atlas);
            debug!("frame {} rendered at {}x{}", index, canvas.width(), canvas.height());
            quantize_frame(&canvas, &palette, delay_for(frame, timing))
        })
        .collect();

    Ok(MosaicAnimation { palette, frames: rendered })
}

fn quantize_frame(canvas: &RgbaImage, palette: &Palette, delay: Delay) -> PalettedFrame {
    PalettedFrame {
        width: canvas.width(),
        height: canvas.height(),
        indices: palette.quantize(canvas),
        delay,
    }
}

fn delay_for(frame: &Frame, timing: FrameTiming) -> Delay {
    match timing {
        FrameTiming::Uniform(delay) => delay,
        FrameTiming::Source => frame.delay(),
    }
}
