//! File I/O: fonts, still images and GIF animations.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use fontdue::{Font, FontSettings};
use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, DynamicImage, Frame, ImageFormat, RgbaImage};

use crate::animation::MosaicAnimation;
use crate::{MosaicError, Result};

/// Load a TrueType/OpenType font, picking `collection_index` from a
/// collection file.
pub fn load_font(path: impl AsRef<Path>, collection_index: u32) -> Result<Font> {
    let bytes = std::fs::read(path.as_ref())?;
    let settings = FontSettings { collection_index, ..FontSettings::default() };
    Font::from_bytes(bytes, settings).map_err(|e| MosaicError::Font(e.to_string()))
}

pub fn load_still(path: impl AsRef<Path>) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Decode every frame of a GIF, fully composited, in display order.
pub fn load_gif_frames(path: impl AsRef<Path>) -> Result<Vec<Frame>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let decoder = GifDecoder::new(reader)?;
    Ok(decoder.into_frames().collect_frames()?)
}

pub fn save_png(path: impl AsRef<Path>, canvas: &RgbaImage) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    canvas.write_to(&mut writer, ImageFormat::Png)?;
    writer.flush()?;
    Ok(())
}

/// Encode `animation` as an endlessly looping GIF.
///
/// The file is only created once encoding has succeeded.
pub fn save_gif(path: impl AsRef<Path>, animation: &MosaicAnimation) -> Result<()> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(animation.to_rgba_frames()?)?;
    }
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}
