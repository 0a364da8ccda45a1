//! Rec. 709 brightness shared by tile measurement and pixel sampling.

use image::Rgba;

// Weights scaled by 10_000 so the arithmetic stays integral.
const WEIGHT_R: u64 = 2126;
const WEIGHT_G: u64 = 7152;
const WEIGHT_B: u64 = 722;
const WEIGHT_SUM: u64 = 10_000;

/// Brightness of one pixel in [0, 255].
///
/// Channels are widened to 16 bits and premultiplied by alpha before
/// weighting, then the weighted sum is scaled back to 8 bits and truncated.
/// A fully transparent pixel is always 0.
///
/// The weights are exact integers on purpose: opaque white is 255 and an
/// opaque gray `v` measures `v`, where float weights summing to just under
/// one would truncate to `v - 1` for some grays.
pub fn brightness(pixel: Rgba<u8>) -> u8 {
    let [r, g, b, a] = pixel.0;
    let a16 = a as u64 * 257;
    let premul = |c: u8| c as u64 * 257 * a16 / 0xffff;

    let weighted = WEIGHT_R * premul(r) + WEIGHT_G * premul(g) + WEIGHT_B * premul(b);
    // 16-bit -> 8-bit is a division by 257.
    (weighted / (WEIGHT_SUM * 257)) as u8
}

/// Integer mean brightness over every pixel of `pixels`.
pub fn mean_brightness<'a>(pixels: impl IntoIterator<Item = &'a Rgba<u8>>) -> u8 {
    let (sum, count) = pixels
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), p| (sum + brightness(*p) as u64, count + 1));
    if count == 0 {
        return 0;
    }
    (sum / count) as u8
}
