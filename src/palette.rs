//! Fixed output palette for animated mosaics.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

const WEB_SAFE_STEP: u8 = 0x33;

/// An indexed colour table of at most 256 entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    /// The 216 web-safe colours (blue varying fastest) followed by one fully
    /// transparent entry at index 216.
    pub fn web_safe_with_transparent() -> Self {
        let mut colors = Vec::with_capacity(217);
        for r in 0..6u8 {
            for g in 0..6u8 {
                for b in 0..6u8 {
                    let level = |v: u8| v * WEB_SAFE_STEP;
                    colors.push(Rgba([level(r), level(g), level(b), 255]));
                }
            }
        }
        colors.push(Rgba([0, 0, 0, 0]));
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// # Panics
    ///
    /// If `index` is not below [`Palette::len`].
    pub fn color(&self, index: u8) -> Rgba<u8> {
        self.colors[index as usize]
    }

    /// Index of the closest entry by squared RGBA distance; the earliest entry
    /// wins ties.
    pub fn nearest_index(&self, px: Rgba<u8>) -> u8 {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, c) in self.colors.iter().enumerate() {
            let dist: u32 = px
                .0
                .iter()
                .zip(c.0.iter())
                .map(|(&a, &b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum();
            if dist < best_dist {
                best = i;
                best_dist = dist;
                if dist == 0 {
                    break;
                }
            }
        }
        best as u8
    }

    /// Map every pixel of `image` to a palette index, row-major.
    pub fn quantize(&self, image: &RgbaImage) -> Vec<u8> {
        let mut cache: HashMap<[u8; 4], u8> = HashMap::new();
        image
            .pixels()
            .map(|&px| *cache.entry(px.0).or_insert_with(|| self.nearest_index(px)))
            .collect()
    }

    /// Expand row-major palette indices back into an RGBA image.
    ///
    /// `None` unless there is exactly one index per pixel and every index
    /// names a palette entry.
    pub fn expand(&self, width: u32, height: u32, indices: &[u8]) -> Option<RgbaImage> {
        let pixels: Vec<Rgba<u8>> = indices
            .iter()
            .map(|&i| self.colors.get(i as usize).copied())
            .collect::<Option<_>>()?;
        if pixels.len() as u64 != width as u64 * height as u64 {
            return None;
        }
        let raw = pixels.iter().flat_map(|p| p.0).collect();
        RgbaImage::from_raw(width, height, raw)
    }
}
