//! Brightness-keyed glyph tile atlas.

use std::collections::BTreeMap;

use image::RgbaImage;
use log::{debug, warn};
use serde::Serialize;

use crate::glyph::{self, FontFace};
use crate::resolve;

struct AtlasEntry {
    tile: RgbaImage,
    glyph: Option<char>,
}

/// One row of [`LuminanceAtlas::report`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AtlasReportEntry {
    pub brightness: u8,
    /// `None` for the transparent blank tile.
    pub glyph: Option<char>,
}

/// Immutable mapping from brightness to a glyph tile.
///
/// Brightness 0 is seeded with a fully transparent tile before any glyph is
/// rasterized. A glyph measuring the same brightness as an earlier entry
/// replaces it, so the last character in charset order wins.
pub struct LuminanceAtlas {
    tile_size: u32,
    entries: BTreeMap<u8, AtlasEntry>,
    keys: Vec<u8>,
}

impl LuminanceAtlas {
    /// Rasterize every character of `charset` at `font_size` into square
    /// tiles of `tile_size` pixels.
    ///
    /// Characters the face cannot render are skipped. A face that renders
    /// nothing yields an atlas holding only the blank tile.
    pub fn build<F, I>(charset: I, face: &F, tile_size: u32, font_size: f32) -> Self
    where
        F: FontFace + ?Sized,
        I: IntoIterator<Item = char>,
    {
        let mut entries = BTreeMap::new();
        entries.insert(0, AtlasEntry { tile: RgbaImage::new(tile_size, tile_size), glyph: None });

        let mut skipped = 0usize;
        for ch in charset {
            match glyph::rasterize_tile(face, ch, tile_size, tile_size, font_size) {
                Some(tile) => {
                    if let Some(prev) = entries.insert(
                        tile.brightness,
                        AtlasEntry { tile: tile.image, glyph: Some(ch) },
                    ) {
                        debug!(
                            "glyph {:?} replaces {:?} at brightness {}",
                            ch, prev.glyph, tile.brightness
                        );
                    }
                }
                None => {
                    warn!("no glyph for {:?}, skipping", ch);
                    skipped += 1;
                }
            }
        }

        let keys: Vec<u8> = entries.keys().copied().collect();
        debug!("atlas built: {} levels, {} characters skipped", keys.len(), skipped);

        Self { tile_size, entries, keys }
    }

    /// Ascending, duplicate-free brightness keys.
    pub fn keys(&self) -> &[u8] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: the blank tile is never removed.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Tile stored at exactly `brightness`.
    pub fn tile(&self, brightness: u8) -> Option<&RgbaImage> {
        self.entries.get(&brightness).map(|e| &e.tile)
    }

    /// Character stored at exactly `brightness`; `None` for the blank tile or
    /// an absent key.
    pub fn glyph(&self, brightness: u8) -> Option<char> {
        self.entries.get(&brightness).and_then(|e| e.glyph)
    }

    /// Key whose tile represents `brightness`.
    pub fn resolve_key(&self, brightness: u8) -> u8 {
        resolve::nearest_key(&self.keys, brightness)
    }

    /// Tile that represents `brightness`.
    pub fn resolve(&self, brightness: u8) -> &RgbaImage {
        let key = self.resolve_key(brightness);
        // Keys and entries share the same key set.
        &self.entries[&key].tile
    }

    pub fn report(&self) -> Vec<AtlasReportEntry> {
        self.entries
            .iter()
            .map(|(&brightness, e)| AtlasReportEntry { brightness, glyph: e.glyph })
            .collect()
    }
}
