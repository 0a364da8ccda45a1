use std::path::PathBuf;

use glyphmosaic::glyph::rasterize_tile;
use glyphmosaic::{codec, Converter, FontFace, FONT_SIZE, SQUARE_PIXELS};

fn font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSans.ttf")
}

fn font() -> fontdue::Font {
    codec::load_font(font_path(), 0).unwrap()
}

fn brightness(font: &fontdue::Font, ch: char) -> u8 {
    rasterize_tile(font, ch, SQUARE_PIXELS, SQUARE_PIXELS, FONT_SIZE)
        .unwrap_or_else(|| panic!("no tile for {ch:?}"))
        .brightness
}

#[test]
fn space_is_white() {
    let font = font();
    let tile = rasterize_tile(&font, ' ', SQUARE_PIXELS, SQUARE_PIXELS, FONT_SIZE).unwrap();
    assert_eq!(tile.brightness, 255);
    assert!(tile.image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn heavier_glyphs_are_darker() {
    let font = font();
    let block = brightness(&font, '▇');
    let at = brightness(&font, '@');
    let dot = brightness(&font, '.');
    assert!(block < at, "'▇' {block} vs '@' {at}");
    assert!(at < dot, "'@' {at} vs '.' {dot}");
    assert!(dot < 255);
}

#[test]
fn missing_code_point_is_skipped() {
    let font = font();
    assert!(font.glyph('墨', FONT_SIZE).is_none());
    assert!(rasterize_tile(&font, '墨', SQUARE_PIXELS, SQUARE_PIXELS, FONT_SIZE).is_none());
}

#[test]
fn ink_box_is_y_down() {
    let font = font();

    // Sits on the baseline: ink ends at or just below it.
    let dot = font.glyph('.', 32.0).unwrap();
    assert!(dot.ink_top < dot.ink_bottom);
    assert!(dot.ink_bottom >= -1.0 && dot.ink_bottom <= 1.0, "{}", dot.ink_bottom);
    assert!(dot.bottom >= -1 && dot.bottom <= 1, "{}", dot.bottom);

    // Rises well above the baseline.
    let cap = font.glyph('H', 32.0).unwrap();
    assert!(cap.ink_top < -16.0, "{}", cap.ink_top);
    assert_eq!(cap.coverage.len(), cap.width * cap.height);
    assert!(cap.advance > 0.0);
}

/// First and last tile rows holding any ink.
fn inked_rows(tile: &image::RgbaImage) -> (i32, i32) {
    let rows: Vec<i32> = (0..tile.height())
        .filter(|&y| (0..tile.width()).any(|x| tile.get_pixel(x, y).0[0] < 255))
        .map(|y| y as i32)
        .collect();
    (rows[0], rows[rows.len() - 1])
}

#[test]
fn glyphs_sit_on_the_centred_baseline() {
    let font = font();
    let (tile, px) = (48u32, 32.0);

    for ch in ['H', '.', 'p'] {
        let glyph = font.glyph(ch, px).unwrap();
        let ink_height = glyph.ink_height();
        let baseline = (tile as i32 - ink_height) / 2 + ink_height;
        let expected_top = baseline + glyph.ink_top.round() as i32;
        let expected_bottom = baseline + glyph.ink_bottom.round() as i32;

        let rendered = rasterize_tile(&font, ch, tile, tile, px).unwrap();
        let (top, bottom) = inked_rows(&rendered.image);
        assert!((top - expected_top).abs() <= 2, "{ch:?}: top {top} vs {expected_top}");
        assert!(
            (bottom - expected_bottom).abs() <= 2,
            "{ch:?}: bottom {bottom} vs {expected_bottom}"
        );
    }
}

#[test]
fn descender_reaches_below_baseline() {
    let font = font();
    let p = font.glyph('p', 32.0).unwrap();
    assert!(p.bottom < -3, "{}", p.bottom);
    assert!(p.ink_bottom > 3.0, "{}", p.ink_bottom);
}

#[test]
fn converter_builds_atlas_from_font_file() {
    let converter = Converter::new(font_path(), 0).unwrap();
    let atlas = converter.atlas();
    assert!(atlas.len() > 1, "{:?}", atlas.keys());
    assert_eq!(atlas.keys()[0], 0);
    assert!(atlas.keys().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(atlas.keys().last(), Some(&255));
}
