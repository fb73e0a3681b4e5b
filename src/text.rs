use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::error::{PosterError, PosterResult};

/// Native-script title anchor and size, calibrated to the 1920x1080
/// template.
pub const NATIVE_TITLE_POS: (f32, f32) = (73.32, 427.34);
pub const NATIVE_TITLE_PX: f32 = 163.0;

pub const ENGLISH_TITLE_POS: (f32, f32) = (124.68, 624.55);
pub const ENGLISH_BASE_PX: u32 = 50;
pub const ENGLISH_MIN_PX: u32 = 30;
pub const LINE_SPACING: u32 = 5;

pub const ACCENT_POS: (f32, f32) = (84.38, 620.06);
pub const ACCENT_WIDTH: f32 = 21.51;
pub const ACCENT_BASE_HEIGHT: u32 = 55;

pub const TITLE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A loaded TTF/OTF title font.
pub struct TitleFont {
    font: FontVec,
}

impl TitleFont {
    pub fn load(path: &Path) -> PosterResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|err| PosterError::text(format!("read font '{}': {err}", path.display())))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|err| PosterError::text(format!("parse font '{}': {err}", path.display())))?;
        Ok(Self { font })
    }
}

/// Draws one line of text with its top-left corner at `pos` (the baseline
/// sits one ascent below), blending glyph coverage over the image.
pub fn draw_text(
    img: &mut RgbaImage,
    text: &str,
    pos: (f32, f32),
    font: &TitleFont,
    px: f32,
    color: Rgba<u8>,
) {
    let scaled = font.font.as_scaled(PxScale::from(px));
    let baseline = pos.1 + scaled.ascent();

    let mut caret = pos.0;
    let mut prev = None;
    for ch in text.chars() {
        let gid = scaled.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, gid);
        }
        let glyph = gid.with_scale_and_position(PxScale::from(px), point(caret, baseline));
        if let Some(outline) = scaled.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|gx, gy, coverage| {
                let x = gx as i64 + bounds.min.x as i64;
                let y = gy as i64 + bounds.min.y as i64;
                blend_coverage(img, x, y, color, coverage);
            });
        }
        caret += scaled.h_advance(gid);
        prev = Some(gid);
    }
}

/// Word-wraps onto one line per whitespace token. Tokens are never re-flowed
/// into shared lines; a single token renders as a single line.
pub fn wrap_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Draws the wrapped text, one token per line, stepping `px + line_spacing`
/// vertically. Returns the rendered line count.
pub fn draw_multiline_text(
    img: &mut RgbaImage,
    text: &str,
    pos: (f32, f32),
    font: &TitleFont,
    px: u32,
    line_spacing: u32,
    color: Rgba<u8>,
) -> u32 {
    let lines = wrap_tokens(text);
    if lines.len() <= 1 {
        draw_text(img, text, pos, font, px as f32, color);
        return 1;
    }
    for (i, line) in lines.iter().enumerate() {
        let y = pos.1 + (i as u32 * (px + line_spacing)) as f32;
        draw_text(img, line, (pos.0, y), font, px as f32, color);
    }
    lines.len() as u32
}

/// Auto-shrinking english title size: the base size fits short titles; long
/// tokens or many tokens scale it down as
/// `base * (10 / max(longest_token, tokens * 3))^0.8`, floored at the
/// minimum size.
pub fn english_font_px(title: &str) -> u32 {
    let tokens = wrap_tokens(title);
    let longest = tokens.iter().map(|t| t.chars().count()).max().unwrap_or(0);
    let count = tokens.len();

    if longest <= 10 && count <= 3 {
        return ENGLISH_BASE_PX;
    }
    let denom = longest.max(count * 3) as f64;
    let px = f64::from(ENGLISH_BASE_PX) * (10.0 / denom).powf(0.8);
    (px.max(f64::from(ENGLISH_MIN_PX))) as u32
}

/// Accent block height grows linearly with the rendered line count.
pub fn accent_block_height(line_count: u32, px: u32) -> u32 {
    ACCENT_BASE_HEIGHT + line_count.saturating_sub(1) * (px + LINE_SPACING)
}

/// Fills an axis-aligned rectangle given in the template's fractional
/// coordinates, covering the inclusive integer span like the original
/// template renderer.
pub fn fill_rect(img: &mut RgbaImage, pos: (f32, f32), size: (f32, f32), color: Rgba<u8>) {
    let x0 = pos.0 as i64;
    let y0 = pos.1 as i64;
    let x1 = (pos.0 + size.0) as i64;
    let y1 = (pos.1 + size.1) as i64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            blend_coverage(img, x, y, color, 1.0);
        }
    }
}

/// Draws the full title block: native title, optional english multi-line
/// title and its accent block. Fonts are optional so a missing font file
/// degrades to a partially annotated poster instead of a failed one.
pub fn draw_title_block(
    img: &mut RgbaImage,
    native: &str,
    english: &str,
    native_font: Option<&TitleFont>,
    latin_font: Option<&TitleFont>,
    accent: Rgba<u8>,
) {
    if let Some(font) = native_font {
        draw_text(img, native, NATIVE_TITLE_POS, font, NATIVE_TITLE_PX, TITLE_COLOR);
    }

    if english.is_empty() {
        return;
    }
    let Some(font) = latin_font else {
        return;
    };

    let px = english_font_px(english);
    let lines = draw_multiline_text(
        img,
        english,
        ENGLISH_TITLE_POS,
        font,
        px,
        LINE_SPACING,
        TITLE_COLOR,
    );
    let height = accent_block_height(lines, px);
    fill_rect(img, ACCENT_POS, (ACCENT_WIDTH, height as f32), accent);
}

fn blend_coverage(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    let (w, h) = img.dimensions();
    if x < 0 || y < 0 || x >= i64::from(w) || y >= i64::from(h) {
        return;
    }
    let a = (coverage.clamp(0.0, 1.0) * f32::from(color.0[3]) / 255.0).clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let s = f32::from(color.0[c]);
        let d = f32::from(dst.0[c]);
        dst.0[c] = (d + (s - d) * a).round().clamp(0.0, 255.0) as u8;
    }
    let da = f32::from(dst.0[3]);
    dst.0[3] = (da + (255.0 - da) * a).round().clamp(0.0, 255.0) as u8;
}
