use std::{collections::HashMap, path::Path};

use image::{Rgba, RgbaImage, imageops::FilterType};
use rand::Rng;
use tracing::warn;

use crate::error::{PosterError, PosterResult};

/// Neutral pair used whenever dominant-color extraction cannot produce one.
pub const DEFAULT_PRIMARY: [u8; 3] = [150, 100, 50];
pub const DEFAULT_SECONDARY: [u8; 3] = [205, 170, 125];

/// Fixed analysis resolution; exact-color counting is only meaningful on a
/// small raster and keeps the pass cheap.
const SAMPLE_WIDTH: u32 = 100;
const SAMPLE_HEIGHT: u32 = 150;

const MIN_ALPHA: u8 = 200;
const WEAK_MIN_ALPHA: u8 = 100;
const MIN_BRIGHTNESS: f32 = 30.0;
const MAX_BRIGHTNESS: f32 = 220.0;

/// Dominant color pair of a cover image. `fallback` distinguishes "sampled
/// from pixels" from "every extraction path failed and the neutral defaults
/// were used" without relying on the log stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverColors {
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
    pub fallback: bool,
}

/// Extracts the two most frequent colors of the reference image after
/// filtering out near-transparent, near-black and near-white pixels. Never
/// fails: extraction errors degrade to the default pair.
pub fn dominant_pair(path: &Path) -> CoverColors {
    match try_dominant_pair(path) {
        Ok(Some((primary, secondary))) => CoverColors {
            primary,
            secondary,
            fallback: false,
        },
        Ok(None) => CoverColors {
            primary: DEFAULT_PRIMARY,
            secondary: DEFAULT_SECONDARY,
            fallback: true,
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "dominant color sampling failed, using defaults");
            CoverColors {
                primary: DEFAULT_PRIMARY,
                secondary: DEFAULT_SECONDARY,
                fallback: true,
            }
        }
    }
}

fn try_dominant_pair(path: &Path) -> PosterResult<Option<([u8; 3], [u8; 3])>> {
    let img = image::open(path)
        .map_err(|err| PosterError::image(format!("open '{}': {err}", path.display())))?;
    let small = image::imageops::resize(
        &img.to_rgba8(),
        SAMPLE_WIDTH,
        SAMPLE_HEIGHT,
        FilterType::Lanczos3,
    );

    let mut population = filtered_population(&small, MIN_ALPHA, true);
    if population.is_empty() {
        // Alpha-only retry; brightness filtering emptied the image.
        population = filtered_population(&small, WEAK_MIN_ALPHA, false);
    }
    if population.is_empty() {
        return Ok(None);
    }

    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    for color in population {
        *counts.entry(color).or_insert(0) += 1;
    }

    let mut ranked: Vec<([u8; 3], u32)> = counts.into_iter().collect();
    // Tie-break on the color value so the ranking is deterministic.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let primary = ranked[0].0;
    let secondary = ranked.get(1).map_or(primary, |r| r.0);
    Ok(Some((primary, secondary)))
}

fn filtered_population(img: &RgbaImage, min_alpha: u8, brightness_filter: bool) -> Vec<[u8; 3]> {
    let mut out = Vec::new();
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        if a < min_alpha {
            continue;
        }
        if brightness_filter {
            let brightness = (f32::from(r) + f32::from(g) + f32::from(b)) / 3.0;
            if !(MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&brightness) {
                continue;
            }
        }
        out.push([r, g, b]);
    }
    out
}

/// Picks the color of one pseudo-random pixel from the central-right region
/// of the image (x in [0.5w, 0.8w), y in [0.5h, 0.8h)). Used only for the
/// title accent block; any failure degrades to a random mid-range color.
pub fn accent_color<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Rgba<u8> {
    match try_accent_color(path, rng) {
        Ok(color) => color,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "accent sampling failed, using random color");
            Rgba([
                rng.random_range(50..=200),
                rng.random_range(50..=200),
                rng.random_range(50..=200),
                255,
            ])
        }
    }
}

fn try_accent_color<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> PosterResult<Rgba<u8>> {
    let img = image::open(path)
        .map_err(|err| PosterError::image(format!("open '{}': {err}", path.display())))?
        .to_rgba8();
    let (w, h) = img.dimensions();

    let x_lo = (f64::from(w) * 0.5) as u32;
    let x_hi = ((f64::from(w) * 0.8) as u32).max(x_lo + 1).min(w);
    let y_lo = (f64::from(h) * 0.5) as u32;
    let y_hi = ((f64::from(h) * 0.8) as u32).max(y_lo + 1).min(h);

    let x = rng.random_range(x_lo..x_hi);
    let y = rng.random_range(y_lo..y_hi);
    Ok(*img.get_pixel(x.min(w - 1), y.min(h - 1)))
}
