use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::palette;

/// Horizontal linear-gradient background, dark on the left, light on the
/// right. Missing colors are drawn from the palette buckets, which is the
/// only non-deterministic path.
pub fn gradient_background<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    color1: Option<[u8; 3]>,
    color2: Option<[u8; 3]>,
    rng: &mut R,
) -> RgbaImage {
    let c1 = color1.unwrap_or_else(|| palette::random_dark(rng));
    let c2 = color2.unwrap_or_else(|| palette::random_light(rng));

    let mut img = RgbaImage::new(width, height);
    for x in 0..width {
        let px = Rgba([
            lerp_channel(c1[0], c2[0], x, width),
            lerp_channel(c1[1], c2[1], x, width),
            lerp_channel(c1[2], c2[2], x, width),
            255,
        ]);
        for y in 0..height {
            img.put_pixel(x, y, px);
        }
    }
    img
}

/// `c1 + (c2 - c1) * x / width`, truncating toward zero.
fn lerp_channel(c1: u8, c2: u8, x: u32, width: u32) -> u8 {
    let base = f64::from(c1);
    let diff = f64::from(c2) - f64::from(c1);
    let v = (base + diff * f64::from(x) / f64::from(width)) as i32;
    v.clamp(0, 255) as u8
}
