use image::{Rgba, RgbaImage, imageops};

use crate::blur_cpu::gaussian_blur;

/// Drop-shadow constants used for every cover in a column.
pub const SHADOW_OFFSET: (u32, u32) = (20, 20);
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const SHADOW_BLUR_RADIUS: u32 = 20;

/// Per-axis canvas growth produced by [`add_shadow`]: offset plus room for
/// the blur kernel on both sides. Column canvases pre-budget this.
pub fn shadow_growth(offset: (u32, u32), blur_radius: u32) -> (u32, u32) {
    (offset.0 + blur_radius * 2, offset.1 + blur_radius * 2)
}

/// Renders `img` over an offset, blurred shadow silhouette. The silhouette
/// is a solid rectangle the size of the input, so fully transparent sources
/// still cast a rectangular shadow. Output dimensions grow by
/// `offset + 2 * blur_radius` per axis; the source lands at
/// `(blur_radius, blur_radius)` unshifted.
pub fn add_shadow(
    img: &RgbaImage,
    offset: (u32, u32),
    shadow_color: Rgba<u8>,
    blur_radius: u32,
) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (grow_x, grow_y) = shadow_growth(offset, blur_radius);

    let mut canvas = RgbaImage::new(w + grow_x, h + grow_y);

    let sx = blur_radius + offset.0;
    let sy = blur_radius + offset.1;
    for y in 0..h {
        for x in 0..w {
            canvas.put_pixel(sx + x, sy + y, shadow_color);
        }
    }

    let mut canvas = gaussian_blur(&canvas, blur_radius);
    imageops::overlay(&mut canvas, img, i64::from(blur_radius), i64::from(blur_radius));
    canvas
}
