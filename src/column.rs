use std::path::PathBuf;

use image::{RgbaImage, imageops, imageops::FilterType};
use tracing::error;

use crate::{
    config::LayoutConfig,
    shadow::{SHADOW_BLUR_RADIUS, SHADOW_COLOR, SHADOW_OFFSET, add_shadow, shadow_growth},
};

/// One assembled column layer plus the content dimensions the placement math
/// works from (cell width and stacked height, without the shadow growth).
pub struct ColumnCanvas {
    pub image: RgbaImage,
    pub content_width: u32,
    pub content_height: u32,
}

/// Resizes, rounds, shadows and vertically stacks up to `rows` covers into
/// one transparent canvas. The canvas pre-budgets the shadow growth so each
/// shadowed cover is pasted at its stack offset without compensation. A
/// cover that fails to open or decode is logged and leaves its slot empty;
/// a partial column is still a valid column.
pub fn assemble_column(paths: &[PathBuf], layout: &LayoutConfig) -> ColumnCanvas {
    let cell_w = layout.cell_width;
    let cell_h = layout.cell_height;
    let column_height = layout.column_height();
    let (grow_x, grow_y) = shadow_growth(SHADOW_OFFSET, SHADOW_BLUR_RADIUS);

    let mut canvas = RgbaImage::new(cell_w + grow_x, column_height + grow_y);

    for (row, path) in paths.iter().take(layout.rows as usize).enumerate() {
        let cover = match image::open(path) {
            Ok(img) => img.to_rgba8(),
            Err(err) => {
                error!(path = %path.display(), error = %err, "skipping unreadable cover");
                continue;
            }
        };

        let mut resized = imageops::resize(&cover, cell_w, cell_h, FilterType::Lanczos3);
        if layout.corner_radius > 0 {
            resized = round_corners(&resized, layout.corner_radius);
        }
        let shadowed = add_shadow(&resized, SHADOW_OFFSET, SHADOW_COLOR, SHADOW_BLUR_RADIUS);

        let y = i64::from(row as u32) * i64::from(cell_h + layout.margin);
        imageops::overlay(&mut canvas, &shadowed, 0, y);
    }

    ColumnCanvas {
        image: canvas,
        content_width: cell_w,
        content_height: column_height,
    }
}

/// Clips an image to a rounded rectangle by zeroing alpha outside the corner
/// circles. Hard-edged, matching the cell masks of the original template.
pub fn round_corners(img: &RgbaImage, radius: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let r = f64::from(radius.min(w / 2).min(h / 2));
    let fw = f64::from(w);
    let fh = f64::from(h);

    let mut out = img.clone();
    for y in 0..h {
        let py = f64::from(y) + 0.5;
        for x in 0..w {
            let px = f64::from(x) + 0.5;

            let cx = if px < r {
                Some(r)
            } else if px > fw - r {
                Some(fw - r)
            } else {
                None
            };
            let cy = if py < r {
                Some(r)
            } else if py > fh - r {
                Some(fh - r)
            } else {
                None
            };

            if let (Some(cx), Some(cy)) = (cx, cy) {
                let d2 = (px - cx) * (px - cx) + (py - cy) * (py - cy);
                if d2 > r * r {
                    out.get_pixel_mut(x, y).0[3] = 0;
                }
            }
        }
    }
    out
}

/// Expected canvas dimensions for a column under `layout`.
pub fn column_canvas_size(layout: &LayoutConfig) -> (u32, u32) {
    let (grow_x, grow_y) = shadow_growth(SHADOW_OFFSET, SHADOW_BLUR_RADIUS);
    (
        layout.cell_width + grow_x,
        layout.column_height() + grow_y,
    )
}
