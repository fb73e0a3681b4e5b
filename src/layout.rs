use image::{RgbaImage, imageops};

use crate::{column::ColumnCanvas, config::LayoutConfig, rotate::rotate_expand_bicubic};

/// Side length of the square staging canvas: the column diagonal with a 1.5
/// safety factor, so the layer fits at any rotation angle.
pub fn staging_side(canvas_width: u32, canvas_height: u32) -> u32 {
    let d = f64::from(canvas_width).hypot(f64::from(canvas_height));
    (d * 1.5) as u32
}

/// Centers the column on a square staging canvas and rotates the whole
/// canvas with expansion. The centering offsets use the content dimensions,
/// not the shadow-augmented canvas dimensions; together with the placement
/// corrections below they are calibration data for the 1920x1080 template
/// and are preserved exactly.
pub fn rotate_column(column: &ColumnCanvas, angle_deg: f64) -> RgbaImage {
    let (cw, ch) = column.image.dimensions();
    let side = staging_side(cw, ch);

    let mut staging = RgbaImage::new(side, side);
    let paste_x = i64::from((side - column.content_width) / 2);
    let paste_y = i64::from((side - column.content_height) / 2);
    imageops::overlay(&mut staging, &column.image, paste_x, paste_y);

    rotate_expand_bicubic(&staging, angle_deg)
}

/// Top-left paste position of a rotated column layer on the background.
/// Columns anchor left-to-right at `start_x + index * column_spacing`,
/// vertically centered at `start_y + column_height / 2`, with per-column
/// corrective offsets compensating the rotation's asymmetric visual weight.
pub fn paste_position(
    index: usize,
    rotated_dims: (u32, u32),
    layout: &LayoutConfig,
) -> (i64, i64) {
    let cell_w = i64::from(layout.cell_width);
    let column_h = i64::from(layout.column_height());

    let mut center_x = layout.start_x + index as i64 * layout.column_spacing;
    let mut center_y = layout.start_y + column_h / 2;
    match index {
        1 => center_x += cell_w - 50,
        2 => {
            center_y -= 155;
            center_x += 2 * cell_w - 40;
        }
        _ => {}
    }

    let x = center_x - i64::from(rotated_dims.0) / 2 + cell_w / 2;
    let y = center_y - i64::from(rotated_dims.1) / 2;
    (x, y)
}

/// Pastes a rotated column layer at its column anchor.
pub fn place_rotated(
    background: &mut RgbaImage,
    rotated: &RgbaImage,
    index: usize,
    layout: &LayoutConfig,
) {
    let (x, y) = paste_position(index, rotated.dimensions(), layout);
    imageops::overlay(background, rotated, x, y);
}
