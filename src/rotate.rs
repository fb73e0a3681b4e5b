use image::{Rgba, RgbaImage};

/// Rotates counterclockwise about the image center, expanding the output to
/// the rotated bounding box. Samples the source with bicubic interpolation
/// (cubic convolution, a = -0.5); destination pixels that map outside the
/// source are transparent.
pub fn rotate_expand_bicubic(img: &RgbaImage, angle_deg: f64) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }

    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();

    let fw = f64::from(w);
    let fh = f64::from(h);
    let nw = ((fw * cos.abs() + fh * sin.abs()).round() as u32).max(1);
    let nh = ((fw * sin.abs() + fh * cos.abs()).round() as u32).max(1);

    // Pixel-center inverse mapping: destination offset from the output
    // center, rotated back into source coordinates.
    let cx_dst = f64::from(nw - 1) / 2.0;
    let cy_dst = f64::from(nh - 1) / 2.0;
    let cx_src = f64::from(w - 1) / 2.0;
    let cy_src = f64::from(h - 1) / 2.0;

    let mut out = RgbaImage::new(nw, nh);
    for yd in 0..nh {
        let dy = f64::from(yd) - cy_dst;
        for xd in 0..nw {
            let dx = f64::from(xd) - cx_dst;
            let xs = cos * dx - sin * dy + cx_src;
            let ys = sin * dx + cos * dy + cy_src;
            if xs < -0.5 || xs > fw - 0.5 || ys < -0.5 || ys > fh - 0.5 {
                continue;
            }
            out.put_pixel(xd, yd, sample_bicubic(img, xs, ys));
        }
    }
    out
}

fn sample_bicubic(img: &RgbaImage, xs: f64, ys: f64) -> Rgba<u8> {
    let (w, h) = img.dimensions();
    let x0 = xs.floor();
    let y0 = ys.floor();
    let fx = xs - x0;
    let fy = ys - y0;

    let wx = [
        cubic_weight(fx + 1.0),
        cubic_weight(fx),
        cubic_weight(fx - 1.0),
        cubic_weight(fx - 2.0),
    ];
    let wy = [
        cubic_weight(fy + 1.0),
        cubic_weight(fy),
        cubic_weight(fy - 1.0),
        cubic_weight(fy - 2.0),
    ];

    let mut acc = [0.0f64; 4];
    for (j, &wyj) in wy.iter().enumerate() {
        let sy = (y0 as i64 + j as i64 - 1).clamp(0, i64::from(h) - 1) as u32;
        for (i, &wxi) in wx.iter().enumerate() {
            let sx = (x0 as i64 + i as i64 - 1).clamp(0, i64::from(w) - 1) as u32;
            let px = img.get_pixel(sx, sy);
            let wgt = wxi * wyj;
            for c in 0..4 {
                acc[c] += wgt * f64::from(px.0[c]);
            }
        }
    }

    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = acc[c].round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Cubic convolution weight with a = -0.5, zero beyond |t| >= 2.
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t < 1.0 {
        (A + 2.0) * t * t * t - (A + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        A * t * t * t - 5.0 * A * t * t + 8.0 * A * t - 4.0 * A
    } else {
        0.0
    }
}
