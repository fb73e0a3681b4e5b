use image::RgbaImage;

/// Separable gaussian blur over a straight-alpha RGBA image. The kernel is
/// quantized to Q16 fixed point and taps clamp to the image edge. Sigma is
/// derived from the radius as `radius / 2`.
pub fn gaussian_blur(img: &RgbaImage, radius: u32) -> RgbaImage {
    if radius == 0 {
        return img.clone();
    }
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let kernel = gaussian_kernel_q16(radius, f64::from(radius) / 2.0);
    let mut tmp = vec![0u8; img.as_raw().len()];
    let mut out = vec![0u8; img.as_raw().len()];

    horizontal_pass(img.as_raw(), &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);

    RgbaImage::from_raw(width, height, out).unwrap_or_else(|| img.clone())
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> Vec<u32> {
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold the rounding residue into the center tap so the kernel sums to
    // exactly 1.0 in Q16 and constant regions stay constant.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let v = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = v as u32;
    }
    weights
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    (((acc + 32768) >> 16).min(255)) as u8
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn radius_0_is_identity() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(1, 1, Rgba([9, 8, 7, 6]));
        assert_eq!(gaussian_blur(&img, 0).as_raw(), img.as_raw());
    }

    #[test]
    fn constant_image_is_unchanged() {
        let img = RgbaImage::from_pixel(5, 4, Rgba([10, 20, 30, 40]));
        assert_eq!(gaussian_blur(&img, 3).as_raw(), img.as_raw());
    }

    #[test]
    fn blur_spreads_energy_from_single_pixel() {
        let mut img = RgbaImage::new(5, 5);
        img.put_pixel(2, 2, Rgba([255, 255, 255, 255]));

        let out = gaussian_blur(&img, 2);

        let nonzero = out.pixels().filter(|p| p.0[3] != 0).count();
        assert!(nonzero > 1);

        let sum_a: u32 = out.pixels().map(|p| u32::from(p.0[3])).sum();
        assert!((sum_a as i32 - 255).abs() <= 4);
    }
}
