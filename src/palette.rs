use rand::Rng;

/// Inclusive `(min, max)` sampling range per RGB channel.
pub type ChannelRanges = [(u8, u8); 3];

/// Hue/brightness buckets for the dark (left) end of a random gradient.
/// One bucket is picked uniformly, then each channel uniformly in range;
/// pairing any dark bucket with any light bucket stays visually coherent.
pub static DARK_BUCKETS: [ChannelRanges; 26] = [
    [(80, 150), (20, 70), (20, 70)],   // red
    [(80, 150), (50, 100), (20, 50)],  // orange
    [(80, 150), (70, 140), (20, 50)],  // yellow
    [(20, 70), (80, 150), (40, 90)],   // green
    [(20, 70), (50, 100), (80, 150)],  // blue
    [(60, 120), (20, 80), (80, 150)],  // purple
    [(60, 100), (10, 30), (10, 30)],   // deep red
    [(70, 120), (10, 40), (30, 70)],   // wine
    [(70, 120), (30, 70), (10, 40)],   // russet
    [(70, 130), (40, 80), (0, 30)],    // deep orange
    [(70, 130), (60, 110), (0, 30)],   // deep yellow
    [(50, 100), (60, 110), (0, 40)],   // olive
    [(0, 50), (60, 110), (0, 50)],     // deep green
    [(20, 60), (50, 100), (30, 80)],   // forest
    [(0, 50), (60, 110), (60, 110)],   // teal
    [(0, 50), (50, 100), (70, 120)],   // lake blue
    [(0, 40), (0, 50), (70, 120)],     // deep blue
    [(20, 60), (0, 40), (70, 130)],    // indigo
    [(40, 90), (0, 40), (70, 130)],    // deep purple
    [(70, 120), (0, 40), (70, 120)],   // magenta
    [(40, 80), (40, 80), (40, 80)],    // gray
    [(50, 110), (40, 80), (25, 75)],   // warm gray
    [(25, 75), (40, 80), (50, 110)],   // cool gray
    [(60, 100), (40, 80), (20, 50)],   // brown
    [(80, 120), (60, 100), (10, 40)],  // bronze
    [(50, 90), (60, 100), (30, 70)],   // khaki
];

/// Buckets for the light (right) end, chosen independently of the dark end.
pub static LIGHT_BUCKETS: [ChannelRanges; 26] = [
    [(180, 255), (100, 180), (100, 180)], // red
    [(200, 255), (150, 220), (70, 150)],  // orange
    [(200, 255), (180, 255), (70, 150)],  // yellow
    [(100, 180), (180, 255), (120, 200)], // green
    [(100, 180), (150, 220), (180, 255)], // blue
    [(150, 220), (100, 170), (180, 255)], // purple
    [(220, 255), (50, 100), (50, 100)],   // bright red
    [(220, 255), (100, 160), (130, 190)], // rose
    [(230, 255), (130, 200), (30, 90)],   // bright orange
    [(230, 255), (110, 170), (100, 160)], // coral
    [(230, 255), (200, 255), (100, 160)], // bright yellow
    [(200, 255), (230, 255), (50, 130)],  // lemon
    [(130, 190), (230, 255), (100, 160)], // spring green
    [(50, 110), (220, 255), (50, 130)],   // bright green
    [(50, 110), (200, 255), (200, 255)],  // cyan
    [(100, 160), (180, 230), (230, 255)], // sky
    [(50, 130), (130, 190), (230, 255)],  // bright blue
    [(150, 210), (100, 160), (230, 255)], // light purple
    [(180, 230), (130, 190), (220, 255)], // lilac
    [(230, 255), (130, 190), (200, 255)], // pink
    [(200, 240), (200, 240), (200, 240)], // silver
    [(220, 255), (180, 230), (80, 140)],  // gold
    [(220, 255), (210, 245), (170, 220)], // beige
    [(180, 230), (140, 190), (100, 160)], // light coffee
    [(150, 200), (220, 255), (180, 230)], // mint
    [(220, 255), (220, 255), (220, 255)], // pale
];

pub fn random_dark<R: Rng + ?Sized>(rng: &mut R) -> [u8; 3] {
    sample_bucket(&DARK_BUCKETS, rng)
}

pub fn random_light<R: Rng + ?Sized>(rng: &mut R) -> [u8; 3] {
    sample_bucket(&LIGHT_BUCKETS, rng)
}

fn sample_bucket<R: Rng + ?Sized>(buckets: &[ChannelRanges], rng: &mut R) -> [u8; 3] {
    let bucket = buckets[rng.random_range(0..buckets.len())];
    let mut out = [0u8; 3];
    for (c, &(min, max)) in out.iter_mut().zip(bucket.iter()) {
        *c = rng.random_range(min..=max);
    }
    out
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn bucket_ranges_are_ordered() {
        for bucket in DARK_BUCKETS.iter().chain(LIGHT_BUCKETS.iter()) {
            for &(min, max) in bucket {
                assert!(min <= max);
            }
        }
    }

    #[test]
    fn dark_stays_darker_than_light() {
        // Every dark channel maximum is below the brightest light minimum
        // would be too strict; instead check mean brightness bounds.
        let dark_max: u32 = DARK_BUCKETS
            .iter()
            .map(|b| b.iter().map(|&(_, max)| u32::from(max)).sum::<u32>() / 3)
            .max()
            .unwrap();
        let light_min: u32 = LIGHT_BUCKETS
            .iter()
            .map(|b| b.iter().map(|&(min, _)| u32::from(min)).sum::<u32>() / 3)
            .min()
            .unwrap();
        assert!(dark_max < 160);
        assert!(light_min > 100);
    }

    #[test]
    fn sampled_colors_respect_some_bucket() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let c = random_dark(&mut rng);
            let fits = DARK_BUCKETS.iter().any(|b| {
                b.iter()
                    .zip(c.iter())
                    .all(|(&(min, max), &v)| v >= min && v <= max)
            });
            assert!(fits, "sampled color {c:?} fits no dark bucket");
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let a = random_light(&mut StdRng::seed_from_u64(42));
        let b = random_light(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
