use ndarray::Array2;
use tracing::debug;

use crate::raster::BitDepth;

/// Linear stretch: maps `[min, max]` of the image onto `[0, upper_limit]`,
/// truncating toward zero. A flat image maps to all zeros.
pub fn linear_stretch(image: &Array2<i32>, upper_limit: i32) -> Array2<i32> {
    let (min, max) = image
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if image.is_empty() || max == min {
        return Array2::zeros(image.dim());
    }

    let range = f64::from(max - min);
    let upper = i64::from(upper_limit);
    image.mapv(|v| ((i64::from(v - min) * upper) as f64 / range) as i32)
}

/// Gray level → output bin table for histogram equalization into `levels`
/// bins.
///
/// Levels are walked in ascending order and poured into the current bin;
/// a level moves on to the next bin when that leaves the current bin's count
/// closer to `pixels / levels`. Bins never exceed `levels - 1`, so the table
/// is non-decreasing and uses at most `levels` distinct values.
pub fn equalization_table(image: &Array2<i32>, bit_depth: BitDepth, levels: usize) -> Vec<usize> {
    let gray_levels = bit_depth.gray_levels();
    let upper = bit_depth.upper_limit();
    let levels = levels.max(1);

    let mut hist = vec![0i64; gray_levels];
    for &v in image {
        hist[v.clamp(0, upper) as usize] += 1;
    }

    let target = (image.len() as f64 / levels as f64) as i64;
    let mut binned = vec![0i64; levels];
    let mut table = vec![0usize; gray_levels];
    let mut bin = 0usize;

    for (level, &count) in hist.iter().enumerate() {
        if (target - binned[bin]).abs() < (target - (binned[bin] + count)).abs() {
            bin = (bin + 1).min(levels - 1);
        }
        table[level] = bin;
        binned[bin] += count;
    }
    table
}

/// Histogram equalization into `levels` bins, each bin mapped back onto the
/// full gray range as `bin * gray_levels / levels`.
pub fn equalize(image: &Array2<i32>, bit_depth: BitDepth, levels: usize) -> Array2<i32> {
    let table = equalization_table(image, bit_depth, levels);
    let step = bit_depth.gray_levels() as f64 / levels.max(1) as f64;
    let upper = bit_depth.upper_limit();
    image.mapv(|v| (table[v.clamp(0, upper) as usize] as f64 * step) as i32)
}

/// Stretch, equalize into `levels` bins, stretch again. `on_stage` runs
/// after each of the three stages.
pub fn enhance_contrast(
    image: &Array2<i32>,
    bit_depth: BitDepth,
    levels: usize,
    mut on_stage: impl FnMut(&'static str),
) -> Array2<i32> {
    let upper = bit_depth.upper_limit();

    let stretched = linear_stretch(image, upper);
    debug!(levels, "Contrast stage: stretch");
    on_stage("stretch");

    let equalized = equalize(&stretched, bit_depth, levels);
    debug!(levels, "Contrast stage: equalize");
    on_stage("equalize");

    let result = linear_stretch(&equalized, upper);
    debug!(levels, "Contrast stage: restretch");
    on_stage("restretch");

    result
}
