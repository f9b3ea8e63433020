//! Bilinear rotation of a canvas about its center.

use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::consts::{HALF_TURN_DEGREES, ROTATION_PI};

/// Rotate `src` by `degrees` about the canvas center into `dst`.
///
/// Each destination cell `(i, j)`, measured from the center, samples the
/// source at `x = j*cos + i*sin`, `y = -j*sin + i*cos` with bilinear
/// weights. Samples whose top-left neighbour falls outside the half-open
/// canvas extent produce 0; neighbours past the last row or column read as
/// 0. Results are rounded half up and clamped to `[0, upper_limit]`.
///
/// The arithmetic runs in `f32` with the bilinear blend in `f64`, so output
/// is reproducible bit for bit across runs and thread counts.
pub fn rotate(src: &Array2<i32>, dst: &mut Array2<i32>, degrees: f32, upper_limit: i32) {
    let radians = f64::from(degrees) * ROTATION_PI / HALF_TURN_DEGREES;
    let cos = radians.cos() as f32;
    let sin = radians.sin() as f32;

    let (rows, cols) = src.dim();
    let half_y = (rows / 2) as i32;
    let half_x = (cols / 2) as i32;

    dst.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(r, mut row)| {
            let i = r as i32 - half_y;
            for (c, out) in row.iter_mut().enumerate() {
                let j = c as i32 - half_x;
                *out = sample(src, i, j, cos, sin, half_y, half_x, upper_limit);
            }
        });
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn sample(
    src: &Array2<i32>,
    i: i32,
    j: i32,
    cos: f32,
    sin: f32,
    half_y: i32,
    half_x: i32,
    upper_limit: i32,
) -> i32 {
    let (jf, if_) = (j as f32, i as f32);
    let x = jf * cos + if_ * sin;
    let y = -jf * sin + if_ * cos;

    let m = floor_toward_neg(y);
    let n = floor_toward_neg(x);
    if m < -half_y || m >= half_y || n < -half_x || n >= half_x {
        return 0;
    }
    let q = y - m as f32;
    let p = x - n as f32;

    let (r0, c0) = (m + half_y, n + half_x);
    let e00 = read(src, r0, c0);
    let e01 = read(src, r0, c0 + 1);
    let e10 = read(src, r0 + 1, c0);
    let e11 = read(src, r0 + 1, c0 + 1);

    // The `p * e` products are rounded through f32 before widening.
    let one_p = 1.0 - f64::from(p);
    let one_q = 1.0 - f64::from(q);
    let top = one_p * f64::from(e00) + f64::from(p * e01 as f32);
    let bottom = one_p * f64::from(e10) + f64::from(p * e11 as f32);
    let value = one_q * top + f64::from(q) * bottom;

    ((value + 0.5) as i32).clamp(0, upper_limit)
}

/// Integer part for positive values, `trunc(v - 1)` otherwise. Whole
/// negative numbers land one cell below their floor, which keeps sampling
/// on the same grid as the forward rotation.
#[inline]
fn floor_toward_neg(v: f32) -> i32 {
    if v > 0.0 {
        v as i32
    } else {
        (v - 1.0) as i32
    }
}

#[inline]
fn read(src: &Array2<i32>, r: i32, c: i32) -> i32 {
    if r < 0 || c < 0 {
        return 0;
    }
    src.get((r as usize, c as usize)).copied().unwrap_or(0)
}
