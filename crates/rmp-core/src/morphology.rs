//! Flat grayscale erosion and dilation over a canvas scan window.
//!
//! Rows of the window are processed in parallel on the current rayon pool.
//! Every output cell depends only on the source canvas, so the result does
//! not depend on scheduling.

use std::ops::Range;

use ndarray::{s, Array2, Axis};
use rayon::prelude::*;

use crate::element::StructuringElement;

/// Which compound operator a pass applies at each orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphOp {
    /// Erosion followed by dilation.
    Opening,
    /// Dilation followed by erosion.
    Closing,
}

/// Erode `src` into `dst`: each visited cell takes
/// `min(src[y + dy][x + dx] - w)` over the element's members. Targets
/// outside the canvas are skipped; cells outside the window are zeroed.
pub fn erode(
    src: &Array2<i32>,
    dst: &mut Array2<i32>,
    element: &StructuringElement,
    rows: Range<usize>,
    cols: Range<usize>,
) {
    let (h, w) = src.dim();
    let offsets = element.offsets();

    scan(dst, rows, cols, |y, x| {
        let mut min = i32::MAX;
        for o in offsets {
            let (yn, xn) = (y as isize + o.dy, x as isize + o.dx);
            if let Some(v) = at(src, yn, xn, h, w) {
                min = min.min(v - o.weight);
            }
        }
        min
    });
}

/// Dilate `src` into `dst`: each visited cell takes
/// `max(src[y - dy][x - dx] + w)` over the element's members, the reflected
/// element of [`erode`].
pub fn dilate(
    src: &Array2<i32>,
    dst: &mut Array2<i32>,
    element: &StructuringElement,
    rows: Range<usize>,
    cols: Range<usize>,
) {
    let (h, w) = src.dim();
    let offsets = element.offsets();

    scan(dst, rows, cols, |y, x| {
        let mut max = i32::MIN;
        for o in offsets {
            let (yn, xn) = (y as isize - o.dy, x as isize - o.dx);
            if let Some(v) = at(src, yn, xn, h, w) {
                max = max.max(v + o.weight);
            }
        }
        max
    });
}

/// Opening of `src`. The eroded canvas lands in `eroded` and the result in
/// `opened`.
pub fn open(
    src: &Array2<i32>,
    eroded: &mut Array2<i32>,
    opened: &mut Array2<i32>,
    element: &StructuringElement,
    rows: Range<usize>,
    cols: Range<usize>,
) {
    erode(src, eroded, element, rows.clone(), cols.clone());
    dilate(eroded, opened, element, rows, cols);
}

/// Closing of `src`. The dilated canvas lands in `dilated` and the result
/// in `closed`.
pub fn close(
    src: &Array2<i32>,
    dilated: &mut Array2<i32>,
    closed: &mut Array2<i32>,
    element: &StructuringElement,
    rows: Range<usize>,
    cols: Range<usize>,
) {
    dilate(src, dilated, element, rows.clone(), cols.clone());
    erode(dilated, closed, element, rows, cols);
}

#[inline]
fn at(src: &Array2<i32>, y: isize, x: isize, h: usize, w: usize) -> Option<i32> {
    if y < 0 || x < 0 || y as usize >= h || x as usize >= w {
        None
    } else {
        Some(src[[y as usize, x as usize]])
    }
}

/// Zero `dst`, then fill the window cells from `cell(y, x)`, one parallel
/// task per row.
fn scan<F>(dst: &mut Array2<i32>, rows: Range<usize>, cols: Range<usize>, cell: F)
where
    F: Fn(usize, usize) -> i32 + Sync,
{
    dst.fill(0);
    if rows.is_empty() || cols.is_empty() {
        return;
    }

    let start = rows.start;
    dst.slice_mut(s![rows, ..])
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(k, mut row)| {
            let y = start + k;
            for x in cols.clone() {
                row[x] = cell(y, x);
            }
        });
}
