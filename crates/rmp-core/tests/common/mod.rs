#![allow(dead_code)]

use std::sync::Mutex;

use ndarray::Array2;

use rmp_core::element::ElementShape;
use rmp_core::pipeline::{OperatorKind, ProgressReporter, RmpConfig};
use rmp_core::raster::{BitDepth, Raster};

/// Wrap pixel data as a raster, panicking on out-of-range values.
pub fn raster(data: Array2<u16>, bit_depth: BitDepth) -> Raster {
    Raster::new(data, bit_depth).unwrap()
}

pub fn flat(h: usize, w: usize, value: u16, bit_depth: BitDepth) -> Raster {
    raster(Array2::from_elem((h, w), value), bit_depth)
}

/// Diagonal 8-bit ramp spanning the full range.
pub fn gradient(h: usize, w: usize) -> Raster {
    let span = (h + w - 2).max(1);
    raster(
        Array2::from_shape_fn((h, w), |(r, c)| ((r + c) * 255 / span) as u16),
        BitDepth::Eight,
    )
}

/// Deterministic 8-bit noise from a xorshift generator.
pub fn noise(h: usize, w: usize, seed: u64) -> Raster {
    let mut state = seed.max(1);
    let data = Array2::from_shape_fn((h, w), |_| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 256) as u16
    });
    raster(data, BitDepth::Eight)
}

/// Radially symmetric cone centered on pixel `(n / 2, n / 2)`.
pub fn cone(n: usize, peak: f64, slope: f64) -> Raster {
    let center = (n / 2) as f64;
    let data = Array2::from_shape_fn((n, n), |(r, c)| {
        let d = ((r as f64 - center).powi(2) + (c as f64 - center).powi(2)).sqrt();
        (peak - slope * d).clamp(0.0, 255.0).round() as u16
    });
    raster(data, BitDepth::Eight)
}

/// One-pixel checkerboard of `low` and `high`.
pub fn checkerboard(n: usize, low: u16, high: u16) -> Raster {
    raster(
        Array2::from_shape_fn((n, n), |(r, c)| if (r + c) % 2 == 0 { low } else { high }),
        BitDepth::Eight,
    )
}

pub fn config(operator: OperatorKind, shape: ElementShape, se_size: u32, iterations: u32) -> RmpConfig {
    RmpConfig {
        operator,
        shape,
        se_size,
        iterations,
        threads: 2,
    }
}

/// Mean absolute difference between horizontally adjacent pixels.
pub fn mean_neighbour_difference(raster: &Raster) -> f64 {
    let data = &raster.data;
    let (h, w) = data.dim();
    let mut sum = 0.0;
    for r in 0..h {
        for c in 1..w {
            sum += (f64::from(data[[r, c]]) - f64::from(data[[r, c - 1]])).abs();
        }
    }
    sum / (h * (w - 1)) as f64
}

/// Reporter that records every event.
#[derive(Default)]
pub struct RecordingReporter {
    pub slices: Mutex<Vec<(usize, usize)>>,
    pub reports: Mutex<Vec<(usize, usize)>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_slice(&self, index: usize, total: usize) {
        self.slices.lock().unwrap().push((index, total));
    }

    fn report(&self, completed: usize, total: usize) {
        self.reports.lock().unwrap().push((completed, total));
    }
}
