use ndarray::{Array2, Zip};
use tracing::debug;

use crate::canvas::{crop_footprint, embed_mirror, embed_replicate, rotate, CanvasBuffers};
use crate::consts::HALF_TURN_DEGREES;
use crate::element::StructuringElement;
use crate::geometry::GeometryPlan;
use crate::morphology::{self, MorphOp};
use crate::pipeline::types::Progress;
use crate::raster::BitDepth;

/// How the image margin is filled before rotating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Padding {
    Replicate,
    Mirror,
}

/// Runs an opening or closing at every orientation of a half turn and
/// combines the results.
pub struct RotationalSweep {
    plan: GeometryPlan,
    element: StructuringElement,
    buffers: CanvasBuffers,
    upper_limit: i32,
    iterations: usize,
}

impl RotationalSweep {
    pub fn new(
        plan: GeometryPlan,
        element: StructuringElement,
        bit_depth: BitDepth,
        iterations: usize,
    ) -> Self {
        let buffers = CanvasBuffers::new(&plan);
        Self {
            plan,
            element,
            buffers,
            upper_limit: bit_depth.upper_limit(),
            iterations,
        }
    }

    /// Apply `op` to `source` at angles `i * 180 / N`, `i` in `0..N`.
    ///
    /// The union of openings is their pixelwise maximum and the
    /// intersection of closings their minimum. The combined image is then
    /// clamped against `source` so an opening never exceeds it and a
    /// closing never falls below it. One progress step is reported per
    /// angle.
    pub fn run(
        &mut self,
        source: &Array2<i32>,
        op: MorphOp,
        padding: Padding,
        progress: &mut Progress<'_>,
    ) -> Array2<i32> {
        let plan = &self.plan;
        let element = &self.element;
        let upper = self.upper_limit;
        let CanvasBuffers {
            padded,
            rotated,
            eroded,
            dilated,
        } = &mut self.buffers;

        match padding {
            Padding::Replicate => embed_replicate(source, plan, padded),
            Padding::Mirror => embed_mirror(source, plan, padded),
        }

        let rows = plan.scan_rows();
        let cols = plan.scan_cols();
        let step = (HALF_TURN_DEGREES / self.iterations as f64) as f32;
        let mut combined: Option<Array2<i32>> = None;

        for i in 0..self.iterations {
            let angle = step * i as f32;
            debug!(?op, angle, "Orientation pass");

            rotate(padded, rotated, angle, upper);
            let result: &Array2<i32> = match op {
                MorphOp::Opening => {
                    morphology::open(rotated, eroded, dilated, element, rows.clone(), cols.clone());
                    &*dilated
                }
                MorphOp::Closing => {
                    morphology::close(rotated, dilated, eroded, element, rows.clone(), cols.clone());
                    &*eroded
                }
            };
            rotate(result, rotated, -angle, upper);
            let oriented = crop_footprint(rotated, plan);

            combined = Some(match combined {
                None => oriented,
                Some(mut acc) => {
                    Zip::from(&mut acc).and(&oriented).for_each(|a, &b| {
                        *a = match op {
                            MorphOp::Opening => (*a).max(b),
                            MorphOp::Closing => (*a).min(b),
                        }
                    });
                    acc
                }
            });
            progress.tick();
        }

        let mut combined = combined.unwrap_or_else(|| source.clone());
        Zip::from(&mut combined).and(source).for_each(|a, &s| {
            *a = match op {
                MorphOp::Opening => (*a).min(s),
                MorphOp::Closing => (*a).max(s),
            }
        });
        combined
    }
}
