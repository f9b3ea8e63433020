use std::time::Instant;

use ndarray::Array2;
use tracing::{debug, info};

use crate::element::StructuringElement;
use crate::error::{Result, RmpError};
use crate::geometry::GeometryPlan;
use crate::raster::{BitDepth, CenteredImage, Raster};
use crate::workers::WorkerPool;

use super::aggregate::RotationalSweep;
use super::config::RmpConfig;
use super::operators;
use super::selection::SliceSelection;
use super::types::{EnhanceVariant, OperatorKind, Progress, ProgressReporter};

/// One processed slice of a stack.
#[derive(Clone, Debug)]
pub struct SliceResult {
    /// 1-based index of the slice in the input stack.
    pub index: usize,
    pub raster: Raster,
}

/// Result title for an input named `stem`, e.g. `cells-Opn_D3N4`.
pub fn output_title(stem: &str, config: &RmpConfig) -> String {
    format!(
        "{stem}-{}_{}{}N{}",
        config.operator.tag(),
        config.shape.tag(),
        config.se_size,
        config.iterations
    )
}

/// Apply the configured operator to one image.
///
/// All parameters and the image itself are validated before any pixel is
/// processed. The result has the input's dimensions and bit depth.
pub fn process(
    image: &Raster,
    config: &RmpConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Raster> {
    let (element, plan) = prepare(image, config)?;
    let pool = WorkerPool::new(config.threads)?;
    run(image, config, element, plan, &pool, reporter)
}

/// Apply the configured operator to every selected slice of a stack.
///
/// Slices are processed one after another with fresh canvases; unselected
/// slices are left out of the result. Every selected slice is validated
/// before the first one is processed.
pub fn process_stack(
    slices: &[Raster],
    selection: &SliceSelection,
    config: &RmpConfig,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<SliceResult>> {
    if let SliceSelection::Indices(indices) = selection {
        if let Some(&bad) = indices.iter().find(|&&i| i == 0 || i > slices.len()) {
            return Err(RmpError::InvalidSliceSelection(format!(
                "slice {bad} is outside 1-{}",
                slices.len()
            )));
        }
    }

    let indices = selection.indices(slices.len());
    let prepared = indices
        .iter()
        .map(|&index| prepare(&slices[index - 1], config))
        .collect::<Result<Vec<_>>>()?;

    let pool = WorkerPool::new(config.threads)?;
    info!(
        slices = slices.len(),
        selected = indices.len(),
        "Processing stack"
    );

    indices
        .into_iter()
        .zip(prepared)
        .map(|(index, (element, plan))| {
            reporter.begin_slice(index, slices.len());
            let raster = run(&slices[index - 1], config, element, plan, &pool, reporter)?;
            Ok(SliceResult { index, raster })
        })
        .collect()
}

fn prepare(image: &Raster, config: &RmpConfig) -> Result<(StructuringElement, GeometryPlan)> {
    config.validate()?;
    image.validate()?;
    let element = StructuringElement::new(config.shape, config.se_size)?;
    let plan = GeometryPlan::new(image.width(), image.height(), &element)?;
    Ok((element, plan))
}

fn run(
    image: &Raster,
    config: &RmpConfig,
    element: StructuringElement,
    plan: GeometryPlan,
    pool: &WorkerPool,
    reporter: &dyn ProgressReporter,
) -> Result<Raster> {
    let iterations = config.iterations as usize;
    let bit_depth = image.bit_depth;
    info!(
        operator = %config.operator,
        shape = %config.shape,
        se_size = config.se_size,
        iterations,
        width = image.width(),
        height = image.height(),
        %bit_depth,
        threads = pool.threads(),
        "Running operator"
    );
    debug!(
        canvas_x = plan.canvas_x,
        canvas_y = plan.canvas_y,
        origin_dx = plan.origin_dx,
        origin_dy = plan.origin_dy,
        "Geometry planned"
    );

    let start = Instant::now();
    let centered = CenteredImage::from_raster(image);
    let square = pool.install(|| {
        let mut sweep = RotationalSweep::new(plan, element, bit_depth, iterations);
        let mut progress = Progress::new(reporter, config.operator.total_steps(iterations));
        progress.tick();
        let out = apply(config.operator, &mut sweep, &centered.data, bit_depth, &mut progress);
        debug!(steps = progress.completed(), "Progress finished");
        out
    });

    info!(
        operator = %config.operator,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Operator complete"
    );
    Ok(centered.crop(&square, bit_depth))
}

fn apply(
    operator: OperatorKind,
    sweep: &mut RotationalSweep,
    source: &Array2<i32>,
    bit_depth: BitDepth,
    progress: &mut Progress<'_>,
) -> Array2<i32> {
    match operator {
        OperatorKind::Opening => operators::opening(sweep, source, progress),
        OperatorKind::Closing => operators::closing(sweep, source, progress),
        OperatorKind::WhiteTopHat => operators::white_top_hat(sweep, source, progress),
        OperatorKind::BlackTopHat => operators::black_top_hat(sweep, source, progress),
        OperatorKind::Smoothing => operators::smoothing(sweep, source, progress),
        OperatorKind::EnhanceType1 => {
            operators::enhance(sweep, source, EnhanceVariant::Type1, bit_depth, progress)
        }
        OperatorKind::EnhanceType2 => {
            operators::enhance(sweep, source, EnhanceVariant::Type2, bit_depth, progress)
        }
    }
}
