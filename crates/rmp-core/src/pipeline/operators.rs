//! The seven operators, built from rotational sweeps and contrast stages.
//!
//! Every function takes the square working image and returns a square
//! image of the same size. The caller reports the start step; each
//! operator reports the rest.

use ndarray::{Array2, Zip};
use tracing::debug;

use crate::filters::contrast::enhance_contrast;
use crate::morphology::MorphOp;
use crate::pipeline::aggregate::{Padding, RotationalSweep};
use crate::pipeline::types::{EnhanceVariant, Progress};
use crate::raster::BitDepth;

/// Union of openings at every orientation, clamped to the source.
pub fn opening(
    sweep: &mut RotationalSweep,
    source: &Array2<i32>,
    progress: &mut Progress<'_>,
) -> Array2<i32> {
    let out = sweep.run(source, MorphOp::Opening, Padding::Replicate, progress);
    progress.tick();
    out
}

/// Intersection of closings at every orientation, clamped to the source.
pub fn closing(
    sweep: &mut RotationalSweep,
    source: &Array2<i32>,
    progress: &mut Progress<'_>,
) -> Array2<i32> {
    let out = sweep.run(source, MorphOp::Closing, Padding::Replicate, progress);
    progress.tick();
    out
}

/// `max(source - opening, 0)`: bright details narrower than the element.
pub fn white_top_hat(
    sweep: &mut RotationalSweep,
    source: &Array2<i32>,
    progress: &mut Progress<'_>,
) -> Array2<i32> {
    let opened = opening(sweep, source, progress);
    let out = residual(source, &opened);
    progress.tick();
    out
}

/// `max(closing - source, 0)`: dark details narrower than the element.
pub fn black_top_hat(
    sweep: &mut RotationalSweep,
    source: &Array2<i32>,
    progress: &mut Progress<'_>,
) -> Array2<i32> {
    let closed = closing(sweep, source, progress);
    let out = residual(&closed, source);
    progress.tick();
    out
}

/// Average of open-close and close-open filtering.
///
/// The second sweep of each branch runs on a mirror-padded canvas and is
/// clamped against its own input: the closing of the opened image stays at
/// or above it, the opening of the closed image at or below it.
pub fn smoothing(
    sweep: &mut RotationalSweep,
    source: &Array2<i32>,
    progress: &mut Progress<'_>,
) -> Array2<i32> {
    let opened = sweep.run(source, MorphOp::Opening, Padding::Replicate, progress);
    let open_close = sweep.run(&opened, MorphOp::Closing, Padding::Mirror, progress);
    debug!("Smoothing: open-close done");
    progress.tick();

    let closed = sweep.run(source, MorphOp::Closing, Padding::Replicate, progress);
    let close_open = sweep.run(&closed, MorphOp::Opening, Padding::Mirror, progress);
    debug!("Smoothing: close-open done");
    progress.tick();

    let mut out = open_close;
    Zip::from(&mut out)
        .and(&close_open)
        .for_each(|a, &b| *a = (*a + b) / 2);
    progress.tick();
    out
}

/// Multiscale contrast enhancement.
///
/// Both top-hats go through stretch, equalize and stretch; the
/// source plus the bright residual minus the dark residual goes through the
/// same chain once more.
pub fn enhance(
    sweep: &mut RotationalSweep,
    source: &Array2<i32>,
    variant: EnhanceVariant,
    bit_depth: BitDepth,
    progress: &mut Progress<'_>,
) -> Array2<i32> {
    let levels = variant.levels(bit_depth);

    let opened = sweep.run(source, MorphOp::Opening, Padding::Replicate, progress);
    let closed = sweep.run(source, MorphOp::Closing, Padding::Replicate, progress);

    let white = residual(source, &opened);
    progress.tick();
    let black = residual(&closed, source);
    progress.tick();

    let white = enhance_contrast(&white, bit_depth, levels.white, |_| progress.tick());
    let black = enhance_contrast(&black, bit_depth, levels.black, |_| progress.tick());

    let mut combined = source.clone();
    Zip::from(&mut combined)
        .and(&white)
        .and(&black)
        .for_each(|c, &w, &b| *c = *c + w - b);
    progress.tick();

    enhance_contrast(&combined, bit_depth, levels.combined, |_| progress.tick())
}

/// `max(minuend - subtrahend, 0)` per pixel.
fn residual(minuend: &Array2<i32>, subtrahend: &Array2<i32>) -> Array2<i32> {
    let mut out = minuend.clone();
    Zip::from(&mut out)
        .and(subtrahend)
        .for_each(|a, &b| *a = (*a - b).max(0));
    out
}
