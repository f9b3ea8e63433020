pub mod pad;
pub mod rotate;

use ndarray::{s, Array2};

use crate::geometry::GeometryPlan;

pub use pad::{embed_mirror, embed_replicate};
pub use rotate::rotate;

/// Working canvases for one rotation sweep, allocated once per image and
/// reused for every angle.
#[derive(Clone, Debug)]
pub struct CanvasBuffers {
    /// Padded source, unrotated.
    pub padded: Array2<i32>,
    /// Rotation target, forward and back.
    pub rotated: Array2<i32>,
    pub eroded: Array2<i32>,
    pub dilated: Array2<i32>,
}

impl CanvasBuffers {
    pub fn new(plan: &GeometryPlan) -> Self {
        let dim = plan.canvas_dim();
        Self {
            padded: Array2::zeros(dim),
            rotated: Array2::zeros(dim),
            eroded: Array2::zeros(dim),
            dilated: Array2::zeros(dim),
        }
    }
}

/// Copy the image footprint at `(origin_dy, origin_dx)` out of a canvas.
pub fn crop_footprint(canvas: &Array2<i32>, plan: &GeometryPlan) -> Array2<i32> {
    let (dy, dx, n) = (plan.origin_dy, plan.origin_dx, plan.img_size);
    canvas.slice(s![dy..dy + n, dx..dx + n]).to_owned()
}
