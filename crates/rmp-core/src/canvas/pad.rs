//! Embedding a square image into its rotation canvas.

use ndarray::{s, Array2, Axis};

use crate::geometry::GeometryPlan;

/// Place `image` at the plan's origin and fill the surrounding canvas by
/// replicating edge pixels: edge rows straight up and down, edge columns
/// sideways, corner pixels into the four corner blocks.
pub fn embed_replicate(image: &Array2<i32>, plan: &GeometryPlan, canvas: &mut Array2<i32>) {
    let (dy, dx, n) = (plan.origin_dy, plan.origin_dx, plan.img_size);
    let (bottom, right) = (dy + n, dx + n);
    let last = n - 1;

    canvas.slice_mut(s![dy..bottom, dx..right]).assign(image);

    canvas.slice_mut(s![..dy, dx..right]).assign(&image.row(0));
    canvas
        .slice_mut(s![bottom.., dx..right])
        .assign(&image.row(last));
    canvas
        .slice_mut(s![dy..bottom, ..dx])
        .assign(&image.column(0).insert_axis(Axis(1)));
    canvas
        .slice_mut(s![dy..bottom, right..])
        .assign(&image.column(last).insert_axis(Axis(1)));

    canvas.slice_mut(s![..dy, ..dx]).fill(image[[0, 0]]);
    canvas.slice_mut(s![..dy, right..]).fill(image[[0, last]]);
    canvas.slice_mut(s![bottom.., ..dx]).fill(image[[last, 0]]);
    canvas.slice_mut(s![bottom.., right..]).fill(image[[last, last]]);
}

/// Place `image` at the plan's origin and fill the surrounding canvas by
/// mirroring.
///
/// Rows are mirrored sideways first, walking outward from each image edge
/// and inward through the image. Whole canvas rows are then mirrored above
/// and below, so the corners take mirrored copies of the side strips. A
/// margin wider than the image is only partly filled; the rest stays zero.
pub fn embed_mirror(image: &Array2<i32>, plan: &GeometryPlan, canvas: &mut Array2<i32>) {
    let (dy, dx, n) = (plan.origin_dy, plan.origin_dx, plan.img_size);
    let (rows, cols) = canvas.dim();
    let (bottom, right) = (dy + n, dx + n);

    canvas.fill(0);
    canvas.slice_mut(s![dy..bottom, dx..right]).assign(image);

    for (src, mut row) in image
        .rows()
        .into_iter()
        .zip(canvas.slice_mut(s![dy..bottom, ..]).rows_mut())
    {
        for k in 0..dx.min(n) {
            row[dx - 1 - k] = src[k];
        }
        for k in 0..(cols - right).min(n) {
            row[right + k] = src[n - 1 - k];
        }
    }

    for k in 0..dy.min(rows - dy) {
        let src = canvas.row(dy + k).to_owned();
        canvas.row_mut(dy - 1 - k).assign(&src);
    }
    for k in 0..(rows - bottom).min(bottom) {
        let src = canvas.row(bottom - 1 - k).to_owned();
        canvas.row_mut(bottom + k).assign(&src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementShape, StructuringElement};

    fn plan(size: usize) -> GeometryPlan {
        let se = StructuringElement::new(ElementShape::Square, 3).unwrap();
        GeometryPlan::new(size, size, &se).unwrap()
    }

    fn ramp(n: usize) -> Array2<i32> {
        Array2::from_shape_fn((n, n), |(r, c)| (r * n + c) as i32 + 1)
    }

    #[test]
    fn test_replicate_extends_edges() {
        let plan = plan(4);
        let image = ramp(4);
        let mut canvas = Array2::from_elem(plan.canvas_dim(), -1);
        embed_replicate(&image, &plan, &mut canvas);

        let (dy, dx) = (plan.origin_dy, plan.origin_dx);
        let (rows, cols) = canvas.dim();
        assert!(canvas.iter().all(|&v| v > 0));
        // Corner blocks.
        assert_eq!(canvas[[0, 0]], image[[0, 0]]);
        assert_eq!(canvas[[0, cols - 1]], image[[0, 3]]);
        assert_eq!(canvas[[rows - 1, 0]], image[[3, 0]]);
        assert_eq!(canvas[[rows - 1, cols - 1]], image[[3, 3]]);
        // Edge strips.
        assert_eq!(canvas[[0, dx + 2]], image[[0, 2]]);
        assert_eq!(canvas[[rows - 1, dx + 1]], image[[3, 1]]);
        assert_eq!(canvas[[dy + 1, 0]], image[[1, 0]]);
        assert_eq!(canvas[[dy + 2, cols - 1]], image[[2, 3]]);
    }

    #[test]
    fn test_mirror_reflects_rows_and_columns() {
        let plan = plan(4);
        let image = ramp(4);
        let mut canvas = Array2::zeros(plan.canvas_dim());
        embed_mirror(&image, &plan, &mut canvas);

        let (dy, dx) = (plan.origin_dy, plan.origin_dx);
        // Sideways: first mirrored column repeats the edge column.
        assert_eq!(canvas[[dy, dx - 1]], image[[0, 0]]);
        assert_eq!(canvas[[dy, dx - 2]], image[[0, 1]]);
        assert_eq!(canvas[[dy + 1, dx + 4]], image[[1, 3]]);
        assert_eq!(canvas[[dy + 1, dx + 5]], image[[1, 2]]);
        // Vertically: whole rows, corners included.
        assert_eq!(canvas[[dy - 1, dx + 2]], image[[0, 2]]);
        assert_eq!(canvas[[dy - 2, dx + 2]], image[[1, 2]]);
        assert_eq!(canvas[[dy - 1, dx - 1]], image[[0, 0]]);
        assert_eq!(canvas[[dy + 4, dx + 1]], image[[3, 1]]);
        assert_eq!(canvas[[dy + 5, dx + 1]], image[[2, 1]]);
    }

    #[test]
    fn test_mirror_leaves_far_margin_unfilled() {
        // Margin (7 px) wider than the image (4 px).
        let plan = plan(4);
        assert!(plan.origin_dx > 4);
        let image = ramp(4);
        let mut canvas = Array2::from_elem(plan.canvas_dim(), -1);
        embed_mirror(&image, &plan, &mut canvas);

        let (dy, dx) = (plan.origin_dy, plan.origin_dx);
        assert_eq!(canvas[[dy, dx - 4]], image[[0, 3]]);
        assert_eq!(canvas[[dy, dx - 5]], 0);
        assert_eq!(canvas[[dy, 0]], 0);
    }
}
