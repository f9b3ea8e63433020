use std::ops::Range;

use crate::consts::{CANVAS_SCALE_COEF, MAX_IMAGE_SIZE, SCAN_WINDOW_SCALE};
use crate::element::StructuringElement;
use crate::error::{Result, RmpError};

/// Axis-aligned bounds of the circular region of a canvas that rotation
/// leaves free of edge artifacts. Bounds may reach outside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanWindow {
    pub start_x: isize,
    pub end_x: isize,
    pub start_y: isize,
    pub end_y: isize,
}

impl ScanWindow {
    /// Rows a morphology pass visits: the window shrunk by the element's
    /// half height and clipped to `canvas_rows`.
    pub fn rows(&self, half_se_y: usize, canvas_rows: usize) -> Range<usize> {
        shrink(self.start_y, self.end_y, half_se_y, canvas_rows)
    }

    /// Columns a morphology pass visits.
    pub fn cols(&self, half_se_x: usize, canvas_cols: usize) -> Range<usize> {
        shrink(self.start_x, self.end_x, half_se_x, canvas_cols)
    }
}

fn shrink(start: isize, end: isize, half: usize, limit: usize) -> Range<usize> {
    let half = half as isize;
    let hi = (end - half).clamp(0, limit as isize) as usize;
    let lo = ((start + half).max(0) as usize).min(hi);
    lo..hi
}

/// Sizes and offsets derived once per image and structuring element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeometryPlan {
    /// Side of the square working image.
    pub img_size: usize,
    pub half_img_size: usize,
    pub se_size_x: usize,
    pub se_size_y: usize,
    pub half_se_x: usize,
    pub half_se_y: usize,
    /// Rotation canvas width.
    pub canvas_x: usize,
    /// Rotation canvas height.
    pub canvas_y: usize,
    pub half_canvas_x: usize,
    pub half_canvas_y: usize,
    /// Column of the image's left edge inside the canvas.
    pub origin_dx: usize,
    /// Row of the image's top edge inside the canvas.
    pub origin_dy: usize,
    pub window: ScanWindow,
}

impl GeometryPlan {
    /// Plan the canvas for a `width` x `height` source image.
    ///
    /// The canvas is `2 * round(half_img * 2.0) + 2 * se` per axis, which
    /// holds the image at any rotation angle.
    pub fn new(width: usize, height: usize, element: &StructuringElement) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RmpError::InvalidDimensions { width, height });
        }
        if width > MAX_IMAGE_SIZE || height > MAX_IMAGE_SIZE {
            return Err(RmpError::ImageTooLarge {
                width,
                height,
                max: MAX_IMAGE_SIZE,
            });
        }

        let img_size = width.max(height);
        let half_img_size = img_size / 2;
        let se_size_x = element.size_x();
        let se_size_y = element.size_y();

        let scaled_half = (half_img_size as f64 * CANVAS_SCALE_COEF).round() as usize;
        let canvas_x = 2 * scaled_half + 2 * se_size_x;
        let canvas_y = 2 * scaled_half + 2 * se_size_y;
        let half_canvas_x = canvas_x / 2;
        let half_canvas_y = canvas_y / 2;

        // Always true for a non-empty image; guards the offsets below.
        if half_canvas_x < half_img_size || half_canvas_y < half_img_size {
            return Err(RmpError::InvalidDimensions { width, height });
        }

        let radius = (half_canvas_x.min(half_canvas_y) as f64 * SCAN_WINDOW_SCALE) as isize;
        let (cx, cy) = (half_canvas_x as isize, half_canvas_y as isize);
        let window = ScanWindow {
            start_x: cx - radius,
            end_x: cx + radius,
            start_y: cy - radius,
            end_y: cy + radius,
        };

        Ok(Self {
            img_size,
            half_img_size,
            se_size_x,
            se_size_y,
            half_se_x: se_size_x / 2,
            half_se_y: se_size_y / 2,
            canvas_x,
            canvas_y,
            half_canvas_x,
            half_canvas_y,
            origin_dx: half_canvas_x - half_img_size,
            origin_dy: half_canvas_y - half_img_size,
            window,
        })
    }

    /// Canvas shape as `(rows, cols)`.
    pub fn canvas_dim(&self) -> (usize, usize) {
        (self.canvas_y, self.canvas_x)
    }

    /// Rows visited by erosion and dilation.
    pub fn scan_rows(&self) -> Range<usize> {
        self.window.rows(self.half_se_y, self.canvas_y)
    }

    /// Columns visited by erosion and dilation.
    pub fn scan_cols(&self) -> Range<usize> {
        self.window.cols(self.half_se_x, self.canvas_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementShape;

    fn element(shape: ElementShape, size: u32) -> StructuringElement {
        StructuringElement::new(shape, size).unwrap()
    }

    #[test]
    fn test_square_canvas_for_disk() {
        let plan = GeometryPlan::new(100, 100, &element(ElementShape::Disk, 5)).unwrap();
        assert_eq!(plan.img_size, 100);
        assert_eq!(plan.half_img_size, 50);
        assert_eq!((plan.canvas_x, plan.canvas_y), (210, 210));
        assert_eq!((plan.origin_dx, plan.origin_dy), (55, 55));
        assert_eq!(
            plan.window,
            ScanWindow {
                start_x: 0,
                end_x: 210,
                start_y: 0,
                end_y: 210
            }
        );
        assert_eq!(plan.scan_rows(), 2..208);
        assert_eq!(plan.scan_cols(), 2..208);
    }

    #[test]
    fn test_rectangular_image_uses_long_side() {
        let plan = GeometryPlan::new(40, 17, &element(ElementShape::Square, 3)).unwrap();
        assert_eq!(plan.img_size, 40);
        assert_eq!((plan.canvas_x, plan.canvas_y), (86, 86));
        assert_eq!(plan.origin_dy, 23);
    }

    #[test]
    fn test_line_canvas_is_not_square() {
        let plan = GeometryPlan::new(20, 20, &element(ElementShape::Line, 9)).unwrap();
        assert_eq!((plan.canvas_x, plan.canvas_y), (58, 42));
        assert_eq!((plan.half_se_x, plan.half_se_y), (4, 0));
        // Radius follows the shorter half side.
        assert_eq!(plan.window.start_x, 29 - 21);
        assert_eq!(plan.window.end_x, 29 + 21);
        assert_eq!(plan.scan_rows(), 0..42);
        assert_eq!(plan.scan_cols(), 12..46);
    }

    #[test]
    fn test_image_fits_inside_canvas() {
        for size in [1usize, 2, 3, 8, 33, 64] {
            let plan = GeometryPlan::new(size, size, &element(ElementShape::Disk, 3)).unwrap();
            assert!(plan.origin_dx + plan.img_size <= plan.canvas_x);
            assert!(plan.origin_dy + plan.img_size <= plan.canvas_y);
        }
    }

    #[test]
    fn test_rejects_oversized_and_empty_images() {
        let se = element(ElementShape::Disk, 3);
        assert!(matches!(
            GeometryPlan::new(2049, 10, &se),
            Err(RmpError::ImageTooLarge { .. })
        ));
        assert!(GeometryPlan::new(2048, 2048, &se).is_ok());
        assert!(matches!(
            GeometryPlan::new(0, 10, &se),
            Err(RmpError::InvalidDimensions { .. })
        ));
    }
}
