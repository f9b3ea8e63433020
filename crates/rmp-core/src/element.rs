use std::fmt;
use std::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ELEMENT_SIZE, MIN_ELEMENT_SIZE};
use crate::error::{Result, RmpError};

/// Shape of a flat structuring element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementShape {
    #[default]
    Disk,
    Line,
    Square,
}

impl ElementShape {
    pub const ALL: [ElementShape; 3] = [Self::Disk, Self::Line, Self::Square];

    /// One-letter tag used in result titles.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Disk => "D",
            Self::Line => "L",
            Self::Square => "S",
        }
    }

    /// Mask dimensions `(rows, cols)` for an element of the given size.
    pub fn dims(self, size: u32) -> (usize, usize) {
        let size = size as usize;
        match self {
            Self::Line => (1, size),
            Self::Disk | Self::Square => (size, size),
        }
    }
}

impl fmt::Display for ElementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disk => write!(f, "Disk"),
            Self::Line => write!(f, "Line"),
            Self::Square => write!(f, "Square"),
        }
    }
}

impl FromStr for ElementShape {
    type Err = RmpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disk" | "d" => Ok(Self::Disk),
            "line" | "l" => Ok(Self::Line),
            "square" | "s" => Ok(Self::Square),
            _ => Err(RmpError::InvalidValue {
                field: "structuring element shape",
                value: s.to_string(),
            }),
        }
    }
}

/// Check that an element size is odd and within `3..=99`.
pub fn validate_element_size(size: u32) -> Result<()> {
    if size % 2 == 0 {
        return Err(RmpError::EvenElementSize(size));
    }
    if !(MIN_ELEMENT_SIZE..=MAX_ELEMENT_SIZE).contains(&size) {
        return Err(RmpError::ElementSizeOutOfRange {
            size,
            min: MIN_ELEMENT_SIZE,
            max: MAX_ELEMENT_SIZE,
        });
    }
    Ok(())
}

/// One member cell of a structuring element, relative to its center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementOffset {
    pub dy: isize,
    pub dx: isize,
    pub weight: i32,
}

/// Flat structuring element.
///
/// `weights[[r, c]]` is `Some(0)` for member cells and `None` for cells that
/// take no part in erosion or dilation.
#[derive(Clone, Debug)]
pub struct StructuringElement {
    pub shape: ElementShape,
    pub size: u32,
    pub weights: Array2<Option<i32>>,
    offsets: Vec<ElementOffset>,
}

impl StructuringElement {
    pub fn new(shape: ElementShape, size: u32) -> Result<Self> {
        validate_element_size(size)?;

        let weights = match shape {
            ElementShape::Disk => disk_mask(size),
            ElementShape::Line | ElementShape::Square => {
                Array2::from_elem(shape.dims(size), Some(0))
            }
        };
        Ok(Self::from_weights(shape, size, weights))
    }

    /// Element with an arbitrary member mask, centered on the middle cell.
    pub(crate) fn from_weights(
        shape: ElementShape,
        size: u32,
        weights: Array2<Option<i32>>,
    ) -> Self {
        let (rows, cols) = weights.dim();
        let (half_y, half_x) = ((rows / 2) as isize, (cols / 2) as isize);
        let offsets = weights
            .indexed_iter()
            .filter_map(|((r, c), w)| {
                w.map(|weight| ElementOffset {
                    dy: r as isize - half_y,
                    dx: c as isize - half_x,
                    weight,
                })
            })
            .collect();

        Self {
            shape,
            size,
            weights,
            offsets,
        }
    }

    /// Mask rows.
    pub fn size_y(&self) -> usize {
        self.weights.nrows()
    }

    /// Mask columns.
    pub fn size_x(&self) -> usize {
        self.weights.ncols()
    }

    pub fn half_y(&self) -> usize {
        self.size_y() / 2
    }

    pub fn half_x(&self) -> usize {
        self.size_x() / 2
    }

    /// Member cells in row-major order.
    pub fn offsets(&self) -> &[ElementOffset] {
        &self.offsets
    }

    pub fn is_member(&self, row: usize, col: usize) -> bool {
        self.weights
            .get((row, col))
            .is_some_and(|w| w.is_some())
    }
}

/// Filled dot of diameter `size` centered on the middle cell: a cell is a
/// member when its distance to the center is at most `size / 2`.
fn disk_mask(size: u32) -> Array2<Option<i32>> {
    let n = size as usize;
    let radius = f64::from(size) / 2.0;
    let r2 = radius * radius;
    let center = (n / 2) as f64;

    Array2::from_shape_fn((n, n), |(y, x)| {
        let dy = y as f64 - center;
        let dx = x as f64 - center;
        (dx * dx + dy * dy <= r2).then_some(0)
    })
}
