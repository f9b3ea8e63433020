use std::fmt;

use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RmpError};

/// Bit depth of a single-channel raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitDepth {
    Eight,
    Sixteen,
}

impl BitDepth {
    /// Largest representable pixel value (255 or 65535).
    pub fn upper_limit(self) -> i32 {
        match self {
            Self::Eight => 0xff,
            Self::Sixteen => 0xffff,
        }
    }

    /// Number of gray levels, `upper_limit + 1`.
    pub fn gray_levels(self) -> usize {
        self.upper_limit() as usize + 1
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = RmpError;

    fn try_from(bits: u8) -> Result<Self> {
        match bits {
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            other => Err(RmpError::UnsupportedBitDepth(other)),
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// A single-channel integer image as exchanged with the host.
///
/// Pixel values lie in `[0, bit_depth.upper_limit()]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<u16>,
    pub bit_depth: BitDepth,
}

impl Raster {
    /// Wrap pixel data, rejecting values above the bit depth's limit.
    pub fn new(data: Array2<u16>, bit_depth: BitDepth) -> Result<Self> {
        let raster = Self { data, bit_depth };
        raster.validate()?;
        Ok(raster)
    }

    /// Check every pixel against the bit depth's limit.
    pub fn validate(&self) -> Result<()> {
        let limit = self.bit_depth.upper_limit();
        match self.data.iter().find(|&&v| i32::from(v) > limit) {
            Some(&value) => Err(RmpError::PixelOutOfRange {
                value,
                bit_depth: self.bit_depth.bits(),
            }),
            None => Ok(()),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Square working copy of a raster, with the source centered on a zero
/// background when it is not already square.
#[derive(Clone, Debug)]
pub struct CenteredImage {
    /// Square pixel data, side = max(width, height).
    pub data: Array2<i32>,
    /// Column of the source's left edge inside `data`.
    pub offset_x: usize,
    /// Row of the source's top edge inside `data`.
    pub offset_y: usize,
    pub width: usize,
    pub height: usize,
}

impl CenteredImage {
    pub fn from_raster(raster: &Raster) -> Self {
        let (height, width) = raster.data.dim();
        let side = width.max(height);
        let offset_x = (side - width) / 2;
        let offset_y = (side - height) / 2;

        let mut data = Array2::<i32>::zeros((side, side));
        data.slice_mut(s![offset_y..offset_y + height, offset_x..offset_x + width])
            .zip_mut_with(&raster.data, |dst, &src| *dst = i32::from(src));

        Self {
            data,
            offset_x,
            offset_y,
            width,
            height,
        }
    }

    /// Side length of the square image.
    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    /// Cut a processed square image back to the source footprint.
    pub fn crop(&self, square: &Array2<i32>, bit_depth: BitDepth) -> Raster {
        let limit = bit_depth.upper_limit();
        let data = square
            .slice(s![
                self.offset_y..self.offset_y + self.height,
                self.offset_x..self.offset_x + self.width
            ])
            .mapv(|v| v.clamp(0, limit) as u16);
        Raster { data, bit_depth }
    }
}
