use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::{Result, RmpError};
use crate::raster::{BitDepth, Raster};

/// Load an 8-bit or 16-bit grayscale image file.
///
/// Color images and other pixel formats are rejected rather than converted.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let img = image::open(path)?;
    raster_from_image(img)
}

/// Convert a decoded image into a raster, keeping its bit depth.
pub fn raster_from_image(img: DynamicImage) -> Result<Raster> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (pixels, bit_depth): (Vec<u16>, BitDepth) = match img {
        DynamicImage::ImageLuma8(buf) => (
            buf.into_raw().into_iter().map(u16::from).collect(),
            BitDepth::Eight,
        ),
        DynamicImage::ImageLuma16(buf) => (buf.into_raw(), BitDepth::Sixteen),
        other => {
            return Err(RmpError::UnsupportedPixelFormat(format!(
                "{:?}",
                other.color()
            )))
        }
    };

    let data = Array2::from_shape_vec((height, width), pixels)
        .map_err(|_| RmpError::InvalidDimensions { width, height })?;
    Raster::new(data, bit_depth)
}

/// Save a raster at its own bit depth. The format follows the file
/// extension; unknown extensions are written as TIFF.
pub fn save_raster(raster: &Raster, path: &Path) -> Result<()> {
    let (width, height) = (raster.width(), raster.height());
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ImageFormat::from_extension(ext).unwrap_or(ImageFormat::Tiff),
        None => ImageFormat::Tiff,
    };
    let bad_size = || RmpError::InvalidDimensions { width, height };

    match raster.bit_depth {
        BitDepth::Eight => {
            let pixels: Vec<u8> = raster.data.iter().map(|&v| v.min(0xff) as u8).collect();
            let img = ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(width as u32, height as u32, pixels)
                .ok_or_else(bad_size)?;
            img.save_with_format(path, format)?;
        }
        BitDepth::Sixteen => {
            let pixels: Vec<u16> = raster.data.iter().copied().collect();
            let img =
                ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(width as u32, height as u32, pixels)
                    .ok_or_else(bad_size)?;
            img.save_with_format(path, format)?;
        }
    }
    Ok(())
}
