mod common;

use ndarray::Array2;

use rmp_core::io::image_io::{load_raster, save_raster};
use rmp_core::raster::BitDepth;

use common::*;

#[test]
fn test_roundtrip_png_8bit() {
    let src = noise(5, 7, 13);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.png");

    save_raster(&src, &path).unwrap();
    let loaded = load_raster(&path).unwrap();

    assert_eq!(loaded, src);
}

#[test]
fn test_roundtrip_tiff_16bit() {
    let data = Array2::from_shape_fn((4, 6), |(r, c)| (r * 10_000 + c * 1_000) as u16);
    let src = raster(data, BitDepth::Sixteen);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.tiff");

    save_raster(&src, &path).unwrap();
    let loaded = load_raster(&path).unwrap();

    assert_eq!(loaded.bit_depth, BitDepth::Sixteen);
    assert_eq!(loaded.data, src.data);
}

#[test]
fn test_unknown_extension_is_written_as_tiff() {
    let src = flat(3, 3, 9, BitDepth::Eight);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.dat");

    save_raster(&src, &path).unwrap();
    let format = image::ImageFormat::from_path(&path).ok();
    assert_eq!(format, None);
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_raster(&dir.path().join("absent.png")).is_err());
}
