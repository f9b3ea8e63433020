use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rmp_core::element::StructuringElement;
use rmp_core::geometry::GeometryPlan;
use rmp_core::io::image_io::load_raster;

use super::ShapeArg;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    /// Structuring element shape used to plan the canvas
    #[arg(long, value_enum, default_value = "disk")]
    pub shape: ShapeArg,

    /// Structuring element size used to plan the canvas
    #[arg(long, default_value_t = 3)]
    pub size: u32,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = load_raster(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let element = StructuringElement::new(args.shape.into(), args.size)?;
    let plan = GeometryPlan::new(raster.width(), raster.height(), &element)?;

    let (min, max) = raster
        .data
        .iter()
        .fold((u16::MAX, u16::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", raster.width(), raster.height());
    println!("Bit depth:   {}", raster.bit_depth);
    println!("Range:       {min}..{max}");
    println!("Element:     {} {}", element.shape, element.size);
    println!("Canvas:      {}x{}", plan.canvas_x, plan.canvas_y);
    println!("Origin:      ({}, {})", plan.origin_dx, plan.origin_dy);

    let rows = plan.window.rows(plan.half_se_y, plan.canvas_y);
    let cols = plan.window.cols(plan.half_se_x, plan.canvas_x);
    println!("Scan rows:   {}..{}", rows.start, rows.end);
    println!("Scan cols:   {}..{}", cols.start, cols.end);

    let canvas_mb = (plan.canvas_x * plan.canvas_y * 4 * 4) as f64 / (1024.0 * 1024.0);
    println!("Buffers:     {:.1} MB", canvas_mb);

    Ok(())
}
