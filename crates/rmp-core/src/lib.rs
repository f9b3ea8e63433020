pub mod canvas;
pub mod consts;
pub mod element;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod io;
pub mod morphology;
pub mod pipeline;
pub mod raster;
pub mod workers;
