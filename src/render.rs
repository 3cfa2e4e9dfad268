pub mod frames;
pub mod raster;
