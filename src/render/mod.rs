pub mod composite;
pub mod raster;
pub mod surface;
