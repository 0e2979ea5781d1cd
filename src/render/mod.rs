/// Canvas capability consumed by effects.
pub mod canvas;
/// `vello_cpu` canvas implementation.
pub mod cpu;
/// Image-with-effects pipeline.
pub mod pipeline;
/// Immutable raster images.
pub mod raster;
