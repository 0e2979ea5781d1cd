//! Crop-path fitting and the shaded crop overlay.

/// Pure path fitting and placement.
pub mod fit;
/// Memoized overlay state and drawing.
pub mod overlay;

pub use fit::{FittedPath, crop_rect, fit_path, place_path, scale_path};
pub use overlay::{CropOverlay, CropOverlayConfig};
