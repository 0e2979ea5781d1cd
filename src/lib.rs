//! overlayfx draws declarative overlays onto raster images on the CPU.
//!
//! - Build an [`ImageWithEffects`] from a base [`RasterImage`] and a list of [`Effect`]s (or load
//!   them from an [`EffectDocument`]), then render it on a [`CpuCanvas`]
//! - Fit a crop path into a frame with [`fit_path`] and draw the shaded [`CropOverlay`]
//! - Arrange anchored [`Tile`]s with a [`TileView`] and a [`TileLayout`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;
pub(crate) mod text;

/// Crop-path fitting and the crop overlay.
pub mod crop;
/// Injectable diagnostics sink.
pub mod diagnostics;
/// Built-in image effects.
pub mod effects;
/// Redraw request hand-off to a presentation thread.
pub mod present;
/// Canvas, CPU backend and the effect pipeline.
pub mod render;
/// JSON effect documents.
pub mod scene;
/// Tile layout geometry.
pub mod tile;

pub use crate::crop::{
    CropOverlay, CropOverlayConfig, FittedPath, crop_rect, fit_path, place_path, scale_path,
};
pub use crate::diagnostics::{
    DiagnosticLevel, Diagnostics, RecordingDiagnostics, TracingDiagnostics,
};
pub use crate::effects::{
    BlockTextEffect, Effect, ImageEffect, ProgressCircleEffect, RectangleEffect, ShadeEffect,
    ShadeShape, TextEffect,
};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, AnchorPosition, BezPath, Point, Rect, Size, TextAlign, Vec2,
};
pub use crate::foundation::error::{FxError, FxResult};
pub use crate::present::{PresentQueue, RedrawRequester};
pub use crate::render::canvas::{Canvas, FillRule, draw_over};
pub use crate::render::cpu::{CpuCanvas, CpuCanvasOpts};
pub use crate::render::pipeline::{BatchOpts, ImageWithEffects, render_batch};
pub use crate::render::raster::RasterImage;
pub use crate::scene::{EffectDef, EffectDocument, FontDef};
pub use crate::text::font::Font;
pub use crate::text::wrap::wrap_words;
pub use crate::tile::{
    RowLayout, Tile, TileArrangement, TileDataSource, TileId, TileLayout, TileView,
};
