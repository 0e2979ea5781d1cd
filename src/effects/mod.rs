//! Declarative drawing operations applied to raster images.
//!
//! Every effect implements [`ImageEffect`]: it receives the current image and a canvas and returns
//! a new image, never touching the one it was given. [`Effect`] is the closed set of built-in
//! variants used by documents and [`crate::ImageWithEffects`].

/// Filled progress arcs.
pub mod progress;
/// Filled rectangles.
pub mod rectangle;
/// Named shade masks.
pub mod shade;
/// Anchored and wrapped text.
pub mod text;

use crate::foundation::error::FxResult;
use crate::render::canvas::Canvas;
use crate::render::raster::RasterImage;

pub use progress::ProgressCircleEffect;
pub use rectangle::RectangleEffect;
pub use shade::{ShadeEffect, ShadeShape};
pub use text::{BlockTextEffect, TextEffect};

/// A drawing operation that produces a new image from an input image.
pub trait ImageEffect {
    /// Draw this effect over `image` and return the result.
    fn apply(&self, image: &RasterImage, canvas: &mut dyn Canvas) -> FxResult<RasterImage>;
}

/// Built-in effect variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// See [`RectangleEffect`].
    Rectangle(RectangleEffect),
    /// See [`ShadeEffect`].
    Shade(ShadeEffect),
    /// See [`ProgressCircleEffect`].
    ProgressCircle(ProgressCircleEffect),
    /// See [`TextEffect`].
    Text(TextEffect),
    /// See [`BlockTextEffect`].
    BlockText(BlockTextEffect),
}

impl Effect {
    /// Short variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::Rectangle(_) => "rectangle",
            Effect::Shade(_) => "shade",
            Effect::ProgressCircle(_) => "progress_circle",
            Effect::Text(_) => "text",
            Effect::BlockText(_) => "block_text",
        }
    }
}

impl ImageEffect for Effect {
    fn apply(&self, image: &RasterImage, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        match self {
            Effect::Rectangle(e) => e.apply(image, canvas),
            Effect::Shade(e) => e.apply(image, canvas),
            Effect::ProgressCircle(e) => e.apply(image, canvas),
            Effect::Text(e) => e.apply(image, canvas),
            Effect::BlockText(e) => e.apply(image, canvas),
        }
    }
}

impl From<RectangleEffect> for Effect {
    fn from(e: RectangleEffect) -> Self {
        Effect::Rectangle(e)
    }
}

impl From<ShadeEffect> for Effect {
    fn from(e: ShadeEffect) -> Self {
        Effect::Shade(e)
    }
}

impl From<ProgressCircleEffect> for Effect {
    fn from(e: ProgressCircleEffect) -> Self {
        Effect::ProgressCircle(e)
    }
}

impl From<TextEffect> for Effect {
    fn from(e: TextEffect) -> Self {
        Effect::Text(e)
    }
}

impl From<BlockTextEffect> for Effect {
    fn from(e: BlockTextEffect) -> Self {
        Effect::BlockText(e)
    }
}
