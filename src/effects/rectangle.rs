use crate::effects::ImageEffect;
use crate::foundation::color::Color;
use crate::foundation::core::Rect;
use crate::foundation::error::{FxError, FxResult};
use crate::render::canvas::{Canvas, draw_over};
use crate::render::raster::RasterImage;

/// Fills a rectangle, in image pixel coordinates, with a solid color.
#[derive(Clone, Debug, PartialEq)]
pub struct RectangleEffect {
    rect: Rect,
    color: Color,
}

impl RectangleEffect {
    /// Rectangle effect. Parts of `rect` outside the image are clipped.
    ///
    /// Errors when any coordinate is non-finite.
    pub fn new(rect: Rect, color: Color) -> FxResult<Self> {
        if ![rect.x0, rect.y0, rect.x1, rect.y1]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(FxError::validation(format!(
                "rectangle coordinates must be finite, got {rect:?}"
            )));
        }
        Ok(Self {
            rect: rect.abs(),
            color,
        })
    }

    /// The filled rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The fill color.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl ImageEffect for RectangleEffect {
    fn apply(&self, image: &RasterImage, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        draw_over(image, canvas, |c| {
            c.set_fill_color(self.color)?;
            c.fill_rect(self.rect)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/rectangle.rs"]
mod tests;
