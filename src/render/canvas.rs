use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Rect, Size, TextAlign};
use crate::foundation::error::FxResult;
use crate::render::raster::RasterImage;
use crate::text::font::Font;

/// Winding rule used when filling paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Nonzero winding.
    #[default]
    NonZero,
    /// Even-odd parity; overlapping sub-paths cut holes.
    EvenOdd,
}

/// A 2D raster drawing surface with begin/end context semantics.
///
/// Drawing calls are only valid between [`Canvas::begin_context`] and [`Canvas::end_context`];
/// `end_context` returns a fresh image and leaves the canvas ready for the next context. Fill and
/// stroke state resets to opaque black and [`FillRule::NonZero`] at every `begin_context`.
///
/// Canvases are single-owner objects. Render on background threads by giving each thread its own
/// canvas.
pub trait Canvas {
    /// Open a drawing context of `width` x `height` pixels.
    fn begin_context(&mut self, width: u32, height: u32) -> FxResult<()>;

    /// Composite `image` over the context with its top-left corner at `origin`.
    fn draw_image(&mut self, image: &RasterImage, origin: Point) -> FxResult<()>;

    /// Set the color used by [`Canvas::fill_path`].
    fn set_fill_color(&mut self, color: Color) -> FxResult<()>;

    /// Set the color used by [`Canvas::stroke_path`].
    fn set_stroke_color(&mut self, color: Color) -> FxResult<()>;

    /// Set the winding rule used by [`Canvas::fill_path`].
    fn set_fill_rule(&mut self, rule: FillRule) -> FxResult<()>;

    /// Fill a path with the current fill color.
    fn fill_path(&mut self, path: &BezPath) -> FxResult<()>;

    /// Erase existing content wherever `path` covers, under the current fill rule.
    ///
    /// Covered pixels become transparent; partially covered edge pixels lose coverage
    /// proportionally.
    fn clear_path(&mut self, path: &BezPath) -> FxResult<()>;

    /// Stroke a path with the current stroke color.
    fn stroke_path(&mut self, path: &BezPath, width: f64) -> FxResult<()>;

    /// Size of `text` laid out in `font`, honoring explicit newlines.
    fn measure_text(&mut self, text: &str, font: &Font) -> FxResult<Size>;

    /// Draw `text` inside `rect`, aligning each line horizontally within the rect width.
    fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        font: &Font,
        color: Color,
        align: TextAlign,
    ) -> FxResult<()>;

    /// Close the context and return the rendered image.
    fn end_context(&mut self) -> FxResult<RasterImage>;

    /// Fill an axis-aligned rectangle with the current fill color.
    fn fill_rect(&mut self, rect: Rect) -> FxResult<()> {
        let path = kurbo::Shape::to_path(&rect, 0.1);
        self.fill_path(&path)
    }
}

/// Draw on top of `image` and return the result.
///
/// Opens a context sized to `image`, draws `image` at the origin, runs `draw`, then closes the
/// context. The context is closed even when `draw` fails so the canvas stays reusable.
pub fn draw_over(
    image: &RasterImage,
    canvas: &mut dyn Canvas,
    draw: impl FnOnce(&mut dyn Canvas) -> FxResult<()>,
) -> FxResult<RasterImage> {
    canvas.begin_context(image.width(), image.height())?;
    let drawn = canvas
        .draw_image(image, Point::ORIGIN)
        .and_then(|()| draw(&mut *canvas));
    let out = canvas.end_context();
    drawn?;
    out
}
