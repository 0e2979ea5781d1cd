use crate::effects::ImageEffect;
use crate::foundation::color::Color;
use crate::foundation::core::{AnchorPosition, Point, Rect, TextAlign};
use crate::foundation::error::{FxError, FxResult};
use crate::render::canvas::{Canvas, draw_over};
use crate::render::raster::RasterImage;
use crate::text::font::Font;
use crate::text::wrap::wrap_words;

/// Text pinned to an anchor point; explicit `\n` starts a new line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextEffect {
    anchor: Point,
    anchor_position: AnchorPosition,
    text: String,
    font: Font,
    color: Color,
    align: TextAlign,
}

impl TextEffect {
    /// Left-aligned text whose `anchor_position` lands on `anchor`.
    pub fn new(
        anchor: Point,
        anchor_position: AnchorPosition,
        text: impl Into<String>,
        font: Font,
        color: Color,
    ) -> FxResult<Self> {
        ensure_finite_point(anchor)?;
        Ok(Self {
            anchor,
            anchor_position,
            text: text.into(),
            font,
            color,
            align: TextAlign::Left,
        })
    }

    /// Horizontal alignment of lines within the text block.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Anchor point in image pixels.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Which point of the text block is pinned to the anchor.
    pub fn anchor_position(&self) -> AnchorPosition {
        self.anchor_position
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Line alignment.
    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Rectangle the text occupies once laid out by `canvas`.
    pub fn layout_rect(&self, canvas: &mut dyn Canvas) -> FxResult<Rect> {
        anchored_rect(canvas, &self.text, &self.font, self.anchor, self.anchor_position)
    }
}

impl ImageEffect for TextEffect {
    fn apply(&self, image: &RasterImage, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        let rect = self.layout_rect(canvas)?;
        draw_over(image, canvas, |c| {
            c.draw_text(&self.text, rect, &self.font, self.color, self.align)
        })
    }
}

/// Text greedily wrapped to a maximum width, then anchored like [`TextEffect`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlockTextEffect {
    anchor: Point,
    anchor_position: AnchorPosition,
    max_width: f64,
    text: String,
    font: Font,
    color: Color,
    capitalize: bool,
    align: TextAlign,
    trailing_threshold: usize,
}

impl BlockTextEffect {
    /// Wrapped, left-aligned text. `max_width` must be positive.
    pub fn new(
        anchor: Point,
        anchor_position: AnchorPosition,
        max_width: f64,
        text: impl Into<String>,
        font: Font,
        color: Color,
    ) -> FxResult<Self> {
        ensure_finite_point(anchor)?;
        if !max_width.is_finite() || max_width <= 0.0 {
            return Err(FxError::validation(format!(
                "block text max width must be positive, got {max_width}"
            )));
        }
        Ok(Self {
            anchor,
            anchor_position,
            max_width,
            text: text.into(),
            font,
            color,
            capitalize: false,
            align: TextAlign::Left,
            trailing_threshold: 0,
        })
    }

    /// Render the text in uppercase.
    pub fn with_capitalize(mut self, capitalize: bool) -> Self {
        self.capitalize = capitalize;
        self
    }

    /// Horizontal alignment of wrapped lines.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Keep paragraph tails of at most `chars` characters on the previous line. Zero disables.
    pub fn with_trailing_threshold(mut self, chars: usize) -> Self {
        self.trailing_threshold = chars;
        self
    }

    /// Anchor point in image pixels.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Which point of the text block is pinned to the anchor.
    pub fn anchor_position(&self) -> AnchorPosition {
        self.anchor_position
    }

    /// Maximum line width before wrapping.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// The unwrapped source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the text is uppercased before wrapping.
    pub fn capitalize(&self) -> bool {
        self.capitalize
    }

    /// Line alignment.
    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Trailing-tail threshold in characters.
    pub fn trailing_threshold(&self) -> usize {
        self.trailing_threshold
    }

    /// Wrapped lines as measured by `canvas`.
    pub fn wrapped_lines(&self, canvas: &mut dyn Canvas) -> FxResult<Vec<String>> {
        let source = if self.capitalize {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        };
        let font = &self.font;
        wrap_words(
            &source,
            self.max_width,
            self.trailing_threshold,
            &mut |line| Ok(canvas.measure_text(line, font)?.width),
        )
    }
}

impl ImageEffect for BlockTextEffect {
    fn apply(&self, image: &RasterImage, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        let text = self.wrapped_lines(canvas)?.join("\n");
        let rect = anchored_rect(canvas, &text, &self.font, self.anchor, self.anchor_position)?;
        tracing::trace!(lines = text.lines().count(), width = rect.width(), "block text");
        draw_over(image, canvas, |c| {
            c.draw_text(&text, rect, &self.font, self.color, self.align)
        })
    }
}

fn anchored_rect(
    canvas: &mut dyn Canvas,
    text: &str,
    font: &Font,
    anchor: Point,
    position: AnchorPosition,
) -> FxResult<Rect> {
    let size = canvas.measure_text(text, font)?;
    Ok(Rect::from_origin_size(position.origin_for(anchor, size), size))
}

fn ensure_finite_point(p: Point) -> FxResult<()> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(FxError::validation("text anchor must be finite"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/text.rs"]
mod tests;
