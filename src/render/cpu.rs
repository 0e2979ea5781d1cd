use std::collections::HashMap;

use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Rect, Size, TextAlign};
use crate::foundation::error::{FxError, FxResult};
use crate::foundation::math::{mul_div255_u8, premul_over_px};
use crate::render::canvas::{Canvas, FillRule};
use crate::render::raster::RasterImage;
use crate::text::font::Font;
use crate::text::layout::TextLayoutEngine;

/// Options for the CPU canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuCanvasOpts {
    pub(crate) clear_rgba: Option<[u8; 4]>,
}

impl CpuCanvasOpts {
    /// Return options with a straight-alpha RGBA8 color every new context is cleared to.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

struct OpenContext {
    width: u16,
    height: u16,
    // Composited result so far, premultiplied RGBA8.
    base: Vec<u8>,
    // Vector work recorded in the render context but not yet composited into `base`.
    dirty: bool,
}

/// [`Canvas`] implementation rasterizing with `vello_cpu` and shaping text with `parley`.
///
/// `vello_cpu` renders into a fresh buffer, so vector work is recorded into a render context and
/// composited over the accumulated base buffer whenever an image is drawn or the context ends.
/// Images are blitted at whole-pixel origins.
pub struct CpuCanvas {
    opts: CpuCanvasOpts,
    ctx: Option<vello_cpu::RenderContext>,
    open: Option<OpenContext>,
    fill: Color,
    stroke: Color,
    fill_rule: FillRule,
    text: TextLayoutEngine,
    fonts: HashMap<u64, vello_cpu::peniko::FontData>,
}

impl Default for CpuCanvas {
    fn default() -> Self {
        Self::new(CpuCanvasOpts::default())
    }
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("opts", &self.opts)
            .field(
                "open",
                &self.open.as_ref().map(|o| (o.width, o.height)),
            )
            .field("cached_fonts", &self.fonts.len())
            .finish()
    }
}

impl CpuCanvas {
    /// Create a canvas with no open context.
    pub fn new(opts: CpuCanvasOpts) -> Self {
        Self {
            opts,
            ctx: None,
            open: None,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            fill_rule: FillRule::NonZero,
            text: TextLayoutEngine::new(),
            fonts: HashMap::new(),
        }
    }

    /// Return `true` while a context is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    fn ensure_open(&self) -> FxResult<()> {
        if self.open.is_none() {
            return Err(FxError::evaluation("no open drawing context"));
        }
        Ok(())
    }

    fn ctx_mut(&mut self) -> FxResult<&mut vello_cpu::RenderContext> {
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| FxError::evaluation("no open drawing context"))?;
        open.dirty = true;
        self.ctx
            .as_mut()
            .ok_or_else(|| FxError::evaluation("render context missing for open drawing context"))
    }

    fn flush_vector(&mut self) -> FxResult<()> {
        let (Some(open), Some(ctx)) = (self.open.as_mut(), self.ctx.as_mut()) else {
            return Err(FxError::evaluation("no open drawing context"));
        };
        if !open.dirty {
            return Ok(());
        }
        let layer = take_layer(open, ctx);
        premul_over_in_place(&mut open.base, layer.data_as_u8_slice())
    }

    fn cpu_fill_rule(&self) -> vello_cpu::peniko::Fill {
        match self.fill_rule {
            FillRule::NonZero => vello_cpu::peniko::Fill::NonZero,
            FillRule::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
        }
    }

    fn font_data_for(&mut self, font: &Font) -> vello_cpu::peniko::FontData {
        self.fonts
            .entry(font.fingerprint())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.data().as_ref().clone()),
                    0,
                )
            })
            .clone()
    }
}

impl Canvas for CpuCanvas {
    fn begin_context(&mut self, width: u32, height: u32) -> FxResult<()> {
        if self.open.is_some() {
            return Err(FxError::evaluation(
                "begin_context called while a context is already open",
            ));
        }
        if width == 0 || height == 0 {
            return Err(FxError::validation("canvas dimensions must be non-zero"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| FxError::validation("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| FxError::validation("canvas height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx = Some(ctx);

        let px_count = (width as usize) * (height as usize);
        let base = match self.opts.clear_rgba {
            Some([r, g, b, a]) => {
                let px = Color::rgba8(r, g, b, a).to_premul_rgba8();
                let mut base = Vec::with_capacity(px_count * 4);
                for _ in 0..px_count {
                    base.extend_from_slice(&px);
                }
                base
            }
            None => vec![0u8; px_count * 4],
        };
        self.open = Some(OpenContext {
            width: w,
            height: h,
            base,
            dirty: false,
        });
        self.fill = Color::BLACK;
        self.stroke = Color::BLACK;
        self.fill_rule = FillRule::NonZero;
        Ok(())
    }

    fn draw_image(&mut self, image: &RasterImage, origin: Point) -> FxResult<()> {
        self.flush_vector()?;
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| FxError::evaluation("no open drawing context"))?;
        if !origin.x.is_finite() || !origin.y.is_finite() {
            return Err(FxError::validation("image origin must be finite"));
        }
        blit_over(
            &mut open.base,
            u32::from(open.width),
            u32::from(open.height),
            image,
            origin.x.round() as i64,
            origin.y.round() as i64,
        );
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) -> FxResult<()> {
        self.ensure_open()?;
        self.fill = color;
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Color) -> FxResult<()> {
        self.ensure_open()?;
        self.stroke = color;
        Ok(())
    }

    fn set_fill_rule(&mut self, rule: FillRule) -> FxResult<()> {
        self.ensure_open()?;
        self.fill_rule = rule;
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath) -> FxResult<()> {
        self.ensure_open()?;
        if self.fill.is_transparent() || path.elements().is_empty() {
            return Ok(());
        }
        let color = self.fill;
        let rule = self.cpu_fill_rule();
        let ctx = self.ctx_mut()?;
        ctx.set_paint(color_to_cpu(color));
        ctx.set_fill_rule(rule);
        ctx.fill_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn clear_path(&mut self, path: &BezPath) -> FxResult<()> {
        self.flush_vector()?;
        if path.elements().is_empty() {
            return Ok(());
        }
        let rule = self.cpu_fill_rule();
        let ctx = self.ctx_mut()?;
        ctx.set_paint(color_to_cpu(Color::BLACK));
        ctx.set_fill_rule(rule);
        ctx.fill_path(&bezpath_to_cpu(path));

        let (Some(open), Some(ctx)) = (self.open.as_mut(), self.ctx.as_mut()) else {
            return Err(FxError::evaluation("no open drawing context"));
        };
        let mask = take_layer(open, ctx);
        for (d, m) in open
            .base
            .chunks_exact_mut(4)
            .zip(mask.data_as_u8_slice().chunks_exact(4))
        {
            let keep = 255 - u16::from(m[3]);
            for c in d.iter_mut() {
                *c = mul_div255_u8(u16::from(*c), keep);
            }
        }
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64) -> FxResult<()> {
        self.ensure_open()?;
        if !width.is_finite() || width < 0.0 {
            return Err(FxError::validation("stroke width must be finite and >= 0"));
        }
        if width == 0.0 || self.stroke.is_transparent() || path.elements().is_empty() {
            return Ok(());
        }
        let color = self.stroke;
        let ctx = self.ctx_mut()?;
        ctx.set_paint(color_to_cpu(color));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        ctx.stroke_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> FxResult<Size> {
        self.text.measure(text, font)
    }

    fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        font: &Font,
        color: Color,
        align: TextAlign,
    ) -> FxResult<()> {
        self.ensure_open()?;
        if text.is_empty() || color.is_transparent() {
            return Ok(());
        }
        let layout = self.text.layout_plain(text, font, color.into())?;
        let font_data = self.font_data_for(font);
        let block_width = rect.width() as f32;
        let fraction = align.offset_fraction() as f32;

        let ctx = self.ctx_mut()?;
        ctx.set_paint(color_to_cpu(color));
        for line in layout.lines() {
            let free = (block_width - line.metrics().advance).max(0.0);
            let dx = f64::from(free * fraction);
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                rect.x0 + dx,
                rect.y0,
            )));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn end_context(&mut self) -> FxResult<RasterImage> {
        self.flush_vector()?;
        let open = self
            .open
            .take()
            .ok_or_else(|| FxError::evaluation("no open drawing context"))?;
        RasterImage::from_premul_rgba8(u32::from(open.width), u32::from(open.height), open.base)
    }
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

// Rasterize the recorded vector work into its own layer and reset the render context.
fn take_layer(open: &mut OpenContext, ctx: &mut vello_cpu::RenderContext) -> vello_cpu::Pixmap {
    ctx.flush();
    let mut layer = vello_cpu::Pixmap::new(open.width, open.height);
    ctx.render_to_pixmap(&mut layer);
    ctx.reset();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    open.dirty = false;
    layer
}

fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> FxResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FxError::evaluation(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

// Source-over `image` onto `dst` at an integer offset, clipped to the destination.
fn blit_over(dst: &mut [u8], dst_w: u32, dst_h: u32, image: &RasterImage, ox: i64, oy: i64) {
    let x_start = ox.max(0);
    let y_start = oy.max(0);
    let x_end = (ox + i64::from(image.width())).min(i64::from(dst_w));
    let y_end = (oy + i64::from(image.height())).min(i64::from(dst_h));
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let src = image.data();
    let src_w = image.width() as usize;
    for y in y_start..y_end {
        let sy = (y - oy) as usize;
        let row_px = (x_end - x_start) as usize;
        let d0 = ((y as usize) * (dst_w as usize) + x_start as usize) * 4;
        let s0 = (sy * src_w + (x_start - ox) as usize) * 4;
        let drow = &mut dst[d0..d0 + row_px * 4];
        let srow = &src[s0..s0 + row_px * 4];
        for (d, s) in drow.chunks_exact_mut(4).zip(srow.chunks_exact(4)) {
            let out = premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
