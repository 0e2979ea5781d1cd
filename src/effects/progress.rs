use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::effects::ImageEffect;
use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{FxError, FxResult};
use crate::render::canvas::{Canvas, draw_over};
use crate::render::raster::RasterImage;

const ARC_TOLERANCE: f64 = 0.1;

/// Default ring stroke width, in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// A filled annular wedge with optional rings marking the unfilled remainder of the circle.
///
/// Angles are radians from the positive x-axis and grow clockwise in image space (y down). The wedge
/// runs clockwise from `start_angle` to `end_angle`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressCircleEffect {
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
    color: Color,
    stroke_inner: bool,
    stroke_outer: bool,
    stroke_width: f64,
}

impl ProgressCircleEffect {
    /// Wedge between two radii and two angles, without rings.
    pub fn new(
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        color: Color,
    ) -> FxResult<Self> {
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(FxError::validation("progress circle center must be finite"));
        }
        if !(inner_radius.is_finite() && outer_radius.is_finite()) {
            return Err(FxError::validation("progress circle radii must be finite"));
        }
        if inner_radius < 0.0 || outer_radius < 0.0 {
            return Err(FxError::validation("progress circle radii must be non-negative"));
        }
        if inner_radius > outer_radius {
            return Err(FxError::validation(format!(
                "progress circle inner radius {inner_radius} exceeds outer radius {outer_radius}"
            )));
        }
        if !(start_angle.is_finite() && end_angle.is_finite()) {
            return Err(FxError::validation("progress circle angles must be finite"));
        }
        Ok(Self {
            center,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            color,
            stroke_inner: false,
            stroke_outer: false,
            stroke_width: DEFAULT_STROKE_WIDTH,
        })
    }

    /// Progress wedge filling `percent` of a full turn, starting at twelve o'clock.
    ///
    /// The inner radius is a third of `radius` and rings are a thin fraction of it. Percentages of
    /// one or more draw a full ring.
    pub fn from_percent(
        center: Point,
        radius: f64,
        percent: f64,
        color: Color,
        stroke: bool,
    ) -> FxResult<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(FxError::validation(format!(
                "progress percent must be a non-negative number, got {percent}"
            )));
        }
        let start = PI + FRAC_PI_2;
        let end = if percent >= 1.0 {
            start + TAU
        } else {
            start + percent * TAU
        };
        Self::new(center, 0.33 * radius, radius, start, end, color)?
            .with_strokes(stroke, stroke)
            .with_stroke_width(0.0166 * radius)
    }

    /// Enable the inner and/or outer ring.
    pub fn with_strokes(mut self, inner: bool, outer: bool) -> Self {
        self.stroke_inner = inner;
        self.stroke_outer = outer;
        self
    }

    /// Ring thickness in pixels.
    pub fn with_stroke_width(mut self, width: f64) -> FxResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(FxError::validation(format!(
                "progress circle stroke width must be non-negative, got {width}"
            )));
        }
        self.stroke_width = width;
        Ok(self)
    }

    /// Circle center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Inner wedge radius.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Outer wedge radius.
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Wedge start angle, radians.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Wedge end angle, radians.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Fill color for wedge and rings.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the inner ring is drawn.
    pub fn stroke_inner(&self) -> bool {
        self.stroke_inner
    }

    /// Whether the outer ring is drawn.
    pub fn stroke_outer(&self) -> bool {
        self.stroke_outer
    }

    /// Ring thickness in pixels.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Clockwise sweep of the wedge, in `0..=TAU`.
    pub fn sweep(&self) -> f64 {
        clockwise_sweep(self.start_angle, self.end_angle)
    }

    /// Paths filled by [`ImageEffect::apply`], wedge first then inner and outer rings.
    pub fn paths(&self) -> Vec<BezPath> {
        let sweep = self.sweep();
        let mut out = Vec::with_capacity(3);
        if sweep > 0.0 {
            out.push(annular_sector(
                self.center,
                self.inner_radius,
                self.outer_radius,
                self.start_angle,
                sweep,
            ));
        }

        let rest = TAU - sweep;
        if rest > 0.0 && self.stroke_width > 0.0 {
            let rest_start = self.start_angle + sweep;
            if self.stroke_inner {
                let outer = (self.inner_radius + self.stroke_width).min(self.outer_radius);
                out.push(annular_sector(
                    self.center,
                    self.inner_radius,
                    outer,
                    rest_start,
                    rest,
                ));
            }
            if self.stroke_outer {
                let inner = (self.outer_radius - self.stroke_width).max(self.inner_radius);
                out.push(annular_sector(
                    self.center,
                    inner,
                    self.outer_radius,
                    rest_start,
                    rest,
                ));
            }
        }
        out
    }
}

impl ImageEffect for ProgressCircleEffect {
    fn apply(&self, image: &RasterImage, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        let paths = self.paths();
        tracing::trace!(
            sweep = self.sweep(),
            paths = paths.len(),
            "progress circle"
        );
        draw_over(image, canvas, |c| {
            c.set_fill_color(self.color)?;
            for path in &paths {
                c.fill_path(path)?;
            }
            Ok(())
        })
    }
}

/// Clockwise angular distance from `start` to `end`.
///
/// Differences of a full turn or more clamp to `TAU`; anything smaller wraps into `0..TAU`.
pub fn clockwise_sweep(start: f64, end: f64) -> f64 {
    let d = end - start;
    if d >= TAU { TAU } else { d.rem_euclid(TAU) }
}

/// Closed ring segment between two radii, sweeping clockwise from `start`.
///
/// A zero inner radius yields a pie slice.
pub fn annular_sector(center: Point, inner: f64, outer: f64, start: f64, sweep: f64) -> BezPath {
    let end = start + sweep;
    let mut path = BezPath::new();
    path.move_to(center + Vec2::from_angle(start) * inner);
    if inner > 0.0 {
        path.extend(arc(center, inner, start, sweep).append_iter(ARC_TOLERANCE));
    }
    path.line_to(center + Vec2::from_angle(end) * outer);
    path.extend(arc(center, outer, end, -sweep).append_iter(ARC_TOLERANCE));
    path.close_path();
    path
}

fn arc(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> kurbo::Arc {
    kurbo::Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle,
        sweep_angle,
        x_rotation: 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/progress.rs"]
mod tests;
