use serde::{Deserialize, Serialize};

use crate::crop::fit::{FittedPath, crop_rect, fit_path, place_path};
use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Rect, Size};
use crate::foundation::error::{FxError, FxResult};
use crate::present::RedrawRequester;
use crate::render::canvas::{Canvas, FillRule, draw_over};
use crate::render::raster::RasterImage;

/// Appearance and sizing of a [`CropOverlay`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropOverlayConfig {
    /// Largest share of the frame width or height the crop region may take, in `(0, 1]`.
    pub max_fill_percent: f64,
    /// Color painted outside the crop region.
    pub shade_color: Color,
    /// Color painted inside the crop region. Transparent leaves it untouched.
    pub crop_path_color: Color,
}

impl Default for CropOverlayConfig {
    fn default() -> Self {
        Self {
            max_fill_percent: 0.8,
            shade_color: Color::BLACK.with_alpha(0.8),
            crop_path_color: Color::TRANSPARENT,
        }
    }
}

impl CropOverlayConfig {
    /// Set the max fill percent; checked by [`CropOverlayConfig::validate`].
    pub fn with_max_fill_percent(mut self, max_fill_percent: f64) -> Self {
        self.max_fill_percent = max_fill_percent;
        self
    }

    /// Set the shade color.
    pub fn with_shade_color(mut self, color: Color) -> Self {
        self.shade_color = color;
        self
    }

    /// Set the crop region color.
    pub fn with_crop_path_color(mut self, color: Color) -> Self {
        self.crop_path_color = color;
        self
    }

    /// Reject a max fill outside `(0, 1]`.
    pub fn validate(&self) -> FxResult<()> {
        validate_max_fill(self.max_fill_percent)
    }
}

fn validate_max_fill(v: f64) -> FxResult<()> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(FxError::validation(format!(
            "crop overlay max fill percent must be in (0, 1], got {v}"
        )))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FitKey {
    generation: u64,
    width_bits: u64,
    height_bits: u64,
    max_fill_bits: u64,
}

#[derive(Clone, Debug)]
struct FitCache {
    key: FitKey,
    frame_size: Size,
    fitted: Option<FittedPath>,
}

/// Shaded overlay that leaves a fitted, centered crop path uncovered.
///
/// Setters only record state and ask for a redraw; the fit is computed lazily by
/// [`CropOverlay::refresh`] and reused until the path, frame size, or max fill changes.
/// [`CropOverlay::draw`] reads the cached geometry only.
#[derive(Debug, Default)]
pub struct CropOverlay {
    config: CropOverlayConfig,
    crop_path: Option<BezPath>,
    generation: u64,
    frame: Rect,
    cache: Option<FitCache>,
    needs_redraw: bool,
    fits_computed: u64,
    requester: Option<RedrawRequester>,
}

impl CropOverlay {
    /// Overlay with a validated config and an empty frame.
    pub fn new(config: CropOverlayConfig) -> FxResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Post redraw requests to a presentation queue.
    pub fn with_redraw_requester(mut self, requester: RedrawRequester) -> Self {
        self.requester = Some(requester);
        self
    }

    /// Current config.
    pub fn config(&self) -> &CropOverlayConfig {
        &self.config
    }

    /// Source crop path, in its own coordinates.
    pub fn crop_path(&self) -> Option<&BezPath> {
        self.crop_path.as_ref()
    }

    /// Last frame seen by [`CropOverlay::set_frame`].
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Return `true` when state changed since the last [`CropOverlay::redraw`].
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Number of times the fit has actually been recomputed.
    pub fn fits_computed(&self) -> u64 {
        self.fits_computed
    }

    /// Replace or clear the crop path.
    pub fn set_crop_path(&mut self, path: Option<BezPath>) {
        self.crop_path = path;
        self.generation = self.generation.wrapping_add(1);
        self.invalidate();
    }

    /// Layout pass. Only an actual frame change invalidates.
    pub fn set_frame(&mut self, frame: Rect) {
        if frame == self.frame {
            return;
        }
        self.frame = frame;
        self.invalidate();
    }

    /// Change the max fill percent, in `(0, 1]`.
    pub fn set_max_fill_percent(&mut self, max_fill_percent: f64) -> FxResult<()> {
        validate_max_fill(max_fill_percent)?;
        if max_fill_percent != self.config.max_fill_percent {
            self.config.max_fill_percent = max_fill_percent;
            self.invalidate();
        }
        Ok(())
    }

    /// Change the shade color.
    pub fn set_shade_color(&mut self, color: Color) {
        if color != self.config.shade_color {
            self.config.shade_color = color;
            self.invalidate();
        }
    }

    /// Change the crop region color.
    pub fn set_crop_path_color(&mut self, color: Color) {
        if color != self.config.crop_path_color {
            self.config.crop_path_color = color;
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.needs_redraw = true;
        if let Some(requester) = &self.requester {
            requester.request_redraw();
        }
    }

    fn current_key(&self) -> FitKey {
        FitKey {
            generation: self.generation,
            width_bits: self.frame.width().to_bits(),
            height_bits: self.frame.height().to_bits(),
            max_fill_bits: self.config.max_fill_percent.to_bits(),
        }
    }

    /// Recompute the fitted path if its inputs changed since the last refresh.
    #[tracing::instrument(level = "debug", skip(self), fields(generation = self.generation))]
    pub fn refresh(&mut self) {
        let key = self.current_key();
        if self.cache.as_ref().is_some_and(|c| c.key == key) {
            return;
        }
        let frame_size = self.frame.size();
        let fitted = self.crop_path.as_ref().and_then(|path| {
            fit_path(
                path,
                frame_size.width,
                frame_size.height,
                self.config.max_fill_percent,
            )
        });
        if self.crop_path.is_some() && fitted.is_none() {
            tracing::debug!(?frame_size, "crop path could not be fitted");
        }
        self.fits_computed += 1;
        self.cache = Some(FitCache {
            key,
            frame_size,
            fitted,
        });
    }

    // Fitted geometry only while it still matches the current path, frame size and max fill.
    fn cached(&self) -> Option<(&FittedPath, Size)> {
        let cache = self.cache.as_ref()?;
        if cache.key != self.current_key() {
            return None;
        }
        Some((cache.fitted.as_ref()?, cache.frame_size))
    }

    /// Centered crop rectangle in frame-local coordinates.
    ///
    /// `None` when no path is set, the path cannot be fitted, or inputs changed since the last
    /// [`CropOverlay::refresh`].
    pub fn crop_rect(&self) -> Option<Rect> {
        let (fitted, size) = self.cached()?;
        Some(crop_rect(fitted, size.width, size.height))
    }

    /// Fitted path centered in the frame. Same freshness rules as [`CropOverlay::crop_rect`].
    pub fn scaled_path_in_frame(&self) -> Option<BezPath> {
        let (fitted, size) = self.cached()?;
        Some(place_path(fitted, size.width, size.height))
    }

    /// Draw the overlay into an open canvas context sized to the frame.
    ///
    /// Shade and crop region both come from the last refresh, so they stay aligned even if the
    /// frame changed since. Before any refresh the whole current frame is shaded.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> FxResult<()> {
        let (size, placed) = match &self.cache {
            Some(cache) => (
                cache.frame_size,
                cache
                    .fitted
                    .as_ref()
                    .map(|f| place_path(f, cache.frame_size.width, cache.frame_size.height)),
            ),
            None => (self.frame.size(), None),
        };

        canvas.set_fill_color(self.config.shade_color)?;
        canvas.fill_rect(Rect::from_origin_size(Point::ORIGIN, size))?;

        if let Some(path) = &placed {
            canvas.set_fill_rule(FillRule::NonZero)?;
            canvas.clear_path(path)?;
            if !self.config.crop_path_color.is_transparent() {
                canvas.set_fill_color(self.config.crop_path_color)?;
                canvas.fill_path(path)?;
            }
        }
        Ok(())
    }

    /// Refresh cached geometry and render the overlay to a new frame-sized image.
    pub fn redraw(&mut self, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        self.refresh();
        let size = self.frame.size();
        if !(size.width >= 1.0 && size.height >= 1.0) {
            return Err(FxError::validation(format!(
                "crop overlay frame is too small to draw: {}x{}",
                size.width, size.height
            )));
        }
        let blank = RasterImage::transparent(size.width.ceil() as u32, size.height.ceil() as u32);
        let out = draw_over(&blank, canvas, |c| self.draw(c))?;
        self.needs_redraw = false;
        Ok(out)
    }

    /// The overlay never takes pointer input.
    pub fn contains_point(&self, _point: Point) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/overlay.rs"]
mod tests;
