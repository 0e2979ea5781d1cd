use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::foundation::math::is_positive_finite;

/// A path scaled to fit a container, with its top-left at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedPath {
    /// Scaled path; its control-point bounds start at `(0, 0)`.
    pub path: BezPath,
    /// Scaled bounding-box width.
    pub width: f64,
    /// Scaled bounding-box height.
    pub height: f64,
}

/// Scale `path` uniformly so its bounds fill `max_fill` of the container along the tighter axis,
/// preserving aspect ratio.
///
/// Bounds are taken over every control point, not the tight curve extent, so curved paths fit by
/// their hull. Returns `None` for an empty path, degenerate bounds, a degenerate container, or a
/// `max_fill` that is not a positive finite number.
pub fn fit_path(
    path: &BezPath,
    container_width: f64,
    container_height: f64,
    max_fill: f64,
) -> Option<FittedPath> {
    if path.elements().is_empty() {
        return None;
    }
    if !(is_positive_finite(container_width)
        && is_positive_finite(container_height)
        && is_positive_finite(max_fill))
    {
        return None;
    }
    let bounds = path.control_box();
    if !(is_positive_finite(bounds.width()) && is_positive_finite(bounds.height())) {
        return None;
    }

    let path_aspect = bounds.width() / bounds.height();
    let container_aspect = container_width / container_height;
    let (width_mul, height_mul) = if container_aspect > path_aspect {
        (
            container_height * max_fill * path_aspect / container_width,
            max_fill,
        )
    } else {
        (
            max_fill,
            container_width * max_fill / path_aspect / container_height,
        )
    };

    let width = width_mul * container_width;
    let height = height_mul * container_height;
    let path = scale_path(path, Point::ORIGIN, width / bounds.width());
    Some(FittedPath {
        path,
        width,
        height,
    })
}

/// Top-left corner that centers a `width` x `height` box in the container.
fn centered_origin(fitted: &FittedPath, container_width: f64, container_height: f64) -> Point {
    Point::new(
        container_width / 2.0 - fitted.width / 2.0,
        container_height / 2.0 - fitted.height / 2.0,
    )
}

/// Fitted path moved so its bounds are centered in the container.
pub fn place_path(fitted: &FittedPath, container_width: f64, container_height: f64) -> BezPath {
    scale_path(
        &fitted.path,
        centered_origin(fitted, container_width, container_height),
        1.0,
    )
}

/// Centered crop rectangle for a fitted path.
pub fn crop_rect(fitted: &FittedPath, container_width: f64, container_height: f64) -> Rect {
    Rect::from_origin_size(
        centered_origin(fitted, container_width, container_height),
        (fitted.width, fitted.height),
    )
}

/// Copy of `path` scaled by `scale` about the origin of its control-point bounds, then moved so
/// that origin lands on `to`.
pub fn scale_path(path: &BezPath, to: Point, scale: f64) -> BezPath {
    if path.elements().is_empty() {
        return BezPath::new();
    }
    let origin = path.control_box().origin();
    let xf = Affine::translate(to.to_vec2())
        * Affine::scale(scale)
        * Affine::translate(-origin.to_vec2());
    let mut out = path.clone();
    out.apply_affine(xf);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/crop/fit.rs"]
mod tests;
