pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Nine-way placement of a measured box relative to an anchor point.
///
/// The variant names the point of the box that is pinned to the anchor: `TopLeft` puts the box's
/// top-left corner on the anchor, `Center` centers the box on it, and so on.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPosition {
    /// Box top-left corner on the anchor.
    #[default]
    TopLeft,
    /// Box top edge midpoint on the anchor.
    TopCenter,
    /// Box top-right corner on the anchor.
    TopRight,
    /// Box left edge midpoint on the anchor.
    CenterLeft,
    /// Box center on the anchor.
    Center,
    /// Box right edge midpoint on the anchor.
    CenterRight,
    /// Box bottom-left corner on the anchor.
    BottomLeft,
    /// Box bottom edge midpoint on the anchor.
    BottomCenter,
    /// Box bottom-right corner on the anchor.
    BottomRight,
}

impl AnchorPosition {
    /// Every anchor position, row-major from the top-left.
    pub const ALL: [AnchorPosition; 9] = [
        AnchorPosition::TopLeft,
        AnchorPosition::TopCenter,
        AnchorPosition::TopRight,
        AnchorPosition::CenterLeft,
        AnchorPosition::Center,
        AnchorPosition::CenterRight,
        AnchorPosition::BottomLeft,
        AnchorPosition::BottomCenter,
        AnchorPosition::BottomRight,
    ];

    /// Fractions `(fx, fy)` of the box size between the box origin and the pinned point.
    pub fn fractions(self) -> (f64, f64) {
        match self {
            AnchorPosition::TopLeft => (0.0, 0.0),
            AnchorPosition::TopCenter => (0.5, 0.0),
            AnchorPosition::TopRight => (1.0, 0.0),
            AnchorPosition::CenterLeft => (0.0, 0.5),
            AnchorPosition::Center => (0.5, 0.5),
            AnchorPosition::CenterRight => (1.0, 0.5),
            AnchorPosition::BottomLeft => (0.0, 1.0),
            AnchorPosition::BottomCenter => (0.5, 1.0),
            AnchorPosition::BottomRight => (1.0, 1.0),
        }
    }

    /// Origin of a box of `size` whose pinned point lands on `anchor`.
    pub fn origin_for(self, anchor: Point, size: Size) -> Point {
        let (fx, fy) = self.fractions();
        Point::new(anchor.x - fx * size.width, anchor.y - fy * size.height)
    }
}

impl std::str::FromStr for AnchorPosition {
    type Err = crate::foundation::error::FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let out = match key.as_str() {
            "top_left" => AnchorPosition::TopLeft,
            "top_center" | "top" => AnchorPosition::TopCenter,
            "top_right" => AnchorPosition::TopRight,
            "center_left" | "left" => AnchorPosition::CenterLeft,
            "center" => AnchorPosition::Center,
            "center_right" | "right" => AnchorPosition::CenterRight,
            "bottom_left" => AnchorPosition::BottomLeft,
            "bottom_center" | "bottom" => AnchorPosition::BottomCenter,
            "bottom_right" => AnchorPosition::BottomRight,
            _ => {
                return Err(crate::foundation::error::FxError::validation(format!(
                    "unknown anchor position '{s}'"
                )));
            }
        };
        Ok(out)
    }
}

/// Horizontal alignment of text lines inside their block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Lines start at the block's left edge.
    #[default]
    Left,
    /// Lines are centered within the block width.
    Center,
    /// Lines end at the block's right edge.
    Right,
}

impl TextAlign {
    /// Fraction of the free horizontal space placed before a line.
    pub fn offset_fraction(self) -> f64 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => 0.5,
            TextAlign::Right => 1.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
