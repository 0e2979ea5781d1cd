use crate::effects::ImageEffect;
use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Size};
use crate::foundation::error::{FxError, FxResult};
use crate::render::canvas::{Canvas, draw_over};
use crate::render::raster::RasterImage;

/// Named region masks, defined in unit coordinates and scaled to the image bounds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShadeShape {
    /// Top-left corner to the midpoints of the top and left edges.
    TriangleTopLeft,
    /// Top-right corner to the midpoints of the top and right edges.
    TriangleTopRight,
    /// Bottom-left corner to the midpoints of the bottom and left edges.
    TriangleBottomLeft,
    /// Bottom-right corner to the midpoints of the bottom and right edges.
    TriangleBottomRight,
    /// Upper half of the image.
    HalfTop,
    /// Lower half of the image.
    HalfBottom,
    /// Left half of the image.
    HalfLeft,
    /// Right half of the image.
    HalfRight,
}

impl ShadeShape {
    /// Every shape, in declaration order.
    pub const ALL: [ShadeShape; 8] = [
        ShadeShape::TriangleTopLeft,
        ShadeShape::TriangleTopRight,
        ShadeShape::TriangleBottomLeft,
        ShadeShape::TriangleBottomRight,
        ShadeShape::HalfTop,
        ShadeShape::HalfBottom,
        ShadeShape::HalfLeft,
        ShadeShape::HalfRight,
    ];

    /// Polygon vertices in unit coordinates, `(0, 0)` top-left and `(1, 1)` bottom-right.
    pub fn unit_vertices(self) -> &'static [(f64, f64)] {
        match self {
            ShadeShape::TriangleTopLeft => &[(0.0, 0.0), (0.5, 0.0), (0.0, 0.5)],
            ShadeShape::TriangleTopRight => &[(1.0, 0.0), (1.0, 0.5), (0.5, 0.0)],
            ShadeShape::TriangleBottomLeft => &[(0.0, 1.0), (0.0, 0.5), (0.5, 1.0)],
            ShadeShape::TriangleBottomRight => &[(1.0, 1.0), (0.5, 1.0), (1.0, 0.5)],
            ShadeShape::HalfTop => &[(0.0, 0.0), (1.0, 0.0), (1.0, 0.5), (0.0, 0.5)],
            ShadeShape::HalfBottom => &[(0.0, 0.5), (1.0, 0.5), (1.0, 1.0), (0.0, 1.0)],
            ShadeShape::HalfLeft => &[(0.0, 0.0), (0.5, 0.0), (0.5, 1.0), (0.0, 1.0)],
            ShadeShape::HalfRight => &[(0.5, 0.0), (1.0, 0.0), (1.0, 1.0), (0.5, 1.0)],
        }
    }

    /// Closed polygon scaled to `bounds`.
    pub fn path(self, bounds: Size) -> BezPath {
        let mut path = BezPath::new();
        for (i, &(ux, uy)) in self.unit_vertices().iter().enumerate() {
            let p = Point::new(ux * bounds.width, uy * bounds.height);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();
        path
    }
}

impl std::str::FromStr for ShadeShape {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        serde_json::from_value(serde_json::Value::String(key))
            .map_err(|_| FxError::validation(format!("unknown shade shape '{s}'")))
    }
}

/// Fills one of the [`ShadeShape`] masks with a color.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadeEffect {
    shape: ShadeShape,
    color: Color,
}

impl ShadeEffect {
    /// Shade effect for a named shape.
    pub fn new(shape: ShadeShape, color: Color) -> Self {
        Self { shape, color }
    }

    /// Shade effect from a shape name; unknown names are rejected here, not at render time.
    pub fn named(shape: &str, color: Color) -> FxResult<Self> {
        Ok(Self::new(shape.parse()?, color))
    }

    /// The shaded shape.
    pub fn shape(&self) -> ShadeShape {
        self.shape
    }

    /// The fill color.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl ImageEffect for ShadeEffect {
    fn apply(&self, image: &RasterImage, canvas: &mut dyn Canvas) -> FxResult<RasterImage> {
        let path = self.shape.path(image.size());
        draw_over(image, canvas, |c| {
            c.set_fill_color(self.color)?;
            c.fill_path(&path)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shade.rs"]
mod tests;
