//! Geometry-only tile arrangement: tiles with anchor points laid out in cells by a pluggable
//! strategy.

/// Layout strategies.
pub mod layout;
/// The tile container.
pub mod view;

use crate::foundation::core::{Point, Size};

pub use layout::{RowLayout, TileArrangement, TileLayout};
pub use view::{TileDataSource, TileView};

/// Stable tile identity, chosen by the data source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

/// A piece of content with a natural size and the point that layouts align on.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    id: TileId,
    anchor: Point,
    content_size: Size,
}

impl Tile {
    /// Tile anchored at the center of its content.
    pub fn new(id: TileId, content_size: Size) -> Self {
        Self {
            id,
            anchor: Point::new(content_size.width / 2.0, content_size.height / 2.0),
            content_size,
        }
    }

    /// Anchor in the tile's own content coordinates.
    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }

    /// Identity.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Anchor point, content coordinates.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Natural content size.
    pub fn content_size(&self) -> Size {
        self.content_size
    }
}
