use crate::diagnostics::Diagnostics;
use crate::foundation::core::{Point, Rect, Size};
use crate::tile::Tile;

/// Cell frames in container coordinates and tile content origins in cell coordinates, one of each
/// per tile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileArrangement {
    /// Cell frame of each tile.
    pub cells: Vec<Rect>,
    /// Top-left of each tile's content inside its cell.
    pub tile_origins: Vec<Point>,
}

impl TileArrangement {
    /// `count` zero-sized cells at the origin.
    pub fn zeroed(count: usize) -> Self {
        Self {
            cells: vec![Rect::ZERO; count],
            tile_origins: vec![Point::ORIGIN; count],
        }
    }

    /// Grow or shrink to `count` entries; new entries are zero-sized cells at the origin.
    pub fn resize(&mut self, count: usize) {
        self.cells.resize(count, Rect::ZERO);
        self.tile_origins.resize(count, Point::ORIGIN);
    }

    /// Number of tiles arranged.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return `true` when there are no tiles.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Strategy that sizes and positions tile cells inside a container of `bounds`.
///
/// Implementations size `arrangement` to one entry per tile before writing it. Calls that cannot
/// apply (no tiles, bad index) report through `diagnostics` and leave `arrangement` as it was.
pub trait TileLayout {
    /// Lay every tile out in its default position.
    fn reset_layout(
        &self,
        bounds: Size,
        tiles: &[Tile],
        arrangement: &mut TileArrangement,
        diagnostics: &dyn Diagnostics,
    );

    /// Give the tile at `index` the focus.
    fn focus(
        &self,
        bounds: Size,
        tiles: &[Tile],
        index: usize,
        arrangement: &mut TileArrangement,
        diagnostics: &dyn Diagnostics,
    );

    /// Undo any focus.
    fn collapse_all(
        &self,
        bounds: Size,
        tiles: &[Tile],
        arrangement: &mut TileArrangement,
        diagnostics: &dyn Diagnostics,
    ) {
        self.reset_layout(bounds, tiles, arrangement, diagnostics);
    }
}

/// Single column of equal-height, full-width cells. Each tile's anchor sits on its cell center.
///
/// Focusing expands the chosen cell to the whole container and collapses the others to zero size.
#[derive(Clone, Copy, Debug, Default)]
pub struct RowLayout;

impl TileLayout for RowLayout {
    fn reset_layout(
        &self,
        bounds: Size,
        tiles: &[Tile],
        arrangement: &mut TileArrangement,
        diagnostics: &dyn Diagnostics,
    ) {
        if tiles.is_empty() {
            diagnostics.warn("row layout: no tiles to arrange");
            return;
        }
        arrangement.resize(tiles.len());
        let cell_height = bounds.height / tiles.len() as f64;
        for (i, tile) in tiles.iter().enumerate() {
            let y0 = i as f64 * cell_height;
            arrangement.cells[i] = Rect::new(0.0, y0, bounds.width, y0 + cell_height);
            let anchor = tile.anchor();
            arrangement.tile_origins[i] =
                Point::new(bounds.width / 2.0 - anchor.x, cell_height / 2.0 - anchor.y);
        }
    }

    fn focus(
        &self,
        bounds: Size,
        tiles: &[Tile],
        index: usize,
        arrangement: &mut TileArrangement,
        diagnostics: &dyn Diagnostics,
    ) {
        if index >= tiles.len() {
            diagnostics.warn(&format!(
                "row layout: focus index {index} out of range for {} tiles",
                tiles.len()
            ));
            return;
        }
        arrangement.resize(tiles.len());
        for (i, cell) in arrangement.cells.iter_mut().enumerate() {
            *cell = if i == index {
                Rect::from_origin_size(Point::ORIGIN, bounds)
            } else {
                Rect::ZERO
            };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/layout.rs"]
mod tests;
