use std::sync::Arc;

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::foundation::core::{Point, Rect};
use crate::tile::layout::{RowLayout, TileArrangement, TileLayout};
use crate::tile::{Tile, TileId};

/// Supplies the tiles shown by a [`TileView`].
pub trait TileDataSource {
    /// Tile count.
    fn number_of_tiles(&self) -> usize;

    /// Tile at `index`, for every `index < number_of_tiles()`.
    fn tile_at(&self, index: usize) -> Tile;
}

impl TileDataSource for Vec<Tile> {
    fn number_of_tiles(&self) -> usize {
        self.len()
    }

    fn tile_at(&self, index: usize) -> Tile {
        self[index].clone()
    }
}

/// Ordered tiles, their cells, and the layout that arranges them.
///
/// Replacing the data source or the layout reloads tiles and lays them out again. Collapsed tiles
/// keep their place in the collection and still take part in every layout pass.
pub struct TileView {
    frame: Rect,
    data_source: Option<Box<dyn TileDataSource>>,
    layout: Box<dyn TileLayout>,
    tiles: Vec<Tile>,
    arrangement: TileArrangement,
    diagnostics: Arc<dyn Diagnostics>,
}

impl std::fmt::Debug for TileView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileView")
            .field("frame", &self.frame)
            .field("has_data_source", &self.data_source.is_some())
            .field("tiles", &self.tiles.len())
            .field("arrangement", &self.arrangement)
            .finish()
    }
}

impl Default for TileView {
    fn default() -> Self {
        Self::new(Rect::ZERO)
    }
}

impl TileView {
    /// Empty view with a [`RowLayout`] and `tracing` diagnostics.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            data_source: None,
            layout: Box::new(RowLayout),
            tiles: Vec::new(),
            arrangement: TileArrangement::default(),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Route misuse reports to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Install a data source and reload tiles.
    pub fn set_data_source(&mut self, source: Box<dyn TileDataSource>) {
        self.data_source = Some(source);
        self.refresh_tiles();
    }

    /// Install a layout strategy and reload tiles.
    pub fn set_layout(&mut self, layout: Box<dyn TileLayout>) {
        self.layout = layout;
        self.refresh_tiles();
    }

    /// Resize the view; a changed size triggers a fresh layout.
    pub fn set_frame(&mut self, frame: Rect) {
        if frame == self.frame {
            return;
        }
        let resized = frame.size() != self.frame.size();
        self.frame = frame;
        if resized && !self.tiles.is_empty() {
            self.arrange_tiles();
        }
    }

    /// Reload every tile from the data source, then arrange them.
    pub fn refresh_tiles(&mut self) {
        let Some(source) = self.data_source.as_ref() else {
            self.diagnostics
                .warn("tile view: no data source, cannot refresh tiles");
            return;
        };
        let count = source.number_of_tiles();
        self.tiles = (0..count).map(|i| source.tile_at(i)).collect();
        self.arrangement = TileArrangement::zeroed(count);
        self.diagnostics
            .debug(&format!("tile view: loaded {count} tiles"));
        self.arrange_tiles();
    }

    /// Apply the layout's default arrangement.
    pub fn arrange_tiles(&mut self) {
        self.layout.reset_layout(
            self.frame.size(),
            &self.tiles,
            &mut self.arrangement,
            self.diagnostics.as_ref(),
        );
    }

    /// Focus the tile at `index` (an index into [`TileView::tiles`]).
    pub fn focus(&mut self, index: usize) {
        self.diagnostics.debug(&format!("tile view: focus tile {index}"));
        self.layout.focus(
            self.frame.size(),
            &self.tiles,
            index,
            &mut self.arrangement,
            self.diagnostics.as_ref(),
        );
    }

    /// Undo any focus.
    pub fn collapse_all(&mut self) {
        self.layout.collapse_all(
            self.frame.size(),
            &self.tiles,
            &mut self.arrangement,
            self.diagnostics.as_ref(),
        );
    }

    /// Internal index of the tile with `id`. It need not match on-screen order.
    pub fn tile_index(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id() == id)
    }

    /// View frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Tiles in data source order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Cell frames in view coordinates, one per tile.
    pub fn cell_frames(&self) -> &[Rect] {
        &self.arrangement.cells
    }

    /// Tile content origins in cell coordinates, one per tile.
    pub fn tile_origins(&self) -> &[Point] {
        &self.arrangement.tile_origins
    }

    /// Content frame of tile `index` in cell coordinates.
    pub fn tile_frame(&self, index: usize) -> Option<Rect> {
        let tile = self.tiles.get(index)?;
        let origin = *self.arrangement.tile_origins.get(index)?;
        Some(Rect::from_origin_size(origin, tile.content_size()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/view.rs"]
mod tests;
