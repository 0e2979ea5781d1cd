use super::*;
use crate::diagnostics::{DiagnosticLevel, RecordingDiagnostics};
use crate::tile::TileId;

fn tiles(n: u64) -> Vec<Tile> {
    (0..n)
        .map(|i| Tile::new(TileId(i), Size::new(40.0, 20.0)))
        .collect()
}

#[test]
fn row_layout_stacks_equal_cells() {
    let tiles = tiles(4);
    let mut arr = TileArrangement::zeroed(4);
    let diag = RecordingDiagnostics::new();
    RowLayout.reset_layout(Size::new(100.0, 400.0), &tiles, &mut arr, &diag);

    for i in 0..4 {
        let y = i as f64 * 100.0;
        assert_eq!(arr.cells[i], Rect::new(0.0, y, 100.0, y + 100.0));
        // Centered anchor on cell center: (50 - 20, 50 - 10).
        assert_eq!(arr.tile_origins[i], Point::new(30.0, 40.0));
    }
    assert!(diag.entries().is_empty());
}

#[test]
fn custom_anchor_shifts_tile_origin() {
    let tiles = vec![Tile::new(TileId(7), Size::new(40.0, 20.0)).with_anchor(Point::new(0.0, 0.0))];
    let mut arr = TileArrangement::zeroed(1);
    RowLayout.reset_layout(Size::new(100.0, 60.0), &tiles, &mut arr, &RecordingDiagnostics::new());
    assert_eq!(arr.tile_origins[0], Point::new(50.0, 30.0));
}

#[test]
fn focus_expands_one_and_collapses_the_rest() {
    let tiles = tiles(3);
    let mut arr = TileArrangement::zeroed(3);
    let diag = RecordingDiagnostics::new();
    let bounds = Size::new(90.0, 300.0);
    RowLayout.reset_layout(bounds, &tiles, &mut arr, &diag);
    let origins = arr.tile_origins.clone();

    RowLayout.focus(bounds, &tiles, 1, &mut arr, &diag);
    assert_eq!(arr.cells, vec![Rect::ZERO, Rect::new(0.0, 0.0, 90.0, 300.0), Rect::ZERO]);
    assert_eq!(arr.tile_origins, origins);

    RowLayout.collapse_all(bounds, &tiles, &mut arr, &diag);
    assert_eq!(arr.cells[2], Rect::new(0.0, 200.0, 90.0, 300.0));
}

#[test]
fn misuse_is_reported_and_ignored() {
    let diag = RecordingDiagnostics::new();
    let mut empty = TileArrangement::default();
    RowLayout.reset_layout(Size::new(10.0, 10.0), &[], &mut empty, &diag);
    assert!(empty.is_empty());

    let tiles = tiles(2);
    let mut arr = TileArrangement::zeroed(2);
    RowLayout.reset_layout(Size::new(10.0, 10.0), &tiles, &mut arr, &diag);
    let before = arr.clone();
    RowLayout.focus(Size::new(10.0, 10.0), &tiles, 5, &mut arr, &diag);
    assert_eq!(arr, before);

    let warnings = diag.messages(DiagnosticLevel::Warn);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("no tiles"));
    assert!(warnings[1].contains("out of range"));
}

#[test]
fn arrangement_of_any_length_is_resized_to_the_tiles() {
    let tiles = tiles(3);
    let diag = RecordingDiagnostics::new();
    let bounds = Size::new(60.0, 90.0);

    let mut arr = TileArrangement::default();
    RowLayout.reset_layout(bounds, &tiles[1..], &mut arr, &diag);
    assert_eq!(arr.len(), 2);
    assert_eq!(arr.cells[1], Rect::new(0.0, 45.0, 60.0, 90.0));

    let mut long = TileArrangement::zeroed(5);
    RowLayout.reset_layout(bounds, &tiles, &mut long, &diag);
    assert_eq!((long.cells.len(), long.tile_origins.len()), (3, 3));

    let mut short = TileArrangement::zeroed(1);
    RowLayout.focus(bounds, &tiles, 2, &mut short, &diag);
    assert_eq!(short.cells, vec![Rect::ZERO, Rect::ZERO, Rect::new(0.0, 0.0, 60.0, 90.0)]);
    assert_eq!(short.tile_origins.len(), 3);
    assert!(diag.entries().is_empty());
}
