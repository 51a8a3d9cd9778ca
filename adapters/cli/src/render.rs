//! ASCII presentation of a carved level for terminal output.

use std::collections::HashSet;

use beacon_maze_core::{CellCoord, Direction};
use beacon_maze_world::grid::Grid;

/// Marker drawn in the spawn cell.
const SPAWN_MARKER: char = 'S';
/// Marker drawn in the exit beacon cell.
const EXIT_MARKER: char = 'E';
/// Marker drawn along the solution path.
const PATH_MARKER: char = '.';

/// Renders the maze as box-drawing ASCII with the solution path marked.
pub(crate) fn ascii_maze(
    grid: &Grid,
    spawn: CellCoord,
    exit: CellCoord,
    path: &[CellCoord],
) -> String {
    let on_path: HashSet<CellCoord> = path.iter().copied().collect();
    let marker = |cell: CellCoord| {
        if cell == spawn {
            SPAWN_MARKER
        } else if cell == exit {
            EXIT_MARKER
        } else if on_path.contains(&cell) {
            PATH_MARKER
        } else {
            ' '
        }
    };

    let mut out = String::new();
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            out.push('+');
            out.push_str(if grid.is_open(cell, Direction::North) {
                "   "
            } else {
                "---"
            });
        }
        out.push_str("+\n");

        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            out.push(if grid.is_open(cell, Direction::West) {
                ' '
            } else {
                '|'
            });
            out.push(' ');
            out.push(marker(cell));
            out.push(' ');
        }
        // The east lattice boundary is always sealed.
        out.push_str("|\n");
    }

    for _ in 0..grid.columns() {
        out.push_str("+---");
    }
    out.push_str("+\n");
    out
}
