//! Seeded randomized-backtracker maze generator.

use beacon_maze_core::{CellCoord, Direction};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;

/// Carves a perfect maze over a `columns` by `rows` lattice.
///
/// The carve is a depth-first backtracker driven by an explicit frame stack,
/// so arbitrarily large grids never risk exhausting the call stack. Every
/// lattice cell is visited exactly once regardless of dimension parity, and
/// the open-wall graph forms a spanning tree: acyclic, fully connected, with
/// exactly one simple path between any two cells.
///
/// The direction order is reshuffled independently for every visited cell
/// from a ChaCha stream seeded with `seed`, so equal seeds and dimensions
/// reproduce the wall layout bit for bit.
#[must_use]
pub fn generate(columns: u32, rows: u32, seed: u64) -> Grid {
    let mut grid = Grid::new(columns, rows);
    if columns == 0 || rows == 0 {
        return grid;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let origin = CellCoord::new(0, 0);
    grid.mark_visited(origin);

    let mut stack = vec![Frame::shuffled(origin, &mut rng)];
    while let Some(frame) = stack.last_mut() {
        match frame.next_unvisited(&grid, columns, rows) {
            Some((current, neighbor)) => {
                grid.open_between(current, neighbor)
                    .expect("backtracker only opens walls between adjacent cells");
                grid.mark_visited(neighbor);
                stack.push(Frame::shuffled(neighbor, &mut rng));
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    debug_assert_eq!(
        grid.open_wall_pairs(),
        u64::from(columns) * u64::from(rows) - 1,
        "carved maze must be a spanning tree"
    );

    grid
}

/// One backtracker stack frame: a cell and its private direction order.
#[derive(Clone, Copy, Debug)]
struct Frame {
    cell: CellCoord,
    directions: [Direction; 4],
    cursor: usize,
}

impl Frame {
    fn shuffled<R: Rng>(cell: CellCoord, rng: &mut R) -> Self {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            cursor: 0,
        }
    }

    fn next_unvisited(
        &mut self,
        grid: &Grid,
        columns: u32,
        rows: u32,
    ) -> Option<(CellCoord, CellCoord)> {
        while self.cursor < self.directions.len() {
            let direction = self.directions[self.cursor];
            self.cursor += 1;

            if let Some(neighbor) = direction.step(self.cell, columns, rows) {
                if !grid.is_visited(neighbor) {
                    return Some((self.cell, neighbor));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn reachable_cells(grid: &Grid, source: CellCoord) -> usize {
        let mut seen = vec![false; grid.cell_count()];
        let mut queue = VecDeque::new();
        let index = |cell: CellCoord| {
            cell.row() as usize * grid.columns() as usize + cell.column() as usize
        };

        seen[index(source)] = true;
        queue.push_back(source);
        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for neighbor in grid.open_neighbors(cell) {
                if !seen[index(neighbor)] {
                    seen[index(neighbor)] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        count
    }

    #[test]
    fn carved_maze_is_a_spanning_tree() {
        for seed in [0, 1, 42, 0xdead_beef] {
            let grid = generate(8, 6, seed);
            assert_eq!(grid.open_wall_pairs(), 8 * 6 - 1, "seed {seed}");
            assert_eq!(reachable_cells(&grid, CellCoord::new(0, 0)), 8 * 6);
        }
    }

    #[test]
    fn every_cell_is_reached_for_even_and_odd_dimensions() {
        for (columns, rows) in [(4, 4), (5, 5), (4, 7), (9, 2)] {
            let grid = generate(columns, rows, 7);
            let cells = columns as usize * rows as usize;
            assert_eq!(reachable_cells(&grid, CellCoord::new(0, 0)), cells);
            assert_eq!(grid.open_wall_pairs(), cells as u64 - 1);
        }
    }

    #[test]
    fn wall_state_stays_symmetric_everywhere() {
        let grid = generate(7, 7, 99);
        for row in 0..7 {
            for column in 0..7 {
                let cell = CellCoord::new(column, row);
                for direction in Direction::ALL {
                    let Some(neighbor) = direction.step(cell, 7, 7) else {
                        continue;
                    };
                    assert_eq!(
                        grid.is_open(cell, direction),
                        grid.is_open(neighbor, direction.opposite()),
                        "wall between {cell} and {neighbor} disagrees"
                    );
                }
            }
        }
    }

    #[test]
    fn equal_seeds_reproduce_the_exact_layout() {
        let first = generate(5, 5, 42);
        let second = generate(5, 5, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn seed_42_carves_the_expected_five_by_five_layout() {
        // Checked-in layout: a drift in the RNG stream, the shuffle, or the
        // carve order shows up here even when two in-process runs agree.
        let expected = "\
+---+---+---+---+---+
|   |           |   |
+   +   +---+   +   +
|   |   |   |       |
+   +   +   +---+   +
|       |       |   |
+---+---+   +---+   +
|   |               |
+   +   +---+---+---+
|                   |
+---+---+---+---+---+
";
        assert_eq!(sketch(&generate(5, 5, 42)), expected);
    }

    fn sketch(grid: &Grid) -> String {
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
                out.push_str("   ");
            }
            out.push_str("|\n");
        }
        for _ in 0..grid.columns() {
            out.push_str("+---");
        }
        out.push_str("+\n");
        out
    }

    #[test]
    fn different_seeds_diverge() {
        let layouts: Vec<Grid> = (0..8).map(|seed| generate(6, 6, seed)).collect();
        let distinct = layouts
            .iter()
            .filter(|grid| **grid != layouts[0])
            .count();
        assert!(distinct > 0, "eight seeds should not all collide");
    }

    #[test]
    fn single_cell_and_empty_grids_are_tolerated() {
        let single = generate(1, 1, 3);
        assert_eq!(single.open_wall_pairs(), 0);

        let empty = generate(0, 4, 3);
        assert_eq!(empty.cell_count(), 0);
    }

    #[test]
    fn corridor_grid_opens_into_a_straight_line() {
        let grid = generate(1, 6, 11);
        for row in 0..5 {
            assert!(grid.is_open(CellCoord::new(0, row), Direction::South));
        }
    }
}
