//! Breadth-first traversal utilities over the open-wall adjacency.

use std::collections::VecDeque;

use beacon_maze_core::{CellCoord, SearchError};

use crate::grid::Grid;

const UNDISCOVERED: u32 = u32::MAX;

/// Cell of maximum graph distance from a search source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FarthestCell {
    /// First cell discovered at the maximum distance.
    pub cell: CellCoord,
    /// Graph distance from the source, in steps.
    pub distance: u32,
}

/// Finds the unique open-wall path from `source` to `target`.
///
/// The returned sequence starts at `source`, ends at `target`, and each
/// consecutive pair is adjacent through an open wall, so its length equals
/// the graph distance plus one. On a perfect maze the path exists and is
/// unique; [`SearchError::Unreachable`] therefore signals a corrupted grid
/// and should be surfaced immediately.
pub fn shortest_path(
    grid: &Grid,
    source: CellCoord,
    target: CellCoord,
) -> Result<Vec<CellCoord>, SearchError> {
    let unreachable = SearchError::Unreachable {
        from: source,
        target,
    };

    let mut frontier = Frontier::seeded(grid, source).ok_or(unreachable)?;
    if grid.cell(target).is_err() {
        return Err(unreachable);
    }

    while let Some(cell) = frontier.pop() {
        if cell == target {
            return Ok(frontier.backtrack(target));
        }
        frontier.expand(grid, cell);
    }

    Err(unreachable)
}

/// Finds a cell of maximum graph distance from `source`.
///
/// Ties break toward the cell discovered first in FIFO traversal order, so
/// the result is deterministic for a given grid. A source outside the grid
/// maps onto itself at distance zero.
#[must_use]
pub fn farthest_cell(grid: &Grid, source: CellCoord) -> FarthestCell {
    let mut best = FarthestCell {
        cell: source,
        distance: 0,
    };

    let Some(mut frontier) = Frontier::seeded(grid, source) else {
        return best;
    };

    while let Some(cell) = frontier.pop() {
        let distance = frontier.distance(cell);
        if distance > best.distance {
            best = FarthestCell { cell, distance };
        }
        frontier.expand(grid, cell);
    }

    best
}

/// FIFO breadth-first frontier with dense distance and parent tracking.
///
/// Processing strictly in queue order is what guarantees both correct
/// distances and the first-discovered tie-break.
struct Frontier {
    columns: usize,
    distances: Vec<u32>,
    parents: Vec<Option<CellCoord>>,
    queue: VecDeque<CellCoord>,
}

impl Frontier {
    fn seeded(grid: &Grid, source: CellCoord) -> Option<Self> {
        let _ = grid.cell(source).ok()?;
        let mut frontier = Self {
            columns: grid.columns() as usize,
            distances: vec![UNDISCOVERED; grid.cell_count()],
            parents: vec![None; grid.cell_count()],
            queue: VecDeque::new(),
        };
        let source_index = frontier.index(source);
        frontier.distances[source_index] = 0;
        frontier.queue.push_back(source);
        Some(frontier)
    }

    fn pop(&mut self) -> Option<CellCoord> {
        self.queue.pop_front()
    }

    fn expand(&mut self, grid: &Grid, cell: CellCoord) {
        let next_distance = self.distance(cell) + 1;
        for neighbor in grid.open_neighbors(cell) {
            let index = self.index(neighbor);
            if self.distances[index] != UNDISCOVERED {
                continue;
            }
            self.distances[index] = next_distance;
            self.parents[index] = Some(cell);
            self.queue.push_back(neighbor);
        }
    }

    fn distance(&self, cell: CellCoord) -> u32 {
        self.distances[self.index(cell)]
    }

    fn backtrack(&self, target: CellCoord) -> Vec<CellCoord> {
        let mut path = vec![target];
        let mut cursor = target;
        while let Some(parent) = self.parents[self.index(cursor)] {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        path
    }

    fn index(&self, cell: CellCoord) -> usize {
        cell.row() as usize * self.columns + cell.column() as usize
    }
}
