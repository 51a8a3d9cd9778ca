//! Mutable wall-flag lattice that the generator carves into a maze.

use beacon_maze_core::{CellCoord, Direction, GridError};

/// One lattice unit of the maze with four potential wall flags.
///
/// The `visited` bit exists for the generator's bookkeeping only; once a
/// level is built the grid is never mutated again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    const fn sealed() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }

    /// Reports whether the wall toward the provided direction is closed.
    #[must_use]
    pub const fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction as usize]
    }
}

/// Owned maze lattice stored as a flat row-major cell vector.
///
/// Wall state is kept symmetric at all times: a wall is open between two
/// adjacent cells iff both cells agree. [`Grid::open_between`] is the only
/// public mutation path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every wall closed and no cell visited.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Cell::sealed(); capacity],
        }
    }

    /// Number of cell columns in the lattice.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows in the lattice.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells in the lattice.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell stored at the provided coordinate.
    pub fn cell(&self, cell: CellCoord) -> Result<&Cell, GridError> {
        let index = self.index(cell).ok_or(GridError::OutOfBounds {
            cell,
            columns: self.columns,
            rows: self.rows,
        })?;
        Ok(&self.cells[index])
    }

    /// Opens the shared wall between two lattice-adjacent cells.
    ///
    /// The flag is cleared on both sides so the symmetry invariant holds.
    /// Fails with [`GridError::OutOfBounds`] when either cell lies outside
    /// the lattice and [`GridError::NotAdjacent`] when the cells do not
    /// share an edge.
    pub fn open_between(&mut self, a: CellCoord, b: CellCoord) -> Result<(), GridError> {
        let index_a = self.index(a).ok_or(GridError::OutOfBounds {
            cell: a,
            columns: self.columns,
            rows: self.rows,
        })?;
        let index_b = self.index(b).ok_or(GridError::OutOfBounds {
            cell: b,
            columns: self.columns,
            rows: self.rows,
        })?;

        let direction = a.direction_to(b).ok_or(GridError::NotAdjacent { a, b })?;

        self.cells[index_a].walls[direction as usize] = false;
        self.cells[index_b].walls[direction.opposite() as usize] = false;
        Ok(())
    }

    /// Reports whether the wall from `cell` toward `direction` is open.
    ///
    /// Out-of-bounds cells and the lattice perimeter read as closed.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord, direction: Direction) -> bool {
        if direction.step(cell, self.columns, self.rows).is_none() {
            return false;
        }

        self.index(cell)
            .map_or(false, |index| !self.cells[index].has_wall(direction))
    }

    /// Lattice neighbors reachable from `cell` through open walls, probed in
    /// north, east, south, west order. Searches rely on this order for their
    /// deterministic tie-breaking.
    pub fn open_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            if self.is_open(cell, direction) {
                direction.step(cell, self.columns, self.rows)
            } else {
                None
            }
        })
    }

    /// Number of open-wall adjacencies, counting each shared wall once.
    ///
    /// A perfect maze over this lattice has exactly `cell_count() - 1` open
    /// adjacencies; the generator asserts this after carving.
    #[must_use]
    pub fn open_wall_pairs(&self) -> u64 {
        let mut pairs = 0;
        for row in 0..self.rows {
            for column in 0..self.columns {
                let cell = CellCoord::new(column, row);
                if self.is_open(cell, Direction::East) {
                    pairs += 1;
                }
                if self.is_open(cell, Direction::South) {
                    pairs += 1;
                }
            }
        }
        pairs
    }

    pub(crate) fn mark_visited(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.cells[index].visited = true;
        }
    }

    pub(crate) fn is_visited(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(true, |index| self.cells[index].visited)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
