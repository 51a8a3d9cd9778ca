#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Beacon Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Beacon Maze.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Discards the current level and builds a fresh one from the parameters.
    ConfigureLevel {
        /// Dimensions, metrics, and seed of the level to build.
        params: LevelParams,
    },
    /// Advances the simulation clock by the provided delta time.
    ///
    /// Callers are expected to clamp `dt` to a sane maximum (50ms or less)
    /// before submitting the command; the sliding resolver assumes each
    /// displacement is small relative to the wall thickness.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Applies the locomotion system's resolved pose to the agent.
    MoveAgent {
        /// Continuous position the agent should occupy after the tick.
        position: WorldPoint,
        /// Heading of the agent in radians after the tick.
        yaw: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a level finished building and is ready to explore.
    LevelBuilt {
        /// Cell the agent starts from.
        spawn: CellCoord,
        /// Farthest cell from the spawn, marked by the exit beacon.
        exit: CellCoord,
        /// Number of cells on the unique spawn-to-exit path.
        path_length: u32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Reports the agent's pose and containing cell after a movement command.
    ///
    /// Emitted for every processed movement, including fully blocked ones,
    /// so per-tick consumers always observe the current cell.
    AgentMoved {
        /// Cell containing the agent after the move.
        cell: CellCoord,
        /// Continuous position of the agent after the move.
        position: WorldPoint,
    },
    /// Announces that the agent reached the exit cell; the agent freezes.
    ExitReached {
        /// Cell containing the exit beacon.
        cell: CellCoord,
    },
}

/// Location of a single maze cell expressed as column and row coordinates.
///
/// Columns grow along the world X axis, rows along the world Z axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Direction pointing from this cell to a lattice-adjacent neighbor.
    ///
    /// Returns `None` when the cells are not exactly one step apart along a
    /// single axis.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        let column_diff = self.column.abs_diff(other.column);
        let row_diff = self.row.abs_diff(other.row);

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if other.column > self.column {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if other.row > self.row {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cardinal directions across the maze lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices (negative world Z).
    North,
    /// Movement toward increasing column indices (positive world X).
    East,
    /// Movement toward increasing row indices (positive world Z).
    South,
    /// Movement toward decreasing column indices (negative world X).
    West,
}

impl Direction {
    /// All four directions in the canonical probe order used by searches.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Neighbor of `cell` one step in this direction, bounds-checked against
    /// a `columns` by `rows` lattice.
    #[must_use]
    pub fn step(self, cell: CellCoord, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match self {
            Direction::North => (Some(cell.column()), cell.row().checked_sub(1)),
            Direction::East => (cell.column().checked_add(1), Some(cell.row())),
            Direction::South => (Some(cell.column()), cell.row().checked_add(1)),
            Direction::West => (cell.column().checked_sub(1), Some(cell.row())),
        };

        match (column, row) {
            (Some(column), Some(row)) if column < columns && row < rows => {
                Some(CellCoord::new(column, row))
            }
            _ => None,
        }
    }
}

/// Continuous position on the maze floor plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    /// Position along the world X axis.
    pub x: f32,
    /// Position along the world Z axis.
    pub z: f32,
}

impl WorldPoint {
    /// Creates a new point from its two components.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// Parameters that fully determine a level.
///
/// Two levels built from equal parameters have byte-identical wall layouts;
/// the seed is the only source of randomness in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Number of cell columns in the maze lattice.
    pub columns: u32,
    /// Number of cell rows in the maze lattice.
    pub rows: u32,
    /// Side length of a square cell measured in world units.
    pub cell_pitch: f32,
    /// Thickness of the walls separating cells, in world units.
    pub wall_thickness: f32,
    /// Seed for the maze generator's random stream.
    pub seed: u64,
}

impl LevelParams {
    /// Creates a new parameter set.
    #[must_use]
    pub const fn new(
        columns: u32,
        rows: u32,
        cell_pitch: f32,
        wall_thickness: f32,
        seed: u64,
    ) -> Self {
        Self {
            columns,
            rows,
            cell_pitch,
            wall_thickness,
            seed,
        }
    }

    /// Transform between cell coordinates and world positions for this level.
    #[must_use]
    pub const fn layout(&self) -> LevelLayout {
        LevelLayout {
            columns: self.columns,
            rows: self.rows,
            cell_pitch: self.cell_pitch,
        }
    }
}

/// Maps cell coordinates onto the origin-centered world plane and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelLayout {
    columns: u32,
    rows: u32,
    cell_pitch: f32,
}

impl LevelLayout {
    /// Creates a layout for a `columns` by `rows` lattice with square cells.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, cell_pitch: f32) -> Self {
        Self {
            columns,
            rows,
            cell_pitch,
        }
    }

    /// Number of cell columns covered by the layout.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows covered by the layout.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell in world units.
    #[must_use]
    pub const fn cell_pitch(&self) -> f32 {
        self.cell_pitch
    }

    /// World position of the center of the provided cell.
    ///
    /// The maze is centered on the world origin, so cell (0, 0) sits in the
    /// negative-X, negative-Z quadrant.
    #[must_use]
    pub fn cell_to_world(&self, cell: CellCoord) -> WorldPoint {
        let half = self.cell_pitch / 2.0;
        WorldPoint::new(
            (cell.column() as f32 - self.columns as f32 / 2.0) * self.cell_pitch + half,
            (cell.row() as f32 - self.rows as f32 / 2.0) * self.cell_pitch + half,
        )
    }

    /// Cell containing the provided world position.
    ///
    /// Exact inverse of [`LevelLayout::cell_to_world`] at cell centers.
    /// Positions outside the lattice are silently clamped to the nearest
    /// boundary cell so agents brushing the maze edge remain controllable.
    #[must_use]
    pub fn world_to_cell(&self, point: WorldPoint) -> CellCoord {
        CellCoord::new(
            self.axis_to_index(point.x, self.columns),
            self.axis_to_index(point.z, self.rows),
        )
    }

    fn axis_to_index(&self, position: f32, extent: u32) -> u32 {
        if extent == 0 || self.cell_pitch <= 0.0 {
            return 0;
        }

        let half = self.cell_pitch / 2.0;
        let index = ((position - half) / self.cell_pitch + extent as f32 / 2.0).round();
        let clamped = index.clamp(0.0, (extent - 1) as f32);
        clamped as u32
    }
}

/// Axis-aligned collidable rectangle derived from a closed wall.
///
/// Segments are a cached projection of the grid's wall flags; rebuilding the
/// grid invalidates every segment derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    /// World X coordinate of the segment center.
    pub center_x: f32,
    /// World Z coordinate of the segment center.
    pub center_z: f32,
    /// Half of the segment's extent along the X axis.
    pub half_width: f32,
    /// Half of the segment's extent along the Z axis.
    pub half_depth: f32,
}

impl WallSegment {
    /// Creates a segment from its center and half extents.
    #[must_use]
    pub const fn new(center_x: f32, center_z: f32, half_width: f32, half_depth: f32) -> Self {
        Self {
            center_x,
            center_z,
            half_width,
            half_depth,
        }
    }
}

/// Mutable pose of the player-controlled agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentState {
    /// Continuous position of the agent's center on the floor plane.
    pub position: WorldPoint,
    /// Heading in radians; zero faces negative Z, growing counter-clockwise.
    pub yaw: f32,
    /// Collision radius of the agent's circular body.
    pub radius: f32,
}

impl AgentState {
    /// Creates an agent at the provided position with the given radius.
    #[must_use]
    pub const fn new(position: WorldPoint, yaw: f32, radius: f32) -> Self {
        Self {
            position,
            yaw,
            radius,
        }
    }
}

/// Snapshot of the pressed movement keys for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputVector {
    /// Move along the agent's heading.
    pub forward: bool,
    /// Move against the agent's heading.
    pub backward: bool,
    /// Strafe to the agent's left.
    pub strafe_left: bool,
    /// Strafe to the agent's right.
    pub strafe_right: bool,
    /// Rotate the heading counter-clockwise.
    pub turn_left: bool,
    /// Rotate the heading clockwise.
    pub turn_right: bool,
}

impl InputVector {
    /// Snapshot with no keys pressed.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            forward: false,
            backward: false,
            strafe_left: false,
            strafe_right: false,
            turn_left: false,
            turn_right: false,
        }
    }
}

/// Text carried by a narrative slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotText {
    /// A line the presentation shell should display when the slot fires.
    Line(String),
    /// Explicit silence: the slot is consumed without an outward event.
    Silence,
}

impl SlotText {
    /// Creates a displayable line from anything string-like.
    #[must_use]
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }
}

/// Errors raised by grid mutation and bounds-checked access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The two cells do not share an edge, so no wall connects them.
    #[error("cells {a} and {b} are not lattice-adjacent")]
    NotAdjacent {
        /// First cell of the rejected pair.
        a: CellCoord,
        /// Second cell of the rejected pair.
        b: CellCoord,
    },
    /// The cell lies outside the grid extents.
    #[error("cell {cell} lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Offending cell coordinate.
        cell: CellCoord,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
}

/// Errors raised by graph searches over the open-wall adjacency.
///
/// A perfect maze connects every pair of cells, so surfacing this error
/// means the grid invariant was violated upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No open-wall route exists between the two cells.
    #[error("no open-wall route from {from} to {target}")]
    Unreachable {
        /// Cell the search started from.
        from: CellCoord,
        /// Cell the search failed to reach.
        target: CellCoord,
    },
}
