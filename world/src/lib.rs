#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state management for Beacon Maze.
//!
//! The world owns the carved grid, its derived wall geometry, the landmark
//! cells, and the agent. Adapters mutate it exclusively through [`apply`],
//! which broadcasts [`Event`] values for the pure systems to react to.

use beacon_maze_core::{
    AgentState, CellCoord, Command, Event, LevelParams, WallSegment, WELCOME_BANNER,
};

pub mod generator;
pub mod geometry;
pub mod grid;
pub mod search;

use grid::Grid;

const DEFAULT_LEVEL_PARAMS: LevelParams = LevelParams::new(24, 24, 2.0, 0.2, DEFAULT_LEVEL_SEED);
const DEFAULT_LEVEL_SEED: u64 = 0x3a1c_97f2_0b6d_55e1;

/// Collision radius of the agent's circular body in world units.
const AGENT_RADIUS: f32 = 0.3;

/// Represents the authoritative Beacon Maze world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    params: LevelParams,
    grid: Grid,
    wall_segments: Vec<WallSegment>,
    spawn: CellCoord,
    exit: CellCoord,
    path: Vec<CellCoord>,
    agent: AgentState,
    exit_reached: bool,
    tick_index: u64,
}

impl World {
    /// Creates a world with a default level so adapters always observe a
    /// fully built maze.
    #[must_use]
    pub fn new() -> Self {
        let level = Level::build(DEFAULT_LEVEL_PARAMS)
            .expect("default level parameters are non-degenerate");
        Self {
            banner: WELCOME_BANNER,
            params: DEFAULT_LEVEL_PARAMS,
            grid: level.grid,
            wall_segments: level.wall_segments,
            spawn: level.spawn,
            exit: level.exit,
            path: level.path,
            agent: level.agent,
            exit_reached: false,
            tick_index: 0,
        }
    }

    fn install(&mut self, params: LevelParams, level: Level) {
        self.params = params;
        self.grid = level.grid;
        self.wall_segments = level.wall_segments;
        self.spawn = level.spawn;
        self.exit = level.exit;
        self.path = level.path;
        self.agent = level.agent;
        self.exit_reached = false;
        self.tick_index = 0;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything derived from one set of level parameters.
///
/// The grid is the source of truth; segments and path cells are projections
/// that this struct rebuilds from scratch, never patches.
struct Level {
    grid: Grid,
    wall_segments: Vec<WallSegment>,
    spawn: CellCoord,
    exit: CellCoord,
    path: Vec<CellCoord>,
    agent: AgentState,
}

impl Level {
    fn build(params: LevelParams) -> Option<Self> {
        if params.columns == 0 || params.rows == 0 {
            return None;
        }

        let layout = params.layout();
        let grid = generator::generate(params.columns, params.rows, params.seed);
        let wall_segments = geometry::merge_collinear(geometry::wall_segments(
            &grid,
            &layout,
            params.wall_thickness,
        ));

        let spawn = CellCoord::new(0, 0);
        let exit = search::farthest_cell(&grid, spawn).cell;
        let path = search::shortest_path(&grid, spawn, exit)
            .expect("carved maze connects every pair of cells");

        let agent = AgentState::new(layout.cell_to_world(spawn), 0.0, AGENT_RADIUS);

        Some(Self {
            grid,
            wall_segments,
            spawn,
            exit,
            path,
            agent,
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLevel { params } => {
            let Some(level) = Level::build(params) else {
                tracing::debug!(
                    columns = params.columns,
                    rows = params.rows,
                    "rejected degenerate level parameters"
                );
                return;
            };

            world.install(params, level);
            tracing::debug!(
                columns = params.columns,
                rows = params.rows,
                seed = params.seed,
                path_length = world.path.len(),
                "level built"
            );
            out_events.push(Event::LevelBuilt {
                spawn: world.spawn,
                exit: world.exit,
                path_length: world.path.len() as u32,
            });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MoveAgent { position, yaw } => {
            if world.exit_reached {
                return;
            }
            if !(position.x.is_finite() && position.z.is_finite() && yaw.is_finite()) {
                return;
            }

            world.agent.position = position;
            world.agent.yaw = yaw;

            let cell = world.params.layout().world_to_cell(position);
            out_events.push(Event::AgentMoved { cell, position });

            if cell == world.exit {
                world.exit_reached = true;
                tracing::debug!(%cell, ticks = world.tick_index, "exit beacon reached");
                out_events.push(Event::ExitReached { cell });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use beacon_maze_core::{AgentState, CellCoord, LevelLayout, LevelParams, WallSegment};

    use super::{grid::Grid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Parameters the current level was built from.
    #[must_use]
    pub fn level_params(world: &World) -> LevelParams {
        world.params
    }

    /// Cell-to-world transform of the current level.
    #[must_use]
    pub fn layout(world: &World) -> LevelLayout {
        world.params.layout()
    }

    /// Read-only access to the carved maze lattice.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Collidable wall rectangles derived from the current grid.
    #[must_use]
    pub fn wall_segments(world: &World) -> &[WallSegment] {
        &world.wall_segments
    }

    /// Cell the agent spawned in.
    #[must_use]
    pub fn spawn_cell(world: &World) -> CellCoord {
        world.spawn
    }

    /// Cell holding the exit beacon, the farthest cell from the spawn.
    #[must_use]
    pub fn exit_cell(world: &World) -> CellCoord {
        world.exit
    }

    /// The unique open-wall path from the spawn to the exit.
    #[must_use]
    pub fn shortest_path_cells(world: &World) -> &[CellCoord] {
        &world.path
    }

    /// Snapshot of the agent's current pose.
    #[must_use]
    pub fn agent(world: &World) -> AgentState {
        world.agent
    }

    /// Reports whether the agent already reached the exit beacon.
    #[must_use]
    pub fn exit_reached(world: &World) -> bool {
        world.exit_reached
    }

    /// Number of ticks processed since the level was built.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
