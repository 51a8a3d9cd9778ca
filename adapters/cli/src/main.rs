#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that builds and explores Beacon Maze levels.

mod level_transfer;
mod render;

use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use beacon_maze_core::{CellCoord, Command, Event, LevelParams, SlotText};
use beacon_maze_system_narrative::Narrative;
use beacon_maze_world::{apply, query, World};
use clap::Parser;

use level_transfer::{LevelCode, CODE_HEADER};

/// Simulated frame duration used when replaying the solution path.
const WALK_TICK: Duration = Duration::from_millis(16);

/// Command-line arguments accepted by the Beacon Maze explorer.
#[derive(Debug, Parser)]
#[command(
    name = "beacon-maze",
    version,
    about = "Builds and explores procedural beacon mazes"
)]
struct Args {
    /// Number of cell columns in the maze.
    #[arg(long, default_value_t = 24)]
    columns: u32,

    /// Number of cell rows in the maze.
    #[arg(long, default_value_t = 24)]
    rows: u32,

    /// Side length of a square cell in world units.
    #[arg(long, default_value_t = 2.0)]
    cell_pitch: f32,

    /// Thickness of the walls in world units.
    #[arg(long, default_value_t = 0.2)]
    wall_thickness: f32,

    /// Generator seed; omit for a random maze.
    #[arg(long)]
    seed: Option<u64>,

    /// Replay the solution path and print the narrative as it fires.
    #[arg(long)]
    walk: bool,

    /// Print a shareable code for the built level.
    #[arg(long)]
    code: bool,

    /// Build the level described by a shared code instead of the flags.
    #[arg(long, value_name = "CODE")]
    load: Option<String>,
}

/// Entry point for the Beacon Maze command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let params = resolve_params(&args)?;

    let mut world = World::new();
    let mut events = Vec::new();
    apply(&mut world, Command::ConfigureLevel { params }, &mut events);
    if !events
        .iter()
        .any(|event| matches!(event, Event::LevelBuilt { .. }))
    {
        bail!("level parameters were rejected; columns and rows must be positive");
    }

    println!("{}", query::welcome_banner(&world));
    println!(
        "{}x{} maze (seed {}): spawn {}, beacon {}, solution {} cells, {} wall segments",
        params.columns,
        params.rows,
        params.seed,
        query::spawn_cell(&world),
        query::exit_cell(&world),
        query::shortest_path_cells(&world).len(),
        query::wall_segments(&world).len(),
    );
    print!(
        "{}",
        render::ascii_maze(
            query::grid(&world),
            query::spawn_cell(&world),
            query::exit_cell(&world),
            query::shortest_path_cells(&world),
        )
    );

    if args.code {
        println!("share code: {}", LevelCode::from_params(params).encode());
    }

    if args.walk {
        walk_solution(&mut world);
    }

    Ok(())
}

fn resolve_params(args: &Args) -> Result<LevelParams> {
    if let Some(code) = &args.load {
        let decoded = LevelCode::decode(code)
            .with_context(|| format!("expected a '{CODE_HEADER}' level code"))?;
        return Ok(decoded.params());
    }

    Ok(LevelParams::new(
        args.columns,
        args.rows,
        args.cell_pitch,
        args.wall_thickness,
        args.seed.unwrap_or_else(rand::random),
    ))
}

/// Drives the agent along the solution path at cell centers, printing every
/// narrative line the moment it fires.
fn walk_solution(world: &mut World) {
    let path: Vec<CellCoord> = query::shortest_path_cells(world).to_vec();
    let layout = query::layout(world);
    let mut narrative = Narrative::from_script(default_script(), path.len());

    let mut events = Vec::new();
    let mut fired = Vec::new();
    for (step, cell) in path.iter().enumerate() {
        let yaw = path
            .get(step + 1)
            .and_then(|next| cell.direction_to(*next))
            .map_or(0.0, heading);

        events.clear();
        fired.clear();
        apply(world, Command::Tick { dt: WALK_TICK }, &mut events);
        apply(
            world,
            Command::MoveAgent {
                position: layout.cell_to_world(*cell),
                yaw,
            },
            &mut events,
        );

        narrative.handle(&events, &path, &mut fired);
        for index in &fired {
            if let SlotText::Line(text) = narrative.slots()[*index].text() {
                println!("  step {step:>3} {cell}: {text}");
            }
        }

        if events
            .iter()
            .any(|event| matches!(event, Event::ExitReached { .. }))
        {
            println!(
                "  the beacon hums overhead; exit reached after {} ticks",
                query::tick_index(world)
            );
        }
    }
}

/// Yaw for a cardinal travel direction; zero faces negative Z.
fn heading(direction: beacon_maze_core::Direction) -> f32 {
    use beacon_maze_core::Direction;
    match direction {
        Direction::North => 0.0,
        Direction::East => -FRAC_PI_2,
        Direction::South => PI,
        Direction::West => FRAC_PI_2,
    }
}

/// Script replayed by `--walk`, spread evenly over the solution path.
fn default_script() -> Vec<SlotText> {
    vec![
        SlotText::line("You wake between glossy walls. Somewhere, a light."),
        SlotText::line("The corridors all look the same. Keep the beacon in mind."),
        SlotText::Silence,
        SlotText::line("Halfway, maybe. The air feels colder here."),
        SlotText::line("The hum grows louder with every turn."),
        SlotText::Silence,
        SlotText::line("Light spills around the next corner."),
        SlotText::line("The beacon stands before you, taller than the sky."),
    ]
}
