//! Projects closed wall flags into world-space collidable rectangles.

use beacon_maze_core::{CellCoord, Direction, LevelLayout, WallSegment};

use crate::grid::Grid;

/// Fraction of the wall thickness added symmetrically to every segment so
/// adjoining corners fully cover each other with no collidable seam.
const OVERLAP_FRACTION: f32 = 0.5;

/// Emits one [`WallSegment`] per closed wall, centered on the shared cell
/// boundary.
///
/// Interior walls are emitted once, from the cell on their north or west
/// side; the south and east lattice boundaries contribute the remaining
/// perimeter pieces. Each segment spans the full cell pitch plus a small
/// symmetric overlap so neighboring segments close their corner gaps.
///
/// The segments are a cached projection: rebuilding the grid invalidates
/// them, and they must be regenerated from the new grid.
#[must_use]
pub fn wall_segments(grid: &Grid, layout: &LevelLayout, wall_thickness: f32) -> Vec<WallSegment> {
    let pitch = layout.cell_pitch();
    let overlap = wall_thickness * OVERLAP_FRACTION;
    let along = (pitch + overlap) / 2.0;
    let across = (wall_thickness + overlap) / 2.0;
    let half_pitch = pitch / 2.0;

    let mut segments = Vec::new();
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            let center = layout.cell_to_world(cell);

            if !grid.is_open(cell, Direction::North) {
                segments.push(WallSegment::new(
                    center.x,
                    center.z - half_pitch,
                    along,
                    across,
                ));
            }
            if !grid.is_open(cell, Direction::West) {
                segments.push(WallSegment::new(
                    center.x - half_pitch,
                    center.z,
                    across,
                    along,
                ));
            }
            if row == grid.rows() - 1 {
                segments.push(WallSegment::new(
                    center.x,
                    center.z + half_pitch,
                    along,
                    across,
                ));
            }
            if column == grid.columns() - 1 {
                segments.push(WallSegment::new(
                    center.x + half_pitch,
                    center.z,
                    across,
                    along,
                ));
            }
        }
    }
    segments
}

/// Coalesces runs of collinear, touching segments into single longer ones.
///
/// Purely a segment-count optimization for rendering and collision scans:
/// a merged segment's bound covers exactly the union of the bounds of the
/// segments it replaces, so collision semantics are unchanged.
#[must_use]
pub fn merge_collinear(segments: Vec<WallSegment>) -> Vec<WallSegment> {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    for segment in segments {
        if segment.half_width >= segment.half_depth {
            horizontal.push(segment);
        } else {
            vertical.push(segment);
        }
    }

    let mut merged = merge_axis(horizontal, true);
    merged.extend(merge_axis(vertical, false));
    merged
}

fn merge_axis(mut segments: Vec<WallSegment>, along_x: bool) -> Vec<WallSegment> {
    let run_of = |segment: &WallSegment| {
        if along_x {
            (segment.center_z, segment.half_depth)
        } else {
            (segment.center_x, segment.half_width)
        }
    };
    let span_of = |segment: &WallSegment| {
        if along_x {
            (
                segment.center_x - segment.half_width,
                segment.center_x + segment.half_width,
            )
        } else {
            (
                segment.center_z - segment.half_depth,
                segment.center_z + segment.half_depth,
            )
        }
    };

    segments.sort_by(|a, b| {
        let (offset_a, _) = run_of(a);
        let (offset_b, _) = run_of(b);
        offset_a
            .total_cmp(&offset_b)
            .then_with(|| span_of(a).0.total_cmp(&span_of(b).0))
    });

    let mut merged: Vec<WallSegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let Some(last) = merged.last_mut() {
            let same_run = run_of(last) == run_of(&segment);
            let (_, last_end) = span_of(last);
            let (start, end) = span_of(&segment);
            if same_run && start <= last_end {
                let (last_start, _) = span_of(last);
                let new_end = last_end.max(end);
                let center = (last_start + new_end) / 2.0;
                let half = (new_end - last_start) / 2.0;
                if along_x {
                    last.center_x = center;
                    last.half_width = half;
                } else {
                    last.center_z = center;
                    last.half_depth = half;
                }
                continue;
            }
        }
        merged.push(segment);
    }
    merged
}
