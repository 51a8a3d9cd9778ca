#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure locomotion system that resolves agent movement against wall geometry.
//!
//! Each tick the system turns the pressed-key snapshot into a proposed
//! displacement, resolves it against the level's wall segments with
//! axis-decomposed sliding, and emits a single `MoveAgent` command carrying
//! the final pose. It never mutates world state directly.

use std::time::Duration;

use beacon_maze_core::{AgentState, Command, Event, InputVector, WallSegment, WorldPoint};

/// Configuration parameters required to construct the locomotion system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    move_speed: f32,
    turn_speed: f32,
}

impl Config {
    /// Creates a new configuration from linear and angular speeds.
    ///
    /// `move_speed` is in world units per second, `turn_speed` in radians
    /// per second.
    #[must_use]
    pub const fn new(move_speed: f32, turn_speed: f32) -> Self {
        Self {
            move_speed,
            turn_speed,
        }
    }
}

impl Default for Config {
    /// Default speeds matching the reference experience at 60 ticks per
    /// second (0.08 units and 0.06 radians per tick).
    fn default() -> Self {
        Self::new(4.8, 3.6)
    }
}

/// Pure system that reacts to clock events and emits resolved agent poses.
#[derive(Debug, Default)]
pub struct Locomotion {
    config: Config,
}

impl Locomotion {
    /// Creates a new locomotion system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Consumes clock events and immutable views to emit a movement command.
    ///
    /// Emits exactly one `MoveAgent` per tick that advanced time, even when
    /// the agent ends up stationary, so downstream per-tick consumers always
    /// observe the current pose.
    pub fn handle(
        &self,
        events: &[Event],
        agent: AgentState,
        input: InputVector,
        walls: &[WallSegment],
        out: &mut Vec<Command>,
    ) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = elapsed.saturating_add(*dt);
            }
        }
        if elapsed.is_zero() {
            return;
        }

        let dt = elapsed.as_secs_f32();
        let mut yaw = agent.yaw;
        if input.turn_left {
            yaw += self.config.turn_speed * dt;
        }
        if input.turn_right {
            yaw -= self.config.turn_speed * dt;
        }

        let step = self.config.move_speed * dt;
        let (forward_x, forward_z) = (-yaw.sin(), -yaw.cos());
        let (right_x, right_z) = (-forward_z, forward_x);

        let mut dx = 0.0;
        let mut dz = 0.0;
        if input.forward {
            dx += forward_x * step;
            dz += forward_z * step;
        }
        if input.backward {
            dx -= forward_x * step;
            dz -= forward_z * step;
        }
        if input.strafe_right {
            dx += right_x * step;
            dz += right_z * step;
        }
        if input.strafe_left {
            dx -= right_x * step;
            dz -= right_z * step;
        }

        let proposed = WorldPoint::new(agent.position.x + dx, agent.position.z + dz);
        let position = resolve_slide(agent.position, proposed, agent.radius, walls);
        out.push(Command::MoveAgent { position, yaw });
    }
}

/// Reports whether a circle overlaps an axis-aligned wall segment.
///
/// The closest point on the box is found by clamping the circle center to
/// the box extents; the circle intersects iff the squared distance to that
/// point is strictly less than the squared radius, so a circle exactly
/// touching the boundary does not collide.
#[must_use]
pub fn circle_intersects_box(center: WorldPoint, radius: f32, segment: &WallSegment) -> bool {
    let closest_x = center.x.clamp(
        segment.center_x - segment.half_width,
        segment.center_x + segment.half_width,
    );
    let closest_z = center.z.clamp(
        segment.center_z - segment.half_depth,
        segment.center_z + segment.half_depth,
    );

    let dx = center.x - closest_x;
    let dz = center.z - closest_z;
    dx * dx + dz * dz < radius * radius
}

/// Reports whether a circle at `center` overlaps any wall segment.
#[must_use]
pub fn position_collides(center: WorldPoint, radius: f32, walls: &[WallSegment]) -> bool {
    walls
        .iter()
        .any(|segment| circle_intersects_box(center, radius, segment))
}

/// Resolves a proposed move with axis-decomposed sliding.
///
/// The full move is accepted outright when it clears every segment.
/// Otherwise the X component and then the Z component are retried on
/// their own against the *current* position, and the first axis-restricted
/// candidate that clears every segment wins: a diagonal push into a wall
/// slides along it instead of stopping dead. When neither candidate
/// clears, the agent stays put for the tick. Every returned position is a
/// fully tested non-colliding candidate (or the unchanged current
/// position), so resolution never parks the agent inside a wall bound.
/// A zero-length proposal is a no-op and is never tested against geometry.
#[must_use]
pub fn resolve_slide(
    current: WorldPoint,
    proposed: WorldPoint,
    radius: f32,
    walls: &[WallSegment],
) -> WorldPoint {
    if proposed == current {
        return current;
    }

    if !position_collides(proposed, radius, walls) {
        return proposed;
    }

    let x_only = WorldPoint::new(proposed.x, current.z);
    if !position_collides(x_only, radius, walls) {
        return x_only;
    }

    let z_only = WorldPoint::new(current.x, proposed.z);
    if !position_collides(z_only, radius, walls) {
        return z_only;
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_at_origin() -> WallSegment {
        WallSegment::new(0.0, 0.0, 1.0, 0.5)
    }

    #[test]
    fn circle_inside_the_box_intersects() {
        assert!(circle_intersects_box(
            WorldPoint::new(0.2, -0.1),
            0.3,
            &box_at_origin()
        ));
    }

    #[test]
    fn containment_boundary_is_exclusive() {
        let segment = box_at_origin();
        // Closest point is the right face at x = 1.0; 0.25 and 1.25 are
        // exactly representable, so the touching case sits on the boundary.
        assert!(circle_intersects_box(
            WorldPoint::new(1.2, 0.0),
            0.25,
            &segment
        ));
        assert!(!circle_intersects_box(
            WorldPoint::new(1.25, 0.0),
            0.25,
            &segment
        ));
        assert!(!circle_intersects_box(
            WorldPoint::new(1.5, 0.0),
            0.25,
            &segment
        ));
    }

    #[test]
    fn corner_distance_uses_the_closest_point() {
        let segment = box_at_origin();
        // Corner at (1.0, 0.5); diagonal offset of (0.2, 0.2) is ~0.283.
        assert!(circle_intersects_box(
            WorldPoint::new(1.2, 0.7),
            0.3,
            &segment
        ));
        assert!(!circle_intersects_box(
            WorldPoint::new(1.25, 0.75),
            0.3,
            &segment
        ));
    }

    #[test]
    fn clear_moves_are_accepted_outright() {
        let walls = [box_at_origin()];
        let current = WorldPoint::new(3.0, 3.0);
        let proposed = WorldPoint::new(3.5, 2.5);
        assert_eq!(resolve_slide(current, proposed, 0.3, &walls), proposed);
    }

    #[test]
    fn x_blocked_moves_slide_along_z() {
        let walls = [box_at_origin()];
        // Standing right of the box, pushing diagonally into it.
        let current = WorldPoint::new(1.4, 0.0);
        let proposed = WorldPoint::new(1.2, 0.4);

        let resolved = resolve_slide(current, proposed, 0.3, &walls);
        assert_eq!(resolved.x, current.x);
        assert_eq!(resolved.z, proposed.z);
    }

    #[test]
    fn z_blocked_moves_slide_along_x() {
        let walls = [box_at_origin()];
        // Standing below the box, pushing diagonally up into it.
        let current = WorldPoint::new(0.0, 0.9);
        let proposed = WorldPoint::new(0.4, 0.7);

        let resolved = resolve_slide(current, proposed, 0.3, &walls);
        assert_eq!(resolved.x, proposed.x);
        assert_eq!(resolved.z, current.z);
    }

    #[test]
    fn corner_pushes_resolve_to_a_clear_single_axis_slide() {
        let walls = [box_at_origin()];
        // Approaching the (1.0, 0.5) corner diagonally: the combined move
        // lands inside the bound while each axis clears on its own. The
        // resolver must return one tested axis candidate, never the
        // rejected combination.
        let current = WorldPoint::new(1.4, 0.9);
        let proposed = WorldPoint::new(1.2, 0.7);

        let resolved = resolve_slide(current, proposed, 0.3, &walls);
        assert_eq!(resolved, WorldPoint::new(1.2, 0.9));
        assert!(!position_collides(resolved, 0.3, &walls));
    }

    #[test]
    fn fully_blocked_moves_keep_the_agent_in_place() {
        // Boxed in between two walls with no room on either axis.
        let walls = [
            WallSegment::new(0.0, -1.0, 2.0, 0.5),
            WallSegment::new(0.0, 1.0, 2.0, 0.5),
            WallSegment::new(-1.0, 0.0, 0.5, 2.0),
            WallSegment::new(1.0, 0.0, 0.5, 2.0),
        ];
        let current = WorldPoint::new(0.0, 0.0);
        let proposed = WorldPoint::new(0.3, 0.3);

        assert_eq!(resolve_slide(current, proposed, 0.3, &walls), current);
    }

    #[test]
    fn zero_length_moves_skip_geometry_entirely() {
        // The current position deliberately overlaps a wall; a no-op move
        // must not be rejected or "fixed up".
        let walls = [box_at_origin()];
        let inside = WorldPoint::new(0.0, 0.0);
        assert_eq!(resolve_slide(inside, inside, 0.3, &walls), inside);
    }

    #[test]
    fn handle_emits_one_pose_per_advanced_tick() {
        let locomotion = Locomotion::default();
        let agent = AgentState::new(WorldPoint::new(0.0, 0.0), 0.0, 0.3);
        let events = [Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }];
        let mut out = Vec::new();

        locomotion.handle(&events, agent, InputVector::idle(), &[], &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0],
            Command::MoveAgent {
                position: agent.position,
                yaw: 0.0,
            }
        );
    }

    #[test]
    fn handle_stays_silent_without_time_advancing() {
        let locomotion = Locomotion::default();
        let agent = AgentState::new(WorldPoint::new(0.0, 0.0), 0.0, 0.3);
        let mut out = Vec::new();

        locomotion.handle(&[], agent, InputVector::idle(), &[], &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn forward_input_moves_along_the_heading() {
        let locomotion = Locomotion::new(Config::new(1.0, 1.0));
        let agent = AgentState::new(WorldPoint::new(0.0, 0.0), 0.0, 0.3);
        let events = [Event::TimeAdvanced {
            dt: Duration::from_secs(1),
        }];
        let input = InputVector {
            forward: true,
            ..InputVector::idle()
        };
        let mut out = Vec::new();

        locomotion.handle(&events, agent, input, &[], &mut out);

        // Yaw zero faces negative Z.
        let Command::MoveAgent { position, yaw } = out[0] else {
            panic!("expected a movement command");
        };
        assert!(yaw.abs() < 1e-6);
        assert!(position.x.abs() < 1e-6);
        assert!((position.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn turning_rotates_without_translating() {
        let locomotion = Locomotion::new(Config::new(1.0, 0.5));
        let agent = AgentState::new(WorldPoint::new(2.0, -1.0), 0.0, 0.3);
        let events = [Event::TimeAdvanced {
            dt: Duration::from_secs(1),
        }];
        let input = InputVector {
            turn_left: true,
            ..InputVector::idle()
        };
        let mut out = Vec::new();

        locomotion.handle(&events, agent, input, &[], &mut out);

        let Command::MoveAgent { position, yaw } = out[0] else {
            panic!("expected a movement command");
        };
        assert!((yaw - 0.5).abs() < 1e-6);
        assert_eq!(position, agent.position);
    }

    #[test]
    fn opposed_inputs_cancel_into_a_no_op() {
        let locomotion = Locomotion::default();
        let agent = AgentState::new(WorldPoint::new(0.0, 0.0), 0.7, 0.3);
        let events = [Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }];
        let input = InputVector {
            forward: true,
            backward: true,
            strafe_left: true,
            strafe_right: true,
            ..InputVector::idle()
        };
        let mut out = Vec::new();

        locomotion.handle(&events, agent, input, &[], &mut out);

        let Command::MoveAgent { position, .. } = out[0] else {
            panic!("expected a movement command");
        };
        assert_eq!(position, agent.position);
    }
}
