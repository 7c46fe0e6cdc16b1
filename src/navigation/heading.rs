//! Heading interpolation for a waypoint's heading mode

use crate::common::angles::{direction_degrees, wrap_degrees};
use crate::common::types::FieldPoint;
use crate::trajectory::HeadingMode;

/// Rotate from `start_deg` toward `end_deg` along the shortest arc.
pub fn shortest_rotation(start_deg: f64, end_deg: f64, t: f64) -> f64 {
    start_deg + wrap_degrees(end_deg - start_deg) * t
}

/// Direction of travel from `from` to `to`, in degrees.
///
/// Coincident points have no direction and give 0.
pub fn tangent_heading(from: &FieldPoint, to: &FieldPoint) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    direction_degrees(dx, dy)
}

/// Facing angle in degrees at progress `t` for the given heading mode.
///
/// `tangent` is a pair of curve positions straddling `t` and is only read in
/// tangential mode; without it the heading falls back to 0.
pub fn heading_at(mode: &HeadingMode, t: f64, tangent: Option<(FieldPoint, FieldPoint)>) -> f64 {
    match *mode {
        HeadingMode::Constant { degrees } => degrees,
        HeadingMode::Linear { start_deg, end_deg } => shortest_rotation(start_deg, end_deg, t),
        HeadingMode::Tangential { reverse } => {
            let Some((before, after)) = tangent else {
                return 0.0;
            };
            if before == after {
                return 0.0;
            }
            let angle = tangent_heading(&before, &after);
            if reverse {
                angle + 180.0
            } else {
                angle
            }
        }
    }
}
