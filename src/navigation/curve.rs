//! Parametric curve evaluation
//!
//! A segment's shape is a Bézier curve of arbitrary degree over
//! `[start, ...control points..., end]`. Points are found by repeated linear
//! interpolation (de Casteljau), which needs no special case for the number
//! of control points; two points give a straight line.

use crate::common::types::FieldPoint;
use crate::trajectory::{ControlPoint, Waypoint};

/// Parameter offset used for tangent sampling around a curve parameter
pub const TANGENT_OFFSET: f64 = 0.01;

/// Evaluate the curve through `points` at parameter `t`.
///
/// `t` is not validated; callers keep it within `[0, 1]`. At `t = 0` and
/// `t = 1` the first and last points are returned exactly. An empty slice
/// yields the origin.
pub fn evaluate_curve(t: f64, points: &[FieldPoint]) -> FieldPoint {
    let mut level: Vec<FieldPoint> = points.to_vec();
    while level.len() > 1 {
        level = level
            .windows(2)
            .map(|pair| pair[0].lerp(&pair[1], t))
            .collect();
    }
    level.first().copied().unwrap_or_default()
}

/// Ordered point list `[start, ...controls..., end]` for a segment
pub fn curve_points(
    start: &Waypoint,
    controls: &[ControlPoint],
    end: &Waypoint,
) -> Vec<FieldPoint> {
    let mut points = Vec::with_capacity(controls.len() + 2);
    points.push(start.position());
    points.extend(controls.iter().map(ControlPoint::position));
    points.push(end.position());
    points
}

/// `intervals + 1` evenly spaced samples along the curve, both ends included
pub fn sample_curve(points: &[FieldPoint], intervals: usize) -> Vec<FieldPoint> {
    let intervals = intervals.max(1);
    (0..=intervals)
        .map(|i| evaluate_curve(i as f64 / intervals as f64, points))
        .collect()
}

/// Curve positions just before and just after `t`, clamped to the curve
pub fn tangent_samples(points: &[FieldPoint], t: f64) -> (FieldPoint, FieldPoint) {
    let before = (t - TANGENT_OFFSET).clamp(0.0, 1.0);
    let after = (t + TANGENT_OFFSET).clamp(0.0, 1.0);
    (evaluate_curve(before, points), evaluate_curve(after, points))
}
