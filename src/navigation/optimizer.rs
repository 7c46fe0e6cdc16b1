//! Collision-aware trajectory optimization
//!
//! Each segment is sampled along its curve, a robot footprint (inflated by the
//! safety margin) is placed at every sample and checked against the field
//! bounds and every obstacle. The first violation aborts the whole run. When
//! a segment passes, its control points are pulled a little toward the
//! midpoint of its endpoints.
//!
//! Sampling always uses the original, unsmoothed trajectory: smoothing one
//! segment never changes how a later segment is checked.

use super::collision::RobotFootprint;
use super::curve::{curve_points, sample_curve};
use super::heading::{heading_at, tangent_heading};
use crate::common::types::FieldPoint;
use crate::error::PathError;
use crate::trajectory::{ControlPoint, Line, Settings, Shape, Waypoint};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Fewest curve intervals sampled per curved segment
pub const MIN_SAMPLES_PER_SEGMENT: usize = 10;
/// Curve intervals added per unit of optimization quality
pub const SAMPLES_QUALITY_MULTIPLIER: usize = 10;
/// Optimization quality that maps to a smoothing factor of 1
pub const SMOOTHING_SCALE: f64 = 10.0;
/// Fraction of the remaining distance a control point moves at factor 1
pub const SMOOTHING_MULTIPLIER: f64 = 0.1;

/// A segment with its resolved start waypoint
#[derive(Debug, Clone, Copy)]
struct Segment<'a> {
    /// 1-based position in the trajectory
    number: usize,
    start: &'a Waypoint,
    line: &'a Line,
}

fn segments<'a>(start: &'a Waypoint, lines: &'a [Line]) -> impl Iterator<Item = Segment<'a>> {
    let starts = std::iter::once(start).chain(lines.iter().map(|line| &line.end_point));
    starts.zip(lines).enumerate().map(|(i, (start, line))| Segment {
        number: i + 1,
        start,
        line,
    })
}

/// Curve intervals sampled per curved segment at the given quality
pub fn samples_per_segment(quality: u32) -> usize {
    MIN_SAMPLES_PER_SEGMENT.max(quality as usize * SAMPLES_QUALITY_MULTIPLIER)
}

/// Sample positions used to collision-check one segment.
///
/// Curved segments are sampled evenly including both ends; straight segments
/// are checked at their two endpoints only.
pub fn segment_samples(start: &Waypoint, line: &Line, quality: u32) -> Vec<FieldPoint> {
    if line.is_straight() {
        return vec![start.position(), line.end_point.position()];
    }
    let points = curve_points(start, &line.control_points, &line.end_point);
    sample_curve(&points, samples_per_segment(quality))
}

/// Heading in degrees used for the footprint at each sample.
///
/// Interior samples face along the local finite-difference tangent whatever
/// the end waypoint's heading mode is; only the final sample uses the
/// waypoint's own mode, fully interpolated.
pub fn sample_headings(samples: &[FieldPoint], start: &FieldPoint, end: &Waypoint) -> Vec<f64> {
    let end_position = end.position();
    let last = samples.len().saturating_sub(1);

    (0..samples.len())
        .map(|j| {
            let prev = if j > 0 { samples[j - 1] } else { *start };
            if j == last {
                heading_at(&end.heading, 1.0, Some((prev, end_position)))
            } else {
                tangent_heading(&prev, &samples[j + 1])
            }
        })
        .collect()
}

/// Check one footprint placement against the field and every obstacle.
fn check_sample(
    segment: usize,
    position: FieldPoint,
    heading: f64,
    settings: &Settings,
    shapes: &[Shape],
) -> Result<(), PathError> {
    let footprint = RobotFootprint::new(
        position,
        settings.footprint_width(),
        settings.footprint_height(),
        heading,
    );

    if !footprint.in_field() {
        return Err(PathError::BoundsViolation {
            segment,
            x: position.x,
            y: position.y,
        });
    }

    if let Some(shape) = shapes.iter().find(|shape| footprint.intersects(&shape.vertices)) {
        debug!(segment, shape = %shape.id, "footprint overlaps obstacle");
        return Err(PathError::CollisionDetected {
            segment,
            x: position.x,
            y: position.y,
        });
    }

    Ok(())
}

fn check_segment(
    segment: Segment<'_>,
    shapes: &[Shape],
    settings: &Settings,
) -> Result<(), PathError> {
    let samples = segment_samples(segment.start, segment.line, settings.optimization_quality);
    let headings = sample_headings(&samples, &segment.start.position(), &segment.line.end_point);
    debug!(segment = segment.number, samples = samples.len(), "checking segment");

    for (sample, heading) in samples.iter().zip(headings) {
        check_sample(segment.number, *sample, heading, settings, shapes)?;
    }
    Ok(())
}

/// Pull each control point toward the midpoint of the segment's endpoints.
///
/// Straight segments stay straight; no control points are introduced.
pub fn smooth_control_points(
    start: &FieldPoint,
    end: &FieldPoint,
    controls: &[ControlPoint],
    quality: u32,
) -> Vec<ControlPoint> {
    let factor = quality as f64 / SMOOTHING_SCALE * SMOOTHING_MULTIPLIER;
    let mid = start.midpoint(end);

    controls
        .iter()
        .map(|cp| {
            cp.moved_to(FieldPoint::new(
                cp.x + (mid.x - cp.x) * factor,
                cp.y + (mid.y - cp.y) * factor,
            ))
        })
        .collect()
}

fn check_inputs(lines: &[Line], shapes: &[Shape], settings: &Settings) -> Result<(), PathError> {
    settings.validate()?;
    if lines.is_empty() {
        return Err(PathError::InvalidInput("No waypoints defined".to_string()));
    }
    if let Some(shape) = shapes.iter().find(|shape| shape.vertices.len() < 3) {
        return Err(PathError::InvalidInput(format!(
            "Obstacle '{}' needs at least 3 vertices, has {}",
            shape.id,
            shape.vertices.len()
        )));
    }
    Ok(())
}

/// Check every segment and return the trajectory with smoothed control points.
///
/// On failure nothing is smoothed and the error names the first failing
/// segment and sample.
pub fn optimize(
    start: &Waypoint,
    lines: &[Line],
    shapes: &[Shape],
    settings: &Settings,
) -> Result<Vec<Line>, PathError> {
    check_inputs(lines, shapes, settings)?;

    let mut optimized = Vec::with_capacity(lines.len());
    for segment in segments(start, lines) {
        if let Err(err) = check_segment(segment, shapes, settings) {
            warn!(%err, "optimization rejected trajectory");
            return Err(err);
        }

        let controls = smooth_control_points(
            &segment.start.position(),
            &segment.line.end_point.position(),
            &segment.line.control_points,
            settings.optimization_quality,
        );
        optimized.push(segment.line.with_control_points(controls));
    }

    info!(segments = optimized.len(), "trajectory optimized");
    Ok(optimized)
}

/// Check every segment without changing the trajectory.
pub fn validate(
    start: &Waypoint,
    lines: &[Line],
    shapes: &[Shape],
    settings: &Settings,
) -> Result<(), PathError> {
    check_inputs(lines, shapes, settings)?;

    for segment in segments(start, lines) {
        if let Err(err) = check_segment(segment, shapes, settings) {
            debug!(%err, "validation failed");
            return Err(err);
        }
    }
    Ok(())
}

/// Optimizer bound to a set of robot settings
#[derive(Debug, Clone, Default)]
pub struct PathOptimizer {
    settings: Settings,
}

impl PathOptimizer {
    pub fn new(settings: Settings) -> Self {
        PathOptimizer { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Override robot settings from named parameters
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), PathError> {
        self.settings.configure(params)
    }

    pub fn optimize(
        &self,
        start: &Waypoint,
        lines: &[Line],
        shapes: &[Shape],
    ) -> Result<Vec<Line>, PathError> {
        optimize(start, lines, shapes, &self.settings)
    }

    pub fn validate(
        &self,
        start: &Waypoint,
        lines: &[Line],
        shapes: &[Shape],
    ) -> Result<(), PathError> {
        validate(start, lines, shapes, &self.settings)
    }
}
