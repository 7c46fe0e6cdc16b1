//! Collision geometry for robot footprints
//!
//! Stateless 2D helpers used to check a rotated rectangular robot footprint
//! against polygonal obstacles and the field boundary. All coordinates are
//! field inches.
//!
//! Boundary convention for [`point_in_polygon`]: the ray-casting test uses a
//! half-open crossing rule, so a point exactly on an edge may be reported
//! either way. For an axis-aligned square, points on the left and bottom
//! edges count as inside and points on the right and top edges as outside.
//! [`point_in_rectangle`] is inclusive on all four sides.

use crate::common::types::FieldPoint;
use nalgebra::{Rotation2, Vector2};

/// Determinant magnitude below which two segments are treated as parallel
pub const PARALLEL_THRESHOLD: f64 = 1e-10;

/// Ray-casting parity test for a closed polygon of any winding.
pub fn point_in_polygon(point: &FieldPoint, polygon: &[FieldPoint]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        let crosses = (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Shortest distance from `point` to the segment `start`..`end`.
pub fn point_to_segment_distance(
    point: &FieldPoint,
    start: &FieldPoint,
    end: &FieldPoint,
) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return point.distance_to(start);
    }

    let param = ((point.x - start.x) * dx + (point.y - start.y) * dy) / len_sq;
    let closest = start.lerp(end, param.clamp(0.0, 1.0));
    point.distance_to(&closest)
}

/// Minimum distance from `point` to any edge of `polygon`.
pub fn min_distance_to_polygon(point: &FieldPoint, polygon: &[FieldPoint]) -> f64 {
    polygon_edges(polygon)
        .map(|(a, b)| point_to_segment_distance(point, &a, &b))
        .fold(f64::INFINITY, f64::min)
}

/// Vertex average of a polygon, `None` when it has no vertices.
pub fn polygon_center(vertices: &[FieldPoint]) -> Option<FieldPoint> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
    Some(FieldPoint::new(sx / n, sy / n))
}

/// Whether segments `p1`-`p2` and `p3`-`p4` intersect.
///
/// Parallel and coincident segments never intersect.
pub fn segments_intersect(
    p1: &FieldPoint,
    p2: &FieldPoint,
    p3: &FieldPoint,
    p4: &FieldPoint,
) -> bool {
    let (ux, uy) = (p2.x - p1.x, p2.y - p1.y);
    let (vx, vy) = (p4.x - p3.x, p4.y - p3.y);
    let (wx, wy) = (p3.x - p1.x, p3.y - p1.y);

    let det = ux * vy - vx * uy;
    if det.abs() < PARALLEL_THRESHOLD {
        return false;
    }

    // p1 + lambda * u == p3 + mu * v
    let lambda = (wx * vy - wy * vx) / det;
    let mu = (wx * uy - wy * ux) / det;

    (0.0..=1.0).contains(&lambda) && (0.0..=1.0).contains(&mu)
}

/// Corners of a `width` x `height` rectangle centered on `center` and rotated
/// by `heading_rad`, in ring order.
pub fn rectangle_corners(
    center: &FieldPoint,
    width: f64,
    height: f64,
    heading_rad: f64,
) -> [FieldPoint; 4] {
    let rotation = Rotation2::new(heading_rad);
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    [(-half_w, -half_h), (half_w, -half_h), (half_w, half_h), (-half_w, half_h)].map(
        |(dx, dy)| {
            let offset = rotation * Vector2::new(dx, dy);
            FieldPoint::new(center.x + offset.x, center.y + offset.y)
        },
    )
}

/// Whether `point` lies within the rotated rectangle, edges included.
pub fn point_in_rectangle(
    point: &FieldPoint,
    center: &FieldPoint,
    width: f64,
    height: f64,
    heading_rad: f64,
) -> bool {
    let local = Rotation2::new(-heading_rad) * Vector2::new(point.x - center.x, point.y - center.y);
    local.x.abs() <= width / 2.0 && local.y.abs() <= height / 2.0
}

/// Whether the rotated rectangle overlaps `polygon`.
///
/// Covers the rectangle inside the polygon, the polygon inside the rectangle,
/// and partial overlap through crossing edges.
pub fn rectangle_intersects_polygon(
    center: &FieldPoint,
    width: f64,
    height: f64,
    heading_rad: f64,
    polygon: &[FieldPoint],
) -> bool {
    let corners = rectangle_corners(center, width, height, heading_rad);

    if corners.iter().any(|c| point_in_polygon(c, polygon)) {
        return true;
    }

    if polygon
        .iter()
        .any(|v| point_in_rectangle(v, center, width, height, heading_rad))
    {
        return true;
    }

    let edges_cross = polygon_edges(&corners).any(|(r1, r2)| {
        polygon_edges(polygon).any(|(p1, p2)| segments_intersect(&r1, &r2, &p1, &p2))
    });
    edges_cross
}

/// Whether every corner lies inside the field, edges included
pub fn corners_in_field(corners: &[FieldPoint]) -> bool {
    corners.iter().all(FieldPoint::in_field)
}

/// Edges of a closed ring, including the closing edge back to the first vertex
fn polygon_edges(ring: &[FieldPoint]) -> impl Iterator<Item = (FieldPoint, FieldPoint)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// A robot footprint placed on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotFootprint {
    pub center: FieldPoint,
    pub width: f64,
    pub height: f64,
    /// Heading in degrees
    pub heading: f64,
}

impl RobotFootprint {
    pub fn new(center: FieldPoint, width: f64, height: f64, heading: f64) -> Self {
        RobotFootprint {
            center,
            width,
            height,
            heading,
        }
    }

    pub fn corners(&self) -> [FieldPoint; 4] {
        rectangle_corners(&self.center, self.width, self.height, self.heading.to_radians())
    }

    pub fn contains(&self, point: &FieldPoint) -> bool {
        point_in_rectangle(point, &self.center, self.width, self.height, self.heading.to_radians())
    }

    /// Whether the whole footprint is inside the field
    pub fn in_field(&self) -> bool {
        corners_in_field(&self.corners())
    }

    pub fn intersects(&self, polygon: &[FieldPoint]) -> bool {
        rectangle_intersects_polygon(
            &self.center,
            self.width,
            self.height,
            self.heading.to_radians(),
            polygon,
        )
    }
}
