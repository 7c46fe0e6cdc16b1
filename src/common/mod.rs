//! Common utilities and types for field trajectories

/// Common types and utilities used across the codebase
pub mod types {
    use serde::{Deserialize, Serialize};

    /// Side length of the square field, in inches
    pub const FIELD_SIZE: f64 = 144.0;

    /// A position on the field, in inches
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct FieldPoint {
        pub x: f64,
        pub y: f64,
    }

    impl FieldPoint {
        pub fn new(x: f64, y: f64) -> Self {
            FieldPoint { x, y }
        }

        /// Interpolate toward `other`; exact at both `t = 0` and `t = 1`.
        pub fn lerp(&self, other: &FieldPoint, t: f64) -> FieldPoint {
            FieldPoint {
                x: self.x * (1.0 - t) + other.x * t,
                y: self.y * (1.0 - t) + other.y * t,
            }
        }

        pub fn distance_to(&self, other: &FieldPoint) -> f64 {
            let dx = other.x - self.x;
            let dy = other.y - self.y;
            (dx * dx + dy * dy).sqrt()
        }

        pub fn midpoint(&self, other: &FieldPoint) -> FieldPoint {
            FieldPoint {
                x: (self.x + other.x) / 2.0,
                y: (self.y + other.y) / 2.0,
            }
        }

        /// Whether the point lies inside the field (edges included)
        pub fn in_field(&self) -> bool {
            (0.0..=FIELD_SIZE).contains(&self.x) && (0.0..=FIELD_SIZE).contains(&self.y)
        }
    }

    impl From<(f64, f64)> for FieldPoint {
        fn from((x, y): (f64, f64)) -> Self {
            FieldPoint { x, y }
        }
    }

    /// A robot pose: position in inches and heading in degrees
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct Pose {
        pub x: f64,
        pub y: f64,
        pub heading: f64,
    }
}

/// Angle helpers
pub mod angles {
    /// Wrap a signed angular difference into (-180, 180] degrees.
    pub fn wrap_degrees(diff: f64) -> f64 {
        let wrapped = diff.rem_euclid(360.0);
        if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Direction from one point to another, in degrees
    pub fn direction_degrees(dx: f64, dy: f64) -> f64 {
        dy.atan2(dx).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::angles::*;
    use super::types::*;

    #[test]
    fn lerp_is_exact_at_ends() {
        let a = FieldPoint::new(0.1, 0.7);
        let b = FieldPoint::new(0.3, 123.456);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn wrap_keeps_half_open_range() {
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(-340.0), 20.0);
        assert_eq!(wrap_degrees(540.0), 180.0);
        assert_eq!(wrap_degrees(-720.0), 0.0);
    }

    #[test]
    fn wrap_handles_huge_angles() {
        for diff in [1e18, -1e18, 1e20 - 10.0, f64::MAX] {
            let wrapped = wrap_degrees(diff);
            assert!(wrapped > -180.0 && wrapped <= 180.0, "{} -> {}", diff, wrapped);
        }
        assert!(wrap_degrees(f64::INFINITY).is_nan());
    }

    #[test]
    fn field_containment_includes_edges() {
        assert!(FieldPoint::new(0.0, 144.0).in_field());
        assert!(!FieldPoint::new(-0.01, 10.0).in_field());
        assert!(!FieldPoint::new(10.0, 144.5).in_field());
    }
}
