//! Error types for trajectory validation and optimization

use thiserror::Error;

/// Errors surfaced by the optimizer, validator and playback sampler.
///
/// Degenerate geometry (zero-length tangents, parallel edges) never shows up
/// here; those cases fall back to a zero heading or "no intersection".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// The trajectory or its obstacles cannot be processed at all
    #[error("Invalid path: {0}")]
    InvalidInput(String),

    /// The robot footprint overlaps an obstacle at a sampled point
    #[error(
        "Path collision detected at segment {segment}, point ({x:.1}, {y:.1}). \
         The robot would hit an obstacle."
    )]
    CollisionDetected { segment: usize, x: f64, y: f64 },

    /// A footprint corner leaves the field at a sampled point
    #[error(
        "Path collision detected at segment {segment}, point ({x:.1}, {y:.1}). \
         The robot would leave the field bounds."
    )]
    BoundsViolation { segment: usize, x: f64, y: f64 },

    /// A configuration override was rejected
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// The trajectory document could not be read or written
    #[error("Trajectory document error: {0}")]
    Document(String),
}

impl PathError {
    /// 1-based index of the failing segment, for collision-type failures.
    pub fn segment(&self) -> Option<usize> {
        match self {
            PathError::CollisionDetected { segment, .. }
            | PathError::BoundsViolation { segment, .. } => Some(*segment),
            _ => None,
        }
    }

    /// Field position of the failing sample, for collision-type failures.
    pub fn location(&self) -> Option<(f64, f64)> {
        match self {
            PathError::CollisionDetected { x, y, .. } | PathError::BoundsViolation { x, y, .. } => {
                Some((*x, *y))
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PathError {
    fn from(err: serde_json::Error) -> Self {
        PathError::Document(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_message_names_segment_and_rounded_point() {
        let err = PathError::CollisionDetected {
            segment: 1,
            x: 70.04,
            y: 9.96,
        };
        let msg = err.to_string();
        assert!(msg.contains("segment 1"));
        assert!(msg.contains("(70.0, 10.0)"));
        assert!(msg.contains("obstacle"));
    }

    #[test]
    fn bounds_message_mentions_field() {
        let err = PathError::BoundsViolation {
            segment: 3,
            x: 143.0,
            y: 2.0,
        };
        assert!(err.to_string().contains("field bounds"));
        assert_eq!(err.segment(), Some(3));
        assert_eq!(err.location(), Some((143.0, 2.0)));
    }

    #[test]
    fn invalid_input_has_no_locus() {
        let err = PathError::InvalidInput("No waypoints defined".to_string());
        assert_eq!(err.segment(), None);
        assert_eq!(err.location(), None);
        assert_eq!(err.to_string(), "Invalid path: No waypoints defined");
    }
}
