pub mod common;
pub mod control;
pub mod error;
pub mod navigation;
pub mod trajectory;

pub use crate::common::types::{FieldPoint, Pose, FIELD_SIZE};
pub use crate::control::{sample_robot_state, PlaybackController, RobotState};
pub use crate::error::PathError;
pub use crate::navigation::{evaluate_curve, optimize, validate, PathOptimizer};
pub use crate::trajectory::{
    ControlPoint, EventMarker, HeadingMode, Line, Settings, Shape, TrajectoryDocument, Waypoint,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
