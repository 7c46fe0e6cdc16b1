//! Path geometry and collision-aware optimization
pub mod collision;
pub mod curve;
pub mod heading;
pub mod optimizer;

pub use self::collision::{
    point_in_polygon, point_in_rectangle, rectangle_corners, rectangle_intersects_polygon,
    segments_intersect, RobotFootprint,
};
pub use self::curve::{curve_points, evaluate_curve, sample_curve};
pub use self::heading::heading_at;
pub use self::optimizer::{optimize, validate, PathOptimizer};
