//! Field defaults for a fresh trajectory

use super::{HeadingMode, Line, Settings, Shape, Waypoint};
use crate::common::types::FieldPoint;

pub const DEFAULT_ROBOT_WIDTH: f64 = 16.0;
pub const DEFAULT_ROBOT_HEIGHT: f64 = 16.0;
pub const DEFAULT_LINE_COLOR: &str = "#3b82f6";

pub fn default_settings() -> Settings {
    Settings {
        x_velocity: 30.0,
        y_velocity: 30.0,
        a_velocity: std::f64::consts::PI,
        k_friction: 0.4,
        r_width: DEFAULT_ROBOT_WIDTH,
        r_height: DEFAULT_ROBOT_HEIGHT,
        safety_margin: 1.0,
        optimization_quality: 3,
    }
}

pub fn default_start_point() -> Waypoint {
    Waypoint::new(
        56.0,
        8.0,
        HeadingMode::Linear {
            start_deg: 90.0,
            end_deg: 180.0,
        },
    )
}

pub fn default_lines() -> Vec<Line> {
    let end_point = Waypoint::new(
        56.0,
        36.0,
        HeadingMode::Linear {
            start_deg: 90.0,
            end_deg: 180.0,
        },
    );
    vec![Line {
        name: Some("Path 1".to_string()),
        color: DEFAULT_LINE_COLOR.to_string(),
        ..Line::new(end_point, Vec::new())
    }]
}

/// The two goal structures along the left and right field walls
pub fn default_shapes() -> Vec<Shape> {
    let red = [
        (144.0, 70.0),
        (144.0, 144.0),
        (118.0, 144.0),
        (138.0, 118.0),
        (138.0, 70.0),
    ];
    let blue = [
        (7.0, 118.0),
        (26.0, 144.0),
        (0.0, 144.0),
        (0.0, 70.0),
        (7.0, 70.0),
    ];

    vec![
        Shape {
            name: Some("Red Goal".to_string()),
            color: "#dc2626".to_string(),
            fill_color: "#fca5a5".to_string(),
            ..Shape::new("triangle-1", red.iter().copied().map(FieldPoint::from).collect())
        },
        Shape {
            name: Some("Blue Goal".to_string()),
            color: "#0b08d9".to_string(),
            fill_color: "#fca5a5".to_string(),
            ..Shape::new("triangle-2", blue.iter().copied().map(FieldPoint::from).collect())
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::navigation::optimizer::validate;

    #[test]
    fn default_start_sits_too_close_to_the_wall() {
        // 16in robot plus 1in margin each side reaches below y = 0 from y = 8
        let result = validate(
            &default_start_point(),
            &default_lines(),
            &default_shapes(),
            &default_settings(),
        );
        assert!(matches!(
            result,
            Err(PathError::BoundsViolation { segment: 1, .. })
        ));
    }

    #[test]
    fn default_trajectory_passes_with_a_smaller_robot() {
        let settings = Settings {
            r_width: 12.0,
            r_height: 12.0,
            ..default_settings()
        };
        let result = validate(
            &default_start_point(),
            &default_lines(),
            &default_shapes(),
            &settings,
        );
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn default_shapes_are_closed_polygons() {
        for shape in default_shapes() {
            assert!(shape.vertices.len() >= 3);
        }
    }
}
