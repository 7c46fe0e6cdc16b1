//! Trajectory data model
//!
//! Value types for a trajectory as the editing layer hands it over: a start
//! waypoint, an ordered list of segments ("lines"), polygonal obstacles
//! ("shapes") and robot settings. Everything here round-trips through the JSON
//! trajectory document (`startPoint`, `lines`, `shapes`, `settings`).
//!
//! The engine reads positions, control points, heading modes and the collision
//! settings. Colors, names, lock flags and event markers are carried through
//! untouched.

pub mod defaults;

use crate::common::types::FieldPoint;
use crate::error::PathError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the robot's facing angle varies across a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "heading", rename_all = "lowercase")]
pub enum HeadingMode {
    /// Rotate along the shortest arc from `start_deg` to `end_deg`
    Linear {
        #[serde(rename = "startDeg")]
        start_deg: f64,
        #[serde(rename = "endDeg")]
        end_deg: f64,
    },
    /// Hold a single angle for the whole segment
    Constant { degrees: f64 },
    /// Face the direction of travel, flipped 180° when `reverse` is set
    Tangential {
        #[serde(default)]
        reverse: bool,
    },
}

/// An endpoint of a segment carrying a heading specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
    #[serde(flatten)]
    pub heading: HeadingMode,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, heading: HeadingMode) -> Self {
        Waypoint {
            x,
            y,
            locked: false,
            heading,
        }
    }

    pub fn position(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }
}

/// An interior point shaping a curved segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locked: bool,
}

impl ControlPoint {
    pub fn new(x: f64, y: f64) -> Self {
        ControlPoint {
            x,
            y,
            locked: false,
        }
    }

    pub fn position(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }

    /// Same control point moved to `position`
    pub fn moved_to(&self, position: FieldPoint) -> Self {
        ControlPoint {
            x: position.x,
            y: position.y,
            locked: self.locked,
        }
    }
}

/// A named marker along a segment. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMarker {
    pub id: String,
    pub name: String,
    /// Fraction along the segment, 0 to 1
    pub position: f64,
    #[serde(default)]
    pub line_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

/// One segment of a trajectory. Its start is the previous segment's end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub end_point: Waypoint,
    #[serde(default)]
    pub control_points: Vec<ControlPoint>,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub event_markers: Vec<EventMarker>,
    #[serde(default)]
    pub locked: bool,
}

impl Line {
    /// A segment with no editor metadata
    pub fn new(end_point: Waypoint, control_points: Vec<ControlPoint>) -> Self {
        Line {
            end_point,
            control_points,
            color: String::new(),
            name: None,
            event_markers: Vec::new(),
            locked: false,
        }
    }

    /// Straight segments have no control points
    pub fn is_straight(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Copy of this segment with its control points replaced
    pub fn with_control_points(&self, control_points: Vec<ControlPoint>) -> Self {
        Line {
            control_points,
            ..self.clone()
        }
    }
}

/// The start waypoint of segment `index`
pub fn segment_start<'a>(start: &'a Waypoint, lines: &'a [Line], index: usize) -> &'a Waypoint {
    if index == 0 {
        start
    } else {
        &lines[index - 1].end_point
    }
}

/// A polygonal obstacle; the last vertex connects back to the first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vertices: Vec<FieldPoint>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub fill_color: String,
}

impl Shape {
    pub fn new(id: &str, vertices: Vec<FieldPoint>) -> Self {
        Shape {
            id: id.to_string(),
            name: None,
            vertices,
            color: String::new(),
            fill_color: String::new(),
        }
    }
}

/// Lowest accepted optimization quality
pub const MIN_QUALITY: u32 = 1;
/// Highest accepted optimization quality
pub const MAX_QUALITY: u32 = 10;

/// Robot and optimizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub x_velocity: f64,
    pub y_velocity: f64,
    pub a_velocity: f64,
    pub k_friction: f64,
    /// Full robot width, inches
    pub r_width: f64,
    /// Full robot height, inches
    pub r_height: f64,
    /// Clearance added on every side of the robot
    pub safety_margin: f64,
    /// Sampling density and smoothing strength, nominally 1 to 10
    pub optimization_quality: u32,
}

impl Settings {
    /// Footprint width including the safety margin on both sides
    pub fn footprint_width(&self) -> f64 {
        self.r_width + self.safety_margin * 2.0
    }

    /// Footprint height including the safety margin on both sides
    pub fn footprint_height(&self) -> f64 {
        self.r_height + self.safety_margin * 2.0
    }

    /// Check the collision settings are usable.
    ///
    /// Dimensions and margin must be finite and non-negative; quality must be
    /// 1 to 10.
    pub fn validate(&self) -> Result<(), PathError> {
        let lengths = [
            ("Robot width", self.r_width),
            ("Robot height", self.r_height),
            ("Safety margin", self.safety_margin),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(PathError::InvalidSettings(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.optimization_quality) {
            return Err(PathError::InvalidSettings(format!(
                "Optimization quality must be an integer from {} to {}, got {}",
                MIN_QUALITY, MAX_QUALITY, self.optimization_quality
            )));
        }
        Ok(())
    }

    /// Override settings from named parameters.
    ///
    /// Either every override is applied or, on error, none is.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), PathError> {
        let mut updated = self.clone();

        if let Some(&width) = params.get("robot_width") {
            updated.r_width = width;
        }
        if let Some(&height) = params.get("robot_height") {
            updated.r_height = height;
        }
        if let Some(&margin) = params.get("safety_margin") {
            updated.safety_margin = margin;
        }
        if let Some(&quality) = params.get("optimization_quality") {
            let in_range = (MIN_QUALITY as f64..=MAX_QUALITY as f64).contains(&quality);
            if !in_range || quality.fract() != 0.0 {
                return Err(PathError::InvalidSettings(format!(
                    "Optimization quality must be an integer from {} to {}, got {}",
                    MIN_QUALITY, MAX_QUALITY, quality
                )));
            }
            updated.optimization_quality = quality as u32;
        }

        if let Some(&x_velocity) = params.get("x_velocity") {
            updated.x_velocity = x_velocity;
        }
        if let Some(&y_velocity) = params.get("y_velocity") {
            updated.y_velocity = y_velocity;
        }
        if let Some(&a_velocity) = params.get("a_velocity") {
            updated.a_velocity = a_velocity;
        }
        if let Some(&k_friction) = params.get("k_friction") {
            updated.k_friction = k_friction;
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        defaults::default_settings()
    }
}

/// A complete trajectory as stored by the editing layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryDocument {
    pub start_point: Waypoint,
    pub lines: Vec<Line>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub settings: Settings,
}

impl TrajectoryDocument {
    /// Parse a trajectory document from JSON
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PathError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the trajectory for collisions without changing it
    pub fn validate(&self) -> Result<(), PathError> {
        crate::navigation::optimizer::validate(
            &self.start_point,
            &self.lines,
            &self.shapes,
            &self.settings,
        )
    }

    /// A copy of this document with smoothed control points
    pub fn optimize(&self) -> Result<TrajectoryDocument, PathError> {
        let lines = crate::navigation::optimizer::optimize(
            &self.start_point,
            &self.lines,
            &self.shapes,
            &self.settings,
        )?;
        Ok(TrajectoryDocument {
            lines,
            ..self.clone()
        })
    }
}
