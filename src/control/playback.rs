//! Trajectory playback
//!
//! Maps a global progress percentage to a robot pose along the trajectory.
//! Each segment gets an equal share of the timeline and progress within a
//! segment is eased (quadratic ease-in/ease-out), so the robot slows into and
//! out of every waypoint.
//!
//! Timing is owned by the caller: a render loop or timer calls
//! [`advance`] (or [`PlaybackController::tick`]) with the elapsed time since
//! the previous frame, then samples the pose for the new percentage.

use crate::common::types::{FieldPoint, Pose};
use crate::error::PathError;
use crate::navigation::curve::{curve_points, evaluate_curve, tangent_samples};
use crate::navigation::heading::heading_at;
use crate::trajectory::{segment_start, Line, Waypoint};
use std::time::Duration;

/// Robot pose produced for one playback frame
pub type RobotState = Pose;

/// Largest percentage used for segment lookup, keeps 100% on the last segment
pub const PERCENT_CEILING: f64 = 100.0 - 1e-9;

/// Percent advanced per 10ms of playback on a single-segment trajectory
pub const PLAYBACK_RATE: f64 = 0.65;

/// Quadratic ease-in/ease-out over `[0, 1]`
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Segment index and eased progress within it for a global percentage.
///
/// `segment_count` must be non-zero.
pub fn locate(percent: f64, segment_count: usize) -> (usize, f64) {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, PERCENT_CEILING)
    };
    let total = segment_count as f64 * percent / 100.0;
    let index = (total.floor() as usize).min(segment_count.saturating_sub(1));
    (index, ease_in_out(total - total.floor()))
}

/// Robot pose at `percent` of the way through the trajectory.
pub fn sample_robot_state(
    percent: f64,
    lines: &[Line],
    start: &Waypoint,
) -> Result<RobotState, PathError> {
    if lines.is_empty() {
        return Err(PathError::InvalidInput("No waypoints defined".to_string()));
    }

    let (index, local_t) = locate(percent, lines.len());
    let line = &lines[index];
    let points = curve_points(
        segment_start(start, lines, index),
        &line.control_points,
        &line.end_point,
    );

    let position: FieldPoint = evaluate_curve(local_t, &points);
    let heading = heading_at(
        &line.end_point.heading,
        local_t,
        Some(tangent_samples(&points, local_t)),
    );

    Ok(RobotState {
        x: position.x,
        y: position.y,
        heading,
    })
}

/// Playback progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub playing: bool,
    /// Global progress, 0 to 100
    pub percent: f64,
}

/// Step playback forward by `elapsed`.
///
/// Paused state is returned unchanged. A frame that finds the percentage at
/// or past 100 wraps it to 0, so playback loops indefinitely.
pub fn advance(state: PlaybackState, elapsed: Duration, segment_count: usize) -> PlaybackState {
    if !state.playing {
        return state;
    }
    if state.percent >= 100.0 {
        return PlaybackState {
            percent: 0.0,
            ..state
        };
    }

    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let step = PLAYBACK_RATE / segment_count.max(1) as f64 * (elapsed_ms * 0.1);
    PlaybackState {
        percent: state.percent + step,
        ..state
    }
}

/// Owns playback state for a trajectory of a given length
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    segment_count: usize,
}

impl PlaybackController {
    pub fn new(segment_count: usize) -> Self {
        PlaybackController {
            state: PlaybackState::default(),
            segment_count,
        }
    }

    pub fn play(&mut self) {
        self.state.playing = true;
    }

    /// Stop advancing; progress is kept
    pub fn pause(&mut self) {
        self.state.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    pub fn percent(&self) -> f64 {
        self.state.percent
    }

    pub fn set_percent(&mut self, percent: f64) {
        self.state.percent = percent;
    }

    /// Trajectory was edited and now has a different number of segments
    pub fn set_segment_count(&mut self, segment_count: usize) {
        self.segment_count = segment_count;
    }

    /// Advance by one frame and return the new percentage
    pub fn tick(&mut self, elapsed: Duration) -> f64 {
        self.state = advance(self.state, elapsed, self.segment_count);
        self.state.percent
    }

    /// Robot pose at the current percentage
    pub fn sample(&self, lines: &[Line], start: &Waypoint) -> Result<RobotState, PathError> {
        sample_robot_state(self.state.percent, lines, start)
    }
}
