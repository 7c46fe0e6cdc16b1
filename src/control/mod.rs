//! Playback of a trajectory over time
pub mod playback;

pub use self::playback::{
    advance, ease_in_out, sample_robot_state, PlaybackController, PlaybackState, RobotState,
};
