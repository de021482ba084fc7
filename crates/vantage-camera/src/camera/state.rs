//! Camera modes

use std::fmt;

use glam::{Quat, Vec3};
use vantage_core::{Color, Transform};

/// Camera mode; exactly one is active each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraState {
    /// Trails the player, keeping the camera's own heading
    #[default]
    Behind,
    /// Locked behind the player's facing while targeting is held
    Target,
    /// At the player's eyes; the camera steers the player
    FirstPerson,
    /// Holds its pose until a regular transition fires
    Free,
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CameraState::Behind => "behind",
            CameraState::Target => "target",
            CameraState::FirstPerson => "first-person",
            CameraState::Free => "free",
        };
        f.write_str(name)
    }
}

/// A change of mode within one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: CameraState,
    pub to: CameraState,
}

/// A line segment to visualize camera placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

/// Everything one camera frame produced
#[derive(Debug, Clone)]
pub struct CameraFrameResult {
    /// False when the update was skipped (inventory open)
    pub updated: bool,
    /// Mode after this frame's transitions
    pub state: CameraState,
    /// Set when the mode changed this frame
    pub transition: Option<StateTransition>,
    /// Desired position after wall compensation
    pub desired_position: Vec3,
    /// Point the camera aims at
    pub look_at: Vec3,
    /// Camera pose written back to the hierarchy
    pub camera: Transform,
    /// Wall hit point, if compensation kicked in
    pub wall_hit: Option<Vec3>,
    /// Letterbox coverage after easing, if a letterbox is attached
    pub coverage: Option<f32>,
    /// Diagnostic lines (empty unless debug drawing is enabled)
    pub debug_lines: Vec<DebugLine>,
}

impl CameraFrameResult {
    pub fn position(&self) -> Vec3 {
        self.camera.position
    }

    pub fn rotation(&self) -> Quat {
        self.camera.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_behind() {
        assert_eq!(CameraState::default(), CameraState::Behind);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CameraState::FirstPerson.to_string(), "first-person");
        assert_eq!(CameraState::Target.to_string(), "target");
    }
}
