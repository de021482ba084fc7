//! Per-frame camera input
//!
//! Logical axes and buttons the camera reads each frame. The frame loop
//! fills this from whatever device layer it has, then calls
//! [`CameraInput::clear_frame`] once the camera has run.

use std::collections::HashSet;

use glam::Vec2;

/// Buttons the camera reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraButton {
    /// Secondary pointer button: press enters first person, release leaves it
    Look,
    /// Leave first person while held
    ExitFirstPerson,
}

/// Current state of all camera inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    /// Right stick (`RightStickX`, `RightStickY`), each in [-1, 1]
    pub right_stick: Vec2,
    /// Movement axes (`Horizontal`, `Vertical`), each in [-1, 1]
    pub move_axis: Vec2,
    /// Targeting trigger; above 0.01 means targeting is held
    pub target: f32,
    /// Buttons currently held down
    pub held: HashSet<CameraButton>,
    /// Buttons that were just pressed this frame
    pub just_pressed: HashSet<CameraButton>,
    /// Buttons that were just released this frame
    pub just_released: HashSet<CameraButton>,
}

impl CameraInput {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a button is currently held
    pub fn is_held(&self, button: CameraButton) -> bool {
        self.held.contains(&button)
    }

    /// Check if a button was just pressed this frame
    pub fn is_just_pressed(&self, button: CameraButton) -> bool {
        self.just_pressed.contains(&button)
    }

    /// Check if a button was just released this frame
    pub fn is_just_released(&self, button: CameraButton) -> bool {
        self.just_released.contains(&button)
    }

    /// Record a press; only the first press of a hold counts as "just pressed"
    pub fn press(&mut self, button: CameraButton) {
        if !self.held.contains(&button) {
            self.just_pressed.insert(button);
        }
        self.held.insert(button);
    }

    /// Record a release of a held button
    pub fn release(&mut self, button: CameraButton) {
        if self.held.remove(&button) {
            self.just_released.insert(button);
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
