//! Critically-damped position smoothing (smooth-damp)
//!
//! Approximates a critically damped spring with a cubic fit of `exp(-x)`, so
//! it is stable for any frame time. Velocity carries over between frames,
//! which is what lets the camera ease out of a move instead of stopping dead.

use glam::Vec3;

/// Smallest time constant accepted; smaller values are raised to this
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Smooth-damp follower owning its velocity state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothedFollow {
    velocity: Vec3,
}

impl SmoothedFollow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current velocity in units per second
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Advance `current` toward `goal` by one frame of `dt` seconds.
    ///
    /// Never steps past `goal`; when the step would overshoot, the result
    /// snaps to `goal` and the velocity is cleared. A non-positive `dt`
    /// returns `current` and leaves the velocity as it was.
    pub fn step(
        &mut self,
        current: Vec3,
        goal: Vec3,
        smooth_time: f32,
        max_speed: Option<f32>,
        dt: f32,
    ) -> Vec3 {
        if !(dt > 0.0) {
            return current;
        }

        let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
        let omega = 2.0 / smooth_time;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let mut change = current - goal;
        if let Some(max_speed) = max_speed {
            change = change.clamp_length_max(max_speed * smooth_time);
        }
        let clamped_goal = current - change;

        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let output = clamped_goal + (change + temp) * decay;

        if (goal - current).dot(output - goal) > 0.0 {
            self.velocity = Vec3::ZERO;
            return goal;
        }
        output
    }
}
