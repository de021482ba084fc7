//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal distance kept behind the follow point
    pub distance_away: f32,
    /// Height above the follow point (applied to both the orbit center and the camera)
    pub distance_up: f32,
    /// Smooth-damp time constant in seconds
    pub smooth_time: f32,
    /// Optional speed cap for smooth-damp, in units per second
    pub max_speed: Option<f32>,
    /// Letterbox coverage while targeting
    pub wide_screen: f32,
    /// Per-frame smoothstep factor for letterbox coverage (0-1)
    pub targeting_blend: f32,
    /// Vertical look input above which the camera drops into first person
    pub first_person_threshold: f32,
    /// First-person pitch change per frame at full input, in degrees
    pub first_person_look_speed: f32,
    /// Player yaw rate in first person at full input
    pub fps_rotation_degrees_per_second: f32,
    /// Minimum first-person pitch in degrees (negative looks up)
    pub pitch_min: f32,
    /// Maximum first-person pitch in degrees (positive looks down)
    pub pitch_max: f32,
    /// Eye position relative to the player
    pub anchor_offset: Vec3,
    /// Name given to the eye node
    pub anchor_name: String,
    /// Whether the final look-at also applies in first person
    pub first_person_look_at: bool,
    /// Emit debug lines with every frame result
    pub debug_draw: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance_away: 4.0,
            distance_up: 1.5,
            smooth_time: 0.1,
            max_speed: None,
            wide_screen: 0.2,
            targeting_blend: 0.5,
            first_person_threshold: 0.5,
            first_person_look_speed: 1.5,
            fps_rotation_degrees_per_second: 120.0,
            pitch_min: -70.0,
            pitch_max: 65.0,
            anchor_offset: Vec3::new(0.0, 1.4, 0.2),
            anchor_name: "First Person Camera".to_string(),
            first_person_look_at: true,
            debug_draw: false,
        }
    }
}

impl CameraConfig {
    /// Reject values the controller cannot run with
    pub fn validate(&self) -> Result<(), CameraError> {
        let finite = [
            ("distance_away", self.distance_away),
            ("distance_up", self.distance_up),
            ("smooth_time", self.smooth_time),
            ("wide_screen", self.wide_screen),
            ("targeting_blend", self.targeting_blend),
            ("first_person_threshold", self.first_person_threshold),
            ("first_person_look_speed", self.first_person_look_speed),
            ("fps_rotation_degrees_per_second", self.fps_rotation_degrees_per_second),
            ("pitch_min", self.pitch_min),
            ("pitch_max", self.pitch_max),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CameraError::InvalidConfig(format!("{name} must be finite")));
        }
        if !self.anchor_offset.is_finite() {
            return Err(CameraError::InvalidConfig("anchor_offset must be finite".into()));
        }
        if self.smooth_time <= 0.0 {
            return Err(CameraError::InvalidConfig(format!(
                "smooth_time must be positive, got {}",
                self.smooth_time
            )));
        }
        if self.distance_away < 0.0 {
            return Err(CameraError::InvalidConfig(format!(
                "distance_away must not be negative, got {}",
                self.distance_away
            )));
        }
        if self.pitch_min > self.pitch_max {
            return Err(CameraError::InvalidConfig(format!(
                "pitch range is inverted: [{}, {}]",
                self.pitch_min, self.pitch_max
            )));
        }
        if let Some(max_speed) = self.max_speed {
            if !(max_speed > 0.0) {
                return Err(CameraError::InvalidConfig(format!(
                    "max_speed must be positive, got {max_speed}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CameraConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.pitch_min < 0.0 && config.pitch_max > 0.0);
    }

    #[test]
    fn test_inverted_pitch_rejected() {
        let config = CameraConfig {
            pitch_min: 10.0,
            pitch_max: -10.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CameraError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_positive_smooth_time_rejected() {
        let config = CameraConfig {
            smooth_time: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let config = CameraConfig {
            distance_up: f32::NAN,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("distance_up"));

        let config = CameraConfig {
            max_speed: Some(f32::NAN),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
