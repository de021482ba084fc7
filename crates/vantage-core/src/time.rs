//! Frame time for the Vantage camera
//!
//! Clamps raw frame deltas, applies time scale, and accumulates time for
//! fixed-step simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected time configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("time_scale must be finite and non-negative, got {0}")]
    InvalidTimeScale(f32),
}

/// Configuration for frame time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for player movement and physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

impl TimeConfig {
    /// Reject values that would stall or corrupt the frame loop
    pub fn validate(&self) -> Result<(), TimeConfigError> {
        for (field, value) in [
            ("fixed_timestep", self.fixed_timestep),
            ("max_delta_time", self.max_delta_time),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TimeConfigError::NotPositive { field, value });
            }
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(TimeConfigError::InvalidTimeScale(self.time_scale));
        }
        Ok(())
    }
}

/// Frame time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            unscaled_delta_time: 0.0,
            frame_count: 0,
            fixed_accumulator: 0.0,
        }
    }

    /// Update with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.frame_count += 1;

        self.delta_time = self.unscaled_delta_time * self.config.time_scale.max(0.0);
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame.
    ///
    /// A non-positive timestep yields no steps and drops the accumulated time.
    pub fn fixed_steps(&mut self) -> u32 {
        let step = self.config.fixed_timestep;
        if !(step > 0.0) {
            self.fixed_accumulator = 0.0;
            return 0;
        }

        let mut steps = 0;
        while self.fixed_accumulator >= step {
            self.fixed_accumulator -= step;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_time() {
        let mut time = GameTime::default();
        time.update(0.016);

        assert!(time.delta_time > 0.0);
        assert_eq!(time.frame_count, 1);

        time.update(0.016);
        assert_eq!(time.frame_count, 2);
        assert!((time.total_time - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut time = GameTime::default();
        time.update(5.0);
        assert_eq!(time.delta_time, time.config.max_delta_time);

        time.update(-1.0);
        assert_eq!(time.delta_time, 0.0);
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.01,
            ..Default::default()
        });
        time.update(0.035);
        assert_eq!(time.fixed_steps(), 3);
        time.update(0.006);
        assert_eq!(time.fixed_steps(), 1);
    }

    #[test]
    fn test_zero_timestep_yields_no_steps() {
        let mut time = GameTime::new(TimeConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        });
        time.update(0.1);
        assert_eq!(time.fixed_steps(), 0);
    }

    #[test]
    fn test_time_scale_applies() {
        let mut time = GameTime::new(TimeConfig {
            time_scale: 0.5,
            ..Default::default()
        });
        time.update(0.1);
        assert!((time.delta_time - 0.05).abs() < 1e-6);
        assert!((time.unscaled_delta_time - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_non_positive_steps() {
        assert!(TimeConfig::default().validate().is_ok());

        let zero_step = TimeConfig {
            fixed_timestep: 0.0,
            ..Default::default()
        };
        assert_eq!(
            zero_step.validate(),
            Err(TimeConfigError::NotPositive {
                field: "fixed_timestep",
                value: 0.0
            })
        );

        let nan_max = TimeConfig {
            max_delta_time: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_max.validate(),
            Err(TimeConfigError::NotPositive { field: "max_delta_time", .. })
        ));

        let negative_scale = TimeConfig {
            time_scale: -1.0,
            ..Default::default()
        };
        assert_eq!(
            negative_scale.validate(),
            Err(TimeConfigError::InvalidTimeScale(-1.0))
        );
    }
}
