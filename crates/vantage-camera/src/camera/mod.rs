//! Camera system module
//!
//! Third-person follow camera with targeting, first-person look and wall
//! compensation.

mod anchor;
mod config;
mod controller;
mod letterbox;
mod smoothing;
mod state;
mod walls;

pub use anchor::FirstPersonAnchor;
pub use config::CameraConfig;
pub use controller::{CameraController, CameraNodes, CameraWorld, TARGETING_DEADZONE};
pub use letterbox::{smooth_step, BarEffect, LetterboxEffect};
pub use smoothing::SmoothedFollow;
pub use state::{CameraFrameResult, CameraState, DebugLine, StateTransition};
pub use walls::{compensate_for_walls, CollisionQuery, NoCollision, SceneQuery, WallCheck};
