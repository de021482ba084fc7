//! Vantage Camera - third-person camera controller
//!
//! Provides the camera state machine, its input snapshot, and the player
//! flags it toggles.

pub mod camera;
pub mod error;
pub mod input;
pub mod player;

pub use camera::{
    CameraConfig, CameraController, CameraFrameResult, CameraNodes, CameraState, CameraWorld,
    CollisionQuery, SceneQuery,
};
pub use error::CameraError;
pub use input::{CameraButton, CameraInput};
pub use player::{PlayerFlags, PlayerHandle};
