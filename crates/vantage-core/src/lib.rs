//! Vantage Core - Core types and utilities for the Vantage camera
//!
//! This crate provides the foundational types shared by the camera crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform value type and debug colors
//! - Frame time tracking with clamped deltas and fixed steps
//! - A transform hierarchy of named, parented nodes

pub mod hierarchy;
pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hierarchy::{HierarchyError, NodeId, TransformHierarchy};
pub use time::{GameTime, TimeConfig, TimeConfigError};
pub use types::{Color, Transform};
