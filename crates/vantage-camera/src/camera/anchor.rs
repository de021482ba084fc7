//! First-person eye anchor

use glam::{Quat, Vec3};
use vantage_core::{NodeId, Transform, TransformHierarchy};

use crate::error::CameraError;

/// Eye position parented to the player at a fixed local offset.
///
/// Only the node's local rotation (pitch) is ever written after spawn.
#[derive(Debug, Clone)]
pub struct FirstPersonAnchor {
    name: String,
    offset: Vec3,
    node: NodeId,
    prior_pose: Option<Transform>,
}

impl FirstPersonAnchor {
    /// Create the eye node under `player`
    pub fn spawn(
        hierarchy: &mut TransformHierarchy,
        player: NodeId,
        name: impl Into<String>,
        offset: Vec3,
    ) -> Result<Self, CameraError> {
        let name = name.into();
        let node = hierarchy.spawn_child(player, name.clone(), Transform::from_position(offset))?;
        Ok(Self {
            name,
            offset,
            node,
            prior_pose: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local offset from the player
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Camera pose recorded on the last switch into first person
    pub fn prior_pose(&self) -> Option<Transform> {
        self.prior_pose
    }

    pub(crate) fn record_prior_pose(&mut self, pose: Transform) {
        self.prior_pose = Some(pose);
    }

    /// Tilt the eye; positive degrees look down
    pub fn set_pitch(&self, hierarchy: &mut TransformHierarchy, pitch_degrees: f32) -> Result<(), CameraError> {
        let local = hierarchy.local_mut(self.node).ok_or(CameraError::MissingNode {
            role: "anchor",
            node: self.node,
        })?;
        local.rotation = Quat::from_rotation_x(-pitch_degrees.to_radians());
        Ok(())
    }

    pub fn world_transform(&self, hierarchy: &TransformHierarchy) -> Result<Transform, CameraError> {
        hierarchy.world_transform(self.node).ok_or(CameraError::MissingNode {
            role: "anchor",
            node: self.node,
        })
    }
}
