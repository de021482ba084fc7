use thiserror::Error;
use vantage_core::{HierarchyError, NodeId};

/// Errors raised while attaching or running the camera controller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("{role} node {node} is missing from the hierarchy")]
    MissingNode { role: &'static str, node: NodeId },

    #[error("camera node {0} must be a root node")]
    CameraParented(NodeId),

    #[error("invalid camera config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}
