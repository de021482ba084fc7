//! Transform hierarchy: named nodes with a parent link and a local transform.
//!
//! Nodes are addressed by generational [`NodeId`]s so a stale id from a
//! despawned node never aliases a node that later reuses the slot.

use std::fmt;

use crate::types::Transform;

/// A generational node handle. Compact u32 index + generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// The slot index of this node.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The generation of this node (incremented on reuse).
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Errors from hierarchy edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("parenting {node} under {parent} would create a cycle")]
    Cycle { node: NodeId, parent: NodeId },
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    local: Transform,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owns every node and resolves world transforms through parent links.
#[derive(Debug, Clone, Default)]
pub struct TransformHierarchy {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    len: usize,
}

impl TransformHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a root node, reusing a freed slot if available.
    pub fn spawn(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        let node = Node {
            name: name.into(),
            parent: None,
            local,
        };
        self.len += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Spawn a node parented to `parent`, with `local` relative to it.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Transform,
    ) -> Result<NodeId, HierarchyError> {
        if !self.contains(parent) {
            return Err(HierarchyError::UnknownNode(parent));
        }
        let id = self.spawn(name, local);
        if let Some(node) = self.node_mut(id) {
            node.parent = Some(parent);
        }
        Ok(id)
    }

    /// Despawn a node and all of its descendants. Returns `true` if it was alive.
    pub fn despawn(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        for child in self.children(id) {
            self.despawn(child);
        }
        let slot = &mut self.slots[id.index as usize];
        slot.node = None;
        slot.generation += 1;
        self.free_list.push(id.index);
        self.len -= 1;
        true
    }

    /// Check whether a node is currently alive.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Number of alive nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no alive nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// First alive node carrying `name`, in slot order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, n)| n.name == name).map(|(id, _)| id)
    }

    /// Direct children of `id`.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, n)| n.parent == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Re-parent a node. `None` makes it a root. The local transform is kept as is.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), HierarchyError> {
        if !self.contains(id) {
            return Err(HierarchyError::UnknownNode(id));
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(HierarchyError::UnknownNode(parent));
            }
            let mut cursor = Some(parent);
            while let Some(ancestor) = cursor {
                if ancestor == id {
                    return Err(HierarchyError::Cycle { node: id, parent });
                }
                cursor = self.parent(ancestor);
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = parent;
        }
        Ok(())
    }

    /// Transform relative to the parent.
    pub fn local(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|n| &n.local)
    }

    pub fn local_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|n| &mut n.local)
    }

    /// Transform in world space, composed through every ancestor.
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let node = self.node(id)?;
        match node.parent {
            Some(parent) => Some(self.world_transform(parent)?.mul_transform(&node.local)),
            None => Some(node.local),
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn spawn_sequential() {
        let mut tree = TransformHierarchy::new();
        let a = tree.spawn("a", Transform::default());
        let b = tree.spawn("b", Transform::default());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.name(b), Some("b"));
    }

    #[test]
    fn despawn_and_reuse() {
        let mut tree = TransformHierarchy::new();
        let a = tree.spawn("a", Transform::default());
        assert!(tree.despawn(a));
        assert!(!tree.despawn(a));

        let reused = tree.spawn("again", Transform::default());
        assert_eq!(reused.index(), 0);
        assert_eq!(reused.generation(), 1);
        assert!(!tree.contains(a));
        assert!(tree.local(a).is_none());
    }

    #[test]
    fn despawn_removes_descendants() {
        let mut tree = TransformHierarchy::new();
        let root = tree.spawn("root", Transform::default());
        let child = tree.spawn_child(root, "child", Transform::default()).unwrap();
        let grandchild = tree.spawn_child(child, "grandchild", Transform::default()).unwrap();

        tree.despawn(root);
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.is_empty());
    }

    #[test]
    fn world_transform_follows_parent() {
        let mut tree = TransformHierarchy::new();
        let player = tree.spawn(
            "player",
            Transform::from_position_rotation(Vec3::new(5.0, 0.0, 0.0), Quat::from_rotation_y(std::f32::consts::PI)),
        );
        let eye = tree
            .spawn_child(player, "eye", Transform::from_position(Vec3::new(0.0, 1.4, 0.2)))
            .unwrap();

        let world = tree.world_transform(eye).unwrap();
        assert!((world.position - Vec3::new(5.0, 1.4, -0.2)).length() < 1e-5);

        tree.local_mut(player).unwrap().position.x = 0.0;
        let moved = tree.world_transform(eye).unwrap();
        assert!((moved.position - Vec3::new(0.0, 1.4, -0.2)).length() < 1e-5);
        // Local offset is untouched by the parent moving.
        assert_eq!(tree.local(eye).unwrap().position, Vec3::new(0.0, 1.4, 0.2));
    }

    #[test]
    fn spawn_child_of_unknown_parent_fails() {
        let mut tree = TransformHierarchy::new();
        let gone = tree.spawn("gone", Transform::default());
        tree.despawn(gone);
        assert_eq!(
            tree.spawn_child(gone, "orphan", Transform::default()),
            Err(HierarchyError::UnknownNode(gone))
        );
    }

    #[test]
    fn set_parent_rejects_cycles() {
        let mut tree = TransformHierarchy::new();
        let a = tree.spawn("a", Transform::default());
        let b = tree.spawn_child(a, "b", Transform::default()).unwrap();

        assert_eq!(
            tree.set_parent(a, Some(b)),
            Err(HierarchyError::Cycle { node: a, parent: b })
        );
        assert!(tree.set_parent(b, None).is_ok());
        assert_eq!(tree.parent(b), None);
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn find_by_name_returns_alive_node() {
        let mut tree = TransformHierarchy::new();
        let a = tree.spawn("Player", Transform::default());
        assert_eq!(tree.find_by_name("Player"), Some(a));
        tree.despawn(a);
        assert_eq!(tree.find_by_name("Player"), None);
    }
}
