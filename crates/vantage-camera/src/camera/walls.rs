//! Wall compensation: keep the camera on the near side of level geometry

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, QueryFilter};
use vantage_physics::PhysicsWorld;

/// Segment test against scene geometry
pub trait CollisionQuery {
    /// First hit point on the segment `from -> to`, if any
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<Vec3>;
}

/// A scene with nothing to collide with
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollision;

impl CollisionQuery for NoCollision {
    fn linecast(&self, _from: Vec3, _to: Vec3) -> Option<Vec3> {
        None
    }
}

/// Adapts a [`PhysicsWorld`] to [`CollisionQuery`], optionally ignoring one
/// collider (usually the player's own capsule).
pub struct SceneQuery<'a> {
    physics: &'a PhysicsWorld,
    exclude: Option<ColliderHandle>,
}

impl<'a> SceneQuery<'a> {
    pub fn new(physics: &'a PhysicsWorld) -> Self {
        Self {
            physics,
            exclude: None,
        }
    }

    /// Skip `collider` in every query
    pub fn excluding(mut self, collider: ColliderHandle) -> Self {
        self.exclude = Some(collider);
        self
    }
}

impl CollisionQuery for SceneQuery<'_> {
    fn linecast(&self, from: Vec3, to: Vec3) -> Option<Vec3> {
        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(handle) = self.exclude {
            filter = filter.exclude_collider(handle);
        }
        self.physics.linecast(from, to, filter).map(|hit| hit.point)
    }
}

/// Outcome of one wall test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallCheck {
    /// Desired point after compensation
    pub position: Vec3,
    /// Where the segment hit geometry, if it did
    pub hit: Option<Vec3>,
}

/// Pull `desired` back to the first wall between it and `from`.
///
/// On a hit the horizontal coordinates move to the hit point while the
/// desired height is kept, so the camera slides along the wall instead of
/// dropping to the hit height.
pub fn compensate_for_walls(query: &dyn CollisionQuery, from: Vec3, desired: Vec3) -> WallCheck {
    match query.linecast(from, desired) {
        Some(hit) => WallCheck {
            position: Vec3::new(hit.x, desired.y, hit.z),
            hit: Some(hit),
        },
        None => WallCheck {
            position: desired,
            hit: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHit(Vec3);

    impl CollisionQuery for FixedHit {
        fn linecast(&self, _from: Vec3, _to: Vec3) -> Option<Vec3> {
            Some(self.0)
        }
    }

    #[test]
    fn test_no_hit_keeps_desired() {
        let desired = Vec3::new(0.0, 4.0, 4.0);
        let check = compensate_for_walls(&NoCollision, Vec3::new(0.0, 2.5, 0.0), desired);
        assert_eq!(check.position, desired);
        assert!(check.hit.is_none());
    }

    #[test]
    fn test_hit_takes_horizontal_and_keeps_height() {
        let hit = Vec3::new(0.5, 3.1, 2.0);
        let desired = Vec3::new(0.0, 4.0, 4.0);
        let check = compensate_for_walls(&FixedHit(hit), Vec3::new(0.0, 2.5, 0.0), desired);
        assert_eq!(check.position, Vec3::new(0.5, 4.0, 2.0));
        assert_eq!(check.hit, Some(hit));
    }

    #[test]
    fn test_scene_query_stops_at_wall() {
        let mut physics = PhysicsWorld::new();
        // Wall slab across z in [1.8, 2.2]
        physics.create_static_box(Vec3::new(5.0, 5.0, 0.2), Vec3::new(0.0, 0.0, 2.0));

        let from = Vec3::new(0.0, 2.5, 0.0);
        let desired = Vec3::new(0.0, 4.0, 4.0);
        let check = compensate_for_walls(&SceneQuery::new(&physics), from, desired);

        assert!((check.position.y - desired.y).abs() < 1e-6);
        assert!((check.position.z - 1.8).abs() < 1e-3);
        assert!(check.position.x.abs() < 1e-3);
        // Never beyond the wall along the tested segment.
        assert!(check.position.z <= 1.8 + 1e-3);
    }

    #[test]
    fn test_anchor_inside_geometry_is_not_pulled_in() {
        let mut physics = PhysicsWorld::new();
        // Pillar enclosing the character offset.
        physics.create_static_box(Vec3::splat(1.0), Vec3::new(0.0, 2.5, 0.0));

        let desired = Vec3::new(0.0, 4.0, 4.0);
        let check = compensate_for_walls(&SceneQuery::new(&physics), Vec3::new(0.0, 2.5, 0.0), desired);
        assert_eq!(check.position, desired);
        assert!(check.hit.is_none());
    }

    #[test]
    fn test_scene_query_excludes_collider() {
        let mut physics = PhysicsWorld::new();
        let wall = physics.create_static_box(Vec3::new(5.0, 5.0, 0.2), Vec3::new(0.0, 0.0, 2.0));

        let query = SceneQuery::new(&physics).excluding(wall);
        let desired = Vec3::new(0.0, 4.0, 4.0);
        let check = compensate_for_walls(&query, Vec3::new(0.0, 2.5, 0.0), desired);
        assert_eq!(check.position, desired);
    }
}
