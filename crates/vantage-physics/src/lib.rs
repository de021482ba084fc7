//! Vantage Physics - Scene collision queries using rapier3d
//!
//! Holds the static level geometry the camera must not render through and
//! answers segment queries against it.

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::parry::query::PointQuery;
use rapier3d::prelude::*;

/// Segments shorter than this never report a hit
const MIN_SEGMENT_LENGTH: f32 = 1e-6;

/// Static collision scene with a query pipeline kept in sync on every edit
pub struct PhysicsWorld {
    /// Rigid body storage (queries need it even for parentless colliders)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Query pipeline for segment casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty collision scene
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.query_pipeline.update(&self.collider_set);
        handle
    }

    /// Test the segment `from -> to` and return the hit closest to `from`.
    ///
    /// Colliders that already contain `from` are skipped, so a segment that
    /// starts inside geometry only reports what lies beyond it. Any predicate
    /// on `filter` still applies.
    pub fn linecast(&self, from: Vec3, to: Vec3, filter: QueryFilter) -> Option<RaycastHit> {
        let segment = to - from;
        let length = segment.length();
        if length < MIN_SEGMENT_LENGTH {
            return None;
        }
        let direction = segment / length;

        let origin = point![from.x, from.y, from.z];
        let caller = filter.predicate;
        let starts_outside = move |handle: ColliderHandle, collider: &Collider| {
            !collider.shape().contains_point(collider.position(), &origin)
                && caller.map_or(true, |keep| keep(handle, collider))
        };
        let ray = Ray::new(origin, vector![direction.x, direction.y, direction.z]);

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                length,
                true,
                filter.predicate(&starts_outside),
            )
            .map(|(handle, intersection)| RaycastHit {
                collider: handle,
                distance: intersection.time_of_impact,
                point: from + direction * intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
            })
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider (walls, pillars)
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment hit information
#[derive(Debug, Clone)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Distance from the segment start to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linecast_hits_ground() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);

        let hit = world
            .linecast(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -5.0, 0.0), QueryFilter::default())
            .expect("segment crosses the ground");
        assert_eq!(hit.collider, ground);
        assert!((hit.distance - 10.0).abs() < 1e-3);
        assert!(hit.point.y.abs() < 1e-3);
    }

    #[test]
    fn test_linecast_hits_wall_face() {
        let mut world = PhysicsWorld::new();
        // Wall occupying x in [4.5, 5.5]
        world.create_static_box(Vec3::new(0.5, 5.0, 5.0), Vec3::new(5.0, 0.0, 0.0));

        let hit = world
            .linecast(Vec3::new(0.0, 1.0, 0.0), Vec3::new(10.0, 2.0, 0.0), QueryFilter::default())
            .expect("segment crosses the wall");
        assert!((hit.point.x - 4.5).abs() < 1e-3);
        assert!(hit.normal.x < -0.9);
    }

    #[test]
    fn test_linecast_stops_at_segment_end() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(Vec3::new(0.5, 5.0, 5.0), Vec3::new(5.0, 0.0, 0.0));

        let hit = world.linecast(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), QueryFilter::default());
        assert!(hit.is_none());
    }

    #[test]
    fn test_linecast_degenerate_segment() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        assert!(world
            .linecast(Vec3::new(1.0, -1.0, 1.0), Vec3::new(1.0, -1.0, 1.0), QueryFilter::default())
            .is_none());
    }

    #[test]
    fn test_linecast_skips_collider_containing_start() {
        let mut world = PhysicsWorld::new();
        // Box around the origin; the segment starts inside it.
        world.create_static_box(Vec3::splat(1.0), Vec3::ZERO);

        let hit = world.linecast(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), QueryFilter::default());
        assert!(hit.is_none());

        // Geometry past the enclosing box is still reported.
        let wall = world.create_static_box(Vec3::new(0.5, 5.0, 5.0), Vec3::new(4.0, 0.0, 0.0));
        let hit = world
            .linecast(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), QueryFilter::default())
            .expect("segment reaches the far wall");
        assert_eq!(hit.collider, wall);
        assert!((hit.point.x - 3.5).abs() < 1e-3);
    }

    #[test]
    fn test_linecast_honours_exclusion() {
        let mut world = PhysicsWorld::new();
        let wall = world.create_static_box(Vec3::new(0.5, 5.0, 5.0), Vec3::new(5.0, 0.0, 0.0));

        let filter = QueryFilter::default().exclude_collider(wall);
        let hit = world.linecast(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), filter);
        assert!(hit.is_none());
    }
}
