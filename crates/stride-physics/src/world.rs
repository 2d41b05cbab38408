//! Static level geometry wrapping Rapier's collider and query sets

use rapier3d::prelude::*;
use stride_core::Vec3;

/// Level geometry the character moves through.
///
/// Only static colliders live here; the character itself is a shape swept
/// through the query pipeline, not a body in the set.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
    /// Set when colliders changed since the last `update_queries`
    dirty: bool,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            dirty: false,
        }
    }

    /// Insert an axis-aligned static box and return its handle
    pub fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(center))
            .build();
        self.insert_collider(collider)
    }

    /// Insert a large floor slab whose top face sits at `height`
    pub fn add_floor(&mut self, height: f32, half_size: f32) -> ColliderHandle {
        self.add_static_box(
            Vec3::new(0.0, height - 0.5, 0.0),
            Vec3::new(half_size, 0.5, half_size),
        )
    }

    /// Insert an arbitrary static collider
    pub fn insert_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.dirty = true;
        self.collider_set.insert(collider)
    }

    /// Rebuild the query acceleration structure after geometry changes
    pub fn update_queries(&mut self) {
        if self.dirty {
            self.query_pipeline.update(&self.collider_set);
            self.dirty = false;
        }
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub(crate) fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_physics_world() {
        let world = PhysicsWorld::new();
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn test_add_boxes() {
        let mut world = PhysicsWorld::new();
        world.add_static_box(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        world.add_floor(0.0, 50.0);
        world.update_queries();
        assert_eq!(world.collider_count(), 2);
    }

    #[test]
    fn test_floor_top_face() {
        let mut world = PhysicsWorld::new();
        world.add_floor(2.0, 10.0);
        world.update_queries();

        let ray = Ray::new(point![0.0, 5.0, 0.0], vector![0.0, -1.0, 0.0]);
        let hit = world.query_pipeline.cast_ray(
            &world.rigid_body_set,
            &world.collider_set,
            &ray,
            10.0,
            true,
            QueryFilter::default(),
        );
        let (_, toi) = hit.expect("ray should hit the floor");
        assert!((toi - 3.0).abs() < 1e-4);
    }
}
