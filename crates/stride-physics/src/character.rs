//! Character body driven by Rapier's kinematic character controller

use crate::world::{from_vector, to_vector, PhysicsWorld};
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;
use stride_core::Vec3;
use stride_locomotion::{Environment, MoveOutcome};

/// Height above the feet that ground rays start from, so a character resting
/// exactly on a surface still gets a hit.
const RAY_LIFT: f32 = 0.05;

/// Gap the character controller keeps between the capsule and level geometry
pub const CONTACT_OFFSET: f32 = 0.01;

/// Capsule character tracked by its feet position
pub struct CharacterBody {
    /// The Rapier character controller
    controller: KinematicCharacterController,
    /// Bottom of the capsule in world space
    feet: Vector<Real>,
    height: f32,
    radius: f32,
    /// Whether the character is on the ground
    grounded: bool,
}

impl CharacterBody {
    pub fn new(feet: Vec3, height: f32, radius: f32) -> Self {
        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(CONTACT_OFFSET),
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(0.3),
                min_width: CharacterLength::Absolute(0.2),
                include_dynamic_bodies: false,
            }),
            snap_to_ground: Some(CharacterLength::Absolute(0.2)),
            ..KinematicCharacterController::default()
        };

        Self {
            controller,
            feet: to_vector(feet),
            height,
            radius,
            grounded: false,
        }
    }

    pub fn feet(&self) -> Vec3 {
        from_vector(&self.feet)
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Capsule for the current height; the segment shrinks to a sphere when
    /// the height drops below the diameter
    fn shape(&self) -> SharedShape {
        let half_segment = (self.height * 0.5 - self.radius).max(0.0);
        SharedShape::capsule_y(half_segment, self.radius)
    }

    fn center(&self) -> Isometry<Real> {
        Isometry::translation(self.feet.x, self.feet.y + self.height * 0.5, self.feet.z)
    }
}

/// One frame's view of a character inside a physics world
pub struct RapierEnvironment<'a> {
    world: &'a PhysicsWorld,
    body: &'a mut CharacterBody,
}

impl<'a> RapierEnvironment<'a> {
    pub fn new(world: &'a PhysicsWorld, body: &'a mut CharacterBody) -> Self {
        Self { world, body }
    }

    /// Signed distance from `feet` down to the surface below. Negative when
    /// the surface is above the feet, down to `-RAY_LIFT`.
    fn ground_gap(&self, feet: &Vector<Real>, max_distance: f32) -> Option<f32> {
        let origin = feet + vector![0.0, RAY_LIFT, 0.0];
        let ray = Ray::new(point![origin.x, origin.y, origin.z], vector![0.0, -1.0, 0.0]);
        self.world
            .query_pipeline
            .cast_ray(
                &self.world.rigid_body_set,
                &self.world.collider_set,
                &ray,
                max_distance + RAY_LIFT,
                true,
                QueryFilter::default(),
            )
            .map(|(_, toi)| toi - RAY_LIFT)
    }
}

impl Environment for RapierEnvironment<'_> {
    fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    fn cast_down(&self, max_distance: f32) -> f32 {
        self.ground_gap(&self.body.feet, max_distance)
            .map(|gap| gap.max(0.0))
            .unwrap_or(f32::INFINITY)
    }

    fn probe_headroom(&self, from_height: f32, to_height: f32, radius: f32) -> bool {
        let rise = to_height - from_height;
        if rise <= 0.0 {
            return true;
        }

        // Sweep a ball whose top starts at the current head height
        let feet = self.body.feet;
        let start = Isometry::translation(feet.x, feet.y + from_height - radius, feet.z);
        let ball = Ball::new(radius);
        let hit = self.world.query_pipeline.cast_shape(
            &self.world.rigid_body_set,
            &self.world.collider_set,
            &start,
            &vector![0.0, rise, 0.0],
            &ball,
            ShapeCastOptions::with_max_time_of_impact(1.0),
            QueryFilter::default(),
        );
        hit.is_none()
    }

    fn move_by(&mut self, translation: Vec3) -> MoveOutcome {
        let shape = self.body.shape();
        let corrected = self.body.controller.move_shape(
            1.0,
            &self.world.rigid_body_set,
            &self.world.collider_set,
            &self.world.query_pipeline,
            &*shape,
            &self.body.center(),
            to_vector(translation),
            QueryFilter::default(),
            |_| {},
        );

        let mut applied = corrected.translation;
        let mut grounded = corrected.grounded;

        // Feet never end a move below the contact skin of the ground beneath
        // them; a sweep that starts in penetration resolves sideways.
        let feet = self.body.feet + applied;
        if let Some(gap) = self.ground_gap(&feet, CONTACT_OFFSET * 2.0) {
            if gap < CONTACT_OFFSET {
                applied.y += CONTACT_OFFSET - gap;
            }
            grounded = true;
        }

        self.body.feet += applied;
        self.body.grounded = grounded;

        MoveOutcome {
            translation: from_vector(&applied),
            grounded,
        }
    }

    fn resize(&mut self, height: f32) {
        self.body.height = height;
    }
}
