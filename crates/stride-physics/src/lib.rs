//! Stride Physics - Rapier 3D environment
//!
//! Supplies the locomotion controller with a real collision world:
//! - `PhysicsWorld` — static level geometry and the query pipeline
//! - `CharacterBody` / `RapierEnvironment` — capsule character implementing `Environment`
//! - `PlayerSystem` — implements `RuntimeSystem` to step one player per frame

pub mod character;
pub mod world;

use character::{CharacterBody, RapierEnvironment};
use stride_core::{Result, StrideError, Vec3};
use stride_locomotion::{FrameInput, LocomotionController, Profile, SpineRig, StepReport};
use stride_runtime::RuntimeSystem;
use world::PhysicsWorld;

/// One player moving through a physics world
pub struct PlayerSystem {
    pub world: PhysicsWorld,
    pub body: CharacterBody,
    pub controller: LocomotionController,
    input: FrameInput,
    last_report: Option<StepReport>,
}

impl PlayerSystem {
    pub fn new(world: PhysicsWorld, profile: Profile, spawn: Vec3) -> Self {
        let body = CharacterBody::new(spawn, profile.stand_height, profile.body_radius);
        Self {
            world,
            body,
            controller: LocomotionController::new(profile),
            input: FrameInput::default(),
            last_report: None,
        }
    }

    /// Attach a spine rig so step reports carry per-bone rotations
    pub fn with_spine(mut self, rig: SpineRig) -> Self {
        self.controller = self.controller.with_spine(rig);
        self
    }

    /// Input used by the next `update`
    pub fn set_input(&mut self, input: FrameInput) {
        self.input = input;
    }

    pub fn last_report(&self) -> Option<&StepReport> {
        self.last_report.as_ref()
    }

    pub fn position(&self) -> Vec3 {
        self.body.feet()
    }

    /// Run the controller for one frame against the world
    pub fn step(&mut self, dt: f32) -> &StepReport {
        let mut env = RapierEnvironment::new(&self.world, &mut self.body);
        let report = self.controller.step(dt, &self.input, &mut env);
        self.last_report.insert(report)
    }
}

impl RuntimeSystem for PlayerSystem {
    fn initialize(&mut self) -> Result<()> {
        let spawn = self.body.feet();
        if ![spawn.x, spawn.y, spawn.z].iter().all(|c| c.is_finite()) {
            return Err(StrideError::PhysicsError(format!(
                "invalid spawn position {:?}",
                spawn
            )));
        }
        self.world.update_queries();
        log::info!(
            "Player spawned at ({:.2}, {:.2}, {:.2}) in a world of {} colliders",
            spawn.x,
            spawn.y,
            spawn.z,
            self.world.collider_count()
        );
        Ok(())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        self.step(dt as f32);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "player"
    }
}
