//! Stride Locomotion - First-person player movement
//!
//! A frame-stepped controller that turns sampled input into movement:
//! - `Profile` — tunable speeds, rates and heights, loaded from TOML
//! - `LocomotionState` — velocity, stamina, stance and look angles
//! - `Environment` — physics collaborator (grounding, probes, collide-and-slide)
//! - `AnimationSink` — receives derived animation flags, camera and spine pose
//! - `LocomotionController` — advances the state once per frame via `step`
//! - `SpineRig` — procedural spine bend driven by look pitch

pub mod controller;
pub mod environment;
pub mod input;
pub mod profile;
pub mod spine;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{LocomotionController, StepReport, DEAD_ZONE, GROUNDED_VERTICAL_VELOCITY};
pub use environment::{AnimationFlags, AnimationSink, Environment, MoveOutcome};
pub use input::FrameInput;
pub use profile::Profile;
pub use spine::{SpineBone, SpineRig};
pub use state::LocomotionState;
