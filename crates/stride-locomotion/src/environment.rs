//! Collaborator interfaces: physics environment and animation output

use serde::{Deserialize, Serialize};
use stride_core::{Quat, Vec3};

/// Result of asking the environment to move the character
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveOutcome {
    /// Translation actually applied after collision resolution
    pub translation: Vec3,
    /// Whether the character rests on walkable ground after the move
    pub grounded: bool,
}

/// Physics queries and collide-and-slide movement for one character
pub trait Environment {
    /// Grounded state as of the last move
    fn is_grounded(&self) -> bool;

    /// Distance from the feet down to the nearest surface within
    /// `max_distance`, or `f32::INFINITY` when nothing is hit
    fn cast_down(&self, max_distance: f32) -> f32;

    /// True if the body can grow from `from_height` to `to_height` without
    /// intersecting geometry, probing with a sphere of `radius`
    fn probe_headroom(&self, from_height: f32, to_height: f32, radius: f32) -> bool;

    /// Move by `translation`, resolving collisions
    fn move_by(&mut self, translation: Vec3) -> MoveOutcome;

    /// Follow the blended body height
    fn resize(&mut self, _height: f32) {}
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn is_grounded(&self) -> bool {
        (**self).is_grounded()
    }

    fn cast_down(&self, max_distance: f32) -> f32 {
        (**self).cast_down(max_distance)
    }

    fn probe_headroom(&self, from_height: f32, to_height: f32, radius: f32) -> bool {
        (**self).probe_headroom(from_height, to_height, radius)
    }

    fn move_by(&mut self, translation: Vec3) -> MoveOutcome {
        (**self).move_by(translation)
    }

    fn resize(&mut self, height: f32) {
        (**self).resize(height)
    }
}

/// Animation state derived from locomotion each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFlags {
    pub walking: bool,
    pub running: bool,
    pub jumping: bool,
    pub crouching: bool,
    pub crouch_walking: bool,
}

impl AnimationFlags {
    pub fn derive(has_move_input: bool, grounded: bool, sprinting: bool, crouching: bool) -> Self {
        Self {
            walking: has_move_input && grounded && !sprinting && !crouching,
            running: has_move_input && grounded && sprinting && !crouching,
            jumping: !grounded,
            crouching,
            crouch_walking: has_move_input && crouching,
        }
    }
}

/// Receives the controller's cosmetic output
pub trait AnimationSink {
    fn set_flags(&mut self, flags: AnimationFlags);

    /// Eye height above the feet and camera rotation relative to the body
    fn set_camera(&mut self, height: f32, rotation: Quat);

    /// Body heading
    fn set_body_rotation(&mut self, _rotation: Quat) {}

    /// Per-bone spine rotations, root first
    fn set_spine(&mut self, _rotations: &[Quat]) {}
}
