//! Mutable locomotion state

use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use stride_core::{Quat, Vec3};

/// Everything the controller carries from one frame to the next.
///
/// Only `LocomotionController::step` mutates this; everything else reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Horizontal velocity in world space (y is always zero)
    pub planar_velocity: Vec3,
    /// Signed vertical speed, positive is up
    pub vertical_velocity: f32,
    pub stamina: f32,
    pub is_sprinting: bool,
    pub is_crouching: bool,
    /// Blended collider height
    pub body_height: f32,
    /// Blended eye height above the feet
    pub camera_height: f32,
    /// Look pitch in degrees, positive looks down, clamped to ±90
    pub pitch: f32,
    /// Body heading in degrees, positive turns right, unbounded
    pub yaw: f32,
    /// Pending jump request
    pub jump_latched: bool,
    /// Grounded flag reported by the last move
    pub grounded: bool,
}

impl LocomotionState {
    /// Fresh state for a standing player with full stamina
    pub fn new(profile: &Profile) -> Self {
        Self {
            planar_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            stamina: profile.max_stamina,
            is_sprinting: false,
            is_crouching: false,
            body_height: profile.stand_height,
            camera_height: profile.stand_camera_height,
            pitch: 0.0,
            yaw: 0.0,
            jump_latched: false,
            grounded: false,
        }
    }

    /// Combined planar and vertical velocity
    pub fn velocity(&self) -> Vec3 {
        self.planar_velocity + Vec3::UP * self.vertical_velocity
    }

    pub fn planar_speed(&self) -> f32 {
        self.planar_velocity.length()
    }

    /// Body orientation: yaw only
    pub fn body_rotation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::UP, -self.yaw.to_radians())
    }

    /// Camera orientation relative to the body: pitch only
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::RIGHT, -self.pitch.to_radians())
    }

    /// World-space forward and right axes of the current heading
    pub fn heading_axes(&self) -> (Vec3, Vec3) {
        let rotation = self.body_rotation();
        (rotation.rotate(Vec3::FORWARD), rotation.rotate(Vec3::RIGHT))
    }
}
