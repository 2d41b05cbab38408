//! Per-frame input sample

use serde::{Deserialize, Serialize};
use stride_core::Vec2;

/// Input consumed by one `LocomotionController::step`.
///
/// Vectors arrive already scaled and normalized by whatever produced them;
/// the controller never clamps them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Local-space movement, x = strafe right, y = forward
    pub move_input: Vec2,
    /// Look delta, x = yaw, y = pitch (up is positive)
    pub look_input: Vec2,
    /// Jump pressed this frame; latched until consumed or invalidated
    pub jump_requested: bool,
    pub sprint_held: bool,
    pub crouch_held: bool,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_move(mut self, x: f32, y: f32) -> Self {
        self.move_input = Vec2::new(x, y);
        self
    }

    pub fn with_look(mut self, x: f32, y: f32) -> Self {
        self.look_input = Vec2::new(x, y);
        self
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump_requested = jump;
        self
    }

    pub fn with_sprint(mut self, sprint: bool) -> Self {
        self.sprint_held = sprint;
        self
    }

    pub fn with_crouch(mut self, crouch: bool) -> Self {
        self.crouch_held = crouch;
        self
    }
}
