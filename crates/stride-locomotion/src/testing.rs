//! Scripted environment used by the controller tests

use crate::environment::{AnimationFlags, AnimationSink, Environment, MoveOutcome};
use std::cell::Cell;
use stride_core::{Quat, Vec3};

/// Environment whose answers are set directly by the test
pub struct ScriptedEnvironment {
    pub grounded: bool,
    pub ground_distance: f32,
    pub headroom: bool,
    /// When set, every move resolves to zero translation (pinned against a wall)
    pub blocked: bool,
    pub position: Vec3,
    pub moves: Vec<Vec3>,
    pub headroom_probes: Cell<usize>,
    pub last_height: Option<f32>,
}

impl ScriptedEnvironment {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ground_distance: 0.0,
            headroom: true,
            blocked: false,
            position: Vec3::ZERO,
            moves: Vec::new(),
            headroom_probes: Cell::new(0),
            last_height: None,
        }
    }

    pub fn airborne(ground_distance: f32) -> Self {
        Self {
            grounded: false,
            ground_distance,
            ..Self::grounded()
        }
    }
}

impl Environment for ScriptedEnvironment {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn cast_down(&self, max_distance: f32) -> f32 {
        if self.ground_distance <= max_distance {
            self.ground_distance
        } else {
            f32::INFINITY
        }
    }

    fn probe_headroom(&self, _from_height: f32, _to_height: f32, _radius: f32) -> bool {
        self.headroom_probes.set(self.headroom_probes.get() + 1);
        self.headroom
    }

    fn move_by(&mut self, translation: Vec3) -> MoveOutcome {
        let applied = if self.blocked { Vec3::ZERO } else { translation };
        self.moves.push(translation);
        self.position += applied;
        MoveOutcome {
            translation: applied,
            grounded: self.grounded,
        }
    }

    fn resize(&mut self, height: f32) {
        self.last_height = Some(height);
    }
}

/// Sink that records the last values it was given
#[derive(Default)]
pub struct RecordingSink {
    pub flags: Option<AnimationFlags>,
    pub camera: Option<(f32, Quat)>,
    pub body: Option<Quat>,
    pub spine: Vec<Quat>,
}

impl AnimationSink for RecordingSink {
    fn set_flags(&mut self, flags: AnimationFlags) {
        self.flags = Some(flags);
    }

    fn set_camera(&mut self, height: f32, rotation: Quat) {
        self.camera = Some((height, rotation));
    }

    fn set_body_rotation(&mut self, rotation: Quat) {
        self.body = Some(rotation);
    }

    fn set_spine(&mut self, rotations: &[Quat]) {
        self.spine = rotations.to_vec();
    }
}
