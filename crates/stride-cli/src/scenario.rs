//! Scripted input scenarios
//!
//! A scenario is a TOML file describing a small level and a sequence of input
//! segments, each held for a number of frames:
//!
//! ```toml
//! name = "corridor"
//! dt = 0.016666667
//!
//! [[boxes]]
//! center = [0.0, 1.4, -5.0]
//! half_extents = [3.0, 0.1, 3.0]
//!
//! [[segments]]
//! label = "walk"
//! frames = 60
//! move = [0.0, 1.0]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use stride_core::{Result, StrideError, Vec2, Vec3};
use stride_locomotion::{FrameInput, SpineRig};
use stride_physics::world::PhysicsWorld;

/// Static box in the scenario level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBox {
    pub center: [f32; 3],
    pub half_extents: [f32; 3],
}

/// Input held for a run of frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub label: String,
    pub frames: u32,
    /// Frame time override for this segment
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default, rename = "move")]
    pub move_input: [f32; 2],
    /// Look delta applied every frame of the segment
    #[serde(default)]
    pub look: [f32; 2],
    #[serde(default)]
    pub sprint: bool,
    #[serde(default)]
    pub crouch: bool,
    /// Jump is pressed on the first frame of the segment only
    #[serde(default)]
    pub jump: bool,
}

impl Segment {
    /// Input for frame `index` within this segment
    pub fn input(&self, index: u32) -> FrameInput {
        FrameInput {
            move_input: Vec2::from_array(self.move_input),
            look_input: Vec2::from_array(self.look),
            jump_requested: self.jump && index == 0,
            sprint_held: self.sprint,
            crouch_held: self.crouch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Default frame time in seconds
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Feet position at spawn
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 3],
    /// Add a large floor with its top face at y = 0
    #[serde(default = "default_true")]
    pub floor: bool,
    #[serde(default)]
    pub boxes: Vec<LevelBox>,
    /// Spine bone names, root first; enables spine output
    #[serde(default)]
    pub spine: Vec<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

fn default_dt() -> f64 {
    1.0 / 60.0
}

fn default_spawn() -> [f32; 3] {
    [0.0, 0.02, 0.0]
}

fn default_true() -> bool {
    true
}

impl Scenario {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut scenario = Self::from_toml_str(&text)?;
        if scenario.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                scenario.name = stem.to_string_lossy().into_owned();
            }
        }
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(StrideError::ScenarioError(
                "scenario has no input segments".to_string(),
            ));
        }
        check_dt("dt", self.dt)?;
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.frames == 0 {
                return Err(StrideError::ScenarioError(format!(
                    "segment {} ('{}') has zero frames",
                    i, segment.label
                )));
            }
            if let Some(dt) = segment.dt {
                check_dt(&format!("segments[{}].dt", i), dt)?;
            }
        }
        for (i, level_box) in self.boxes.iter().enumerate() {
            if level_box.half_extents.iter().any(|e| !(*e > 0.0)) {
                return Err(StrideError::ScenarioError(format!(
                    "box {} has a non-positive half extent",
                    i
                )));
            }
        }
        Ok(())
    }

    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| s.frames as u64).sum()
    }

    /// Frame time for a segment, falling back to the scenario default
    pub fn segment_dt(&self, segment: &Segment) -> f64 {
        segment.dt.unwrap_or(self.dt)
    }

    pub fn spawn(&self) -> Vec3 {
        Vec3::from_array(self.spawn)
    }

    pub fn spine_rig(&self) -> Option<SpineRig> {
        if self.spine.is_empty() {
            None
        } else {
            Some(SpineRig::from_names(self.spine.iter().cloned()))
        }
    }

    pub fn build_world(&self) -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        if self.floor {
            world.add_floor(0.0, 500.0);
        }
        for level_box in &self.boxes {
            world.add_static_box(
                Vec3::from_array(level_box.center),
                Vec3::from_array(level_box.half_extents),
            );
        }
        world.update_queries();
        world
    }
}

fn check_dt(field: &str, dt: f64) -> Result<()> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(StrideError::out_of_range(field, 0.0, f64::MAX, dt));
    }
    Ok(())
}
