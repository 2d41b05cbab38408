//! Procedural spine bend driven by look pitch
//!
//! Each bone of the chain keeps the rest rotation it was recorded with and
//! receives an extra pitch rotation on top. The bend share grows linearly
//! along the chain: with `n` bones, bone `i` (root is 0) takes `(i + 1) / n`
//! of the full bend, so the tip bends the most.

use serde::{Deserialize, Serialize};
use stride_core::{Quat, Vec3};

/// One bone of the bend chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpineBone {
    pub name: String,
    /// Local rotation recorded when the rig was bound
    pub rest: Quat,
}

impl SpineBone {
    pub fn new(name: impl Into<String>, rest: Quat) -> Self {
        Self {
            name: name.into(),
            rest,
        }
    }
}

/// Ordered bone chain, root first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpineRig {
    bones: Vec<SpineBone>,
}

impl SpineRig {
    pub fn new(bones: Vec<SpineBone>) -> Self {
        Self { bones }
    }

    /// Chain of bones with identity rest rotations
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            names
                .into_iter()
                .map(|name| SpineBone::new(name, Quat::IDENTITY))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Share of the full bend taken by bone `index`
    pub fn weight(&self, index: usize) -> f32 {
        if self.bones.is_empty() {
            return 0.0;
        }
        (index + 1) as f32 / self.bones.len() as f32
    }

    /// Local bone rotations for a look pitch in degrees.
    ///
    /// `max_bend` is the bend in degrees the tip reaches at ±90° pitch.
    pub fn pose(&self, pitch: f32, max_bend: f32) -> Vec<Quat> {
        let normalized = (pitch / 90.0).clamp(-1.0, 1.0);
        self.bones
            .iter()
            .enumerate()
            .map(|(i, bone)| {
                let angle = normalized * max_bend * self.weight(i);
                bone.rest * Quat::from_axis_angle(Vec3::RIGHT, -angle.to_radians())
            })
            .collect()
    }
}
