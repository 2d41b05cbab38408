//! Locomotion tuning profile
//!
//! Every tunable the controller reads lives here. Profiles are stored as
//! TOML; any field left out of a file falls back to its default, so a profile
//! file only needs to list what it changes:
//!
//! ```toml
//! max_walk_speed = 4.5
//! stamina_drain_rate = 20.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use stride_core::{Result, StrideError};

/// Configuration record for one player's movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Degrees of rotation per unit of look input
    pub mouse_sensitivity: f32,
    /// Vertical acceleration, negative is down
    pub gravity: f32,
    /// Apex height of a jump under `gravity`
    pub jump_height: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    /// Used both for stopping on the ground and for braking against a reversal
    pub ground_deceleration: f32,
    pub air_deceleration: f32,
    pub max_walk_speed: f32,
    pub max_sprint_speed: f32,
    pub max_crouch_speed: f32,
    pub max_stamina: f32,
    /// Stamina lost per second while sprinting and actually moving
    pub stamina_drain_rate: f32,
    /// Stamina regained per second otherwise
    pub stamina_regen_rate: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    pub stand_camera_height: f32,
    pub crouch_camera_height: f32,
    /// Blend rate (1/s) for body and camera height
    pub crouch_transition_speed: f32,
    /// Radius of the headroom probe swept above the head
    pub body_radius: f32,
    /// A latched jump is dropped once the ground is farther than this
    pub jump_clear_distance: f32,
    /// Range of the downward ground probe
    pub ground_probe_range: f32,
    /// Spine bend in degrees at full look pitch, reached by the tip bone
    pub max_spine_bend: f32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            gravity: -9.81,
            jump_height: 1.0,
            ground_acceleration: 30.0,
            air_acceleration: 15.0,
            ground_deceleration: 75.0,
            air_deceleration: 10.0,
            max_walk_speed: 4.0,
            max_sprint_speed: 6.0,
            max_crouch_speed: 1.5,
            max_stamina: 100.0,
            stamina_drain_rate: 15.0,
            stamina_regen_rate: 2.5,
            stand_height: 1.8,
            crouch_height: 1.0,
            stand_camera_height: 1.6,
            crouch_camera_height: 0.9,
            crouch_transition_speed: 10.0,
            body_radius: 0.3,
            jump_clear_distance: 0.5,
            ground_probe_range: 5.0,
            max_spine_bend: 30.0,
        }
    }
}

impl Profile {
    /// Parse and validate a profile from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load and validate a profile file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let profile = Self::from_toml_str(&text)?;
        log::info!("Loaded locomotion profile from {}", path.display());
        Ok(profile)
    }

    /// Load a profile if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!(
                "No profile at {}, using default locomotion profile",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check every field against the range the controller relies on
    pub fn validate(&self) -> Result<()> {
        const MAX: f64 = f32::MAX as f64;

        let non_negative = [
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("jump_height", self.jump_height),
            ("ground_acceleration", self.ground_acceleration),
            ("air_acceleration", self.air_acceleration),
            ("ground_deceleration", self.ground_deceleration),
            ("air_deceleration", self.air_deceleration),
            ("max_walk_speed", self.max_walk_speed),
            ("max_sprint_speed", self.max_sprint_speed),
            ("max_crouch_speed", self.max_crouch_speed),
            ("max_stamina", self.max_stamina),
            ("stamina_drain_rate", self.stamina_drain_rate),
            ("stamina_regen_rate", self.stamina_regen_rate),
            ("crouch_transition_speed", self.crouch_transition_speed),
            ("jump_clear_distance", self.jump_clear_distance),
            ("ground_probe_range", self.ground_probe_range),
            ("max_spine_bend", self.max_spine_bend),
        ];
        for (field, value) in non_negative {
            check_range(field, value, 0.0, MAX)?;
        }

        let positive = [
            ("stand_height", self.stand_height),
            ("crouch_height", self.crouch_height),
            ("stand_camera_height", self.stand_camera_height),
            ("crouch_camera_height", self.crouch_camera_height),
            ("body_radius", self.body_radius),
        ];
        for (field, value) in positive {
            check_range(field, value, f64::EPSILON, MAX)?;
        }

        check_range("gravity", self.gravity, -MAX, -f64::EPSILON)?;
        check_range(
            "crouch_height",
            self.crouch_height,
            f64::EPSILON,
            self.stand_height as f64,
        )?;
        check_range(
            "crouch_camera_height",
            self.crouch_camera_height,
            f64::EPSILON,
            self.stand_camera_height as f64,
        )?;
        Ok(())
    }
}

fn check_range(field: &str, value: f32, min: f64, max: f64) -> Result<()> {
    let v = value as f64;
    if !value.is_finite() || v < min || v > max {
        return Err(StrideError::out_of_range(field, min, max, v));
    }
    Ok(())
}
