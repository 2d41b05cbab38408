//! Stride Core - Foundational types for the Stride locomotion stack
//!
//! This crate provides the types that all other Stride crates depend on:
//! - `Vec2`, `Vec3` - Input and spatial vectors
//! - `Quat` - Rotations for camera and bone output
//! - Error types and Result alias

mod error;
mod types;

pub use error::{Result, StrideError};
pub use types::{Quat, Vec2, Vec3};
