//! Stride Runtime - Frame loop building blocks
//!
//! - `GameClock` — per-frame delta time, clamped before it reaches simulation
//! - `RuntimeSystem` — trait for systems ticked once per frame

mod clock;
mod system;

pub use clock::GameClock;
pub use system::RuntimeSystem;
