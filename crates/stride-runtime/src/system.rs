//! Runtime system trait

use stride_core::Result;

/// A system that can be ticked by the frame loop
///
/// Systems are updated once per frame in registration order with the clamped
/// delta from `GameClock`.
pub trait RuntimeSystem {
    /// Called once before the first update
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
