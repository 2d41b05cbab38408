//! Game clock producing clamped frame deltas

use std::time::Instant;

/// Default ceiling for a single frame's delta (250ms)
const DEFAULT_MAX_DELTA: f64 = 0.25;

/// Tracks game time and hands out one delta per frame.
///
/// Controllers integrate whatever delta they are given without sub-stepping,
/// so spikes (window drags, breakpoints, slow loads) are clamped here, before
/// they can tunnel a character through geometry.
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Clamped time since last frame in seconds
    pub delta_time: f64,
    /// Largest delta a single frame may report
    pub max_delta: f64,
    /// Frames advanced so far
    pub frame: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    /// Create a new game clock with the default 250ms clamp
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a game clock with a custom per-frame clamp
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta,
            ..Self::default()
        }
    }

    /// Advance from wall time. Call once per frame.
    ///
    /// The first tick reports a zero delta.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Advance by an explicit elapsed time (scripted or replayed frames)
    pub fn advance(&mut self, elapsed: f64) {
        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        if elapsed > self.max_delta {
            log::debug!(
                "frame {}: clamping delta {:.4}s to {:.4}s",
                self.frame,
                elapsed,
                self.max_delta
            );
        }
        self.delta_time = elapsed.min(self.max_delta);
        self.total_time += self.delta_time;
        self.frame += 1;
    }
}
