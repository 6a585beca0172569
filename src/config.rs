//! Round tuning.  Every field has a default matching the classic game; the
//! binary overrides a few of them from the command line.

pub const ROUND_SECONDS: u32 = 60;
pub const POINTS_PER_HIT: u32 = 10;
pub const TICK_RATE: u32 = 60;

/// Displacement multiplier applied to `speed` on every motion tick.
pub const TICK_SCALE: f32 = 2.0;

/// How far past the viewport edge a turkey may drift before it is culled.
pub const OFFSCREEN_BUFFER: f32 = 100.0;

/// Distance outside the entry edge at which new turkeys appear.
pub const SPAWN_MARGIN: f32 = 75.0;

/// Side of a turkey's square hit box, in pixels.
pub const TURKEY_SIZE: f32 = 50.0;

pub const MUZZLE_FLASH_MS: u32 = 150;
pub const HIT_BURST_MS: u32 = 500;

/// Time left (seconds) at or below which the HUD switches to its warning look.
pub const LOW_TIME_SECONDS: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub round_seconds: u32,
    pub points_per_hit: u32,
    /// Ticks per second of the single loop driving the round.
    pub tick_rate: u32,
    pub tick_scale: f32,
    pub offscreen_buffer: f32,
    pub spawn_margin: f32,
    pub turkey_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            points_per_hit: POINTS_PER_HIT,
            tick_rate: TICK_RATE,
            tick_scale: TICK_SCALE,
            offscreen_buffer: OFFSCREEN_BUFFER,
            spawn_margin: SPAWN_MARGIN,
            turkey_size: TURKEY_SIZE,
        }
    }
}

impl GameConfig {
    /// Convert a wall-clock duration into a whole number of ticks (at least 1).
    pub fn frames_for_ms(&self, ms: u32) -> u32 {
        ((ms as u64 * self.tick_rate as u64 + 999) / 1000).max(1) as u32
    }

    pub fn frames_for_secs(&self, secs: f32) -> u32 {
        (secs * self.tick_rate as f32).round().max(1.0) as u32
    }
}
