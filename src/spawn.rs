//! Spawn policy: when turkeys appear, which kind, how fast, and where.
//!
//! Everything here is a pure function of the round clock and an injected
//! RNG, so a seeded `StdRng` reproduces a whole round.

use std::f32::consts::TAU;
use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Direction, Timers, Turkey, TurkeyId, Variant, Viewport};

// ── Schedule ──────────────────────────────────────────────────────────────────

/// The round is split in thirds; each later third spawns faster and adds a
/// tougher variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Early,
    Middle,
    Final,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPolicy {
    /// Seconds between spawns, lower bound.
    pub min_interval: f32,
    /// Seconds between spawns, upper bound.
    pub max_interval: f32,
    /// Largest number of turkeys released at once.
    pub max_batch: u32,
    pub variants: &'static [Variant],
}

const EARLY_VARIANTS: &[Variant] = &[Variant::Normal];
const MIDDLE_VARIANTS: &[Variant] = &[Variant::Normal, Variant::Fast];
const FINAL_VARIANTS: &[Variant] = &[Variant::Normal, Variant::Fast, Variant::Erratic];

pub fn stage_for(time_remaining: u32, round_seconds: u32) -> Stage {
    let remaining = time_remaining as u64 * 3;
    let round = round_seconds as u64;
    if remaining > round * 2 {
        Stage::Early
    } else if remaining > round {
        Stage::Middle
    } else {
        Stage::Final
    }
}

pub fn policy(stage: Stage) -> SpawnPolicy {
    match stage {
        Stage::Early => SpawnPolicy {
            min_interval: 1.0,
            max_interval: 3.0,
            max_batch: 1,
            variants: EARLY_VARIANTS,
        },
        Stage::Middle => SpawnPolicy {
            min_interval: 0.8,
            max_interval: 2.0,
            max_batch: 1,
            variants: MIDDLE_VARIANTS,
        },
        Stage::Final => SpawnPolicy {
            min_interval: 0.4,
            max_interval: 1.2,
            max_batch: 2,
            variants: FINAL_VARIANTS,
        },
    }
}

/// Expected turkeys per second with `time_remaining` seconds left.
/// Never decreases as the clock runs down.
pub fn spawn_rate(time_remaining: u32, round_seconds: u32) -> f32 {
    let p = policy(stage_for(time_remaining, round_seconds));
    let mean_batch = (1 + p.max_batch) as f32 / 2.0;
    let mean_interval = (p.min_interval + p.max_interval) / 2.0;
    mean_batch / mean_interval
}

/// Interval (in frames) selected by `jitter` inside the current stage's range.
/// Recomputed from the live clock every time it is asked.
pub fn spawn_interval_frames(time_remaining: u32, jitter: f32, config: &GameConfig) -> u32 {
    let p = policy(stage_for(time_remaining, config.round_seconds));
    let secs = p.min_interval + (p.max_interval - p.min_interval) * jitter.clamp(0.0, 1.0);
    config.frames_for_secs(secs)
}

pub fn spawn_due(timers: &Timers, time_remaining: u32, config: &GameConfig) -> bool {
    timers.spawn_frames >= spawn_interval_frames(time_remaining, timers.spawn_jitter, config)
}

pub fn roll_jitter(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..1.0)
}

pub fn batch_size(stage: Stage, rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=policy(stage).max_batch)
}

pub fn pick_variant(stage: Stage, rng: &mut impl Rng) -> Variant {
    policy(stage)
        .variants
        .choose(rng)
        .copied()
        .unwrap_or(Variant::Normal)
}

// ── Turkey specs ──────────────────────────────────────────────────────────────

/// Immutable attributes of a turkey, decided once at spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurkeySpec {
    pub speed: f32,
    pub direction: Direction,
    pub variant: Variant,
    pub phase_offset: Option<f32>,
}

pub fn speed_range(variant: Variant) -> Range<f32> {
    match variant {
        Variant::Normal => 1.0..3.0,
        Variant::Fast => 3.0..5.0,
        Variant::Erratic => 2.0..4.0,
    }
}

pub fn roll_spec(variant: Variant, rng: &mut impl Rng) -> TurkeySpec {
    let speed = rng.gen_range(speed_range(variant));
    let direction = Direction::ALL.choose(rng).copied().unwrap_or(Direction::Right);
    let phase_offset = match variant {
        Variant::Erratic => Some(rng.gen_range(0.0..TAU)),
        _ => None,
    };
    TurkeySpec {
        speed,
        direction,
        variant,
        phase_offset,
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

fn span(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Top-left corner for a new turkey travelling in `direction`.  Always fully
/// outside the viewport on the entry side, never beyond the cull buffer.
pub fn spawn_position(
    direction: Direction,
    viewport: &Viewport,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (f32, f32) {
    let size = config.turkey_size;
    let margin = config.spawn_margin;
    let (w, h) = (viewport.width, viewport.height);

    match direction {
        Direction::Right => (-margin, span(rng, 0.0, h - size)),
        Direction::Left => (w + margin - size, span(rng, 0.0, h - size)),
        Direction::Down => (span(rng, 0.0, w - size), -margin),
        Direction::Up => (span(rng, 0.0, w - size), h + margin - size),
        Direction::DiagonalUp => (-margin, span(rng, h / 2.0, h - size)),
        Direction::DiagonalDown => (-margin, span(rng, 0.0, h / 2.0 - size)),
    }
}

pub fn build_turkey(id: TurkeyId, spec: TurkeySpec, position: (f32, f32)) -> Turkey {
    Turkey {
        id,
        x: position.0,
        y: position.1,
        speed: spec.speed,
        direction: spec.direction,
        variant: spec.variant,
        phase_offset: spec.phase_offset,
        hit: false,
    }
}
