//! Pure round logic.
//!
//! Every public function takes an immutable reference to the current
//! `RoundState` (and, where needed, an RNG handle) and returns a brand-new
//! `RoundState`.  Side effects are limited to the injected RNG and log lines.
//!
//! Outside `Phase::Active` every update is a no-op, and the timers only
//! exist inside that phase, so nothing scheduled for one round can touch the
//! state of the next.

use log::{debug, info};
use rand::Rng;

use crate::config::{GameConfig, HIT_BURST_MS, LOW_TIME_SECONDS, MUZZLE_FLASH_MS};
use crate::entities::{
    Direction, Feedback, FeedbackKind, Phase, RoundState, Timers, Turkey, TurkeyId, Variant,
    Viewport,
};
use crate::spawn;

/// Vertical wobble of erratic turkeys, pixels per frame at the crest.
pub const WOBBLE_AMPLITUDE: f32 = 3.0;
/// Radians advanced per frame.
pub const WOBBLE_FREQUENCY: f32 = 0.1;

// ── Constructors ─────────────────────────────────────────────────────────────

/// The state before any round has been played.
pub fn init_state(viewport: Viewport, config: GameConfig) -> RoundState {
    RoundState {
        turkeys: Vec::new(),
        feedback: Vec::new(),
        score: 0,
        best_score: 0,
        time_remaining: config.round_seconds,
        phase: Phase::Idle,
        frame: 0,
        next_id: 0,
        viewport,
        config,
    }
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

/// Start (or restart) a round.  Whatever the previous round had scheduled is
/// dropped with the old phase before the fresh timers are armed.
pub fn start_round(state: &RoundState, rng: &mut impl Rng) -> RoundState {
    info!(
        "round started: {}s, viewport {}x{}",
        state.config.round_seconds, state.viewport.width, state.viewport.height
    );
    RoundState {
        turkeys: Vec::new(),
        feedback: Vec::new(),
        score: 0,
        time_remaining: state.config.round_seconds,
        phase: Phase::Active(Timers::armed(spawn::roll_jitter(rng))),
        frame: 0,
        ..state.clone()
    }
}

pub fn end_round(state: &RoundState) -> RoundState {
    if !state.phase.is_active() {
        return state.clone();
    }
    let best_score = state.best_score.max(state.score);
    info!("round over: score {}, best {}", state.score, best_score);
    RoundState {
        phase: Phase::Ended,
        best_score,
        ..state.clone()
    }
}

/// One second of the round clock.
pub fn countdown_tick(state: &RoundState) -> RoundState {
    if !state.phase.is_active() {
        return state.clone();
    }
    let time_remaining = state.time_remaining.saturating_sub(1);
    let next = RoundState {
        time_remaining,
        ..state.clone()
    };
    if time_remaining == 0 {
        end_round(&next)
    } else {
        next
    }
}

pub fn resize(state: &RoundState, viewport: Viewport) -> RoundState {
    RoundState {
        viewport,
        ..state.clone()
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Release the batch the current stage calls for.  New turkeys start just
/// outside the viewport on the side they enter from.
pub fn spawn_tick(state: &RoundState, rng: &mut impl Rng) -> RoundState {
    if !state.phase.is_active() {
        return state.clone();
    }
    let stage = spawn::stage_for(state.time_remaining, state.config.round_seconds);
    let count = spawn::batch_size(stage, rng);

    let mut turkeys = state.turkeys.clone();
    let mut next_id = state.next_id;
    for _ in 0..count {
        let variant = spawn::pick_variant(stage, rng);
        let spec = spawn::roll_spec(variant, rng);
        let position = spawn::spawn_position(spec.direction, &state.viewport, &state.config, rng);
        let turkey = spawn::build_turkey(TurkeyId(next_id), spec, position);
        debug!(
            "spawned {} {:?} {:?} at ({:.0}, {:.0}) speed {:.2}",
            turkey.id, turkey.variant, turkey.direction, turkey.x, turkey.y, turkey.speed
        );
        turkeys.push(turkey);
        next_id += 1;
    }

    RoundState {
        turkeys,
        next_id,
        ..state.clone()
    }
}

// ── Motion ───────────────────────────────────────────────────────────────────

/// Vertical pixels travelled per horizontal pixel on a diagonal.  Sized so a
/// diagonal entering anywhere in its spawn band reaches the midpoint with
/// its whole box still inside the viewport, whatever the aspect ratio.
pub fn diagonal_slope(viewport: &Viewport, config: &GameConfig) -> f32 {
    let climb = (viewport.height / 2.0 - config.turkey_size).max(0.0);
    let run = viewport.mid_x() + config.spawn_margin;
    if run > 0.0 {
        climb / run
    } else {
        0.0
    }
}

/// Unit-ish velocity for `direction` at horizontal position `x`.
///
/// Diagonals flip their vertical sign at the viewport's horizontal midpoint,
/// tracing a V (or inverted V) across the screen.
pub fn direction_vector(
    direction: Direction,
    x: f32,
    viewport: &Viewport,
    config: &GameConfig,
) -> (f32, f32) {
    let slope = diagonal_slope(viewport, config);
    let before_mid = x < viewport.mid_x();
    match direction {
        Direction::Left => (-1.0, 0.0),
        Direction::Right => (1.0, 0.0),
        Direction::Up => (0.0, -1.0),
        Direction::Down => (0.0, 1.0),
        Direction::DiagonalUp if before_mid => (1.0, -slope),
        Direction::DiagonalUp => (1.0, slope),
        Direction::DiagonalDown if before_mid => (1.0, slope),
        Direction::DiagonalDown => (1.0, -slope),
    }
}

pub fn wobble(frame: u64, phase_offset: f32) -> f32 {
    WOBBLE_AMPLITUDE * (frame as f32 * WOBBLE_FREQUENCY + phase_offset).sin()
}

fn advance(turkey: &Turkey, frame: u64, viewport: &Viewport, config: &GameConfig) -> Turkey {
    let (dx, dy) = direction_vector(turkey.direction, turkey.x, viewport, config);
    let step = turkey.speed * config.tick_scale;
    let mut y = turkey.y + dy * step;
    if let (Variant::Erratic, Some(offset)) = (turkey.variant, turkey.phase_offset) {
        y += wobble(frame, offset);
    }
    Turkey {
        x: turkey.x + dx * step,
        y,
        ..turkey.clone()
    }
}

pub fn is_out_of_bounds(turkey: &Turkey, viewport: &Viewport, buffer: f32) -> bool {
    turkey.x < -buffer
        || turkey.x > viewport.width + buffer
        || turkey.y < -buffer
        || turkey.y > viewport.height + buffer
}

/// Move every live turkey one step.  Hit turkeys are dropped before moving,
/// whatever their position; the rest are culled once they drift past the
/// off-screen buffer.
pub fn motion_tick(state: &RoundState) -> RoundState {
    if !state.phase.is_active() {
        return state.clone();
    }
    let buffer = state.config.offscreen_buffer;
    let turkeys: Vec<Turkey> = state
        .turkeys
        .iter()
        .filter(|t| !t.hit)
        .map(|t| advance(t, state.frame, &state.viewport, &state.config))
        .filter(|t| {
            let gone = is_out_of_bounds(t, &state.viewport, buffer);
            if gone {
                debug!("{} left the screen", t.id);
            }
            !gone
        })
        .collect();

    RoundState {
        turkeys,
        ..state.clone()
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Topmost live turkey under the point.  Later spawns are drawn on top.
pub fn hit_test(state: &RoundState, x: f32, y: f32) -> Option<TurkeyId> {
    let size = state.config.turkey_size;
    state
        .turkeys
        .iter()
        .rev()
        .find(|t| !t.hit && t.contains(x, y, size))
        .map(|t| t.id)
}

/// Mark `id` as hit and award points.  Repeating the call for the same id,
/// naming an unknown id, or calling outside an active round changes nothing.
pub fn register_hit(state: &RoundState, id: TurkeyId) -> RoundState {
    if !state.phase.is_active() {
        return state.clone();
    }
    let Some(target) = state.turkeys.iter().find(|t| t.id == id && !t.hit) else {
        return state.clone();
    };

    let size = state.config.turkey_size;
    let (cx, cy) = target.center(size);
    let turkeys = state
        .turkeys
        .iter()
        .map(|t| {
            if t.id == id {
                Turkey {
                    hit: true,
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect();

    let mut feedback = state.feedback.clone();
    feedback.push(Feedback {
        kind: FeedbackKind::HitBurst,
        x: cx,
        y: cy,
        frames_left: state.config.frames_for_ms(HIT_BURST_MS),
    });

    let score = state.score + state.config.points_per_hit;
    debug!("hit {}, score {}", id, score);

    RoundState {
        turkeys,
        feedback,
        score,
        ..state.clone()
    }
}

/// A click at `(x, y)`: flash at the pointer, then hit whatever is under it.
pub fn shoot(state: &RoundState, x: f32, y: f32) -> RoundState {
    if !state.phase.is_active() {
        return state.clone();
    }
    let mut feedback = state.feedback.clone();
    feedback.push(Feedback {
        kind: FeedbackKind::MuzzleFlash,
        x,
        y,
        frames_left: state.config.frames_for_ms(MUZZLE_FLASH_MS),
    });
    let flashed = RoundState {
        feedback,
        ..state.clone()
    };

    match hit_test(&flashed, x, y) {
        Some(id) => register_hit(&flashed, id),
        None => flashed,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

fn age_feedback(feedback: &[Feedback]) -> Vec<Feedback> {
    feedback
        .iter()
        .filter(|f| f.frames_left > 1)
        .map(|f| Feedback {
            frames_left: f.frames_left - 1,
            ..f.clone()
        })
        .collect()
}

/// Advance the round by one frame.  This is the only clock: motion runs
/// every frame, spawns and the countdown are derived from frame counts kept
/// in the active phase.  Motion goes first so it sees every hit registered
/// since the previous frame.
pub fn tick(state: &RoundState, rng: &mut impl Rng) -> RoundState {
    let Phase::Active(timers) = &state.phase else {
        return state.clone();
    };
    let timers = timers.clone();

    let moved = motion_tick(&RoundState {
        frame: state.frame + 1,
        feedback: age_feedback(&state.feedback),
        ..state.clone()
    });

    // Spawn interval is read against the live clock, never a stored deadline.
    let mut spawn_frames = timers.spawn_frames + 1;
    let mut spawn_jitter = timers.spawn_jitter;
    let probe = Timers {
        spawn_frames,
        ..timers.clone()
    };
    let spawned = if spawn::spawn_due(&probe, moved.time_remaining, &moved.config) {
        spawn_frames = 0;
        spawn_jitter = spawn::roll_jitter(rng);
        spawn_tick(&moved, rng)
    } else {
        moved
    };

    let mut countdown_frames = timers.countdown_frames + 1;
    let second_elapsed = countdown_frames >= spawned.config.tick_rate;
    if second_elapsed {
        countdown_frames = 0;
    }

    let rearmed = RoundState {
        phase: Phase::Active(Timers {
            countdown_frames,
            spawn_frames,
            spawn_jitter,
        }),
        ..spawned
    };

    if second_elapsed {
        countdown_tick(&rearmed)
    } else {
        rearmed
    }
}

// ── Presentation helpers ─────────────────────────────────────────────────────

/// Verdict shown on the game-over screen.
pub fn score_message(score: u32) -> &'static str {
    match score {
        s if s >= 200 => "Turkey Master!",
        s if s >= 100 => "Great Shot!",
        s if s >= 50 => "Not Bad!",
        _ => "Keep Practicing!",
    }
}

pub fn is_low_time(state: &RoundState) -> bool {
    state.phase.is_active() && state.time_remaining <= LOW_TIME_SECONDS
}
