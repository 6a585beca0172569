//! All game entity types: pure data plus a few accessors.

use std::fmt;

use crate::config::GameConfig;

// ── Turkeys ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurkeyId(pub u64);

impl fmt::Display for TurkeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    /// Enters from the left, climbs until the horizontal midpoint, then dives.
    DiagonalUp,
    /// Enters from the left, dives until the horizontal midpoint, then climbs.
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Normal,
    Fast,
    /// Wobbles vertically on a sine wave.
    Erratic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Turkey {
    pub id: TurkeyId,
    /// Top-left corner of the hit box.
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub direction: Direction,
    pub variant: Variant,
    /// Only present for `Variant::Erratic`.
    pub phase_offset: Option<f32>,
    pub hit: bool,
}

impl Turkey {
    pub fn center(&self, size: f32) -> (f32, f32) {
        (self.x + size / 2.0, self.y + size / 2.0)
    }

    pub fn contains(&self, px: f32, py: f32, size: f32) -> bool {
        px >= self.x && px <= self.x + size && py >= self.y && py <= self.y + size
    }
}

// ── Feedback ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Every click while a round is running.
    MuzzleFlash,
    /// A turkey was hit; rendered as the "+points" burst.
    HitBurst,
}

/// A fire-and-forget visual cue.  The core only ages and drops these.
#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub x: f32,
    pub y: f32,
    /// Remaining frames to display.
    pub frames_left: u32,
}

// ── Round lifecycle ───────────────────────────────────────────────────────────

/// Per-round schedule state.  Lives inside `Phase::Active` only, so leaving
/// the active phase disarms every timer in the same assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Timers {
    /// Frames since the countdown last decremented.
    pub countdown_frames: u32,
    /// Frames since the last spawn.
    pub spawn_frames: u32,
    /// Position inside the current spawn interval range, in `[0, 1)`.
    pub spawn_jitter: f32,
}

impl Timers {
    pub fn armed(spawn_jitter: f32) -> Self {
        Self {
            countdown_frames: 0,
            spawn_frames: 0,
            spawn_jitter,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Active(Timers),
    Ended,
}

impl Phase {
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Active(_))
    }

    pub fn timers(&self) -> Option<&Timers> {
        match self {
            Phase::Active(timers) => Some(timers),
            _ => None,
        }
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Visible play area in pixel space.  The origin is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn mid_x(&self) -> f32 {
        self.width / 2.0
    }
}

// ── Master round state ────────────────────────────────────────────────────────

/// Everything one round needs.  Cloneable so the update functions in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub turkeys: Vec<Turkey>,
    pub feedback: Vec<Feedback>,
    pub score: u32,
    /// Best final score seen this session; survives restarts.
    pub best_score: u32,
    pub time_remaining: u32,
    pub phase: Phase,
    /// Logical clock, advanced once per tick while the round is active.
    pub frame: u64,
    /// Next turkey id.  Never rewinds, not even on restart.
    pub next_id: u64,
    pub viewport: Viewport,
    pub config: GameConfig,
}

impl RoundState {
    pub fn turkey(&self, id: TurkeyId) -> Option<&Turkey> {
        self.turkeys.iter().find(|t| t.id == id)
    }
}
