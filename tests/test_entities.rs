use turkey_hunt::config::GameConfig;
use turkey_hunt::entities::*;

fn turkey(id: u64, x: f32, y: f32) -> Turkey {
    Turkey {
        id: TurkeyId(id),
        x,
        y,
        speed: 2.0,
        direction: Direction::Right,
        variant: Variant::Normal,
        phase_offset: None,
        hit: false,
    }
}

#[test]
fn entity_enums_compare() {
    assert_eq!(Direction::Left, Direction::Left);
    assert_ne!(Direction::DiagonalUp, Direction::DiagonalDown);
    assert_eq!(Variant::Erratic, Variant::Erratic);
    assert_ne!(Variant::Normal, Variant::Fast);
    assert_ne!(FeedbackKind::MuzzleFlash, FeedbackKind::HitBurst);
    assert_eq!(Phase::Idle, Phase::Idle);
    assert_ne!(Phase::Idle, Phase::Ended);
}

#[test]
fn direction_all_lists_each_once() {
    let all = Direction::ALL;
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn turkey_id_displays_with_prefix() {
    assert_eq!(TurkeyId(7).to_string(), "T7");
    assert!(TurkeyId(2) < TurkeyId(3));
}

#[test]
fn turkey_center_and_bounds() {
    let t = turkey(1, 100.0, 40.0);
    assert_eq!(t.center(50.0), (125.0, 65.0));
    assert!(t.contains(100.0, 40.0, 50.0)); // corner is inclusive
    assert!(t.contains(150.0, 90.0, 50.0));
    assert!(!t.contains(150.1, 60.0, 50.0));
    assert!(!t.contains(120.0, 39.9, 50.0));
}

#[test]
fn phase_exposes_timers_only_when_active() {
    assert!(Phase::Idle.timers().is_none());
    assert!(Phase::Ended.timers().is_none());
    let active = Phase::Active(Timers::armed(0.25));
    assert!(active.is_active());
    let timers = active.timers().expect("active phase carries timers");
    assert_eq!(timers.countdown_frames, 0);
    assert_eq!(timers.spawn_frames, 0);
    assert_eq!(timers.spawn_jitter, 0.25);
}

#[test]
fn viewport_midpoint() {
    let v = Viewport::new(780.0, 500.0);
    assert_eq!(v.mid_x(), 390.0);
}

#[test]
fn round_state_clone_is_independent() {
    let original = RoundState {
        turkeys: vec![turkey(0, 10.0, 10.0)],
        feedback: Vec::new(),
        score: 20,
        best_score: 40,
        time_remaining: 30,
        phase: Phase::Active(Timers::armed(0.5)),
        frame: 99,
        next_id: 1,
        viewport: Viewport::new(800.0, 500.0),
        config: GameConfig::default(),
    };

    let mut cloned = original.clone();
    cloned.turkeys[0].hit = true;
    cloned.score = 30;
    cloned.phase = Phase::Ended;

    assert!(!original.turkeys[0].hit);
    assert_eq!(original.score, 20);
    assert!(original.phase.is_active());
}

#[test]
fn round_state_lookup_by_id() {
    let state = RoundState {
        turkeys: vec![turkey(3, 0.0, 0.0), turkey(8, 60.0, 0.0)],
        feedback: Vec::new(),
        score: 0,
        best_score: 0,
        time_remaining: 60,
        phase: Phase::Idle,
        frame: 0,
        next_id: 9,
        viewport: Viewport::new(800.0, 500.0),
        config: GameConfig::default(),
    };
    assert_eq!(state.turkey(TurkeyId(8)).map(|t| t.x), Some(60.0));
    assert!(state.turkey(TurkeyId(4)).is_none());
}
