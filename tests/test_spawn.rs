use std::f32::consts::TAU;

use turkey_hunt::config::GameConfig;
use turkey_hunt::entities::*;
use turkey_hunt::spawn::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 500.0)
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[test]
fn stages_split_round_in_thirds() {
    assert_eq!(stage_for(60, 60), Stage::Early);
    assert_eq!(stage_for(41, 60), Stage::Early);
    assert_eq!(stage_for(40, 60), Stage::Middle);
    assert_eq!(stage_for(21, 60), Stage::Middle);
    assert_eq!(stage_for(20, 60), Stage::Final);
    assert_eq!(stage_for(0, 60), Stage::Final);
}

#[test]
fn spawn_rate_never_drops_as_time_runs_out() {
    for t in 0..60 {
        assert!(
            spawn_rate(t, 60) >= spawn_rate(t + 1, 60),
            "rate at {}s is below rate at {}s",
            t,
            t + 1
        );
    }
    assert!(spawn_rate(5, 60) > spawn_rate(55, 60));
}

#[test]
fn variant_pool_grows_each_stage() {
    assert_eq!(policy(Stage::Early).variants, &[Variant::Normal]);
    assert_eq!(policy(Stage::Middle).variants, &[Variant::Normal, Variant::Fast]);
    assert_eq!(
        policy(Stage::Final).variants,
        &[Variant::Normal, Variant::Fast, Variant::Erratic]
    );
}

#[test]
fn interval_frames_follow_jitter_and_stage() {
    let config = GameConfig::default(); // 60 Hz, 60 s
    assert_eq!(spawn_interval_frames(60, 0.0, &config), 60);
    assert_eq!(spawn_interval_frames(60, 1.0, &config), 180);
    assert_eq!(spawn_interval_frames(30, 0.5, &config), 84);
    assert_eq!(spawn_interval_frames(10, 0.0, &config), 24);
}

#[test]
fn interval_tracks_the_live_clock() {
    // Same jitter, later in the round: the wait shrinks
    let config = GameConfig::default();
    let early = spawn_interval_frames(45, 0.7, &config);
    let late = spawn_interval_frames(15, 0.7, &config);
    assert!(late < early);
}

#[test]
fn spawn_due_once_interval_elapses() {
    let config = GameConfig::default();
    let mut timers = Timers::armed(0.0); // 60 frames in the early stage
    timers.spawn_frames = 59;
    assert!(!spawn_due(&timers, 60, &config));
    timers.spawn_frames = 60;
    assert!(spawn_due(&timers, 60, &config));
}

#[test]
fn batch_sizes_per_stage() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        assert_eq!(batch_size(Stage::Early, &mut rng), 1);
        assert_eq!(batch_size(Stage::Middle, &mut rng), 1);
        let b = batch_size(Stage::Final, &mut rng);
        assert!((1..=2).contains(&b));
    }
}

#[test]
fn pick_variant_stays_in_pool() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        assert_eq!(pick_variant(Stage::Early, &mut rng), Variant::Normal);
        assert_ne!(pick_variant(Stage::Middle, &mut rng), Variant::Erratic);
    }
}

// ── Specs ─────────────────────────────────────────────────────────────────────

#[test]
fn roll_spec_is_reproducible_with_same_seed() {
    let a = roll_spec(Variant::Erratic, &mut StdRng::seed_from_u64(9));
    let b = roll_spec(Variant::Erratic, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
}

#[test]
fn roll_spec_speed_in_variant_range() {
    let mut rng = seeded_rng();
    for variant in [Variant::Normal, Variant::Fast, Variant::Erratic] {
        let range = speed_range(variant);
        for _ in 0..200 {
            let spec = roll_spec(variant, &mut rng);
            assert!(range.contains(&spec.speed), "{:?} speed {}", variant, spec.speed);
            assert_eq!(spec.variant, variant);
        }
    }
}

#[test]
fn phase_offset_only_for_erratic() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        assert!(roll_spec(Variant::Normal, &mut rng).phase_offset.is_none());
        assert!(roll_spec(Variant::Fast, &mut rng).phase_offset.is_none());
        let offset = roll_spec(Variant::Erratic, &mut rng)
            .phase_offset
            .expect("erratic turkeys carry a phase offset");
        assert!((0.0..TAU).contains(&offset));
    }
}

#[test]
fn roll_spec_uses_every_direction() {
    let mut rng = seeded_rng();
    let mut seen = Vec::new();
    for _ in 0..300 {
        let d = roll_spec(Variant::Normal, &mut rng).direction;
        if !seen.contains(&d) {
            seen.push(d);
        }
    }
    assert_eq!(seen.len(), Direction::ALL.len());
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn spawn_position_always_offscreen_but_inside_buffer() {
    let config = GameConfig::default();
    let v = viewport();
    let size = config.turkey_size;
    let buffer = config.offscreen_buffer;
    let mut rng = seeded_rng();
    for direction in Direction::ALL {
        for _ in 0..100 {
            let (x, y) = spawn_position(direction, &v, &config, &mut rng);
            let outside = x + size <= 0.0 || x >= v.width || y + size <= 0.0 || y >= v.height;
            assert!(outside, "{:?} spawned visible at ({}, {})", direction, x, y);
            assert!(x >= -buffer && x <= v.width + buffer);
            assert!(y >= -buffer && y <= v.height + buffer);
        }
    }
}

#[test]
fn spawn_side_matches_direction() {
    let config = GameConfig::default();
    let v = viewport();
    let mut rng = seeded_rng();
    let (x, _) = spawn_position(Direction::Right, &v, &config, &mut rng);
    assert!(x < 0.0);
    let (x, _) = spawn_position(Direction::Left, &v, &config, &mut rng);
    assert!(x >= v.width);
    let (_, y) = spawn_position(Direction::Down, &v, &config, &mut rng);
    assert!(y < 0.0);
    let (_, y) = spawn_position(Direction::Up, &v, &config, &mut rng);
    assert!(y >= v.height);
}

#[test]
fn perpendicular_coordinate_within_visible_range() {
    let config = GameConfig::default();
    let v = viewport();
    let size = config.turkey_size;
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let (_, y) = spawn_position(Direction::Left, &v, &config, &mut rng);
        assert!(y >= 0.0 && y <= v.height - size);
        let (x, _) = spawn_position(Direction::Up, &v, &config, &mut rng);
        assert!(x >= 0.0 && x <= v.width - size);
        let (_, y) = spawn_position(Direction::DiagonalUp, &v, &config, &mut rng);
        assert!(y >= v.height / 2.0, "diagonal climbers start low");
        let (_, y) = spawn_position(Direction::DiagonalDown, &v, &config, &mut rng);
        assert!(y <= v.height / 2.0, "diagonal divers start high");
    }
}

#[test]
fn tiny_viewport_still_places_turkeys() {
    let config = GameConfig::default();
    let v = Viewport::new(30.0, 30.0); // smaller than a turkey
    let mut rng = seeded_rng();
    for direction in Direction::ALL {
        let (x, y) = spawn_position(direction, &v, &config, &mut rng);
        assert!(x.is_finite() && y.is_finite());
    }
}

#[test]
fn build_turkey_copies_attributes() {
    let spec = TurkeySpec {
        speed: 2.5,
        direction: Direction::Up,
        variant: Variant::Fast,
        phase_offset: None,
    };
    let t = build_turkey(TurkeyId(4), spec, (10.0, 600.0));
    assert_eq!(t.id, TurkeyId(4));
    assert_eq!((t.x, t.y), (10.0, 600.0));
    assert_eq!(t.speed, 2.5);
    assert_eq!(t.direction, Direction::Up);
    assert_eq!(t.variant, Variant::Fast);
    assert!(!t.hit);
}
