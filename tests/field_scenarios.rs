use std::time::Duration;

use driftfield::ecs::systems::force::{self, ForceMode};
use driftfield::ecs::systems::movement::{max_speed, WRAP_MARGIN};
use driftfield::pointer::POINTER_SENTINEL;
use driftfield::{
    FieldConfig, ParticleDescriptor, ParticleField, PointerTracker, RenderPort, ReturnProfile,
    Scheduler, Viewport,
};
use glam::Vec2;
use instant::Instant;

/// Roughly one display frame.
const FRAME: Duration = Duration::from_millis(16);

fn view() -> Viewport {
    Viewport::new(800.0, 600.0)
}

/// Field holding a single particle at `pos` whose home is `home`.
fn single(pos: Vec2, home: Vec2, profile: ReturnProfile) -> ParticleField {
    let mut field = ParticleField::empty(profile, 0.7);
    field.insert(pos, home, 3.0);
    field
}

fn state(field: &ParticleField) -> (Vec2, Vec2, Vec2) {
    field.particle(0).expect("particle 0 exists")
}

#[derive(Default)]
struct RecordingPort {
    frames: Vec<Vec<ParticleDescriptor>>,
}

impl RenderPort for RecordingPort {
    fn present(&mut self, particles: &[ParticleDescriptor]) {
        self.frames.push(particles.to_vec());
    }
}

// ==================================================================================
// Properties
// ==================================================================================

#[test]
fn speed_never_exceeds_cap_and_positions_stay_in_bounds() {
    let cfg = FieldConfig {
        seed: Some(0xD1F7),
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(&cfg, view());
    let mut pointer = PointerTracker::new();
    let mut rng = fastrand::Rng::with_seed(11);
    let t0 = Instant::now();

    for tick in 0..900u32 {
        let now = t0 + FRAME * tick;

        // Wander for a while, click now and then, go quiet, leave.
        match tick {
            0..=399 => {
                if tick % 3 == 0 {
                    pointer.on_pointer_move(rng.f32() * 800.0, rng.f32() * 600.0, now);
                }
                if tick % 40 == 0 {
                    pointer.on_pointer_down(now);
                }
            }
            400 => pointer.on_pointer_leave(),
            _ => {}
        }

        let reading = pointer.refresh(now);
        field.step(&reading, view());

        let cap = max_speed(reading.active);
        for d in field.descriptors() {
            let (pos, vel, _) = field.particle(d.id).unwrap();
            assert!(vel.length() <= cap + 1e-4, "tick {tick}: |v|={} > {cap}", vel.length());
            assert!(pos.is_finite());
            assert!(pos.x >= -WRAP_MARGIN && pos.x <= 800.0 + WRAP_MARGIN);
            assert!(pos.y >= -WRAP_MARGIN && pos.y <= 600.0 + WRAP_MARGIN);
        }
    }
}

#[test]
fn cursor_on_top_of_particle_never_produces_nan() {
    let home = Vec2::new(400.0, 300.0);
    let mut field = single(home, home, ReturnProfile::Gentle);
    let mut pointer = PointerTracker::new();
    let t0 = Instant::now();
    pointer.on_pointer_down(t0);

    for tick in 0..20u32 {
        let now = t0 + FRAME * tick;
        pointer.on_pointer_move(400.0, 300.0, now);
        let reading = pointer.refresh(now);
        let stats = field.step(&reading, view());
        assert_eq!(stats.count(ForceMode::Coincident), 1);

        let (pos, vel, _) = state(&field);
        assert!(pos.is_finite() && vel.is_finite());
        assert_eq!(pos, home);
    }
}

#[test]
fn idle_particle_converges_monotonically_and_snaps_home() {
    let home = Vec2::new(400.0, 300.0);

    for start in [Vec2::new(460.0, 300.0), Vec2::new(400.0, 380.0), Vec2::new(250.0, 150.0)] {
        let mut field = single(start, home, ReturnProfile::Gentle);
        let mut pointer = PointerTracker::new();
        let t0 = Instant::now();

        let mut last = start.distance(home);
        let mut snapped_at = None;
        for tick in 0..400u32 {
            let reading = pointer.refresh(t0 + FRAME * tick);
            field.step(&reading, view());
            let (pos, vel, _) = state(&field);
            let d = pos.distance(home);
            assert!(d <= last + 1e-3, "distance grew from {last} to {d}");
            last = d;
            if pos == home && vel == Vec2::ZERO {
                snapped_at = Some(tick);
                break;
            }
        }
        assert!(snapped_at.is_some(), "never snapped home from {start}");
    }
}

#[test]
fn brisk_profile_also_settles_exactly() {
    let home = Vec2::new(400.0, 300.0);
    let mut field = single(Vec2::new(250.0, 150.0), home, ReturnProfile::Brisk);
    let mut pointer = PointerTracker::new();
    let t0 = Instant::now();

    for tick in 0..400u32 {
        let reading = pointer.refresh(t0 + FRAME * tick);
        field.step(&reading, view());
    }
    let (pos, vel, _) = state(&field);
    assert_eq!(pos, home);
    assert_eq!(vel, Vec2::ZERO);
}

#[test]
fn click_repels_only_inside_window() {
    let home = Vec2::new(400.0, 300.0);
    let cursor = Vec2::new(450.0, 300.0);
    let t0 = Instant::now();

    // Inside the window: pushed away from the cursor.
    let mut field = single(home, home, ReturnProfile::Gentle);
    let mut pointer = PointerTracker::new();
    pointer.on_pointer_down(t0);
    let now = t0 + Duration::from_millis(50);
    pointer.on_pointer_move(cursor.x, cursor.y, now);
    let stats = field.step(&pointer.refresh(now), view());
    assert_eq!(stats.count(ForceMode::Repel), 1);
    assert!(state(&field).1.x < 0.0);

    // Window elapsed: pulled toward the cursor again.
    let mut field = single(home, home, ReturnProfile::Gentle);
    let now = t0 + Duration::from_millis(150);
    pointer.on_pointer_move(cursor.x, cursor.y, now);
    let stats = field.step(&pointer.refresh(now), view());
    assert_eq!(stats.count(ForceMode::Repel), 0);
    assert_eq!(stats.count(ForceMode::Attract), 1);
    assert!(state(&field).1.x > 0.0);
}

#[test]
fn wrap_happens_on_the_same_tick() {
    let t0 = Instant::now();
    // (start on the margin, cursor just beyond it, expected position after wrap)
    let cases = [
        (Vec2::new(820.0, 300.0), Vec2::new(900.0, 300.0), Vec2::new(-20.0, 300.0)),
        (Vec2::new(-20.0, 300.0), Vec2::new(-100.0, 300.0), Vec2::new(820.0, 300.0)),
        (Vec2::new(400.0, 620.0), Vec2::new(400.0, 700.0), Vec2::new(400.0, -20.0)),
        (Vec2::new(400.0, -20.0), Vec2::new(400.0, -100.0), Vec2::new(400.0, 620.0)),
    ];

    for (start, cursor, expected) in cases {
        let mut field = single(start, Vec2::new(400.0, 300.0), ReturnProfile::Gentle);
        let mut pointer = PointerTracker::new();
        pointer.on_pointer_move(cursor.x, cursor.y, t0);
        let stats = field.step(&pointer.refresh(t0), view());
        assert_eq!(stats.count(ForceMode::Attract), 1);

        let (pos, _, _) = state(&field);
        assert_eq!(pos, expected, "start {start} cursor {cursor}");
    }
}

// ==================================================================================
// Scenarios
// ==================================================================================

#[test]
fn scenario_a_resting_particle_without_pointer_stays_put() {
    let home = Vec2::new(400.0, 300.0);
    let mut field = single(home, home, ReturnProfile::Gentle);
    let mut pointer = PointerTracker::new();
    let t0 = Instant::now();

    assert!(!view().contains(POINTER_SENTINEL));

    for tick in 0..1000u32 {
        let now = t0 + FRAME * tick;
        assert!(!pointer.is_active(now));
        let stats = field.step(&pointer.refresh(now), view());
        assert_eq!(stats.count(ForceMode::IdleReturn), 1);

        let (pos, vel, _) = state(&field);
        assert_eq!(pos, home);
        assert_eq!(vel, Vec2::ZERO);
    }
}

/// Scenario B: pointer parked 20px right of the particle and kept alive.
/// Returns the settled field, tracker and the time of the last tick.
fn run_scenario_b(ticks: u32) -> (ParticleField, PointerTracker, Instant) {
    let home = Vec2::new(400.0, 300.0);
    let mut field = single(home, home, ReturnProfile::Gentle);
    let mut pointer = PointerTracker::new();
    let t0 = Instant::now();

    let mut prev_vx = 0.0;
    let mut now = t0;
    for tick in 0..ticks {
        now = t0 + FRAME * tick;
        pointer.on_pointer_move(420.0, 300.0, now);
        let reading = pointer.refresh(now);
        let stats = field.step(&reading, view());

        let (pos, vel, _) = state(&field);
        assert!(vel.length() <= 4.0 + 1e-5);
        assert_eq!(pos.y, 300.0);
        assert!(pos.x < 430.0, "overshot to {}", pos.x);

        if tick < 10 {
            assert_eq!(stats.count(ForceMode::Attract), 1);
            assert!(vel.x > prev_vx, "vx stalled at tick {tick}");
            prev_vx = vel.x;
        }
    }
    (field, pointer, now)
}

#[test]
fn scenario_b_active_pointer_attracts() {
    let (field, _, _) = run_scenario_b(400);
    let (pos, _, _) = state(&field);
    assert!((pos.x - 420.0).abs() < 2.0, "settled at {}", pos.x);
}

#[test]
fn scenario_c_click_reverses_then_restores_attraction() {
    let (mut field, mut pointer, settled) = run_scenario_b(400);
    let cursor = Vec2::new(420.0, 300.0);
    let click = settled + FRAME;
    pointer.on_pointer_down(click);

    // Every tick inside the window pushes outward.
    for ms in [16u64, 64, 112, 149] {
        let now = click + Duration::from_millis(ms);
        pointer.on_pointer_move(cursor.x, cursor.y, now);
        let reading = pointer.refresh(now);
        let (pos, _, home) = state(&field);
        let f = force::acceleration(pos, home, &reading, ReturnProfile::Gentle);
        assert_eq!(f.mode, ForceMode::Repel);
        assert!(f.accel.dot(pos - cursor) > 0.0);
        field.step(&reading, view());
    }

    // Window over, cursor still active and in range: attraction again.
    let now = click + Duration::from_millis(160);
    pointer.on_pointer_move(cursor.x, cursor.y, now);
    let reading = pointer.refresh(now);
    let (pos, _, home) = state(&field);
    let f = force::acceleration(pos, home, &reading, ReturnProfile::Gentle);
    assert_eq!(f.mode, ForceMode::Attract);
    assert!(f.accel.dot(cursor - pos) > 0.0);
}

// ==================================================================================
// Scheduler
// ==================================================================================

#[test]
fn scheduler_publishes_ordered_descriptors_until_stopped() {
    let cfg = FieldConfig {
        particle_count: 12,
        seed: Some(5),
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(&cfg, view());
    let mut pointer = PointerTracker::new();
    let mut port = RecordingPort::default();
    let t0 = Instant::now();

    {
        let mut scheduler = Scheduler::new();
        scheduler.start();
        for tick in 0..5u32 {
            scheduler.frame(t0 + FRAME * tick, view(), &mut field, &mut pointer, &mut port);
        }
        scheduler.stop();
        scheduler.frame(t0 + FRAME * 6, view(), &mut field, &mut pointer, &mut port);
    }

    assert_eq!(port.frames.len(), 5);
    for frame in &port.frames {
        let ids: Vec<u32> = frame.iter().map(|d| d.id).collect();
        assert_eq!(ids, (0..12).collect::<Vec<_>>());
        assert!(frame.iter().all(|d| (d.opacity - 0.7).abs() < f32::EPSILON));
    }
}

#[test]
fn minimised_viewport_freezes_field() {
    let cfg = FieldConfig {
        seed: Some(0x5EED),
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(&cfg, view());
    let mut pointer = PointerTracker::new();
    let t0 = Instant::now();
    pointer.on_pointer_move(420.0, 300.0, t0);
    let before = field.descriptors();

    // A few frames while the window reports 0x0, pointer still active.
    let minimised = Viewport::new(0.0, 0.0);
    for tick in 0..5u32 {
        let now = t0 + FRAME * tick;
        pointer.on_pointer_move(420.0, 300.0, now);
        let stats = field.step(&pointer.refresh(now), minimised);
        assert_eq!(stats.count(ForceMode::Attract), 0);
    }
    assert_eq!(field.descriptors(), before);
    for d in &before {
        assert!(view().contains(Vec2::new(d.x, d.y)));
    }
}

#[test]
fn pointer_going_stale_switches_field_to_idle_regime() {
    let home = Vec2::new(400.0, 300.0);
    let mut field = single(home, home, ReturnProfile::Gentle);
    let mut pointer = PointerTracker::new();
    let t0 = Instant::now();

    pointer.on_pointer_move(500.0, 300.0, t0);
    let stats = field.step(&pointer.refresh(t0 + Duration::from_millis(200)), view());
    assert_eq!(stats.count(ForceMode::Attract), 1);

    // No further moves: the pointer decays without ever leaving.
    let stats = field.step(&pointer.refresh(t0 + Duration::from_millis(216)), view());
    assert_eq!(stats.count(ForceMode::IdleReturn), 1);
    assert!(state(&field).1.length() <= 1.25 + 1e-5);
}
