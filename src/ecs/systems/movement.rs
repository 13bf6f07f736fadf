use glam::Vec2;

use crate::config::ReturnProfile;
use crate::ecs::components::Viewport;

/// Velocity damping per tick while the cursor is active.
pub const ACTIVE_DAMPING: f32 = 0.94;
/// Stronger damping while idle so the field settles quickly.
pub const IDLE_DAMPING: f32 = 0.85;
/// Speed cap while the cursor is active (px/tick).
pub const MAX_SPEED: f32 = 4.0;
/// Speed cap while idle.
pub const IDLE_MAX_SPEED: f32 = 1.25;
/// How far past an edge a particle may travel before wrapping.
pub const WRAP_MARGIN: f32 = 20.0;

/// Speed cap for the given cursor activity.
pub fn max_speed(active: bool) -> f32 {
    if active {
        MAX_SPEED
    } else {
        IDLE_MAX_SPEED
    }
}

/// Advance one particle by one tick. Returns true if it snapped home.
///
/// Order: accumulate force, damp, clamp speed, move, snap home (idle only),
/// wrap around the viewport.
pub fn integrate(
    pos: &mut Vec2,
    vel: &mut Vec2,
    home: Vec2,
    accel: Vec2,
    active: bool,
    viewport: Viewport,
    profile: ReturnProfile,
) -> bool {
    *vel += accel;
    *vel *= if active { ACTIVE_DAMPING } else { IDLE_DAMPING };

    let cap = max_speed(active);
    let speed = vel.length();
    if speed > cap {
        *vel *= cap / speed;
    }

    *pos += *vel;

    let mut snapped = false;
    if !active {
        let slow_enough = profile
            .snap_max_speed()
            .map_or(true, |limit| vel.length() < limit);
        if pos.distance(home) < profile.snap_distance() && slow_enough {
            *pos = home;
            *vel = Vec2::ZERO;
            snapped = true;
        }
    }

    wrap(pos, viewport);
    snapped
}

/// Teleport a coordinate that strayed past the margin to the opposite edge.
pub fn wrap(pos: &mut Vec2, viewport: Viewport) {
    if pos.x < -WRAP_MARGIN {
        pos.x = viewport.width + WRAP_MARGIN;
    } else if pos.x > viewport.width + WRAP_MARGIN {
        pos.x = -WRAP_MARGIN;
    }
    if pos.y < -WRAP_MARGIN {
        pos.y = viewport.height + WRAP_MARGIN;
    } else if pos.y > viewport.height + WRAP_MARGIN {
        pos.y = -WRAP_MARGIN;
    }
}
