use glam::Vec2;

use crate::config::ReturnProfile;
use crate::pointer::PointerReading;

/// Distance within which an active cursor pulls particles in.
pub const ATTRACTION_RADIUS: f32 = 400.0;
/// Peak pull at zero distance, falling off linearly to the radius.
pub const ATTRACTION_STRENGTH: f32 = 0.25;
/// Distance within which a click pushes particles away.
pub const REPULSION_RADIUS: f32 = 300.0;
/// Peak push at zero distance.
pub const REPULSION_STRENGTH: f32 = 10.0;
/// Idle particles head home this many times faster than active-but-far ones.
pub const INACTIVE_RETURN_MULTIPLIER: f32 = 4.0;

/// Which rule produced a particle's acceleration this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ForceMode {
    Repel,
    Attract,
    /// Cursor active but out of attraction range.
    ReturnHome,
    /// Cursor idle or gone.
    IdleReturn,
    /// Cursor sits exactly on the particle; no direction to push or pull.
    Coincident,
}

impl ForceMode {
    pub const ALL: [ForceMode; 5] = [
        Self::Repel,
        Self::Attract,
        Self::ReturnHome,
        Self::IdleReturn,
        Self::Coincident,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Repel => "repel",
            Self::Attract => "attract",
            Self::ReturnHome => "return",
            Self::IdleReturn => "idle",
            Self::Coincident => "coincident",
        }
    }
}

/// Acceleration for one particle plus the branch that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    pub mode: ForceMode,
    pub accel: Vec2,
}

/// Map one particle's state and the tick's pointer reading to an acceleration.
pub fn acceleration(
    position: Vec2,
    home: Vec2,
    pointer: &PointerReading,
    profile: ReturnProfile,
) -> Force {
    let to_home = home - position;

    if !pointer.active {
        return Force {
            mode: ForceMode::IdleReturn,
            accel: to_home * profile.return_strength() * INACTIVE_RETURN_MULTIPLIER,
        };
    }

    let to_cursor = pointer.position - position;
    let distance = to_cursor.length();

    // Zero distance has no direction. Skip the tick rather than divide by it.
    if distance <= 0.0 {
        return Force {
            mode: ForceMode::Coincident,
            accel: Vec2::ZERO,
        };
    }

    let dir = to_cursor / distance;

    if pointer.repelling && distance < REPULSION_RADIUS {
        let falloff = (REPULSION_RADIUS - distance) / REPULSION_RADIUS;
        return Force {
            mode: ForceMode::Repel,
            accel: -dir * falloff * REPULSION_STRENGTH,
        };
    }

    if distance < ATTRACTION_RADIUS {
        let falloff = (ATTRACTION_RADIUS - distance) / ATTRACTION_RADIUS;
        return Force {
            mode: ForceMode::Attract,
            accel: dir * falloff * ATTRACTION_STRENGTH,
        };
    }

    Force {
        mode: ForceMode::ReturnHome,
        accel: to_home * profile.return_strength(),
    }
}
