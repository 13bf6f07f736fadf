pub mod force;
pub mod movement;

use crate::config::ReturnProfile;
use crate::ecs::components::{Home, Position, Velocity, Viewport};
use crate::pointer::PointerReading;
use force::ForceMode;

/// Per-tick tally of which force rule each particle followed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub modes: [u32; ForceMode::ALL.len()],
    pub snapped: u32,
}

impl TickStats {
    pub fn count(&self, mode: ForceMode) -> u32 {
        self.modes[mode as usize]
    }
}

/// Run force model + integrator over every particle for one tick.
/// `pointer` is read-only here, so every particle sees the same snapshot.
pub fn tick(
    world: &mut hecs::World,
    pointer: &PointerReading,
    viewport: Viewport,
    profile: ReturnProfile,
) -> TickStats {
    let mut stats = TickStats::default();

    for (_, (pos, vel, home)) in world.query_mut::<(&mut Position, &mut Velocity, &Home)>() {
        let f = force::acceleration(pos.0, home.0, pointer, profile);
        stats.modes[f.mode as usize] += 1;

        if movement::integrate(
            &mut pos.0,
            &mut vel.0,
            home.0,
            f.accel,
            pointer.active,
            viewport,
            profile,
        ) {
            stats.snapped += 1;
        }
    }

    stats
}
