use glam::Vec2;

use crate::config::{FieldConfig, ReturnProfile};
use crate::ecs::components::{Appearance, Home, ParticleId, Position, Velocity, Viewport};
use crate::ecs::systems::{self, TickStats};
use crate::pointer::PointerReading;

/// Smallest dot diameter in pixels.
const MIN_SIZE: f32 = 2.0;
/// Spread added on top of `MIN_SIZE`.
const SIZE_SPREAD: f32 = 4.0;

/// What the render port receives for each particle, once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDescriptor {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

/// The particle store: every particle with its home, created once and
/// mutated in place each tick.
pub struct ParticleField {
    world: hecs::World,
    profile: ReturnProfile,
    opacity: f32,
    len: usize,
}

impl ParticleField {
    /// Build a field with homes sampled uniformly over `viewport`.
    pub fn new(config: &FieldConfig, viewport: Viewport) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self::with_rng(config, viewport, rng)
    }

    /// Build a field drawing from a caller-supplied RNG.
    pub fn with_rng(config: &FieldConfig, viewport: Viewport, mut rng: fastrand::Rng) -> Self {
        let mut field = Self::empty(config.profile, config.opacity);
        field.spawn_particles(config.particle_count, viewport, &mut rng);
        log::info!(
            "Spawned {} particles over {}x{} ({} return)",
            field.len,
            viewport.width,
            viewport.height,
            field.profile.label(),
        );
        field
    }

    fn spawn_particles(&mut self, count: usize, viewport: Viewport, rng: &mut fastrand::Rng) {
        for i in 0..count {
            let home = Vec2::new(rng.f32() * viewport.width, rng.f32() * viewport.height);
            self.spawn_at(i as u32, home, home, MIN_SIZE + rng.f32() * SIZE_SPREAD);
        }
    }

    fn spawn_at(&mut self, id: u32, position: Vec2, home: Vec2, size: f32) {
        self.world.spawn((
            ParticleId(id),
            Position(position),
            Home(home),
            Velocity(Vec2::ZERO),
            Appearance { size },
        ));
        self.len += 1;
    }

    /// Add one particle at `position` resting toward `home`. Ids continue
    /// from the current count. Used to stage exact layouts.
    pub fn insert(&mut self, position: Vec2, home: Vec2, size: f32) -> u32 {
        let id = self.len as u32;
        self.spawn_at(id, position, home, size);
        id
    }

    /// A field with no particles. Fill it with [`ParticleField::insert`].
    pub fn empty(profile: ReturnProfile, opacity: f32) -> Self {
        Self {
            world: hecs::World::new(),
            profile,
            opacity,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn profile(&self) -> ReturnProfile {
        self.profile
    }

    /// Advance every particle one tick against a single pointer snapshot.
    /// An empty viewport (minimised window) freezes the field; wrapping
    /// against it would throw every particle into the top-left margin.
    pub fn step(&mut self, pointer: &PointerReading, viewport: Viewport) -> TickStats {
        if viewport.is_empty() {
            return TickStats::default();
        }
        systems::tick(&mut self.world, pointer, viewport, self.profile)
    }

    /// Fill `out` with descriptors in ascending id order.
    pub fn write_descriptors(&self, out: &mut Vec<ParticleDescriptor>) {
        out.clear();
        for (_, (id, pos, appearance)) in self
            .world
            .query::<(&ParticleId, &Position, &Appearance)>()
            .iter()
        {
            out.push(ParticleDescriptor {
                id: id.0,
                x: pos.0.x,
                y: pos.0.y,
                size: appearance.size,
                opacity: self.opacity,
            });
        }
        out.sort_unstable_by_key(|d| d.id);
    }

    pub fn descriptors(&self) -> Vec<ParticleDescriptor> {
        let mut out = Vec::with_capacity(self.len);
        self.write_descriptors(&mut out);
        out
    }

    /// Current (position, velocity, home) of a particle, if it exists.
    pub fn particle(&self, id: u32) -> Option<(Vec2, Vec2, Vec2)> {
        self.world
            .query::<(&ParticleId, &Position, &Velocity, &Home)>()
            .iter()
            .find(|(_, (pid, ..))| pid.0 == id)
            .map(|(_, (_, pos, vel, home))| (pos.0, vel.0, home.0))
    }
}
