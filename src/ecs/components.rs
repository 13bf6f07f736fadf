use glam::Vec2;

/// Stable particle identity, assigned in spawn order starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u32);

/// Current position in viewport pixels.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Rest point the particle relaxes toward. Fixed at spawn.
#[derive(Debug, Clone, Copy)]
pub struct Home(pub Vec2);

/// Velocity in pixels per tick.
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Visual attributes sampled once at spawn.
#[derive(Debug, Clone, Copy)]
pub struct Appearance {
    /// Dot diameter in pixels.
    pub size: f32,
}

/// Viewport extent in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport (minimised window) can't host a field.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}
