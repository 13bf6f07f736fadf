use std::time::Duration;

use glam::Vec2;
use instant::Instant;

/// Cursor position reported while no pointer is over the viewport.
/// Far enough off-screen that it can never be mistaken for a real cursor.
pub const POINTER_SENTINEL: Vec2 = Vec2::new(-1000.0, -1000.0);
/// A pointer that hasn't moved for longer than this counts as idle.
pub const CURSOR_INACTIVE_DELAY: Duration = Duration::from_millis(200);
/// How long after a pointer-down particles are pushed away.
pub const REPULSION_WINDOW: Duration = Duration::from_millis(150);

/// What the force model sees of the pointer for one tick.
/// Taken once per tick so every particle reads the same values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerReading {
    pub position: Vec2,
    pub active: bool,
    pub repelling: bool,
}

impl PointerReading {
    /// Reading for a field with no pointer anywhere near it.
    pub fn absent() -> Self {
        Self {
            position: POINTER_SENTINEL,
            active: false,
            repelling: false,
        }
    }
}

/// Single shared pointer state, written by input callbacks.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    position: Vec2,
    active: bool,
    last_move: Option<Instant>,
    last_down: Option<Instant>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            position: POINTER_SENTINEL,
            active: false,
            last_move: None,
            last_down: None,
        }
    }

    /// Pointer moved inside the viewport.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, now: Instant) {
        if !self.active {
            log::debug!("Pointer active at ({x:.0}, {y:.0})");
        }
        self.position = Vec2::new(x, y);
        self.last_move = Some(now);
        self.active = true;
    }

    /// Pointer left the viewport.
    pub fn on_pointer_leave(&mut self) {
        log::debug!("Pointer left viewport");
        self.position = POINTER_SENTINEL;
        self.active = false;
    }

    /// Button pressed. Only the timing matters.
    pub fn on_pointer_down(&mut self, now: Instant) {
        log::debug!("Pointer down, repelling for {:?}", REPULSION_WINDOW);
        self.last_down = Some(now);
    }

    /// True iff the pointer is present and moved within the inactivity delay.
    pub fn is_active(&self, now: Instant) -> bool {
        self.active
            && self
                .last_move
                .is_some_and(|t| now.saturating_duration_since(t) <= CURSOR_INACTIVE_DELAY)
    }

    /// True for the window immediately following a pointer-down.
    pub fn is_repelling(&self, now: Instant) -> bool {
        self.last_down
            .is_some_and(|t| now.saturating_duration_since(t) < REPULSION_WINDOW)
    }

    /// Per-tick staleness check. Decays a still pointer to idle and returns
    /// the snapshot the whole tick works from.
    pub fn refresh(&mut self, now: Instant) -> PointerReading {
        if self.active && !self.is_active(now) {
            log::debug!("Pointer idle");
            self.active = false;
        }
        PointerReading {
            position: self.position,
            active: self.active,
            repelling: self.is_repelling(now),
        }
    }
}
