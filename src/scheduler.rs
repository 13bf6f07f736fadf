use instant::Instant;

use crate::ecs::components::Viewport;
use crate::ecs::systems::force::ForceMode;
use crate::ecs::systems::TickStats;
use crate::field::{ParticleDescriptor, ParticleField};
use crate::pointer::PointerTracker;
use crate::render::RenderPort;

/// Drives the field one tick per display frame.
///
/// The host asks for the next frame only while [`Scheduler::is_running`]
/// holds; [`Scheduler::stop`] is the cancellation point and also runs on drop,
/// so no frame is ever scheduled for a field that is gone.
pub struct Scheduler {
    running: bool,
    tick_count: u64,
    // Reused every frame to avoid per-frame allocation.
    descriptors: Vec<ParticleDescriptor>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            running: false,
            tick_count: 0,
            descriptors: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("Scheduler started");
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Scheduler stopped after {} ticks", self.tick_count);
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// One loop iteration: snapshot the pointer, step every particle, publish.
    /// Does nothing once stopped.
    pub fn frame(
        &mut self,
        now: Instant,
        viewport: Viewport,
        field: &mut ParticleField,
        pointer: &mut PointerTracker,
        port: &mut dyn RenderPort,
    ) -> Option<TickStats> {
        if !self.running {
            return None;
        }

        let reading = pointer.refresh(now);
        let stats = field.step(&reading, viewport);
        self.tick_count += 1;

        log::trace!(
            "tick {}: repel={} attract={} return={} idle={} coincident={} snapped={}",
            self.tick_count,
            stats.count(ForceMode::Repel),
            stats.count(ForceMode::Attract),
            stats.count(ForceMode::ReturnHome),
            stats.count(ForceMode::IdleReturn),
            stats.count(ForceMode::Coincident),
            stats.snapped,
        );

        field.write_descriptors(&mut self.descriptors);
        port.present(&self.descriptors);
        Some(stats)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
