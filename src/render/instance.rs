use bytemuck::{Pod, Zeroable};

use crate::field::ParticleDescriptor;

/// Per-instance data uploaded to GPU each frame.
/// Stride = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DotInstance {
    /// Dot center in screen pixels.
    pub position: [f32; 2],
    /// Diameter in pixels.
    pub size: f32,
    pub opacity: f32,
}

impl From<&ParticleDescriptor> for DotInstance {
    fn from(d: &ParticleDescriptor) -> Self {
        Self {
            position: [d.x, d.y],
            size: d.size,
            opacity: d.opacity,
        }
    }
}
