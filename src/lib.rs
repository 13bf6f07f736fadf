//! Full-viewport particle field. Particles rest at random home positions,
//! drift toward an active pointer, scatter briefly after a click and settle
//! back home once the pointer goes idle or leaves.

pub mod app;
pub mod config;
pub mod ecs;
pub mod error;
pub mod field;
pub mod pointer;
pub mod render;
pub mod scheduler;

pub use config::{FieldConfig, ReturnProfile};
pub use ecs::components::Viewport;
pub use field::{ParticleDescriptor, ParticleField};
pub use pointer::{PointerReading, PointerTracker};
pub use render::RenderPort;
pub use scheduler::Scheduler;
