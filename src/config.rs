use clap::{Parser, ValueEnum};

/// How many particles a field spawns by default.
pub const DEFAULT_PARTICLE_COUNT: usize = 50;
/// Reference dot opacity.
pub const DEFAULT_OPACITY: f32 = 0.7;

/// Home-return behaviour. Each profile is a complete set of return strength
/// and snap thresholds; values from different profiles are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReturnProfile {
    /// Slow settle, snaps home within 1.5px regardless of speed.
    #[default]
    Gentle,
    /// Faster pull, snaps home within 5px once slower than 0.5px/tick.
    Brisk,
}

impl ReturnProfile {
    pub fn label(self) -> &'static str {
        match self {
            ReturnProfile::Gentle => "gentle",
            ReturnProfile::Brisk => "brisk",
        }
    }

    /// Base spring constant pulling a particle toward home.
    pub fn return_strength(self) -> f32 {
        match self {
            ReturnProfile::Gentle => 0.02,
            ReturnProfile::Brisk => 0.08,
        }
    }

    /// Distance to home under which the particle may snap.
    pub fn snap_distance(self) -> f32 {
        match self {
            ReturnProfile::Gentle => 1.5,
            ReturnProfile::Brisk => 5.0,
        }
    }

    /// Speed ceiling for snapping. `None` snaps at any speed.
    pub fn snap_max_speed(self) -> Option<f32> {
        match self {
            ReturnProfile::Gentle => None,
            ReturnProfile::Brisk => Some(0.5),
        }
    }
}

/// Everything needed to build a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// RNG seed for home placement and sizes. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub profile: ReturnProfile,
    pub opacity: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            profile: ReturnProfile::default(),
            opacity: DEFAULT_OPACITY,
        }
    }
}

/// Command line for the desktop binary.
#[derive(Debug, Parser)]
#[command(name = "driftfield", version, about = "Particles that drift home and chase your pointer")]
pub struct Cli {
    /// Number of particles to spawn.
    #[arg(long, default_value_t = DEFAULT_PARTICLE_COUNT)]
    pub count: usize,

    /// Seed for reproducible layouts.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Home-return behaviour.
    #[arg(long, value_enum, default_value_t = ReturnProfile::Gentle)]
    pub profile: ReturnProfile,

    /// Dot opacity in [0, 1].
    #[arg(long, default_value_t = DEFAULT_OPACITY)]
    pub opacity: f32,
}

impl From<Cli> for FieldConfig {
    fn from(cli: Cli) -> Self {
        Self {
            particle_count: cli.count,
            seed: cli.seed,
            profile: cli.profile,
            opacity: cli.opacity.clamp(0.0, 1.0),
        }
    }
}
