//! Sky Flap - A one-button side-scrolling flyer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Drives the simulation with a fixed timestep and persists the best score
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input translation and frame timing
//! - `persistence`: Best score storage
//! - `audio`: Procedural sound effects
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{ConfigError, Surface, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, all per-tick constants assume it)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Height of the ground strip at the bottom of the surface
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 30.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (pixels/tick, negative is up)
    pub const IMPULSE: f32 = -9.0;
    /// Display rotation per unit of vertical velocity
    pub const ROTATION_FACTOR: f32 = 0.05;
    /// Display rotation limit (radians)
    pub const MAX_ROTATION: f32 = 0.5;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_SEGMENT_HEIGHT: f32 = 400.0;
    pub const PIPE_GAP: f32 = 160.0;
    /// Gap offset range; the top segment starts this far above the surface
    pub const PIPE_MIN_Y: f32 = -200.0;
    pub const PIPE_MAX_Y: f32 = -100.0;
    /// Scroll speed (pixels/tick)
    pub const PIPE_SPEED: f32 = 3.0;
    /// Ticks between pipe spawns
    pub const PIPE_SPAWN_INTERVAL: u64 = 120;

    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE: u32 = 30;
    pub const FLAP_BURST: usize = 5;
    pub const SCORE_BURST: usize = 8;
    pub const CRASH_BURST: usize = 20;

    /// Ticks the score stays "popped" after a point (~300 ms)
    pub const SCORE_POP_TICKS: u32 = 18;

    /// Background decoration
    pub const CLOUD_COUNT: usize = 5;
    pub const MOUNTAIN_COUNT: usize = 3;
    pub const MOUNTAIN_SPACING: f32 = 200.0;
    /// Full width of a mountain pair (main peak plus the smaller one behind)
    pub const MOUNTAIN_SPAN: f32 = 250.0;
    pub const MOUNTAIN_SPEED: f32 = 0.3;
}
