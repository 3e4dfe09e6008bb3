//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipes in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod machine;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use machine::{Resolution, resolve, start_game};
pub use state::{
    Bird, Cloud, GameEvent, GamePhase, GameState, Impact, Mountain, Particle, Pipe, Snapshot,
};
pub use tick::{TickInput, animate_ambient, apply_impulse, tick};
