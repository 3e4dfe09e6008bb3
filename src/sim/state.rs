//! Game state and core simulation types
//!
//! Plain entity records plus the `GameState` aggregate that owns them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::{Surface, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    #[default]
    Menu,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a restart
    GameOver,
}

/// What the bird hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Ground,
    Pipe { id: u32 },
}

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A flap set the bird's velocity
    ImpulseApplied,
    /// The bird passed a pipe's trailing edge
    ObstacleCleared { pipe_id: u32 },
    /// The bird hit the ground or a pipe
    Collided(Impact),
}

/// Particle colors
pub mod palette {
    /// Flap sparkle (#FFD700)
    pub const FLAP: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    /// Point scored (#4ECDC4)
    pub const SCORE: [f32; 4] = [0.306, 0.804, 0.769, 1.0];
    /// Crash (#FF6B6B)
    pub const CRASH: [f32; 4] = [1.0, 0.42, 0.42, 1.0];
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Center of the bounding box; x never changes
    pub pos: Vec2,
    /// Vertical velocity (pixels/tick, +y is down)
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    /// Display rotation derived from velocity (radians); never used for collision
    pub rotation: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning, surface: &Surface) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, surface.height / 2.0),
            velocity: 0.0,
            width: tuning.bird_width,
            height: tuning.bird_height,
            rotation: 0.0,
        }
    }

    /// Back to the starting height, at rest
    pub fn reset(&mut self, surface: &Surface) {
        self.pos.y = surface.height / 2.0;
        self.velocity = 0.0;
        self.rotation = 0.0;
    }

    /// Unrotated collision box
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(self.width, self.height))
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }
}

/// A pair of blocking segments with a gap between them
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Top of the upper segment (usually above the surface)
    pub y: f32,
    pub width: f32,
    /// Height of the upper segment
    pub segment_height: f32,
    /// Vertical opening between the segments
    pub gap: f32,
    /// Set once the bird has passed the trailing edge
    pub scored: bool,
}

impl Pipe {
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the upper segment
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.y + self.segment_height
    }

    /// Top edge of the lower segment
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top() + self.gap
    }

    /// Upper segment, unbounded above so the bird cannot fly over it
    pub fn top_bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, f32::NEG_INFINITY),
            Vec2::new(self.trailing_edge(), self.gap_top()),
        )
    }

    /// Lower segment runs to the bottom of the surface
    pub fn bottom_bounds(&self, surface_height: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom()),
            Vec2::new(self.trailing_edge(), surface_height.max(self.gap_bottom())),
        )
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: [f32; 4],
    /// Ticks remaining
    pub life: u32,
}

/// Background cloud
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub speed: f32,
}

/// Background mountain pair
#[derive(Debug, Clone, PartialEq)]
pub struct Mountain {
    pub x: f32,
    pub height: f32,
    pub speed: f32,
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub surface: Surface,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Points in the current run
    pub score: u32,
    /// Best score across sessions
    pub best_score: u32,
    /// Simulation tick counter (reset each run)
    pub time_ticks: u64,
    /// Remaining ticks of the score "pop" feedback
    pub score_pop_ticks: u32,
    pub bird: Bird,
    /// Active pipes in creation order
    pub pipes: Vec<Pipe>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub clouds: Vec<Cloud>,
    pub mountains: Vec<Mountain>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a session in the menu with fresh decorations
    pub fn new(seed: u64, surface: Surface, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: rng.random::<f32>() * surface.width,
                y: rng.random::<f32>() * 200.0 + 50.0,
                width: rng.random::<f32>() * 100.0 + 50.0,
                speed: rng.random::<f32>() * 0.5 + 0.2,
            })
            .collect();

        let mountains = (0..MOUNTAIN_COUNT)
            .map(|i| Mountain {
                x: i as f32 * MOUNTAIN_SPACING,
                height: rng.random::<f32>() * 100.0 + 50.0,
                speed: MOUNTAIN_SPEED,
            })
            .collect();

        Self {
            bird: Bird::new(&tuning, &surface),
            surface,
            tuning,
            phase: GamePhase::Menu,
            score: 0,
            best_score: 0,
            time_ticks: 0,
            score_pop_ticks: 0,
            pipes: Vec::new(),
            particles: Vec::new(),
            clouds,
            mountains,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a pipe at the right edge with a random gap offset
    pub fn spawn_pipe(&mut self) {
        let id = self.next_entity_id();
        let y = self
            .rng
            .random_range(self.tuning.pipe_min_y..self.tuning.pipe_max_y);
        self.pipes.push(Pipe {
            id,
            x: self.surface.width,
            y,
            width: self.tuning.pipe_width,
            segment_height: self.tuning.pipe_segment_height,
            gap: self.tuning.pipe_gap,
            scored: false,
        });
    }

    /// Spawn a burst of particles with random velocities
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize, color: [f32; 4]) {
        let life = self.tuning.particle_life;
        for _ in 0..count {
            let size = self.rng.random::<f32>() * 4.0 + 2.0;
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 8.0,
                (self.rng.random::<f32>() - 0.5) * 8.0,
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                size,
                color,
                life,
            });
        }
    }

    /// Change the drawable area (no guarantees for a run in progress)
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            bird: &self.bird,
            pipes: &self.pipes,
            particles: &self.particles,
            clouds: &self.clouds,
            mountains: &self.mountains,
            time_ticks: self.time_ticks,
            score: self.score,
            best_score: self.best_score,
            phase: self.phase,
            score_pop_ticks: self.score_pop_ticks,
            surface: self.surface,
            tuning: &self.tuning,
        }
    }
}

/// Borrowed, read-only view of everything a frame needs
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub particles: &'a [Particle],
    pub clouds: &'a [Cloud],
    pub mountains: &'a [Mountain],
    pub time_ticks: u64,
    pub score: u32,
    pub best_score: u32,
    pub phase: GamePhase,
    pub score_pop_ticks: u32,
    pub surface: Surface,
    pub tuning: &'a Tuning,
}
