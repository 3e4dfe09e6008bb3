//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from a partial JSON document.
//! Missing fields fall back to the defaults in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration error raised at startup
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Surface dimensions are unusable (zero, negative, NaN, or no room above the ground)
    InvalidSurface { width: f32, height: f32 },
    /// Tuning document failed to parse or holds inconsistent values
    InvalidTuning(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSurface { width, height } => {
                write!(f, "invalid surface dimensions {}x{}", width, height)
            }
            ConfigError::InvalidTuning(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Drawable area in pixels (origin top-left, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    /// Height of the ground strip
    pub ground_height: f32,
}

impl Surface {
    /// Validate dimensions, using the default ground strip
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        Self::with_ground(width, height, GROUND_HEIGHT)
    }

    pub fn with_ground(width: f32, height: f32, ground_height: f32) -> Result<Self, ConfigError> {
        let usable = width.is_finite()
            && height.is_finite()
            && width > 0.0
            && height > 0.0
            && ground_height >= 0.0
            && height > ground_height;
        if !usable {
            return Err(ConfigError::InvalidSurface { width, height });
        }
        Ok(Self {
            width,
            height,
            ground_height,
        })
    }

    /// Y coordinate of the top of the ground strip
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub gravity: f32,
    pub impulse: f32,
    pub rotation_factor: f32,
    pub max_rotation: f32,

    pub pipe_width: f32,
    pub pipe_segment_height: f32,
    pub pipe_gap: f32,
    pub pipe_min_y: f32,
    pub pipe_max_y: f32,
    pub pipe_speed: f32,
    pub pipe_spawn_interval: u64,

    pub particle_life: u32,
    pub flap_burst: usize,
    pub score_burst: usize,
    pub crash_burst: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            impulse: IMPULSE,
            rotation_factor: ROTATION_FACTOR,
            max_rotation: MAX_ROTATION,

            pipe_width: PIPE_WIDTH,
            pipe_segment_height: PIPE_SEGMENT_HEIGHT,
            pipe_gap: PIPE_GAP,
            pipe_min_y: PIPE_MIN_Y,
            pipe_max_y: PIPE_MAX_Y,
            pipe_speed: PIPE_SPEED,
            pipe_spawn_interval: PIPE_SPAWN_INTERVAL,

            particle_life: PARTICLE_LIFE,
            flap_burst: FLAP_BURST,
            score_burst: SCORE_BURST,
            crash_burst: CRASH_BURST,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidTuning(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::InvalidTuning(msg.to_string()));

        if self.pipe_min_y >= self.pipe_max_y {
            return fail("pipe_min_y must be below pipe_max_y");
        }
        if self.pipe_speed <= 0.0 {
            return fail("pipe_speed must be positive");
        }
        if self.pipe_width <= 0.0 || self.pipe_segment_height <= 0.0 || self.pipe_gap <= 0.0 {
            return fail("pipe dimensions must be positive");
        }
        if self.pipe_spawn_interval == 0 {
            return fail("pipe_spawn_interval must be at least one tick");
        }
        if self.bird_width <= 0.0 || self.bird_height <= 0.0 {
            return fail("bird dimensions must be positive");
        }
        if self.max_rotation < 0.0 {
            return fail("max_rotation must not be negative");
        }
        if self.particle_life == 0 {
            return fail("particle_life must be at least one tick");
        }
        Ok(())
    }

    /// Reject a surface with less room above the ground than the bird is tall
    pub fn check_surface(&self, surface: &Surface) -> Result<(), ConfigError> {
        if surface.ground_y() < self.bird_height {
            return Err(ConfigError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_ground_line() {
        let surface = Surface::new(800.0, 600.0).unwrap();
        assert_eq!(surface.ground_y(), 500.0);
    }

    #[test]
    fn test_surface_rejects_bad_dimensions() {
        assert!(Surface::new(0.0, 600.0).is_err());
        assert!(Surface::new(800.0, -1.0).is_err());
        assert!(Surface::new(f32::NAN, 600.0).is_err());
        // No room above the ground strip
        assert!(Surface::new(800.0, GROUND_HEIGHT).is_err());
    }

    #[test]
    fn test_surface_must_fit_the_bird() {
        let tuning = Tuning::default();
        let cramped = Surface::new(800.0, 101.0).unwrap();
        assert_eq!(
            tuning.check_surface(&cramped),
            Err(ConfigError::InvalidSurface {
                width: 800.0,
                height: 101.0
            })
        );

        let snug = Surface::new(800.0, GROUND_HEIGHT + BIRD_HEIGHT).unwrap();
        assert!(tuning.check_surface(&snug).is_ok());
        assert!(tuning.check_surface(&Surface::new(800.0, 600.0).unwrap()).is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "pipe_speed": 4.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.pipe_speed, 4.0);
        assert_eq!(tuning.impulse, IMPULSE);
        assert_eq!(tuning.pipe_spawn_interval, PIPE_SPAWN_INTERVAL);
    }

    #[test]
    fn test_inconsistent_override_rejected() {
        let err = Tuning::from_json(r#"{ "pipe_min_y": 10.0, "pipe_max_y": -10.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning(_)));

        assert!(Tuning::from_json(r#"{ "pipe_spawn_interval": 0 }"#).is_err());
        assert!(Tuning::from_json("not json").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }
}
